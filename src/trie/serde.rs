//! Serde support, enabled by the `serde` feature.
//!
//! A trie serializes as an ordered map. Deserialization rebuilds it
//! through ordinary insertion with the analyzer taken from `Default`, so
//! input whose keys collide bitwise follows the container's usual
//! fail-fast contract.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::trie::analyzer::KeyAnalyzer;
use crate::trie::patricia_trie::PatriciaTrie;

impl<K, V, A> Serialize for PatriciaTrie<K, V, A>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct TrieVisitor<K, V, A> {
    marker: PhantomData<fn() -> PatriciaTrie<K, V, A>>,
}

impl<'de, K, V, A> Visitor<'de> for TrieVisitor<K, V, A>
where
    K: Deserialize<'de> + Eq,
    V: Deserialize<'de>,
    A: KeyAnalyzer<K> + Default,
{
    type Value = PatriciaTrie<K, V, A>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with bit-comparable keys")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut trie = PatriciaTrie::with_capacity_and_analyzer(
            access.size_hint().unwrap_or(0),
            A::default(),
        );
        while let Some((key, value)) = access.next_entry()? {
            trie.insert(key, value).map_err(serde::de::Error::custom)?;
        }
        Ok(trie)
    }
}

impl<'de, K, V, A> Deserialize<'de> for PatriciaTrie<K, V, A>
where
    K: Deserialize<'de> + Eq,
    V: Deserialize<'de>,
    A: KeyAnalyzer<K> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TrieVisitor { marker: PhantomData })
    }
}
