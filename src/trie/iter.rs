//! Iteration over trie entries.
//!
//! Two styles are available. The lazy iterators ([`Iter`], [`Keys`],
//! [`Values`], [`IntoIter`]) walk the structure with an explicit stack and
//! cost nothing up front. The [`Entries`] view materializes the ascending
//! node order once, caches it on the trie, and in exchange offers indexed
//! access and double-ended iteration; the cache survives until the next
//! structural change and is shared by every view built in between.

use std::fmt;
use std::iter::FusedIterator;

use crate::trie::analyzer::KeyAnalyzer;
use crate::trie::node::{Node, NodeId, ROOT};
use crate::trie::patricia_trie::PatriciaTrie;

impl<K, V, A> PatriciaTrie<K, V, A> {
    /// Iterates over entries in ascending bit-pattern order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Iterates over keys in ascending bit-pattern order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Iterates over values, ordered by their keys.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an indexed, double-ended view of all entries.
    ///
    /// The first call after a structural change walks the trie once to
    /// record the ascending order; subsequent calls reuse that snapshot.
    /// Replacing the value of an existing key does not drop it.
    ///
    /// # Examples
    ///
    /// ```
    /// use patricia_map::PatriciaTrie;
    ///
    /// let mut trie = PatriciaTrie::new();
    /// for key in ["b", "c", "a"] {
    ///     trie.insert(key, ())?;
    /// }
    ///
    /// let entries = trie.entries();
    /// assert_eq!(entries.get(1).map(|(k, _)| *k), Some("b"));
    /// let back: Vec<_> = entries.iter().rev().map(|(k, _)| *k).collect();
    /// assert_eq!(back, ["c", "b", "a"]);
    /// # Ok::<(), patricia_map::PatriciaError>(())
    /// ```
    pub fn entries(&mut self) -> Entries<'_, K, V, A> {
        self.ensure_order();
        let trie = &*self;
        Entries {
            trie,
            order: trie.cached_order.as_deref().unwrap_or(&[]),
        }
    }
}

/// Lazy in-order iterator over borrowed entries.
pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    stack: Vec<(NodeId, i32)>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new<A>(trie: &'a PatriciaTrie<K, V, A>) -> Self {
        Iter {
            nodes: &trie.nodes,
            stack: vec![(trie.node(ROOT).left, -1)],
            remaining: trie.len(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((h, last)) = self.stack.pop() {
            let n = &self.nodes[h as usize];
            if n.bit_index <= last {
                // Arrived over a back link: this position is terminal.
                if let Some(pair) = n.pair() {
                    self.remaining -= 1;
                    return Some(pair);
                }
            } else {
                self.stack.push((n.right, n.bit_index));
                self.stack.push((n.left, n.bit_index));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

/// Iterator over borrowed keys in ascending order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over borrowed values, ordered by their keys.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// Owning in-order iterator; see [`IntoIterator`] on the trie.
pub struct IntoIter<K, V> {
    nodes: Vec<Node<K, V>>,
    order: std::vec::IntoIter<NodeId>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        for id in self.order.by_ref() {
            if let Some(pair) = self.nodes[id as usize].entry.take() {
                return Some(pair);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V, A> IntoIterator for PatriciaTrie<K, V, A> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> IntoIter<K, V> {
        self.ensure_order();
        let order = self.cached_order.take().unwrap_or_default();
        IntoIter {
            nodes: std::mem::take(&mut self.nodes),
            order: order.into_iter(),
        }
    }
}

impl<'a, K, V, A> IntoIterator for &'a PatriciaTrie<K, V, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// Snapshot view over a trie's entries in ascending order.
///
/// Backed by the trie's cached order, so every accessor is O(1) plus the
/// one-time cost of recording the order. The shared borrow taken out by
/// the view keeps the trie immutable for the view's whole lifetime.
pub struct Entries<'a, K, V, A> {
    trie: &'a PatriciaTrie<K, V, A>,
    order: &'a [NodeId],
}

impl<'a, K, V, A> Entries<'a, K, V, A> {
    /// Number of entries in the view.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns whether the view is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the entry at `index` in ascending order.
    pub fn get(&self, index: usize) -> Option<(&'a K, &'a V)> {
        self.order
            .get(index)
            .and_then(|&id| self.trie.node(id).pair())
    }

    /// Double-ended iterator over the snapshot.
    pub fn iter(&self) -> EntriesIter<'a, K, V, A> {
        EntriesIter {
            trie: self.trie,
            ids: self.order.iter(),
        }
    }
}

impl<'a, K, V, A> IntoIterator for &Entries<'a, K, V, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = EntriesIter<'a, K, V, A>;

    fn into_iter(self) -> EntriesIter<'a, K, V, A> {
        self.iter()
    }
}

/// Iterator over an [`Entries`] snapshot.
pub struct EntriesIter<'a, K, V, A> {
    trie: &'a PatriciaTrie<K, V, A>,
    ids: std::slice::Iter<'a, NodeId>,
}

impl<'a, K, V, A> Iterator for EntriesIter<'a, K, V, A> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().and_then(|&id| self.trie.node(id).pair())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<K, V, A> DoubleEndedIterator for EntriesIter<'_, K, V, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().and_then(|&id| self.trie.node(id).pair())
    }
}

impl<K, V, A> ExactSizeIterator for EntriesIter<'_, K, V, A> {}
impl<K, V, A> FusedIterator for EntriesIter<'_, K, V, A> {}

impl<K: Eq, V, A: KeyAnalyzer<K>> Extend<(K, V)> for PatriciaTrie<K, V, A> {
    /// Inserts every pair from the iterator.
    ///
    /// Panics if the trie runs out of node index space, which a caller
    /// with fallibility requirements should preempt via
    /// [`insert`](PatriciaTrie::insert).
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v).expect("extend exceeded trie capacity");
        }
    }
}

impl<K: Eq, V, A: KeyAnalyzer<K> + Default> FromIterator<(K, V)> for PatriciaTrie<K, V, A> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut trie = Self::with_analyzer(A::default());
        trie.extend(iter);
        trie
    }
}

impl<K: fmt::Debug, V: fmt::Debug, A> fmt::Debug for PatriciaTrie<K, V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Eq, V: PartialEq, A> PartialEq for PatriciaTrie<K, V, A> {
    fn eq(&self, other: &Self) -> bool {
        // Entry order is canonical, so a zipped walk settles it.
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq, A> Eq for PatriciaTrie<K, V, A> {}
