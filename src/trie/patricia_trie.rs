//! Space-optimized PATRICIA trie
//!
//! An ordered associative container keyed by the bit pattern of its keys.
//! Every internal decision consumes a single bit, bit indices strictly
//! increase on the way down, and a child link that does not increase the
//! bit index is a back link that terminates descent where an ordinary
//! binary tree would hold a null. The structure stores one node per key:
//! there are no separate leaves.
//!
//! Key features:
//!
//! - **Ordered**: traversal yields entries in ascending bit-pattern order,
//!   which for byte keys is lexicographic order
//! - **One node per key**: no chains of single-child internal nodes
//! - **Pluggable key view**: all bit access goes through a [`KeyAnalyzer`]
//! - **Arena storage**: nodes live in a flat `Vec` addressed by 32-bit
//!   indices, with the sentinel at index 0
//!
//! # Examples
//!
//! ```
//! use patricia_map::PatriciaTrie;
//!
//! let mut trie = PatriciaTrie::new();
//! trie.insert("cat", 1)?;
//! trie.insert("car", 2)?;
//! trie.insert("dog", 3)?;
//!
//! assert_eq!(trie.get(&"car"), Some(&2));
//! let keys: Vec<_> = trie.keys().copied().collect();
//! assert_eq!(keys, ["car", "cat", "dog"]);
//! # Ok::<(), patricia_map::PatriciaError>(())
//! ```

use crate::error::{PatriciaError, Result};
use crate::trie::analyzer::{BytesKeyAnalyzer, KeyAnalyzer, KeyDiff};
use crate::trie::node::{Node, NodeId, ROOT};

/// Verdict a traversal visitor returns after seeing an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Keep walking.
    Continue,
    /// Cancel the rest of the walk.
    Stop,
}

/// An ordered map backed by a PATRICIA trie over key bit patterns.
///
/// Keys are read as bit strings through a [`KeyAnalyzer`] strategy; the
/// default analyzer views keys as byte sequences, so `&str`, `String`,
/// `Vec<u8>` and friends work out of the box. Iteration order is ascending
/// bit-pattern order. Lookups and insertions touch O(key length) nodes and
/// never compare whole keys until a single final equality check.
///
/// One key per trie may have an all-zero bit pattern (the empty string,
/// integer zero); it lives in a dedicated slot on the root sentinel and
/// sorts before everything else.
///
/// Removal of a non-zero key rebuilds the structure without the removed
/// entry. That makes `remove` O(n); the trade is simpler invariants and is
/// inherited from the structure this implementation follows. The rebuild is
/// atomic from the caller's perspective.
///
/// # Examples
///
/// ```
/// use patricia_map::PatriciaTrie;
///
/// let mut trie = PatriciaTrie::new();
/// trie.insert("alpha", 1)?;
/// trie.insert("beta", 2)?;
///
/// assert_eq!(trie.len(), 2);
/// assert_eq!(trie.first_key(), Some(&"alpha"));
/// assert_eq!(trie.remove(&"alpha"), Some(1));
/// assert_eq!(trie.len(), 1);
/// # Ok::<(), patricia_map::PatriciaError>(())
/// ```
#[derive(Clone)]
pub struct PatriciaTrie<K, V, A = BytesKeyAnalyzer> {
    pub(crate) nodes: Vec<Node<K, V>>,
    analyzer: A,
    len: usize,
    /// Ascending node order, materialized on demand and dropped by any
    /// structural change.
    pub(crate) cached_order: Option<Vec<NodeId>>,
    /// Advances on every structural change, in step with dropping the
    /// snapshot above.
    generation: u64,
}

impl<K, V> PatriciaTrie<K, V, BytesKeyAnalyzer> {
    /// Creates an empty trie over byte-sequence keys.
    ///
    /// Use [`with_analyzer`](PatriciaTrie::with_analyzer) to supply a
    /// different key strategy.
    pub fn new() -> Self {
        Self::with_analyzer(BytesKeyAnalyzer)
    }

    /// Creates an empty trie with room for `capacity` keys preallocated.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_analyzer(capacity, BytesKeyAnalyzer)
    }
}

impl<K, V, A: Default> Default for PatriciaTrie<K, V, A> {
    fn default() -> Self {
        Self::with_analyzer(A::default())
    }
}

impl<K, V, A> PatriciaTrie<K, V, A> {
    /// Creates an empty trie using the given key analyzer.
    pub fn with_analyzer(analyzer: A) -> Self {
        Self::with_capacity_and_analyzer(0, analyzer)
    }

    /// Creates an empty trie with preallocated room and the given analyzer.
    pub fn with_capacity_and_analyzer(capacity: usize, analyzer: A) -> Self {
        let mut nodes = Vec::with_capacity(capacity.saturating_add(1));
        nodes.push(Node::root());
        PatriciaTrie {
            nodes,
            analyzer,
            len: 0,
            cached_order: None,
            generation: 0,
        }
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the trie holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrows the key analyzer.
    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Drops every entry, keeping the allocation.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        let root = &mut self.nodes[ROOT as usize];
        root.left = ROOT;
        root.entry = None;
        self.len = 0;
        self.touch();
    }

    /// Visits every entry in ascending bit-pattern order.
    ///
    /// The walk is iterative, so arbitrarily deep tries cannot overflow the
    /// stack. Returning [`Decision::Stop`] cancels the remainder.
    ///
    /// # Examples
    ///
    /// ```
    /// use patricia_map::{Decision, PatriciaTrie};
    ///
    /// let mut trie = PatriciaTrie::new();
    /// for key in ["2", "1", "3"] {
    ///     trie.insert(key, ())?;
    /// }
    ///
    /// let mut seen = Vec::new();
    /// trie.traverse(|key, _| {
    ///     seen.push(*key);
    ///     Decision::Continue
    /// });
    /// assert_eq!(seen, ["1", "2", "3"]);
    /// # Ok::<(), patricia_map::PatriciaError>(())
    /// ```
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V) -> Decision,
    {
        let mut stack = vec![(self.node(ROOT).left, -1)];
        while let Some((h, last)) = stack.pop() {
            let n = self.node(h);
            if n.bit_index <= last {
                if let Some((k, v)) = n.pair() {
                    if visit(k, v) == Decision::Stop {
                        return;
                    }
                }
            } else {
                stack.push((n.right, n.bit_index));
                stack.push((n.left, n.bit_index));
            }
        }
    }

    /// Returns whether any entry holds the given value.
    ///
    /// Walks entries in order and stops at the first hit.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        let mut found = false;
        self.traverse(|_, v| {
            if v == value {
                found = true;
                Decision::Stop
            } else {
                Decision::Continue
            }
        });
        found
    }

    /// Returns the entry with the smallest key.
    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.first_id().and_then(|id| self.node(id).pair())
    }

    /// Returns the entry with the largest key.
    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.last_id().and_then(|id| self.node(id).pair())
    }

    /// Returns the smallest key.
    pub fn first_key(&self) -> Option<&K> {
        self.first_entry().map(|(k, _)| k)
    }

    /// Returns the largest key.
    pub fn last_key(&self) -> Option<&K> {
        self.last_entry().map(|(k, _)| k)
    }

    fn first_id(&self) -> Option<NodeId> {
        // The zero key has no set bits and therefore sorts first.
        if self.node(ROOT).entry.is_some() {
            return Some(ROOT);
        }
        let mut h = self.node(ROOT).left;
        if h == ROOT {
            return None;
        }
        let mut last = -1;
        loop {
            let n = self.node(h);
            if n.bit_index <= last {
                return Some(h);
            }
            last = n.bit_index;
            // An empty sentinel slot on the left cannot hold the minimum;
            // the smallest entry then lives under the right branch.
            h = if n.left == ROOT { n.right } else { n.left };
        }
    }

    fn last_id(&self) -> Option<NodeId> {
        let mut h = self.node(ROOT).left;
        if h == ROOT {
            // Either nothing is stored, or only the zero key is.
            return self.node(ROOT).entry.is_some().then_some(ROOT);
        }
        let mut last = -1;
        loop {
            let n = self.node(h);
            if n.bit_index <= last {
                return Some(h);
            }
            last = n.bit_index;
            // Right links never lead back to the sentinel.
            h = n.right;
        }
    }

    /// Ascending arena ids of every real node, sentinel excluded.
    pub(crate) fn ascending_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len().saturating_sub(1));
        let mut stack = vec![(self.node(ROOT).left, -1)];
        while let Some((h, last)) = stack.pop() {
            let n = self.node(h);
            if n.bit_index <= last {
                if h != ROOT {
                    out.push(h);
                }
            } else {
                stack.push((n.right, n.bit_index));
                stack.push((n.left, n.bit_index));
            }
        }
        out
    }

    /// Fills the order snapshot if the last structural change dropped it.
    pub(crate) fn ensure_order(&mut self) {
        if self.cached_order.is_none() {
            let mut order = Vec::with_capacity(self.len);
            if self.node(ROOT).entry.is_some() {
                order.push(ROOT);
            }
            order.extend(self.ascending_ids());
            self.cached_order = Some(order);
        }
    }

    /// Marks a structural change: the snapshot is stale, the generation
    /// advances. Both happen together or not at all.
    fn touch(&mut self) {
        self.cached_order = None;
        self.generation = self.generation.wrapping_add(1);
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id as usize]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id as usize]
    }
}

impl<K: Eq, V, A: KeyAnalyzer<K>> PatriciaTrie<K, V, A> {
    /// Inserts a key/value pair, returning the previous value if the key
    /// was already present.
    ///
    /// Replacing the value of an existing key leaves size, order and any
    /// snapshot untouched. A key with no set bits goes to the dedicated
    /// zero-key slot; note that all such keys share that one slot.
    ///
    /// # Errors
    ///
    /// Fails if the node arena is out of index space or the first
    /// differing bit lies past the supported range; see [`PatriciaError`].
    ///
    /// # Panics
    ///
    /// Panics if the analyzer reports the new key as bitwise identical to
    /// a stored key that compares unequal, e.g. two byte keys differing
    /// only by trailing zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// use patricia_map::PatriciaTrie;
    ///
    /// let mut trie = PatriciaTrie::new();
    /// assert_eq!(trie.insert("k", 1)?, None);
    /// assert_eq!(trie.insert("k", 2)?, Some(1));
    /// assert_eq!(trie.len(), 1);
    /// # Ok::<(), patricia_map::PatriciaError>(())
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let h = self.closest(&key);
        // Exact match: swap the value in place.
        if let Some((k, v)) = self.node_mut(h).entry.as_mut() {
            if *k == key {
                return Ok(Some(std::mem::replace(v, value)));
            }
        }
        let diff = self
            .analyzer
            .bit_index(&key, self.node(h).pair().map(|(k, _)| k));
        match diff {
            KeyDiff::Zero => Ok(self.store_zero(key, value)),
            KeyDiff::Bit(bit) => {
                let bit = i32::try_from(bit).map_err(|_| PatriciaError::key_too_long(bit))?;
                self.splice(key, value, bit)?;
                Ok(None)
            }
            KeyDiff::Equal => panic!(
                "key analyzer reported bitwise-equal keys that compare unequal; \
                 keys differing only by trailing zero bits cannot coexist"
            ),
        }
    }

    /// Returns a reference to the value stored under the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use patricia_map::PatriciaTrie;
    ///
    /// let mut trie = PatriciaTrie::new();
    /// trie.insert("k", 7)?;
    /// assert_eq!(trie.get(&"k"), Some(&7));
    /// assert_eq!(trie.get(&"missing"), None);
    /// # Ok::<(), patricia_map::PatriciaError>(())
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        match self.node(self.closest(key)).pair() {
            Some((k, v)) if k == key => Some(v),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value stored under the key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let h = self.closest(key);
        match self.node_mut(h).entry.as_mut() {
            Some((k, v)) if *k == *key => Some(v),
            _ => None,
        }
    }

    /// Returns whether the key is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes a key, returning its value if it was present.
    ///
    /// Removing the zero key clears its slot directly; removing any other
    /// key rebuilds the trie without it, which is O(n).
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let h = self.closest(key);
        match self.node(h).pair() {
            Some((k, _)) if k == key => {}
            _ => return None,
        }
        if h == ROOT {
            let taken = self.node_mut(ROOT).entry.take();
            self.len -= 1;
            self.touch();
            return taken.map(|(_, v)| v);
        }
        self.rebuild_without(h).map(|(_, v)| v)
    }

    /// Returns the entry whose bit pattern lies closest to the probe.
    ///
    /// This is the raw descent: follow the probe's bits to a terminal
    /// position and report what is stored there, without any equality
    /// check. `None` means the descent ran into the empty zero-key slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use patricia_map::PatriciaTrie;
    ///
    /// let mut trie = PatriciaTrie::new();
    /// trie.insert("cat", 1)?;
    /// let (key, _) = trie.select(&"cap").unwrap();
    /// assert_eq!(*key, "cat");
    /// # Ok::<(), patricia_map::PatriciaError>(())
    /// ```
    pub fn select(&self, key: &K) -> Option<(&K, &V)> {
        self.node(self.closest(key)).pair()
    }

    /// Key of the closest entry; see [`select`](PatriciaTrie::select).
    pub fn select_key(&self, key: &K) -> Option<&K> {
        self.select(key).map(|(k, _)| k)
    }

    /// Value of the closest entry; see [`select`](PatriciaTrie::select).
    pub fn select_value(&self, key: &K) -> Option<&V> {
        self.select(key).map(|(_, v)| v)
    }

    /// Visits entries ordered by closeness to the probe.
    ///
    /// At every branch the side matching the probe's bit is walked first,
    /// so the closest entry arrives first and the rest follow in
    /// neighborhood order. Returns the entry the visitor stopped on, or
    /// `None` if the walk ran to completion.
    pub fn select_with<F>(&self, key: &K, mut visit: F) -> Option<(&K, &V)>
    where
        F: FnMut(&K, &V) -> Decision,
    {
        let mut stack = vec![(self.node(ROOT).left, -1)];
        while let Some((h, last)) = stack.pop() {
            let n = self.node(h);
            if n.bit_index <= last {
                if let Some((k, v)) = n.pair() {
                    if visit(k, v) == Decision::Stop {
                        return self.node(h).pair();
                    }
                }
            } else if self.analyzer.is_set(key, n.bit_index as u32) {
                stack.push((n.left, n.bit_index));
                stack.push((n.right, n.bit_index));
            } else {
                stack.push((n.right, n.bit_index));
                stack.push((n.left, n.bit_index));
            }
        }
        None
    }

    /// Removes and returns the smallest entry.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let id = self.first_id()?;
        self.take_out(id)
    }

    /// Removes and returns the largest entry.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let id = self.last_id()?;
        self.take_out(id)
    }

    /// Keeps only the entries the predicate approves of.
    ///
    /// Decisions are collected in one ordered pass and survivors are
    /// re-inserted into a fresh structure, so the cost matches a single
    /// removal rebuild no matter how many entries are dropped.
    pub fn retain<F>(&mut self, mut pred: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let order = self.ascending_ids();
        let mut old = std::mem::replace(&mut self.nodes, Vec::with_capacity(order.len() + 1));
        self.nodes.push(Node::root());
        self.len = 0;
        self.touch();
        if let Some((k, mut v)) = old[ROOT as usize].entry.take() {
            if pred(&k, &mut v) {
                self.nodes[ROOT as usize].entry = Some((k, v));
                self.len = 1;
            }
        }
        for id in order {
            if let Some((k, mut v)) = old[id as usize].entry.take() {
                if pred(&k, &mut v) {
                    self.insert(k, v)
                        .expect("retained entries cannot outgrow the arena they came from");
                }
            }
        }
    }

    /// Removes the entry at `id`, whichever removal path applies.
    fn take_out(&mut self, id: NodeId) -> Option<(K, V)> {
        if id == ROOT {
            let taken = self.node_mut(ROOT).entry.take();
            if taken.is_some() {
                self.len -= 1;
                self.touch();
            }
            return taken;
        }
        self.rebuild_without(id)
    }

    /// Follows the probe's bits to the terminal node.
    ///
    /// Starts at the sentinel's left link with bit -1 and stops at the
    /// first node whose bit index fails to increase: either a back link's
    /// target or the sentinel itself.
    fn closest(&self, key: &K) -> NodeId {
        let mut h = self.node(ROOT).left;
        let mut last = -1;
        loop {
            let n = self.node(h);
            if n.bit_index <= last {
                return h;
            }
            last = n.bit_index;
            h = if self.analyzer.is_set(key, n.bit_index as u32) {
                n.right
            } else {
                n.left
            };
        }
    }

    /// Stores into the sentinel's zero-key slot.
    fn store_zero(&mut self, key: K, value: V) -> Option<V> {
        let old = self.node_mut(ROOT).entry.replace((key, value));
        match old {
            Some((_, v)) => Some(v),
            None => {
                self.len += 1;
                self.touch();
                None
            }
        }
    }

    /// Splices a new node discriminating on `bit` into the probe's path.
    ///
    /// The new node's branch for its own key's bit value is a self link;
    /// the other branch takes over the link it displaced.
    fn splice(&mut self, key: K, value: V, bit: i32) -> Result<()> {
        if self.nodes.len() > u32::MAX as usize {
            return Err(PatriciaError::capacity_exceeded(self.nodes.len()));
        }
        let t = self.nodes.len() as NodeId;

        // Find the link to displace: the first node whose bit index is at
        // or past the new one, or a back link relative to its parent.
        let mut parent = ROOT;
        let mut came_right = false;
        let mut h = self.node(ROOT).left;
        loop {
            let n = self.node(h);
            if n.bit_index >= bit || n.bit_index <= self.node(parent).bit_index {
                break;
            }
            parent = h;
            came_right = self.analyzer.is_set(&key, n.bit_index as u32);
            h = if came_right { n.right } else { n.left };
        }

        let set = self.analyzer.is_set(&key, bit as u32);
        let (left, right) = if set { (h, t) } else { (t, h) };
        self.nodes.push(Node {
            bit_index: bit,
            left,
            right,
            entry: Some((key, value)),
        });
        if came_right {
            self.node_mut(parent).right = t;
        } else {
            self.node_mut(parent).left = t;
        }
        self.len += 1;
        self.touch();
        Ok(())
    }

    /// Removes a real node by rebuilding the structure without it.
    ///
    /// Deliberately O(n): every surviving entry moves into a fresh arena in
    /// ascending order. Callers observe either the old structure or the
    /// finished new one.
    fn rebuild_without(&mut self, doomed: NodeId) -> Option<(K, V)> {
        let order = self.ascending_ids();
        log::debug!(
            "rebuilding after removal: {} of {} entries retained",
            order.len().saturating_sub(1),
            order.len()
        );
        let mut old = std::mem::replace(&mut self.nodes, Vec::with_capacity(order.len()));
        self.nodes.push(Node::root());
        self.nodes[ROOT as usize].entry = old[ROOT as usize].entry.take();
        self.len = usize::from(self.nodes[ROOT as usize].entry.is_some());
        self.touch();

        let removed = old[doomed as usize].entry.take();
        for id in order {
            if let Some((k, v)) = old[id as usize].entry.take() {
                self.insert(k, v)
                    .expect("rebuild cannot outgrow the arena it replaces");
            }
        }
        removed
    }
}
