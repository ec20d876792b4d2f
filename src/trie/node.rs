//! Arena node model
//!
//! Nodes live in a flat `Vec` and refer to each other by 32-bit arena
//! indices instead of pointers. Index 0 is the root sentinel. Child links
//! always hold a valid index; a link leading to a node whose bit index is
//! not strictly greater than the link's origin is a back link, and back
//! links play the role null pointers would in an ordinary binary tree.

/// Arena index of a node.
pub(crate) type NodeId = u32;

/// Arena index of the root sentinel.
pub(crate) const ROOT: NodeId = 0;

/// A single trie node.
///
/// The root sentinel is the only node whose `entry` may be `None`; an empty
/// entry there is what an empty zero-key slot looks like. Every other node
/// carries exactly one key/value pair for as long as it exists.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    /// Bit this node discriminates on. The root sentinel holds -1 so that
    /// plain integer comparison classifies it below every real node.
    pub(crate) bit_index: i32,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) entry: Option<(K, V)>,
}

impl<K, V> Node<K, V> {
    /// The pristine root sentinel: empty slot, left link onto itself.
    pub(crate) fn root() -> Self {
        Node {
            bit_index: -1,
            left: ROOT,
            right: ROOT,
            entry: None,
        }
    }

    /// Borrows the stored pair, if any.
    #[inline]
    pub(crate) fn pair(&self) -> Option<(&K, &V)> {
        self.entry.as_ref().map(|(k, v)| (k, v))
    }
}
