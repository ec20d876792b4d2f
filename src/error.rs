//! Error handling for trie operations
//!
//! Lookups and removals report absence through `Option`; this module covers
//! the conditions a mutation can actually fail on. Both variants carry the
//! context needed to report the failure without re-probing the structure.

use thiserror::Error;

/// Error type for fallible trie operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatriciaError {
    /// The node arena has exhausted its index space.
    ///
    /// Node links are 32-bit arena indices, so a single trie is limited to
    /// `u32::MAX` nodes (one per stored key, plus the sentinel).
    #[error("node capacity exceeded: arena already holds {nodes} nodes")]
    CapacityExceeded {
        /// Number of nodes currently allocated.
        nodes: usize,
    },

    /// A first-difference bit index fell outside the representable range.
    ///
    /// Bit indices are stored as `i32`, so keys may differ no later than
    /// bit `i32::MAX`. In practice this means sequence keys longer than
    /// 256 MiB whose first difference sits past that point.
    #[error("key too long: first differing bit {bit_index} is past the supported range")]
    KeyTooLong {
        /// The bit index the key analyzer reported.
        bit_index: u32,
    },
}

impl PatriciaError {
    /// Creates a capacity error from the current arena size.
    pub fn capacity_exceeded(nodes: usize) -> Self {
        PatriciaError::CapacityExceeded { nodes }
    }

    /// Creates an oversized-key error from the offending bit index.
    pub fn key_too_long(bit_index: u32) -> Self {
        PatriciaError::KeyTooLong { bit_index }
    }
}

/// Result type alias for trie operations.
pub type Result<T> = std::result::Result<T, PatriciaError>;
