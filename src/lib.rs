//! # patricia-map: Ordered Maps over Key Bit Patterns
//!
//! This crate implements the PATRICIA trie, a space-optimized binary radix tree that
//! stores one node per key and derives entry order from the bits of the keys themselves.
//! Lookups, insertions and closest-match queries all run in time proportional to the
//! key length, independent of how many entries are stored.
//!
//! ## Key Features
//!
//! - **Ordered map API**: ascending iteration, first/last access, pop operations
//! - **Closest-match lookup**: find the stored key bitwise nearest to any probe
//! - **Neighborhood traversal**: visit entries by closeness with early exit
//! - **Pluggable key strategies**: byte-sequence and integer analyzers built in, custom ones via a trait
//! - **Snapshot views**: indexed, double-ended access over a cached entry order
//! - **Arena storage**: nodes in a flat vector addressed by 32-bit indices, no per-node allocation
//!
//! ## Quick Start
//!
//! ```rust
//! use patricia_map::{Decision, PatriciaIntTrie, PatriciaTrie};
//!
//! // Byte-sequence keys iterate in lexicographic order
//! let mut map = PatriciaTrie::new();
//! map.insert("albert", 1)?;
//! map.insert("alberto", 2)?;
//! map.insert("xavier", 3)?;
//! assert_eq!(map.first_key(), Some(&"albert"));
//! assert_eq!(map.last_key(), Some(&"xavier"));
//!
//! // Closest stored key to a probe that is not in the map
//! assert_eq!(map.select_key(&"alberta"), Some(&"alberto"));
//!
//! // Ordered traversal with early exit
//! let mut seen = Vec::new();
//! map.traverse(|key, _| {
//!     seen.push(*key);
//!     if seen.len() == 2 { Decision::Stop } else { Decision::Continue }
//! });
//! assert_eq!(seen, ["albert", "alberto"]);
//!
//! // Integer keys in numeric order
//! let mut ints = PatriciaIntTrie::default();
//! ints.insert(42u32, "answer")?;
//! assert_eq!(ints.get(&42), Some(&"answer"));
//! # Ok::<(), patricia_map::PatriciaError>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod trie;

// Re-export core types
pub use error::{PatriciaError, Result};
pub use trie::{
    BytesKeyAnalyzer, Decision, Entries, EntriesIter, IntoIter, Iter, KeyAnalyzer, KeyDiff, Keys,
    PatriciaIntTrie, PatriciaTrie, U32KeyAnalyzer, U64KeyAnalyzer, Values,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
