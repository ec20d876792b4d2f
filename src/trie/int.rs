//! Fixed-width integer keys.
//!
//! A trie over `u32` keys needs nothing beyond the right analyzer, so the
//! specialization is a type alias and the compiler monomorphizes the rest.
//! Bit-pattern order over unsigned integers is plain numeric order, which
//! makes [`PatriciaIntTrie`] an ordered `u32 -> V` map with zero always
//! sorting first.
//!
//! Signed values need one twist: in two's complement the sign bit is the
//! most significant bit, so raw bit order puts negatives after positives.
//! [`U32KeyAnalyzer::signed_order`] flips the sign bit, mapping `i32` onto
//! `u32` so that bit order equals signed numeric order;
//! [`U32KeyAnalyzer::signed_value`] maps back. The same pair exists for
//! 64-bit keys on [`U64KeyAnalyzer`].
//!
//! # Examples
//!
//! ```
//! use patricia_map::{PatriciaIntTrie, U32KeyAnalyzer};
//!
//! let mut ages = PatriciaIntTrie::default();
//! for id in [30u32, 10, 20] {
//!     ages.insert(id, id * 10)?;
//! }
//! assert_eq!(ages.first_key(), Some(&10));
//! assert_eq!(ages.get(&20), Some(&200));
//!
//! let mut temps = PatriciaIntTrie::default();
//! for celsius in [-7i32, 12, 0] {
//!     temps.insert(U32KeyAnalyzer::signed_order(celsius), ())?;
//! }
//! let coldest = temps.first_key().map(|&k| U32KeyAnalyzer::signed_value(k));
//! assert_eq!(coldest, Some(-7));
//! # Ok::<(), patricia_map::PatriciaError>(())
//! ```

use crate::trie::analyzer::U32KeyAnalyzer;
use crate::trie::patricia_trie::PatriciaTrie;

/// Ordered map from `u32` keys to `V`, in numeric key order.
pub type PatriciaIntTrie<V> = PatriciaTrie<u32, V, U32KeyAnalyzer>;
