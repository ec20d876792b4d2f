//! PATRICIA trie containers and their key strategies.
//!
//! [`PatriciaTrie`] is the general container; [`PatriciaIntTrie`] fixes
//! the key type to `u32`. How keys decompose into bits is the
//! [`analyzer`] module's business, and everything about entry order is
//! derived from those bits alone.

pub mod analyzer;

mod int;
mod iter;
mod node;
mod patricia_trie;
#[cfg(feature = "serde")]
mod serde;

pub use analyzer::{BytesKeyAnalyzer, KeyAnalyzer, KeyDiff, U32KeyAnalyzer, U64KeyAnalyzer};
pub use int::PatriciaIntTrie;
pub use iter::{Entries, EntriesIter, IntoIter, Iter, Keys, Values};
pub use patricia_trie::{Decision, PatriciaTrie};
