//! Key analyzers: the bit-level view of keys
//!
//! The trie never inspects keys directly. Every bit test and every
//! first-difference computation goes through a [`KeyAnalyzer`], a stateless
//! strategy the caller supplies when constructing the trie. Built-in
//! analyzers cover byte sequences ([`BytesKeyAnalyzer`]) and fixed-width
//! unsigned integers ([`U32KeyAnalyzer`], [`U64KeyAnalyzer`]).
//!
//! Bit index 0 is always the most significant bit of the first element.
//! Reading past the end of a variable-length key yields zero bits, which is
//! what makes a short key sort before every key it prefixes.

/// Outcome of comparing two keys bit by bit.
///
/// Replaces the classic PATRICIA convention of returning `-1`/`-2` sentinel
/// bit indices with an explicit enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDiff {
    /// Index of the first bit at which the two keys differ.
    Bit(u32),
    /// The probed key has no set bits at all (the zero key).
    Zero,
    /// The two keys are bit-for-bit identical.
    Equal,
}

/// Strategy for reading keys as bit strings.
///
/// Implementations must be consistent: `bit_index(a, Some(b))` returning
/// [`KeyDiff::Bit(i)`] implies `is_set(a, i) != is_set(b, i)` and agreement
/// on every bit before `i`. The trie additionally relies on analyzers
/// agreeing with the key type's `Eq`: two keys that compare equal must be
/// bitwise identical, and bitwise-identical keys that compare unequal make
/// the trie fail fast on insertion.
///
/// # Examples
///
/// ```
/// use patricia_map::{BytesKeyAnalyzer, KeyAnalyzer, KeyDiff};
///
/// let analyzer = BytesKeyAnalyzer;
/// // 'a' is 0x61: bits 1, 2 and 7 of the first byte are set.
/// assert!(analyzer.is_set(&"a", 1));
/// assert!(!analyzer.is_set(&"a", 0));
/// assert_eq!(analyzer.bit_index(&"a", Some(&"b")), KeyDiff::Bit(6));
/// ```
pub trait KeyAnalyzer<K: ?Sized> {
    /// Returns whether the key's bit at `bit_index` is set (0 = MSB).
    fn is_set(&self, key: &K, bit_index: u32) -> bool;

    /// Locates the first bit at which `key` differs from `other`.
    ///
    /// An absent `other` reads as a key with no set bits, so the result is
    /// the probe's first set bit (or [`KeyDiff::Zero`] if it has none).
    fn bit_index(&self, key: &K, other: Option<&K>) -> KeyDiff;
}

/// Analyzer for byte-sequence keys: anything `AsRef<[u8]>`.
///
/// Covers `&str`, `String`, `&[u8]`, `Vec<u8>` and byte arrays with eight
/// bits per element, most significant bit first. Bit-pattern order under
/// this analyzer equals lexicographic byte order.
///
/// Two caveats follow from keys being read as zero-padded bit strings:
///
/// - Every key with no set bits (the empty sequence, any run of `0x00`
///   bytes) is the zero key. All of them share the trie's single zero-key
///   slot, so the slot's stored key is whichever was inserted last.
/// - Keys that differ only by trailing zero bytes (`"a"` vs. `"a\0"`) are
///   bitwise indistinguishable. Inserting such a pair panics rather than
///   silently conflating them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BytesKeyAnalyzer;

/// Reads byte `index`, with positions past the end yielding zero.
#[inline]
fn byte_at(key: &[u8], index: usize) -> u8 {
    key.get(index).copied().unwrap_or(0)
}

impl<T: AsRef<[u8]> + ?Sized> KeyAnalyzer<T> for BytesKeyAnalyzer {
    #[inline]
    fn is_set(&self, key: &T, bit_index: u32) -> bool {
        let key = key.as_ref();
        let elem = (bit_index / 8) as usize;
        elem < key.len() && key[elem] & (0x80 >> (bit_index % 8)) != 0
    }

    fn bit_index(&self, key: &T, other: Option<&T>) -> KeyDiff {
        let key = key.as_ref();
        let other = other.map_or(&[][..], AsRef::as_ref);
        // An empty probe short-circuits to the zero key, whatever the
        // other side holds.
        if !key.is_empty() {
            let len = key.len().max(other.len());
            for i in 0..len {
                let diff = byte_at(key, i) ^ byte_at(other, i);
                if diff != 0 {
                    let bit = i as u64 * 8 + u64::from(diff.leading_zeros());
                    return KeyDiff::Bit(bit.min(u64::from(u32::MAX)) as u32);
                }
            }
        }
        if key.iter().all(|&b| b == 0) {
            KeyDiff::Zero
        } else {
            KeyDiff::Equal
        }
    }
}

/// Analyzer for `u32` keys: 32 bits, most significant first.
///
/// Key order under this analyzer is unsigned numeric order. To store signed
/// values in numeric order, remap them through
/// [`signed_order`](U32KeyAnalyzer::signed_order) on the way in and
/// [`signed_value`](U32KeyAnalyzer::signed_value) on the way out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct U32KeyAnalyzer;

impl U32KeyAnalyzer {
    /// Remaps a signed value so that bit-pattern order equals numeric order.
    ///
    /// Flips the sign bit, sending `i32::MIN..=i32::MAX` onto
    /// `0..=u32::MAX` monotonically. The mapping is its own inverse.
    #[inline]
    pub fn signed_order(value: i32) -> u32 {
        (value as u32) ^ (1 << 31)
    }

    /// Inverse of [`signed_order`](U32KeyAnalyzer::signed_order).
    #[inline]
    pub fn signed_value(key: u32) -> i32 {
        (key ^ (1 << 31)) as i32
    }
}

impl KeyAnalyzer<u32> for U32KeyAnalyzer {
    #[inline]
    fn is_set(&self, key: &u32, bit_index: u32) -> bool {
        bit_index < 32 && key & (1u32 << 31 >> bit_index) != 0
    }

    #[inline]
    fn bit_index(&self, key: &u32, other: Option<&u32>) -> KeyDiff {
        if *key == 0 {
            return KeyDiff::Zero;
        }
        let diff = key ^ other.copied().unwrap_or(0);
        if diff == 0 {
            KeyDiff::Equal
        } else {
            KeyDiff::Bit(diff.leading_zeros())
        }
    }
}

/// Analyzer for `u64` keys: 64 bits, most significant first.
///
/// The 64-bit counterpart of [`U32KeyAnalyzer`], including the signed-order
/// remapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct U64KeyAnalyzer;

impl U64KeyAnalyzer {
    /// Remaps a signed value so that bit-pattern order equals numeric order.
    #[inline]
    pub fn signed_order(value: i64) -> u64 {
        (value as u64) ^ (1 << 63)
    }

    /// Inverse of [`signed_order`](U64KeyAnalyzer::signed_order).
    #[inline]
    pub fn signed_value(key: u64) -> i64 {
        (key ^ (1 << 63)) as i64
    }
}

impl KeyAnalyzer<u64> for U64KeyAnalyzer {
    #[inline]
    fn is_set(&self, key: &u64, bit_index: u32) -> bool {
        bit_index < 64 && key & (1u64 << 63 >> bit_index) != 0
    }

    #[inline]
    fn bit_index(&self, key: &u64, other: Option<&u64>) -> KeyDiff {
        if *key == 0 {
            return KeyDiff::Zero;
        }
        let diff = key ^ other.copied().unwrap_or(0);
        if diff == 0 {
            KeyDiff::Equal
        } else {
            KeyDiff::Bit(diff.leading_zeros())
        }
    }
}
