//! Charset analysis.
//!
//! A charset of `N` symbols is sliced with `ceil(log2(N))` bits per
//! character. When `N` is not a power of two some slices fall outside the
//! charset and are rejected; the [`RejectionTable`] records how few of the
//! sliced bits actually need to be thrown away for each rejected value.
//!
//! # Rejection zones
//!
//! Take `N = 26` (5 bits per character). The base value is `25 = 11001`.
//! Any slice starting `1101` is `>= 26` whatever its last bit, so only 4 bits
//! carry information about the rejection; the fifth is returned to the pool.
//! Likewise any slice starting `111` is rejected after 3 bits. The table is:
//!
//! ```text
//! threshold  bits consumed
//!   25 (11001)   5   accept zone
//!   27 (11011)   4   values 26..=27
//!   31 (11111)   3   values 28..=31
//! ```

use crate::error::{Error, Result};

/// Smallest number of characters in a charset.
pub const MIN_CHARS: usize = 2;
/// Largest number of characters in a charset.
pub const MAX_CHARS: usize = 256;

/// How the characters of a charset are stored in the output string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingKind {
    /// Every character is a single byte; enables pair tables and decoding.
    Ascii,
    /// At least one character is a multi-byte UTF-8 scalar.
    Utf8,
}

/// True if `c` may appear in an ASCII charset.
pub fn is_valid_ascii(c: char) -> bool {
    matches!(c, '!'..='~') && !matches!(c, '\'' | '"' | '\\' | '`')
}

/// True if `c` may appear in any charset.
///
/// Non-ASCII characters must be at or above the inverted bang (`¡`), which
/// excludes DEL, the C1 controls, and the no-break space.
pub fn is_valid_char(c: char) -> bool {
    if c.is_ascii() {
        return is_valid_ascii(c);
    }
    c >= '\u{A1}' && !c.is_control() && !c.is_whitespace()
}

/// Validated, ordered set of unique characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    chars: Vec<char>,
    bits_per_char: u32,
    encoding: EncodingKind,
}

impl Charset {
    /// Validate `chars` and derive the slicing metadata.
    pub fn new(chars: &str) -> Result<Self> {
        let chars: Vec<char> = chars.chars().collect();
        if chars.len() < MIN_CHARS {
            return Err(Error::TooFewChars(chars.len()));
        }
        if chars.len() > MAX_CHARS {
            return Err(Error::TooManyChars(chars.len()));
        }
        for (i, &c) in chars.iter().enumerate() {
            if !is_valid_char(c) {
                return Err(Error::InvalidChar(c));
            }
            if chars[..i].contains(&c) {
                return Err(Error::DuplicateChar(c));
            }
        }

        let encoding = if chars.iter().all(|c| c.is_ascii()) {
            EncodingKind::Ascii
        } else {
            EncodingKind::Utf8
        };

        Ok(Self {
            bits_per_char: bits_per_char(chars.len()),
            chars,
            encoding,
        })
    }

    /// Number of characters, `N`.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; a charset has at least two characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The characters in index order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Bits sliced per character, `ceil(log2(N))`.
    pub fn bits_per_char(&self) -> u32 {
        self.bits_per_char
    }

    /// True if every slice maps to a character.
    pub fn is_pow2(&self) -> bool {
        self.chars.len().is_power_of_two()
    }

    /// ASCII or UTF-8 storage.
    pub fn encoding(&self) -> EncodingKind {
        self.encoding
    }

    /// Total UTF-8 byte length of all characters.
    pub fn byte_len(&self) -> usize {
        self.chars.iter().map(|c| c.len_utf8()).sum()
    }

    /// Build the rejection table for this charset.
    pub fn rejection_table(&self) -> RejectionTable {
        RejectionTable::new(self.chars.len())
    }
}

impl std::fmt::Display for Charset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// `ceil(log2(n))` for `n >= 2`.
pub fn bits_per_char(n: usize) -> u32 {
    usize::BITS - (n - 1).leading_zeros()
}

/// A `(threshold, bits_to_consume)` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitShift {
    /// Largest slice value this entry covers.
    pub threshold: u32,
    /// Bits to consume when a slice falls in this entry.
    pub bits: u32,
}

/// Bits to consume per slice value, sorted by threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionTable {
    shifts: Vec<BitShift>,
}

impl RejectionTable {
    /// Derive the table for a charset of `n` characters.
    pub fn new(n: usize) -> Self {
        let bpc = bits_per_char(n);
        let base = if n % 2 == 0 { n - 1 } else { n } as u32;
        let mut shifts = vec![BitShift {
            threshold: base,
            bits: bpc,
        }];

        if !n.is_power_of_two() {
            // Bit positions are 1-indexed from the least significant bit.
            // Walk low to high so thresholds come out ascending.
            for bit in 2..bpc {
                if base & (1 << (bit - 1)) == 0 {
                    shifts.push(BitShift {
                        threshold: base | ((1 << bit) - 1),
                        bits: bpc - bit + 1,
                    });
                }
            }
        }

        Self { shifts }
    }

    /// Bits to consume for a rejected slice `value`.
    ///
    /// Picks the smallest threshold `>= value`. Every value below
    /// `2^bits_per_char` is covered because the top bit of the base is set.
    #[inline]
    pub fn bits_for(&self, value: u32) -> u32 {
        self.shifts
            .iter()
            .find(|shift| value <= shift.threshold)
            .or(self.shifts.last())
            .map_or(0, |shift| shift.bits)
    }

    /// The entries, ascending by threshold.
    pub fn shifts(&self) -> &[BitShift] {
        &self.shifts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table(n: usize) -> Vec<(u32, u32)> {
        RejectionTable::new(n)
            .shifts()
            .iter()
            .map(|s| (s.threshold, s.bits))
            .collect()
    }

    #[test]
    fn test_bits_per_char() {
        assert_eq!(bits_per_char(2), 1);
        assert_eq!(bits_per_char(3), 2);
        assert_eq!(bits_per_char(16), 4);
        assert_eq!(bits_per_char(26), 5);
        assert_eq!(bits_per_char(64), 6);
        assert_eq!(bits_per_char(65), 7);
        assert_eq!(bits_per_char(256), 8);
    }

    #[test]
    fn test_known_tables() {
        assert_eq!(table(26), vec![(25, 5), (27, 4), (31, 3)]);
        assert_eq!(table(10), vec![(9, 4), (11, 3), (15, 2)]);
        assert_eq!(table(5), vec![(5, 3), (7, 2)]);
        assert_eq!(table(6), vec![(5, 3), (7, 2)]);
        assert_eq!(table(3), vec![(3, 2)]);
        assert_eq!(table(64), vec![(63, 6)]);
        assert_eq!(table(2), vec![(1, 1)]);
    }

    #[test]
    fn test_charset_validation() {
        assert_eq!(Charset::new("a"), Err(Error::TooFewChars(1)));
        assert_eq!(Charset::new("abca"), Err(Error::DuplicateChar('a')));
        assert_eq!(Charset::new("ab c"), Err(Error::InvalidChar(' ')));
        assert_eq!(Charset::new("ab\"c"), Err(Error::InvalidChar('"')));
        assert_eq!(Charset::new("ab\u{7f}"), Err(Error::InvalidChar('\u{7f}')));
        assert_eq!(Charset::new("ab\u{a0}"), Err(Error::InvalidChar('\u{a0}')));

        let many: String = (0..257u32)
            .map(|i| char::from_u32(0x100 + i).unwrap())
            .collect();
        assert_eq!(Charset::new(&many), Err(Error::TooManyChars(257)));
    }

    #[test]
    fn test_encoding_kind() {
        let ascii = Charset::new("0123456789abcdef").unwrap();
        assert_eq!(ascii.encoding(), EncodingKind::Ascii);
        assert!(ascii.is_pow2());
        assert_eq!(ascii.bits_per_char(), 4);

        let dingo = Charset::new("dîngøsky").unwrap();
        assert_eq!(dingo.encoding(), EncodingKind::Utf8);
        assert_eq!(dingo.byte_len(), 10);
        assert_eq!(dingo.to_string(), "dîngøsky");
    }

    proptest! {
        #[test]
        fn prop_table_partitions_reject_range(n in 2usize..=256) {
            let table = RejectionTable::new(n);
            let bpc = bits_per_char(n);
            let shifts = table.shifts();

            prop_assert_eq!(shifts[0].bits, bpc);
            prop_assert!(shifts.windows(2).all(|w| w[0].threshold < w[1].threshold));
            prop_assert!(shifts.iter().all(|s| s.bits <= bpc && s.bits >= 1));

            // A rejected value must stay rejected whatever the discarded
            // low bits would have been.
            for value in n as u32..(1 << bpc) {
                let consumed = table.bits_for(value);
                let dropped = bpc - consumed;
                let prefix = value >> dropped;
                prop_assert!(prefix << dropped >= n as u32);
            }
        }
    }
}
