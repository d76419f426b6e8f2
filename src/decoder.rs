//! Character-to-index decoding for ASCII charsets.
//!
//! The inverse of the ASCII encoder: byte pairs map back to the combined
//! `2 × bits_per_char` index through a reverse pair table, and a trailing
//! odd byte goes through the reverse single table. UTF-8 charsets have no
//! decoder.

use crate::bits::BitWriter;
use crate::charset::{Charset, EncodingKind};
use crate::error::{Error, Result};

const NO_PAIR: u16 = u16::MAX;
const NO_CHAR: u8 = u8::MAX;

/// Reverse lookup tables for one ASCII charset.
#[derive(Clone)]
pub(crate) struct Decoder {
    bits_per_char: u32,
    len: usize,
    /// Indexed by `b0 << 7 | b1`.
    pairs: Vec<u16>,
    singles: [u8; 128],
}

impl Decoder {
    /// Build the reverse tables, or `None` for a UTF-8 charset.
    pub(crate) fn new(charset: &Charset, len: usize) -> Option<Self> {
        if charset.encoding() != EncodingKind::Ascii {
            return None;
        }
        let bits_per_char = charset.bits_per_char();

        let mut singles = [NO_CHAR; 128];
        for (index, &c) in charset.chars().iter().enumerate() {
            singles[c as usize] = index as u8;
        }

        let mut pairs = vec![NO_PAIR; 1 << 14];
        for (hi, &c0) in charset.chars().iter().enumerate() {
            for (lo, &c1) in charset.chars().iter().enumerate() {
                let key = ((c0 as usize) << 7) | c1 as usize;
                pairs[key] = ((hi << bits_per_char) | lo) as u16;
            }
        }

        Some(Self {
            bits_per_char,
            len,
            pairs,
            singles,
        })
    }

    /// Reconstruct the packed index bits of `id`, zero-padded to a byte.
    pub(crate) fn decode(&self, id: &str) -> Result<Vec<u8>> {
        let actual = id.chars().count();
        if actual != self.len {
            return Err(Error::CharLength {
                expected: self.len,
                actual,
            });
        }
        if let Some(position) = id.chars().position(|c| !c.is_ascii()) {
            return Err(Error::InvalidEncodedChar { position });
        }

        let bytes = id.as_bytes();
        let bpc = self.bits_per_char;
        let mut writer = BitWriter::with_capacity(self.len * bpc as usize);

        let pairs = bytes.chunks_exact(2);
        let tail = pairs.remainder();
        for (i, pair) in pairs.enumerate() {
            let key = ((pair[0] as usize) << 7) | pair[1] as usize;
            let combined = self.pairs[key];
            if combined == NO_PAIR {
                let position = if self.singles[pair[0] as usize] == NO_CHAR {
                    2 * i
                } else {
                    2 * i + 1
                };
                return Err(Error::InvalidEncodedChar { position });
            }
            writer.write(combined as u32, 2 * bpc);
        }

        if let Some(&b) = tail.first() {
            let index = self.singles[b as usize];
            if index == NO_CHAR {
                return Err(Error::InvalidEncodedChar {
                    position: bytes.len() - 1,
                });
            }
            writer.write(index as u32, bpc);
        }

        Ok(writer.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_decode() {
        let charset = Charset::new("0123456789abcdef").unwrap();
        let decoder = Decoder::new(&charset, 5).unwrap();
        assert_eq!(decoder.decode("c7c90").unwrap(), vec![0xC7, 0xC9, 0x00]);
    }

    #[test]
    fn test_decode_errors() {
        let charset = Charset::new("abcdefghijklmnopqrstuvwxyz").unwrap();
        let decoder = Decoder::new(&charset, 5).unwrap();

        assert_eq!(
            decoder.decode("abcd"),
            Err(Error::CharLength {
                expected: 5,
                actual: 4
            })
        );
        assert_eq!(
            decoder.decode("abCde"),
            Err(Error::InvalidEncodedChar { position: 2 })
        );
        assert_eq!(
            decoder.decode("abcdE"),
            Err(Error::InvalidEncodedChar { position: 4 })
        );
        assert_eq!(
            decoder.decode("abcdé"),
            Err(Error::InvalidEncodedChar { position: 4 })
        );
    }

    #[test]
    fn test_no_decoder_for_utf8() {
        let charset = Charset::new("dîngøsky").unwrap();
        assert!(Decoder::new(&charset, 4).is_none());
    }
}
