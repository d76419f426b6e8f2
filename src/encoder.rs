//! Index-to-character rendering.
//!
//! Packed indices are rendered with precomputed tables. ASCII charsets look
//! up two characters at once through a pair table addressed by the combined
//! `2 × bits_per_char` slice, eight pairs per chunk; anything left over goes
//! through the single-character table. UTF-8 charsets cannot pair (output
//! widths differ per character) and render singly, eight per chunk.

use crate::bits::BitReader;
use crate::charset::{Charset, EncodingKind};
use crate::error::{Error, Result};

/// Characters per ASCII pair chunk (8 pairs).
pub(crate) const PAIR_CHUNK: usize = 16;
/// Characters per UTF-8 chunk.
pub(crate) const UTF8_CHUNK: usize = 8;

/// How an ID of `len` characters splits into chunks of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layout {
    /// Nothing to render.
    Empty,
    /// Shorter than one chunk.
    Remainder(usize),
    /// Whole chunks followed by a (possibly empty) remainder.
    Chunked { chunks: usize, remainder: usize },
}

impl Layout {
    pub(crate) fn new(len: usize, chunk: usize) -> Self {
        match (len / chunk, len % chunk) {
            (0, 0) => Layout::Empty,
            (0, remainder) => Layout::Remainder(remainder),
            (chunks, remainder) => Layout::Chunked { chunks, remainder },
        }
    }
}

/// Rendering strategy, fixed when the encoder is built.
#[derive(Clone)]
enum Strategy {
    Empty,
    AsciiSingles {
        singles: Vec<u8>,
        len: usize,
    },
    AsciiPairs {
        pairs: Vec<[u8; 2]>,
        singles: Vec<u8>,
        chunks: usize,
        remainder: usize,
    },
    Utf8 {
        chars: Vec<char>,
        layout: Layout,
    },
}

/// Renders packed character indices as an ID string.
#[derive(Clone)]
pub(crate) struct Encoder {
    n: usize,
    bits_per_char: u32,
    len: usize,
    strategy: Strategy,
}

impl Encoder {
    pub(crate) fn new(charset: &Charset, len: usize) -> Self {
        let bits_per_char = charset.bits_per_char();
        let slots = 1usize << bits_per_char;
        let chars = charset.chars();

        // Slots past the charset are never rendered; `encode` rejects them
        // first. Fill them with the first character to keep lookups total.
        let mut table: Vec<char> = vec![chars[0]; slots];
        table[..chars.len()].copy_from_slice(chars);

        let strategy = match charset.encoding() {
            EncodingKind::Ascii => {
                let singles: Vec<u8> = table.iter().map(|&c| c as u8).collect();
                match Layout::new(len, PAIR_CHUNK) {
                    Layout::Empty => Strategy::Empty,
                    Layout::Remainder(len) => Strategy::AsciiSingles { singles, len },
                    Layout::Chunked { chunks, remainder } => {
                        let mut pairs = Vec::with_capacity(slots * slots);
                        for &hi in &singles {
                            for &lo in &singles {
                                pairs.push([hi, lo]);
                            }
                        }
                        Strategy::AsciiPairs {
                            pairs,
                            singles,
                            chunks,
                            remainder,
                        }
                    }
                }
            }
            EncodingKind::Utf8 => match Layout::new(len, UTF8_CHUNK) {
                Layout::Empty => Strategy::Empty,
                layout => Strategy::Utf8 {
                    chars: table,
                    layout,
                },
            },
        };

        Self {
            n: charset.len(),
            bits_per_char,
            len,
            strategy,
        }
    }

    /// Bytes in one packed ID.
    pub(crate) fn byte_len(&self) -> usize {
        (self.len * self.bits_per_char as usize).div_ceil(8)
    }

    /// Check and render caller-supplied bits.
    pub(crate) fn encode(&self, bits: &[u8]) -> Result<String> {
        if bits.len() != self.byte_len() {
            return Err(Error::BitLength {
                expected: self.byte_len(),
                actual: bits.len(),
            });
        }
        if !self.n.is_power_of_two() {
            let mut reader = BitReader::new(bits);
            for position in 0..self.len {
                let index = reader.read(self.bits_per_char) as usize;
                if index >= self.n {
                    return Err(Error::IndexOutOfRange { position, index });
                }
            }
        }
        Ok(self.render(bits))
    }

    /// Render bits already known to hold `len` valid indices.
    pub(crate) fn render(&self, bits: &[u8]) -> String {
        let bpc = self.bits_per_char;
        let mut reader = BitReader::new(bits);

        match &self.strategy {
            Strategy::Empty => String::new(),
            Strategy::AsciiSingles { singles, len } => {
                let mut out = String::with_capacity(*len);
                render_singles(&mut reader, singles, bpc, *len, &mut out);
                out
            }
            Strategy::AsciiPairs {
                pairs,
                singles,
                chunks,
                remainder,
            } => {
                let mut out = String::with_capacity(self.len);
                let pair_bits = 2 * bpc;
                for _ in 0..*chunks {
                    for _ in 0..PAIR_CHUNK / 2 {
                        let [c0, c1] = pairs[reader.read(pair_bits) as usize];
                        out.push(c0 as char);
                        out.push(c1 as char);
                    }
                }
                render_singles(&mut reader, singles, bpc, *remainder, &mut out);
                out
            }
            Strategy::Utf8 { chars, layout } => {
                let mut out = String::with_capacity(self.len * 4);
                let (chunks, remainder) = match *layout {
                    Layout::Empty => (0, 0),
                    Layout::Remainder(remainder) => (0, remainder),
                    Layout::Chunked { chunks, remainder } => (chunks, remainder),
                };
                for _ in 0..chunks {
                    for _ in 0..UTF8_CHUNK {
                        out.push(chars[reader.read(bpc) as usize]);
                    }
                }
                for _ in 0..remainder {
                    out.push(chars[reader.read(bpc) as usize]);
                }
                out
            }
        }
    }
}

#[inline]
fn render_singles(
    reader: &mut BitReader<'_>,
    singles: &[u8],
    bpc: u32,
    count: usize,
    out: &mut String,
) {
    for _ in 0..count {
        out.push(singles[reader.read(bpc) as usize] as char);
    }
}
