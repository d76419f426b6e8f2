//! Bit slicing and ID generation.
//!
//! The slicer turns a stream of uniformly random bits into uniformly
//! distributed character indices by rejection sampling: it peeks
//! `bits_per_char` bits, accepts the value if it indexes the charset, and
//! otherwise discards only as many bits as the [`RejectionTable`] says are
//! spent. Bits left over after an ID is complete are carried into the next
//! call, so a [`Generator`] never throws away more than it must.

use rand::RngCore;

use crate::bits::{BitPool, BitWriter};
use crate::charset::{Charset, RejectionTable};
use crate::Puid;

/// Rejection-sampling slicer for one charset.
#[derive(Debug, Clone)]
pub(crate) struct BitSlicer {
    n: u32,
    bits_per_char: u32,
    table: RejectionTable,
}

impl BitSlicer {
    pub(crate) fn new(charset: &Charset) -> Self {
        Self {
            n: charset.len() as u32,
            bits_per_char: charset.bits_per_char(),
            table: charset.rejection_table(),
        }
    }

    /// Emit exactly `count` indices drawn from `pool`, refilling it from
    /// `source` only when fewer than `bits_per_char` bits remain.
    ///
    /// Each refill requests the bytes the remaining characters need if none
    /// were rejected, so no byte is fetched that could go unused.
    pub(crate) fn slice<R, F>(
        &self,
        mut count: usize,
        pool: &mut BitPool,
        source: &mut R,
        mut emit: F,
    ) where
        R: RngCore,
        F: FnMut(u32),
    {
        let bpc = self.bits_per_char;
        while count > 0 {
            let available = pool.available();
            if available < bpc as usize {
                let missing = count * bpc as usize - available;
                pool.refill(source, missing.div_ceil(8));
            }

            let value = pool.peek(bpc);
            if value < self.n {
                pool.consume(bpc);
                emit(value);
                count -= 1;
            } else {
                pool.consume(self.table.bits_for(value));
            }
        }
        pool.compact();
    }
}

/// A generation handle: one byte source plus its carried bits.
///
/// Handles are cheap to create and are meant to be owned by a single
/// thread or task. Two handles never share carried bits, so they need no
/// synchronization; each wastes at most 7 bits when dropped.
///
/// ```
/// use puid::{Chars, Puid};
///
/// let puid = Puid::builder().chars(Chars::AlphaNum).bits(64.0).build()?;
/// let mut generator = puid.generator();
/// let id = generator.generate();
/// assert_eq!(id.len(), 11);
/// # Ok::<(), puid::Error>(())
/// ```
#[derive(Debug)]
pub struct Generator<R> {
    puid: Puid,
    source: R,
    pool: BitPool,
}

impl<R: RngCore> Generator<R> {
    /// Create a handle generating IDs for `puid` from `source`.
    pub fn new(puid: Puid, source: R) -> Self {
        Self {
            puid,
            source,
            pool: BitPool::default(),
        }
    }

    /// Generate the next ID.
    pub fn generate(&mut self) -> String {
        let bits = self.next_bits();
        self.puid.inner.encoder.render(&bits)
    }

    /// Packed character indices of the next ID, `bits_per_char` bits each,
    /// zero-padded to a byte boundary.
    ///
    /// `puid.encode(&generator.next_bits())` yields the same string
    /// [`generate`](Self::generate) would have.
    pub fn next_bits(&mut self) -> Vec<u8> {
        let inner = &*self.puid.inner;
        let bpc = inner.charset.bits_per_char();
        let nbits = inner.len * bpc as usize;

        // Power-of-two charsets never reject, so byte-aligned IDs are just
        // the raw bytes.
        if inner.charset.is_pow2() && nbits % 8 == 0 && self.pool.available() == 0 {
            let mut bytes = vec![0u8; nbits / 8];
            self.source.fill_bytes(&mut bytes);
            return bytes;
        }

        let mut writer = BitWriter::with_capacity(nbits);
        inner
            .slicer
            .slice(inner.len, &mut self.pool, &mut self.source, |index| {
                writer.write(index, bpc)
            });
        writer.finish()
    }

    /// Discard carried bits.
    pub fn reset(&mut self) {
        tracing::debug!(dropped = self.pool.available(), "reset generator");
        self.pool.clear();
    }

    /// Number of random bits carried into the next call.
    pub fn carried_bits(&self) -> usize {
        self.pool.available()
    }

    /// The configuration this handle generates for.
    pub fn puid(&self) -> &Puid {
        &self.puid
    }

    /// The byte source.
    pub fn source(&self) -> &R {
        &self.source
    }
}

impl<R: RngCore> Iterator for Generator<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.generate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Chars, FixedBytes};
    use proptest::prelude::*;

    fn slice_all(charset: &str, bytes: Vec<u8>, count: usize) -> (Vec<u32>, BitPool, usize) {
        let charset = Charset::new(charset).unwrap();
        let slicer = BitSlicer::new(&charset);
        let mut pool = BitPool::default();
        let mut source = FixedBytes::new(bytes);
        let mut out = Vec::new();
        slicer.slice(count, &mut pool, &mut source, |i| out.push(i));
        (out, pool, source.consumed())
    }

    #[test]
    fn test_reject_consumes_partial_slice() {
        // 11110|001 10110001: 30 is rejected after 3 bits, then 10001 = 17.
        let (indices, pool, fetched) =
            slice_all(Chars::AlphaLower.chars(), vec![0xF1, 0xB1, 0x78, 0x0A, 0xCE], 1);
        assert_eq!(indices, vec![17]);
        assert_eq!(fetched, 1);
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn test_recorded_trace_alpha_lower() {
        // f1 b1 78 0a ce
        // 11110 (30, drop 3) 10001 (17) 10110 (22) 00101 (5)
        // 11100 (28, drop 3) 00000 (0) 00101 (5) 01100 (12), 4 bits left
        let (indices, pool, fetched) = slice_all(
            Chars::AlphaLower.chars(),
            vec![0xF1, 0xB1, 0x78, 0x0A, 0xCE],
            6,
        );
        assert_eq!(indices, vec![17, 22, 5, 0, 5, 12]);
        assert_eq!(fetched, 5);
        assert_eq!(pool.available(), 4);
    }

    #[test]
    fn test_long_rejection_run() {
        let mut bytes = vec![0xFF; 4096];
        bytes.push(0x00);
        let (indices, pool, fetched) = slice_all(Chars::AlphaLower.chars(), bytes, 1);
        // Rejections drop 3 bits each until the slice at bit 32766 reads 11000.
        assert_eq!(indices, vec![24]);
        assert_eq!(fetched, 4097);
        assert_eq!(pool.available(), 5);
        assert_eq!(pool.buffered(), 1);
    }

    #[test]
    fn test_pow2_never_rejects() {
        let (indices, pool, fetched) = slice_all(Chars::Hex.chars(), vec![0xC7, 0xC9, 0x00], 5);
        assert_eq!(indices, vec![0xC, 0x7, 0xC, 0x9, 0x0]);
        assert_eq!(fetched, 3);
        assert_eq!(pool.available(), 4);
    }

    proptest! {
        #[test]
        fn prop_indices_in_range_and_fetch_is_minimal(
            n in 2usize..=90,
            count in 1usize..40,
            seed in any::<u64>(),
        ) {
            use rand::{rngs::StdRng, SeedableRng};

            let chars: String = Chars::SafeAscii.chars().chars().take(n).collect();
            let charset = Charset::new(&chars).unwrap();
            let slicer = BitSlicer::new(&charset);
            let table = charset.rejection_table();
            let bpc = charset.bits_per_char();

            let mut bytes = vec![0u8; 4096];
            StdRng::seed_from_u64(seed).fill_bytes(&mut bytes);
            let mut source = FixedBytes::new(bytes.clone());
            let mut pool = BitPool::default();
            let mut out = Vec::new();
            slicer.slice(count, &mut pool, &mut source, |i| out.push(i));

            prop_assert_eq!(out.len(), count);
            prop_assert!(out.iter().all(|&i| (i as usize) < n));

            // Replay the byte stream bit by bit to count the bits spent.
            let mut pos = 0usize;
            let mut accepted = 0;
            while accepted < count {
                let value = crate::bits::read_bits(&bytes, pos, bpc);
                if (value as usize) < n {
                    pos += bpc as usize;
                    accepted += 1;
                } else {
                    pos += table.bits_for(value) as usize;
                }
            }
            prop_assert_eq!(source.consumed(), pos.div_ceil(8));
            prop_assert_eq!(pool.available(), source.consumed() * 8 - pos);
            prop_assert!(pool.available() < 8);
        }
    }
}
