//! Packed bit streams.
//!
//! Character indices travel between the slicer and the codec as big-endian
//! packed bit strings: the first index occupies the most significant bits
//! of the first byte. Widths never exceed 16 bits (an index pair of at most
//! 8 bits each), so every read fits a 24-bit window.

use rand::RngCore;

/// Read `n` bits (`n <= 16`) starting at bit `pos` of `bytes`.
///
/// Bits past the end of `bytes` read as zero.
#[inline]
pub(crate) fn read_bits(bytes: &[u8], pos: usize, n: u32) -> u32 {
    debug_assert!(n <= 16);
    let byte = pos / 8;
    let offset = (pos % 8) as u32;
    let mut window = 0u32;
    for i in 0..3 {
        window = (window << 8) | bytes.get(byte + i).copied().unwrap_or(0) as u32;
    }
    (window >> (24 - offset - n)) & ((1u32 << n) - 1)
}

/// Sequential reader over a packed bit string.
pub(crate) struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Read the next `n` bits and advance.
    #[inline]
    pub(crate) fn read(&mut self, n: u32) -> u32 {
        let value = read_bits(self.bytes, self.pos, n);
        self.pos += n as usize;
        value
    }
}

/// Packs values of up to 16 bits into a byte vector, most significant first.
pub(crate) struct BitWriter {
    bytes: Vec<u8>,
    acc: u32,
    nacc: u32,
}

impl BitWriter {
    pub(crate) fn with_capacity(nbits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(nbits.div_ceil(8)),
            acc: 0,
            nacc: 0,
        }
    }

    #[inline]
    pub(crate) fn write(&mut self, value: u32, n: u32) {
        debug_assert!(n <= 16);
        self.acc = (self.acc << n) | value;
        self.nacc += n;
        while self.nacc >= 8 {
            self.nacc -= 8;
            self.bytes.push((self.acc >> self.nacc) as u8);
        }
        self.acc &= (1u32 << self.nacc) - 1;
    }

    /// Flush, zero-padding the final partial byte.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        if self.nacc > 0 {
            self.bytes.push((self.acc << (8 - self.nacc)) as u8);
        }
        self.bytes
    }
}

/// Working pool of random bits owned by one generator.
///
/// Between generation calls only the carried remainder (fewer than 8 bits)
/// is kept; consumed whole bytes are dropped by [`BitPool::compact`].
#[derive(Debug, Default, Clone)]
pub(crate) struct BitPool {
    bytes: Vec<u8>,
    pos: usize,
}

impl BitPool {
    #[inline]
    pub(crate) fn available(&self) -> usize {
        self.bytes.len() * 8 - self.pos
    }

    #[inline]
    pub(crate) fn peek(&self, n: u32) -> u32 {
        read_bits(&self.bytes, self.pos, n)
    }

    #[inline]
    pub(crate) fn consume(&mut self, n: u32) {
        self.pos += n as usize;
        debug_assert!(self.pos <= self.bytes.len() * 8);
    }

    /// Drop consumed bytes, then append `nbytes` fresh bytes from `source`.
    pub(crate) fn refill<R: RngCore>(&mut self, source: &mut R, nbytes: usize) {
        self.compact();
        let start = self.bytes.len();
        self.bytes.resize(start + nbytes, 0);
        source.fill_bytes(&mut self.bytes[start..]);
        tracing::trace!(nbytes, available = self.available(), "refilled bit pool");
    }

    /// Drop fully consumed bytes.
    pub(crate) fn compact(&mut self) {
        let whole = self.pos / 8;
        if whole > 0 {
            self.bytes.drain(..whole);
            self.pos -= whole * 8;
        }
    }

    #[cfg(test)]
    pub(crate) fn buffered(&self) -> usize {
        self.bytes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.bytes.clear();
        self.pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_read_bits_across_bytes() {
        let bytes = [0b1111_0001, 0b1011_0001];
        assert_eq!(read_bits(&bytes, 0, 5), 0b11110);
        assert_eq!(read_bits(&bytes, 3, 5), 0b10001);
        assert_eq!(read_bits(&bytes, 6, 4), 0b0110);
        assert_eq!(read_bits(&bytes, 12, 8), 0b0001_0000);
    }

    #[test]
    fn test_pool_compact_keeps_partial_byte() {
        let mut pool = BitPool::default();
        let mut src = crate::FixedBytes::new(vec![0xAB, 0xCD]);
        pool.refill(&mut src, 2);
        pool.consume(11);
        pool.compact();
        assert_eq!(pool.available(), 5);
        assert_eq!(pool.peek(5), 0xCD & 0x1F);
    }

    #[test]
    fn test_refill_drops_consumed_bytes() {
        let mut pool = BitPool::default();
        let mut src = crate::FixedBytes::new(vec![0xFF]);
        pool.refill(&mut src, 1);
        for _ in 0..1000 {
            pool.consume(5);
            pool.refill(&mut src, 1);
            pool.consume(3);
            assert!(pool.buffered() <= 2);
        }
        assert_eq!(pool.available(), 8);
    }

    proptest! {
        #[test]
        fn prop_writer_reader_agree(
            values in prop::collection::vec(0u32..256, 0..64),
            width in 1u32..=8,
        ) {
            let mask = (1u32 << width) - 1;
            let mut writer = BitWriter::with_capacity(values.len() * width as usize);
            for &v in &values {
                writer.write(v & mask, width);
            }
            let bytes = writer.finish();
            prop_assert_eq!(bytes.len(), (values.len() * width as usize).div_ceil(8));

            let mut reader = BitReader::new(&bytes);
            for &v in &values {
                prop_assert_eq!(reader.read(width), v & mask);
            }
        }
    }
}
