//! Byte sources.
//!
//! Generators read randomness through [`rand::RngCore::fill_bytes`], so any
//! `rand` generator works directly. Cryptographic quality is the caller's
//! choice; [`rand::rngs::StdRng`] seeded from the OS is the default.
//!
//! Two adapters cover the remaining cases:
//! - [`FixedBytes`] replays a known byte sequence (deterministic tests).
//! - [`FnSource`] wraps a `bytes(n)` function returning exactly `n` bytes.

use rand::RngCore;

/// Replays a fixed byte sequence, cycling back to the start when exhausted.
///
/// A cycle whose bits are rejected everywhere, such as `[0xFF]` with a
/// charset whose size is not a power of two, never produces an ID and
/// generation does not return.
#[derive(Debug, Clone)]
pub struct FixedBytes {
    bytes: Vec<u8>,
    pos: usize,
    consumed: usize,
}

impl FixedBytes {
    /// Create a source replaying `bytes`. An empty sequence yields zeros.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            pos: 0,
            consumed: 0,
        }
    }

    /// Total number of bytes handed out so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RngCore for FixedBytes {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.consumed += dst.len();
        if self.bytes.is_empty() {
            dst.fill(0);
            return;
        }
        for b in dst {
            *b = self.bytes[self.pos];
            self.pos = (self.pos + 1) % self.bytes.len();
        }
    }
}

/// Adapts a `bytes(n) -> Vec<u8>` function into a byte source.
///
/// The function must return exactly `n` bytes. This is checked in debug
/// builds only; short output leaves the tail of the request zeroed.
pub struct FnSource<F> {
    f: F,
}

impl<F> FnSource<F>
where
    F: FnMut(usize) -> Vec<u8>,
{
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> std::fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSource").finish_non_exhaustive()
    }
}

impl<F> RngCore for FnSource<F>
where
    F: FnMut(usize) -> Vec<u8>,
{
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let bytes = (self.f)(dst.len());
        debug_assert_eq!(bytes.len(), dst.len(), "byte source returned wrong length");
        let n = bytes.len().min(dst.len());
        dst[..n].copy_from_slice(&bytes[..n]);
        dst[n..].fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_bytes_cycles() {
        let mut src = FixedBytes::new(vec![1, 2, 3]);
        let mut buf = [0u8; 5];
        src.fill_bytes(&mut buf);
        assert_eq!(buf, [1, 2, 3, 1, 2]);
        assert_eq!(src.consumed(), 5);
    }

    #[test]
    fn test_fn_source() {
        let mut calls = Vec::new();
        {
            let mut src = FnSource::new(|n| {
                calls.push(n);
                vec![0xAA; n]
            });
            let mut buf = [0u8; 3];
            src.fill_bytes(&mut buf);
            assert_eq!(buf, [0xAA; 3]);
        }
        assert_eq!(calls, vec![3]);
    }
}
