//! ID configuration.
//!
//! A [`Puid`] binds a charset to an ID length chosen from the requested
//! entropy, and holds every table the slicer and codec need. It is
//! immutable and cheap to clone; generation state lives in [`Generator`]
//! handles created from it.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::charset::Charset;
use crate::chars::Chars;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::entropy;
use crate::error::{Error, Result};
use crate::generator::{BitSlicer, Generator};

/// Entropy bits used when none are specified.
pub const DEFAULT_BITS: f64 = 128.0;

pub(crate) struct Inner {
    pub(crate) chars: Chars,
    pub(crate) charset: Charset,
    pub(crate) len: usize,
    pub(crate) slicer: BitSlicer,
    pub(crate) encoder: Encoder,
    pub(crate) decoder: Option<Decoder>,
}

/// An ID configuration: charset, length, and precomputed tables.
///
/// ```
/// use puid::{Chars, Puid};
///
/// let puid = Puid::builder()
///     .chars(Chars::Hex)
///     .total(1e6)
///     .risk(1e12)
///     .build()?;
/// assert_eq!(puid.len(), 20);
///
/// let id = puid.generator().generate();
/// let bits = puid.decode(&id)?;
/// assert_eq!(puid.encode(&bits)?, id);
/// # Ok::<(), puid::Error>(())
/// ```
#[derive(Clone)]
pub struct Puid {
    pub(crate) inner: Arc<Inner>,
}

impl Puid {
    /// Start building a configuration. Defaults to [`Chars::Safe64`] and
    /// [`DEFAULT_BITS`].
    pub fn builder() -> PuidBuilder {
        PuidBuilder::default()
    }

    /// A generator drawing from a [`StdRng`] seeded by the operating system.
    ///
    /// # Panics
    ///
    /// If the operating system random source is unavailable.
    pub fn generator(&self) -> Generator<StdRng> {
        self.generator_with(StdRng::from_os_rng())
    }

    /// A generator drawing from `source`.
    pub fn generator_with<R: RngCore>(&self, source: R) -> Generator<R> {
        Generator::new(self.clone(), source)
    }

    /// Render packed indices as an ID.
    ///
    /// `bits` must be exactly [`byte_len`](Self::byte_len) bytes holding
    /// [`len`](Self::len) indices of [`bits_per_char`](Self::bits_per_char)
    /// bits each. Trailing pad bits are ignored.
    pub fn encode(&self, bits: &[u8]) -> Result<String> {
        self.inner.encoder.encode(bits)
    }

    /// Recover the packed indices of an ID, zero-padded to a byte boundary.
    ///
    /// Only ASCII charsets can be decoded.
    pub fn decode(&self, id: &str) -> Result<Vec<u8>> {
        match &self.inner.decoder {
            Some(decoder) => decoder.decode(id),
            None => Err(Error::UnsupportedDecode),
        }
    }

    /// Characters per ID.
    pub fn len(&self) -> usize {
        self.inner.len
    }

    /// Always false; IDs have at least one character, even when the
    /// requested entropy rounds down to none.
    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }

    /// The validated charset.
    pub fn charset(&self) -> &Charset {
        &self.inner.charset
    }

    /// Bits sliced per character.
    pub fn bits_per_char(&self) -> u32 {
        self.inner.charset.bits_per_char()
    }

    /// Bytes in one packed ID.
    pub fn byte_len(&self) -> usize {
        self.inner.encoder.byte_len()
    }

    /// Entropy captured by one ID, `len × log2(N)`.
    pub fn entropy_bits(&self) -> f64 {
        self.inner.len as f64 * entropy::bits_per_char(self.inner.charset.len())
    }

    /// Repeat risk after generating `total` IDs.
    pub fn risk(&self, total: f64) -> u64 {
        entropy::risk(self.entropy_bits(), total)
    }

    /// IDs that can be generated at the given repeat risk.
    pub fn total(&self, risk: f64) -> u64 {
        entropy::total(self.entropy_bits(), risk)
    }

    /// Summary of this configuration.
    pub fn info(&self) -> PuidInfo {
        let charset = &self.inner.charset;
        PuidInfo {
            char_set: self.inner.chars.name(),
            characters: charset.to_string(),
            entropy_bits: round2(self.entropy_bits()),
            entropy_bits_per_char: round2(entropy::bits_per_char(charset.len())),
            ere: round2(entropy::ere(charset)),
            ete: round2(entropy::ete(charset.len())),
            length: self.inner.len,
        }
    }
}

impl std::fmt::Debug for Puid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Puid")
            .field("char_set", &self.inner.chars.name())
            .field("chars", &self.inner.charset.len())
            .field("len", &self.inner.len)
            .finish()
    }
}

/// Configuration summary returned by [`Puid::info`].
///
/// Floating point fields are rounded to two decimals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PuidInfo {
    /// Predefined charset name, or `custom`.
    pub char_set: &'static str,
    /// The characters in index order.
    pub characters: String,
    /// Entropy captured by one ID.
    pub entropy_bits: f64,
    /// Theoretical entropy per character, `log2(N)`.
    pub entropy_bits_per_char: f64,
    /// Entropy representation efficiency.
    pub ere: f64,
    /// Entropy transform efficiency.
    pub ete: f64,
    /// Characters per ID.
    pub length: usize,
}

/// Builder for [`Puid`].
///
/// Entropy comes either from `bits`, or from a `total` number of IDs
/// together with an acceptable repeat `risk` of 1 in `risk`.
#[derive(Debug, Clone, Default)]
pub struct PuidBuilder {
    chars: Chars,
    bits: Option<f64>,
    total: Option<f64>,
    risk: Option<f64>,
}

impl PuidBuilder {
    /// Use a predefined or custom charset.
    pub fn chars(mut self, chars: Chars) -> Self {
        self.chars = chars;
        self
    }

    /// Use the given characters, in order.
    pub fn custom_chars(self, chars: impl Into<String>) -> Self {
        self.chars(Chars::Custom(chars.into()))
    }

    /// Entropy bits per ID.
    pub fn bits(mut self, bits: f64) -> Self {
        self.bits = Some(bits);
        self
    }

    /// Number of IDs expected to be generated.
    pub fn total(mut self, total: f64) -> Self {
        self.total = Some(total);
        self
    }

    /// Acceptable repeat risk, as 1 in `risk`.
    pub fn risk(mut self, risk: f64) -> Self {
        self.risk = Some(risk);
        self
    }

    /// Validate options and precompute tables.
    pub fn build(self) -> Result<Puid> {
        let bits = match (self.bits, self.total, self.risk) {
            (None, None, None) => DEFAULT_BITS,
            (Some(bits), None, None) => {
                if !bits.is_finite() || bits <= 0.0 {
                    return Err(Error::InvalidBits(bits));
                }
                bits
            }
            (None, Some(total), Some(risk)) => {
                if !total.is_finite() || total <= 1.0 {
                    return Err(Error::InvalidTotal(total));
                }
                if !risk.is_finite() || risk <= 1.0 {
                    return Err(Error::InvalidRisk(risk));
                }
                entropy::bits(total, risk)
            }
            (Some(_), _, _) => return Err(Error::ConflictingEntropy),
            (None, _, _) => return Err(Error::IncompleteEntropy),
        };

        let charset = Charset::new(self.chars.chars())?;
        let len = ((bits / entropy::bits_per_char(charset.len())).ceil() as usize).max(1);
        if len.checked_mul(charset.bits_per_char() as usize).is_none() {
            return Err(Error::InvalidBits(bits));
        }

        let inner = Inner {
            slicer: BitSlicer::new(&charset),
            encoder: Encoder::new(&charset, len),
            decoder: Decoder::new(&charset, len),
            chars: self.chars,
            charset,
            len,
        };

        tracing::debug!(
            char_set = inner.chars.name(),
            chars = inner.charset.len(),
            bits_per_char = inner.charset.bits_per_char(),
            len,
            ete = entropy::ete(inner.charset.len()),
            "built puid"
        );

        Ok(Puid {
            inner: Arc::new(inner),
        })
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
