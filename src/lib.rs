//! # Probably Unique Identifiers (puid)
//!
//! *Random IDs with exactly the entropy you ask for, in any alphabet.*
//!
//! ## Intuition First
//!
//! A random ID is a handful of random bits wearing a costume. The bits are
//! what make collisions unlikely; the characters are only how they are
//! written down. Sixteen hex digits and eleven base62 letters can carry the
//! same 64 bits, so the question "how long should my ID be?" is really
//! "how many bits do I need, and how many does each character hold?".
//!
//! This crate starts from the bits: say how many IDs you will make and how
//! small a chance of a repeat you can live with, pick any alphabet, and the
//! ID length follows.
//!
//! ## The Problem
//!
//! Turning random bytes into characters from an alphabet of `N` symbols is
//! easy when `N` is a power of two: every `log2(N)` bits is one character.
//! For any other `N` it is not:
//! - **Modulo** (`byte % N`) is biased toward the low symbols.
//! - **Naive rejection** (slice `ceil(log2(N))` bits, retry when too big) is
//!   unbiased but throws away every bit of each rejected slice.
//!
//! The slicer here rejects too, but consumes only the leading bits that
//! actually decided the rejection, returning the rest to the pool, and
//! carries unused bits from one ID into the next.
//!
//! ## Historical Context
//!
//! ```text
//! 1939  von Mises    Birthday problem posed
//! 1951  von Neumann  Rejection sampling for exact distributions
//! 1976  Knuth-Yao    Optimal bit cost of sampling discrete distributions
//! 2005  Leach et al. RFC 4122: 122 random bits in a 36-character UUID
//! 2017  Sitnik       nanoid: alphabet-driven IDs with masked rejection
//! 2019  Lemire       Fast nearly divisionless bounded random integers
//! ```
//!
//! ## Mathematical Formulation
//!
//! For `T` IDs with `b` bits of entropy, the birthday bound gives a repeat
//! chance of about `T^2 / 2^(b+1)`. Requiring a risk of at most 1 in `R`:
//!
//! ```text
//! b = 2·log2(T) + log2(R) − 1
//! ```
//!
//! An alphabet of `N` symbols holds `log2(N)` bits per character, so the ID
//! length is `ceil(b / log2(N))`.
//!
//! Two efficiency measures describe a charset:
//! - **ERE** (representation): `log2(N)` over the storage bits per character.
//! - **ETE** (transform): `log2(N)` over the expected random bits consumed
//!   per character, counting rejections. `1.0` iff `N` is a power of two.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(L)$ per ID of length $L$; table lookups per character,
//!   two characters per lookup for ASCII alphabets.
//! - **Space**: $O(4^{\lceil \log_2 N \rceil})$ for the ASCII pair tables
//!   (at most 16384 entries), plus fewer than 8 carried bits per generator.
//!
//! ## Failure Modes
//!
//! 1. **Weak sources**: IDs are only as unpredictable as the byte source.
//!    The default is an OS-seeded [`rand::rngs::StdRng`].
//! 2. **Probable, not certain**: a repeat is unlikely at the configured
//!    risk, never impossible.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - **[`Puid`]**: an immutable configuration (charset, length, tables).
//! - **[`Generator`]**: a per-thread handle owning a byte source and its
//!   carried bits.
//! - **[`entropy`]**: `bits`, `total`, and `risk` approximations plus the
//!   ERE and ETE metrics.
//!
//! ```
//! use puid::{Chars, Puid};
//!
//! let puid = Puid::builder()
//!     .chars(Chars::AlphaNum)
//!     .total(10e6)
//!     .risk(1e15)
//!     .build()?;
//!
//! let mut generator = puid.generator();
//! let id = generator.generate();
//! assert_eq!(id.chars().count(), puid.len());
//! # Ok::<(), puid::Error>(())
//! ```
//!
//! ## References
//!
//! - von Neumann, J. (1951). "Various techniques used in connection with random digits."
//! - Knuth, D. E., & Yao, A. C. (1976). "The complexity of nonuniform random number generation."
//! - Lemire, D. (2019). "Fast Random Integer Generation in an Interval."

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bits;
pub mod chars;
pub mod charset;
pub mod config;
mod decoder;
mod encoder;
pub mod entropy;
pub mod error;
pub mod generator;
pub mod source;

pub use chars::Chars;
pub use charset::{Charset, EncodingKind, RejectionTable};
pub use config::{Puid, PuidBuilder, PuidInfo, DEFAULT_BITS};
pub use error::Error;
pub use generator::Generator;
pub use source::{FixedBytes, FnSource};
