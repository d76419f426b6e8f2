//! Error types for ID configuration, encoding, and decoding.

use thiserror::Error;

/// Error variants for puid operations.
///
/// Configuration variants are raised by [`PuidBuilder::build`](crate::PuidBuilder::build)
/// before any generator exists. Encoding and decoding variants are returned by
/// [`Puid::encode`](crate::Puid::encode) and [`Puid::decode`](crate::Puid::decode).
/// Generation itself never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Fewer than two characters were supplied.
    #[error("charset needs at least 2 characters, got {0}")]
    TooFewChars(usize),

    /// More than 256 characters were supplied.
    #[error("charset allows at most 256 characters, got {0}")]
    TooManyChars(usize),

    /// A character appears more than once.
    #[error("duplicate character {0:?} in charset")]
    DuplicateChar(char),

    /// A character is a control, whitespace, or otherwise excluded code point.
    #[error("invalid character {0:?} in charset")]
    InvalidChar(char),

    /// Requested entropy bits are not a positive, finite number, or need
    /// an ID too long to address.
    #[error("invalid entropy bits: {0}")]
    InvalidBits(f64),

    /// Total population is not a finite number greater than 1.
    #[error("invalid total: {0}")]
    InvalidTotal(f64),

    /// Risk is not a finite number greater than 1.
    #[error("invalid risk: {0}")]
    InvalidRisk(f64),

    /// Both `bits` and `total`/`risk` were specified.
    #[error("specify either bits or total and risk, not both")]
    ConflictingEntropy,

    /// Only one of `total` and `risk` was specified.
    #[error("total and risk must be specified together")]
    IncompleteEntropy,

    /// `encode` received the wrong number of bytes.
    #[error("expected {expected} bytes of bits, got {actual}")]
    BitLength {
        /// Byte length of one packed ID.
        expected: usize,
        /// Byte length received.
        actual: usize,
    },

    /// A packed index does not address a character of the charset.
    #[error("index {index} at position {position} is outside the charset")]
    IndexOutOfRange {
        /// Character position within the ID.
        position: usize,
        /// The offending index.
        index: usize,
    },

    /// `decode` received a string of the wrong length.
    #[error("expected {expected} characters, got {actual}")]
    CharLength {
        /// Configured ID length.
        expected: usize,
        /// Length received.
        actual: usize,
    },

    /// `decode` met a character that is not in the charset.
    #[error("character at position {position} is not in the charset")]
    InvalidEncodedChar {
        /// Byte position within the input.
        position: usize,
    },

    /// Decoding is only supported for ASCII charsets.
    #[error("decode is not supported for non-ascii charsets")]
    UnsupportedDecode,
}

/// A specialized Result type for puid operations.
pub type Result<T> = std::result::Result<T, Error>;
