//! Predefined character sets.

#[cfg(feature = "serde")]
use serde::Serialize;

/// A predefined charset or a custom character string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum Chars {
    /// Upper and lower case letters.
    Alpha,
    /// Lower case letters.
    AlphaLower,
    /// Upper case letters.
    AlphaUpper,
    /// Upper and lower case letters and digits.
    AlphaNum,
    /// Lower case letters and digits.
    AlphaNumLower,
    /// Upper case letters and digits.
    AlphaNumUpper,
    /// RFC 4648 base16.
    Base16,
    /// RFC 4648 base32.
    Base32,
    /// RFC 4648 base32 extended hex, lower case.
    Base32Hex,
    /// RFC 4648 base32 extended hex, upper case.
    Base32HexUpper,
    /// Crockford base32.
    Crockford32,
    /// Decimal digits.
    Decimal,
    /// Lower case hex digits.
    Hex,
    /// Upper case hex digits.
    HexUpper,
    /// Printable ASCII without space, quotes, backslash, or backtick.
    SafeAscii,
    /// 32 characters without look-alikes or vowels.
    Safe32,
    /// URL and file system safe base64.
    #[default]
    Safe64,
    /// The non-alphanumeric characters of [`Chars::SafeAscii`].
    Symbol,
    /// 32 characters avoiding common English words.
    WordSafe32,
    /// User supplied characters.
    Custom(String),
}

impl Chars {
    /// Every predefined charset.
    pub const PREDEFINED: [Chars; 19] = [
        Chars::Alpha,
        Chars::AlphaLower,
        Chars::AlphaUpper,
        Chars::AlphaNum,
        Chars::AlphaNumLower,
        Chars::AlphaNumUpper,
        Chars::Base16,
        Chars::Base32,
        Chars::Base32Hex,
        Chars::Base32HexUpper,
        Chars::Crockford32,
        Chars::Decimal,
        Chars::Hex,
        Chars::HexUpper,
        Chars::SafeAscii,
        Chars::Safe32,
        Chars::Safe64,
        Chars::Symbol,
        Chars::WordSafe32,
    ];

    /// The characters, in index order.
    pub fn chars(&self) -> &str {
        match self {
            Chars::Alpha => "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz",
            Chars::AlphaLower => "abcdefghijklmnopqrstuvwxyz",
            Chars::AlphaUpper => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            Chars::AlphaNum => "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
            Chars::AlphaNumLower => "abcdefghijklmnopqrstuvwxyz0123456789",
            Chars::AlphaNumUpper => "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789",
            Chars::Base16 | Chars::HexUpper => "0123456789ABCDEF",
            Chars::Base32 => "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567",
            Chars::Base32Hex => "0123456789abcdefghijklmnopqrstuv",
            Chars::Base32HexUpper => "0123456789ABCDEFGHIJKLMNOPQRSTUV",
            Chars::Crockford32 => "0123456789ABCDEFGHJKMNPQRSTVWXYZ",
            Chars::Decimal => "0123456789",
            Chars::Hex => "0123456789abcdef",
            Chars::SafeAscii => {
                "!#$%&()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[]^_abcdefghijklmnopqrstuvwxyz{|}~"
            }
            Chars::Safe32 => "2346789bdfghjmnpqrtBDFGHJLMNPQRT",
            Chars::Safe64 => "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_",
            Chars::Symbol => "!#$%&()*+,-./:;<=>?@[]^_{|}~",
            Chars::WordSafe32 => "23456789CFGHJMPQRVWXcfghjmpqrvwx",
            Chars::Custom(chars) => chars,
        }
    }

    /// Short name used in [`PuidInfo`](crate::PuidInfo).
    pub fn name(&self) -> &'static str {
        match self {
            Chars::Alpha => "alpha",
            Chars::AlphaLower => "alpha_lower",
            Chars::AlphaUpper => "alpha_upper",
            Chars::AlphaNum => "alphanum",
            Chars::AlphaNumLower => "alphanum_lower",
            Chars::AlphaNumUpper => "alphanum_upper",
            Chars::Base16 => "base16",
            Chars::Base32 => "base32",
            Chars::Base32Hex => "base32_hex",
            Chars::Base32HexUpper => "base32_hex_upper",
            Chars::Crockford32 => "crockford32",
            Chars::Decimal => "decimal",
            Chars::Hex => "hex",
            Chars::HexUpper => "hex_upper",
            Chars::SafeAscii => "safe_ascii",
            Chars::Safe32 => "safe32",
            Chars::Safe64 => "safe64",
            Chars::Symbol => "symbol",
            Chars::WordSafe32 => "word_safe32",
            Chars::Custom(_) => "custom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::{Charset, EncodingKind};

    #[test]
    fn test_predefined_are_valid_ascii() {
        for chars in Chars::PREDEFINED {
            let charset = Charset::new(chars.chars())
                .unwrap_or_else(|e| panic!("{} invalid: {e}", chars.name()));
            assert_eq!(charset.encoding(), EncodingKind::Ascii, "{}", chars.name());
        }
    }

    #[test]
    fn test_predefined_sizes() {
        let size = |c: Chars| c.chars().chars().count();
        assert_eq!(size(Chars::Alpha), 52);
        assert_eq!(size(Chars::AlphaNum), 62);
        assert_eq!(size(Chars::Decimal), 10);
        assert_eq!(size(Chars::Safe32), 32);
        assert_eq!(size(Chars::Safe64), 64);
        assert_eq!(size(Chars::SafeAscii), 90);
        assert_eq!(size(Chars::Symbol), 28);
        assert_eq!(size(Chars::WordSafe32), 32);
        assert_eq!(size(Chars::Crockford32), 32);
    }
}
