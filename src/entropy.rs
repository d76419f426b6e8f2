//! Entropy, population, and risk approximations.
//!
//! For `T` random IDs drawn from `2^b` equally likely values, the birthday
//! bound puts the chance of any repeat at roughly `T(T-1) / 2^(b+1)`.
//! Writing the risk as "1 in `R`" and replacing `T(T-1)` with the slightly
//! larger `T^2` gives the closed forms used here:
//!
//! ```text
//! bits  = 2·log2(T) + log2(R) − 1
//! total = sqrt(2^(b+1) / R)
//! risk  = 2^(b+1) / T^2
//! ```
//!
//! Using `T^2` errs toward safety in every direction: `bits` may ask for a
//! little more entropy than strictly needed, `total` reports slightly fewer
//! IDs than could be generated, and `risk` reports a slightly smaller `R`
//! (a higher chance of repeat) than the exact bound.

use crate::charset::{bits_per_char as sliced_bits_per_char, Charset, RejectionTable};

/// Entropy bits needed so that `total` IDs repeat with a 1 in `risk` chance.
///
/// Never negative. Returns `0.0` when `total <= 1` or `risk <= 1`, and
/// when `total² × risk < 2`.
pub fn bits(total: f64, risk: f64) -> f64 {
    if total.is_nan() || risk.is_nan() || total <= 1.0 || risk <= 1.0 {
        return 0.0;
    }
    (2.0 * total.log2() + risk.log2() - 1.0).max(0.0)
}

/// Number of IDs with `bits` of entropy that can be generated before the
/// chance of a repeat reaches 1 in `risk`.
///
/// Saturates at `u64::MAX`.
pub fn total(bits: f64, risk: f64) -> u64 {
    let risk_bits = if risk > 1.0 { risk.log2() } else { 0.0 };
    let total = ((bits + 1.0 - risk_bits) / 2.0).exp2();
    total.floor() as u64
}

/// Repeat risk, as "1 in `R`", after generating `total` IDs with `bits` of
/// entropy.
///
/// Always at least 1. Returns `u64::MAX` when `total <= 1`, since a single
/// ID cannot repeat.
pub fn risk(bits: f64, total: f64) -> u64 {
    if total.is_nan() || total <= 1.0 {
        return u64::MAX;
    }
    let risk = (bits + 1.0 - 2.0 * total.log2()).exp2();
    (risk.floor() as u64).max(1)
}

/// Theoretical entropy bits per character, `log2(n)`.
pub fn bits_per_char(n: usize) -> f64 {
    (n as f64).log2()
}

/// Entropy representation efficiency.
///
/// The share of an ID's storage bits that is entropy:
/// `log2(N) / (8 × average UTF-8 bytes per character)`.
pub fn ere(charset: &Charset) -> f64 {
    let n = charset.len();
    let bytes_per_char = charset.byte_len() as f64 / n as f64;
    bits_per_char(n) / (8.0 * bytes_per_char)
}

/// Entropy transform efficiency for a charset of `n` characters.
///
/// The ratio of theoretical bits per character to the expected number of
/// random bits consumed per emitted character, accounting for the bits
/// thrown away in each rejection zone. Exactly `1.0` iff `n` is a power of
/// two.
pub fn ete(n: usize) -> f64 {
    if n.is_power_of_two() {
        return 1.0;
    }
    let bpc = sliced_bits_per_char(n);
    let table = RejectionTable::new(n);
    let slices = 1u32 << bpc;
    let rejects = slices - n as u32;
    let reject_bits: u32 = (n as u32..slices).map(|v| table.bits_for(v)).sum();
    let avg_reject_bits = reject_bits as f64 / rejects as f64;

    let p_accept = n as f64 / slices as f64;
    let p_reject = 1.0 - p_accept;
    let expected = bpc as f64 + (p_reject / p_accept) * avg_reject_bits;

    bits_per_char(n) / expected
}
