//! Exact integer rounding helpers for currency amounts.

/// Basis points in one whole (100%).
pub const BP_SCALE: i64 = 10_000;

/// `round(a * b / den)` with halves rounded up, computed without floating
/// point. The product is taken in 128 bits.
///
/// `den` must be positive; `a * b` is expected to be non-negative.
pub fn round_product(a: i64, b: i64, den: i64) -> i64 {
    debug_assert!(den > 0);
    let n = a as i128 * b as i128;
    let d = den as i128;
    (2 * n + d).div_euclid(2 * d) as i64
}

/// `round(amount * rate_bp / 10000)`.
pub fn apply_rate_bp(amount: i64, rate_bp: i64) -> i64 {
    let n = amount as i128 * rate_bp as i128;
    let d = BP_SCALE as i128;
    (2 * n + d).div_euclid(2 * d) as i64
}
