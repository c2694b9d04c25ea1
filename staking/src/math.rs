//! Scaled-integer rate conversions.
//!
//! Exchange rates are positive rationals expressed as integers scaled by
//! [`RATE_SCALE`]. Conversions go through a full 256-bit intermediate
//! product so no representable amount can overflow mid-computation, and
//! rounding error never exceeds one minor unit of the target denomination.
//! All values are deterministic integers; floats never touch amounts.

use tonstake_types::TokenAmount;

use crate::error::StakingError;

/// Scale factor for exchange rates: a rate of 1.0 is stored as `1e9`.
pub const RATE_SCALE: u64 = 1_000_000_000;

/// Convert an amount into the target unit space: `amount × rate / scale`.
///
/// Used to turn share-token balances into display value.
pub fn mul_by_rate(amount: TokenAmount, rate: u64) -> Result<TokenAmount, StakingError> {
    if rate == 0 {
        return Err(StakingError::InvalidRate);
    }
    mul_div(amount.raw(), rate as u128, RATE_SCALE as u128).map(TokenAmount::new)
}

/// Convert an amount back into the source unit space: `amount × scale / rate`.
///
/// Used to turn a user-requested display amount into shares to redeem.
pub fn div_by_rate(amount: TokenAmount, rate: u64) -> Result<TokenAmount, StakingError> {
    if rate == 0 {
        return Err(StakingError::InvalidRate);
    }
    mul_div(amount.raw(), RATE_SCALE as u128, rate as u128).map(TokenAmount::new)
}

/// Compute `a × b / d` with a 256-bit intermediate product.
///
/// `Overflow` when `d == 0` or the quotient does not fit in a `u128`.
pub fn mul_div(a: u128, b: u128, d: u128) -> Result<u128, StakingError> {
    let (hi, lo) = mul_wide(a, b);
    div_wide(hi, lo, d).ok_or(StakingError::Overflow)
}

/// Full 128×128 → 256-bit multiplication, returned as `(hi, lo)` limbs.
fn mul_wide(a: u128, b: u128) -> (u128, u128) {
    const MASK: u128 = (1 << 64) - 1;
    let (a_lo, a_hi) = (a & MASK, a >> 64);
    let (b_lo, b_hi) = (b & MASK, b >> 64);

    let ll = a_lo * b_lo;
    let lh = a_lo * b_hi;
    let hl = a_hi * b_lo;
    let hh = a_hi * b_hi;

    let mid = (ll >> 64) + (lh & MASK) + (hl & MASK);
    let lo = (mid << 64) | (ll & MASK);
    let hi = hh + (lh >> 64) + (hl >> 64) + (mid >> 64);
    (hi, lo)
}

/// Divide the 256-bit value `(hi, lo)` by `d`, truncating.
///
/// Returns `None` when `d` is zero or the quotient does not fit in u128
/// (which requires `hi >= d`).
fn div_wide(hi: u128, lo: u128, d: u128) -> Option<u128> {
    if d == 0 || hi >= d {
        return None;
    }
    if hi == 0 {
        return Some(lo / d);
    }

    // Shift-subtract long division over the 128 bits of `lo`, with the
    // remainder seeded from `hi` (rem < d throughout, so a carry out of
    // the shift always means the true value exceeds d).
    let mut rem = hi;
    let mut quotient: u128 = 0;
    for i in (0..128).rev() {
        let carry = rem >> 127;
        rem = (rem << 1) | ((lo >> i) & 1);
        quotient <<= 1;
        if carry == 1 || rem >= d {
            rem = rem.wrapping_sub(d);
            quotient |= 1;
        }
    }
    Some(quotient)
}
