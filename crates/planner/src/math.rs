//! Integer math helpers for capacity calculations.

use alloy_primitives::{U256, U512};

/// Returns the floor of `x * y / d`.
///
/// The intermediate product is widened to 512 bits so it cannot overflow.
/// Rounding down matches the protocol's own share-to-asset conversion; a
/// zero denominator yields zero.
pub fn mul_div_down(x: U256, y: U256, d: U256) -> U256 {
    if d.is_zero() {
        return U256::ZERO;
    }
    let numerator = U512::from(x) * U512::from(y);
    (numerator / U512::from(d)).saturating_to::<U256>()
}
