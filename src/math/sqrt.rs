use alloy::primitives::U256;
use bigdecimal::num_bigint::BigInt;

use super::MathError;

/// Floor of the square root of an arbitrary-precision integer.
///
/// Newton's iteration starting from `2^(bits / 2)`, stopping as soon as the
/// next iterate no longer decreases.
///
/// # Errors
/// * `MathError::InvalidArgument` if `value` is negative
pub fn isqrt(value: &BigInt) -> Result<BigInt, MathError> {
    let zero = BigInt::from(0u8);
    if value < &zero {
        return Err(MathError::InvalidArgument(
            "square root of negative numbers is not supported".to_string(),
        ));
    }
    if value < &BigInt::from(2u8) {
        return Ok(value.clone());
    }

    let mut x = BigInt::from(1u8) << (value.bits() >> 1);
    loop {
        let y: BigInt = (&x + value / &x) >> 1;
        if y >= x {
            return Ok(x);
        }
        x = y;
    }
}

/// Floor of the square root of a `U256`, same iteration as [`isqrt`].
#[must_use]
pub fn isqrt_u256(value: U256) -> U256 {
    if value < U256::from(2) {
        return value;
    }

    // x <= 2^128 so x + value / x cannot overflow
    let mut x = U256::from(1) << (value.bit_len() >> 1);
    loop {
        let y = (x + value / x) >> 1;
        if y >= x {
            return x;
        }
        x = y;
    }
}
