//! Common module for FixedPoint and rate math
//!
//! Contains shared scalers, the checked arithmetic traits and the widening
//! `mul_div` every product in the crate goes through.

use {
    crate::error::{ErrorKind, RiskError},
    odra::casper_types::{U256, U512},
};

/// Digits of a WAD
pub const WAD_DECIMALS: usize = 18;
/// Digits of a RAY
pub const RAY_DECIMALS: usize = 27;
/// Identity at WAD scale
pub const WAD: u128 = 1_000_000_000_000_000_000;
/// Identity at RAY scale
pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;
/// RAY / WAD
pub const WAD_TO_RAY: u128 = 1_000_000_000;
/// Seconds in a 365 day year, the compounding horizon of Jug and Pot rates
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Try to subtract, return an error on underflow
pub trait TrySub: Sized {
    /// Subtract
    fn try_sub(self, rhs: Self) -> Result<Self, RiskError>;
}

/// Try to add, return an error on overflow
pub trait TryAdd: Sized {
    /// Add
    fn try_add(self, rhs: Self) -> Result<Self, RiskError>;
}

/// Try to divide, return an error on overflow or divide by zero
pub trait TryDiv<RHS>: Sized {
    /// Divide
    fn try_div(self, rhs: RHS) -> Result<Self, RiskError>;
}

/// Try to multiply, return an error on overflow
pub trait TryMul<RHS>: Sized {
    /// Multiply
    fn try_mul(self, rhs: RHS) -> Result<Self, RiskError>;
}

pub(crate) fn widen(value: U256) -> U512 {
    let mut bytes = [0u8; 64];
    value.to_little_endian(&mut bytes[..32]);
    U512::from_little_endian(&bytes)
}

pub(crate) fn narrow(value: U512) -> Result<U256, RiskError> {
    let mut bytes = [0u8; 64];
    value.to_little_endian(&mut bytes);
    if bytes[32..].iter().any(|b| *b != 0) {
        return Err(ErrorKind::MathOverflow.at("mul_div"));
    }
    Ok(U256::from_little_endian(&bytes[..32]))
}

/// Full 256x256-bit product.
pub fn full_mul(a: U256, b: U256) -> U512 {
    // Both operands fit in 256 bits so the product fits in 512.
    widen(a) * widen(b)
}

/// `a * b / c` with a 512-bit intermediate, rounded down. The product is
/// always formed before dividing.
pub fn mul_div(a: U256, b: U256, c: U256) -> Result<U256, RiskError> {
    if c.is_zero() {
        return Err(ErrorKind::DivisionByZero.at("mul_div"));
    }
    narrow(full_mul(a, b) / widen(c))
}

/// `a * b / c` rounded up.
pub fn mul_div_ceil(a: U256, b: U256, c: U256) -> Result<U256, RiskError> {
    if c.is_zero() {
        return Err(ErrorKind::DivisionByZero.at("mul_div"));
    }
    let product = full_mul(a, b);
    let divisor = widen(c);
    let quotient = product / divisor;
    if (product % divisor).is_zero() {
        narrow(quotient)
    } else {
        narrow(quotient + U512::one())
    }
}
