//! Per-second compounding for Jug stability fees and the Pot savings rate

use {
    crate::{
        error::{ErrorKind, RiskError},
        math::{common::*, FixedPoint, Scale, TryMul},
    },
    odra::casper_types::U256,
};

impl FixedPoint {
    /// Calculate power (for compound interest), rounding down at each step.
    /// `self` is a multiplier at its own scale, e.g. `1.000000001 RAY`.
    pub fn try_rpow(&self, exponent: u64) -> Result<Self, RiskError> {
        if exponent == 0 {
            return Ok(Self::one(self.scale()));
        }

        let mut result = Self::one(self.scale());
        let mut base = *self;
        let mut exp = exponent;

        while exp > 0 {
            if exp % 2 == 1 {
                result = result.try_mul(base)?;
            }
            exp /= 2;
            if exp > 0 {
                base = base.try_mul(base)?;
            }
        }

        Ok(result)
    }
}

/// Rate accumulator after `seconds` of compounding at `per_second_rate`,
/// i.e. what a Jug `drip` would write.
pub fn project_accumulator(
    rate_accumulator: FixedPoint,
    per_second_rate: FixedPoint,
    seconds: u64,
) -> Result<FixedPoint, RiskError> {
    if rate_accumulator.scale() != Scale::Ray || per_second_rate.scale() != Scale::Ray {
        return Err(ErrorKind::ScaleMismatch.at("rate_accumulator"));
    }
    if per_second_rate.raw() < U256::from(RAY) {
        return Err(ErrorKind::InvalidInput.at("per_second_rate"));
    }
    let growth = per_second_rate
        .try_rpow(seconds)
        .map_err(|err| err.on("per_second_rate"))?;
    rate_accumulator.try_mul(growth)
}
