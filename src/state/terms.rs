//! Per-collateral and system-wide parameters read from Spotter, Jug, Pot and
//! the Liquidation Engine.

use {
    super::require_scale,
    crate::{
        error::{ErrorKind, RiskError},
        math::{common::*, FixedPoint, Scale, TryAdd},
    },
    odra::casper_types::U256,
    serde::{Deserialize, Serialize},
};

/// Collateral type parameters from `collaterals(ilk)` on the CDP Engine and
/// the Spotter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralTerms {
    /// Accumulated stability fee (`rate`), RAY. Never decreases.
    pub rate_accumulator: FixedPoint,
    /// Oracle price divided by the liquidation ratio (`spot`), RAY
    pub spot_price: FixedPoint,
    /// Minimum collateralization (`mat`), RAY. 1.5 RAY is 150%.
    pub liquidation_ratio: FixedPoint,
}

impl CollateralTerms {
    /// Build and validate terms; every field is RAY.
    pub fn new(
        rate_accumulator: FixedPoint,
        spot_price: FixedPoint,
        liquidation_ratio: FixedPoint,
    ) -> Result<Self, RiskError> {
        let terms = Self {
            rate_accumulator,
            spot_price,
            liquidation_ratio,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Every field must be RAY.
    pub fn validate(&self) -> Result<(), RiskError> {
        require_scale(&self.rate_accumulator, Scale::Ray, "rate_accumulator")?;
        require_scale(&self.spot_price, Scale::Ray, "spot_price")?;
        require_scale(&self.liquidation_ratio, Scale::Ray, "liquidation_ratio")
    }

    /// Liquidation ratio as a WAD percentage, `1.5 RAY` becomes `150.0`.
    pub fn liquidation_ratio_pct(&self) -> Result<FixedPoint, RiskError> {
        self.validate()?;
        let raw = mul_div(
            self.liquidation_ratio.raw(),
            U256::from(100u64),
            U256::from(WAD_TO_RAY),
        )?;
        Ok(FixedPoint::wad(raw))
    }

    /// Reject a snapshot whose accumulator is behind an earlier one.
    pub fn check_accrual(&self, previous: &CollateralTerms) -> Result<(), RiskError> {
        self.validate()?;
        previous.validate()?;
        if self.rate_accumulator.raw() < previous.rate_accumulator.raw() {
            log::warn!(
                "rate accumulator went backwards: {} -> {}",
                previous.rate_accumulator,
                self.rate_accumulator
            );
            return Err(ErrorKind::InvalidInput.at("rate_accumulator"));
        }
        Ok(())
    }
}

/// A per-second compounding multiplier, RAY. `1 RAY` is 0%.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateParameters {
    /// Per-second compounding multiplier, RAY. Zero when unset.
    pub per_second_rate: FixedPoint,
}

impl RateParameters {
    /// Wrap a RAY per-second rate
    pub fn new(per_second_rate: FixedPoint) -> Result<Self, RiskError> {
        require_scale(&per_second_rate, Scale::Ray, "per_second_rate")?;
        Ok(Self { per_second_rate })
    }

    /// A zero rate means the contract was never filed.
    pub fn is_configured(&self) -> bool {
        !self.per_second_rate.is_zero()
    }
}

/// Jug fee parameters: the global `base` plus the collateral's `duty`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilityFee {
    /// Global per-second fee added on top of every duty, RAY
    pub base: FixedPoint,
    /// Collateral specific per-second fee, RAY
    pub duty: FixedPoint,
}

impl StabilityFee {
    /// `base` and `duty` must be RAY.
    pub fn validate(&self) -> Result<(), RiskError> {
        require_scale(&self.base, Scale::Ray, "base")?;
        require_scale(&self.duty, Scale::Ray, "duty")
    }

    /// Effective per-second multiplier applied by `drip`.
    pub fn per_second_rate(&self) -> Result<RateParameters, RiskError> {
        self.validate()?;
        RateParameters::new(self.base.try_add(self.duty)?)
    }
}

/// A Pot deposit: normalized savings (`pie`) and the Pot accumulator (`chi`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsAccount {
    /// WAD
    pub pie: FixedPoint,
    /// RAY
    pub chi: FixedPoint,
}

impl SavingsAccount {
    /// `pie` is WAD and `chi` is RAY.
    pub fn validate(&self) -> Result<(), RiskError> {
        require_scale(&self.pie, Scale::Wad, "pie")?;
        require_scale(&self.chi, Scale::Ray, "chi")
    }
}

/// Liquidation Engine counters and the collateral's penalty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationLimits {
    /// Coin currently needed to cover active auctions, WAD
    pub total_coin: FixedPoint,
    /// Cap on `total_coin`, WAD
    pub max_coin: FixedPoint,
    /// Penalty multiplier (`chop`), WAD. 1.13 WAD is a 13% penalty.
    pub penalty: FixedPoint,
}

impl LiquidationLimits {
    /// Every field must be WAD.
    pub fn validate(&self) -> Result<(), RiskError> {
        require_scale(&self.total_coin, Scale::Wad, "total_coin")?;
        require_scale(&self.max_coin, Scale::Wad, "max_coin")?;
        require_scale(&self.penalty, Scale::Wad, "penalty")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn terms(rate: u128) -> CollateralTerms {
        CollateralTerms::new(
            FixedPoint::ray(rate),
            FixedPoint::ray(RAY),
            FixedPoint::ray(RAY + RAY / 2),
        )
        .unwrap()
    }

    #[test]
    fn liquidation_ratio_pct() {
        let pct = terms(RAY).liquidation_ratio_pct().unwrap();
        assert_eq!(pct, FixedPoint::from_percent(150));
    }

    #[test]
    fn accrual_must_not_go_backwards() {
        let earlier = terms(RAY + 10);
        assert!(terms(RAY + 10).check_accrual(&earlier).is_ok());
        assert!(terms(RAY + 11).check_accrual(&earlier).is_ok());
        let err = terms(RAY + 9).check_accrual(&earlier).unwrap_err();
        assert_eq!(err, ErrorKind::InvalidInput.at("rate_accumulator"));
    }

    #[test]
    fn wrong_scale_is_rejected() {
        let err = CollateralTerms::new(
            FixedPoint::ray(RAY),
            FixedPoint::wad(WAD),
            FixedPoint::ray(RAY),
        )
        .unwrap_err();
        assert_eq!(err, ErrorKind::ScaleMismatch.at("spot_price"));
    }

    #[test]
    fn stability_fee_adds_base() {
        let fee = StabilityFee {
            base: FixedPoint::ray(5u64),
            duty: FixedPoint::ray(RAY + 7),
        };
        assert_eq!(fee.per_second_rate().unwrap().per_second_rate, FixedPoint::ray(RAY + 12));
    }

    #[test]
    fn unfiled_rate_is_not_configured() {
        assert!(!RateParameters::new(FixedPoint::zero(Scale::Ray)).unwrap().is_configured());
        assert!(RateParameters::new(FixedPoint::one(Scale::Ray)).unwrap().is_configured());
    }
}
