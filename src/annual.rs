//! Annualized percentages for Jug stability fees and the Pot savings rate,
//! plus the exact savings balance.
//!
//! Annualization raises a per-second multiplier to `SECONDS_PER_YEAR` in
//! `f64`. The result is display only and never fed back into accounting.

use {
    crate::{
        error::{ErrorKind, RiskError},
        math::{common::*, FixedPoint, Scale},
        state::{require_scale, RateParameters, SavingsAccount, StabilityFee},
    },
    odra::casper_types::U256,
};

/// `((rate / RAY) ^ SECONDS_PER_YEAR - 1) * 100`.
///
/// `RAY` yields exactly `0.0`. A zero rate is an unconfigured contract and
/// also yields `0.0` rather than `-100.0`; check
/// [`RateParameters::is_configured`] to tell the two apart.
pub fn annualized_pct(rate: &RateParameters) -> Result<f64, RiskError> {
    require_scale(&rate.per_second_rate, Scale::Ray, "per_second_rate")?;
    if !rate.is_configured() {
        log::debug!("per-second rate is not configured, reporting 0%");
        return Ok(0.0);
    }
    if rate.per_second_rate.raw() == U256::from(RAY) {
        return Ok(0.0);
    }
    let multiplier = rate.per_second_rate.to_f64();
    let pct = (multiplier.powf(SECONDS_PER_YEAR as f64) - 1.0) * 100.0;
    if !pct.is_finite() {
        return Err(ErrorKind::InvalidInput.at("per_second_rate"));
    }
    Ok(pct)
}

/// Stability fee APR of a collateral type (`base + duty`).
pub fn stability_fee_apr(fee: &StabilityFee) -> Result<f64, RiskError> {
    annualized_pct(&fee.per_second_rate()?)
}

/// Savings APY of the Pot.
pub fn savings_apy(savings_rate: &RateParameters) -> Result<f64, RiskError> {
    annualized_pct(savings_rate)
}

/// Current value of a Pot deposit: `pie * chi / RAY`, WAD.
pub fn savings_balance(account: &SavingsAccount) -> Result<FixedPoint, RiskError> {
    account.validate()?;
    let raw = mul_div(account.pie.raw(), account.chi.raw(), U256::from(RAY)).map_err(|err| err.on("pie"))?;
    Ok(FixedPoint::wad(raw))
}

#[cfg(test)]
mod test {
    use super::*;

    fn rate(raw: u128) -> RateParameters {
        RateParameters::new(FixedPoint::ray(raw)).unwrap()
    }

    #[test]
    fn identity_rate_is_zero() {
        assert_eq!(annualized_pct(&rate(RAY)).unwrap(), 0.0);
    }

    #[test]
    fn unconfigured_rate_is_zero_not_minus_hundred() {
        let unset = rate(0);
        assert!(!unset.is_configured());
        assert_eq!(annualized_pct(&unset).unwrap(), 0.0);
    }

    #[test]
    fn runaway_rate_is_rejected() {
        let err = annualized_pct(&rate(2 * RAY)).unwrap_err();
        assert_eq!(err, ErrorKind::InvalidInput.at("per_second_rate"));
    }

    #[test]
    fn five_percent_duty() {
        // 1.000000001547125957863212448 compounds to 5% a year
        let apr = annualized_pct(&rate(1_000_000_001_547_125_957_863_212_448)).unwrap();
        assert!((apr - 5.0).abs() < 1e-4, "{apr}");
    }

    #[test]
    fn base_is_added_to_duty() {
        let fee = StabilityFee {
            base: FixedPoint::zero(Scale::Ray),
            duty: FixedPoint::ray(1_000_000_000_315_522_921_573_372_069u128),
        };
        let apr = stability_fee_apr(&fee).unwrap();
        assert!((apr - 1.0).abs() < 1e-4, "{apr}");
    }

    #[test]
    fn savings_balance_applies_chi() {
        let account = SavingsAccount {
            pie: FixedPoint::from_units(100, Scale::Wad).unwrap(),
            chi: FixedPoint::ray(RAY + RAY / 50),
        };
        assert_eq!(
            savings_balance(&account).unwrap(),
            FixedPoint::from_units(102, Scale::Wad).unwrap()
        );
    }

    #[test]
    fn savings_apy_matches_annualized() {
        let dsr = rate(1_000_000_000_627_937_192_491_029_810);
        let apy = savings_apy(&dsr).unwrap();
        assert!((apy - 2.0).abs() < 1e-4, "{apy}");
    }
}
