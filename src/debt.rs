//! Conversion between normalized debt and the amount actually owed.

use {
    crate::{
        error::{ErrorKind, RiskError},
        math::{common::*, FixedPoint, Scale},
        state::require_scale,
    },
    odra::casper_types::U256,
};

/// `normalized_debt * rate_accumulator / RAY`, rounded down. The full product
/// is formed before dividing.
pub fn actual_debt(
    normalized_debt: FixedPoint,
    rate_accumulator: FixedPoint,
) -> Result<FixedPoint, RiskError> {
    require_scale(&normalized_debt, Scale::Wad, "normalized_debt")?;
    require_scale(&rate_accumulator, Scale::Ray, "rate_accumulator")?;
    let raw = mul_div(normalized_debt.raw(), rate_accumulator.raw(), U256::from(RAY))
        .map_err(|err| err.on("normalized_debt"))?;
    Ok(FixedPoint::wad(raw))
}

/// Normalized debt that covers `debt`, rounded up so repaying it leaves no
/// dust behind.
pub fn normalize_debt(debt: FixedPoint, rate_accumulator: FixedPoint) -> Result<FixedPoint, RiskError> {
    require_scale(&debt, Scale::Wad, "debt")?;
    require_scale(&rate_accumulator, Scale::Ray, "rate_accumulator")?;
    if rate_accumulator.is_zero() {
        return Err(ErrorKind::DivisionByZero.at("rate_accumulator"));
    }
    let raw = mul_div_ceil(debt.raw(), U256::from(RAY), rate_accumulator.raw())
        .map_err(|err| err.on("debt"))?;
    Ok(FixedPoint::wad(raw))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identity_rate_keeps_debt() {
        let debt = FixedPoint::wad(123_456_789u64);
        assert_eq!(actual_debt(debt, FixedPoint::ray(RAY)).unwrap(), debt);
    }

    #[test]
    fn accrued_rate_scales_debt() {
        let debt = FixedPoint::wad(10 * WAD);
        let rate = FixedPoint::ray(RAY + RAY / 20);
        assert_eq!(actual_debt(debt, rate).unwrap(), FixedPoint::wad(10 * WAD + WAD / 2));
    }

    #[test]
    fn multiplies_before_dividing() {
        // Dividing the rate by RAY first would give 3.
        let debt = FixedPoint::wad(3u64);
        let rate = FixedPoint::ray(RAY + RAY / 2);
        assert_eq!(actual_debt(debt, rate).unwrap(), FixedPoint::wad(4u64));
    }

    #[test]
    fn wrong_scale_names_field() {
        let err = actual_debt(FixedPoint::ray(1u64), FixedPoint::ray(RAY)).unwrap_err();
        assert_eq!(err, ErrorKind::ScaleMismatch.at("normalized_debt"));
    }

    #[test]
    fn normalize_rounds_up() {
        let rate = FixedPoint::ray(RAY + RAY / 2);
        let owed = FixedPoint::wad(4u64);
        let art = normalize_debt(owed, rate).unwrap();
        assert_eq!(art, FixedPoint::wad(3u64));
        assert!(actual_debt(art, rate).unwrap().raw() >= owed.raw());

        let art = normalize_debt(FixedPoint::wad(5u64), rate).unwrap();
        assert_eq!(art, FixedPoint::wad(4u64));
    }

    #[test]
    fn normalize_rejects_zero_rate() {
        let err = normalize_debt(FixedPoint::wad(1u64), FixedPoint::zero(Scale::Ray)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
    }
}
