//! Position health: collateral value, collateralization ratio, the safety
//! predicate and the liquidation price.
//!
//! The safety predicate compares raw 512-bit products and must agree with
//! the CDP Engine bit for bit. Ratios and prices are for display.

use {
    crate::{
        config::RiskConfig,
        debt::actual_debt,
        error::{ErrorKind, RiskError},
        math::{common::*, FixedPoint, Scale, TryMul},
        state::{CollateralTerms, Position},
    },
    odra::casper_types::{U256, U512},
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Collateral value over debt value, as a WAD percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollateralizationRatio {
    /// WAD percentage
    Finite(FixedPoint),
    /// No debt, whatever the collateral
    Unbounded,
}

impl CollateralizationRatio {
    /// True for the no-debt sentinel
    pub fn is_unbounded(&self) -> bool {
        matches!(self, CollateralizationRatio::Unbounded)
    }

    /// Finite ratio, `None` for the unbounded sentinel
    pub fn finite(&self) -> Option<FixedPoint> {
        match self {
            CollateralizationRatio::Finite(pct) => Some(*pct),
            CollateralizationRatio::Unbounded => None,
        }
    }
}

impl fmt::Display for CollateralizationRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollateralizationRatio::Finite(pct) => write!(f, "{:.2}%", pct.to_f64()),
            CollateralizationRatio::Unbounded => f.write_str("∞"),
        }
    }
}

/// Dashboard badge for a vault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// At or above the warning ratio
    Safe,
    /// Safe, but below the configured warning ratio
    Warning,
    /// Liquidatable
    Unsafe,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HealthStatus::Safe => "SAFE",
            HealthStatus::Warning => "WARNING",
            HealthStatus::Unsafe => "UNSAFE",
        })
    }
}

/// `collateral * spot_price / RAY`, WAD
pub fn collateral_value(position: &Position, terms: &CollateralTerms) -> Result<FixedPoint, RiskError> {
    position.validate()?;
    terms.validate()?;
    let raw = mul_div(position.collateral.raw(), terms.spot_price.raw(), U256::from(RAY))
        .map_err(|err| err.on("collateral"))?;
    Ok(FixedPoint::wad(raw))
}

/// `collateral * spot_price * 100 / (normalized_debt * rate_accumulator)` on
/// the raw products, or `Unbounded` when the debt product is zero.
pub fn collateralization_ratio(
    position: &Position,
    terms: &CollateralTerms,
) -> Result<CollateralizationRatio, RiskError> {
    let (collateral_side, debt_side) = raw_sides(position, terms)?;
    if debt_side.is_zero() {
        log::debug!("no debt outstanding, ratio is unbounded");
        return Ok(CollateralizationRatio::Unbounded);
    }
    let pct = collateral_side
        .checked_mul(widen(U256::from(100 * WAD)))
        .ok_or(ErrorKind::MathOverflow.at("collateralization_ratio"))?
        / debt_side;
    let pct = narrow(pct).map_err(|err| err.on("collateralization_ratio"))?;
    Ok(CollateralizationRatio::Finite(FixedPoint::wad(pct)))
}

/// True when `collateral * spot_price <= normalized_debt * rate_accumulator`
/// on raw integers. Equality is unsafe; a zero debt product never is.
pub fn is_unsafe(position: &Position, terms: &CollateralTerms) -> Result<bool, RiskError> {
    let (collateral_side, debt_side) = raw_sides(position, terms)?;
    if debt_side.is_zero() {
        return Ok(false);
    }
    let unsafe_ = collateral_side <= debt_side;
    if unsafe_ {
        log::debug!("position is unsafe: {} <= {}", collateral_side, debt_side);
    }
    Ok(unsafe_)
}

/// `(collateral * spot_price, normalized_debt * rate_accumulator)`, unrounded.
fn raw_sides(position: &Position, terms: &CollateralTerms) -> Result<(U512, U512), RiskError> {
    position.validate()?;
    terms.validate()?;
    Ok((
        full_mul(position.collateral.raw(), terms.spot_price.raw()),
        full_mul(position.normalized_debt.raw(), terms.rate_accumulator.raw()),
    ))
}

/// Spot price at which collateral value equals debt, RAY:
/// `normalized_debt * rate_accumulator / collateral`. Zero without collateral.
pub fn liquidation_price(position: &Position, terms: &CollateralTerms) -> Result<FixedPoint, RiskError> {
    position.validate()?;
    terms.validate()?;
    if position.collateral.is_zero() {
        log::debug!("no collateral, liquidation price is zero");
        return Ok(FixedPoint::zero(Scale::Ray));
    }
    let raw = mul_div(
        position.normalized_debt.raw(),
        terms.rate_accumulator.raw(),
        position.collateral.raw(),
    )
    .map_err(|err| err.on("liquidation_price"))?;
    Ok(FixedPoint::ray(raw))
}

/// Oracle price that would produce the liquidation spot, RAY.
pub fn liquidation_market_price(
    position: &Position,
    terms: &CollateralTerms,
) -> Result<FixedPoint, RiskError> {
    liquidation_price(position, terms)?.try_mul(terms.liquidation_ratio)
}

/// `Unsafe` per [`is_unsafe`], else `Warning` below the configured ratio.
pub fn health_status(
    position: &Position,
    terms: &CollateralTerms,
    config: &RiskConfig,
) -> Result<HealthStatus, RiskError> {
    if is_unsafe(position, terms)? {
        return Ok(HealthStatus::Unsafe);
    }
    let status = match collateralization_ratio(position, terms)?.finite() {
        Some(pct) if pct.raw() < config.warning_ratio_pct.raw() => HealthStatus::Warning,
        _ => HealthStatus::Safe,
    };
    Ok(status)
}

/// Everything the dashboard shows about one vault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionHealth {
    /// Owed stablecoin, WAD
    pub actual_debt: FixedPoint,
    /// WAD
    pub collateral_value: FixedPoint,
    /// Collateralization ratio
    pub ratio: CollateralizationRatio,
    /// Safety predicate result
    pub is_unsafe: bool,
    /// Badge derived from the above
    pub status: HealthStatus,
    /// Spot price at the liquidation boundary, RAY
    pub liquidation_price: FixedPoint,
    /// Oracle price at the liquidation boundary, RAY
    pub liquidation_market_price: FixedPoint,
}

/// Compute every health figure for one vault.
pub fn assess(
    position: &Position,
    terms: &CollateralTerms,
    config: &RiskConfig,
) -> Result<PositionHealth, RiskError> {
    Ok(PositionHealth {
        actual_debt: actual_debt(position.normalized_debt, terms.rate_accumulator)?,
        collateral_value: collateral_value(position, terms)?,
        ratio: collateralization_ratio(position, terms)?,
        is_unsafe: is_unsafe(position, terms)?,
        status: health_status(position, terms, config)?,
        liquidation_price: liquidation_price(position, terms)?,
        liquidation_market_price: liquidation_market_price(position, terms)?,
    })
}
