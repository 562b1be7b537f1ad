//! Whether a "Liquidate" action should be offered for a vault.

use {
    crate::{
        error::{ErrorKind, RiskError},
        health::is_unsafe,
        math::{FixedPoint, Scale},
        state::{CollateralTerms, LiquidationLimits, Position},
    },
    odra::casper_types::U256,
    serde::{Deserialize, Serialize},
};

/// Same predicate the Liquidation Engine enforces.
pub fn can_liquidate(position: &Position, terms: &CollateralTerms) -> Result<bool, RiskError> {
    is_unsafe(position, terms)
}

/// Room left under the engine's `max_coin` cap, never below zero.
pub fn liquidation_headroom(limits: &LiquidationLimits) -> Result<FixedPoint, RiskError> {
    limits.validate()?;
    limits.max_coin.saturating_sub(limits.total_coin)
}

/// Liquidation penalty as a WAD percentage, `1.13` becomes `13.0`.
pub fn penalty_pct(limits: &LiquidationLimits) -> Result<FixedPoint, RiskError> {
    limits.validate()?;
    let excess = limits.penalty.saturating_sub(FixedPoint::one(Scale::Wad))?;
    let raw = excess
        .raw()
        .checked_mul(U256::from(100u64))
        .ok_or(ErrorKind::MathOverflow.at("penalty"))?;
    Ok(FixedPoint::wad(raw))
}

/// Inputs to the "Liquidate" gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationCheck {
    /// The vault is unsafe
    pub eligible: bool,
    /// Engine still has room under `max_coin`
    pub has_headroom: bool,
    /// Penalty charged on liquidation, WAD percentage
    pub penalty_pct: FixedPoint,
}

impl LiquidationCheck {
    /// Offer the action only when the vault is unsafe and the engine can
    /// start another auction.
    pub fn should_offer(&self) -> bool {
        self.eligible && self.has_headroom
    }
}

/// Evaluate the gate for one vault.
pub fn check(
    position: &Position,
    terms: &CollateralTerms,
    limits: &LiquidationLimits,
) -> Result<LiquidationCheck, RiskError> {
    let eligible = can_liquidate(position, terms)?;
    let has_headroom = !liquidation_headroom(limits)?.is_zero();
    if eligible && !has_headroom {
        log::debug!("vault is unsafe but the liquidation engine is at max_coin");
    }
    Ok(LiquidationCheck {
        eligible,
        has_headroom,
        penalty_pct: penalty_pct(limits)?,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::RAY;

    fn wad(text: &str) -> FixedPoint {
        FixedPoint::parse_decimal(text, Scale::Wad).unwrap()
    }

    fn limits(total: &str, max: &str) -> LiquidationLimits {
        LiquidationLimits {
            total_coin: wad(total),
            max_coin: wad(max),
            penalty: wad("1.13"),
        }
    }

    fn terms() -> CollateralTerms {
        CollateralTerms::new(
            FixedPoint::ray(RAY),
            FixedPoint::ray(RAY),
            FixedPoint::ray(RAY + RAY / 2),
        )
        .unwrap()
    }

    #[test]
    fn can_liquidate_follows_safety_predicate() {
        let at_boundary = Position::new(wad("1"), wad("1")).unwrap();
        let healthy = Position::new(wad("2"), wad("1")).unwrap();
        assert!(can_liquidate(&at_boundary, &terms()).unwrap());
        assert!(!can_liquidate(&healthy, &terms()).unwrap());
        assert!(!can_liquidate(&Position::empty(), &terms()).unwrap());
    }

    #[test]
    fn headroom_clamps_at_zero() {
        assert_eq!(liquidation_headroom(&limits("10", "25")).unwrap(), wad("15"));
        assert!(liquidation_headroom(&limits("30", "25")).unwrap().is_zero());
    }

    #[test]
    fn penalty_as_percent() {
        assert_eq!(penalty_pct(&limits("0", "1")).unwrap(), wad("13"));
    }

    #[test]
    fn offer_needs_headroom() {
        let unsafe_vault = Position::new(wad("1"), wad("1")).unwrap();
        let full = check(&unsafe_vault, &terms(), &limits("25", "25")).unwrap();
        assert!(full.eligible);
        assert!(!full.should_offer());
        let open = check(&unsafe_vault, &terms(), &limits("0", "25")).unwrap();
        assert!(open.should_offer());
    }
}
