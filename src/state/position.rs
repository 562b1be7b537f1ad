//! Vault positions.

use {
    super::require_scale,
    crate::{
        error::RiskError,
        math::{FixedPoint, Scale},
    },
    serde::{Deserialize, Serialize},
};

/// One account's vault for one collateral type, as read from the CDP Engine
/// `positions(ilk, owner)` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Locked collateral (`ink`), WAD
    pub collateral: FixedPoint,
    /// Debt before the rate accumulator is applied (`art`), WAD
    pub normalized_debt: FixedPoint,
}

impl Position {
    /// Build a position from WAD collateral and WAD normalized debt.
    pub fn new(collateral: FixedPoint, normalized_debt: FixedPoint) -> Result<Self, RiskError> {
        let position = Self {
            collateral,
            normalized_debt,
        };
        position.validate()?;
        Ok(position)
    }

    /// An empty vault
    pub fn empty() -> Self {
        Self {
            collateral: FixedPoint::zero(Scale::Wad),
            normalized_debt: FixedPoint::zero(Scale::Wad),
        }
    }

    /// Both fields must be WAD.
    pub fn validate(&self) -> Result<(), RiskError> {
        require_scale(&self.collateral, Scale::Wad, "collateral")?;
        require_scale(&self.normalized_debt, Scale::Wad, "normalized_debt")
    }

    /// Non-zero normalized debt
    pub fn has_debt(&self) -> bool {
        !self.normalized_debt.is_zero()
    }
}
