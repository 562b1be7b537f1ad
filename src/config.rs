//! Tunable thresholds for the advisory checks.

use {
    crate::{
        error::{ErrorKind, RiskError},
        math::{FixedPoint, Scale},
        state::require_scale,
    },
    serde::{Deserialize, Serialize},
};

/// Default loan-to-value cap offered in the borrow form
pub const DEFAULT_LOAN_TO_VALUE_CAP_PCT: u64 = 50;
/// Ratios below this are flagged as a warning
pub const DEFAULT_WARNING_RATIO_PCT: u64 = 150;

/// Advisory thresholds. Missing fields fall back to the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Share of collateral value that may be borrowed, WAD percentage
    pub loan_to_value_cap_pct: FixedPoint,
    /// Collateralization ratio below which a safe vault is flagged, WAD
    /// percentage
    pub warning_ratio_pct: FixedPoint,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            loan_to_value_cap_pct: FixedPoint::from_percent(DEFAULT_LOAN_TO_VALUE_CAP_PCT),
            warning_ratio_pct: FixedPoint::from_percent(DEFAULT_WARNING_RATIO_PCT),
        }
    }
}

impl RiskConfig {
    /// Both thresholds are WAD, the cap is at most 100% and the warning
    /// ratio is non-zero.
    pub fn validate(&self) -> Result<(), RiskError> {
        require_scale(&self.loan_to_value_cap_pct, Scale::Wad, "loan_to_value_cap_pct")?;
        require_scale(&self.warning_ratio_pct, Scale::Wad, "warning_ratio_pct")?;
        if self.loan_to_value_cap_pct.raw() > FixedPoint::from_percent(100).raw() {
            return Err(ErrorKind::InvalidInput.at("loan_to_value_cap_pct"));
        }
        if self.warning_ratio_pct.is_zero() {
            return Err(ErrorKind::InvalidInput.at("warning_ratio_pct"));
        }
        Ok(())
    }
}
