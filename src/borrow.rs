//! Advisory borrow and repay limits for the stablecoin form.
//!
//! These are hints for the UI. The CDP Engine enforces the real limit and a
//! borrow inside these bounds can still be rejected on chain.

use {
    crate::{
        error::{ErrorKind, RiskError},
        math::{common::*, FixedPoint, Scale},
        state::require_scale,
    },
    odra::casper_types::U256,
};

/// `collateral_value * ltv_cap_pct / 100`
pub fn max_borrowable(
    collateral_value: FixedPoint,
    ltv_cap_pct: FixedPoint,
) -> Result<FixedPoint, RiskError> {
    require_scale(&collateral_value, Scale::Wad, "collateral_value")?;
    require_scale(&ltv_cap_pct, Scale::Wad, "loan_to_value_cap_pct")?;
    let hundred_pct = U256::from(100 * WAD);
    if ltv_cap_pct.raw() > hundred_pct {
        return Err(ErrorKind::InvalidInput.at("loan_to_value_cap_pct"));
    }
    if collateral_value.is_zero() {
        return Ok(FixedPoint::zero(Scale::Wad));
    }
    let raw = mul_div(collateral_value.raw(), ltv_cap_pct.raw(), hundred_pct)?;
    Ok(FixedPoint::wad(raw))
}

/// What can still be drawn on top of `actual_debt`, never below zero.
pub fn remaining_borrowable(
    collateral_value: FixedPoint,
    actual_debt: FixedPoint,
    ltv_cap_pct: FixedPoint,
) -> Result<FixedPoint, RiskError> {
    require_scale(&actual_debt, Scale::Wad, "actual_debt")?;
    max_borrowable(collateral_value, ltv_cap_pct)?.saturating_sub(actual_debt)
}

/// A repayment can neither exceed the debt nor the wallet balance.
pub fn max_repayable(actual_debt: FixedPoint, wallet_balance: FixedPoint) -> Result<FixedPoint, RiskError> {
    require_scale(&actual_debt, Scale::Wad, "actual_debt")?;
    require_scale(&wallet_balance, Scale::Wad, "wallet_balance")?;
    actual_debt.try_min(wallet_balance)
}
