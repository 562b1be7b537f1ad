//! Dashboard view of a vault built from an injected state reader.
//!
//! The reader is the only collaborator. Every report fetches a fresh
//! snapshot; nothing is cached between calls.

use {
    crate::{
        annual::{savings_apy, savings_balance, stability_fee_apr},
        borrow::{max_borrowable, max_repayable, remaining_borrowable},
        config::RiskConfig,
        error::RiskError,
        health::{assess, HealthStatus, PositionHealth},
        liquidation::{self, LiquidationCheck},
        math::{FixedPoint, Scale},
        state::{
            require_scale, Address, CollateralTerms, CollateralType, LiquidationLimits, Position,
            RateParameters, SavingsAccount, StabilityFee,
        },
    },
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// All contract state one report needs, read at a single block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Block the state was read at
    pub block: u64,
    /// CDP Engine `positions(ilk, owner)`
    pub position: Position,
    /// CDP Engine and Spotter collateral parameters
    pub terms: CollateralTerms,
    /// Jug `base` and `duty`
    pub stability_fee: StabilityFee,
    /// Pot `dsr`
    pub savings_rate: RateParameters,
    /// Pot deposit of the owner
    pub savings: SavingsAccount,
    /// Liquidation Engine counters and penalty
    pub liquidation: LiquidationLimits,
    /// Stablecoin held in the owner's wallet, WAD
    pub stablecoin_balance: FixedPoint,
}

/// Read access to CDP Engine, Spotter, Jug, Pot and Liquidation Engine state.
///
/// Implementations must return every field from the same block; mixing a
/// fresh accumulator with a stale position produces wrong ratios that this
/// crate cannot detect.
pub trait StateReader {
    /// Transport or decoding failure
    type Error;

    /// Read everything for one vault at one block.
    fn snapshot(&self, collateral_type: &CollateralType, owner: &Address) -> Result<Snapshot, Self::Error>;
}

impl<R: StateReader + ?Sized> StateReader for &R {
    type Error = R::Error;

    fn snapshot(&self, collateral_type: &CollateralType, owner: &Address) -> Result<Snapshot, Self::Error> {
        (**self).snapshot(collateral_type, owner)
    }
}

/// Failure of [`PositionMonitor::report`].
#[derive(Debug)]
pub enum MonitorError<E> {
    /// The reader failed, nothing was computed
    Reader(E),
    /// The snapshot was read but a calculation rejected it
    Risk(RiskError),
}

impl<E> From<RiskError> for MonitorError<E> {
    fn from(err: RiskError) -> Self {
        MonitorError::Risk(err)
    }
}

impl<E: fmt::Display> fmt::Display for MonitorError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Reader(err) => write!(f, "state read failed: {err}"),
            MonitorError::Risk(err) => write!(f, "{err}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for MonitorError<E> {}

/// What the dashboard shows for one vault.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    /// Block of the underlying snapshot
    pub block: u64,
    /// Vault collateral type
    pub collateral_type: CollateralType,
    /// Vault owner
    pub owner: Address,
    /// Ratio, predicate and prices
    pub health: PositionHealth,
    /// Advisory cap on total debt, WAD
    pub max_borrowable: FixedPoint,
    /// Advisory room left under the cap, WAD
    pub remaining_borrowable: FixedPoint,
    /// Largest repayment the wallet covers, WAD
    pub max_repayable: FixedPoint,
    /// Display only
    pub stability_fee_apr: f64,
    /// Display only, 0 when the Pot rate is not configured
    pub savings_apy: f64,
    /// Whether the Pot rate is set
    pub savings_configured: bool,
    /// Pot deposit with accrued savings, WAD
    pub savings_balance: FixedPoint,
    /// Liquidation gate inputs
    pub liquidation: LiquidationCheck,
}

impl PositionReport {
    /// Gate for the "Liquidate" button
    pub fn can_liquidate(&self) -> bool {
        self.liquidation.should_offer()
    }

    /// Gate for the "Borrow" button. Advisory, the engine has the last word.
    pub fn can_borrow(&self) -> bool {
        !self.health.is_unsafe && !self.remaining_borrowable.is_zero()
    }
}

/// Builds [`PositionReport`]s from an injected [`StateReader`].
pub struct PositionMonitor<R> {
    reader: R,
    config: RiskConfig,
}

impl<R: StateReader> PositionMonitor<R> {
    /// Rejects an invalid `config`.
    pub fn new(reader: R, config: RiskConfig) -> Result<Self, RiskError> {
        config.validate()?;
        Ok(Self { reader, config })
    }

    /// Active thresholds
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Injected reader
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Fetch a fresh snapshot and compute the report.
    pub fn report(
        &self,
        collateral_type: &CollateralType,
        owner: &Address,
    ) -> Result<PositionReport, MonitorError<R::Error>> {
        let snapshot = self
            .reader
            .snapshot(collateral_type, owner)
            .map_err(MonitorError::Reader)?;
        log::debug!("read {} vault of {} at block {}", collateral_type, owner, snapshot.block);
        Ok(self.report_snapshot(collateral_type, owner, &snapshot)?)
    }

    /// Compute a report from a snapshot already in hand.
    pub fn report_snapshot(
        &self,
        collateral_type: &CollateralType,
        owner: &Address,
        snapshot: &Snapshot,
    ) -> Result<PositionReport, RiskError> {
        require_scale(&snapshot.stablecoin_balance, Scale::Wad, "stablecoin_balance")?;

        let health = assess(&snapshot.position, &snapshot.terms, &self.config)?;
        if health.status == HealthStatus::Unsafe {
            log::warn!(
                "{} vault of {} is unsafe at block {} (ratio {})",
                collateral_type,
                owner,
                snapshot.block,
                health.ratio
            );
        }

        let cap = self.config.loan_to_value_cap_pct;
        Ok(PositionReport {
            block: snapshot.block,
            collateral_type: *collateral_type,
            owner: *owner,
            max_borrowable: max_borrowable(health.collateral_value, cap)?,
            remaining_borrowable: remaining_borrowable(health.collateral_value, health.actual_debt, cap)?,
            max_repayable: max_repayable(health.actual_debt, snapshot.stablecoin_balance)?,
            stability_fee_apr: stability_fee_apr(&snapshot.stability_fee)?,
            savings_apy: savings_apy(&snapshot.savings_rate)?,
            savings_configured: snapshot.savings_rate.is_configured(),
            savings_balance: savings_balance(&snapshot.savings)?,
            liquidation: liquidation::check(&snapshot.position, &snapshot.terms, &snapshot.liquidation)?,
            health,
        })
    }
}
