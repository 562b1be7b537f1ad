#![allow(clippy::arithmetic_side_effects)]
#![deny(missing_docs)]

//! Position accounting and risk computation for a CDP stablecoin system.
//!
//! Takes raw WAD/RAY integers read from the CDP Engine, Spotter, Jug, Pot and
//! Liquidation Engine and derives what a dashboard shows and gates on:
//! collateralization ratio, the liquidation safety predicate, liquidation
//! price, owed debt, fee and savings rates and advisory borrow limits.

pub mod annual;
pub mod borrow;
pub mod config;
pub mod debt;
pub mod error;
pub mod health;
pub mod liquidation;
pub mod math;
pub mod monitor;
pub mod state;

pub use config::RiskConfig;
pub use error::{ErrorKind, RiskError};
pub use math::{FixedPoint, Scale};
pub use monitor::{MonitorError, PositionMonitor, PositionReport, Snapshot, StateReader};
