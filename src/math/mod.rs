//! Fixed-point math for WAD amounts and RAY rates.

pub mod common;
pub mod fixed_point;
pub mod rate;

pub use common::{TryAdd, TryDiv, TryMul, TrySub, RAY, SECONDS_PER_YEAR, WAD};
pub use fixed_point::{FixedPoint, Scale};
pub use rate::project_accumulator;
