//! Read-only snapshots of CDP Engine, Spotter, Jug, Pot and Liquidation
//! Engine state, as handed to the calculators.

pub mod address;
pub mod collateral_type;
pub mod position;
pub mod terms;

pub use address::*;
pub use collateral_type::*;
pub use position::*;
pub use terms::*;

use crate::{
    error::{ErrorKind, RiskError},
    math::{FixedPoint, Scale},
};

/// Reject a value that was read at the wrong scale.
pub(crate) fn require_scale(
    value: &FixedPoint,
    scale: Scale,
    field: &'static str,
) -> Result<(), RiskError> {
    if value.scale() != scale {
        return Err(ErrorKind::ScaleMismatch.at(field));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn require_scale_names_field() {
        let value = FixedPoint::zero(Scale::Wad);
        assert!(require_scale(&value, Scale::Wad, "collateral").is_ok());
        let err = require_scale(&value, Scale::Ray, "spot_price").unwrap_err();
        assert_eq!(err, ErrorKind::ScaleMismatch.at("spot_price"));
    }
}
