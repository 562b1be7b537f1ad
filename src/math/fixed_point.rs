//! Exact base-10 fixed-point numbers at WAD or RAY scale.
#![allow(missing_docs)]

use {
    crate::{
        error::{ErrorKind, RiskError},
        math::common::*,
    },
    odra::casper_types::{
        bytesrepr::{self, FromBytes, ToBytes},
        CLType, CLTyped, U256,
    },
    serde::{de, Deserialize, Deserializer, Serialize, Serializer},
    std::{cmp::Ordering, fmt},
};

/// Decimal scale of a fixed-point value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    /// 18 digits, token amounts
    Wad,
    /// 27 digits, rates and ratios
    Ray,
}

impl Scale {
    /// Number of digits after the decimal point
    pub fn decimals(&self) -> usize {
        match self {
            Scale::Wad => WAD_DECIMALS,
            Scale::Ray => RAY_DECIMALS,
        }
    }

    /// Raw value of one unit at this scale
    pub fn one(&self) -> U256 {
        match self {
            Scale::Wad => U256::from(WAD),
            Scale::Ray => U256::from(RAY),
        }
    }

    fn tag(&self) -> u8 {
        match self {
            Scale::Wad => 0,
            Scale::Ray => 1,
        }
    }

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Scale::Wad),
            1 => Some(Scale::Ray),
            _ => None,
        }
    }
}

/// Unsigned fixed-point number: `raw / 10^scale.decimals()`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedPoint {
    raw: U256,
    scale: Scale,
}

impl FixedPoint {
    /// Wrap an already scaled integer
    pub fn from_raw(raw: U256, scale: Scale) -> Self {
        Self { raw, scale }
    }

    /// WAD value from raw base units
    pub fn wad(raw: impl Into<U256>) -> Self {
        Self::from_raw(raw.into(), Scale::Wad)
    }

    /// RAY value from raw base units
    pub fn ray(raw: impl Into<U256>) -> Self {
        Self::from_raw(raw.into(), Scale::Ray)
    }

    /// One
    pub fn one(scale: Scale) -> Self {
        Self::from_raw(scale.one(), scale)
    }

    /// Zero
    pub fn zero(scale: Scale) -> Self {
        Self::from_raw(U256::zero(), scale)
    }

    /// Whole units, e.g. `from_units(2, Scale::Wad)` is `2.0`
    pub fn from_units(units: u64, scale: Scale) -> Result<Self, RiskError> {
        let raw = scale
            .one()
            .checked_mul(U256::from(units))
            .ok_or(ErrorKind::MathOverflow.at("units"))?;
        Ok(Self::from_raw(raw, scale))
    }

    /// Create scaled value from a whole percent, `from_percent(50)` is `50.0`
    pub fn from_percent(percent: u64) -> Self {
        // u64::MAX * WAD fits in 256 bits
        Self::from_raw(Scale::Wad.one() * U256::from(percent), Scale::Wad)
    }

    pub fn raw(&self) -> U256 {
        self.raw
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Exact rendering with `scale.decimals()` fractional digits.
    pub fn to_decimal_string(&self) -> String {
        self.to_string()
    }

    /// Convert to another scale, rejecting any conversion that would drop a
    /// non-zero digit.
    pub fn rescale(&self, to: Scale) -> Result<Self, RiskError> {
        let from = self.scale.decimals();
        let target = to.decimals();
        let raw = match from.cmp(&target) {
            Ordering::Equal => self.raw,
            Ordering::Less => self
                .raw
                .checked_mul(U256::exp10(target - from))
                .ok_or(ErrorKind::MathOverflow.at("rescale"))?,
            Ordering::Greater => {
                let factor = U256::exp10(from - target);
                if !(self.raw % factor).is_zero() {
                    return Err(ErrorKind::PrecisionLoss.at("rescale"));
                }
                self.raw / factor
            }
        };
        Ok(Self::from_raw(raw, to))
    }

    /// Parse `digits[.digits]` into a value at `scale`.
    pub fn parse_decimal(text: &str, scale: Scale) -> Result<Self, RiskError> {
        let text = text.trim();
        let (int_part, frac_part) = match text.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (text, ""),
        };
        let well_formed = !(int_part.is_empty() && frac_part.is_empty())
            && int_part.bytes().all(|b| b.is_ascii_digit())
            && frac_part.bytes().all(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(ErrorKind::InvalidInput.at("decimal"));
        }

        let frac_digits = frac_part.trim_end_matches('0');
        if frac_digits.len() > scale.decimals() {
            return Err(ErrorKind::PrecisionLoss.at("decimal"));
        }

        let mut digits = String::with_capacity(int_part.len() + scale.decimals());
        digits.push_str(int_part);
        digits.push_str(frac_digits);
        digits.push_str(&"0".repeat(scale.decimals() - frac_digits.len()));
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Self::zero(scale));
        }

        let raw = U256::from_dec_str(digits).map_err(|_| ErrorKind::MathOverflow.at("decimal"))?;
        Ok(Self::from_raw(raw, scale))
    }

    /// Convert a float typed in by a user. Non-finite or negative input is
    /// rejected; digits beyond the scale are dropped by float formatting.
    pub fn from_f64(value: f64, scale: Scale) -> Result<Self, RiskError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ErrorKind::InvalidInput.at("amount"));
        }
        Self::parse_decimal(&format!("{:.*}", scale.decimals(), value), scale)
    }

    /// Lossy conversion for display only.
    pub fn to_f64(&self) -> f64 {
        // The exact decimal rendering parses to the nearest f64.
        self.to_string().parse::<f64>().unwrap_or(f64::MAX)
    }

    /// Round scaled value to whole units
    pub fn try_round_u64(&self) -> Result<u64, RiskError> {
        let one = self.scale.one();
        let half = one / U256::from(2u64);
        let rounded = half
            .checked_add(self.raw)
            .ok_or(ErrorKind::MathOverflow.at("round"))?
            / one;
        to_u64(rounded)
    }

    /// Ceiling scaled value to whole units
    pub fn try_ceil_u64(&self) -> Result<u64, RiskError> {
        let one = self.scale.one();
        let ceil = (one - U256::one())
            .checked_add(self.raw)
            .ok_or(ErrorKind::MathOverflow.at("ceil"))?
            / one;
        to_u64(ceil)
    }

    /// Floor scaled value to whole units
    pub fn try_floor_u64(&self) -> Result<u64, RiskError> {
        to_u64(self.raw / self.scale.one())
    }

    /// Compare two values of the same scale
    pub fn try_cmp(&self, rhs: &Self) -> Result<Ordering, RiskError> {
        same_scale(self, rhs)?;
        Ok(self.raw.cmp(&rhs.raw))
    }

    /// Smaller of two values of the same scale
    pub fn try_min(self, rhs: Self) -> Result<Self, RiskError> {
        Ok(match self.try_cmp(&rhs)? {
            Ordering::Greater => rhs,
            _ => self,
        })
    }

    /// `self - rhs`, clamped at zero
    pub fn saturating_sub(self, rhs: Self) -> Result<Self, RiskError> {
        same_scale(&self, &rhs)?;
        Ok(Self::from_raw(self.raw.saturating_sub(rhs.raw), self.scale))
    }
}

fn to_u64(value: U256) -> Result<u64, RiskError> {
    if value > U256::from(u64::MAX) {
        return Err(ErrorKind::MathOverflow.at("u64"));
    }
    Ok(value.as_u64())
}

fn same_scale(lhs: &FixedPoint, rhs: &FixedPoint) -> Result<(), RiskError> {
    if lhs.scale != rhs.scale {
        return Err(ErrorKind::ScaleMismatch.at("scale"));
    }
    Ok(())
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decimals = self.scale.decimals();
        let mut scaled_val = self.raw.to_string();
        if scaled_val.len() <= decimals {
            scaled_val.insert_str(0, &"0".repeat(decimals - scaled_val.len()));
            scaled_val.insert_str(0, "0.");
        } else {
            scaled_val.insert(scaled_val.len() - decimals, '.');
        }
        f.write_str(&scaled_val)
    }
}

impl TryAdd for FixedPoint {
    fn try_add(self, rhs: Self) -> Result<Self, RiskError> {
        same_scale(&self, &rhs)?;
        let raw = self
            .raw
            .checked_add(rhs.raw)
            .ok_or(ErrorKind::MathOverflow.at("add"))?;
        Ok(Self::from_raw(raw, self.scale))
    }
}

impl TrySub for FixedPoint {
    fn try_sub(self, rhs: Self) -> Result<Self, RiskError> {
        same_scale(&self, &rhs)?;
        let raw = self
            .raw
            .checked_sub(rhs.raw)
            .ok_or(ErrorKind::MathOverflow.at("sub"))?;
        Ok(Self::from_raw(raw, self.scale))
    }
}

impl TryMul<u64> for FixedPoint {
    fn try_mul(self, rhs: u64) -> Result<Self, RiskError> {
        let raw = self
            .raw
            .checked_mul(U256::from(rhs))
            .ok_or(ErrorKind::MathOverflow.at("mul"))?;
        Ok(Self::from_raw(raw, self.scale))
    }
}

/// Keeps the left operand's scale and divides out the right operand's.
impl TryMul<FixedPoint> for FixedPoint {
    fn try_mul(self, rhs: Self) -> Result<Self, RiskError> {
        let raw = mul_div(self.raw, rhs.raw, rhs.scale.one())?;
        Ok(Self::from_raw(raw, self.scale))
    }
}

impl TryDiv<u64> for FixedPoint {
    fn try_div(self, rhs: u64) -> Result<Self, RiskError> {
        if rhs == 0 {
            return Err(ErrorKind::DivisionByZero.at("div"));
        }
        Ok(Self::from_raw(self.raw / U256::from(rhs), self.scale))
    }
}

/// Keeps the left operand's scale.
impl TryDiv<FixedPoint> for FixedPoint {
    fn try_div(self, rhs: Self) -> Result<Self, RiskError> {
        if rhs.is_zero() {
            return Err(ErrorKind::DivisionByZero.at("div"));
        }
        let raw = mul_div(self.raw, rhs.scale.one(), rhs.raw)?;
        Ok(Self::from_raw(raw, self.scale))
    }
}

// Casper bytesrepr: raw value followed by a one byte scale tag.
impl ToBytes for FixedPoint {
    fn to_bytes(&self) -> Result<Vec<u8>, bytesrepr::Error> {
        let mut bytes = self.raw.to_bytes()?;
        bytes.push(self.scale.tag());
        Ok(bytes)
    }

    fn serialized_length(&self) -> usize {
        self.raw.serialized_length() + 1
    }
}

impl FromBytes for FixedPoint {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), bytesrepr::Error> {
        let (raw, remainder) = U256::from_bytes(bytes)?;
        let (tag, remainder) = u8::from_bytes(remainder)?;
        let scale = Scale::from_tag(tag).ok_or(bytesrepr::Error::Formatting)?;
        Ok((FixedPoint::from_raw(raw, scale), remainder))
    }
}

impl CLTyped for FixedPoint {
    fn cl_type() -> CLType {
        CLType::Any
    }
}

#[derive(Serialize, Deserialize)]
struct FixedPointRepr {
    raw: String,
    scale: Scale,
}

impl Serialize for FixedPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FixedPointRepr {
            raw: self.raw.to_string(),
            scale: self.scale,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FixedPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = FixedPointRepr::deserialize(deserializer)?;
        if repr.raw.is_empty() || !repr.raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(de::Error::custom("raw must be a non-negative decimal integer"));
        }
        let raw = U256::from_dec_str(&repr.raw).map_err(|_| de::Error::custom("raw overflows 256 bits"))?;
        Ok(FixedPoint::from_raw(raw, repr.scale))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn wad(text: &str) -> FixedPoint {
        FixedPoint::parse_decimal(text, Scale::Wad).unwrap()
    }

    #[test]
    fn display_pads_small_values() {
        assert_eq!(FixedPoint::wad(1u64).to_decimal_string(), "0.000000000000000001");
        assert_eq!(FixedPoint::zero(Scale::Ray).to_string(), "0.000000000000000000000000000");
        assert_eq!(wad("1234.5").to_string(), "1234.500000000000000000");
    }

    #[test]
    fn parse_accepts_plain_decimals() {
        assert_eq!(wad("2").raw(), U256::from(2 * WAD));
        assert_eq!(wad(".5").raw(), U256::from(WAD / 2));
        assert_eq!(wad("7.").raw(), U256::from(7 * WAD));
        assert_eq!(wad("0.100000000000000000000").raw(), U256::from(WAD / 10));
        assert!(wad("000").is_zero());
    }

    #[test]
    fn parse_rejects_bad_input() {
        for text in ["", ".", "-1", "+1", "1e18", "NaN", "inf", "1.2.3", "12a"] {
            let err = FixedPoint::parse_decimal(text, Scale::Wad).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidInput, "{text}");
        }
        let err = FixedPoint::parse_decimal("0.0000000000000000001", Scale::Wad).unwrap_err();
        assert_eq!(err.kind, ErrorKind::PrecisionLoss);
        let too_big = "9".repeat(80);
        let err = FixedPoint::parse_decimal(&too_big, Scale::Wad).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MathOverflow);
    }

    #[test]
    fn from_f64_fails_fast_on_non_finite() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.5] {
            let err = FixedPoint::from_f64(value, Scale::Wad).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidInput);
        }
        assert_eq!(FixedPoint::from_f64(1.5, Scale::Wad).unwrap(), wad("1.5"));
    }

    #[test]
    fn rescale_is_strict() {
        let one_and_a_bit = FixedPoint::ray(U256::from(RAY) + U256::one());
        let err = one_and_a_bit.rescale(Scale::Wad).unwrap_err();
        assert_eq!(err.kind, ErrorKind::PrecisionLoss);

        let x = wad("3.25");
        let up = x.rescale(Scale::Ray).unwrap();
        assert_eq!(up.raw(), x.raw() * U256::from(WAD_TO_RAY));
        assert_eq!(up.rescale(Scale::Wad).unwrap(), x);
    }

    #[test]
    fn mixed_scale_arithmetic() {
        let two = wad("2");
        let half_ray = FixedPoint::ray(U256::from(RAY / 2));
        assert_eq!(two.try_mul(half_ray).unwrap(), wad("1"));
        assert_eq!(two.try_div(half_ray).unwrap(), wad("4"));
        let err = two.try_add(half_ray).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ScaleMismatch);
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(wad("2.5").try_round_u64().unwrap(), 3);
        assert_eq!(wad("2.4").try_round_u64().unwrap(), 2);
        assert_eq!(wad("2.1").try_ceil_u64().unwrap(), 3);
        assert_eq!(wad("2.9").try_floor_u64().unwrap(), 2);
        let huge = FixedPoint::wad(U256::MAX);
        assert_eq!(huge.try_floor_u64().unwrap_err().kind, ErrorKind::MathOverflow);
    }

    #[test]
    fn to_f64_is_close() {
        assert!((wad("1234.5").to_f64() - 1234.5).abs() < 1e-9);
    }

    #[test]
    fn bytesrepr_keeps_scale() {
        let value = FixedPoint::ray(U256::from(RAY) * U256::from(3u64));
        let bytes = value.to_bytes().unwrap();
        assert_eq!(bytes.len(), value.serialized_length());
        let (decoded, rest) = FixedPoint::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, value);
        assert!(rest.is_empty());
    }

    #[test]
    fn serde_uses_decimal_strings() {
        let value = wad("1.5");
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"raw":"1500000000000000000","scale":"wad"}"#);
        assert_eq!(serde_json::from_str::<FixedPoint>(&json).unwrap(), value);
        assert!(serde_json::from_str::<FixedPoint>(r#"{"raw":"-1","scale":"wad"}"#).is_err());
    }
}
