//! Collateral type identifiers (`ilk`).

use {
    crate::error::{ErrorKind, RiskError},
    serde::{de, Deserialize, Deserializer, Serialize, Serializer},
    std::{fmt, str::FromStr},
};

/// 32-byte collateral type identifier (`ilk`), an ASCII name right-padded
/// with zero bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollateralType([u8; 32]);

impl CollateralType {
    /// Pad an ASCII name of 1 to 32 graphic characters.
    pub fn new(name: &str) -> Result<Self, RiskError> {
        if name.is_empty() || name.len() > 32 || !name.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(ErrorKind::InvalidInput.at("collateral_type"));
        }
        let mut bytes = [0u8; 32];
        bytes[..name.len()].copy_from_slice(name.as_bytes());
        Ok(Self(bytes))
    }

    /// Wrap a raw bytes32 as read from a contract
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw bytes32
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The name, when the bytes are an ASCII name followed only by zero
    /// padding. `None` for any other bytes32.
    pub fn readable_name(&self) -> Option<&str> {
        let end = self.0.iter().position(|b| *b == 0).unwrap_or(32);
        let (name, padding) = self.0.split_at(end);
        if name.is_empty() || !name.iter().all(u8::is_ascii_graphic) || padding.iter().any(|b| *b != 0) {
            return None;
        }
        std::str::from_utf8(name).ok()
    }

    /// `0x`-prefixed bytes32 as passed to contract calls
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse a `0x`-prefixed bytes32.
    pub fn from_hex(text: &str) -> Result<Self, RiskError> {
        let digits = text.strip_prefix("0x").unwrap_or(text);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| ErrorKind::InvalidInput.at("collateral_type"))?;
        Ok(Self(bytes))
    }
}

/// The name when readable, the bytes32 hex otherwise.
impl fmt::Display for CollateralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.readable_name() {
            Some(name) => f.write_str(name),
            None => f.write_str(&self.to_hex()),
        }
    }
}

impl fmt::Debug for CollateralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CollateralType({self})")
    }
}

impl FromStr for CollateralType {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") && s.len() == 66 {
            Self::from_hex(s)
        } else {
            Self::new(s)
        }
    }
}

impl Serialize for CollateralType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CollateralType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ETH_A: &str = "0x4554482d41000000000000000000000000000000000000000000000000000000";

    #[test]
    fn eth_a_matches_bytes32() {
        let ilk = CollateralType::new("ETH-A").unwrap();
        assert_eq!(ilk.to_hex(), ETH_A);
        assert_eq!(ETH_A.parse::<CollateralType>().unwrap(), ilk);
        assert_eq!(ilk.to_string(), "ETH-A");
    }

    #[test]
    fn rejects_bad_names() {
        assert!(CollateralType::new("").is_err());
        assert!(CollateralType::new("ETH A").is_err());
        assert!(CollateralType::new(&"X".repeat(33)).is_err());
        assert!(CollateralType::from_hex("0x1234").is_err());
    }

    #[test]
    fn unreadable_ilk_round_trips_as_hex() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xff;
        let binary = CollateralType::from_bytes(bytes);
        assert_eq!(binary.readable_name(), None);
        let json = serde_json::to_string(&binary).unwrap();
        assert_eq!(json, format!("\"{}\"", binary.to_hex()));
        assert_eq!(serde_json::from_str::<CollateralType>(&json).unwrap(), binary);

        let mut bytes = [0u8; 32];
        bytes[..5].copy_from_slice(b"ETH\0A");
        let split = CollateralType::from_bytes(bytes);
        assert_eq!(split.readable_name(), None);
        let json = serde_json::to_string(&split).unwrap();
        assert_eq!(serde_json::from_str::<CollateralType>(&json).unwrap(), split);
        assert_ne!(split, CollateralType::new("ETH").unwrap());
    }

    #[test]
    fn serde_uses_name() {
        let ilk = CollateralType::new("WBTC-B").unwrap();
        let json = serde_json::to_string(&ilk).unwrap();
        assert_eq!(json, r#""WBTC-B""#);
        assert_eq!(serde_json::from_str::<CollateralType>(&json).unwrap(), ilk);
    }
}
