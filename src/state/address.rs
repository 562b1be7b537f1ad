//! Vault owner addresses.

use {
    crate::error::{ErrorKind, RiskError},
    serde::{de, Deserialize, Deserializer, Serialize, Serializer},
    std::{fmt, str::FromStr},
};

/// 20-byte account address of a vault owner
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// Wrap raw address bytes
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// True for the all-zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl FromStr for Address {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .ok_or(ErrorKind::InvalidInput.at("address"))?;
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| ErrorKind::InvalidInput.at("address"))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_mixed_case_hex() {
        let addr: Address = "0x00000000000000000000000000000000DeaDBeef".parse().unwrap();
        assert_eq!(addr.to_string(), "0x00000000000000000000000000000000deadbeef");
        assert!(!addr.is_zero());
        assert!(Address::default().is_zero());
    }

    #[test]
    fn rejects_malformed() {
        for text in ["deadbeef", "0x1234", "0xzz00000000000000000000000000000000000000"] {
            let err = text.parse::<Address>().unwrap_err();
            assert_eq!(err, ErrorKind::InvalidInput.at("address"));
        }
    }
}
