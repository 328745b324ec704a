//! Serialization implementations for lodestake-types
//!
//! This module provides serde and borsh implementations for all types.

use crate::*;

// Serde implementations
#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    // Address - human-readable Bech32m string form
    impl Serialize for Address {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            self.to_string().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Address {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Address::from_str(&s).map_err(serde::de::Error::custom)
        }
    }
}

// Borsh implementations
#[cfg(feature = "borsh")]
mod borsh_impls {
    use super::*;
    use borsh::{BorshDeserialize, BorshSerialize};

    // Address - stored as raw bytes
    impl BorshSerialize for Address {
        fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
            writer.write_all(self.as_bytes())
        }
    }

    impl BorshDeserialize for Address {
        fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
            let mut bytes = [0u8; 20];
            reader.read_exact(&mut bytes)?;
            Ok(Address::from_bytes(bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(feature = "serde")]
    fn test_address_serde_roundtrip() {
        let original = Address::from_bytes([1u8; 20]);
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("lode1"));
        let deserialized: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    #[cfg(feature = "borsh")]
    fn test_address_borsh_roundtrip() {
        let original = Address::from_bytes([1u8; 20]);
        let encoded = borsh::to_vec(&original).unwrap();
        assert_eq!(encoded.len(), Address::LEN);
        let deserialized: Address = borsh::from_slice(&encoded).unwrap();
        assert_eq!(original, deserialized);
    }
}
