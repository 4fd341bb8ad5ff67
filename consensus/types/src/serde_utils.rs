//! Serde helpers for the JSON representation of consensus objects.
//!
//! Integers are quoted decimal strings and byte arrays are 0x-prefixed hex, matching the Beacon
//! API conventions.

/// Serialize a `u64` as a decimal string; accept either a string or a number on the way in.
pub mod quoted_u64 {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    struct QuotedIntVisitor;

    impl<'de> Visitor<'de> for QuotedIntVisitor {
        type Value = u64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a quoted or unquoted u64")
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.parse()
                .map_err(|e| de::Error::custom(format!("invalid u64 {:?}: {}", s, e)))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }
    }

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(QuotedIntVisitor)
    }
}

/// Serialize a `U256` as a decimal string.
pub mod quoted_u256 {
    use crate::Uint256;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Uint256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Uint256, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uint256::from_dec_str(&s).map_err(|e| D::Error::custom(format!("invalid u256: {:?}", e)))
    }
}

/// Serialize a `[u8; N]` as a 0x-prefixed hex string of exactly `N` bytes.
pub mod bytes_hex {
    use serde::de::Error;
    use serde::{Deserializer, Serializer};
    use ssz_types::serde_utils::hex::{encode, PrefixedHexVisitor};

    pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&encode(bytes))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let decoded = deserializer.deserialize_str(PrefixedHexVisitor)?;
        <[u8; N]>::try_from(decoded.as_slice()).map_err(|_| {
            D::Error::custom(format!(
                "expected {} bytes, got {}",
                N,
                decoded.len()
            ))
        })
    }
}
