//! The filter state as one unsigned integer, for storage outside this crate.
//!
//! Bit `i` of the integer is set iff array position `i` is set. Nothing else
//! is encoded: whoever stores a [`RawValue`] also has to remember the
//! `(expected_members, false_positive_rate)` pair that produced it.

use crate::bits::le_bit_len;
use crate::errors::{BloomError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Canonical little-endian bytes: no high zero bytes, zero is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RawValue(Vec<u8>);

impl RawValue {
    pub fn zero() -> Self { Self(Vec::new()) }

    pub fn from_le_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let mut v = bytes.into();
        while v.last() == Some(&0) {
            v.pop();
        }
        Self(v)
    }

    pub fn as_le_bytes(&self) -> &[u8] { &self.0 }

    pub fn into_le_bytes(self) -> Vec<u8> { self.0 }

    pub fn is_zero(&self) -> bool { self.0.is_empty() }

    /// Position of the highest set bit + 1; zero for the empty filter.
    pub fn bit_len(&self) -> u64 { le_bit_len(&self.0) }

    pub fn bit(&self, idx: u64) -> bool {
        let byte = (idx / 8) as usize;
        self.0.get(byte).is_some_and(|&b| b & (1u8 << (idx % 8)) != 0)
    }

    /// Lowercase hex, most significant digit first, no leading zeros.
    pub fn to_hex(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let be: Vec<u8> = self.0.iter().rev().copied().collect();
        let s = hex::encode(be);
        match s.strip_prefix('0') {
            Some(rest) => rest.to_string(),
            None => s,
        }
    }

    /// Parses hex text. An `0x` prefix and a trailing `L` (legacy long
    /// formatting) are accepted; anything else non-hex is an error.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        let s = s.strip_suffix('L').or_else(|| s.strip_suffix('l')).unwrap_or(s);
        if s.is_empty() {
            return Err(BloomError::Hex(hex::FromHexError::InvalidStringLength));
        }
        let padded;
        let even = if s.len() % 2 == 1 {
            padded = format!("0{s}");
            padded.as_str()
        } else {
            s
        };
        let mut bytes = hex::decode(even)?;
        bytes.reverse();
        Ok(Self::from_le_bytes(bytes))
    }
}

impl fmt::LowerHex for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&self.to_hex())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:#x}")
    }
}

impl FromStr for RawValue {
    type Err = BloomError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        RawValue::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
