//! Primitive types shared by staking messages: addresses and coins.

use hex::{decode as hex_decode, encode as hex_encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::MsgError;

/// Denom yang dipakai untuk bonding secara default.
pub const DEFAULT_BOND_DENOM: &str = "ubbn";

/// Panjang address dalam bytes.
pub const ADDRESS_SIZE: usize = 20;

// ════════════════════════════════════════════════════════════════════════════════
// ADDRESS
// ════════════════════════════════════════════════════════════════════════════════

/// Address is 20 bytes (first 20 bytes of SHA3-512(pubkey))
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; ADDRESS_SIZE]);

impl Address {
    pub fn from_bytes(b: [u8; ADDRESS_SIZE]) -> Self {
        Address(b)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex_encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex_decode(s).map_err(|e| e.to_string())?;
        if bytes.len() != ADDRESS_SIZE {
            return Err(format!("invalid address length: {}", bytes.len()));
        }
        let mut arr = [0u8; ADDRESS_SIZE];
        arr.copy_from_slice(&bytes);
        Ok(Address(arr))
    }

    /// Parse address dari field message, dengan nama field di error.
    pub fn parse_field(field: &'static str, s: &str) -> Result<Self, MsgError> {
        if s.is_empty() {
            return Err(MsgError::EmptyAddress { field });
        }
        Address::from_hex(s).map_err(|reason| MsgError::InvalidAddress { field, reason })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Address").field(&self.to_hex()).finish()
    }
}

impl FromStr for Address {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_hex(s)
    }
}

/* --- serde serialize/deserialize for Address as hex string --- */
impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// COIN
// ════════════════════════════════════════════════════════════════════════════════

/// Jumlah token dalam satu denom (smallest units).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    /// Denom valid: 3-128 chars, diawali huruf ASCII, sisanya alfanumerik
    /// atau salah satu dari `/ : . _ -`.
    #[must_use]
    pub fn is_valid_denom(denom: &str) -> bool {
        let len = denom.len();
        if !(3..=128).contains(&len) {
            return false;
        }
        let mut chars = denom.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'))
    }

    /// Coin harus punya denom valid dan amount > 0.
    pub fn validate_positive(&self, field: &'static str) -> Result<(), MsgError> {
        if !Self::is_valid_denom(&self.denom) {
            return Err(MsgError::InvalidDenom {
                field,
                denom: self.denom.clone(),
            });
        }
        if !self.is_positive() {
            return Err(MsgError::NonPositiveAmount { field });
        }
        Ok(())
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}
