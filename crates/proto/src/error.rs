//! # Error Types
//!
//! Module ini mendefinisikan kategori error untuk proto crate:
//!
//! | Type | Kapan muncul |
//! |------|--------------|
//! | [`MsgError`] | Validasi struktural message (`validate_basic`) gagal |
//! | [`CodecError`] | Registry/codec tidak bisa merepresentasikan atau membaca value |
//! | [`KeyError`] | Bytes bukan public/secret key yang valid |
//!
//! `MsgError` adalah admission error: message ditolak sebelum masuk antrian.
//! `CodecError` umumnya adalah defect konfigurasi (type belum di-register),
//! kecuali `DecodeFailed` yang bisa dipicu oleh bytes rusak.

use std::fmt;

// ════════════════════════════════════════════════════════════════════════════════
// MSG ERROR
// ════════════════════════════════════════════════════════════════════════════════

/// Error hasil validasi struktural sebuah staking message.
///
/// Setiap varian menjelaskan secara eksplisit kondisi yang gagal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MsgError {
    /// Wrapper tidak membawa inner message.
    MissingInnerMsg,

    /// Field address kosong.
    EmptyAddress { field: &'static str },

    /// Field address tidak bisa di-parse.
    InvalidAddress { field: &'static str, reason: String },

    /// Denom coin tidak valid.
    InvalidDenom { field: &'static str, denom: String },

    /// Amount coin nol.
    NonPositiveAmount { field: &'static str },

    /// Source dan destination validator sama.
    SelfRedelegation,

    /// Creation height unbonding entry harus positif.
    InvalidCreationHeight(i64),

    /// Create-validator tanpa public key.
    EmptyValidatorPubKey,

    /// Create-validator dengan description kosong.
    EmptyDescription,

    /// Commission rates tidak konsisten.
    InvalidCommission(&'static str),

    /// Minimum self delegation harus positif.
    NonPositiveMinSelfDelegation,

    /// Self delegation lebih kecil dari minimum yang dideklarasikan.
    SelfDelegationBelowMinimum { value: u128, min: u128 },
}

impl fmt::Display for MsgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MsgError::MissingInnerMsg => write!(f, "wrapped message holds no inner message"),
            MsgError::EmptyAddress { field } => write!(f, "empty address in field '{}'", field),
            MsgError::InvalidAddress { field, reason } => {
                write!(f, "invalid address in field '{}': {}", field, reason)
            }
            MsgError::InvalidDenom { field, denom } => {
                write!(f, "invalid denom '{}' in field '{}'", denom, field)
            }
            MsgError::NonPositiveAmount { field } => {
                write!(f, "amount in field '{}' must be positive", field)
            }
            MsgError::SelfRedelegation => {
                write!(f, "source and destination validator must differ")
            }
            MsgError::InvalidCreationHeight(height) => {
                write!(f, "invalid unbonding creation height {}", height)
            }
            MsgError::EmptyValidatorPubKey => write!(f, "empty validator public key"),
            MsgError::EmptyDescription => write!(f, "empty validator description"),
            MsgError::InvalidCommission(reason) => write!(f, "invalid commission rates: {}", reason),
            MsgError::NonPositiveMinSelfDelegation => {
                write!(f, "minimum self delegation must be positive")
            }
            MsgError::SelfDelegationBelowMinimum { value, min } => write!(
                f,
                "self delegation {} is below the minimum self delegation {}",
                value, min
            ),
        }
    }
}

impl std::error::Error for MsgError {}

// ════════════════════════════════════════════════════════════════════════════════
// CODEC ERROR
// ════════════════════════════════════════════════════════════════════════════════

/// Error dari interface registry dan codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Type URL belum di-register.
    UnregisteredType(String),

    /// Type URL sudah di-register untuk Rust type yang berbeda.
    ConflictingRegistration(String),

    /// Wrapper kosong tidak bisa dijadikan queued message.
    EmptyWrappedMsg(&'static str),

    /// Interface ini tidak boleh masuk antrian epoch.
    UnqueueableMsgType(String),

    /// Nested `Any` resolve ke interface yang salah.
    InterfaceMismatch { expected: &'static str, type_url: String },

    /// Serialization gagal.
    EncodeFailed(String),

    /// Deserialization gagal.
    DecodeFailed(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::UnregisteredType(url) => write!(f, "type '{}' is not registered", url),
            CodecError::ConflictingRegistration(url) => {
                write!(f, "type url '{}' is already registered to a different type", url)
            }
            CodecError::EmptyWrappedMsg(url) => {
                write!(f, "cannot queue '{}' without an inner message", url)
            }
            CodecError::UnqueueableMsgType(url) => {
                write!(f, "type '{}' cannot be queued for epoch execution", url)
            }
            CodecError::InterfaceMismatch { expected, type_url } => write!(
                f,
                "type '{}' does not implement the {} interface",
                type_url, expected
            ),
            CodecError::EncodeFailed(reason) => write!(f, "encode failed: {}", reason),
            CodecError::DecodeFailed(reason) => write!(f, "decode failed: {}", reason),
        }
    }
}

impl std::error::Error for CodecError {}

// ════════════════════════════════════════════════════════════════════════════════
// KEY ERROR
// ════════════════════════════════════════════════════════════════════════════════

/// Error parsing key material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Panjang bytes tidak sesuai.
    InvalidLength { expected: usize, got: usize },

    /// Bytes bukan curve point yang valid.
    InvalidPublicKey(String),

    /// Secret key ditolak oleh backend signature.
    InvalidSecretKey(String),
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::InvalidLength { expected, got } => {
                write!(f, "key must be {} bytes, got {}", expected, got)
            }
            KeyError::InvalidPublicKey(reason) => write!(f, "invalid public key: {}", reason),
            KeyError::InvalidSecretKey(reason) => write!(f, "invalid secret key: {}", reason),
        }
    }
}

impl std::error::Error for KeyError {}

impl From<bincode::Error> for CodecError {
    fn from(err: bincode::Error) -> Self {
        CodecError::DecodeFailed(err.to_string())
    }
}
