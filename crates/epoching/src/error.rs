//! Error types untuk epoching crate.
//!
//! | Type | Kapan muncul |
//! |------|--------------|
//! | [`EpochingError`] | Admisi, antrian epoch, atau konfigurasi gagal |
//! | [`StakingError`] | Staking handler menolak command saat replay |
//! | [`StoreError`] | Backend key-value gagal |
//!
//! `StakingError` tidak pernah menggagalkan satu epoch: error dicatat per
//! envelope di replay report.

use epoching_proto::{CodecError, MsgError};
use thiserror::Error;

/// Result alias untuk operasi epoching.
pub type Result<T> = std::result::Result<T, EpochingError>;

// ════════════════════════════════════════════════════════════════════════════════
// EPOCHING ERROR
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EpochingError {
    /// Validasi struktural message gagal.
    #[error("invalid message: {0}")]
    Msg(#[from] MsgError),

    /// Registry/codec error.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Denom coin tidak sama dengan bond denom.
    #[error("invalid coin denomination: got {got}, expected {expected}")]
    InvalidDenom { expected: String, got: String },

    /// Epoch sudah di-drain, tidak menerima message baru.
    #[error("epoch {epoch} is closed (last drained epoch {last_drained})")]
    EpochClosed { epoch: u64, last_drained: u64 },

    /// Epoch sudah pernah di-drain.
    #[error("epoch {epoch} already drained (last drained epoch {last_drained})")]
    EpochAlreadyDrained { epoch: u64, last_drained: u64 },

    /// Epoch sebelumnya masih punya message di antrian.
    #[error("cannot drain epoch {epoch}: earlier epoch {pending} still has queued messages")]
    EarlierEpochPending { epoch: u64, pending: u64 },

    /// Konfigurasi tidak valid.
    #[error("invalid config: {0}")]
    Config(String),

    /// Backend storage gagal.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ════════════════════════════════════════════════════════════════════════════════
// STORE ERROR
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("store error: {0}")]
pub struct StoreError(pub String);

// ════════════════════════════════════════════════════════════════════════════════
// STAKING ERROR
// ════════════════════════════════════════════════════════════════════════════════

/// Penolakan dari staking state machine saat command diterapkan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StakingError {
    #[error("validator {0} not found")]
    ValidatorNotFound(String),

    #[error("validator {0} already exists")]
    ValidatorExists(String),

    #[error(
        "insufficient delegation from {delegator} to {validator}: requested {requested}, available {available}"
    )]
    InsufficientDelegation {
        delegator: String,
        validator: String,
        requested: u128,
        available: u128,
    },

    #[error("no unbonding entry for {delegator} on {validator} at height {creation_height}")]
    UnbondingEntryNotFound {
        delegator: String,
        validator: String,
        creation_height: i64,
    },

    /// Penolakan lain dari handler.
    #[error("staking command rejected: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_msg_error() {
        let err: EpochingError = MsgError::SelfRedelegation.into();
        assert_eq!(err, EpochingError::Msg(MsgError::SelfRedelegation));
        assert!(err.to_string().contains("source and destination"));
    }

    #[test]
    fn test_display_messages() {
        let err = EpochingError::EarlierEpochPending { epoch: 5, pending: 4 };
        assert_eq!(
            err.to_string(),
            "cannot drain epoch 5: earlier epoch 4 still has queued messages"
        );
        let err = EpochingError::from(StoreError("disk gone".to_string()));
        assert_eq!(err.to_string(), "store error: disk gone");
    }
}
