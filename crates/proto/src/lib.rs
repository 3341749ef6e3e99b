//! # Epoching Proto Crate
//!
//! Proto crate adalah definisi schema untuk staking command yang ditunda
//! sampai akhir epoch, beserta interface registry dan codec polymorphic-nya.
//!
//! ## Module Overview
//!
//! Crate ini menyediakan:
//! - Inner staking command (`MsgDelegate`, `MsgCreateValidator`, ...) dengan
//!   validasi struktural
//! - Wrapped message yang menjadi pintu masuk user
//! - `QueuedMessage`, envelope durable di antrian epoch
//! - Interface registry: type URL → concrete Rust type
//! - Codec yang encode/decode value sebagai `Any` tanpa kehilangan type
//!
//! ## Architecture Overview
//!
//! ```text
//!        user tx                         end of epoch
//!           │                                 ▲
//!           ▼                                 │
//!   ┌────────────────┐   unwrap   ┌────────────────────┐
//!   │  WrappedMsg    │──────────▶│  QueuedMessage     │
//!   │ (validate)     │            │ id, tx_id, msg_id  │
//!   └────────────────┘            │ msg: StakingMsg    │
//!                                 └─────────┬──────────┘
//!                                           │
//!                     ┌─────────────────────┼──────────────────────┐
//!                     ▼                     ▼                      ▼
//!             ┌──────────────┐    ┌──────────────────┐   ┌─────────────────┐
//!             │ ProtoCodec   │───▶│ InterfaceRegistry│──▶│ UnpackInterfaces│
//!             │ Any + bincode│    │ type URL → type  │   │ nested PubKey   │
//!             └──────────────┘    └──────────────────┘   └─────────────────┘
//! ```
//!
//! ## Determinism
//!
//! Semua encoding memakai bincode dan `msg_id` memakai SHA3-256 atas
//! encoding inner command, sehingga hasilnya identik di semua node.

// ════════════════════════════════════════════════════════════════════════════════
// MODULE DECLARATIONS
// ════════════════════════════════════════════════════════════════════════════════

/// Interface registry, `Any`, dan trait interface.
#[macro_use]
pub mod registry;

/// Validation dan codec error types.
pub mod error;

/// Address dan coin.
pub mod types;

/// Public key types.
pub mod crypto;

/// Inner staking commands.
pub mod staking;

/// Epoch-deferred wrapped messages.
pub mod wrapped;

/// Queued message envelope.
pub mod queued;

/// Polymorphic codec.
pub mod codec;

// ════════════════════════════════════════════════════════════════════════════════
// RE-EXPORTS
// ════════════════════════════════════════════════════════════════════════════════

pub use codec::ProtoCodec;
pub use crypto::{Ed25519PubKey, PubKey, ED25519_PUBKEY_SIZE};
pub use error::{CodecError, KeyError, MsgError};
pub use queued::{QueuedMessage, MSG_ID_SIZE};
pub use registry::{Any, AnyValue, Interface, InterfaceRegistry, TypeUrl, UnpackInterfaces};
pub use staking::{
    CommissionRates, Description, Msg, MsgBeginRedelegate, MsgCancelUnbondingDelegation,
    MsgCreateValidator, MsgDelegate, MsgUndelegate, StakingMsg, MAX_COMMISSION_BPS,
};
pub use types::{Address, Coin, ADDRESS_SIZE, DEFAULT_BOND_DENOM};
pub use wrapped::{
    MsgWrappedBeginRedelegate, MsgWrappedCancelUnbondingDelegation, MsgWrappedDelegate,
    MsgWrappedUndelegate, WrappedMsg,
};

// ════════════════════════════════════════════════════════════════════════════════
// CONSTANTS
// ════════════════════════════════════════════════════════════════════════════════

/// Proto crate version string.
pub const PROTO_VERSION: &str = "0.1";
