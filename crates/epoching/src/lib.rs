//! # Epoching
//!
//! Module yang menunda staking command (delegate, undelegate, redelegate,
//! cancel unbonding, create validator) sampai akhir epoch.
//!
//! ## Alur
//!
//! ```text
//!   Keeper::wrapped_msg ─┐
//!   Keeper::create_validator ─┤ validate_basic + bond denom
//!                        ▼
//!              EpochQueueStore::enqueue(epoch)
//!                        │
//!                 ... epoch berjalan ...
//!                        │
//!                        ▼
//!   Keeper::end_epoch ──▶ replay_epoch ──▶ StakingHandler
//!                        │
//!                        ▼
//!              EpochReplayReport + events
//! ```
//!
//! Eksekusi single-threaded dan deterministik: urutan replay sama dengan
//! urutan admisi, dan storage memakai iterasi terurut.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod keeper;
pub mod logging;
pub mod store;

pub use config::{load_from_file, EpochingConfig, DEFAULT_EPOCH_INTERVAL};
pub use dispatcher::{apply_msg, replay_epoch, EpochReplayReport, ReplayOutcome, StakingHandler};
pub use error::{EpochingError, Result, StakingError, StoreError};
pub use events::EpochingEvent;
pub use keeper::Keeper;
pub use logging::init_tracing;
pub use store::{BatchOp, EpochQueueStore, KvStore, MemStore};
