//! # End-of-Epoch Dispatcher
//!
//! Replay seluruh antrian satu epoch ke staking state machine.
//!
//! ## Alur
//!
//! ```text
//!   drain(epoch) ──▶ [q1, q2, ..., qN]
//!                      │
//!                      ▼  (berurutan, FIFO)
//!               apply_msg(handler, q.msg)
//!                      │
//!          ┌───────────┴───────────┐
//!          ▼                       ▼
//!        Ok(())              Err(StakingError)
//!     outcome.applied        outcome.error + warn!
//!          │                       │
//!          └───────────┬───────────┘
//!                      ▼
//!               lanjut ke q(i+1)
//! ```
//!
//! Setiap panggilan handler atomic: error berarti tidak ada side effect.
//! Kegagalan satu envelope tidak menghentikan envelope berikutnya.

use epoching_proto::{
    Interface, MsgBeginRedelegate, MsgCancelUnbondingDelegation, MsgCreateValidator, MsgDelegate,
    MsgUndelegate, QueuedMessage, StakingMsg, MSG_ID_SIZE,
};
use tracing::{info, warn};

use crate::error::{Result, StakingError};
use crate::store::{EpochQueueStore, KvStore};

/// Staking state machine eksternal.
///
/// Implementasi wajib atomic per panggilan: jika return `Err`, state tidak
/// boleh berubah sama sekali.
pub trait StakingHandler {
    fn delegate(&mut self, msg: &MsgDelegate) -> std::result::Result<(), StakingError>;

    fn undelegate(&mut self, msg: &MsgUndelegate) -> std::result::Result<(), StakingError>;

    fn begin_redelegate(&mut self, msg: &MsgBeginRedelegate)
        -> std::result::Result<(), StakingError>;

    fn cancel_unbonding_delegation(
        &mut self,
        msg: &MsgCancelUnbondingDelegation,
    ) -> std::result::Result<(), StakingError>;

    fn create_validator(&mut self, msg: &MsgCreateValidator)
        -> std::result::Result<(), StakingError>;
}

/// Route satu command ke method handler yang sesuai.
pub fn apply_msg<H: StakingHandler + ?Sized>(
    handler: &mut H,
    msg: &StakingMsg,
) -> std::result::Result<(), StakingError> {
    match msg {
        StakingMsg::Delegate(m) => handler.delegate(m),
        StakingMsg::Undelegate(m) => handler.undelegate(m),
        StakingMsg::BeginRedelegate(m) => handler.begin_redelegate(m),
        StakingMsg::CancelUnbondingDelegation(m) => handler.cancel_unbonding_delegation(m),
        StakingMsg::CreateValidator(m) => handler.create_validator(m),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// REPORT
// ════════════════════════════════════════════════════════════════════════════════

/// Hasil replay satu envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayOutcome {
    pub id: u64,
    pub tx_id: Vec<u8>,
    pub msg_id: [u8; MSG_ID_SIZE],
    pub type_url: &'static str,
    pub error: Option<StakingError>,
}

impl ReplayOutcome {
    fn new(qmsg: &QueuedMessage, error: Option<StakingError>) -> Self {
        Self {
            id: qmsg.id,
            tx_id: qmsg.tx_id.clone(),
            msg_id: qmsg.msg_id,
            type_url: qmsg.msg.type_url(),
            error,
        }
    }

    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.error.is_none()
    }
}

/// Ringkasan replay satu epoch, urut sesuai FIFO.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpochReplayReport {
    pub epoch: u64,
    pub outcomes: Vec<ReplayOutcome>,
}

impl EpochReplayReport {
    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.applied_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReplayOutcome> + '_ {
        self.outcomes.iter().filter(|o| !o.is_applied())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// REPLAY
// ════════════════════════════════════════════════════════════════════════════════

/// Drain `epoch` lalu apply setiap envelope ke `handler`.
///
/// Error hanya muncul dari drain (epoch sudah closed, epoch sebelumnya
/// belum di-drain, atau storage rusak). Penolakan handler dicatat di report.
pub fn replay_epoch<S, H>(
    store: &mut EpochQueueStore<S>,
    epoch: u64,
    handler: &mut H,
) -> Result<EpochReplayReport>
where
    S: KvStore,
    H: StakingHandler + ?Sized,
{
    let queued = store.drain(epoch)?;
    let mut outcomes = Vec::with_capacity(queued.len());

    for qmsg in &queued {
        let result = apply_msg(handler, &qmsg.msg);
        if let Err(err) = &result {
            warn!(
                epoch,
                id = qmsg.id,
                msg_id = %qmsg.msg_id_hex(),
                type_url = qmsg.msg.type_url(),
                error = %err,
                "queued message failed"
            );
        }
        outcomes.push(ReplayOutcome::new(qmsg, result.err()));
    }

    let report = EpochReplayReport { epoch, outcomes };
    info!(
        epoch,
        total = report.outcomes.len(),
        applied = report.applied_count(),
        failed = report.failed_count(),
        "epoch replayed"
    );
    Ok(report)
}
