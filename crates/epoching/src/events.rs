//! Events yang dikumpulkan keeper.
//!
//! Event admisi membawa `epoch_boundary`, yaitu height tempat command
//! benar-benar dieksekusi.

use epoching_proto::{
    MsgBeginRedelegate, MsgCancelUnbondingDelegation, MsgCreateValidator, MsgDelegate,
    MsgUndelegate, WrappedMsg, MSG_ID_SIZE,
};
use serde::{Deserialize, Serialize};

use crate::dispatcher::ReplayOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpochingEvent {
    WrappedDelegate {
        delegator_address: String,
        validator_address: String,
        amount: u128,
        denom: String,
        epoch_boundary: u64,
    },
    WrappedUndelegate {
        delegator_address: String,
        validator_address: String,
        amount: u128,
        denom: String,
        epoch_boundary: u64,
    },
    WrappedBeginRedelegate {
        delegator_address: String,
        source_validator_address: String,
        destination_validator_address: String,
        amount: u128,
        denom: String,
        epoch_boundary: u64,
    },
    WrappedCancelUnbondingDelegation {
        delegator_address: String,
        validator_address: String,
        amount: u128,
        denom: String,
        creation_height: i64,
        epoch_boundary: u64,
    },
    QueuedCreateValidator {
        validator_address: String,
        amount: u128,
        denom: String,
        epoch_boundary: u64,
    },
    /// Satu per envelope yang di-replay; `error` terisi jika gagal.
    HandleQueuedMsg {
        epoch: u64,
        id: u64,
        tx_id: Vec<u8>,
        msg_id: [u8; MSG_ID_SIZE],
        type_url: String,
        error: Option<String>,
    },
    EndEpoch {
        epoch: u64,
        applied: u64,
        failed: u64,
    },
}

impl EpochingEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            EpochingEvent::WrappedDelegate { .. } => "wrapped_delegate",
            EpochingEvent::WrappedUndelegate { .. } => "wrapped_undelegate",
            EpochingEvent::WrappedBeginRedelegate { .. } => "wrapped_begin_redelegate",
            EpochingEvent::WrappedCancelUnbondingDelegation { .. } => {
                "wrapped_cancel_unbonding_delegation"
            }
            EpochingEvent::QueuedCreateValidator { .. } => "queued_create_validator",
            EpochingEvent::HandleQueuedMsg { .. } => "handle_queued_msg",
            EpochingEvent::EndEpoch { .. } => "end_epoch",
        }
    }

    /// Event admisi untuk wrapped message; `None` untuk wrapper kosong.
    pub fn from_wrapped(msg: &WrappedMsg, epoch_boundary: u64) -> Option<Self> {
        let event = match msg {
            WrappedMsg::Delegate(w) => Self::delegate(w.inner()?, epoch_boundary),
            WrappedMsg::Undelegate(w) => Self::undelegate(w.inner()?, epoch_boundary),
            WrappedMsg::BeginRedelegate(w) => Self::begin_redelegate(w.inner()?, epoch_boundary),
            WrappedMsg::CancelUnbondingDelegation(w) => {
                Self::cancel_unbonding(w.inner()?, epoch_boundary)
            }
        };
        Some(event)
    }

    fn delegate(msg: &MsgDelegate, epoch_boundary: u64) -> Self {
        EpochingEvent::WrappedDelegate {
            delegator_address: msg.delegator_address.clone(),
            validator_address: msg.validator_address.clone(),
            amount: msg.amount.amount,
            denom: msg.amount.denom.clone(),
            epoch_boundary,
        }
    }

    fn undelegate(msg: &MsgUndelegate, epoch_boundary: u64) -> Self {
        EpochingEvent::WrappedUndelegate {
            delegator_address: msg.delegator_address.clone(),
            validator_address: msg.validator_address.clone(),
            amount: msg.amount.amount,
            denom: msg.amount.denom.clone(),
            epoch_boundary,
        }
    }

    fn begin_redelegate(msg: &MsgBeginRedelegate, epoch_boundary: u64) -> Self {
        EpochingEvent::WrappedBeginRedelegate {
            delegator_address: msg.delegator_address.clone(),
            source_validator_address: msg.validator_src_address.clone(),
            destination_validator_address: msg.validator_dst_address.clone(),
            amount: msg.amount.amount,
            denom: msg.amount.denom.clone(),
            epoch_boundary,
        }
    }

    fn cancel_unbonding(msg: &MsgCancelUnbondingDelegation, epoch_boundary: u64) -> Self {
        EpochingEvent::WrappedCancelUnbondingDelegation {
            delegator_address: msg.delegator_address.clone(),
            validator_address: msg.validator_address.clone(),
            amount: msg.amount.amount,
            denom: msg.amount.denom.clone(),
            creation_height: msg.creation_height,
            epoch_boundary,
        }
    }

    pub fn create_validator(msg: &MsgCreateValidator, epoch_boundary: u64) -> Self {
        EpochingEvent::QueuedCreateValidator {
            validator_address: msg.validator_address.clone(),
            amount: msg.value.amount,
            denom: msg.value.denom.clone(),
            epoch_boundary,
        }
    }

    pub fn handle_queued_msg(epoch: u64, outcome: &ReplayOutcome) -> Self {
        EpochingEvent::HandleQueuedMsg {
            epoch,
            id: outcome.id,
            tx_id: outcome.tx_id.clone(),
            msg_id: outcome.msg_id,
            type_url: outcome.type_url.to_string(),
            error: outcome.error.as_ref().map(|e| e.to_string()),
        }
    }
}
