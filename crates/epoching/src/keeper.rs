//! # Epoching Keeper
//!
//! Pintu masuk module: admisi staking command ke antrian epoch dan
//! replay di akhir epoch.
//!
//! ## Admisi
//!
//! 1. `validate_basic()` pada message
//! 2. Denom coin harus sama dengan `bond_denom`
//! 3. Bangun `QueuedMessage` (id, timestamp, tx_id dari caller)
//! 4. Append ke antrian epoch
//! 5. Catat event admisi
//!
//! Jika salah satu langkah gagal, antrian dan event tidak berubah.

use epoching_proto::{Coin, Msg, MsgCreateValidator, ProtoCodec, QueuedMessage, WrappedMsg};
use tracing::debug;

use crate::config::EpochingConfig;
use crate::dispatcher::{replay_epoch, EpochReplayReport, StakingHandler};
use crate::error::{EpochingError, Result};
use crate::events::EpochingEvent;
use crate::store::{EpochQueueStore, KvStore};

pub struct Keeper<S: KvStore> {
    config: EpochingConfig,
    queue: EpochQueueStore<S>,
    events: Vec<EpochingEvent>,
}

impl<S: KvStore> Keeper<S> {
    pub fn new(config: EpochingConfig, codec: ProtoCodec, kv: S) -> Result<Self> {
        config
            .validate()
            .map_err(|e| EpochingError::Config(e.to_string()))?;
        Ok(Self {
            config,
            queue: EpochQueueStore::new(kv, codec),
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &EpochingConfig {
        &self.config
    }

    pub fn queue(&self) -> &EpochQueueStore<S> {
        &self.queue
    }

    /// Ambil semua event yang terkumpul sejak panggilan sebelumnya.
    pub fn take_events(&mut self) -> Vec<EpochingEvent> {
        std::mem::take(&mut self.events)
    }

    /// Admisi wrapped staking command ke antrian `epoch`.
    pub fn wrapped_msg(
        &mut self,
        epoch: u64,
        id: u64,
        inserted_at_ms: u64,
        tx_id: impl Into<Vec<u8>>,
        msg: impl Into<WrappedMsg>,
    ) -> Result<QueuedMessage> {
        let msg = msg.into();
        msg.validate_basic()?;
        if let Some(coin) = msg.amount() {
            self.check_bond_denom(coin)?;
        }

        let boundary = self.config.epoch_boundary(epoch);
        let event = EpochingEvent::from_wrapped(&msg, boundary);

        let qmsg = QueuedMessage::new(self.queue.codec(), id, inserted_at_ms, tx_id, msg)?;
        self.admit(epoch, &qmsg)?;
        self.events.extend(event);
        Ok(qmsg)
    }

    /// Admisi `MsgCreateValidator` ke antrian `epoch`.
    pub fn create_validator(
        &mut self,
        epoch: u64,
        id: u64,
        inserted_at_ms: u64,
        tx_id: impl Into<Vec<u8>>,
        msg: MsgCreateValidator,
    ) -> Result<QueuedMessage> {
        msg.validate_basic()?;
        self.check_bond_denom(&msg.value)?;

        let event = EpochingEvent::create_validator(&msg, self.config.epoch_boundary(epoch));
        let qmsg = QueuedMessage::new(self.queue.codec(), id, inserted_at_ms, tx_id, msg)?;
        self.admit(epoch, &qmsg)?;
        self.events.push(event);
        Ok(qmsg)
    }

    /// Replay dan tutup `epoch`.
    ///
    /// Emit satu `HandleQueuedMsg` per envelope lalu `EndEpoch`.
    pub fn end_epoch<H: StakingHandler + ?Sized>(
        &mut self,
        epoch: u64,
        handler: &mut H,
    ) -> Result<EpochReplayReport> {
        let report = replay_epoch(&mut self.queue, epoch, handler)?;
        for outcome in &report.outcomes {
            self.events.push(EpochingEvent::handle_queued_msg(epoch, outcome));
        }
        self.events.push(EpochingEvent::EndEpoch {
            epoch,
            applied: report.applied_count() as u64,
            failed: report.failed_count() as u64,
        });
        Ok(report)
    }

    fn admit(&mut self, epoch: u64, qmsg: &QueuedMessage) -> Result<()> {
        let index = self.queue.enqueue(epoch, qmsg)?;
        debug!(
            epoch,
            index,
            id = qmsg.id,
            msg_id = %qmsg.msg_id_hex(),
            tx_id = %qmsg.tx_id_hex(),
            "message queued"
        );
        Ok(())
    }

    fn check_bond_denom(&self, coin: &Coin) -> Result<()> {
        if coin.denom != self.config.bond_denom {
            return Err(EpochingError::InvalidDenom {
                expected: self.config.bond_denom.clone(),
                got: coin.denom.clone(),
            });
        }
        Ok(())
    }
}
