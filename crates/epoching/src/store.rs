//! # Per-Epoch Queue Store
//!
//! Antrian FIFO per epoch di atas key-value store yang terurut.
//!
//! ## Key Layout
//!
//! Integer memakai big-endian supaya urutan leksikografis sama dengan urutan
//! numerik.
//!
//! | Key | Value |
//! |-----|-------|
//! | `0x01 ‖ epoch(8) ‖ index(8)` | codec encoding `QueuedMessage` |
//! | `0x02 ‖ epoch(8)` | panjang antrian (u64 LE) |
//! | `0x03` | epoch terakhir yang di-drain (u64 LE) |
//!
//! Key format adalah state yang persisten. Jangan diubah tanpa migrasi.
//!
//! ## Lifecycle Epoch
//!
//! ```text
//!   open ──enqueue*──▶ open ──drain──▶ closed
//! ```
//!
//! Epoch di-drain berurutan; epoch yang sudah closed tidak menerima
//! message dan tidak bisa di-drain ulang.

use std::collections::BTreeMap;

use epoching_proto::{AnyValue, CodecError, Interface, ProtoCodec, QueuedMessage};

use crate::error::{EpochingError, Result, StoreError};

// ════════════════════════════════════════════════════════════════════════════════
// KEY PREFIXES
// ════════════════════════════════════════════════════════════════════════════════

pub const PREFIX_QUEUED_MSG: u8 = 0x01;
pub const PREFIX_QUEUE_LEN: u8 = 0x02;
pub const KEY_LAST_DRAINED: [u8; 1] = [0x03];

fn epoch_prefix(epoch: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(PREFIX_QUEUED_MSG);
    key.extend_from_slice(&epoch.to_be_bytes());
    key
}

/// `0x01 ‖ epoch ‖ index`
pub fn queued_msg_key(epoch: u64, index: u64) -> Vec<u8> {
    let mut key = epoch_prefix(epoch);
    key.extend_from_slice(&index.to_be_bytes());
    key
}

/// `0x02 ‖ epoch`
pub fn queue_len_key(epoch: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(PREFIX_QUEUE_LEN);
    key.extend_from_slice(&epoch.to_be_bytes());
    key
}

fn decode_u64_le(bytes: &[u8]) -> Result<u64> {
    let arr: [u8; 8] = bytes
        .try_into()
        .map_err(|_| StoreError(format!("expected 8-byte counter, got {} bytes", bytes.len())))?;
    Ok(u64::from_le_bytes(arr))
}

fn decode_epoch_from_len_key(key: &[u8]) -> Result<u64> {
    let arr: [u8; 8] = key
        .get(1..9)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| StoreError(format!("malformed queue length key of {} bytes", key.len())))?;
    Ok(u64::from_be_bytes(arr))
}

// ════════════════════════════════════════════════════════════════════════════════
// KV STORE
// ════════════════════════════════════════════════════════════════════════════════

/// Satu operasi tulis di dalam [`KvStore::write_batch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    Set(Vec<u8>, Vec<u8>),
    Delete(Vec<u8>),
}

/// Byte-oriented key-value store dengan iterasi terurut.
pub trait KvStore {
    fn get(&self, key: &[u8]) -> std::result::Result<Option<Vec<u8>>, StoreError>;

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> std::result::Result<(), StoreError>;

    fn delete(&mut self, key: &[u8]) -> std::result::Result<(), StoreError>;

    /// Semua entry dengan `prefix`, urut naik berdasarkan key.
    fn scan_prefix(&self, prefix: &[u8]) -> std::result::Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError>;

    /// Terapkan semua `ops` dalam satu commit: semua berhasil atau tidak
    /// ada yang tersimpan.
    fn write_batch(&mut self, ops: Vec<BatchOp>) -> std::result::Result<(), StoreError>;
}

/// In-memory [`KvStore`] berbasis `BTreeMap`.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &[u8]) -> std::result::Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> std::result::Result<(), StoreError> {
        self.entries.insert(key.to_vec(), value);
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> std::result::Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn scan_prefix(&self, prefix: &[u8]) -> std::result::Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        Ok(self
            .entries
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn write_batch(&mut self, ops: Vec<BatchOp>) -> std::result::Result<(), StoreError> {
        for op in ops {
            match op {
                BatchOp::Set(key, value) => {
                    self.entries.insert(key, value);
                }
                BatchOp::Delete(key) => {
                    self.entries.remove(&key);
                }
            }
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// EPOCH QUEUE STORE
// ════════════════════════════════════════════════════════════════════════════════

/// Antrian message per epoch.
#[derive(Debug)]
pub struct EpochQueueStore<S: KvStore> {
    kv: S,
    codec: ProtoCodec,
}

impl<S: KvStore> EpochQueueStore<S> {
    pub fn new(kv: S, codec: ProtoCodec) -> Self {
        Self { kv, codec }
    }

    pub fn codec(&self) -> &ProtoCodec {
        &self.codec
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn into_inner(self) -> S {
        self.kv
    }

    /// Epoch terakhir yang sudah di-drain, `None` jika belum pernah.
    pub fn last_drained_epoch(&self) -> Result<Option<u64>> {
        match self.kv.get(&KEY_LAST_DRAINED)? {
            Some(bytes) => Ok(Some(decode_u64_le(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Jumlah message di antrian `epoch`.
    pub fn len(&self, epoch: u64) -> Result<u64> {
        match self.kv.get(&queue_len_key(epoch))? {
            Some(bytes) => decode_u64_le(&bytes),
            None => Ok(0),
        }
    }

    pub fn is_empty(&self, epoch: u64) -> Result<bool> {
        Ok(self.len(epoch)? == 0)
    }

    /// Append `qmsg` ke akhir antrian `epoch`, return index-nya.
    pub fn enqueue(&mut self, epoch: u64, qmsg: &QueuedMessage) -> Result<u64> {
        if let Some(last_drained) = self.last_drained_epoch()? {
            if epoch <= last_drained {
                return Err(EpochingError::EpochClosed { epoch, last_drained });
            }
        }

        let index = self.len(epoch)?;
        let encoded = self.codec.marshal_interface(qmsg)?;
        let next_len = index
            .checked_add(1)
            .ok_or_else(|| StoreError(format!("queue length overflow at epoch {}", epoch)))?;

        self.kv.write_batch(vec![
            BatchOp::Set(queued_msg_key(epoch, index), encoded),
            BatchOp::Set(queue_len_key(epoch), next_len.to_le_bytes().to_vec()),
        ])?;
        Ok(index)
    }

    /// Baca antrian `epoch` tanpa mengubah state.
    pub fn peek(&self, epoch: u64) -> Result<Vec<QueuedMessage>> {
        self.read_epoch(epoch).map(|entries| entries.into_iter().map(|(_, m)| m).collect())
    }

    /// Ambil seluruh antrian `epoch` dalam urutan FIFO lalu tutup epoch itu.
    ///
    /// Semua entry di-decode dulu; state hanya berubah jika semua decode
    /// berhasil. Penghapusan entry dan penutupan epoch ditulis dalam satu
    /// batch.
    ///
    /// # Errors
    ///
    /// * `EpochAlreadyDrained` - `epoch` <= epoch terakhir yang di-drain
    /// * `EarlierEpochPending` - epoch sebelumnya masih punya message
    pub fn drain(&mut self, epoch: u64) -> Result<Vec<QueuedMessage>> {
        if let Some(last_drained) = self.last_drained_epoch()? {
            if epoch <= last_drained {
                return Err(EpochingError::EpochAlreadyDrained { epoch, last_drained });
            }
        }
        if let Some(pending) = self.earliest_pending_epoch()? {
            if pending < epoch {
                return Err(EpochingError::EarlierEpochPending { epoch, pending });
            }
        }

        let entries = self.read_epoch(epoch)?;

        let mut ops: Vec<BatchOp> = entries
            .iter()
            .map(|(key, _)| BatchOp::Delete(key.clone()))
            .collect();
        ops.push(BatchOp::Delete(queue_len_key(epoch)));
        ops.push(BatchOp::Set(KEY_LAST_DRAINED.to_vec(), epoch.to_le_bytes().to_vec()));
        self.kv.write_batch(ops)?;

        Ok(entries.into_iter().map(|(_, m)| m).collect())
    }

    fn earliest_pending_epoch(&self) -> Result<Option<u64>> {
        for (key, value) in self.kv.scan_prefix(&[PREFIX_QUEUE_LEN])? {
            if decode_u64_le(&value)? > 0 {
                return Ok(Some(decode_epoch_from_len_key(&key)?));
            }
        }
        Ok(None)
    }

    fn read_epoch(&self, epoch: u64) -> Result<Vec<(Vec<u8>, QueuedMessage)>> {
        let expected = self.len(epoch)?;
        let raw = self.kv.scan_prefix(&epoch_prefix(epoch))?;
        if raw.len() as u64 != expected {
            return Err(StoreError(format!(
                "epoch {} queue length {} does not match {} stored messages",
                epoch,
                expected,
                raw.len()
            ))
            .into());
        }

        raw.into_iter()
            .map(|(key, bytes)| {
                let qmsg = self.decode_queued(&bytes)?;
                Ok((key, qmsg))
            })
            .collect()
    }

    fn decode_queued(&self, bytes: &[u8]) -> Result<QueuedMessage> {
        match self.codec.unmarshal_interface(bytes)? {
            AnyValue::Queued(qmsg) => Ok(qmsg),
            other => Err(CodecError::InterfaceMismatch {
                expected: "QueuedMessage",
                type_url: other.type_url().to_string(),
            }
            .into()),
        }
    }
}
