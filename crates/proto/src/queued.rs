//! # Queued Message Envelope
//!
//! `QueuedMessage` adalah record durable yang disimpan di antrian epoch.
//!
//! ## Fields
//!
//! | Field | Sumber | Keterangan |
//! |-------|--------|------------|
//! | `id` | caller | Sequence monotonic, unik sepanjang umur chain |
//! | `inserted_at_ms` | caller | Timestamp admisi, hanya untuk diagnostik |
//! | `tx_id` | caller | Referensi opaque ke transaksi asal |
//! | `msg_id` | dihitung | SHA3-256 dari encoding inner command |
//! | `msg` | caller | Inner staking command (sudah di-unwrap) |
//!
//! Epoch tempat envelope disimpan, bukan timestamp, yang menentukan kapan
//! command dieksekusi. Envelope tidak pernah diubah setelah admisi.

use serde::{Deserialize, Serialize};

use crate::codec::ProtoCodec;
use crate::error::CodecError;
use crate::registry::{AnyValue, Interface, InterfaceRegistry, UnpackInterfaces};
use crate::staking::StakingMsg;

/// Ukuran `msg_id` dalam bytes.
pub const MSG_ID_SIZE: usize = 32;

/// Staking command yang ditunda sampai akhir epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedMessage {
    pub id: u64,
    pub inserted_at_ms: u64,
    pub tx_id: Vec<u8>,
    pub msg_id: [u8; MSG_ID_SIZE],
    pub msg: StakingMsg,
}

impl QueuedMessage {
    /// Bangun envelope dari wrapped message atau `MsgCreateValidator`.
    ///
    /// # Errors
    ///
    /// * `EmptyWrappedMsg` - wrapper tanpa inner message
    /// * `UnqueueableMsgType` - interface lain (bare staking msg, pubkey, envelope)
    /// * `UnregisteredType` - inner command atau nested key belum di-register
    /// * `InterfaceMismatch` / `DecodeFailed` - nested key tidak resolve ke
    ///   public key yang valid
    pub fn new(
        codec: &ProtoCodec,
        id: u64,
        inserted_at_ms: u64,
        tx_id: impl Into<Vec<u8>>,
        msg: impl Into<AnyValue>,
    ) -> Result<Self, CodecError> {
        let mut msg = match msg.into() {
            AnyValue::Wrapped(wrapped) => {
                let type_url = wrapped.type_url();
                wrapped
                    .into_staking_msg()
                    .ok_or(CodecError::EmptyWrappedMsg(type_url))?
            }
            AnyValue::Msg(msg @ StakingMsg::CreateValidator(_)) => msg,
            other => {
                return Err(CodecError::UnqueueableMsgType(other.type_url().to_string()));
            }
        };

        msg.check_registered(codec.registry())?;
        // Nested key harus decode sekarang, bukan saat drain.
        msg.unpack_interfaces(codec.registry())?;
        let msg_id = codec.msg_hash(&msg)?;

        Ok(Self {
            id,
            inserted_at_ms,
            tx_id: tx_id.into(),
            msg_id,
            msg,
        })
    }

    /// Inner staking command dengan concrete type aslinya.
    pub fn unwrap_msg(&self) -> &StakingMsg {
        &self.msg
    }

    pub fn into_msg(self) -> StakingMsg {
        self.msg
    }

    pub fn msg_id_hex(&self) -> String {
        hex::encode(self.msg_id)
    }

    pub fn tx_id_hex(&self) -> String {
        hex::encode(&self.tx_id)
    }
}

impl_interface!(QueuedMessage, "/babylon.epoching.v1.QueuedMessage");

impl UnpackInterfaces for QueuedMessage {
    fn unpack_interfaces(&mut self, registry: &InterfaceRegistry) -> Result<(), CodecError> {
        self.msg.unpack_interfaces(registry)
    }
}

impl From<QueuedMessage> for AnyValue {
    fn from(qmsg: QueuedMessage) -> Self {
        AnyValue::Queued(qmsg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Ed25519PubKey, PubKey};
    use crate::registry::{Any, InterfaceRegistry};
    use crate::staking::{self, CommissionRates, Description, MsgCreateValidator, MsgDelegate};
    use crate::types::{Address, Coin, DEFAULT_BOND_DENOM};
    use crate::wrapped::{MsgWrappedDelegate, MsgWrappedUndelegate};

    fn addr(seed: u8) -> String {
        Address::from_bytes([seed; 20]).to_hex()
    }

    fn codec() -> ProtoCodec {
        ProtoCodec::with_all_interfaces().expect("codec")
    }

    fn make_delegate() -> MsgDelegate {
        MsgDelegate::new(addr(1), addr(2), Coin::new(DEFAULT_BOND_DENOM, 1000))
    }

    #[test]
    fn test_new_unwraps_wrapped_msg() {
        let codec = codec();
        let qmsg = QueuedMessage::new(
            &codec,
            1,
            1_704_067_200_000,
            b"tx id 1".to_vec(),
            MsgWrappedDelegate::from(make_delegate()),
        )
        .expect("queued message");

        assert_eq!(qmsg.id, 1);
        assert_eq!(qmsg.tx_id, b"tx id 1".to_vec());
        assert_eq!(qmsg.unwrap_msg(), &StakingMsg::Delegate(make_delegate()));
    }

    #[test]
    fn test_new_rejects_empty_wrapper() {
        let result = QueuedMessage::new(&codec(), 1, 0, Vec::<u8>::new(), MsgWrappedUndelegate::new(None));
        assert_eq!(
            result,
            Err(CodecError::EmptyWrappedMsg("/babylon.epoching.v1.MsgWrappedUndelegate"))
        );
    }

    #[test]
    fn test_new_rejects_unwrapped_delegate() {
        let result = QueuedMessage::new(&codec(), 1, 0, Vec::<u8>::new(), make_delegate());
        assert_eq!(
            result,
            Err(CodecError::UnqueueableMsgType(
                "/cosmos.staking.v1beta1.MsgDelegate".to_string()
            ))
        );
    }

    #[test]
    fn test_new_rejects_unregistered_type() {
        let mut registry = InterfaceRegistry::new();
        crate::crypto::register_interfaces(&mut registry).expect("register");
        let codec = ProtoCodec::new(registry);
        let result = QueuedMessage::new(&codec, 1, 0, Vec::<u8>::new(), MsgWrappedDelegate::from(make_delegate()));
        assert_eq!(
            result,
            Err(CodecError::UnregisteredType(
                "/cosmos.staking.v1beta1.MsgDelegate".to_string()
            ))
        );
    }

    #[test]
    fn test_new_rejects_unregistered_nested_pubkey() {
        let mut registry = InterfaceRegistry::new();
        staking::register_interfaces(&mut registry).expect("register");
        let codec = ProtoCodec::new(registry);

        let pk = Ed25519PubKey::from_secret_bytes(&[5u8; 32]).expect("key");
        let msg = MsgCreateValidator::new(
            addr(1),
            pk.into(),
            Coin::new(DEFAULT_BOND_DENOM, 1000),
            Description::default(),
            CommissionRates::default(),
            1,
        )
        .expect("create validator");

        let result = QueuedMessage::new(&codec, 2, 0, Vec::<u8>::new(), msg);
        assert_eq!(
            result,
            Err(CodecError::UnregisteredType("/cosmos.crypto.ed25519.PubKey".to_string()))
        );
    }

    fn make_create_validator(seed: u8) -> MsgCreateValidator {
        MsgCreateValidator::new(
            addr(1),
            Ed25519PubKey::from_secret_bytes(&[seed; 32]).expect("key").into(),
            Coin::new(DEFAULT_BOND_DENOM, 1000),
            Description::default(),
            CommissionRates::default(),
            1,
        )
        .expect("create validator")
    }

    #[test]
    fn test_new_rejects_pubkey_of_wrong_interface() {
        let mut msg = make_create_validator(6);
        msg.pubkey = Any::pack(&make_delegate()).expect("pack");

        let result = QueuedMessage::new(&codec(), 1, 0, Vec::<u8>::new(), msg);
        assert_eq!(
            result,
            Err(CodecError::InterfaceMismatch {
                expected: "PubKey",
                type_url: "/cosmos.staking.v1beta1.MsgDelegate".to_string(),
            })
        );
    }

    #[test]
    fn test_new_rejects_undecodable_pubkey() {
        let mut msg = make_create_validator(7);
        msg.pubkey.value = vec![1, 2, 3];

        let result = QueuedMessage::new(&codec(), 1, 0, Vec::<u8>::new(), msg);
        assert!(matches!(result, Err(CodecError::DecodeFailed(_))));
    }

    #[test]
    fn test_new_refreshes_cached_pubkey() {
        let mut msg = make_create_validator(8);
        let replacement: PubKey = Ed25519PubKey::from_secret_bytes(&[9u8; 32]).expect("key").into();
        msg.pubkey = Any::pack(&replacement).expect("pack");

        let qmsg = QueuedMessage::new(&codec(), 1, 0, Vec::<u8>::new(), msg).expect("queued");
        match qmsg.unwrap_msg() {
            StakingMsg::CreateValidator(m) => {
                assert!(replacement.equals(m.pubkey().expect("pubkey")));
            }
            other => panic!("unexpected msg: {:?}", other),
        }
    }

    #[test]
    fn test_msg_id_depends_only_on_inner_msg() {
        let codec = codec();
        let a = QueuedMessage::new(&codec, 1, 10, b"a".to_vec(), MsgWrappedDelegate::from(make_delegate()))
            .expect("a");
        let b = QueuedMessage::new(&codec, 2, 20, b"b".to_vec(), MsgWrappedDelegate::from(make_delegate()))
            .expect("b");
        assert_eq!(a.msg_id, b.msg_id);
        assert_eq!(a.msg_id_hex().len(), MSG_ID_SIZE * 2);
        assert_eq!(a.tx_id_hex(), "61");
    }
}
