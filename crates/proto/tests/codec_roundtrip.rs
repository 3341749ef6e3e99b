//! Integration tests untuk epoching proto crate.
//!
//! Memverifikasi bahwa codec mempertahankan concrete type melewati
//! marshal/unmarshal, termasuk nested public key di `MsgCreateValidator`.

use epoching_proto::{
    Address, AnyValue, Coin, CodecError, CommissionRates, Description, Ed25519PubKey, Interface,
    Msg, MsgBeginRedelegate, MsgCancelUnbondingDelegation, MsgCreateValidator, MsgDelegate,
    MsgUndelegate, MsgWrappedBeginRedelegate, MsgWrappedCancelUnbondingDelegation,
    MsgWrappedDelegate, MsgWrappedUndelegate, ProtoCodec, PubKey, QueuedMessage, StakingMsg,
    WrappedMsg, DEFAULT_BOND_DENOM,
};
use proptest::prelude::*;

fn codec() -> ProtoCodec {
    ProtoCodec::with_all_interfaces().expect("codec must build")
}

fn addr(bytes: [u8; 20]) -> String {
    Address::from_bytes(bytes).to_hex()
}

fn create_validator(seed: [u8; 32], value: u128) -> (PubKey, MsgCreateValidator) {
    let pk: PubKey = Ed25519PubKey::from_secret_bytes(&seed)
        .expect("any 32 bytes is a valid secret")
        .into();
    let msg = MsgCreateValidator::new(
        pk.address().to_hex(),
        pk,
        Coin::new(DEFAULT_BOND_DENOM, value),
        Description::new("moniker"),
        CommissionRates::new(1_000, 5_000, 100),
        1,
    )
    .expect("create validator must build");
    (pk, msg)
}

// ============================================================================
// Decode Scenario
// ============================================================================

#[test]
fn test_msg_decode_full_scenario() {
    let codec = codec();
    let (pk, create) = create_validator([42u8; 32], 1000);

    // Step 1: public key
    let bz = codec.marshal_interface(&pk).expect("marshal pubkey");
    let pk2 = codec
        .unmarshal_interface(&bz)
        .expect("unmarshal pubkey")
        .into_pubkey()
        .expect("decoded value must be a pubkey");
    assert!(pk.equals(&pk2), "decoded pubkey must equal original");

    // Step 2: wrapped delegate
    let delegate = MsgDelegate::new(addr([1; 20]), addr([2; 20]), Coin::new(DEFAULT_BOND_DENOM, 1000));
    let wrapped = MsgWrappedDelegate::from(delegate.clone());
    let bz = codec.marshal_interface(&wrapped).expect("marshal wrapped");
    match codec.unmarshal_interface(&bz).expect("unmarshal wrapped") {
        AnyValue::Wrapped(WrappedMsg::Delegate(w)) => {
            let inner = w.inner().expect("inner must survive");
            assert_eq!(inner.amount, delegate.amount);
            assert_eq!(inner.delegator_address, delegate.delegator_address);
            assert_eq!(inner.validator_address, delegate.validator_address);
        }
        other => panic!("expected wrapped delegate, got {:?}", other),
    }

    // Step 3: create validator, nested pubkey resolved
    let bz = codec.marshal_interface(&create).expect("marshal create validator");
    let create2 = match codec.unmarshal_interface(&bz).expect("unmarshal create validator") {
        AnyValue::Msg(StakingMsg::CreateValidator(m)) => m,
        other => panic!("expected create validator, got {:?}", other),
    };
    assert!(create2.pubkey().is_some(), "cached pubkey must be populated after decode");

    // Step 4: queued envelope
    let qmsg = QueuedMessage::new(&codec, 1, 1_704_067_200_000, b"tx id 1".to_vec(), create.clone())
        .expect("queued message");
    let bz = codec.marshal_interface(&qmsg).expect("marshal queued");
    let qmsg2 = codec
        .unmarshal_interface(&bz)
        .expect("unmarshal queued")
        .into_queued()
        .expect("decoded value must be a queued message");
    match qmsg2.unwrap_msg() {
        StakingMsg::CreateValidator(m) => {
            let decoded_pk = m.pubkey().expect("nested pubkey must be resolved");
            assert!(pk.equals(decoded_pk), "nested pubkey must equal original");
            assert_eq!(&create, m);
        }
        other => panic!("expected create validator inside envelope, got {:?}", other),
    }
}

#[test]
fn test_registry_contains_all_type_urls() {
    let codec = codec();
    let urls: Vec<&str> = codec.registry().type_urls().collect();
    for expected in [
        "/babylon.epoching.v1.MsgWrappedBeginRedelegate",
        "/babylon.epoching.v1.MsgWrappedCancelUnbondingDelegation",
        "/babylon.epoching.v1.MsgWrappedDelegate",
        "/babylon.epoching.v1.MsgWrappedUndelegate",
        "/babylon.epoching.v1.QueuedMessage",
        "/cosmos.crypto.ed25519.PubKey",
        "/cosmos.staking.v1beta1.MsgBeginRedelegate",
        "/cosmos.staking.v1beta1.MsgCancelUnbondingDelegation",
        "/cosmos.staking.v1beta1.MsgCreateValidator",
        "/cosmos.staking.v1beta1.MsgDelegate",
        "/cosmos.staking.v1beta1.MsgUndelegate",
    ] {
        assert!(urls.contains(&expected), "registry must contain {}", expected);
    }
    assert_eq!(urls.len(), 11);
}

#[test]
fn test_unmarshal_with_partial_registry_fails() {
    let full = codec();
    let (_, create) = create_validator([7u8; 32], 10);
    let bz = full.marshal_interface(&create).expect("marshal");

    // Registry tanpa crypto: nested pubkey tidak bisa di-resolve.
    let mut registry = epoching_proto::InterfaceRegistry::new();
    epoching_proto::staking::register_interfaces(&mut registry).expect("register");
    let partial = ProtoCodec::new(registry);
    assert_eq!(
        partial.unmarshal_interface(&bz),
        Err(CodecError::UnregisteredType("/cosmos.crypto.ed25519.PubKey".to_string()))
    );
}

// ============================================================================
// Property Tests
// ============================================================================

fn arb_coin() -> impl Strategy<Value = Coin> {
    (1u128..=u64::MAX as u128).prop_map(|amount| Coin::new(DEFAULT_BOND_DENOM, amount))
}

fn arb_wrapped() -> impl Strategy<Value = WrappedMsg> {
    let addr20 = any::<[u8; 20]>();
    prop_oneof![
        (addr20, addr20, arb_coin()).prop_map(|(d, v, c)| {
            MsgWrappedDelegate::from(MsgDelegate::new(addr(d), addr(v), c)).into()
        }),
        (addr20, addr20, arb_coin()).prop_map(|(d, v, c)| {
            MsgWrappedUndelegate::from(MsgUndelegate::new(addr(d), addr(v), c)).into()
        }),
        (addr20, addr20, addr20, arb_coin()).prop_map(|(d, s, t, c)| {
            MsgWrappedBeginRedelegate::from(MsgBeginRedelegate::new(addr(d), addr(s), addr(t), c))
                .into()
        }),
        (addr20, addr20, 1i64..=i64::MAX, arb_coin()).prop_map(|(d, v, h, c)| {
            MsgWrappedCancelUnbondingDelegation::from(MsgCancelUnbondingDelegation::new(
                addr(d),
                addr(v),
                h,
                c,
            ))
            .into()
        }),
    ]
}

proptest! {
    #[test]
    fn prop_wrapped_roundtrip_preserves_variant(msg in arb_wrapped()) {
        let codec = codec();
        let bz = codec.marshal_interface(&msg).expect("marshal");
        let decoded = codec.unmarshal_interface(&bz).expect("unmarshal");
        prop_assert_eq!(decoded.type_url(), msg.type_url());
        prop_assert_eq!(decoded, AnyValue::Wrapped(msg));
    }

    #[test]
    fn prop_queued_msg_id_ignores_envelope_fields(
        msg in arb_wrapped(),
        id_a in any::<u64>(),
        id_b in any::<u64>(),
        tx_a in proptest::collection::vec(any::<u8>(), 0..64),
        tx_b in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let codec = codec();
        let a = QueuedMessage::new(&codec, id_a, 0, tx_a, msg.clone()).expect("a");
        let b = QueuedMessage::new(&codec, id_b, 1, tx_b, msg).expect("b");
        prop_assert_eq!(a.msg_id, b.msg_id);
        prop_assert_eq!(a.msg.validate_basic(), Ok(()));
    }

    #[test]
    fn prop_create_validator_pubkey_survives(seed in any::<[u8; 32]>(), value in 1u128..1_000_000) {
        let codec = codec();
        let (pk, create) = create_validator(seed, value);
        let qmsg = QueuedMessage::new(&codec, 9, 0, vec![1, 2, 3], create).expect("queued");
        let bz = codec.marshal_interface(&qmsg).expect("marshal");
        let decoded = codec.unmarshal_interface(&bz).expect("unmarshal").into_queued().expect("queued");
        match decoded.unwrap_msg() {
            StakingMsg::CreateValidator(m) => {
                prop_assert!(m.pubkey().map(|p| p.equals(&pk)).unwrap_or(false));
            }
            other => prop_assert!(false, "unexpected msg {:?}", other),
        }
    }
}
