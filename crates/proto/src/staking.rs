//! # Staking Messages
//!
//! Inner staking command yang dibungkus oleh wrapped message dan dieksekusi
//! ulang di akhir epoch. Setiap command membawa validasi strukturalnya sendiri
//! (`validate_basic`); wrapper dan keeper hanya meneruskan hasilnya.
//!
//! | Message | Type URL |
//! |---------|----------|
//! | [`MsgCreateValidator`] | `/cosmos.staking.v1beta1.MsgCreateValidator` |
//! | [`MsgDelegate`] | `/cosmos.staking.v1beta1.MsgDelegate` |
//! | [`MsgUndelegate`] | `/cosmos.staking.v1beta1.MsgUndelegate` |
//! | [`MsgBeginRedelegate`] | `/cosmos.staking.v1beta1.MsgBeginRedelegate` |
//! | [`MsgCancelUnbondingDelegation`] | `/cosmos.staking.v1beta1.MsgCancelUnbondingDelegation` |
//!
//! Address disimpan sebagai string supaya input rusak tetap bisa
//! direpresentasikan dan ditolak oleh validasi.

use serde::{Deserialize, Serialize};

use crate::crypto::PubKey;
use crate::error::{CodecError, MsgError};
use crate::registry::{Any, AnyValue, Interface, InterfaceRegistry, UnpackInterfaces};
use crate::types::{Address, Coin};

/// Basis points yang setara dengan 100%.
pub const MAX_COMMISSION_BPS: u32 = 10_000;

/// Capability yang wajib dimiliki setiap inner staking command.
pub trait Msg: Interface {
    fn validate_basic(&self) -> Result<(), MsgError>;
}

// ════════════════════════════════════════════════════════════════════════════════
// DELEGATE / UNDELEGATE
// ════════════════════════════════════════════════════════════════════════════════

/// Delegasi `amount` dari delegator ke validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDelegate {
    pub delegator_address: String,
    pub validator_address: String,
    pub amount: Coin,
}

impl MsgDelegate {
    pub fn new(
        delegator_address: impl Into<String>,
        validator_address: impl Into<String>,
        amount: Coin,
    ) -> Self {
        Self {
            delegator_address: delegator_address.into(),
            validator_address: validator_address.into(),
            amount,
        }
    }
}

impl Msg for MsgDelegate {
    fn validate_basic(&self) -> Result<(), MsgError> {
        Address::parse_field("delegator_address", &self.delegator_address)?;
        Address::parse_field("validator_address", &self.validator_address)?;
        self.amount.validate_positive("amount")
    }
}

/// Undelegasi `amount` dari validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUndelegate {
    pub delegator_address: String,
    pub validator_address: String,
    pub amount: Coin,
}

impl MsgUndelegate {
    pub fn new(
        delegator_address: impl Into<String>,
        validator_address: impl Into<String>,
        amount: Coin,
    ) -> Self {
        Self {
            delegator_address: delegator_address.into(),
            validator_address: validator_address.into(),
            amount,
        }
    }
}

impl Msg for MsgUndelegate {
    fn validate_basic(&self) -> Result<(), MsgError> {
        Address::parse_field("delegator_address", &self.delegator_address)?;
        Address::parse_field("validator_address", &self.validator_address)?;
        self.amount.validate_positive("amount")
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// REDELEGATE
// ════════════════════════════════════════════════════════════════════════════════

/// Pindahkan delegasi dari satu validator ke validator lain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgBeginRedelegate {
    pub delegator_address: String,
    pub validator_src_address: String,
    pub validator_dst_address: String,
    pub amount: Coin,
}

impl MsgBeginRedelegate {
    pub fn new(
        delegator_address: impl Into<String>,
        validator_src_address: impl Into<String>,
        validator_dst_address: impl Into<String>,
        amount: Coin,
    ) -> Self {
        Self {
            delegator_address: delegator_address.into(),
            validator_src_address: validator_src_address.into(),
            validator_dst_address: validator_dst_address.into(),
            amount,
        }
    }
}

impl Msg for MsgBeginRedelegate {
    fn validate_basic(&self) -> Result<(), MsgError> {
        Address::parse_field("delegator_address", &self.delegator_address)?;
        let src = Address::parse_field("validator_src_address", &self.validator_src_address)?;
        let dst = Address::parse_field("validator_dst_address", &self.validator_dst_address)?;
        if src == dst {
            return Err(MsgError::SelfRedelegation);
        }
        self.amount.validate_positive("amount")
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// CANCEL UNBONDING
// ════════════════════════════════════════════════════════════════════════════════

/// Batalkan unbonding entry yang dibuat pada `creation_height`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCancelUnbondingDelegation {
    pub delegator_address: String,
    pub validator_address: String,
    pub amount: Coin,
    pub creation_height: i64,
}

impl MsgCancelUnbondingDelegation {
    pub fn new(
        delegator_address: impl Into<String>,
        validator_address: impl Into<String>,
        creation_height: i64,
        amount: Coin,
    ) -> Self {
        Self {
            delegator_address: delegator_address.into(),
            validator_address: validator_address.into(),
            amount,
            creation_height,
        }
    }
}

impl Msg for MsgCancelUnbondingDelegation {
    fn validate_basic(&self) -> Result<(), MsgError> {
        Address::parse_field("delegator_address", &self.delegator_address)?;
        Address::parse_field("validator_address", &self.validator_address)?;
        self.amount.validate_positive("amount")?;
        if self.creation_height <= 0 {
            return Err(MsgError::InvalidCreationHeight(self.creation_height));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// CREATE VALIDATOR
// ════════════════════════════════════════════════════════════════════════════════

/// Metadata publik validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub moniker: String,
    pub identity: String,
    pub website: String,
    pub security_contact: String,
    pub details: String,
}

impl Description {
    pub fn new(moniker: impl Into<String>) -> Self {
        Self {
            moniker: moniker.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Description::default()
    }
}

/// Commission rates dalam basis points (10_000 = 100%).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRates {
    pub rate_bps: u32,
    pub max_rate_bps: u32,
    pub max_change_rate_bps: u32,
}

impl CommissionRates {
    pub fn new(rate_bps: u32, max_rate_bps: u32, max_change_rate_bps: u32) -> Self {
        Self {
            rate_bps,
            max_rate_bps,
            max_change_rate_bps,
        }
    }

    pub fn validate(&self) -> Result<(), MsgError> {
        if self.max_rate_bps > MAX_COMMISSION_BPS {
            return Err(MsgError::InvalidCommission("max rate cannot exceed 100%"));
        }
        if self.rate_bps > self.max_rate_bps {
            return Err(MsgError::InvalidCommission("rate cannot exceed max rate"));
        }
        if self.max_change_rate_bps > self.max_rate_bps {
            return Err(MsgError::InvalidCommission("max change rate cannot exceed max rate"));
        }
        Ok(())
    }
}

/// Registrasi validator baru dengan self delegation awal.
///
/// `pubkey` disimpan sebagai nested [`Any`]. Concrete key di-cache di
/// `cached_pubkey`: diisi oleh constructor, atau oleh unpack step setelah
/// decode lewat registry. Cache tidak ikut serialisasi dan tidak ikut
/// perbandingan equality. `QueuedMessage::new` me-resolve ulang `pubkey`,
/// jadi cache di envelope selalu sesuai dengan `Any` yang disimpan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsgCreateValidator {
    pub description: Description,
    pub commission: CommissionRates,
    pub min_self_delegation: u128,
    pub validator_address: String,
    pub pubkey: Any,
    pub value: Coin,
    #[serde(skip)]
    cached_pubkey: Option<PubKey>,
}

impl MsgCreateValidator {
    pub fn new(
        validator_address: impl Into<String>,
        pubkey: PubKey,
        value: Coin,
        description: Description,
        commission: CommissionRates,
        min_self_delegation: u128,
    ) -> Result<Self, CodecError> {
        Ok(Self {
            description,
            commission,
            min_self_delegation,
            validator_address: validator_address.into(),
            pubkey: Any::pack(&pubkey)?,
            value,
            cached_pubkey: Some(pubkey),
        })
    }

    /// Concrete public key, tersedia setelah konstruksi atau unpack.
    pub fn pubkey(&self) -> Option<&PubKey> {
        self.cached_pubkey.as_ref()
    }
}

impl PartialEq for MsgCreateValidator {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
            && self.commission == other.commission
            && self.min_self_delegation == other.min_self_delegation
            && self.validator_address == other.validator_address
            && self.pubkey == other.pubkey
            && self.value == other.value
    }
}

impl Eq for MsgCreateValidator {}

impl Msg for MsgCreateValidator {
    fn validate_basic(&self) -> Result<(), MsgError> {
        Address::parse_field("validator_address", &self.validator_address)?;
        if self.pubkey.is_empty() {
            return Err(MsgError::EmptyValidatorPubKey);
        }
        self.value.validate_positive("value")?;
        if self.description.is_empty() {
            return Err(MsgError::EmptyDescription);
        }
        self.commission.validate()?;
        if self.min_self_delegation == 0 {
            return Err(MsgError::NonPositiveMinSelfDelegation);
        }
        if self.value.amount < self.min_self_delegation {
            return Err(MsgError::SelfDelegationBelowMinimum {
                value: self.value.amount,
                min: self.min_self_delegation,
            });
        }
        Ok(())
    }
}

impl UnpackInterfaces for MsgCreateValidator {
    fn unpack_interfaces(&mut self, registry: &InterfaceRegistry) -> Result<(), CodecError> {
        if self.pubkey.is_empty() {
            return Ok(());
        }
        match registry.resolve(&self.pubkey)? {
            AnyValue::PubKey(pk) => {
                self.cached_pubkey = Some(pk);
                Ok(())
            }
            _ => Err(CodecError::InterfaceMismatch {
                expected: "PubKey",
                type_url: self.pubkey.type_url.clone(),
            }),
        }
    }
}

impl_interface!(MsgCreateValidator, "/cosmos.staking.v1beta1.MsgCreateValidator");
impl_interface!(MsgDelegate, "/cosmos.staking.v1beta1.MsgDelegate");
impl_interface!(MsgUndelegate, "/cosmos.staking.v1beta1.MsgUndelegate");
impl_interface!(MsgBeginRedelegate, "/cosmos.staking.v1beta1.MsgBeginRedelegate");
impl_interface!(
    MsgCancelUnbondingDelegation,
    "/cosmos.staking.v1beta1.MsgCancelUnbondingDelegation"
);

impl UnpackInterfaces for MsgDelegate {}
impl UnpackInterfaces for MsgUndelegate {}
impl UnpackInterfaces for MsgBeginRedelegate {}
impl UnpackInterfaces for MsgCancelUnbondingDelegation {}

// ════════════════════════════════════════════════════════════════════════════════
// STAKING MSG (closed sum)
// ════════════════════════════════════════════════════════════════════════════════

/// Semua inner staking command yang bisa masuk antrian epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakingMsg {
    CreateValidator(MsgCreateValidator),
    Delegate(MsgDelegate),
    Undelegate(MsgUndelegate),
    BeginRedelegate(MsgBeginRedelegate),
    CancelUnbondingDelegation(MsgCancelUnbondingDelegation),
}

impl StakingMsg {
    /// Coin yang dipindahkan oleh command ini.
    pub fn amount(&self) -> &Coin {
        match self {
            StakingMsg::CreateValidator(msg) => &msg.value,
            StakingMsg::Delegate(msg) => &msg.amount,
            StakingMsg::Undelegate(msg) => &msg.amount,
            StakingMsg::BeginRedelegate(msg) => &msg.amount,
            StakingMsg::CancelUnbondingDelegation(msg) => &msg.amount,
        }
    }
}

impl Interface for StakingMsg {
    fn type_url(&self) -> &'static str {
        match self {
            StakingMsg::CreateValidator(msg) => msg.type_url(),
            StakingMsg::Delegate(msg) => msg.type_url(),
            StakingMsg::Undelegate(msg) => msg.type_url(),
            StakingMsg::BeginRedelegate(msg) => msg.type_url(),
            StakingMsg::CancelUnbondingDelegation(msg) => msg.type_url(),
        }
    }

    fn encode_value(&self) -> Result<Vec<u8>, CodecError> {
        match self {
            StakingMsg::CreateValidator(msg) => msg.encode_value(),
            StakingMsg::Delegate(msg) => msg.encode_value(),
            StakingMsg::Undelegate(msg) => msg.encode_value(),
            StakingMsg::BeginRedelegate(msg) => msg.encode_value(),
            StakingMsg::CancelUnbondingDelegation(msg) => msg.encode_value(),
        }
    }

    fn check_registered(&self, registry: &InterfaceRegistry) -> Result<(), CodecError> {
        registry.ensure_registered(self.type_url())?;
        if let StakingMsg::CreateValidator(msg) = self {
            if !msg.pubkey.is_empty() {
                registry.ensure_registered(&msg.pubkey.type_url)?;
            }
        }
        Ok(())
    }
}

impl Msg for StakingMsg {
    fn validate_basic(&self) -> Result<(), MsgError> {
        match self {
            StakingMsg::CreateValidator(msg) => msg.validate_basic(),
            StakingMsg::Delegate(msg) => msg.validate_basic(),
            StakingMsg::Undelegate(msg) => msg.validate_basic(),
            StakingMsg::BeginRedelegate(msg) => msg.validate_basic(),
            StakingMsg::CancelUnbondingDelegation(msg) => msg.validate_basic(),
        }
    }
}

impl UnpackInterfaces for StakingMsg {
    fn unpack_interfaces(&mut self, registry: &InterfaceRegistry) -> Result<(), CodecError> {
        match self {
            StakingMsg::CreateValidator(msg) => msg.unpack_interfaces(registry),
            _ => Ok(()),
        }
    }
}

macro_rules! staking_msg_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for StakingMsg {
                fn from(msg: $ty) -> Self {
                    StakingMsg::$variant(msg)
                }
            }

            impl From<$ty> for AnyValue {
                fn from(msg: $ty) -> Self {
                    AnyValue::Msg(StakingMsg::$variant(msg))
                }
            }
        )+
    };
}

staking_msg_from! {
    MsgCreateValidator => CreateValidator,
    MsgDelegate => Delegate,
    MsgUndelegate => Undelegate,
    MsgBeginRedelegate => BeginRedelegate,
    MsgCancelUnbondingDelegation => CancelUnbondingDelegation,
}

impl From<StakingMsg> for AnyValue {
    fn from(msg: StakingMsg) -> Self {
        AnyValue::Msg(msg)
    }
}

/// Register semua staking message type.
pub fn register_interfaces(registry: &mut InterfaceRegistry) -> Result<(), CodecError> {
    registry.register::<MsgCreateValidator>()?;
    registry.register::<MsgDelegate>()?;
    registry.register::<MsgUndelegate>()?;
    registry.register::<MsgBeginRedelegate>()?;
    registry.register::<MsgCancelUnbondingDelegation>()?;
    Ok(())
}
