//! # Wrapped Messages
//!
//! Wrapped message adalah pintu masuk user untuk staking command yang harus
//! ditunda sampai akhir epoch. Setiap wrapper membawa tepat satu inner
//! command, atau tidak sama sekali (shell untuk decode target).
//!
//! Konstruksi tidak pernah gagal; wrapper kosong baru ditolak oleh
//! `validate_basic()` dengan [`MsgError::MissingInnerMsg`].

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, MsgError};
use crate::queued::QueuedMessage;
use crate::registry::{AnyValue, Interface, InterfaceRegistry, UnpackInterfaces};
use crate::staking::{
    Msg, MsgBeginRedelegate, MsgCancelUnbondingDelegation, MsgDelegate, MsgUndelegate, StakingMsg,
};
use crate::types::Coin;

macro_rules! wrapped_msg {
    ($(#[$meta:meta])* $name:ident($inner:ty) => $variant:ident, $url:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            pub msg: Option<$inner>,
        }

        impl $name {
            pub fn new(msg: Option<$inner>) -> Self {
                Self { msg }
            }

            pub fn inner(&self) -> Option<&$inner> {
                self.msg.as_ref()
            }

            pub fn into_inner(self) -> Option<$inner> {
                self.msg
            }

            pub fn validate_basic(&self) -> Result<(), MsgError> {
                match &self.msg {
                    Some(msg) => msg.validate_basic(),
                    None => Err(MsgError::MissingInnerMsg),
                }
            }
        }

        impl From<$inner> for $name {
            fn from(msg: $inner) -> Self {
                Self::new(Some(msg))
            }
        }

        impl From<$name> for WrappedMsg {
            fn from(msg: $name) -> Self {
                WrappedMsg::$variant(msg)
            }
        }

        impl From<$name> for AnyValue {
            fn from(msg: $name) -> Self {
                AnyValue::Wrapped(WrappedMsg::$variant(msg))
            }
        }

        impl UnpackInterfaces for $name {}

        impl_interface!($name, $url);
    };
}

wrapped_msg!(
    /// Delegate yang dieksekusi di akhir epoch.
    MsgWrappedDelegate(MsgDelegate) => Delegate,
    "/babylon.epoching.v1.MsgWrappedDelegate"
);

wrapped_msg!(
    /// Undelegate yang dieksekusi di akhir epoch.
    MsgWrappedUndelegate(MsgUndelegate) => Undelegate,
    "/babylon.epoching.v1.MsgWrappedUndelegate"
);

wrapped_msg!(
    /// Redelegate yang dieksekusi di akhir epoch.
    MsgWrappedBeginRedelegate(MsgBeginRedelegate) => BeginRedelegate,
    "/babylon.epoching.v1.MsgWrappedBeginRedelegate"
);

wrapped_msg!(
    /// Cancel unbonding yang dieksekusi di akhir epoch.
    MsgWrappedCancelUnbondingDelegation(MsgCancelUnbondingDelegation) => CancelUnbondingDelegation,
    "/babylon.epoching.v1.MsgWrappedCancelUnbondingDelegation"
);

// ════════════════════════════════════════════════════════════════════════════════
// WRAPPED MSG (closed sum)
// ════════════════════════════════════════════════════════════════════════════════

/// Semua wrapped message variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrappedMsg {
    Delegate(MsgWrappedDelegate),
    Undelegate(MsgWrappedUndelegate),
    BeginRedelegate(MsgWrappedBeginRedelegate),
    CancelUnbondingDelegation(MsgWrappedCancelUnbondingDelegation),
}

impl WrappedMsg {
    pub fn validate_basic(&self) -> Result<(), MsgError> {
        match self {
            WrappedMsg::Delegate(msg) => msg.validate_basic(),
            WrappedMsg::Undelegate(msg) => msg.validate_basic(),
            WrappedMsg::BeginRedelegate(msg) => msg.validate_basic(),
            WrappedMsg::CancelUnbondingDelegation(msg) => msg.validate_basic(),
        }
    }

    /// True jika wrapper tidak membawa inner message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            WrappedMsg::Delegate(msg) => msg.msg.is_none(),
            WrappedMsg::Undelegate(msg) => msg.msg.is_none(),
            WrappedMsg::BeginRedelegate(msg) => msg.msg.is_none(),
            WrappedMsg::CancelUnbondingDelegation(msg) => msg.msg.is_none(),
        }
    }

    /// Coin yang dibawa inner message, jika ada.
    pub fn amount(&self) -> Option<&Coin> {
        match self {
            WrappedMsg::Delegate(msg) => msg.inner().map(|m| &m.amount),
            WrappedMsg::Undelegate(msg) => msg.inner().map(|m| &m.amount),
            WrappedMsg::BeginRedelegate(msg) => msg.inner().map(|m| &m.amount),
            WrappedMsg::CancelUnbondingDelegation(msg) => msg.inner().map(|m| &m.amount),
        }
    }

    /// Lepas wrapper; `None` jika wrapper kosong.
    pub fn into_staking_msg(self) -> Option<StakingMsg> {
        match self {
            WrappedMsg::Delegate(msg) => msg.into_inner().map(StakingMsg::Delegate),
            WrappedMsg::Undelegate(msg) => msg.into_inner().map(StakingMsg::Undelegate),
            WrappedMsg::BeginRedelegate(msg) => msg.into_inner().map(StakingMsg::BeginRedelegate),
            WrappedMsg::CancelUnbondingDelegation(msg) => {
                msg.into_inner().map(StakingMsg::CancelUnbondingDelegation)
            }
        }
    }
}

impl Interface for WrappedMsg {
    fn type_url(&self) -> &'static str {
        match self {
            WrappedMsg::Delegate(msg) => msg.type_url(),
            WrappedMsg::Undelegate(msg) => msg.type_url(),
            WrappedMsg::BeginRedelegate(msg) => msg.type_url(),
            WrappedMsg::CancelUnbondingDelegation(msg) => msg.type_url(),
        }
    }

    fn encode_value(&self) -> Result<Vec<u8>, CodecError> {
        match self {
            WrappedMsg::Delegate(msg) => msg.encode_value(),
            WrappedMsg::Undelegate(msg) => msg.encode_value(),
            WrappedMsg::BeginRedelegate(msg) => msg.encode_value(),
            WrappedMsg::CancelUnbondingDelegation(msg) => msg.encode_value(),
        }
    }
}

impl UnpackInterfaces for WrappedMsg {}

impl From<WrappedMsg> for AnyValue {
    fn from(msg: WrappedMsg) -> Self {
        AnyValue::Wrapped(msg)
    }
}

/// Register semua wrapped message type beserta `QueuedMessage`.
pub fn register_interfaces(registry: &mut InterfaceRegistry) -> Result<(), CodecError> {
    registry.register::<MsgWrappedDelegate>()?;
    registry.register::<MsgWrappedUndelegate>()?;
    registry.register::<MsgWrappedBeginRedelegate>()?;
    registry.register::<MsgWrappedCancelUnbondingDelegation>()?;
    registry.register::<QueuedMessage>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, DEFAULT_BOND_DENOM};

    fn addr(seed: u8) -> String {
        Address::from_bytes([seed; 20]).to_hex()
    }

    fn coin(amount: u128) -> Coin {
        Coin::new(DEFAULT_BOND_DENOM, amount)
    }

    struct Case {
        name: &'static str,
        msg: WrappedMsg,
        expect_pass: bool,
    }

    fn cases() -> Vec<Case> {
        vec![
            Case {
                name: "delegate basic good",
                msg: MsgWrappedDelegate::from(MsgDelegate::new(addr(1), addr(2), coin(1000))).into(),
                expect_pass: true,
            },
            Case {
                name: "delegate no wrapped msg",
                msg: MsgWrappedDelegate::new(None).into(),
                expect_pass: false,
            },
            Case {
                name: "undelegate regular",
                msg: MsgWrappedUndelegate::from(MsgUndelegate::new(addr(1), addr(2), coin(1))).into(),
                expect_pass: true,
            },
            Case {
                name: "undelegate no wrapped msg",
                msg: MsgWrappedUndelegate::new(None).into(),
                expect_pass: false,
            },
            Case {
                name: "redelegate regular",
                msg: MsgWrappedBeginRedelegate::from(MsgBeginRedelegate::new(
                    addr(1),
                    addr(2),
                    addr(3),
                    coin(1),
                ))
                .into(),
                expect_pass: true,
            },
            Case {
                name: "redelegate no wrapped msg",
                msg: MsgWrappedBeginRedelegate::new(None).into(),
                expect_pass: false,
            },
            Case {
                name: "cancel unbonding regular",
                msg: MsgWrappedCancelUnbondingDelegation::from(MsgCancelUnbondingDelegation::new(
                    addr(1),
                    addr(2),
                    10,
                    coin(1),
                ))
                .into(),
                expect_pass: true,
            },
            Case {
                name: "cancel unbonding no wrapped msg",
                msg: MsgWrappedCancelUnbondingDelegation::new(None).into(),
                expect_pass: false,
            },
        ]
    }

    #[test]
    fn test_validate_basic_table() {
        for tc in cases() {
            let result = tc.msg.validate_basic();
            if tc.expect_pass {
                assert!(result.is_ok(), "test: {} got {:?}", tc.name, result);
            } else {
                assert_eq!(result, Err(MsgError::MissingInnerMsg), "test: {}", tc.name);
            }
        }
    }

    #[test]
    fn test_default_wrapper_is_missing_inner() {
        assert_eq!(
            MsgWrappedDelegate::default().validate_basic(),
            Err(MsgError::MissingInnerMsg)
        );
        assert_eq!(
            MsgWrappedCancelUnbondingDelegation::default().validate_basic(),
            Err(MsgError::MissingInnerMsg)
        );
    }

    #[test]
    fn test_inner_error_surfaces_unchanged() {
        let inner = MsgBeginRedelegate::new(addr(1), addr(2), addr(2), coin(1));
        let expected = inner.validate_basic();
        let wrapped = MsgWrappedBeginRedelegate::from(inner);
        assert_eq!(wrapped.validate_basic(), expected);
        assert_eq!(wrapped.validate_basic(), Err(MsgError::SelfRedelegation));
    }

    #[test]
    fn test_into_staking_msg() {
        let inner = MsgUndelegate::new(addr(4), addr(5), coin(7));
        let wrapped: WrappedMsg = MsgWrappedUndelegate::from(inner.clone()).into();
        assert!(!wrapped.is_empty());
        assert_eq!(wrapped.amount(), Some(&coin(7)));
        assert_eq!(wrapped.into_staking_msg(), Some(StakingMsg::Undelegate(inner)));

        let empty: WrappedMsg = MsgWrappedUndelegate::default().into();
        assert!(empty.is_empty());
        assert_eq!(empty.amount(), None);
        assert_eq!(empty.into_staking_msg(), None);
    }
}
