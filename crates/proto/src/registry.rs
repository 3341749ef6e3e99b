//! # Interface Registry
//!
//! Registry memetakan *type URL* (tag stabil) ke decoder untuk Rust type
//! konkret. Semua value yang menyeberangi batas envelope dikodekan sebagai
//! [`Any`] (`type_url` + bincode body) sehingga decoder bisa merekonstruksi
//! type aslinya, bukan blob opaque.
//!
//! ## Registration
//!
//! ```text
//!   startup
//!     │
//!     ├── crypto::register_interfaces()    → /cosmos.crypto.ed25519.PubKey
//!     ├── staking::register_interfaces()   → /cosmos.staking.v1beta1.Msg*
//!     └── wrapped::register_interfaces()   → /babylon.epoching.v1.MsgWrapped*
//!                                            /babylon.epoching.v1.QueuedMessage
//! ```
//!
//! Registrasi idempotent: type yang sama boleh di-register berkali-kali.
//! Type URL yang sama untuk Rust type berbeda ditolak.
//!
//! ## Unpack
//!
//! Setelah decode, [`UnpackInterfaces`] dijalankan secara rekursif untuk
//! me-resolve nested `Any` (misal public key di `MsgCreateValidator`) ke
//! concrete value yang di-cache.

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::collections::BTreeMap;

use crate::crypto::PubKey;
use crate::error::CodecError;
use crate::queued::QueuedMessage;
use crate::staking::StakingMsg;
use crate::wrapped::WrappedMsg;

// ════════════════════════════════════════════════════════════════════════════════
// TRAITS
// ════════════════════════════════════════════════════════════════════════════════

/// Tag stabil untuk concrete type.
pub trait TypeUrl {
    const TYPE_URL: &'static str;
}

/// Value yang bisa dikemas ke dalam [`Any`].
///
/// Diimplementasikan oleh concrete type (lewat `impl_interface!`) dan oleh
/// enum interface (`PubKey`, `StakingMsg`, `WrappedMsg`, `AnyValue`) yang
/// mendelegasikan ke variant aktifnya.
pub trait Interface {
    /// Type URL dari concrete type yang sedang dibawa.
    fn type_url(&self) -> &'static str;

    /// Bincode body dari concrete type (tanpa `Any` wrapper).
    fn encode_value(&self) -> Result<Vec<u8>, CodecError>;

    /// Pastikan type ini, dan semua nested polymorphic field-nya, sudah
    /// di-register.
    fn check_registered(&self, registry: &InterfaceRegistry) -> Result<(), CodecError> {
        registry.ensure_registered(self.type_url())
    }
}

/// Resolve nested `Any` field setelah decode.
pub trait UnpackInterfaces {
    fn unpack_interfaces(&mut self, _registry: &InterfaceRegistry) -> Result<(), CodecError> {
        Ok(())
    }
}

/// Concrete type yang bisa di-register di [`InterfaceRegistry`].
pub trait Concrete:
    TypeUrl + Serialize + DeserializeOwned + UnpackInterfaces + Into<AnyValue> + 'static
{
}

impl<T> Concrete for T where
    T: TypeUrl + Serialize + DeserializeOwned + UnpackInterfaces + Into<AnyValue> + 'static
{
}

/// Implementasi `TypeUrl` + `Interface` untuk concrete struct.
macro_rules! impl_interface {
    ($ty:ty, $url:expr) => {
        impl $crate::registry::TypeUrl for $ty {
            const TYPE_URL: &'static str = $url;
        }

        impl $crate::registry::Interface for $ty {
            fn type_url(&self) -> &'static str {
                <$ty as $crate::registry::TypeUrl>::TYPE_URL
            }

            fn encode_value(&self) -> Result<Vec<u8>, $crate::error::CodecError> {
                bincode::serialize(self)
                    .map_err(|e| $crate::error::CodecError::EncodeFailed(e.to_string()))
            }
        }
    };
}

// ════════════════════════════════════════════════════════════════════════════════
// ANY
// ════════════════════════════════════════════════════════════════════════════════

/// Tagged payload: type URL + bincode body dari concrete type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Any {
    pub type_url: String,
    pub value: Vec<u8>,
}

impl Any {
    /// Kemas value ke `Any`. Tidak membutuhkan registry; pengecekan
    /// registrasi dilakukan codec saat marshal.
    pub fn pack<T: Interface + ?Sized>(value: &T) -> Result<Any, CodecError> {
        Ok(Any {
            type_url: value.type_url().to_string(),
            value: value.encode_value()?,
        })
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.type_url.is_empty()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// ANY VALUE
// ════════════════════════════════════════════════════════════════════════════════

/// Hasil decode polymorphic: semua interface yang dikenal registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyValue {
    PubKey(PubKey),
    Msg(StakingMsg),
    Wrapped(WrappedMsg),
    Queued(QueuedMessage),
}

impl AnyValue {
    /// Nama interface, untuk pesan error.
    pub fn interface_name(&self) -> &'static str {
        match self {
            AnyValue::PubKey(_) => "PubKey",
            AnyValue::Msg(_) => "Msg",
            AnyValue::Wrapped(_) => "WrappedMsg",
            AnyValue::Queued(_) => "QueuedMessage",
        }
    }

    pub fn into_pubkey(self) -> Option<PubKey> {
        match self {
            AnyValue::PubKey(pk) => Some(pk),
            _ => None,
        }
    }

    pub fn into_msg(self) -> Option<StakingMsg> {
        match self {
            AnyValue::Msg(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn into_wrapped(self) -> Option<WrappedMsg> {
        match self {
            AnyValue::Wrapped(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn into_queued(self) -> Option<QueuedMessage> {
        match self {
            AnyValue::Queued(qmsg) => Some(qmsg),
            _ => None,
        }
    }
}

impl Interface for AnyValue {
    fn type_url(&self) -> &'static str {
        match self {
            AnyValue::PubKey(pk) => pk.type_url(),
            AnyValue::Msg(msg) => msg.type_url(),
            AnyValue::Wrapped(msg) => msg.type_url(),
            AnyValue::Queued(qmsg) => qmsg.type_url(),
        }
    }

    fn encode_value(&self) -> Result<Vec<u8>, CodecError> {
        match self {
            AnyValue::PubKey(pk) => pk.encode_value(),
            AnyValue::Msg(msg) => msg.encode_value(),
            AnyValue::Wrapped(msg) => msg.encode_value(),
            AnyValue::Queued(qmsg) => qmsg.encode_value(),
        }
    }

    fn check_registered(&self, registry: &InterfaceRegistry) -> Result<(), CodecError> {
        match self {
            AnyValue::PubKey(pk) => pk.check_registered(registry),
            AnyValue::Msg(msg) => msg.check_registered(registry),
            AnyValue::Wrapped(msg) => msg.check_registered(registry),
            AnyValue::Queued(qmsg) => qmsg.check_registered(registry),
        }
    }
}

impl UnpackInterfaces for AnyValue {
    fn unpack_interfaces(&mut self, registry: &InterfaceRegistry) -> Result<(), CodecError> {
        match self {
            AnyValue::PubKey(_) => Ok(()),
            AnyValue::Msg(msg) => msg.unpack_interfaces(registry),
            AnyValue::Wrapped(msg) => msg.unpack_interfaces(registry),
            AnyValue::Queued(qmsg) => qmsg.unpack_interfaces(registry),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// REGISTRY
// ════════════════════════════════════════════════════════════════════════════════

type DecodeFn = fn(&[u8]) -> Result<AnyValue, CodecError>;

#[derive(Clone, Copy)]
struct Registration {
    type_id: TypeId,
    type_name: &'static str,
    decode: DecodeFn,
}

/// Decode bincode secara kanonik: layout sama dengan `bincode::serialize`
/// (fixint, little-endian), tetapi bytes sisa setelah value ditolak.
pub(crate) fn decode_canonical<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    Ok(bincode::options()
        .with_fixint_encoding()
        .reject_trailing_bytes()
        .deserialize(bytes)?)
}

fn decode_concrete<T: Concrete>(bytes: &[u8]) -> Result<AnyValue, CodecError> {
    let value: T = decode_canonical(bytes)?;
    Ok(value.into())
}

/// Mapping type URL → decoder.
///
/// `BTreeMap` menjaga urutan iterasi deterministik.
#[derive(Clone, Default)]
pub struct InterfaceRegistry {
    entries: BTreeMap<&'static str, Registration>,
}

impl std::fmt::Debug for InterfaceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(url, reg)| (url, reg.type_name)))
            .finish()
    }
}

impl InterfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register concrete type `T` di bawah `T::TYPE_URL`.
    ///
    /// Idempotent untuk type yang sama; type berbeda dengan URL yang sama
    /// menghasilkan `ConflictingRegistration`.
    pub fn register<T: Concrete>(&mut self) -> Result<(), CodecError> {
        let type_id = TypeId::of::<T>();
        if let Some(existing) = self.entries.get(T::TYPE_URL) {
            if existing.type_id == type_id {
                return Ok(());
            }
            return Err(CodecError::ConflictingRegistration(T::TYPE_URL.to_string()));
        }
        self.entries.insert(
            T::TYPE_URL,
            Registration {
                type_id,
                type_name: std::any::type_name::<T>(),
                decode: decode_concrete::<T>,
            },
        );
        Ok(())
    }

    #[must_use]
    pub fn is_registered(&self, type_url: &str) -> bool {
        self.entries.contains_key(type_url)
    }

    pub fn ensure_registered(&self, type_url: &str) -> Result<(), CodecError> {
        if self.is_registered(type_url) {
            Ok(())
        } else {
            Err(CodecError::UnregisteredType(type_url.to_string()))
        }
    }

    /// Semua type URL yang terdaftar, urut leksikografis.
    pub fn type_urls(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode `Any` ke concrete type lalu resolve nested interfaces.
    pub fn resolve(&self, any: &Any) -> Result<AnyValue, CodecError> {
        let registration = self
            .entries
            .get(any.type_url.as_str())
            .ok_or_else(|| CodecError::UnregisteredType(any.type_url.clone()))?;
        let mut value = (registration.decode)(&any.value)?;
        value.unpack_interfaces(self)?;
        Ok(value)
    }
}
