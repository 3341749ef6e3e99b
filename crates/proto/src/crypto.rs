//! Public key types carried inside staking messages.
//!
//! `PubKey` adalah leaf interface: `MsgCreateValidator` menyimpannya sebagai
//! nested `Any`, sehingga type key harus di-register agar decode tidak
//! kehilangan identitas type.

use ed25519_dalek::{PublicKey, SecretKey};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_512};
use std::fmt;

use crate::error::{CodecError, KeyError};
use crate::registry::{AnyValue, Interface, InterfaceRegistry, UnpackInterfaces};
use crate::types::{Address, ADDRESS_SIZE};

/// Ukuran ed25519 public key dalam bytes.
pub const ED25519_PUBKEY_SIZE: usize = 32;

/// Ed25519 public key yang sudah divalidasi sebagai curve point.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 32]", into = "[u8; 32]")]
pub struct Ed25519PubKey {
    key: [u8; ED25519_PUBKEY_SIZE],
}

impl Ed25519PubKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != ED25519_PUBKEY_SIZE {
            return Err(KeyError::InvalidLength {
                expected: ED25519_PUBKEY_SIZE,
                got: bytes.len(),
            });
        }
        let pk = PublicKey::from_bytes(bytes)
            .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))?;
        Ok(Self { key: pk.to_bytes() })
    }

    /// Derive public key dari 32-byte secret key.
    pub fn from_secret_bytes(secret: &[u8]) -> Result<Self, KeyError> {
        let secret_key =
            SecretKey::from_bytes(secret).map_err(|e| KeyError::InvalidSecretKey(e.to_string()))?;
        let public_key: PublicKey = (&secret_key).into();
        Ok(Self {
            key: public_key.to_bytes(),
        })
    }

    pub fn as_bytes(&self) -> &[u8; ED25519_PUBKEY_SIZE] {
        &self.key
    }

    /// Address = 20 byte pertama dari SHA3-512(pubkey).
    pub fn address(&self) -> Address {
        let digest = Sha3_512::digest(self.key);
        let mut addr = [0u8; ADDRESS_SIZE];
        addr.copy_from_slice(&digest[..ADDRESS_SIZE]);
        Address::from_bytes(addr)
    }
}

impl TryFrom<[u8; 32]> for Ed25519PubKey {
    type Error = KeyError;

    fn try_from(bytes: [u8; 32]) -> Result<Self, Self::Error> {
        Self::from_bytes(&bytes)
    }
}

impl From<Ed25519PubKey> for [u8; 32] {
    fn from(pk: Ed25519PubKey) -> Self {
        pk.key
    }
}

impl fmt::Debug for Ed25519PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ed25519PubKey").field(&hex::encode(self.key)).finish()
    }
}

impl_interface!(Ed25519PubKey, "/cosmos.crypto.ed25519.PubKey");

impl UnpackInterfaces for Ed25519PubKey {}

impl From<Ed25519PubKey> for AnyValue {
    fn from(pk: Ed25519PubKey) -> Self {
        AnyValue::PubKey(PubKey::Ed25519(pk))
    }
}

/// Public key interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PubKey {
    Ed25519(Ed25519PubKey),
}

impl PubKey {
    pub fn address(&self) -> Address {
        match self {
            PubKey::Ed25519(pk) => pk.address(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            PubKey::Ed25519(pk) => pk.as_bytes(),
        }
    }

    /// Dua key sama jika type dan bytes-nya sama.
    pub fn equals(&self, other: &PubKey) -> bool {
        self == other
    }
}

impl From<Ed25519PubKey> for PubKey {
    fn from(pk: Ed25519PubKey) -> Self {
        PubKey::Ed25519(pk)
    }
}

impl From<PubKey> for AnyValue {
    fn from(pk: PubKey) -> Self {
        AnyValue::PubKey(pk)
    }
}

impl Interface for PubKey {
    fn type_url(&self) -> &'static str {
        match self {
            PubKey::Ed25519(pk) => pk.type_url(),
        }
    }

    fn encode_value(&self) -> Result<Vec<u8>, CodecError> {
        match self {
            PubKey::Ed25519(pk) => pk.encode_value(),
        }
    }
}

/// Register semua public key type.
pub fn register_interfaces(registry: &mut InterfaceRegistry) -> Result<(), CodecError> {
    registry.register::<Ed25519PubKey>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeUrl;

    #[test]
    fn test_from_secret_is_deterministic() {
        let a = Ed25519PubKey::from_secret_bytes(&[7u8; 32]).expect("key");
        let b = Ed25519PubKey::from_secret_bytes(&[7u8; 32]).expect("key");
        let c = Ed25519PubKey::from_secret_bytes(&[8u8; 32]).expect("key");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        assert_eq!(
            Ed25519PubKey::from_bytes(&[1u8; 31]),
            Err(KeyError::InvalidLength { expected: 32, got: 31 })
        );
        assert_eq!(
            Ed25519PubKey::from_bytes(&[]),
            Err(KeyError::InvalidLength { expected: 32, got: 0 })
        );
    }

    #[test]
    fn test_from_secret_rejects_short_secret() {
        assert!(matches!(
            Ed25519PubKey::from_secret_bytes(&[1u8; 16]),
            Err(KeyError::InvalidSecretKey(_))
        ));
    }

    #[test]
    fn test_address_derivation_stable() {
        let pk = Ed25519PubKey::from_secret_bytes(&[3u8; 32]).expect("key");
        assert_eq!(pk.address(), pk.address());
        assert_eq!(PubKey::from(pk).address(), pk.address());
    }

    #[test]
    fn test_bincode_roundtrip_validates_point() {
        let pk = Ed25519PubKey::from_secret_bytes(&[9u8; 32]).expect("key");
        let bytes = bincode::serialize(&pk).expect("encode");
        let decoded: Ed25519PubKey = bincode::deserialize(&bytes).expect("decode");
        assert_eq!(pk, decoded);
    }

    #[test]
    fn test_pubkey_type_url() {
        let pk = PubKey::from(Ed25519PubKey::from_secret_bytes(&[2u8; 32]).expect("key"));
        assert_eq!(pk.type_url(), Ed25519PubKey::TYPE_URL);
    }
}
