//! Polymorphic codec: marshal/unmarshal values sebagai `Any`.
//!
//! Format wire satu value:
//!
//! ```text
//! bincode(Any { type_url: String, value: bincode(concrete) })
//! ```
//!
//! bincode memakai little-endian dan fixed field order, sehingga input yang
//! sama selalu menghasilkan bytes yang identik. Decode menolak bytes sisa,
//! jadi satu value hanya punya satu encoding yang diterima.

use sha3::{Digest, Sha3_256};

use crate::error::CodecError;
use crate::queued::MSG_ID_SIZE;
use crate::registry::{decode_canonical, Any, AnyValue, Interface, InterfaceRegistry};
use crate::staking::StakingMsg;
use crate::{crypto, staking, wrapped};

/// Codec yang terikat ke satu [`InterfaceRegistry`].
#[derive(Debug, Clone)]
pub struct ProtoCodec {
    registry: InterfaceRegistry,
}

impl ProtoCodec {
    pub fn new(registry: InterfaceRegistry) -> Self {
        Self { registry }
    }

    /// Codec dengan semua interface crate ini ter-register.
    pub fn with_all_interfaces() -> Result<Self, CodecError> {
        let mut registry = InterfaceRegistry::new();
        crypto::register_interfaces(&mut registry)?;
        staking::register_interfaces(&mut registry)?;
        wrapped::register_interfaces(&mut registry)?;
        Ok(Self::new(registry))
    }

    pub fn registry(&self) -> &InterfaceRegistry {
        &self.registry
    }

    /// Encode value beserta identitas concrete type-nya.
    pub fn marshal_interface<T: Interface + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        value.check_registered(&self.registry)?;
        let any = Any::pack(value)?;
        bincode::serialize(&any).map_err(|e| CodecError::EncodeFailed(e.to_string()))
    }

    /// Decode bytes hasil [`marshal_interface`](Self::marshal_interface) ke
    /// concrete type aslinya, termasuk nested interfaces.
    pub fn unmarshal_interface(&self, bytes: &[u8]) -> Result<AnyValue, CodecError> {
        if bytes.is_empty() {
            return Err(CodecError::DecodeFailed("empty input".to_string()));
        }
        let any: Any = decode_canonical(bytes)?;
        self.registry.resolve(&any)
    }

    /// SHA3-256 dari encoding concrete inner command.
    pub fn msg_hash(&self, msg: &StakingMsg) -> Result<[u8; MSG_ID_SIZE], CodecError> {
        let encoded = msg.encode_value()?;
        let mut hasher = Sha3_256::new();
        hasher.update(&encoded);
        Ok(hasher.finalize().into())
    }
}
