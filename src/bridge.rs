//! Codec bridge between the external and ledger schemas.
//!
//! A conversion writes the source value into one wire buffer and decodes that
//! buffer as the target type, so a field survives exactly when both schemas
//! declare its tag with the same wire type. Every conversion is offered under
//! two policies:
//!
//! - silent (`x`): a failure yields `None`, indistinguishable from absent input;
//! - explicit (`try_x`): `Ok(None)` for absent input, `Err` for a failure.
//!
//! Ordered collections go through [`list`], which aborts on the first element
//! that does not convert.

pub mod catalogue;
pub mod list;
pub mod remap;

pub use list::{convert_list, try_convert_list};
pub use remap::{peer_addresses, subscribe_type_to_ledger, utxo_record_to_external};

use tracing::debug;

use crate::config::{BridgeConfig, CodecLimits};
use crate::error::Result;
use crate::wire::{EncodeError, Message};

/// Stateless converter; copies freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bridge {
    limits: CodecLimits,
}

impl Bridge {
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        Self::with_limits(config.codec)
    }

    /// Fails with [`crate::BridgeError::Config`] when either limit is zero.
    pub fn with_limits(limits: CodecLimits) -> Result<Self> {
        limits.validate()?;
        Ok(Bridge { limits })
    }

    pub fn limits(&self) -> CodecLimits {
        self.limits
    }

    /// Re-encodes `src` as `B` through a single wire buffer.
    pub fn transcode<A: Message, B: Message>(&self, src: &A) -> Result<B> {
        let size = src.encoded_len();
        if size > self.limits.max_message_size {
            return Err(EncodeError::TooLarge {
                message: A::NAME,
                size,
                limit: self.limits.max_message_size,
            }
            .into());
        }

        let mut wire = Vec::with_capacity(size);
        src.encode(&mut wire)?;
        let dst = B::decode_with_context(wire.as_slice(), self.limits.decode_context())?;
        Ok(dst)
    }

    /// Explicit policy: absent input passes through as `Ok(None)`.
    pub fn try_convert<A: Message, B: Message>(&self, src: Option<&A>) -> Result<Option<B>> {
        src.map(|src| self.transcode(src)).transpose()
    }

    /// Silent policy: any failure collapses to `None`.
    pub fn convert<A: Message, B: Message>(&self, src: Option<&A>) -> Option<B> {
        match self.try_convert(src) {
            Ok(dst) => dst,
            Err(e) => {
                debug!(from = A::NAME, to = B::NAME, error = %e, "conversion unavailable");
                None
            }
        }
    }
}
