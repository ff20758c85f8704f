use crate::codec::{CodecError, CodecValue};

/// A stateless, named transform between values and bytes.
///
/// Codecs are registered once under a serialization type code and shared
/// across threads afterwards, so implementations must not keep per-call
/// mutable state.
pub trait Codec: Send + Sync {
    /// Serializes `value` into a fresh byte vector.
    fn encode(&self, value: &dyn CodecValue) -> Result<Vec<u8>, CodecError>;

    /// Deserializes `bytes` into `target`, replacing its contents.
    fn decode(&self, bytes: &[u8], target: &mut dyn CodecValue) -> Result<(), CodecError>;

    fn name(&self) -> &str;
}
