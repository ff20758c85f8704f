use crate::codec::{Codec, CodecError, CodecValue};

/// Schema-binary codec backed by `bitcode`. Registered under type code `2`.
///
/// Only values implementing [`SchemaMessage`](crate::codec::SchemaMessage)
/// are accepted; anything else fails with `InvalidMessage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec;

impl BinaryCodec {
    pub const NAME: &'static str = "bitcode";
}

impl Codec for BinaryCodec {
    fn encode(&self, value: &dyn CodecValue) -> Result<Vec<u8>, CodecError> {
        let schema = value
            .as_schema()
            .ok_or_else(|| CodecError::invalid_message(Self::NAME))?;

        Ok(schema.encode_schema())
    }

    fn decode(&self, bytes: &[u8], target: &mut dyn CodecValue) -> Result<(), CodecError> {
        let schema = target
            .as_schema_mut()
            .ok_or_else(|| CodecError::invalid_message(Self::NAME))?;

        schema.decode_schema(bytes).map_err(|e| match e {
            CodecError::Malformed { reason, .. } => CodecError::malformed(Self::NAME, reason),
            other => other,
        })
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
