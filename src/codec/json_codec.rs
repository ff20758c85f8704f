use crate::codec::{Codec, CodecError, CodecValue};

/// Text codec producing compact JSON. Registered under type code `1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub const NAME: &'static str = "json";
}

impl Codec for JsonCodec {
    fn encode(&self, value: &dyn CodecValue) -> Result<Vec<u8>, CodecError> {
        let structured = value
            .as_structured()
            .ok_or_else(|| CodecError::invalid_message(Self::NAME))?;

        let tree = structured.to_structured()?;

        serde_json::to_vec(&tree).map_err(|e| CodecError::malformed(Self::NAME, e))
    }

    fn decode(&self, bytes: &[u8], target: &mut dyn CodecValue) -> Result<(), CodecError> {
        let structured = target
            .as_structured_mut()
            .ok_or_else(|| CodecError::invalid_message(Self::NAME))?;

        let tree: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| CodecError::malformed(Self::NAME, e))?;

        structured.load_structured(tree)
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
