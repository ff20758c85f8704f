mod binary_codec;
mod codec_error;
mod codec_registry;
mod codec_trait;
mod codec_value;
mod json_codec;

pub use binary_codec::BinaryCodec;
pub use codec_error::CodecError;
pub use codec_registry::CodecRegistry;
pub use codec_trait::Codec;
pub use codec_value::{CodecValue, Schema, SchemaMessage, Structured, StructuredValue};
pub use json_codec::JsonCodec;
