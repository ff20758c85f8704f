use crate::codec::CodecError;
use serde::{Serialize, de::DeserializeOwned};

/// A value that can be handed to a [`Codec`](crate::codec::Codec).
///
/// Each codec asks for the one capability it understands. A value opts in to
/// a capability by returning `Some` from the matching accessor; the defaults
/// opt out, and a codec receiving `None` fails with `InvalidMessage`.
pub trait CodecValue {
    fn as_structured(&self) -> Option<&dyn StructuredValue> {
        None
    }

    fn as_structured_mut(&mut self) -> Option<&mut dyn StructuredValue> {
        None
    }

    fn as_schema(&self) -> Option<&dyn SchemaMessage> {
        None
    }

    fn as_schema_mut(&mut self) -> Option<&mut dyn SchemaMessage> {
        None
    }
}

/// Capability used by self-describing codecs (JSON and most user codecs).
///
/// The value is bridged through a `serde_json::Value` tree so that codecs can
/// be stored as trait objects.
pub trait StructuredValue {
    fn to_structured(&self) -> Result<serde_json::Value, CodecError>;

    fn load_structured(&mut self, value: serde_json::Value) -> Result<(), CodecError>;
}

/// Capability used by the schema-binary codec.
pub trait SchemaMessage {
    fn encode_schema(&self) -> Vec<u8>;

    fn decode_schema(&mut self, bytes: &[u8]) -> Result<(), CodecError>;
}

/// Adapts any serde type into a [`CodecValue`] with the structured capability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Structured<T>(pub T);

impl<T> Structured<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> StructuredValue for Structured<T>
where
    T: Serialize + DeserializeOwned,
{
    fn to_structured(&self) -> Result<serde_json::Value, CodecError> {
        serde_json::to_value(&self.0).map_err(|e| CodecError::malformed("structured", e))
    }

    fn load_structured(&mut self, value: serde_json::Value) -> Result<(), CodecError> {
        self.0 = serde_json::from_value(value).map_err(|e| CodecError::malformed("structured", e))?;
        Ok(())
    }
}

impl<T> CodecValue for Structured<T>
where
    T: Serialize + DeserializeOwned,
{
    fn as_structured(&self) -> Option<&dyn StructuredValue> {
        Some(self)
    }

    fn as_structured_mut(&mut self) -> Option<&mut dyn StructuredValue> {
        Some(self)
    }
}

/// Adapts any bitcode type into a [`CodecValue`] with the schema capability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema<T>(pub T);

impl<T> Schema<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> SchemaMessage for Schema<T>
where
    T: bitcode::Encode + bitcode::DecodeOwned,
{
    fn encode_schema(&self) -> Vec<u8> {
        bitcode::encode(&self.0)
    }

    fn decode_schema(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        self.0 = bitcode::decode(bytes).map_err(|e| CodecError::malformed("schema", e))?;
        Ok(())
    }
}

impl<T> CodecValue for Schema<T>
where
    T: bitcode::Encode + bitcode::DecodeOwned,
{
    fn as_schema(&self) -> Option<&dyn SchemaMessage> {
        Some(self)
    }

    fn as_schema_mut(&mut self) -> Option<&mut dyn SchemaMessage> {
        Some(self)
    }
}
