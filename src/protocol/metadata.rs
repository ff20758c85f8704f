use crate::codec::{CodecError, CodecValue, SchemaMessage, StructuredValue};
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Call identity and side-channel fields carried alongside the payload.
///
/// Serialized with the codec named by the header's serialization type; it is
/// not framed separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    /// Required on requests; may be empty on pure-error responses.
    pub service_name: String,

    /// Required on requests; may be empty on pure-error responses.
    pub method_name: String,

    /// Non-empty only on failed responses.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error: String,

    /// Cross-cutting values such as trace identifiers.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Metadata {
    pub fn new(service_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            method_name: method_name.into(),
            ..Self::default()
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}

impl StructuredValue for Metadata {
    fn to_structured(&self) -> Result<serde_json::Value, CodecError> {
        serde_json::to_value(self).map_err(|e| CodecError::malformed("metadata", e))
    }

    fn load_structured(&mut self, value: serde_json::Value) -> Result<(), CodecError> {
        *self = serde_json::from_value(value).map_err(|e| CodecError::malformed("metadata", e))?;
        Ok(())
    }
}

impl SchemaMessage for Metadata {
    fn encode_schema(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    fn decode_schema(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        *self = bitcode::decode(bytes).map_err(|e| CodecError::malformed("metadata", e))?;
        Ok(())
    }
}

impl CodecValue for Metadata {
    fn as_structured(&self) -> Option<&dyn StructuredValue> {
        Some(self)
    }

    fn as_structured_mut(&mut self) -> Option<&mut dyn StructuredValue> {
        Some(self)
    }

    fn as_schema(&self) -> Option<&dyn SchemaMessage> {
        Some(self)
    }

    fn as_schema_mut(&mut self) -> Option<&mut dyn SchemaMessage> {
        Some(self)
    }
}
