use std::fmt;

/// Failures raised by a [`Codec`](crate::codec::Codec).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The value handed to the codec does not expose the capability the codec
    /// needs (for example, a schema-binary codec given a value with no schema).
    InvalidMessage { codec: String },

    /// The codec's backend rejected the value or the bytes.
    Malformed { codec: String, reason: String },
}

impl CodecError {
    pub fn invalid_message(codec: &str) -> Self {
        CodecError::InvalidMessage {
            codec: codec.to_string(),
        }
    }

    pub fn malformed(codec: &str, reason: impl fmt::Display) -> Self {
        CodecError::Malformed {
            codec: codec.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidMessage { codec } => {
                write!(f, "value is not supported by the `{}` codec", codec)
            }
            CodecError::Malformed { codec, reason } => {
                write!(f, "`{}` codec failed: {}", codec, reason)
            }
        }
    }
}

impl std::error::Error for CodecError {}
