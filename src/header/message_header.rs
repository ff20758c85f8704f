use crate::{
    constants::{MAGIC_NUMBER, PROTOCOL_VERSION, SUPPORTED_MAJOR_VERSION},
    header::{CompressType, MessageType, SerializationType},
    protocol::ProtocolError,
};

/// Fixed-layout control block that starts every message.
///
/// The two size fields describe the segments that follow the header on the
/// wire. They are computed by the protocol during encode; whatever a caller
/// sets here before encoding is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Always `0x3F3F` on a valid stream.
    pub magic: u16,

    /// Protocol version. Decoded structurally; see
    /// [`Header::ensure_supported_version`] for the compatibility policy.
    pub version: u8,

    pub message_type: MessageType,

    pub compress_type: CompressType,

    /// Selects the codec for the metadata block.
    pub serialization_type: SerializationType,

    /// Correlation id pairing a response with its request.
    ///
    /// Assigned by the caller; the protocol only guarantees that the id
    /// written on encode is the id read back on decode.
    pub message_id: u64,

    /// Byte length of the serialized metadata that follows the header.
    pub metadata_size: u32,

    /// Byte length of the raw payload that follows the metadata.
    pub payload_size: u32,
}

impl Header {
    pub fn new(
        message_type: MessageType,
        serialization_type: SerializationType,
        message_id: u64,
    ) -> Self {
        Self {
            magic: MAGIC_NUMBER,
            version: PROTOCOL_VERSION,
            message_type,
            compress_type: CompressType::None,
            serialization_type,
            message_id,
            metadata_size: 0,
            payload_size: 0,
        }
    }

    pub fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn with_compression(mut self, compress_type: CompressType) -> Self {
        self.compress_type = compress_type;
        self
    }

    #[inline]
    pub fn major_version(&self) -> u8 {
        self.version >> 4
    }

    #[inline]
    pub fn minor_version(&self) -> u8 {
        self.version & 0x0F
    }

    /// Rejects an unknown major version line; unknown minor revisions of the
    /// supported line are accepted.
    ///
    /// Decoding never calls this on its own. Callers that want to enforce
    /// compatibility call it on the decoded header.
    pub fn ensure_supported_version(&self) -> Result<(), ProtocolError> {
        if self.major_version() != SUPPORTED_MAJOR_VERSION {
            return Err(ProtocolError::UnsupportedVersion {
                version: self.version,
            });
        }

        Ok(())
    }
}

impl Default for Header {
    fn default() -> Self {
        Header::new(MessageType::Request, SerializationType::Json, 0)
    }
}
