use crate::{
    codec::CodecRegistry,
    constants::{DEFAULT_MAX_DECOMPRESSED_SIZE, ENCRYPTION_KEY_SIZE, PROTOCOL_VERSION},
    header::{CompressType, Header, MessageType, SerializationType},
    protocol::{CompactProtocol, CompressingProtocol, DefaultProtocol, EncryptingProtocol, Protocol},
};
use std::fmt;
use std::sync::Arc;

/// How the header's correlation id and size fields are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// 22-byte fixed header.
    #[default]
    Fixed,

    /// Varint-encoded id and sizes.
    Compact,
}

/// Per-connection protocol options.
///
/// Both ends of a connection must agree on `framing` and `encryption_key`;
/// the remaining options travel in each header.
#[derive(Clone, PartialEq, Eq)]
pub struct ProtocolConfig {
    pub version: u8,
    pub serialization: SerializationType,
    pub compression: CompressType,
    pub framing: Framing,
    pub encryption_key: Option<[u8; ENCRYPTION_KEY_SIZE]>,

    /// Largest payload a gzip-compressed message may inflate to on decode.
    pub max_decompressed_size: u32,
}

impl ProtocolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn with_serialization(mut self, serialization: SerializationType) -> Self {
        self.serialization = serialization;
        self
    }

    pub fn with_compression(mut self, compression: CompressType) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    pub fn with_encryption_key(mut self, key: [u8; ENCRYPTION_KEY_SIZE]) -> Self {
        self.encryption_key = Some(key);
        self
    }

    pub fn with_max_decompressed_size(mut self, limit: u32) -> Self {
        self.max_decompressed_size = limit;
        self
    }

    pub fn request_header(&self, message_id: u64) -> Header {
        self.header(MessageType::Request, message_id)
    }

    pub fn response_header(&self, message_id: u64) -> Header {
        self.header(MessageType::Response, message_id)
    }

    fn header(&self, message_type: MessageType, message_id: u64) -> Header {
        Header::new(message_type, self.serialization, message_id)
            .with_version(self.version)
            .with_compression(self.compression)
    }

    /// Assembles the protocol stack for these options.
    ///
    /// The compressing layer sits outside the encrypting one so payloads are
    /// compressed before they are sealed.
    pub fn build(&self, registry: Arc<CodecRegistry>) -> Box<dyn Protocol> {
        match (self.framing, self.encryption_key.as_ref()) {
            (Framing::Fixed, None) => Box::new(self.compressing(DefaultProtocol::new(registry))),
            (Framing::Fixed, Some(key)) => Box::new(
                self.compressing(EncryptingProtocol::new(DefaultProtocol::new(registry), key)),
            ),
            (Framing::Compact, None) => Box::new(self.compressing(CompactProtocol::new(registry))),
            (Framing::Compact, Some(key)) => Box::new(
                self.compressing(EncryptingProtocol::new(CompactProtocol::new(registry), key)),
            ),
        }
    }

    fn compressing<P: Protocol>(&self, inner: P) -> CompressingProtocol<P> {
        CompressingProtocol::new(inner).with_max_decompressed_size(self.max_decompressed_size)
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            version: PROTOCOL_VERSION,
            serialization: SerializationType::Json,
            compression: CompressType::None,
            framing: Framing::Fixed,
            encryption_key: None,
            max_decompressed_size: DEFAULT_MAX_DECOMPRESSED_SIZE,
        }
    }
}

impl fmt::Debug for ProtocolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolConfig")
            .field("version", &self.version)
            .field("serialization", &self.serialization)
            .field("compression", &self.compression)
            .field("framing", &self.framing)
            .field("encrypted", &self.encryption_key.is_some())
            .field("max_decompressed_size", &self.max_decompressed_size)
            .finish()
    }
}
