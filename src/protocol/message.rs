use crate::header::{Header, MessageType, SerializationType};
use crate::protocol::Metadata;

/// A single RPC request or response.
///
/// Built per call and consumed by whichever layer holds it; nothing here is
/// shared with the protocol that encoded or decoded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: Header,

    /// `None` encodes to zero bytes with a metadata size of `0`, and a zero
    /// metadata size decodes back to `None`.
    pub metadata: Option<Metadata>,

    /// Opaque to the protocol. May be empty.
    pub payload: Vec<u8>,
}

impl Message {
    pub fn new(header: Header, metadata: Option<Metadata>, payload: Vec<u8>) -> Self {
        Self {
            header,
            metadata,
            payload,
        }
    }

    pub fn request(
        message_id: u64,
        serialization_type: SerializationType,
        metadata: Metadata,
        payload: Vec<u8>,
    ) -> Self {
        Self::new(
            Header::new(MessageType::Request, serialization_type, message_id),
            Some(metadata),
            payload,
        )
    }

    pub fn response(
        message_id: u64,
        serialization_type: SerializationType,
        metadata: Option<Metadata>,
        payload: Vec<u8>,
    ) -> Self {
        Self::new(
            Header::new(MessageType::Response, serialization_type, message_id),
            metadata,
            payload,
        )
    }

    /// A failed response carrying only an error string.
    pub fn error_response(
        message_id: u64,
        serialization_type: SerializationType,
        error: impl Into<String>,
    ) -> Self {
        Self::response(
            message_id,
            serialization_type,
            Some(Metadata::default().with_error(error)),
            Vec::new(),
        )
    }

    #[inline]
    pub fn message_id(&self) -> u64 {
        self.header.message_id
    }

    pub fn is_request(&self) -> bool {
        self.header.message_type == MessageType::Request
    }

    pub fn is_response(&self) -> bool {
        self.header.message_type == MessageType::Response
    }

    /// The error reported by the remote side, if any.
    pub fn error(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .filter(|metadata| metadata.is_error())
            .map(|metadata| metadata.error.as_str())
    }

    pub fn service_name(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.service_name.as_str())
    }

    pub fn method_name(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.method_name.as_str())
    }
}
