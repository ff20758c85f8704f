use crate::{
    codec::CodecRegistry,
    constants::{
        HEADER_PREFIX_SIZE, HEADER_VERSION_OFFSET, MAGIC_NUMBER, VARINT_MAX_LEN_U32,
        VARINT_MAX_LEN_U64,
    },
    header::{Header, check_magic, decode_prefix, encode_prefix},
    protocol::{
        Message, Phase, Protocol, ProtocolError,
        framing::{
            decode_metadata, encode_metadata, read_exact, read_segment, resolve_codec,
            segment_size, write_segment,
        },
        varint::{encode_uvarint, read_uvarint, uvarint_len},
    },
};
use std::io::{Read, Write};
use std::sync::Arc;

/// Variable-width framing for connections that negotiate it.
///
/// Layout:
///
/// ```text
/// magic(2) version(1) message type(1) compress type(1) serialization type(1)
/// message id(uvarint) metadata size(uvarint) payload size(uvarint)
/// metadata(N) payload(M)
/// ```
///
/// A small request fits its header in 9 bytes instead of 22. The magic check
/// and the size-prefixed segments behave exactly as in [`DefaultProtocol`](crate::protocol::DefaultProtocol),
/// but the two framings are not interchangeable on one stream.
#[derive(Debug, Clone)]
pub struct CompactProtocol {
    registry: Arc<CodecRegistry>,
}

impl CompactProtocol {
    pub fn new(registry: Arc<CodecRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<CodecRegistry> {
        &self.registry
    }

    fn encode_inner(&self, message: &Message, sink: &mut dyn Write) -> Result<Header, ProtocolError> {
        let codec = resolve_codec(&self.registry, message.header.serialization_type)?;
        let metadata_bytes = encode_metadata(codec.as_ref(), message.metadata.as_ref())?;

        let mut header = message.header;
        header.magic = MAGIC_NUMBER;
        header.metadata_size = segment_size(metadata_bytes.len(), Phase::Metadata)?;
        header.payload_size = segment_size(message.payload.len(), Phase::Payload)?;

        let mut header_bytes = Vec::with_capacity(
            HEADER_PREFIX_SIZE
                + uvarint_len(header.message_id)
                + uvarint_len(header.metadata_size.into())
                + uvarint_len(header.payload_size.into()),
        );
        encode_prefix(&header, &mut header_bytes);
        encode_uvarint(header.message_id, &mut header_bytes);
        encode_uvarint(header.metadata_size.into(), &mut header_bytes);
        encode_uvarint(header.payload_size.into(), &mut header_bytes);

        write_segment(sink, &header_bytes, Phase::Header)?;
        write_segment(sink, &metadata_bytes, Phase::Metadata)?;
        write_segment(sink, &message.payload, Phase::Payload)?;

        Ok(header)
    }

    fn decode_inner(&self, source: &mut dyn Read) -> Result<Message, ProtocolError> {
        let header = read_header(source)?;

        let metadata_bytes = read_segment(source, header.metadata_size, Phase::Metadata)?;
        let payload = read_segment(source, header.payload_size, Phase::Payload)?;

        let codec = resolve_codec(&self.registry, header.serialization_type)?;
        let metadata = decode_metadata(codec.as_ref(), &metadata_bytes)?;

        Ok(Message {
            header,
            metadata,
            payload,
        })
    }
}

impl Default for CompactProtocol {
    fn default() -> Self {
        Self::new(CodecRegistry::global())
    }
}

impl Protocol for CompactProtocol {
    fn encode_message(&self, message: &Message, sink: &mut dyn Write) -> Result<(), ProtocolError> {
        self.encode_inner(message, sink)
            .map(|header| {
                tracing::trace!(
                    message_id = header.message_id,
                    metadata_size = header.metadata_size,
                    payload_size = header.payload_size,
                    "encoded compact message"
                );
            })
            .inspect_err(|err| {
                tracing::debug!(
                    message_id = message.header.message_id,
                    phase = ?err.phase(),
                    "compact encode failed: {}",
                    err
                );
            })
    }

    fn decode_message(&self, source: &mut dyn Read) -> Result<Message, ProtocolError> {
        self.decode_inner(source)
            .inspect(|message| {
                tracing::trace!(
                    message_id = message.header.message_id,
                    metadata_size = message.header.metadata_size,
                    payload_size = message.header.payload_size,
                    "decoded compact message"
                );
            })
            .inspect_err(|err| {
                tracing::debug!(phase = ?err.phase(), "compact decode failed: {}", err);
            })
    }
}

fn read_header(source: &mut dyn Read) -> Result<Header, ProtocolError> {
    let mut prefix = [0u8; HEADER_PREFIX_SIZE];

    read_exact(source, &mut prefix[..HEADER_VERSION_OFFSET], Phase::Header)?;
    check_magic(&prefix)?;
    read_exact(source, &mut prefix[HEADER_VERSION_OFFSET..], Phase::Header)?;

    let mut header = decode_prefix(&prefix)?;

    header.message_id = read_uvarint(source, VARINT_MAX_LEN_U64, u64::BITS, Phase::Header)?;
    header.metadata_size = read_size(source)?;
    header.payload_size = read_size(source)?;

    Ok(header)
}

fn read_size(source: &mut dyn Read) -> Result<u32, ProtocolError> {
    let size = read_uvarint(source, VARINT_MAX_LEN_U32, u32::BITS, Phase::Header)?;
    u32::try_from(size).map_err(|_| ProtocolError::InvalidVarint {
        phase: Phase::Header,
    })
}
