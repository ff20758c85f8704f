use crate::{
    codec::CodecRegistry,
    constants::{HEADER_SIZE, HEADER_VERSION_OFFSET, MAGIC_NUMBER},
    header::{Header, HeaderCodec, check_magic},
    protocol::{
        Message, Phase, Protocol, ProtocolError,
        framing::{
            decode_metadata, encode_metadata, read_exact, read_segment, resolve_codec,
            segment_size, write_segment,
        },
    },
};
use std::io::{Read, Write};
use std::sync::Arc;

/// Fixed-header framing: a 22-byte header, then the serialized metadata,
/// then the raw payload.
///
/// This is the assembler every other protocol either wraps or mirrors. It
/// never compresses or encrypts; decorators layer those on top.
#[derive(Debug, Clone)]
pub struct DefaultProtocol {
    registry: Arc<CodecRegistry>,
}

impl DefaultProtocol {
    pub fn new(registry: Arc<CodecRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<CodecRegistry> {
        &self.registry
    }

    fn encode_inner(&self, message: &Message, sink: &mut dyn Write) -> Result<Header, ProtocolError> {
        let codec = resolve_codec(&self.registry, message.header.serialization_type)?;
        let metadata_bytes = encode_metadata(codec.as_ref(), message.metadata.as_ref())?;

        // Sizes always come from the actual segments, never from the input.
        let mut header = message.header;
        header.magic = MAGIC_NUMBER;
        header.metadata_size = segment_size(metadata_bytes.len(), Phase::Metadata)?;
        header.payload_size = segment_size(message.payload.len(), Phase::Payload)?;

        write_segment(sink, &HeaderCodec::encode(&header), Phase::Header)?;
        write_segment(sink, &metadata_bytes, Phase::Metadata)?;
        write_segment(sink, &message.payload, Phase::Payload)?;

        Ok(header)
    }

    fn decode_inner(&self, source: &mut dyn Read) -> Result<Message, ProtocolError> {
        let header = read_header(source)?;

        // Both segments are consumed before the codec lookup so that the
        // stream stays aligned on the next message if the lookup fails.
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

impl Default for DefaultProtocol {
    fn default() -> Self {
        Self::new(CodecRegistry::global())
    }
}

impl Protocol for DefaultProtocol {
    fn encode_message(&self, message: &Message, sink: &mut dyn Write) -> Result<(), ProtocolError> {
        match self.encode_inner(message, sink) {
            Ok(header) => {
                tracing::trace!(
                    message_id = header.message_id,
                    serialization_type = header.serialization_type.value(),
                    metadata_size = header.metadata_size,
                    payload_size = header.payload_size,
                    "encoded message"
                );
                Ok(())
            }
            Err(err) => {
                tracing::debug!(
                    message_id = message.header.message_id,
                    phase = ?err.phase(),
                    "encode failed: {}",
                    err
                );
                Err(err)
            }
        }
    }

    fn decode_message(&self, source: &mut dyn Read) -> Result<Message, ProtocolError> {
        self.decode_inner(source)
            .inspect(|message| {
                tracing::trace!(
                    message_id = message.header.message_id,
                    serialization_type = message.header.serialization_type.value(),
                    metadata_size = message.header.metadata_size,
                    payload_size = message.header.payload_size,
                    "decoded message"
                );
            })
            .inspect_err(|err| {
                tracing::debug!(phase = ?err.phase(), "decode failed: {}", err);
            })
    }
}

/// Reads the magic first so that a foreign stream is rejected before any
/// further bytes are consumed.
fn read_header(source: &mut dyn Read) -> Result<Header, ProtocolError> {
    let mut buf = [0u8; HEADER_SIZE];

    read_exact(source, &mut buf[..HEADER_VERSION_OFFSET], Phase::Header)?;
    check_magic(&buf)?;
    read_exact(source, &mut buf[HEADER_VERSION_OFFSET..], Phase::Header)?;

    HeaderCodec::decode(&buf)
}
