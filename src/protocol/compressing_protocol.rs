use crate::{
    constants::DEFAULT_MAX_DECOMPRESSED_SIZE,
    header::CompressType,
    protocol::{Message, Phase, Protocol, ProtocolError},
};
use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use std::io::{Read, Write};

/// Decorator that applies the compression named by the header's
/// `compress_type` to the payload.
///
/// Compression is chosen per message by the header, not by the decorator, so
/// a single instance handles both compressed and uncompressed traffic.
/// Decompressed payloads are capped at `max_decompressed_size` bytes.
#[derive(Debug, Clone)]
pub struct CompressingProtocol<P> {
    inner: P,
    level: Compression,
    max_decompressed_size: u32,
}

impl<P: Protocol> CompressingProtocol<P> {
    pub fn new(inner: P) -> Self {
        Self::with_level(inner, Compression::default())
    }

    pub fn with_level(inner: P, level: Compression) -> Self {
        Self {
            inner,
            level,
            max_decompressed_size: DEFAULT_MAX_DECOMPRESSED_SIZE,
        }
    }

    pub fn with_max_decompressed_size(mut self, limit: u32) -> Self {
        self.max_decompressed_size = limit;
        self
    }

    pub fn max_decompressed_size(&self) -> u32 {
        self.max_decompressed_size
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }

    fn compress(&self, compress_type: CompressType, payload: &[u8]) -> Result<Option<Vec<u8>>, ProtocolError> {
        match compress_type.normalized() {
            CompressType::None => Ok(None),
            CompressType::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), self.level);
                encoder
                    .write_all(payload)
                    .and_then(|_| encoder.finish())
                    .map(Some)
                    .map_err(|source| ProtocolError::Compression { source })
            }
            CompressType::Other(compress_type) => {
                Err(ProtocolError::UnsupportedCompression { compress_type })
            }
        }
    }

    fn decompress(&self, compress_type: CompressType, payload: &[u8]) -> Result<Option<Vec<u8>>, ProtocolError> {
        match compress_type.normalized() {
            CompressType::None => Ok(None),
            CompressType::Gzip => {
                let limit = u64::from(self.max_decompressed_size);
                let mut decompressed = Vec::new();

                // One byte past the limit is enough to tell that it was exceeded.
                GzDecoder::new(payload)
                    .take(limit + 1)
                    .read_to_end(&mut decompressed)
                    .map_err(|source| ProtocolError::Compression { source })?;

                if decompressed.len() as u64 > limit {
                    return Err(ProtocolError::SizeOverflow {
                        phase: Phase::Payload,
                        size: decompressed.len(),
                    });
                }

                Ok(Some(decompressed))
            }
            CompressType::Other(compress_type) => {
                Err(ProtocolError::UnsupportedCompression { compress_type })
            }
        }
    }
}

impl<P: Protocol> Protocol for CompressingProtocol<P> {
    fn encode_message(&self, message: &Message, sink: &mut dyn Write) -> Result<(), ProtocolError> {
        match self.compress(message.header.compress_type, &message.payload)? {
            None => self.inner.encode_message(message, sink),
            Some(payload) => {
                tracing::trace!(
                    message_id = message.header.message_id,
                    original = message.payload.len(),
                    compressed = payload.len(),
                    "compressed payload"
                );

                let compressed = Message {
                    header: message.header,
                    metadata: message.metadata.clone(),
                    payload,
                };
                self.inner.encode_message(&compressed, sink)
            }
        }
    }

    fn decode_message(&self, source: &mut dyn Read) -> Result<Message, ProtocolError> {
        let mut message = self.inner.decode_message(source)?;

        let decompressed = self
            .decompress(message.header.compress_type, &message.payload)
            .inspect_err(|err| {
                tracing::debug!(
                    message_id = message.header.message_id,
                    "payload decompression failed: {}",
                    err
                );
            })?;

        if let Some(payload) = decompressed {
            // Bounded by `max_decompressed_size`, which is a `u32`.
            message.header.payload_size = payload.len() as u32;
            message.payload = payload;
        }

        Ok(message)
    }
}
