use crate::codec::{Codec, CodecRegistry};
use crate::header::SerializationType;
use crate::protocol::{Metadata, Phase, ProtocolError};
use std::io::{self, Read, Write};
use std::sync::Arc;

// Segment handling shared by every framing. Only the header layout differs
// between the fixed and compact protocols.

pub(crate) fn resolve_codec(
    registry: &CodecRegistry,
    serialization_type: SerializationType,
) -> Result<&Arc<dyn Codec>, ProtocolError> {
    registry
        .lookup(serialization_type)
        .ok_or(ProtocolError::UnsupportedSerializer {
            serialization_type: serialization_type.value(),
            phase: Phase::Metadata,
        })
}

/// Absent metadata serializes to zero bytes.
pub(crate) fn encode_metadata(
    codec: &dyn Codec,
    metadata: Option<&Metadata>,
) -> Result<Vec<u8>, ProtocolError> {
    match metadata {
        Some(metadata) => codec
            .encode(metadata)
            .map_err(|e| ProtocolError::from_codec(Phase::Metadata, e)),
        None => Ok(Vec::new()),
    }
}

/// A zero-length segment decodes to `None`.
pub(crate) fn decode_metadata(
    codec: &dyn Codec,
    bytes: &[u8],
) -> Result<Option<Metadata>, ProtocolError> {
    if bytes.is_empty() {
        return Ok(None);
    }

    let mut metadata = Metadata::default();
    codec
        .decode(bytes, &mut metadata)
        .map_err(|e| ProtocolError::from_codec(Phase::Metadata, e))?;

    Ok(Some(metadata))
}

pub(crate) fn segment_size(len: usize, phase: Phase) -> Result<u32, ProtocolError> {
    u32::try_from(len).map_err(|_| ProtocolError::SizeOverflow { phase, size: len })
}

pub(crate) fn write_segment(
    sink: &mut dyn Write,
    bytes: &[u8],
    phase: Phase,
) -> Result<(), ProtocolError> {
    if bytes.is_empty() {
        return Ok(());
    }

    sink.write_all(bytes)
        .map_err(|source| ProtocolError::Io { phase, source })
}

pub(crate) fn read_exact(
    source: &mut dyn Read,
    buf: &mut [u8],
    phase: Phase,
) -> Result<(), ProtocolError> {
    source
        .read_exact(buf)
        .map_err(|source| ProtocolError::Io { phase, source })
}

/// Reads exactly `size` bytes.
///
/// The buffer grows with the data actually received, so a corrupt size field
/// cannot force a large allocation up front.
pub(crate) fn read_segment(
    source: &mut dyn Read,
    size: u32,
    phase: Phase,
) -> Result<Vec<u8>, ProtocolError> {
    let mut buf = Vec::new();

    if size == 0 {
        return Ok(buf);
    }

    Read::take(&mut *source, u64::from(size))
        .read_to_end(&mut buf)
        .map_err(|source| ProtocolError::Io { phase, source })?;

    if buf.len() < size as usize {
        return Err(ProtocolError::Io {
            phase,
            source: io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected {} bytes, stream ended after {}", size, buf.len()),
            ),
        });
    }

    Ok(buf)
}
