use crate::codec::CodecError;
use std::fmt;
use std::io;

/// Segment of a message being processed when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Header,
    Metadata,
    Payload,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Header => write!(f, "header"),
            Phase::Metadata => write!(f, "metadata"),
            Phase::Payload => write!(f, "payload"),
        }
    }
}

/// Represents failures of a single encode or decode call.
///
/// Every variant is fatal to the call that produced it. Nothing is retried
/// and no partial `Message` is returned.
#[derive(Debug)]
pub enum ProtocolError {
    /// The stream does not start with `0x3F3F`. The connection should be
    /// reset rather than resynchronized.
    InvalidMagic { found: u16 },

    /// A buffer handed to the header codec was shorter than a header.
    IncompleteHeader { needed: usize, have: usize },

    /// Returned by [`Header::ensure_supported_version`](crate::header::Header::ensure_supported_version)
    /// for an unknown major version.
    UnsupportedVersion { version: u8 },

    /// No codec is registered under the header's serialization type.
    UnsupportedSerializer { serialization_type: u8, phase: Phase },

    /// The codec was handed a value lacking the capability it needs.
    InvalidMessage { codec: String, phase: Phase },

    /// The codec rejected the value or the bytes.
    Codec { phase: Phase, source: CodecError },

    /// The transport failed. `source` is the transport's error, untouched;
    /// a truncated stream shows up as `io::ErrorKind::UnexpectedEof`.
    Io { phase: Phase, source: io::Error },

    /// A segment is longer than its `u32` size field can describe.
    SizeOverflow { phase: Phase, size: usize },

    /// A compact-framing varint is longer than its field allows.
    InvalidVarint { phase: Phase },

    /// The header names a compression this build does not implement.
    UnsupportedCompression { compress_type: u8 },

    /// The compressor or decompressor failed.
    Compression { source: io::Error },

    Encryption,

    /// The payload failed authentication or is too short to be sealed.
    Decryption,
}

impl ProtocolError {
    /// Maps a codec failure, keeping `InvalidMessage` as its own variant.
    pub(crate) fn from_codec(phase: Phase, err: CodecError) -> Self {
        match err {
            CodecError::InvalidMessage { codec } => ProtocolError::InvalidMessage { codec, phase },
            other => ProtocolError::Codec {
                phase,
                source: other,
            },
        }
    }

    /// Returns the segment the failure belongs to, when there is one.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            ProtocolError::InvalidMagic { .. }
            | ProtocolError::IncompleteHeader { .. }
            | ProtocolError::UnsupportedVersion { .. } => Some(Phase::Header),
            ProtocolError::UnsupportedSerializer { phase, .. }
            | ProtocolError::InvalidMessage { phase, .. }
            | ProtocolError::Codec { phase, .. }
            | ProtocolError::Io { phase, .. }
            | ProtocolError::SizeOverflow { phase, .. }
            | ProtocolError::InvalidVarint { phase } => Some(*phase),
            ProtocolError::UnsupportedCompression { .. }
            | ProtocolError::Compression { .. }
            | ProtocolError::Encryption
            | ProtocolError::Decryption => Some(Phase::Payload),
        }
    }

    /// The transport error, if this failure came from the transport.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            ProtocolError::Io { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn is_unexpected_eof(&self) -> bool {
        self.io_error()
            .is_some_and(|e| e.kind() == io::ErrorKind::UnexpectedEof)
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::InvalidMagic { found } => {
                write!(f, "invalid magic number: {:#06x}", found)
            }
            ProtocolError::IncompleteHeader { needed, have } => {
                write!(f, "incomplete header: need {} bytes, have {}", needed, have)
            }
            ProtocolError::UnsupportedVersion { version } => {
                write!(f, "unsupported protocol version: {:#04x}", version)
            }
            ProtocolError::UnsupportedSerializer {
                serialization_type,
                phase,
            } => write!(
                f,
                "unsupported serializer type {} ({})",
                serialization_type, phase
            ),
            ProtocolError::InvalidMessage { codec, phase } => {
                write!(f, "message type is invalid for `{}` codec ({})", codec, phase)
            }
            ProtocolError::Codec { phase, source } => write!(f, "{} ({})", source, phase),
            ProtocolError::Io { phase, source } => write!(f, "I/O error: {} ({})", source, phase),
            ProtocolError::SizeOverflow { phase, size } => {
                write!(f, "{} of {} bytes exceeds the u32 size field", phase, size)
            }
            ProtocolError::InvalidVarint { phase } => write!(f, "invalid varint ({})", phase),
            ProtocolError::UnsupportedCompression { compress_type } => {
                write!(f, "unsupported compress type {}", compress_type)
            }
            ProtocolError::Compression { source } => write!(f, "compression failed: {}", source),
            ProtocolError::Encryption => write!(f, "payload encryption failed"),
            ProtocolError::Decryption => write!(f, "payload decryption failed"),
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::Codec { source, .. } => Some(source),
            ProtocolError::Io { source, .. } => Some(source),
            ProtocolError::Compression { source } => Some(source),
            _ => None,
        }
    }
}
