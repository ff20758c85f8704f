// Header related constants

/// Leading bytes of every message. Anything else is a foreign or
/// desynchronized stream.
pub const MAGIC_NUMBER: u16 = 0x3F3F;

/// Version byte written by default. High nibble is the major line, low
/// nibble the minor revision.
pub const PROTOCOL_VERSION: u8 = 0x01;

/// Major version line this build can decode.
pub const SUPPORTED_MAJOR_VERSION: u8 = PROTOCOL_VERSION >> 4;

pub const HEADER_MAGIC_OFFSET: usize = 0;
pub const HEADER_VERSION_OFFSET: usize = 2;
pub const HEADER_MESSAGE_TYPE_OFFSET: usize = 3;
pub const HEADER_COMPRESS_TYPE_OFFSET: usize = 4;
pub const HEADER_SERIALIZATION_TYPE_OFFSET: usize = 5;
pub const HEADER_MESSAGE_ID_OFFSET: usize = 6;
pub const HEADER_METADATA_SIZE_OFFSET: usize = 14;
pub const HEADER_PAYLOAD_SIZE_OFFSET: usize = 18;

/// Total size of the fixed-length header, big-endian, no padding.
/// Computed as: offset of payload size field + its size (18 + 4 = 22).
pub const HEADER_SIZE: usize = HEADER_PAYLOAD_SIZE_OFFSET + 4;

/// Bytes shared by the fixed and compact framings before the first
/// variable-width field (magic, version, and the three type codes).
pub const HEADER_PREFIX_SIZE: usize = HEADER_MESSAGE_ID_OFFSET;

/// Longest LEB128 encoding of a `u64`.
pub const VARINT_MAX_LEN_U64: usize = 10;

/// Longest LEB128 encoding of a `u32`.
pub const VARINT_MAX_LEN_U32: usize = 5;

// Encryption related constants

/// Size of the symmetric key accepted by the encrypting decorator.
pub const ENCRYPTION_KEY_SIZE: usize = 32;

/// Nonce prepended to every encrypted payload.
pub const ENCRYPTION_NONCE_SIZE: usize = 12;

/// Authentication tag appended by the AEAD.
pub const ENCRYPTION_TAG_SIZE: usize = 16;

// Compression related constants

/// Default ceiling on a decompressed payload. A gzip stream that inflates past
/// this is rejected instead of being buffered.
pub const DEFAULT_MAX_DECOMPRESSED_SIZE: u32 = 64 * 1024 * 1024;
