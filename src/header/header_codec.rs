use crate::{
    constants::{
        HEADER_COMPRESS_TYPE_OFFSET, HEADER_MAGIC_OFFSET, HEADER_MESSAGE_ID_OFFSET,
        HEADER_MESSAGE_TYPE_OFFSET, HEADER_METADATA_SIZE_OFFSET, HEADER_PAYLOAD_SIZE_OFFSET,
        HEADER_PREFIX_SIZE, HEADER_SERIALIZATION_TYPE_OFFSET, HEADER_SIZE, HEADER_VERSION_OFFSET,
        MAGIC_NUMBER,
    },
    header::{CompressType, Header, MessageType, SerializationType},
    protocol::ProtocolError,
};

/// Encodes and decodes the 22-byte fixed header.
///
/// Field order and widths:
///
/// ```text
/// offset  size  field
/// 0       2     magic = 0x3F3F
/// 2       1     version
/// 3       1     message type
/// 4       1     compress type
/// 5       1     serialization type
/// 6       8     message id
/// 14      4     metadata size
/// 18      4     payload size
/// ```
///
/// All multi-byte fields are big-endian.
pub struct HeaderCodec;

impl HeaderCodec {
    /// Encodes a `Header` into exactly [`HEADER_SIZE`] bytes.
    ///
    /// Fields are written as given, including `magic` and both size fields.
    pub fn encode(header: &Header) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];

        buf[HEADER_MAGIC_OFFSET..HEADER_VERSION_OFFSET]
            .copy_from_slice(&header.magic.to_be_bytes());
        buf[HEADER_VERSION_OFFSET] = header.version;
        buf[HEADER_MESSAGE_TYPE_OFFSET] = header.message_type.value();
        buf[HEADER_COMPRESS_TYPE_OFFSET] = header.compress_type.value();
        buf[HEADER_SERIALIZATION_TYPE_OFFSET] = header.serialization_type.value();
        buf[HEADER_MESSAGE_ID_OFFSET..HEADER_METADATA_SIZE_OFFSET]
            .copy_from_slice(&header.message_id.to_be_bytes());
        buf[HEADER_METADATA_SIZE_OFFSET..HEADER_PAYLOAD_SIZE_OFFSET]
            .copy_from_slice(&header.metadata_size.to_be_bytes());
        buf[HEADER_PAYLOAD_SIZE_OFFSET..HEADER_SIZE]
            .copy_from_slice(&header.payload_size.to_be_bytes());

        buf
    }

    /// Decodes a `Header` from the first [`HEADER_SIZE`] bytes of `buf`.
    ///
    /// # Errors
    ///
    /// - `IncompleteHeader` if `buf` is shorter than the header.
    /// - `InvalidMagic` if the first two bytes are not `0x3F3F`. Nothing past
    ///   the magic is interpreted in that case.
    ///
    /// Unknown versions and type codes decode without error.
    pub fn decode(buf: &[u8]) -> Result<Header, ProtocolError> {
        if buf.len() < HEADER_SIZE {
            return Err(ProtocolError::IncompleteHeader {
                needed: HEADER_SIZE,
                have: buf.len(),
            });
        }

        let mut header = decode_prefix(buf)?;

        header.message_id = u64::from_be_bytes(read_array(buf, HEADER_MESSAGE_ID_OFFSET));
        header.metadata_size = u32::from_be_bytes(read_array(buf, HEADER_METADATA_SIZE_OFFSET));
        header.payload_size = u32::from_be_bytes(read_array(buf, HEADER_PAYLOAD_SIZE_OFFSET));

        Ok(header)
    }
}

/// Fails with `InvalidMagic` unless `buf` starts with the magic number.
pub(crate) fn check_magic(buf: &[u8]) -> Result<(), ProtocolError> {
    if buf.len() < HEADER_VERSION_OFFSET {
        return Err(ProtocolError::IncompleteHeader {
            needed: HEADER_VERSION_OFFSET,
            have: buf.len(),
        });
    }

    let found = u16::from_be_bytes(read_array(buf, HEADER_MAGIC_OFFSET));
    if found != MAGIC_NUMBER {
        return Err(ProtocolError::InvalidMagic { found });
    }

    Ok(())
}

/// Writes the fields shared by every framing: magic, version and the three
/// type codes.
pub(crate) fn encode_prefix(header: &Header, buf: &mut Vec<u8>) {
    buf.extend(&header.magic.to_be_bytes());
    buf.push(header.version);
    buf.push(header.message_type.value());
    buf.push(header.compress_type.value());
    buf.push(header.serialization_type.value());
}

/// Reads the shared prefix. The id and size fields are left at zero.
pub(crate) fn decode_prefix(buf: &[u8]) -> Result<Header, ProtocolError> {
    if buf.len() < HEADER_PREFIX_SIZE {
        return Err(ProtocolError::IncompleteHeader {
            needed: HEADER_PREFIX_SIZE,
            have: buf.len(),
        });
    }

    check_magic(buf)?;

    Ok(Header {
        magic: MAGIC_NUMBER,
        version: buf[HEADER_VERSION_OFFSET],
        message_type: MessageType::from(buf[HEADER_MESSAGE_TYPE_OFFSET]),
        compress_type: CompressType::from(buf[HEADER_COMPRESS_TYPE_OFFSET]),
        serialization_type: SerializationType::from(buf[HEADER_SERIALIZATION_TYPE_OFFSET]),
        message_id: 0,
        metadata_size: 0,
        payload_size: 0,
    })
}

// Callers check the length first, so the slice is always in range.
fn read_array<const N: usize>(buf: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&buf[offset..offset + N]);
    out
}
