use crate::protocol::{Phase, ProtocolError, framing::read_exact};
use std::io::Read;

// Unsigned LEB128: seven value bits per byte, low group first, high bit set
// on every byte except the last.

pub(crate) fn encode_uvarint(mut value: u64, buf: &mut Vec<u8>) {
    while value >= 0x80 {
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

pub(crate) fn uvarint_len(mut value: u64) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

/// Reads one varint of at most `max_len` bytes whose value fits in `max_bits`.
pub(crate) fn read_uvarint(
    source: &mut dyn Read,
    max_len: usize,
    max_bits: u32,
    phase: Phase,
) -> Result<u64, ProtocolError> {
    let mut value: u64 = 0;
    let mut byte = [0u8; 1];

    for index in 0..max_len {
        read_exact(source, &mut byte, phase)?;

        let shift = 7 * index as u32;
        let group = u64::from(byte[0] & 0x7F);

        if shift + (u64::BITS - group.leading_zeros()) > max_bits {
            return Err(ProtocolError::InvalidVarint { phase });
        }

        value |= group << shift;

        if byte[0] & 0x80 == 0 {
            return Ok(value);
        }
    }

    Err(ProtocolError::InvalidVarint { phase })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(value: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_uvarint(value, &mut buf);
        buf
    }

    #[test]
    fn known_encodings() {
        assert_eq!(encoded(0), vec![0x00]);
        assert_eq!(encoded(1), vec![0x01]);
        assert_eq!(encoded(127), vec![0x7F]);
        assert_eq!(encoded(128), vec![0x80, 0x01]);
        assert_eq!(encoded(300), vec![0xAC, 0x02]);
        assert_eq!(encoded(u64::MAX).len(), 10);
    }

    #[test]
    fn length_matches_encoding() {
        for value in [0, 127, 128, 16_383, 16_384, 1_234_567_890, u64::MAX] {
            assert_eq!(uvarint_len(value), encoded(value).len(), "value {}", value);
        }
    }

    #[test]
    fn reads_back_boundaries() {
        for value in [0, 1, 127, 128, 300, u32::MAX as u64, u64::MAX] {
            let bytes = encoded(value);
            let mut source = bytes.as_slice();
            let decoded = read_uvarint(&mut source, 10, 64, Phase::Header).expect("decode");
            assert_eq!(decoded, value);
            assert!(source.is_empty());
        }
    }

    #[test]
    fn rejects_value_wider_than_field() {
        let bytes = encoded(u32::MAX as u64 + 1);
        let mut source = bytes.as_slice();
        let err = read_uvarint(&mut source, 5, 32, Phase::Header).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidVarint { phase: Phase::Header }));
    }

    #[test]
    fn rejects_unterminated_varint() {
        let bytes = [0xFFu8; 11];
        let mut source = &bytes[..];
        let err = read_uvarint(&mut source, 10, 64, Phase::Header).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidVarint { .. }));
    }

    #[test]
    fn truncated_varint_is_eof() {
        let bytes = [0x80u8, 0x80];
        let mut source = &bytes[..];
        let err = read_uvarint(&mut source, 10, 64, Phase::Header).unwrap_err();
        assert!(err.is_unexpected_eof());
    }
}
