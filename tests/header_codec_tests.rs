use rpcwire::constants::{HEADER_SIZE, MAGIC_NUMBER, PROTOCOL_VERSION};
use rpcwire::header::{CompressType, Header, HeaderCodec, MessageType, SerializationType};
use rpcwire::protocol::{DefaultProtocol, Message, Phase, Protocol, ProtocolError};
use std::collections::HashSet;

fn sample_header() -> Header {
    Header {
        magic: MAGIC_NUMBER,
        version: PROTOCOL_VERSION,
        message_type: MessageType::Request,
        compress_type: CompressType::None,
        serialization_type: SerializationType::Json,
        message_id: 1234567890,
        metadata_size: 0x0102_0304,
        payload_size: 8,
    }
}

#[test]
fn header_encodes_to_fixed_big_endian_layout() {
    let bytes = HeaderCodec::encode(&sample_header());

    assert_eq!(bytes.len(), HEADER_SIZE);
    assert_eq!(HEADER_SIZE, 22);
    assert_eq!(
        bytes,
        [
            0x3F, 0x3F, // magic
            0x01, // version
            0x01, // message type
            0x00, // compress type
            0x01, // serialization type
            0x00, 0x00, 0x00, 0x00, 0x49, 0x96, 0x02, 0xD2, // message id
            0x01, 0x02, 0x03, 0x04, // metadata size
            0x00, 0x00, 0x00, 0x08, // payload size
        ]
    );
}

#[test]
fn header_decodes_what_it_encodes() {
    let header = sample_header();
    let decoded = HeaderCodec::decode(&HeaderCodec::encode(&header)).unwrap();
    assert_eq!(decoded, header);
}

#[test]
fn decode_ignores_trailing_bytes() {
    let mut bytes = HeaderCodec::encode(&sample_header()).to_vec();
    bytes.extend_from_slice(b"trailing");

    assert_eq!(HeaderCodec::decode(&bytes).unwrap(), sample_header());
}

#[test]
fn every_single_bit_flip_in_magic_is_rejected() {
    let bytes = HeaderCodec::encode(&sample_header());

    for bit in 0..16 {
        let mut corrupted = bytes;
        corrupted[bit / 8] ^= 1 << (bit % 8);

        match HeaderCodec::decode(&corrupted) {
            Err(ProtocolError::InvalidMagic { found }) => {
                assert_ne!(found, MAGIC_NUMBER);
                assert_eq!(found, u16::from_be_bytes([corrupted[0], corrupted[1]]));
            }
            other => panic!("expected InvalidMagic for bit {}, got {:?}", bit, other),
        }
    }
}

#[test]
fn invalid_magic_reports_header_phase() {
    let mut bytes = HeaderCodec::encode(&sample_header());
    bytes[0] = 0;

    let err = HeaderCodec::decode(&bytes).unwrap_err();
    assert_eq!(err.phase(), Some(Phase::Header));
}

#[test]
fn short_buffer_is_incomplete_header() {
    let bytes = HeaderCodec::encode(&sample_header());

    match HeaderCodec::decode(&bytes[..HEADER_SIZE - 1]) {
        Err(ProtocolError::IncompleteHeader { needed, have }) => {
            assert_eq!(needed, HEADER_SIZE);
            assert_eq!(have, HEADER_SIZE - 1);
        }
        other => panic!("expected IncompleteHeader, got {:?}", other),
    }
}

#[test]
fn unknown_type_codes_and_version_round_trip() {
    let mut bytes = HeaderCodec::encode(&sample_header());
    bytes[2] = 0x7E;
    bytes[3] = 9;
    bytes[4] = 5;
    bytes[5] = 42;

    let header = HeaderCodec::decode(&bytes).unwrap();
    assert_eq!(header.version, 0x7E);
    assert_eq!(header.message_type, MessageType::Other(9));
    assert_eq!(header.compress_type, CompressType::Other(5));
    assert_eq!(header.serialization_type, SerializationType::Custom(42));

    assert_eq!(HeaderCodec::encode(&header), bytes);
}

#[test]
fn known_type_codes_map_to_named_variants() {
    assert_eq!(MessageType::from(1), MessageType::Request);
    assert_eq!(MessageType::from(2), MessageType::Response);
    assert_eq!(CompressType::from(0), CompressType::None);
    assert_eq!(CompressType::from(1), CompressType::Gzip);
    assert_eq!(SerializationType::from(1), SerializationType::Json);
    assert_eq!(SerializationType::from(2), SerializationType::Binary);
    assert_eq!(u8::from(SerializationType::Custom(3)), 3);
}

#[test]
fn extreme_field_values_survive() {
    let header = Header {
        message_id: u64::MAX,
        metadata_size: u32::MAX,
        payload_size: u32::MAX,
        ..sample_header()
    };

    assert_eq!(HeaderCodec::decode(&HeaderCodec::encode(&header)).unwrap(), header);
}

#[test]
fn version_policy_accepts_minor_revisions_only() {
    let header = Header::default();
    assert_eq!(header.version, PROTOCOL_VERSION);
    assert!(header.ensure_supported_version().is_ok());

    let newer_minor = header.with_version(0x0F);
    assert_eq!(newer_minor.major_version(), 0);
    assert_eq!(newer_minor.minor_version(), 0x0F);
    assert!(newer_minor.ensure_supported_version().is_ok());

    for version in [0x10, 0x21, 0xF1] {
        match header.with_version(version).ensure_supported_version() {
            Err(ProtocolError::UnsupportedVersion { version: found }) => {
                assert_eq!(found, version)
            }
            other => panic!("expected UnsupportedVersion, got {:?}", other),
        }
    }
}

#[test]
fn decode_does_not_enforce_version_policy() {
    let header = sample_header().with_version(0x30);
    let decoded = HeaderCodec::decode(&HeaderCodec::encode(&header)).unwrap();
    assert_eq!(decoded.version, 0x30);
}

#[test]
fn catch_all_with_known_code_equals_named_variant() {
    assert_eq!(MessageType::Other(1), MessageType::Request);
    assert_eq!(CompressType::Other(0), CompressType::None);
    assert_eq!(SerializationType::Custom(1), SerializationType::Json);
    assert_ne!(SerializationType::Custom(2), SerializationType::Json);

    let codes: HashSet<SerializationType> = [
        SerializationType::Json,
        SerializationType::Custom(1),
        SerializationType::Binary,
        SerializationType::Custom(2),
    ]
    .into_iter()
    .collect();
    assert_eq!(codes.len(), 2);
}

#[test]
fn normalized_returns_the_named_variant() {
    assert!(matches!(MessageType::Other(2).normalized(), MessageType::Response));
    assert!(matches!(CompressType::Other(1).normalized(), CompressType::Gzip));
    assert!(matches!(
        SerializationType::Custom(2).normalized(),
        SerializationType::Binary
    ));
    assert!(matches!(
        SerializationType::Custom(9).normalized(),
        SerializationType::Custom(9)
    ));
}

#[test]
fn header_built_from_catch_all_codes_round_trips() {
    let header = Header::new(MessageType::Other(1), SerializationType::Custom(1), 1)
        .with_compression(CompressType::Other(0));

    let decoded = HeaderCodec::decode(&HeaderCodec::encode(&header)).unwrap();
    assert_eq!(decoded, header);

    let message = Message::new(header, None, b"{}".to_vec());
    let protocol = DefaultProtocol::default();
    let decoded = protocol
        .decode_from_slice(&protocol.encode_to_vec(&message).unwrap())
        .unwrap();

    assert_eq!(decoded.header.message_type, message.header.message_type);
    assert_eq!(decoded.header.compress_type, message.header.compress_type);
    assert_eq!(
        decoded.header.serialization_type,
        message.header.serialization_type
    );
    assert_eq!(decoded.payload, message.payload);
}
