use bitcode::{Decode, Encode};
use rpcwire::codec::{
    BinaryCodec, Codec, CodecError, CodecRegistry, CodecValue, JsonCodec, Schema, Structured,
};
use rpcwire::header::SerializationType;
use rpcwire::protocol::Metadata;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
struct GetUserRequest {
    id: u64,
    fields: Vec<String>,
}

/// JSON codec with indentation, used to exercise custom registration.
struct PrettyJsonCodec;

impl Codec for PrettyJsonCodec {
    fn encode(&self, value: &dyn CodecValue) -> Result<Vec<u8>, CodecError> {
        let structured = value
            .as_structured()
            .ok_or_else(|| CodecError::invalid_message("pretty-json"))?;
        serde_json::to_vec_pretty(&structured.to_structured()?)
            .map_err(|e| CodecError::malformed("pretty-json", e))
    }

    fn decode(&self, bytes: &[u8], target: &mut dyn CodecValue) -> Result<(), CodecError> {
        JsonCodec.decode(bytes, target)
    }

    fn name(&self) -> &str {
        "pretty-json"
    }
}

fn sample_metadata() -> Metadata {
    Metadata::new("UserService", "GetUser").with_extra("trace_id", "abc123")
}

#[test]
fn builtin_registry_has_json_and_binary() {
    let registry = CodecRegistry::with_builtin();

    assert_eq!(registry.type_codes(), vec![1, 2]);
    assert_eq!(
        registry.lookup(SerializationType::Json).unwrap().name(),
        JsonCodec::NAME
    );
    assert_eq!(
        registry.lookup(SerializationType::Binary).unwrap().name(),
        BinaryCodec::NAME
    );
}

#[test]
fn lookup_of_unregistered_code_is_none() {
    let registry = CodecRegistry::with_builtin();

    assert!(registry.lookup(SerializationType::Custom(3)).is_none());
    assert!(registry.lookup(SerializationType::Custom(0)).is_none());
    assert!(!registry.contains(SerializationType::Custom(255)));
    assert!(CodecRegistry::new().is_empty());
}

#[test]
fn global_registry_is_shared_and_builtin() {
    let a = CodecRegistry::global();
    let b = CodecRegistry::global();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.len(), 2);
}

#[test]
fn register_custom_codec_and_replace_it() {
    let mut registry = CodecRegistry::with_builtin();

    assert!(
        registry
            .register(SerializationType::Custom(3), Arc::new(PrettyJsonCodec))
            .is_none()
    );
    assert_eq!(registry.type_codes(), vec![1, 2, 3]);

    let replaced = registry
        .register(SerializationType::Custom(3), Arc::new(JsonCodec))
        .expect("previous codec returned");
    assert_eq!(replaced.name(), "pretty-json");
    assert_eq!(
        registry.lookup(SerializationType::Custom(3)).unwrap().name(),
        JsonCodec::NAME
    );
    assert_eq!(registry.len(), 3);
}

#[test]
fn json_codec_round_trips_metadata() {
    let metadata = sample_metadata();
    let bytes = JsonCodec.encode(&metadata).unwrap();

    let text = std::str::from_utf8(&bytes).unwrap();
    assert!(text.contains("\"serviceName\":\"UserService\""));
    assert!(text.contains("\"trace_id\":\"abc123\""));
    assert!(!text.contains("error"));

    let mut decoded = Metadata::default();
    JsonCodec.decode(&bytes, &mut decoded).unwrap();
    assert_eq!(decoded, metadata);
}

#[test]
fn json_metadata_tolerates_missing_fields() {
    let mut decoded = Metadata::default();
    JsonCodec
        .decode(br#"{"error":"boom"}"#, &mut decoded)
        .unwrap();

    assert!(decoded.is_error());
    assert_eq!(decoded.error, "boom");
    assert!(decoded.service_name.is_empty());
}

#[test]
fn binary_codec_round_trips_metadata() {
    let metadata = sample_metadata().with_error("not found");
    let bytes = BinaryCodec.encode(&metadata).unwrap();

    let mut decoded = Metadata::default();
    BinaryCodec.decode(&bytes, &mut decoded).unwrap();
    assert_eq!(decoded, metadata);
}

#[test]
fn adapters_carry_user_types_through_each_codec() {
    let request = GetUserRequest {
        id: 1,
        fields: vec!["name".into(), "email".into()],
    };

    let json = JsonCodec.encode(&Structured(request.clone())).unwrap();
    assert_eq!(json, br#"{"fields":["name","email"],"id":1}"#);

    let mut from_json = Structured(GetUserRequest::default());
    JsonCodec.decode(&json, &mut from_json).unwrap();
    assert_eq!(from_json.into_inner(), request);

    let binary = BinaryCodec.encode(&Schema(request.clone())).unwrap();
    let mut from_binary = Schema(GetUserRequest::default());
    BinaryCodec.decode(&binary, &mut from_binary).unwrap();
    assert_eq!(from_binary.into_inner(), request);
}

#[test]
fn binary_codec_rejects_value_without_schema() {
    let err = BinaryCodec.encode(&Structured(vec![1u32, 2, 3])).unwrap_err();
    assert_eq!(err, CodecError::invalid_message(BinaryCodec::NAME));

    let mut target = Structured(Vec::<u32>::new());
    let err = BinaryCodec.decode(&[0], &mut target).unwrap_err();
    assert_eq!(err, CodecError::invalid_message(BinaryCodec::NAME));
}

#[test]
fn json_codec_rejects_value_without_structure() {
    let err = JsonCodec.encode(&Schema(7u32)).unwrap_err();
    assert_eq!(err, CodecError::invalid_message(JsonCodec::NAME));
}

#[test]
fn malformed_bytes_are_reported_by_codec_name() {
    let mut target = Metadata::default();

    match JsonCodec.decode(b"{not json", &mut target) {
        Err(CodecError::Malformed { codec, .. }) => assert_eq!(codec, JsonCodec::NAME),
        other => panic!("expected Malformed, got {:?}", other),
    }

    let mut target = Schema(GetUserRequest::default());
    match BinaryCodec.decode(&[], &mut target) {
        Err(CodecError::Malformed { codec, .. }) => assert_eq!(codec, BinaryCodec::NAME),
        other => panic!("expected Malformed, got {:?}", other),
    }
}
