use criterion::{Criterion, criterion_group, criterion_main};
use example_rpcwire_app::{Add, CalculatorClient, CalculatorMethod, CalculatorServer};
use rpcwire::header::SerializationType;
use rpcwire::protocol::{
    CompactProtocol, DefaultProtocol, Framing, Message, Metadata, Protocol, ProtocolConfig,
};
use std::{hint::black_box, net::TcpListener, sync::Arc, thread};

fn sample_request() -> Message {
    Message::request(
        1234567890,
        SerializationType::Json,
        Metadata::new("Calculator", Add::METHOD_NAME).with_extra("trace_id", "abc123"),
        Add::encode_request(&[1.0, 2.0, 3.0]),
    )
}

fn bench_framing(c: &mut Criterion) {
    let message = sample_request();

    let fixed = DefaultProtocol::default();
    let fixed_bytes = fixed.encode_to_vec(&message).unwrap();

    c.bench_function("fixed_encode", |b| {
        b.iter(|| black_box(fixed.encode_to_vec(black_box(&message)).unwrap()));
    });

    c.bench_function("fixed_decode", |b| {
        b.iter(|| black_box(fixed.decode_from_slice(black_box(&fixed_bytes)).unwrap()));
    });

    let compact = CompactProtocol::default();
    let compact_bytes = compact.encode_to_vec(&message).unwrap();

    c.bench_function("compact_decode", |b| {
        b.iter(|| black_box(compact.decode_from_slice(black_box(&compact_bytes)).unwrap()));
    });
}

fn bench_roundtrip(c: &mut Criterion) {
    let config = ProtocolConfig::default().with_framing(Framing::Fixed);

    // Set up server + client once
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let server = Arc::new(CalculatorServer::new(config.clone()));
    thread::spawn(move || {
        let _ = server.serve_with_listener(listener);
    });

    let mut client = CalculatorClient::connect(addr, config).unwrap();

    c.bench_function("tcp_add_roundtrip", |b| {
        b.iter(|| black_box(client.call::<Add>(&[1.0, 2.0, 3.0]).unwrap()));
    });
}

criterion_group!(benches, bench_framing, bench_roundtrip);
criterion_main!(benches);
