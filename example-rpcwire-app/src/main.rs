use example_rpcwire_app::{Add, CalculatorClient, CalculatorServer, Mult};
use rpcwire::header::CompressType;
use rpcwire::protocol::{Framing, ProtocolConfig};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Both ends must agree on framing and key.
    let config = ProtocolConfig::default()
        .with_framing(Framing::Compact)
        .with_compression(CompressType::Gzip)
        .with_encryption_key([7u8; 32]);

    // Bind to a random available port
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;

    let server = Arc::new(CalculatorServer::new(config.clone()));
    thread::spawn(move || {
        if let Err(err) = server.serve_with_listener(listener) {
            tracing::error!("Server stopped: {}", err);
        }
    });

    let mut client = CalculatorClient::connect(addr, config)?;

    println!("Result from first add(): {:?}", client.call::<Add>(&[1.0, 2.0, 3.0]));
    println!("Result from second add(): {:?}", client.call::<Add>(&[8.0, 3.0, 7.0]));
    println!("Result from first mult(): {:?}", client.call::<Mult>(&[8.0, 3.0, 7.0]));

    Ok(())
}
