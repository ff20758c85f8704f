use crate::service_definition::{Add, CalculatorMethod, Mult, SERVICE_NAME};
use rpcwire::codec::CodecRegistry;
use rpcwire::protocol::{Connection, Message, Metadata, ProtocolConfig, ProtocolError};
use std::io::{self, Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

/// Blocking calculator server. Each accepted connection gets its own thread.
pub struct CalculatorServer {
    config: ProtocolConfig,
    registry: Arc<CodecRegistry>,
}

impl CalculatorServer {
    pub fn new(config: ProtocolConfig) -> Self {
        Self {
            config,
            registry: CodecRegistry::global(),
        }
    }

    pub fn serve_with_listener(self: Arc<Self>, listener: TcpListener) -> io::Result<()> {
        for stream in listener.incoming() {
            let stream = stream?;
            let peer = stream.peer_addr().ok();
            let server = Arc::clone(&self);

            thread::spawn(move || {
                if let Err(err) = server.serve_connection(stream) {
                    tracing::warn!("Connection from {:?} closed: {}", peer, err);
                }
            });
        }

        Ok(())
    }

    /// Answers requests until the peer closes the stream.
    pub fn serve_connection<S: Read + Write>(&self, stream: S) -> Result<(), ProtocolError> {
        let protocol = self.config.build(Arc::clone(&self.registry));
        let mut connection = Connection::with_protocol(stream, protocol);

        loop {
            let request = match connection.receive() {
                Ok(request) => request,
                Err(err) if err.is_unexpected_eof() => return Ok(()),
                Err(err) => return Err(err),
            };

            connection.send(&self.handle(&request))?;
        }
    }

    pub fn handle(&self, request: &Message) -> Message {
        let header = self.config.response_header(request.message_id());
        let method_name = request.method_name().unwrap_or_default();

        let outcome = if method_name == Add::METHOD_NAME {
            dispatch::<Add>(&request.payload)
        } else if method_name == Mult::METHOD_NAME {
            dispatch::<Mult>(&request.payload)
        } else {
            Err(format!("Unknown method `{}`", method_name))
        };

        match outcome {
            Ok(payload) => Message::new(
                header,
                Some(Metadata::new(SERVICE_NAME, method_name)),
                payload,
            ),
            Err(error) => {
                tracing::debug!(message_id = request.message_id(), "Request failed: {}", error);
                Message::new(header, Some(Metadata::default().with_error(error)), Vec::new())
            }
        }
    }
}

fn dispatch<M: CalculatorMethod>(payload: &[u8]) -> Result<Vec<u8>, String> {
    let numbers = M::decode_request(payload).map_err(|e| e.to_string())?;
    Ok(M::encode_response(M::compute(&numbers)))
}
