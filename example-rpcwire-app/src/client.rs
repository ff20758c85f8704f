use crate::error::CallError;
use crate::service_definition::{CalculatorMethod, SERVICE_NAME};
use rpcwire::codec::CodecRegistry;
use rpcwire::protocol::{Connection, Message, Metadata, Protocol, ProtocolConfig};
use rpcwire::utils::next_message_id;
use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};

/// Blocking client issuing one call at a time over a single connection.
pub struct CalculatorClient<S> {
    connection: Connection<S, Box<dyn Protocol>>,
    config: ProtocolConfig,
}

impl CalculatorClient<TcpStream> {
    pub fn connect(addr: impl ToSocketAddrs, config: ProtocolConfig) -> io::Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        Ok(Self::new(stream, config))
    }
}

impl<S: Read + Write> CalculatorClient<S> {
    pub fn new(stream: S, config: ProtocolConfig) -> Self {
        let protocol = config.build(CodecRegistry::global());

        Self {
            connection: Connection::with_protocol(stream, protocol),
            config,
        }
    }

    pub fn call<M: CalculatorMethod>(&mut self, numbers: &[f64]) -> Result<f64, CallError> {
        let message_id = next_message_id();
        let request = Message::new(
            self.config.request_header(message_id),
            Some(Metadata::new(SERVICE_NAME, M::METHOD_NAME).with_extra("client", "example")),
            M::encode_request(numbers),
        );

        self.connection.send(&request)?;
        let response = self.connection.receive()?;

        if response.message_id() != message_id {
            return Err(CallError::MismatchedId {
                expected: message_id,
                found: response.message_id(),
            });
        }

        if let Some(error) = response.error() {
            return Err(CallError::Remote(error.to_string()));
        }

        M::decode_response(&response.payload).map_err(CallError::Decode)
    }

    pub fn into_inner(self) -> S {
        self.connection.into_inner()
    }
}
