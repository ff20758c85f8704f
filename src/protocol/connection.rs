use crate::protocol::{DefaultProtocol, Message, Phase, Protocol, ProtocolError};
use std::io::{Read, Write};

/// Pairs a byte stream with the protocol negotiated for it.
///
/// One message is sent or received per call. Interleaving writes from
/// several threads is the caller's concern; the connection itself holds no
/// state beyond the stream.
pub struct Connection<S, P = DefaultProtocol> {
    stream: S,
    protocol: P,
}

impl<S: Read + Write> Connection<S, DefaultProtocol> {
    /// Uses fixed framing over the global codec registry.
    pub fn new(stream: S) -> Self {
        Self::with_protocol(stream, DefaultProtocol::default())
    }
}

impl<S: Read + Write, P: Protocol> Connection<S, P> {
    pub fn with_protocol(stream: S, protocol: P) -> Self {
        Self { stream, protocol }
    }

    /// Encodes `message` onto the stream and flushes it.
    ///
    /// A failed flush is reported as `ProtocolError::Io` with
    /// `Phase::Payload`, the last segment handed to the stream.
    pub fn send(&mut self, message: &Message) -> Result<(), ProtocolError> {
        self.protocol.encode_message(message, &mut self.stream)?;
        self.stream.flush().map_err(|source| ProtocolError::Io {
            phase: Phase::Payload,
            source,
        })
    }

    /// Blocks until a full message has been read.
    pub fn receive(&mut self) -> Result<Message, ProtocolError> {
        self.protocol.decode_message(&mut self.stream)
    }

    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S, P: std::fmt::Debug> std::fmt::Debug for Connection<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("protocol", &self.protocol)
            .finish_non_exhaustive()
    }
}
