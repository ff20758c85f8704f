use crate::protocol::{Message, ProtocolError};
use std::io::{Read, Write};
use std::sync::Arc;

/// Encodes messages to a byte sink and decodes them from a byte source.
///
/// Each call is a single linear pass with no state carried between calls,
/// so one instance can serve any number of connections and threads.
/// Implementations wrap one another by composition (see
/// [`EncryptingProtocol`](crate::protocol::EncryptingProtocol)).
pub trait Protocol: Send + Sync {
    /// Writes `message` to `sink`. The header's size fields are computed from
    /// the metadata and payload; the values on `message` are ignored.
    fn encode_message(&self, message: &Message, sink: &mut dyn Write) -> Result<(), ProtocolError>;

    /// Reads exactly one message from `source`.
    fn decode_message(&self, source: &mut dyn Read) -> Result<Message, ProtocolError>;

    fn encode_to_vec(&self, message: &Message) -> Result<Vec<u8>, ProtocolError> {
        let mut buf = Vec::new();
        self.encode_message(message, &mut buf)?;
        Ok(buf)
    }

    /// Decodes the first message in `bytes`. Trailing bytes are ignored.
    fn decode_from_slice(&self, bytes: &[u8]) -> Result<Message, ProtocolError> {
        let mut source = bytes;
        self.decode_message(&mut source)
    }
}

impl<P: Protocol + ?Sized> Protocol for Box<P> {
    fn encode_message(&self, message: &Message, sink: &mut dyn Write) -> Result<(), ProtocolError> {
        (**self).encode_message(message, sink)
    }

    fn decode_message(&self, source: &mut dyn Read) -> Result<Message, ProtocolError> {
        (**self).decode_message(source)
    }
}

impl<P: Protocol + ?Sized> Protocol for Arc<P> {
    fn encode_message(&self, message: &Message, sink: &mut dyn Write) -> Result<(), ProtocolError> {
        (**self).encode_message(message, sink)
    }

    fn decode_message(&self, source: &mut dyn Read) -> Result<Message, ProtocolError> {
        (**self).decode_message(source)
    }
}
