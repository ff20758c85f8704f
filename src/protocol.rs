mod compact_protocol;
mod compressing_protocol;
mod connection;
mod default_protocol;
mod encrypting_protocol;
mod framing;
mod message;
mod metadata;
mod protocol_config;
mod protocol_error;
mod protocol_trait;
mod varint;

pub use compact_protocol::CompactProtocol;
pub use compressing_protocol::CompressingProtocol;
pub use connection::Connection;
pub use default_protocol::DefaultProtocol;
pub use encrypting_protocol::EncryptingProtocol;
pub use message::Message;
pub use metadata::Metadata;
pub use protocol_config::{Framing, ProtocolConfig};
pub use protocol_error::{Phase, ProtocolError};
pub use protocol_trait::Protocol;
