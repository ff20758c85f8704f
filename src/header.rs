mod compress_type;
mod header_codec;
mod message_header;
mod message_type;
mod serialization_type;

pub use compress_type::CompressType;
pub use header_codec::HeaderCodec;
pub(crate) use header_codec::{check_magic, decode_prefix, encode_prefix};
pub use message_header::Header;
pub use message_type::MessageType;
pub use serialization_type::SerializationType;
