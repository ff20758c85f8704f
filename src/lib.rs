//! Self-describing binary framing for RPC messages.
//!
//! A message on the wire is a fixed control header, a block of metadata
//! serialized by the codec the header names, and an opaque payload. The
//! [`protocol::Protocol`] trait is the seam the rest of an RPC stack builds
//! on; [`protocol::DefaultProtocol`] is the plain framing and the other
//! implementations either wrap it or replace its header layout.

pub mod codec;
pub mod constants;
pub mod header;
pub mod protocol;
pub mod utils;
