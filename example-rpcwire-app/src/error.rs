use rpcwire::protocol::ProtocolError;
use std::fmt;
use std::io;

/// Errors seen by the caller of a calculator method.
#[derive(Debug)]
pub enum CallError {
    /// Framing or transport failure.
    Protocol(ProtocolError),
    /// The server answered with an error string in the response metadata.
    Remote(String),
    /// The response payload could not be decoded.
    Decode(io::Error),
    /// The response carried a different correlation id than the request.
    MismatchedId { expected: u64, found: u64 },
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::Protocol(e) => write!(f, "Protocol error: {}", e),
            CallError::Remote(msg) => write!(f, "Remote error: {}", msg),
            CallError::Decode(e) => write!(f, "Failed to decode response: {}", e),
            CallError::MismatchedId { expected, found } => write!(
                f,
                "Response id {} does not match request id {}",
                found, expected
            ),
        }
    }
}

impl std::error::Error for CallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CallError::Protocol(e) => Some(e),
            CallError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProtocolError> for CallError {
    fn from(e: ProtocolError) -> Self {
        CallError::Protocol(e)
    }
}
