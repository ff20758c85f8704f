use num_enum::FromPrimitive;
use std::hash::{Hash, Hasher};

/// Role of a message on the wire.
///
/// Values outside the known set are preserved in `Other` so that a peer
/// speaking a newer revision can still be framed and routed.
#[derive(Debug, Clone, Copy, FromPrimitive)]
#[repr(u8)]
pub enum MessageType {
    Request = 1,
    Response = 2,
    #[num_enum(catch_all)]
    Other(u8),
}

impl MessageType {
    #[inline]
    pub fn value(self) -> u8 {
        match self {
            MessageType::Request => 1,
            MessageType::Response => 2,
            MessageType::Other(v) => v,
        }
    }

    /// Maps a catch-all holding a known code back to its named variant.
    #[inline]
    pub fn normalized(self) -> Self {
        MessageType::from(self.value())
    }
}

// The catch-all can hold a known code, so equality goes through the wire byte.
impl PartialEq for MessageType {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for MessageType {}

impl Hash for MessageType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state);
    }
}

impl From<MessageType> for u8 {
    #[inline]
    fn from(message_type: MessageType) -> u8 {
        message_type.value()
    }
}
