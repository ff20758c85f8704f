use num_enum::FromPrimitive;
use std::hash::{Hash, Hasher};

/// Type code selecting the codec used for metadata (and, by convention,
/// the payload).
///
/// `1` and `2` are the built-in codecs. `3` and above are reserved for
/// codecs registered by the embedding application.
#[derive(Debug, Clone, Copy, FromPrimitive)]
#[repr(u8)]
pub enum SerializationType {
    Json = 1,
    Binary = 2,
    #[num_enum(catch_all)]
    Custom(u8),
}

impl SerializationType {
    #[inline]
    pub fn value(self) -> u8 {
        match self {
            SerializationType::Json => 1,
            SerializationType::Binary => 2,
            SerializationType::Custom(v) => v,
        }
    }

    /// Maps a catch-all holding a known code back to its named variant.
    #[inline]
    pub fn normalized(self) -> Self {
        SerializationType::from(self.value())
    }
}

// The catch-all can hold a known code, so equality goes through the wire byte.
impl PartialEq for SerializationType {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for SerializationType {}

impl Hash for SerializationType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state);
    }
}

impl From<SerializationType> for u8 {
    #[inline]
    fn from(serialization_type: SerializationType) -> u8 {
        serialization_type.value()
    }
}
