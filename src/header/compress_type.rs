use num_enum::FromPrimitive;
use std::hash::{Hash, Hasher};

/// Payload compression applied by a compressing protocol decorator.
///
/// Independent of the serialization type: the codec produces bytes, the
/// compressor (if any) transforms them afterwards.
#[derive(Debug, Clone, Copy, FromPrimitive)]
#[repr(u8)]
pub enum CompressType {
    None = 0,
    Gzip = 1,
    #[num_enum(catch_all)]
    Other(u8),
}

impl CompressType {
    #[inline]
    pub fn value(self) -> u8 {
        match self {
            CompressType::None => 0,
            CompressType::Gzip => 1,
            CompressType::Other(v) => v,
        }
    }

    /// Maps a catch-all holding a known code back to its named variant.
    #[inline]
    pub fn normalized(self) -> Self {
        CompressType::from(self.value())
    }
}

// The catch-all can hold a known code, so equality goes through the wire byte.
impl PartialEq for CompressType {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for CompressType {}

impl Hash for CompressType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state);
    }
}

impl From<CompressType> for u8 {
    #[inline]
    fn from(compress_type: CompressType) -> u8 {
        compress_type.value()
    }
}
