use crate::codec::{BinaryCodec, Codec, JsonCodec};
use crate::header::SerializationType;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Process-wide registry holding only the built-in codecs. Never mutated.
static GLOBAL_REGISTRY: Lazy<Arc<CodecRegistry>> =
    Lazy::new(|| Arc::new(CodecRegistry::with_builtin()));

/// Maps serialization type codes to codecs.
///
/// Build one at startup, register any custom codecs, then wrap it in an `Arc`
/// and hand it to the protocols. Lookups are plain reads and may run from any
/// number of threads; `register` takes `&mut self`, so it cannot race with
/// them once the registry is shared.
#[derive(Clone, Default)]
pub struct CodecRegistry {
    codecs: BTreeMap<u8, Arc<dyn Codec>>,
}

impl CodecRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            codecs: BTreeMap::new(),
        }
    }

    /// Creates a registry with the JSON (`1`) and schema-binary (`2`) codecs.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(SerializationType::Json, Arc::new(JsonCodec));
        registry.register(SerializationType::Binary, Arc::new(BinaryCodec));
        registry
    }

    /// Shared registry with the built-in codecs, used by the `Default`
    /// protocol constructors.
    pub fn global() -> Arc<CodecRegistry> {
        Arc::clone(&GLOBAL_REGISTRY)
    }

    /// Registers `codec` under `serialization_type`, returning the codec it
    /// replaced, if any.
    pub fn register(
        &mut self,
        serialization_type: SerializationType,
        codec: Arc<dyn Codec>,
    ) -> Option<Arc<dyn Codec>> {
        let type_code = serialization_type.value();
        let name = codec.name().to_string();

        let replaced = self.codecs.insert(type_code, codec);

        if let Some(previous) = &replaced {
            tracing::warn!(
                "Serialization type {} re-registered: `{}` replaced by `{}`",
                type_code,
                previous.name(),
                name
            );
        }

        replaced
    }

    /// Returns the codec for `serialization_type`, or `None` when nothing is
    /// registered under it. There is no fallback codec.
    pub fn lookup(&self, serialization_type: SerializationType) -> Option<&Arc<dyn Codec>> {
        self.codecs.get(&serialization_type.value())
    }

    pub fn contains(&self, serialization_type: SerializationType) -> bool {
        self.codecs.contains_key(&serialization_type.value())
    }

    /// Registered type codes in ascending order.
    pub fn type_codes(&self) -> Vec<u8> {
        self.codecs.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.codecs.iter().map(|(code, codec)| (code, codec.name())))
            .finish()
    }
}
