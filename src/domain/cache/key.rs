//! Content-addressed cache keys

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use bytes::Bytes;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::domain::DomainError;

/// Identity of a cacheable computation, backed by an immutable byte sequence.
///
/// Two keys are equal when their bytes are equal. The hash is computed once
/// at construction, so repeated lookups against a cache index never rehash
/// the bytes. Text keys are always stored as UTF-8.
///
/// Cloning is cheap: the bytes live in a shared, reference-counted buffer.
#[derive(Debug, Clone)]
pub struct CacheKey {
    bytes: Bytes,
    hash: u64,
}

impl CacheKey {
    /// Creates a key that takes ownership of the given buffer
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let hash = Self::hash_bytes(&bytes);

        Self { bytes, hash }
    }

    /// Creates a key from a borrowed slice, copying it
    pub fn copy_from_slice(bytes: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(bytes))
    }

    /// Creates a key from the UTF-8 encoding of `text`
    pub fn from_text(text: &str) -> Self {
        Self::copy_from_slice(text.as_bytes())
    }

    /// Creates a key from the JSON encoding of a value
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, DomainError> {
        let json = serde_json::to_vec(value).map_err(|e| {
            DomainError::serialization(format!("Failed to serialize cache key: {}", e))
        })?;
        Ok(Self::new(json))
    }

    /// Returns the stored bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the number of stored bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the hash computed at construction.
    ///
    /// The value is only stable within one build of the crate and must not
    /// be persisted; use [`CacheKey::fingerprint`] for a durable identifier.
    pub fn hash_value(&self) -> u64 {
        self.hash
    }

    /// Borrows the bytes as UTF-8 text.
    ///
    /// Decoding is strict: bytes that are not valid UTF-8 produce a
    /// [`DomainError::Decoding`] rather than replacement characters.
    pub fn as_utf8(&self) -> Result<&str, DomainError> {
        std::str::from_utf8(&self.bytes).map_err(|e| {
            DomainError::decoding(format!("Cache key is not valid UTF-8: {}", e))
        })
    }

    /// Decodes the bytes as UTF-8 into an owned string (strict)
    pub fn utf8_to_string(&self) -> Result<String, DomainError> {
        self.as_utf8().map(str::to_owned)
    }

    /// Decodes the bytes, replacing invalid sequences with U+FFFD.
    ///
    /// Meant for logs and diagnostics only.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// SHA-256 digest of the bytes, hex encoded
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }

    /// Fingerprint truncated to `len` hex characters (1..=64)
    pub fn short_fingerprint(&self, len: usize) -> String {
        let mut fingerprint = self.fingerprint();
        fingerprint.truncate(len.clamp(1, 64));
        fingerprint
    }

    fn hash_bytes(bytes: &[u8]) -> u64 {
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        hasher.finish()
    }

    #[cfg(test)]
    fn with_hash(bytes: &[u8], hash: u64) -> Self {
        Self {
            bytes: Bytes::copy_from_slice(bytes),
            hash,
        }
    }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        if self.bytes.as_ptr() == other.bytes.as_ptr() && self.bytes.len() == other.bytes.len() {
            return true;
        }

        self.hash == other.hash && self.bytes == other.bytes
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl AsRef<[u8]> for CacheKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Bytes> for CacheKey {
    fn from(bytes: Bytes) -> Self {
        Self::new(bytes)
    }
}

impl From<Vec<u8>> for CacheKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for CacheKey {
    fn from(bytes: &[u8]) -> Self {
        Self::copy_from_slice(bytes)
    }
}

impl From<String> for CacheKey {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for CacheKey {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

/// Parameters describing a filter, rendered into a deterministic key
#[derive(Debug, Clone, Default)]
pub struct CacheKeyParams {
    /// Optional namespace prefix (e.g., "filter:term")
    pub namespace: Option<String>,
    /// Primary identifier (e.g., filter type)
    pub primary: String,
    /// Secondary components (sorted for consistency)
    pub components: BTreeMap<String, String>,
}

impl CacheKeyParams {
    /// Creates new cache key parameters with a primary identifier
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            namespace: None,
            primary: primary.into(),
            components: BTreeMap::new(),
        }
    }

    /// Sets the namespace prefix
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Adds a component to the key parameters
    pub fn with_component(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.components.insert(key.into(), value.into());
        self
    }

    /// Renders `[namespace:]primary[:k=v...]` with components in key order
    pub fn render(&self) -> String {
        let mut parts = Vec::with_capacity(self.components.len() + 2);

        if let Some(namespace) = &self.namespace {
            parts.push(namespace.clone());
        }
        parts.push(self.primary.clone());

        for (k, v) in &self.components {
            parts.push(format!("{}={}", k, v));
        }

        parts.join(":")
    }

    /// Builds the cache key for these parameters
    pub fn to_cache_key(&self) -> CacheKey {
        CacheKey::from(self.render())
    }
}

impl From<&CacheKeyParams> for CacheKey {
    fn from(params: &CacheKeyParams) -> Self {
        params.to_cache_key()
    }
}
