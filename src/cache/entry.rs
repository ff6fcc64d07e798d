//! Cache Entry Module
//!
//! Defines a single cached file body together with its content type.

use axum::body::Bytes;

use crate::error::{Result, ServerError};

// == Cache Entry ==
/// One cached (path, content type, content) triple.
///
/// All fields are immutable once built. The entry owns its own copy of the
/// bytes, so the buffer it was built from can be dropped or reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    path: String,
    content_type: String,
    content: Bytes,
}

impl CacheEntry {
    // == Constructor ==
    /// Builds an entry by copying `content` into a freshly reserved buffer.
    ///
    /// # Errors
    /// Returns `ServerError::OutOfMemory` if the buffer cannot be reserved.
    pub fn copy_from(path: &str, content_type: &str, content: &[u8]) -> Result<Self> {
        let mut owned = Vec::new();
        owned
            .try_reserve_exact(content.len())
            .map_err(|_| ServerError::OutOfMemory(content.len()))?;
        owned.extend_from_slice(content);

        Ok(Self {
            path: path.to_string(),
            content_type: content_type.to_string(),
            content: Bytes::from(owned),
        })
    }

    /// The lookup key this entry was stored under.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The exact bytes that were loaded from disk.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// A cheap handle on the content for building a response body.
    pub fn bytes(&self) -> Bytes {
        self.content.clone()
    }

    // == Content Length ==
    /// Byte length of the content, taken from the buffer itself.
    pub fn content_length(&self) -> usize {
        self.content.len()
    }
}
