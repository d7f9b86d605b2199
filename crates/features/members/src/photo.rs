//! Transient photo references.
//!
//! Uploaded photos live only in process memory. The registry hands out an opaque
//! reference (`blob:album/<id>`) that stays valid until it is revoked.

use album_kernel::domain::constants::PHOTO_REF_PREFIX;
use album_kernel::safe_nanoid;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Raw bytes of an uploaded photo.
#[derive(Clone, PartialEq, Eq)]
pub struct Photo {
    bytes: Arc<[u8]>,
    content_type: Option<String>,
}

impl Photo {
    #[must_use]
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self { bytes: bytes.into(), content_type: None }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// An empty upload is treated as no photo at all.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.bytes.is_empty()
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

impl fmt::Debug for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Photo")
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// Opaque, process-local reference to a registered photo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhotoRef(Arc<str>);

impl PhotoRef {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues, resolves and revokes transient photo references.
///
/// Cloning is cheap; clones share the same table.
#[derive(Debug, Clone)]
pub struct PhotoRegistry {
    prefix: Arc<str>,
    photos: Arc<RwLock<FxHashMap<PhotoRef, Photo>>>,
}

impl Default for PhotoRegistry {
    fn default() -> Self {
        Self::new(PHOTO_REF_PREFIX)
    }
}

impl PhotoRegistry {
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self { prefix: prefix.into(), photos: Arc::default() }
    }

    /// Registers `photo` and returns its reference, or `None` for an unusable photo.
    pub fn register(&self, photo: Photo) -> Option<PhotoRef> {
        if !photo.is_usable() {
            debug!("Ignoring empty photo upload");
            return None;
        }
        let reference = PhotoRef(format!("{}{}", self.prefix, safe_nanoid!()).into());
        trace!(photo_ref = %reference, len = photo.bytes.len(), "Photo registered");
        self.photos.write().insert(reference.clone(), photo);
        Some(reference)
    }

    #[must_use]
    pub fn resolve(&self, reference: &PhotoRef) -> Option<Photo> {
        self.photos.read().get(reference).cloned()
    }

    /// Releases a reference. Returns `false` if it was unknown or already revoked.
    pub fn revoke(&self, reference: &PhotoRef) -> bool {
        let removed = self.photos.write().remove(reference).is_some();
        trace!(photo_ref = %reference, removed, "Photo revoked");
        removed
    }

    /// Number of live references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.read().len()
    }
}
