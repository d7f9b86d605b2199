use crate::constants::{PHOTO_REF_PREFIX, PLACEHOLDER_PHOTO_URL};
use crate::schema::SchemaFeatures;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level album configuration.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumConfigInner {
    pub members: MembersConfig,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into slices.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct AlbumConfig {
    #[serde(flatten, default)]
    inner: Arc<AlbumConfigInner>,
}

impl Deref for AlbumConfig {
    type Target = AlbumConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AlbumConfig {
    fn deref_mut(&mut self) -> &mut AlbumConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Member store behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MembersConfig {
    /// Populate the store with the demonstration members on start.
    pub seed_demo: bool,
    pub placeholder_photo_url: String,
    pub photo_ref_prefix: String,
}

/// Registration form rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub min_age: u32,
    /// Ages strictly above this value get the "adult" photo hint.
    pub adult_age: u32,
    pub schema: SchemaFeatures,
    /// Derive `dataAiHint` from name and age when the form leaves it empty.
    pub synthesize_hints: bool,
}

/// Logger settings consumed by the shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directives: Vec<String>,
    pub console: bool,
    /// Directory for rolling log files; file output is off when unset.
    pub path: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for MembersConfig {
    fn default() -> Self {
        Self {
            seed_demo: true,
            placeholder_photo_url: PLACEHOLDER_PHOTO_URL.to_owned(),
            photo_ref_prefix: PHOTO_REF_PREFIX.to_owned(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { min_age: 0, adult_age: 18, schema: SchemaFeatures::ALL, synthesize_hints: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            directives: Vec::new(),
            console: true,
            path: None,
            json: false,
        }
    }
}
