use crate::domain::config::AlbumConfig;
use crate::domain::constants::{CONFIG_ENV_PREFIX, DEFAULT_CONFIG_FILE};
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Custom error type for config loading.
#[album_derive::album_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// Layers, lowest priority first:
/// 1. **Base File**: `path` when given (must exist), otherwise an optional `album.*` file
///    in the current working directory.
/// 2. **Environment Overrides**: variables prefixed with `ALBUM__`. Nested structures are
///    addressed with double underscores (`ALBUM__VALIDATION__MIN_AGE` maps to
///    `validation.min_age`).
///
/// # Errors
/// Returns an error if an explicit file is missing, a source cannot be parsed, or the
/// merged values do not match `T`.
///
/// # Example
/// ```rust
/// use album_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct ShellConfig {
///     greeting: String,
/// }
///
/// let cfg: ShellConfig = load_config(Some("config/local")).unwrap_or_default();
/// # let _ = cfg.greeting;
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(CONFIG_ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("validation.schema")
                .with_list_parse_key("logging.directives"),
        );

    info!(path = %effective_path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

/// Loads the album configuration, see [`load_config`].
///
/// # Errors
/// Same as [`load_config`].
pub fn load_album_config(path: Option<impl AsRef<Path>>) -> Result<AlbumConfig, ConfigError> {
    load_config::<AlbumConfig>(path)
}
