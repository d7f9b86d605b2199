/// Image shown for members registered without a photo.
pub const PLACEHOLDER_PHOTO_URL: &str = "https://placehold.co/150x150.png";

/// Prefix of transient photo references handed out for uploaded photos.
pub const PHOTO_REF_PREFIX: &str = "blob:album/";

/// Display address used when neither structured nor free-text address was given.
pub const ADDRESS_NOT_INFORMED: &str = "Address not informed";

/// Photo hint used when a photo was uploaded and the record carries no hint.
pub const HINT_NEW_PHOTO: &str = "newly added person";

/// Photo hint used for the placeholder image when the record carries no hint.
pub const HINT_PLACEHOLDER: &str = "person placeholder";

/// Environment prefix for configuration overrides (`ALBUM__VALIDATION__MIN_AGE`).
pub const CONFIG_ENV_PREFIX: &str = "ALBUM";

/// Configuration file looked up when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "album";

// Schema feature names accepted in configuration.
pub const SCHEMA_AGE: &str = "age";
pub const SCHEMA_BAPTISM: &str = "baptism";
pub const SCHEMA_STRUCTURED_ADDRESS: &str = "structured_address";
