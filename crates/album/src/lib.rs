//! Facade crate for the church member album.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `album` (the `members` slice is on by default).
//! - Call `album::init` to build every enabled slice, then look slices up with
//!   [`domain::registry::find`].

pub use album_domain as domain;
use album_domain::config::AlbumConfig;
use album_domain::registry::InitializedSlice;
pub use album_event_bus as events;
use album_event_bus::EventBus;
pub use album_kernel as kernel;

/// Feature registry for runtime introspection.
pub mod features {
    #[cfg(feature = "members")]
    pub use album_members as members;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "members")]
        "members",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled features.
///
/// # Errors
/// Returns an error if any feature initialization fails.
#[cfg_attr(not(feature = "members"), allow(unused_variables))]
pub fn init(
    config: &AlbumConfig,
    events: &EventBus,
) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let mut slices = Vec::new();

    // Members
    #[cfg(feature = "members")]
    slices.push(features::members::init(config, events.clone())?);

    Ok(slices)
}
