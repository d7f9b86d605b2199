//! # Domain Types
//!
//! Pure data shared by every album crate: configuration, literal constants,
//! the active form schema and the feature slice registry.
//! Keep it lean: `serde` and `bitflags` only, no I/O and no business logic.

pub mod config;
pub mod constants;
pub mod registry;
pub mod schema;
