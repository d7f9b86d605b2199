//! # Members
//!
//! The church member album: the member model, the registration validator, the
//! store that owns the live list, and search.
//!
//! ## Flow
//!
//! 1. The presentation layer collects a [`MemberCandidate`] (and maybe a [`Photo`]).
//! 2. [`Validator::validate`] either rejects it with [`Violations`] or returns a
//!    [`ValidatedMember`].
//! 3. [`MemberStore::add`] stores it and notifies observers; [`MemberStore::delete`]
//!    removes members and releases their photos.
//!
//! ```rust
//! use album_event_bus::EventBus;
//! use album_kernel::domain::config::AlbumConfig;
//! use album_members::{MemberCandidate, Members};
//!
//! # fn main() -> Result<(), album_members::MembersError> {
//! let mut config = AlbumConfig::default();
//! config.members.seed_demo = false;
//!
//! let members = Members::open(&config, EventBus::new())?;
//! let form = MemberCandidate {
//!     name: "Maria Souza".to_owned(),
//!     birth_date: "1990-01-01".to_owned(),
//!     address: Some("Rua das Flores, 101".to_owned()),
//!     time_at_church: "3 anos".to_owned(),
//!     role: "Membro".to_owned(),
//!     serves_in_ministry: "no".to_owned(),
//!     is_baptized: Some("yes".to_owned()),
//!     ..MemberCandidate::default()
//! };
//!
//! let id = members.register(&form, None).expect("valid form");
//! assert_eq!(members.store.search("maria")[0].id, id);
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod age;
mod error;
pub mod filter;
pub mod model;
pub mod photo;
pub mod seed;
pub mod store;
pub mod validator;

pub use address::{AddressFields, AddressLookup, PostalCode, StaticAddressLookup};
pub use age::{Clock, FixedClock, SystemClock};
pub use error::{MembersError, MembersErrorExt};
pub use model::{Member, MemberId};
pub use photo::{Photo, PhotoRef, PhotoRegistry};
pub use store::{MemberEvent, MemberSnapshot, MemberStore};
pub use validator::{Field, MemberCandidate, ValidatedMember, Validation, Validator, Violation, Violations};

use album_event_bus::EventBus;
use album_kernel::domain::config::AlbumConfig;
use album_kernel::domain::registry::InitializedSlice;
use std::sync::Arc;
use tracing::{debug, info};

/// Members feature state.
#[album_derive::album_slice]
pub struct Members {
    pub store: MemberStore,
    pub validator: Validator,
    pub lookup: Arc<dyn AddressLookup>,
}

impl Members {
    /// Builds the slice with an empty postal code table.
    ///
    /// # Errors
    /// Returns [`MembersError::Events`] if the bus refuses the store's channels.
    pub fn open(config: &AlbumConfig, events: EventBus) -> Result<Self, MembersError> {
        Self::open_with_lookup(config, events, Arc::new(StaticAddressLookup::new()))
    }

    /// Builds the slice around a custom postal code lookup.
    ///
    /// # Errors
    /// Returns [`MembersError::Events`] if the bus refuses the store's channels.
    pub fn open_with_lookup(
        config: &AlbumConfig,
        events: EventBus,
        lookup: Arc<dyn AddressLookup>,
    ) -> Result<Self, MembersError> {
        let store = MemberStore::open(&config.members, events)?;
        let validator = Validator::new(config.validation.clone());
        Ok(Self::new(MembersInner { store, validator, lookup }))
    }

    /// Validates `candidate` and adds it to the store.
    ///
    /// # Errors
    /// Returns the form's violations; nothing is stored then.
    pub fn register(
        &self,
        candidate: &MemberCandidate,
        photo: Option<Photo>,
    ) -> Result<MemberId, Violations> {
        match self.validator.validate(candidate) {
            Validation::Accepted(member) => Ok(self.store.add(member, photo)),
            Validation::Rejected(violations) => {
                debug!(count = violations.len(), %violations, "Registration rejected");
                Err(violations)
            },
        }
    }

    /// Fills blank address fields of `fields` from the postal code lookup.
    pub fn prefill_address(&self, fields: &mut AddressFields) -> bool {
        fields.prefill(self.lookup.as_ref())
    }
}

/// Initialize the members feature.
///
/// # Errors
/// Returns an error if the member store cannot open its notification channels.
pub fn init(config: &AlbumConfig, events: EventBus) -> Result<InitializedSlice, MembersError> {
    let slice = Members::open(config, events)?;
    info!(members = slice.store.len(), "Members slice initialized");
    Ok(InitializedSlice::new(slice))
}
