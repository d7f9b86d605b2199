//! # Member Store
//!
//! The single owner of the live member list. Every mutation happens under one
//! write lock and publishes exactly one [`MemberSnapshot`] (watch channel) and one
//! [`MemberEvent`] (broadcast channel) before returning.
//!
//! A store binds the snapshot and event types on its [`EventBus`], so give each
//! store its own bus.

use crate::address::display_address;
use crate::error::{MembersError, MembersErrorExt};
use crate::filter::filter;
use crate::model::{Member, MemberId};
use crate::photo::{Photo, PhotoRegistry};
use crate::seed::demo_members;
use crate::validator::ValidatedMember;
use album_event_bus::EventBus;
use album_kernel::domain::config::MembersConfig;
use album_kernel::domain::constants::{HINT_NEW_PHOTO, HINT_PLACEHOLDER};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

/// State of the album as seen by observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSnapshot {
    /// Bumped once per population, add and delete.
    pub version: u64,
    pub loading: bool,
    pub members: Arc<[Member]>,
}

/// A single change to the member list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberEvent {
    Added(MemberId),
    Deleted(MemberId),
}

impl MemberEvent {
    #[must_use]
    pub const fn id(&self) -> &MemberId {
        match self {
            Self::Added(id) | Self::Deleted(id) => id,
        }
    }
}

#[derive(Debug)]
struct State {
    members: Vec<Member>,
    listed: Arc<[Member]>,
    version: u64,
    loading: bool,
}

impl State {
    fn snapshot(&self) -> MemberSnapshot {
        MemberSnapshot {
            version: self.version,
            loading: self.loading,
            members: Arc::clone(&self.listed),
        }
    }

    fn commit(&mut self) -> MemberSnapshot {
        self.listed = self.members.as_slice().into();
        self.version += 1;
        self.snapshot()
    }
}

/// Shared handle to the member list. Cloning is cheap; clones share state.
#[derive(Debug, Clone)]
pub struct MemberStore {
    state: Arc<RwLock<State>>,
    photos: PhotoRegistry,
    events: EventBus,
    settings: Arc<MembersConfig>,
}

impl MemberStore {
    /// Creates an empty store in the loading state.
    ///
    /// # Errors
    /// Returns [`MembersError::Events`] if `events` already binds the store's
    /// notification types to a different channel kind.
    pub fn new(settings: &MembersConfig, events: EventBus) -> Result<Self, MembersError> {
        let state = State { members: Vec::new(), listed: Arc::from([]), version: 0, loading: true };

        events.publish_watch(state.snapshot()).context("Failed to open snapshot channel")?;
        drop(events.subscribe::<MemberEvent>().context("Failed to open member event channel")?);

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            photos: PhotoRegistry::new(&settings.photo_ref_prefix),
            events,
            settings: Arc::new(settings.clone()),
        })
    }

    /// Creates a store and populates it, with the demonstration members when
    /// `seed_demo` is set.
    ///
    /// # Errors
    /// See [`MemberStore::new`].
    pub fn open(settings: &MembersConfig, events: EventBus) -> Result<Self, MembersError> {
        let store = Self::new(settings, events)?;
        let seed = if settings.seed_demo {
            demo_members(&settings.placeholder_photo_url)
        } else {
            Vec::new()
        };
        store.populate(seed);
        Ok(store)
    }

    /// Finishes initial loading with `members`, placed ahead of anything added
    /// while the store was still loading.
    ///
    /// Returns `false` (and changes nothing) if the store was already populated.
    pub fn populate(&self, mut members: Vec<Member>) -> bool {
        let mut state = self.state.write();
        if !state.loading {
            debug!("Store already populated");
            return false;
        }
        members.append(&mut state.members);
        state.members = members;
        state.loading = false;
        let snapshot = state.commit();
        info!(count = snapshot.members.len(), version = snapshot.version, "Members loaded");
        self.publish_snapshot(snapshot);
        true
    }

    /// Adds a validated member and returns its new id.
    ///
    /// An unusable `photo` counts as no photo.
    pub fn add(&self, candidate: ValidatedMember, photo: Option<Photo>) -> MemberId {
        let photo = photo.and_then(|p| self.photos.register(p));
        let (photo_url, fallback_hint) = photo.as_ref().map_or_else(
            || (self.settings.placeholder_photo_url.clone(), HINT_PLACEHOLDER),
            |reference| (reference.to_string(), HINT_NEW_PHOTO),
        );

        let ValidatedMember {
            name,
            age,
            birth_date,
            address,
            address_fields,
            time_at_church,
            role,
            serves_in_ministry,
            ministries_served,
            is_baptized,
            data_ai_hint,
        } = candidate;

        let id = MemberId::generate();
        let member = Member {
            id: id.clone(),
            name,
            photo_url,
            data_ai_hint: data_ai_hint.or_else(|| Some(fallback_hint.to_owned())),
            address: display_address(address_fields.as_ref(), address.as_deref()),
            time_at_church,
            serves_in_ministry,
            ministries_served,
            role,
            age,
            birth_date,
            is_baptized,
            photo,
        };

        let mut state = self.state.write();
        state.members.push(member);
        let snapshot = state.commit();
        info!(member_id = %id, version = snapshot.version, count = snapshot.members.len(), "Member added");
        self.publish_snapshot(snapshot);
        self.publish_event(MemberEvent::Added(id.clone()));
        drop(state);

        id
    }

    /// Removes the member with `id` and releases its photo.
    ///
    /// Returns `false` without notifying anyone when the id is unknown.
    pub fn delete(&self, id: &MemberId) -> bool {
        let mut state = self.state.write();
        let Some(position) = state.members.iter().position(|m| &m.id == id) else {
            debug!(member_id = %id, "Delete ignored, member not found");
            return false;
        };

        let removed = state.members.remove(position);
        if let Some(photo) = removed.photo.as_ref() {
            self.photos.revoke(photo);
        }
        let snapshot = state.commit();
        info!(member_id = %id, version = snapshot.version, count = snapshot.members.len(), "Member deleted");
        self.publish_snapshot(snapshot);
        self.publish_event(MemberEvent::Deleted(removed.id));
        drop(state);

        true
    }

    /// Current members in insertion order.
    #[must_use]
    pub fn list(&self) -> Arc<[Member]> {
        Arc::clone(&self.state.read().listed)
    }

    #[must_use]
    pub fn get(&self, id: &MemberId) -> Option<Member> {
        self.state.read().members.iter().find(|m| &m.id == id).cloned()
    }

    /// Members whose name contains `query`, ignoring case.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Member> {
        filter(&self.list(), query)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().members.len()
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> MemberSnapshot {
        self.state.read().snapshot()
    }

    /// Latest-value stream of snapshots.
    ///
    /// # Errors
    /// Returns [`MembersError::Events`] if the snapshot channel is not a watch channel.
    pub fn subscribe(&self) -> Result<watch::Receiver<Arc<MemberSnapshot>>, MembersError> {
        self.events.subscribe_watch(self.snapshot()).context("Failed to subscribe to snapshots")
    }

    /// Every add and delete, in order.
    ///
    /// # Errors
    /// Returns [`MembersError::Events`] if the event channel is not a broadcast channel.
    pub fn events(&self) -> Result<broadcast::Receiver<Arc<MemberEvent>>, MembersError> {
        self.events.subscribe::<MemberEvent>().context("Failed to subscribe to member events")
    }

    /// Registry holding uploaded photos of current members.
    #[must_use]
    pub const fn photos(&self) -> &PhotoRegistry {
        &self.photos
    }

    fn publish_snapshot(&self, snapshot: MemberSnapshot) {
        if let Err(err) = self.events.publish_watch(snapshot) {
            warn!(error = %err, "Failed to publish member snapshot");
        }
    }

    fn publish_event(&self, event: MemberEvent) {
        if let Err(err) = self.events.publish(event) {
            warn!(error = %err, "Failed to publish member event");
        }
    }
}
