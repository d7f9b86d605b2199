//! # Event Bus
//!
//! A small, type-keyed event bus used to tell observers that shared state changed.
//!
//! ## Overview
//!
//! Each event type owns at most one channel, picked on first use:
//!
//! * **Broadcast**: every subscriber sees every event (bounded, lagging receivers skip ahead).
//! * **Watch**: subscribers see the latest value; ideal for state snapshots.
//!
//! Channels are looked up by [`std::any::TypeId`] in an `FxHashMap` behind a
//! `parking_lot::RwLock`, so a bus is cheap to clone and share.
//!
//! # Example
//!
//! ```rust
//! use album_event_bus::{EventBus, EventBusError, EventReceiverExt};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct MemberAdded { id: String }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!
//!     let mut rx = bus.subscribe::<MemberAdded>()?;
//!     bus.publish(MemberAdded { id: "m1".to_owned() })?;
//!
//!     let event = EventReceiverExt::recv(&mut rx).await;
//!     assert_eq!(event.map(|e| e.id.clone()), Some("m1".to_owned()));
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{ChannelKind, Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
