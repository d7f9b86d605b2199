use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{trace, warn};

/// Default broadcast buffer. Store notifications are small and infrequent.
const DEFAULT_CAPACITY: usize = 64;
const MIN_CAPACITY: usize = 1;

/// Supported channel kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Fan-out: every subscriber receives every event.
    Broadcast { capacity: usize },
    /// Latest-value: subscribers observe the most recent event only.
    Watch,
}

/// Marker trait for types that can travel across the [`EventBus`].
///
/// Blanket-implemented for every `Send + Sync + 'static` type.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

#[derive(Debug)]
enum Channel<T> {
    Broadcast { sender: broadcast::Sender<Arc<T>>, capacity: usize },
    Watch(watch::Sender<Arc<T>>),
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Broadcast { sender, capacity } => {
                Self::Broadcast { sender: sender.clone(), capacity: *capacity }
            },
            Self::Watch(sender) => Self::Watch(sender.clone()),
        }
    }
}

impl<T> Channel<T> {
    const fn kind(&self) -> ChannelKind {
        match self {
            Self::Broadcast { capacity, .. } => ChannelKind::Broadcast { capacity: *capacity },
            Self::Watch(_) => ChannelKind::Watch,
        }
    }
}

/// What a caller needs when the channel does not exist yet.
enum Opening<T> {
    Broadcast(usize),
    Watch(Arc<T>),
}

impl<T: Event> Opening<T> {
    const fn kind(&self) -> ChannelKind {
        match self {
            Self::Broadcast(capacity) => ChannelKind::Broadcast { capacity: *capacity },
            Self::Watch(_) => ChannelKind::Watch,
        }
    }

    fn open(self) -> Channel<T> {
        trace!(event = type_name::<T>(), kind = ?self.kind(), "Opening event channel");
        match self {
            Self::Broadcast(capacity) => {
                let (sender, _) = broadcast::channel(capacity);
                Channel::Broadcast { sender, capacity }
            },
            Self::Watch(initial) => {
                let (sender, _) = watch::channel(initial);
                Channel::Watch(sender)
            },
        }
    }
}

#[derive(Debug)]
struct Slot {
    channel: Box<dyn Any + Send + Sync>,
}

impl Slot {
    fn get<T: Event>(&self, wanted: ChannelKind) -> Result<Channel<T>, EventBusError> {
        let channel = self.channel.downcast_ref::<Channel<T>>().ok_or_else(|| {
            EventBusError::TypeMismatch {
                message: type_name::<T>().into(),
                context: Some("Unexpected event type".into()),
            }
        })?;

        match (channel.kind(), wanted) {
            (ChannelKind::Broadcast { .. }, ChannelKind::Broadcast { .. })
            | (ChannelKind::Watch, ChannelKind::Watch) => Ok(channel.clone()),
            (found, wanted) => Err(EventBusError::ChannelKindMismatch {
                message: format!("Expected {wanted:?} but found {found:?} for {}", type_name::<T>())
                    .into(),
                context: None,
            }),
        }
    }
}

/// A thread-safe, type-keyed event bus.
///
/// Cloning is cheap; clones share the same channels.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    channels: Arc<RwLock<FxHashMap<TypeId, Slot>>>,
}

impl EventBus {
    /// Creates a new, empty `EventBus`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to broadcast events of type `T` with the default capacity.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is already bound to a watch channel.
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        self.subscribe_with_capacity::<T>(DEFAULT_CAPACITY)
    }

    /// Subscribes to broadcast events of type `T` with an explicit buffer capacity.
    ///
    /// The capacity only applies when this call opens the channel.
    ///
    /// # Errors
    /// Returns [`EventBusError::InvalidCapacity`] when `capacity` is zero and
    /// [`EventBusError::ChannelKindMismatch`] if `T` is bound to a watch channel.
    ///
    /// # Examples
    /// ```rust
    /// use album_event_bus::EventBus;
    ///
    /// #[derive(Clone, Debug)]
    /// struct Tick(u64);
    ///
    /// # fn main() -> Result<(), album_event_bus::EventBusError> {
    /// let bus = EventBus::new();
    /// let _rx = bus.subscribe_with_capacity::<Tick>(16)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe_with_capacity<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        let capacity = validate_capacity(capacity)?;
        match self.channel::<T>(Opening::Broadcast(capacity))? {
            Channel::Broadcast { sender, capacity: existing } => {
                if existing != capacity {
                    warn!(
                        event = type_name::<T>(),
                        existing_capacity = existing,
                        requested_capacity = capacity,
                        "Broadcast channel already open with a different capacity"
                    );
                }
                Ok(sender.subscribe())
            },
            Channel::Watch(_) => Err(kind_mismatch::<T>(ChannelKind::Watch)),
        }
    }

    /// Subscribes to the latest-value channel of `T`, opening it with `initial` if absent.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to a broadcast channel.
    ///
    /// # Examples
    /// ```rust
    /// use album_event_bus::EventBus;
    ///
    /// #[derive(Clone, Debug)]
    /// struct Snapshot(u64);
    ///
    /// # fn main() -> Result<(), album_event_bus::EventBusError> {
    /// let bus = EventBus::new();
    /// let rx = bus.subscribe_watch(Snapshot(0))?;
    /// bus.publish_watch(Snapshot(1))?;
    /// assert_eq!(rx.borrow().0, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe_watch<T: Event>(
        &self,
        initial: T,
    ) -> Result<watch::Receiver<Arc<T>>, EventBusError> {
        match self.channel::<T>(Opening::Watch(Arc::new(initial)))? {
            Channel::Watch(sender) => Ok(sender.subscribe()),
            Channel::Broadcast { capacity, .. } => {
                Err(kind_mismatch::<T>(ChannelKind::Broadcast { capacity }))
            },
        }
    }

    /// Publishes an event to every broadcast subscriber of `T`.
    ///
    /// Returns the number of subscribers that received it; zero is not an error.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to a watch channel.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        self.publish_arc(Arc::new(event))
    }

    /// Publishes an already shared event via broadcast.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to a watch channel.
    pub fn publish_arc<T: Event>(&self, event: Arc<T>) -> Result<usize, EventBusError> {
        let sender = match self.channel::<T>(Opening::Broadcast(DEFAULT_CAPACITY))? {
            Channel::Broadcast { sender, .. } => sender,
            Channel::Watch(_) => return Err(kind_mismatch::<T>(ChannelKind::Watch)),
        };

        let delivered = sender.send(event).unwrap_or_default();
        trace!(event = type_name::<T>(), delivered, "Event dispatched");
        Ok(delivered)
    }

    /// Replaces the latest value of `T`, opening the watch channel if needed.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to a broadcast channel.
    pub fn publish_watch<T: Event>(&self, event: T) -> Result<(), EventBusError> {
        self.publish_watch_arc(Arc::new(event))
    }

    /// Replaces the latest value of `T` with an already shared instance.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is bound to a broadcast channel.
    pub fn publish_watch_arc<T: Event>(&self, event: Arc<T>) -> Result<(), EventBusError> {
        match self.channel::<T>(Opening::Watch(Arc::clone(&event)))? {
            Channel::Watch(sender) => {
                sender.send_replace(event);
                trace!(event = type_name::<T>(), "Watch value replaced");
                Ok(())
            },
            Channel::Broadcast { capacity, .. } => {
                Err(kind_mismatch::<T>(ChannelKind::Broadcast { capacity }))
            },
        }
    }

    /// Returns the current value of a watch channel, if one is open for `T`.
    #[must_use]
    pub fn latest<T: Event>(&self) -> Option<Arc<T>> {
        let channels = self.channels.read();
        match channels.get(&TypeId::of::<T>())?.channel.downcast_ref::<Channel<T>>()? {
            Channel::Watch(sender) => Some(Arc::clone(&*sender.borrow())),
            Channel::Broadcast { .. } => None,
        }
    }

    /// Returns the kind of channel bound to `T`, if any.
    #[must_use]
    pub fn kind_of<T: Event>(&self) -> Option<ChannelKind> {
        let channels = self.channels.read();
        channels.get(&TypeId::of::<T>())?.channel.downcast_ref::<Channel<T>>().map(Channel::kind)
    }

    /// Drops every channel; receivers observe closure once their last sender is gone.
    ///
    /// Returns the number of channels that were closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.len();
        channels.clear();
        count
    }

    fn channel<T: Event>(&self, opening: Opening<T>) -> Result<Channel<T>, EventBusError> {
        let id = TypeId::of::<T>();
        let wanted = opening.kind();

        let existing = self.channels.read().get(&id).map(|slot| slot.get::<T>(wanted));
        if let Some(channel) = existing {
            return channel;
        }

        let mut channels = self.channels.write();
        let slot = channels.entry(id).or_insert_with(|| Slot { channel: Box::new(opening.open()) });
        slot.get::<T>(wanted)
    }
}

fn kind_mismatch<T: Event>(found: ChannelKind) -> EventBusError {
    EventBusError::ChannelKindMismatch {
        message: format!("Found {found:?} for {}", type_name::<T>()).into(),
        context: None,
    }
}

fn validate_capacity(capacity: usize) -> Result<usize, EventBusError> {
    if capacity < MIN_CAPACITY {
        return Err(EventBusError::InvalidCapacity {
            message: format!("capacity must be >= {MIN_CAPACITY}").into(),
            context: None,
        });
    }
    Ok(capacity)
}
