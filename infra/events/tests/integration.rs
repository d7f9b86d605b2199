use album_event_bus::{ChannelKind, EventBus, EventBusError, EventReceiverExt};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
struct RosterChanged(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
struct Snapshot(u64);

#[tokio::test]
async fn broadcast_delivers_to_every_subscriber() {
    let bus = EventBus::new();
    let mut first = bus.subscribe::<RosterChanged>().unwrap();
    let mut second = bus.subscribe::<RosterChanged>().unwrap();

    let delivered = bus.publish(RosterChanged(7)).unwrap();
    assert_eq!(delivered, 2);

    assert_eq!(*EventReceiverExt::recv(&mut first).await.unwrap(), RosterChanged(7));
    assert_eq!(*EventReceiverExt::recv(&mut second).await.unwrap(), RosterChanged(7));
}

#[tokio::test]
async fn publish_without_subscribers_is_not_an_error() {
    let bus = EventBus::new();
    assert_eq!(bus.publish(RosterChanged(1)).unwrap(), 0);
}

#[tokio::test]
async fn ordering_is_preserved() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<RosterChanged>().unwrap();

    for i in 0..32 {
        bus.publish(RosterChanged(i)).unwrap();
    }

    for i in 0..32 {
        let event = EventReceiverExt::recv(&mut rx).await.unwrap();
        assert_eq!(event.0, i, "events should arrive in publish order");
    }
}

#[tokio::test]
async fn lagging_receiver_skips_to_retained_tail() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe_with_capacity::<RosterChanged>(2).unwrap();

    for i in 0..10 {
        bus.publish(RosterChanged(i)).unwrap();
    }

    let first = EventReceiverExt::recv(&mut rx).await.unwrap();
    assert!(first.0 >= 8, "expected the retained tail, got {}", first.0);
    let second = EventReceiverExt::recv(&mut rx).await.unwrap();
    assert_eq!(second.0, first.0 + 1);
}

#[tokio::test]
async fn watch_keeps_latest_value() {
    let bus = EventBus::new();
    let rx = bus.subscribe_watch(Snapshot(0)).unwrap();

    bus.publish_watch(Snapshot(1)).unwrap();
    bus.publish_watch(Snapshot(2)).unwrap();

    assert_eq!(rx.borrow().0, 2);
    assert_eq!(bus.latest::<Snapshot>().map(|s| s.0), Some(2));
}

#[tokio::test]
async fn watch_recv_waits_for_change() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe_watch(Snapshot(0)).unwrap();

    bus.publish_watch_arc(Arc::new(Snapshot(5))).unwrap();
    let seen = EventReceiverExt::recv(&mut rx).await.unwrap();
    assert_eq!(seen.0, 5);
    assert!(!rx.has_changed().unwrap(), "value was marked as seen");
}

#[tokio::test]
async fn kinds_cannot_be_mixed_for_one_type() {
    let bus = EventBus::new();
    let _rx = bus.subscribe_watch(Snapshot(0)).unwrap();

    assert!(matches!(bus.publish(Snapshot(1)), Err(EventBusError::ChannelKindMismatch { .. })));
    assert!(matches!(bus.subscribe::<Snapshot>(), Err(EventBusError::ChannelKindMismatch { .. })));
    assert_eq!(bus.kind_of::<Snapshot>(), Some(ChannelKind::Watch));

    let _rx = bus.subscribe::<RosterChanged>().unwrap();
    assert!(matches!(
        bus.publish_watch(RosterChanged(1)),
        Err(EventBusError::ChannelKindMismatch { .. })
    ));
    assert_eq!(bus.latest::<RosterChanged>(), None);
}

#[tokio::test]
async fn invalid_capacity_rejected() {
    let bus = EventBus::new();
    let result = bus.subscribe_with_capacity::<RosterChanged>(0);
    assert!(matches!(result, Err(EventBusError::InvalidCapacity { .. })));
    assert_eq!(bus.kind_of::<RosterChanged>(), None);
}

#[tokio::test]
async fn shutdown_closes_receivers() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<RosterChanged>().unwrap();
    let _watch = bus.subscribe_watch(Snapshot(0)).unwrap();

    assert_eq!(bus.shutdown(), 2);
    assert!(EventReceiverExt::recv(&mut rx).await.is_none());
}

#[tokio::test]
async fn clones_share_channels() {
    let bus = EventBus::new();
    let clone = bus.clone();
    let mut rx = bus.subscribe::<RosterChanged>().unwrap();

    clone.publish(RosterChanged(3)).unwrap();
    assert_eq!(EventReceiverExt::recv(&mut rx).await.unwrap().0, 3);
}
