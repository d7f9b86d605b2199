use album_event_bus::{EventBus, EventReceiverExt};
use album_kernel::domain::config::{AlbumConfig, MembersConfig, ValidationConfig};
use album_members::{
    FixedClock, MemberCandidate, MemberEvent, MemberStore, Photo, ValidatedMember, Validation,
    Validator,
};
use chrono::NaiveDate;

fn empty_store() -> MemberStore {
    let settings = MembersConfig { seed_demo: false, ..MembersConfig::default() };
    MemberStore::open(&settings, EventBus::new()).unwrap()
}

fn validated(name: &str) -> ValidatedMember {
    let validator = Validator::with_clock(
        ValidationConfig::default(),
        FixedClock(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()),
    );
    let form = MemberCandidate {
        name: name.to_owned(),
        birth_date: "1990-01-01".to_owned(),
        address: Some("Rua das Flores, 101".to_owned()),
        time_at_church: "3 anos".to_owned(),
        role: "Membro".to_owned(),
        serves_in_ministry: "no".to_owned(),
        is_baptized: Some("no".to_owned()),
        ..MemberCandidate::default()
    };
    match validator.validate(&form) {
        Validation::Accepted(member) => member,
        Validation::Rejected(v) => panic!("fixture must be valid: {v}"),
    }
}

#[test]
fn seeded_store_has_demo_members() {
    let store = MemberStore::open(&AlbumConfig::default().members, EventBus::new()).unwrap();
    assert!(!store.is_loading());
    assert_eq!(store.len(), 4);
    assert_eq!(store.snapshot().version, 1);
    assert!(store.list().iter().all(|m| m.photo_url == "https://placehold.co/150x150.png"));
}

#[test]
fn new_store_is_loading_until_populated() {
    let store = MemberStore::new(&MembersConfig::default(), EventBus::new()).unwrap();
    assert!(store.is_loading());
    assert_eq!(store.snapshot().version, 0);

    assert!(store.populate(Vec::new()));
    assert!(!store.is_loading());
    assert!(!store.populate(Vec::new()), "second population is ignored");
    assert_eq!(store.snapshot().version, 1);
}

#[test]
fn members_added_while_loading_survive_population() {
    let settings = MembersConfig::default();
    let store = MemberStore::new(&settings, EventBus::new()).unwrap();
    let early = store.add(validated("Maria Souza"), Some(Photo::new(vec![1, 2, 3])));
    assert!(store.is_loading());

    let seed = MemberStore::open(&settings, EventBus::new()).unwrap().list().to_vec();
    assert!(store.populate(seed));

    let names = store.list().iter().map(|m| m.name.clone()).collect::<Vec<_>>();
    assert_eq!(names.len(), 5);
    assert_eq!(names[4], "Maria Souza");
    assert!(store.get(&early).is_some());

    assert_eq!(store.photos().len(), 1);
    assert!(store.delete(&early));
    assert_eq!(store.photos().len(), 0);
}

#[test]
fn add_appends_in_order_and_derives_fields() {
    let store = empty_store();
    let first = store.add(validated("Maria Souza"), None);
    let second = store.add(validated("Pedro Lima"), None);

    let list = store.list();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, first);
    assert_eq!(list[1].id, second);

    let maria = store.get(&first).unwrap();
    assert_eq!(maria.name, "Maria Souza");
    assert_eq!(maria.age, 34);
    assert_eq!(maria.address, "Rua das Flores, 101");
    assert_eq!(maria.is_baptized, Some(false));
    assert_eq!(maria.data_ai_hint.as_deref(), Some("maria adult"));
    assert!(maria.photo_ref().is_none());
}

#[test]
fn held_snapshots_are_unaffected_by_later_changes() {
    let store = empty_store();
    store.add(validated("Maria Souza"), None);
    let before = store.list();

    store.add(validated("Pedro Lima"), None);
    assert_eq!(before.len(), 1);
    assert_eq!(store.list().len(), 2);
}

#[test]
fn photo_gets_transient_reference_and_is_revoked_on_delete() {
    let store = empty_store();
    let id = store.add(validated("Maria Souza"), Some(Photo::new(vec![0x89, 0x50, 0x4E, 0x47])));

    let member = store.get(&id).unwrap();
    let reference = member.photo_ref().cloned().unwrap();
    assert_eq!(member.photo_url, reference.as_str());
    assert!(member.photo_url.starts_with("blob:album/"));
    assert!(store.photos().resolve(&reference).is_some());

    assert!(store.delete(&id));
    assert!(store.photos().resolve(&reference).is_none());
    assert_eq!(store.photos().len(), 0);
}

#[test]
fn empty_photo_falls_back_to_placeholder() {
    let settings = MembersConfig {
        seed_demo: false,
        placeholder_photo_url: "https://example.org/none.png".to_owned(),
        ..MembersConfig::default()
    };
    let store = MemberStore::open(&settings, EventBus::new()).unwrap();
    let id = store.add(validated("Maria Souza"), Some(Photo::new(Vec::new())));

    let member = store.get(&id).unwrap();
    assert_eq!(member.photo_url, "https://example.org/none.png");
    assert!(member.photo_ref().is_none());
}

#[test]
fn delete_keeps_the_others_in_order() {
    let store = MemberStore::open(&MembersConfig::default(), EventBus::new()).unwrap();
    let ids = store.list().iter().map(|m| m.id.clone()).collect::<Vec<_>>();

    assert!(store.delete(&ids[1]));
    let remaining = store.list().iter().map(|m| m.id.clone()).collect::<Vec<_>>();
    assert_eq!(remaining, [ids[0].clone(), ids[2].clone(), ids[3].clone()]);
}

#[test]
fn unknown_delete_is_a_silent_no_op() {
    let store = MemberStore::open(&MembersConfig::default(), EventBus::new()).unwrap();
    let version = store.snapshot().version;
    let before = store.list();

    assert!(!store.delete(&"zzzzzzzzzzzz".parse().unwrap()));
    assert_eq!(store.snapshot().version, version);
    assert_eq!(store.list(), before);
}

#[test]
fn search_is_case_insensitive() {
    let store = MemberStore::open(&MembersConfig::default(), EventBus::new()).unwrap();
    let names = store.search("ANA").into_iter().map(|m| m.name).collect::<Vec<_>>();
    assert_eq!(names, ["Ana Costa"]);
    assert_eq!(store.search("").len(), 4);
    assert!(store.search("xyz").is_empty());
}

#[tokio::test]
async fn each_mutation_bumps_the_snapshot_once() {
    let store = empty_store();
    let mut snapshots = store.subscribe().unwrap();
    let start = snapshots.borrow_and_update().version;

    let id = store.add(validated("Maria Souza"), None);
    let after_add = EventReceiverExt::recv(&mut snapshots).await.unwrap();
    assert_eq!(after_add.version, start + 1);
    assert_eq!(after_add.members.len(), 1);
    assert!(!after_add.loading);

    assert!(!store.delete(&"zzzzzzzzzzzz".parse().unwrap()));
    assert!(!snapshots.has_changed().unwrap());

    store.delete(&id);
    let after_delete = EventReceiverExt::recv(&mut snapshots).await.unwrap();
    assert_eq!(after_delete.version, start + 2);
    assert!(after_delete.members.is_empty());
}

#[tokio::test]
async fn events_report_adds_and_deletes() {
    let store = empty_store();
    let mut events = store.events().unwrap();

    let id = store.add(validated("Maria Souza"), None);
    store.delete(&id);

    let added = EventReceiverExt::recv(&mut events).await.unwrap();
    assert_eq!(*added, MemberEvent::Added(id.clone()));
    let deleted = EventReceiverExt::recv(&mut events).await.unwrap();
    assert_eq!(*deleted, MemberEvent::Deleted(id.clone()));
    assert_eq!(deleted.id(), &id);
    assert!(events.try_recv().is_err(), "no event for anything else");
}

#[test]
fn shared_handle_sees_the_same_state() {
    let store = empty_store();
    let clone = store.clone();
    let id = store.add(validated("Maria Souza"), None);
    assert!(clone.get(&id).is_some());
    assert!(clone.delete(&id));
    assert!(store.list().is_empty());
}
