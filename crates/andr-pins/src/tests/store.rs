use crate::tests::SwitchableBackend;
use crate::{Pin, PinError, PinStore};

use andr_session::{FileBackend, Identity, MemoryBackend, SessionError};

use googletest::assert_that;
use googletest::prelude::{anything, err};
use proptest::prelude::*;
use tempfile::TempDir;

fn pin(user_id: &str, name: &str) -> Pin {
    Pin::new(user_id, name, None, 51.5, -0.12).unwrap()
}

fn names(pins: &[Pin]) -> Vec<&str> {
    pins.iter().map(Pin::name).collect()
}

// =========================================================================
// Add / List
// =========================================================================

#[test]
fn given_new_pins_when_added_then_ids_assigned_in_order() {
    let store = PinStore::new(MemoryBackend::new());

    let first = store.add_pin(pin("user123", "A")).unwrap();
    let second = store.add_pin(pin("user123", "B")).unwrap();

    assert_eq!(first.id(), 1);
    assert_eq!(second.id(), 2);
    assert_eq!(
        names(&store.pins_for_user("user123").unwrap()),
        vec!["A", "B"]
    );
}

#[test]
fn given_pins_of_two_users_when_listed_then_scoped_to_owner() {
    let store = PinStore::new(MemoryBackend::new());
    store.add_pin(pin("alice", "Cafe")).unwrap();
    store.add_pin(pin("bob", "Gym")).unwrap();
    store.add_pin(pin("alice", "Park")).unwrap();

    let alice = Identity::new("alice", "Alice").unwrap();

    assert_eq!(names(&store.pins_for(&alice).unwrap()), vec!["Cafe", "Park"]);
    assert_eq!(names(&store.pins_for_user("bob").unwrap()), vec!["Gym"]);
    assert!(store.pins_for_user("carol").unwrap().is_empty());
}

#[test]
fn given_existing_id_when_added_then_replaced_not_duplicated() {
    let store = PinStore::new(MemoryBackend::new());
    let stored = store.add_pin(pin("user123", "Old name")).unwrap();

    let replacement = pin("user123", "New name").with_id(stored.id());
    store.add_pin(replacement).unwrap();

    let pins = store.pins_for_user("user123").unwrap();
    assert_eq!(pins.len(), 1);
    assert_eq!(pins[0].id(), stored.id());
    assert_eq!(pins[0].name(), "New name");
}

#[test]
fn given_replacement_with_other_owner_when_added_then_moves_to_that_owner() {
    let store = PinStore::new(MemoryBackend::new());
    let stored = store.add_pin(pin("alice", "Shared")).unwrap();

    store
        .add_pin(pin("bob", "Shared").with_id(stored.id()))
        .unwrap();

    assert!(store.pins_for_user("alice").unwrap().is_empty());
    assert_eq!(store.pins_for_user("bob").unwrap().len(), 1);
}

#[test]
fn given_explicit_high_id_when_added_then_later_ids_follow_it() {
    let store = PinStore::new(MemoryBackend::new());

    store.add_pin(pin("u", "Far").with_id(40)).unwrap();
    let next = store.add_pin(pin("u", "Next")).unwrap();

    assert_eq!(next.id(), 41);
}

#[test]
fn given_ids_past_nine_when_listed_then_numeric_order() {
    let store = PinStore::new(MemoryBackend::new());
    for i in 0..11 {
        store.add_pin(pin("u", &format!("p{i}"))).unwrap();
    }

    let ids: Vec<u64> = store
        .pins_for_user("u")
        .unwrap()
        .iter()
        .map(Pin::id)
        .collect();

    assert_eq!(ids, (1..=11).collect::<Vec<u64>>());
}

// =========================================================================
// Failure Paths
// =========================================================================

#[test]
fn given_failing_commit_when_adding_then_error_and_nothing_stored() {
    let backend = SwitchableBackend::default();
    let store = PinStore::new(backend.clone());
    store.add_pin(pin("u", "Kept")).unwrap();
    backend.fail_commits(true);

    let result = store.add_pin(pin("u", "Lost"));

    assert!(matches!(
        result,
        Err(PinError::Storage(SessionError::Backend { .. }))
    ));
    assert_eq!(names(&store.pins_for_user("u").unwrap()), vec!["Kept"]);

    backend.fail_commits(false);
    assert_eq!(store.add_pin(pin("u", "Retried")).unwrap().id(), 2);
}

#[test]
fn given_pin_with_invalid_fields_when_deserialized_and_added_then_rejected() {
    let store = PinStore::new(MemoryBackend::new());
    let bogus: Pin = serde_json::from_str(
        r#"{"id": 0, "user_id": "u", "name": "", "latitude": 0.0, "longitude": 0.0}"#,
    )
    .unwrap();

    assert_that!(store.add_pin(bogus), err(anything()));
    assert!(store.pins_for_user("u").unwrap().is_empty());
}

#[test]
fn given_unreadable_entry_when_listed_then_skipped() {
    let backend = SwitchableBackend::with_entries([
        ("pin/00000000000000000001", "not json"),
        (
            "pin/00000000000000000002",
            r#"{"id": 2, "user_id": "u", "name": "Good", "latitude": 1.0, "longitude": 2.0}"#,
        ),
    ]);
    let store = PinStore::new(backend);

    assert_eq!(names(&store.pins_for_user("u").unwrap()), vec!["Good"]);
}

#[test]
fn given_missing_counter_when_adding_then_continues_after_highest_id() {
    let backend = SwitchableBackend::with_entries([(
        "pin/00000000000000000005",
        r#"{"id": 5, "user_id": "u", "name": "Five", "latitude": 1.0, "longitude": 2.0}"#,
    )]);
    let store = PinStore::new(backend);

    assert_eq!(store.add_pin(pin("u", "Six")).unwrap().id(), 6);
}

// =========================================================================
// Persistence
// =========================================================================

#[test]
fn given_pins_file_when_reopened_then_pins_and_counter_survive() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pins.json");

    {
        let store = PinStore::new(FileBackend::open(&path).unwrap());
        store
            .add_pin(Pin::new("u", "Home", Some(String::from("door")), 10.0, 20.0).unwrap())
            .unwrap();
    }

    let store = PinStore::new(FileBackend::open(&path).unwrap());
    let pins = store.pins_for_user("u").unwrap();

    assert_eq!(pins.len(), 1);
    assert_eq!(pins[0].description(), Some("door"));
    assert_eq!(store.add_pin(pin("u", "Work")).unwrap().id(), 2);
}

// =========================================================================
// Property-Based Tests
// =========================================================================

proptest! {
    #[test]
    fn given_pins_for_many_users_when_listed_then_each_user_sees_exactly_theirs(
        owners in proptest::collection::vec(0usize..3, 0..20),
    ) {
        let users = ["alice", "bob", "carol"];
        let store = PinStore::new(MemoryBackend::new());

        for (i, owner) in owners.iter().enumerate() {
            store.add_pin(pin(users[*owner], &format!("pin{i}"))).unwrap();
        }

        for (index, user) in users.iter().enumerate() {
            let expected: Vec<String> = owners
                .iter()
                .enumerate()
                .filter(|(_, owner)| **owner == index)
                .map(|(i, _)| format!("pin{i}"))
                .collect();
            let listed: Vec<String> = store
                .pins_for_user(user)
                .unwrap()
                .iter()
                .map(|pin| pin.name().to_string())
                .collect();

            prop_assert_eq!(listed, expected);
        }
    }
}
