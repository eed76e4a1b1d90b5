use vsla_store::error::StoreErrorKind;
use vsla_store::repo::{UserNew, UserUpdate};
use vsla_store::Store;

const CC: &str = "256";
const NOW: i64 = 1_700_000_000;

fn open_store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
}

fn new_user(name: &str, phone: Option<&str>) -> UserNew {
    UserNew {
        name: name.to_string(),
        username: None,
        phone_number: phone.map(|p| p.to_string()),
        alt_phone_number: None,
    }
}

#[test]
fn user_crud_roundtrip() {
    let store = open_store();

    let user = store
        .users()
        .create(NOW, new_user("Akello Grace", Some("+256701234567")), CC)
        .expect("create user");

    let fetched = store
        .users()
        .get(user.id)
        .expect("get user")
        .expect("user exists");
    assert_eq!(fetched.name, "Akello Grace");
    assert_eq!(fetched.phone_number.as_deref(), Some("+256701234567"));

    let updated = store
        .users()
        .update(
            NOW + 10,
            user.id,
            UserUpdate {
                name: Some("Akello G.".to_string()),
                username: Some(Some("akello".to_string())),
                ..Default::default()
            },
        )
        .expect("update user");
    assert_eq!(updated.name, "Akello G.");
    assert_eq!(updated.username.as_deref(), Some("akello"));
    assert_eq!(updated.updated_at, NOW + 10);

    store.users().delete(user.id).expect("delete user");
    let missing = store.users().get(user.id).expect("get user");
    assert!(missing.is_none());
}

#[test]
fn delete_missing_user_reports_not_found() {
    let store = open_store();
    let user = store
        .users()
        .create(NOW, new_user("Okot Brian", None), CC)
        .expect("create user");
    store.users().delete(user.id).expect("delete user");

    let err = store.users().delete(user.id).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
}

#[test]
fn create_rejects_empty_name() {
    let store = open_store();
    let err = store.users().create(NOW, new_user("   ", None), CC).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Core);
}

#[test]
fn find_by_phone_matches_canonical_row_from_local_input() {
    let store = open_store();
    let user = store
        .users()
        .create(NOW, new_user("Akello Grace", Some("+256701234567")), CC)
        .expect("create user");

    let found = store
        .users()
        .find_by_phone("0701234567", CC)
        .expect("lookup")
        .expect("match");
    assert_eq!(found.id, user.id);
}

#[test]
fn find_by_phone_matches_formatted_legacy_row_by_suffix() {
    let store = open_store();
    let user = store
        .users()
        .create(NOW, new_user("Okot Brian", Some("0701 234-567")), CC)
        .expect("create user");

    let found = store
        .users()
        .find_by_phone("+256701234567", CC)
        .expect("lookup")
        .expect("match");
    assert_eq!(found.id, user.id);
}

#[test]
fn find_by_phone_matches_phone_stored_in_username_column() {
    let store = open_store();
    let user = store
        .users()
        .create(
            NOW,
            UserNew {
                name: "Namutebi Joy".to_string(),
                username: Some("0701234567".to_string()),
                phone_number: None,
                alt_phone_number: None,
            },
            CC,
        )
        .expect("create user");

    let found = store
        .users()
        .find_by_phone("256701234567", CC)
        .expect("lookup")
        .expect("match");
    assert_eq!(found.id, user.id);
}

#[test]
fn find_by_phone_matches_alt_phone_column() {
    let store = open_store();
    let user = store
        .users()
        .create(
            NOW,
            UserNew {
                name: "Apio Sarah".to_string(),
                username: None,
                phone_number: Some("0700000001".to_string()),
                alt_phone_number: Some("+256772345678".to_string()),
            },
            CC,
        )
        .expect("create user");

    let found = store
        .users()
        .find_by_phone("0772345678", CC)
        .expect("lookup")
        .expect("match");
    assert_eq!(found.id, user.id);
}

#[test]
fn find_by_phone_returns_none_without_match() {
    let store = open_store();
    store
        .users()
        .create(NOW, new_user("Akello Grace", Some("+256701234567")), CC)
        .expect("create user");

    let found = store
        .users()
        .find_by_phone("0799999999", CC)
        .expect("lookup");
    assert!(found.is_none());
}

#[test]
fn find_by_phone_prefers_first_inserted_row_on_ties() {
    let store = open_store();
    let first = store
        .users()
        .create(NOW, new_user("First Entry", Some("0701 234 567")), CC)
        .expect("create first");
    store
        .users()
        .create(
            NOW + 10,
            UserNew {
                name: "Second Entry".to_string(),
                username: Some("701234567".to_string()),
                phone_number: None,
                alt_phone_number: None,
            },
            CC,
        )
        .expect("create second");

    let found = store
        .users()
        .find_by_phone("+256701234567", CC)
        .expect("lookup")
        .expect("match");
    assert_eq!(found.id, first.id);
}

// Inherited risk: a digit-free input produces an empty match suffix, and
// the suffix predicate then accepts every row with a non-NULL phone
// column. The behavior is pinned here so any deliberate fix surfaces.
#[test]
fn find_by_phone_empty_input_matches_first_row_with_phone() {
    let store = open_store();
    let first = store
        .users()
        .create(NOW, new_user("First Entry", Some("+256701234567")), CC)
        .expect("create first");
    store
        .users()
        .create(NOW + 10, new_user("Second Entry", Some("+256702345678")), CC)
        .expect("create second");

    let found = store
        .users()
        .find_by_phone("", CC)
        .expect("lookup")
        .expect("wildcard match");
    assert_eq!(found.id, first.id);
}

#[test]
fn create_rejects_duplicate_phone_across_variants() {
    let store = open_store();
    store
        .users()
        .create(NOW, new_user("Akello Grace", Some("+256701234567")), CC)
        .expect("create user");

    let err = store
        .users()
        .create(NOW + 10, new_user("Impostor", Some("0701234567")), CC)
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::DuplicatePhone);
}

#[test]
fn list_all_orders_by_name() {
    let store = open_store();
    store
        .users()
        .create(NOW, new_user("beta", None), CC)
        .expect("create");
    store
        .users()
        .create(NOW, new_user("Alpha", None), CC)
        .expect("create");

    let users = store.users().list_all().expect("list");
    let names: Vec<&str> = users.iter().map(|user| user.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "beta"]);
}
