use notebook_core::{NoteValidationError, NotesStore, RepoError, StoreConfig, StoreError};
use rusqlite::Connection;
use std::collections::HashSet;

fn store() -> NotesStore {
    NotesStore::open_in_memory().unwrap()
}

fn ids(notes: &[notebook_core::Note]) -> Vec<i64> {
    notes.iter().map(|note| note.id).collect()
}

#[test]
fn create_assigns_unique_ids_and_equal_timestamps() {
    let store = store();
    let mut seen = HashSet::new();
    for idx in 0..25 {
        let note = store.create_note(&format!("note {idx}"), "").unwrap();
        assert!(note.id > 0);
        assert_eq!(note.created_at, note.updated_at);
        assert!(seen.insert(note.id), "duplicate id {}", note.id);
    }
    assert_eq!(store.count_notes().unwrap(), 25);
}

#[test]
fn create_trims_title_and_body() {
    let store = store();
    let note = store.create_note("  Shopping  ", "  eggs\nmilk \n").unwrap();
    assert_eq!(note.title, "Shopping");
    assert_eq!(note.body, "eggs\nmilk");
}

#[test]
fn create_with_blank_title_persists_nothing() {
    let store = store();
    store.create_note("kept", "").unwrap();

    for title in ["", "   ", "\t\n"] {
        let err = store.create_note(title, "body").unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(NoteValidationError::BlankTitle)
        ));
    }
    assert_eq!(store.count_notes().unwrap(), 1);
}

#[test]
fn get_note_round_trips_created_note() {
    let store = store();
    let created = store.create_note("Round trip", "body text").unwrap();

    let loaded = store.get_note(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(store.get_note(created.id + 1000).unwrap(), None);
}

#[test]
fn update_replaces_fields_and_moves_updated_at_forward() {
    let store = store();
    let created = store.create_note("draft", "old").unwrap();

    let first = store.update_note(created.id, " final ", " new ").unwrap();
    assert_eq!(first.title, "final");
    assert_eq!(first.body, "new");
    assert_eq!(first.created_at, created.created_at);
    assert!(first.updated_at > created.updated_at);

    let second = store.update_note(created.id, "final", "new").unwrap();
    assert!(second.updated_at > first.updated_at);

    let loaded = store.get_note(created.id).unwrap().unwrap();
    assert_eq!(loaded, second);
}

#[test]
fn update_rejects_blank_title_without_changes() {
    let store = store();
    let created = store.create_note("title", "body").unwrap();

    let err = store.update_note(created.id, "  ", "changed").unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.get_note(created.id).unwrap().unwrap(), created);
}

#[test]
fn update_missing_note_returns_not_found() {
    let store = store();
    let created = store.create_note("title", "body").unwrap();

    let err = store.update_note(created.id + 1, "other", "").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == created.id + 1));
    assert_eq!(store.list_notes().unwrap(), vec![created]);
}

#[test]
fn delete_removes_once() {
    let store = store();
    let keep = store.create_note("keep", "").unwrap();
    let gone = store.create_note("gone", "").unwrap();

    store.delete_note(gone.id).unwrap();
    assert_eq!(store.count_notes().unwrap(), 1);
    assert!(matches!(
        store.delete_note(gone.id).unwrap_err(),
        StoreError::NotFound(_)
    ));
    assert_eq!(store.get_note(keep.id).unwrap(), Some(keep));
}

#[test]
fn list_orders_by_most_recent_update() {
    let store = store();
    let a = store.create_note("a", "").unwrap();
    let b = store.create_note("b", "").unwrap();
    let c = store.create_note("c", "").unwrap();
    assert_eq!(ids(&store.list_notes().unwrap()), vec![c.id, b.id, a.id]);

    store.update_note(a.id, "a2", "").unwrap();
    assert_eq!(ids(&store.list_notes().unwrap()), vec![a.id, c.id, b.id]);
}

#[test]
fn blank_search_matches_full_list() {
    let store = store();
    store.create_note("one", "first").unwrap();
    store.create_note("two", "second").unwrap();

    let all = store.list_notes().unwrap();
    assert_eq!(store.search_notes("").unwrap(), all);
    assert_eq!(store.search_notes("   ").unwrap(), all);
}

#[test]
fn search_matches_title_or_body_in_update_order() {
    let store = store();
    let in_title = store.create_note("Rust notes", "").unwrap();
    let in_body = store.create_note("misc", "learning rust today").unwrap();
    store.create_note("groceries", "milk").unwrap();

    let hits = store.search_notes("rust").unwrap();
    assert_eq!(ids(&hits), vec![in_body.id, in_title.id]);

    store.update_note(in_title.id, "Rust notes", "edited").unwrap();
    let hits = store.search_notes("rust").unwrap();
    assert_eq!(ids(&hits), vec![in_title.id, in_body.id]);
}

#[test]
fn search_treats_wildcards_literally() {
    let store = store();
    let literal = store.create_note("50% off", "").unwrap();
    store.create_note("500 off", "").unwrap();
    store.create_note("a_b", "").unwrap();

    assert_eq!(ids(&store.search_notes("0%").unwrap()), vec![literal.id]);
    assert_eq!(store.search_notes("a_b").unwrap().len(), 1);
    assert!(store.search_notes("a%b").unwrap().is_empty());
}

#[test]
fn clear_removes_everything_and_ids_are_not_reused() {
    let store = store();
    store.create_note("one", "").unwrap();
    let last = store.create_note("two", "").unwrap();

    assert_eq!(store.clear_notes().unwrap(), 2);
    assert_eq!(store.count_notes().unwrap(), 0);
    assert!(store.list_notes().unwrap().is_empty());

    let next = store.create_note("three", "").unwrap();
    assert!(next.id > last.id);
}

#[test]
fn initialize_database_is_idempotent() {
    let mut store = store();
    let created = store.create_note("survives", "").unwrap();

    store.initialize_database().unwrap();
    store.initialize_database().unwrap();
    assert_eq!(store.list_notes().unwrap(), vec![created]);
}

#[test]
fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::in_directory(dir.path());

    let created = {
        let store = NotesStore::open(config.clone()).unwrap();
        store.create_note("persisted", "body").unwrap()
    };

    let reopened = NotesStore::open(config).unwrap();
    assert_eq!(reopened.get_note(created.id).unwrap(), Some(created));
}

#[test]
fn separate_in_memory_stores_are_isolated() {
    let first = store();
    let second = store();
    first.create_note("only here", "").unwrap();
    assert_eq!(second.count_notes().unwrap(), 0);
}

#[test]
fn writes_beyond_capacity_fail_as_storage_errors() {
    let store = NotesStore::open(StoreConfig::in_memory().with_estimated_size(4096)).unwrap();
    let body = "x".repeat(200_000);

    let err = store.create_note("too big", &body).unwrap_err();
    assert!(matches!(err, StoreError::Storage(RepoError::Db(_))));
    assert_eq!(store.count_notes().unwrap(), 0);
}

#[test]
fn unreadable_rows_surface_as_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::in_directory(dir.path());
    let store = NotesStore::open(config.clone()).unwrap();
    store.create_note("fine", "").unwrap();

    let raw = Connection::open(config.database_path().unwrap()).unwrap();
    raw.execute(
        "INSERT INTO notes (title, body, created_at, updated_at)
         VALUES ('broken', '', 'garbage', 'garbage');",
        [],
    )
    .unwrap();
    drop(raw);

    let err = store.list_notes().unwrap_err();
    match err {
        StoreError::Storage(RepoError::InvalidData(message)) => {
            assert!(message.contains("notes.created_at"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(
        store.search_notes("broken").unwrap_err(),
        StoreError::Storage(RepoError::InvalidData(_))
    ));
}
