// Integration tests for saved searches

use std::collections::HashSet;

use tempfile::TempDir;
use wiki_search_builder_lib::database::Database;
use wiki_search_builder_lib::query_builder::{QueryBuilder, QuoteHandling, SearchField, SearchFieldSet};
use wiki_search_builder_lib::saved_searches::{SavedSearchStore, StoreError};

/// Helper function to create a store backed by a database file in a temp dir
fn create_test_store() -> (SavedSearchStore, Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db = Database::open(temp_dir.path().join("saved.db")).expect("Failed to open database");
    let store = SavedSearchStore::new(db.clone(), QueryBuilder::new());
    (store, db, temp_dir)
}

fn rome() -> SearchFieldSet {
    SearchFieldSet::new()
        .with(SearchField::MainQuery, "Rome")
        .with(SearchField::WithoutWords, "film")
        .with_title_only(true)
}

#[test]
fn test_save_and_get_round_trip() {
    let (store, _db, _dir) = create_test_store();

    let saved = store.save("  Rome titles ", &rome()).unwrap();
    assert_eq!(saved.name, "Rome titles");
    assert_eq!(saved.query, "intitle:\"Rome\" -film");
    assert_eq!(saved.created_at, saved.updated_at);

    let loaded = store.get("Rome titles").unwrap();
    assert_eq!(loaded.fields, rome());
    assert_eq!(loaded.query, saved.query);

    let by_id = store.get(&saved.id).unwrap();
    assert_eq!(by_id.name, "Rome titles");
}

#[test]
fn test_saving_existing_name_overwrites() {
    let (store, _db, _dir) = create_test_store();

    let first = store.save("mine", &rome()).unwrap();
    let replacement = SearchFieldSet::new().with(SearchField::AnyWords, "red blue");
    let second = store.save("mine", &replacement).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.created_at, second.created_at);
    assert_eq!(second.query, "(red OR blue)");

    let all = store.list().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].fields, replacement);
}

#[test]
fn test_list_returns_every_search() {
    let (store, _db, _dir) = create_test_store();
    assert!(store.list().unwrap().is_empty());

    store.save("a", &rome()).unwrap();
    store.save("b", &rome()).unwrap();
    store.save("c", &rome()).unwrap();

    let listed = store.list().unwrap();
    let names: HashSet<String> = listed.iter().map(|saved| saved.name.clone()).collect();
    assert_eq!(names.len(), 3);
    assert!(names.contains("a") && names.contains("b") && names.contains("c"));
    assert!(listed.windows(2).all(|pair| pair[0].created_at >= pair[1].created_at));
}

#[test]
fn test_delete_and_not_found() {
    let (store, _db, _dir) = create_test_store();
    store.save("gone", &rome()).unwrap();

    store.delete("gone").unwrap();
    assert!(matches!(store.get("gone"), Err(StoreError::NotFound(_))));
    assert!(matches!(store.delete("gone"), Err(StoreError::NotFound(_))));
    assert!(matches!(store.apply("gone"), Err(StoreError::NotFound(_))));
}

#[test]
fn test_invalid_names_are_rejected() {
    let (store, _db, _dir) = create_test_store();
    assert!(matches!(store.save("   ", &rome()), Err(StoreError::InvalidName)));
    let long = "x".repeat(121);
    assert!(matches!(store.save(&long, &rome()), Err(StoreError::InvalidName)));
    assert!(store.save(&"x".repeat(120), &rome()).is_ok());
}

#[test]
fn test_apply_regenerates_with_current_builder() {
    let (store, db, _dir) = create_test_store();
    let fields = SearchFieldSet::new().with(SearchField::ExactPhrase, "say \"hi\"");
    let saved = store.save("quotes", &fields).unwrap();
    assert_eq!(saved.query, "\"say \\\"hi\\\"\"");

    let verbatim = SavedSearchStore::new(db, QueryBuilder::new().with_quote_handling(QuoteHandling::Verbatim));
    let applied = verbatim.apply("quotes").unwrap();
    assert_eq!(applied.saved.fields, fields);
    assert_eq!(applied.saved.query, saved.query);
    assert_eq!(applied.generated.query, "\"say \"hi\"\"");
}

#[test]
fn test_searches_survive_reopening_the_database() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("persist.db");

    {
        let db = Database::open(&path).unwrap();
        SavedSearchStore::new(db, QueryBuilder::new()).save("kept", &rome()).unwrap();
    }

    let db = Database::open(&path).unwrap();
    let store = SavedSearchStore::new(db, QueryBuilder::new());
    assert_eq!(store.get("kept").unwrap().fields, rome());
}
