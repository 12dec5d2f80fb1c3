// Integration tests for presets resolved through translation tables

use std::fs;

use tempfile::TempDir;
use wiki_search_builder_lib::i18n::{I18nContext, TranslationStore};
use wiki_search_builder_lib::presets::PresetCatalog;

#[test]
fn test_untranslated_preset_keeps_keys() {
    let ctx = I18nContext::untranslated("xx");
    let preset = PresetCatalog::builtin().find("space-exploration", "easy").cloned().unwrap();

    let fields = preset.resolve(&ctx);
    assert_eq!(fields.main_query, "preset-easy-search-query");
    assert_eq!(preset.display_name(&ctx), "easy");
}

#[test]
fn test_translation_directory_overrides_builtin_text() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("en.json"),
        r#"{"preset-easy-search-query": "Apollo 11", "easy": "Beginner", "ignored": 5}"#,
    )
    .unwrap();
    fs::write(dir.path().join("fr.json"), "not json").unwrap();

    let mut store = TranslationStore::new(Some(dir.path().to_path_buf()));
    let ctx = store.context("en");
    let preset = PresetCatalog::builtin().find("space-exploration", "easy").cloned().unwrap();

    assert_eq!(preset.resolve(&ctx).main_query, "Apollo 11");
    assert_eq!(preset.display_name(&ctx), "Beginner");
    // Keys not in the file still come from the built-in table.
    assert_eq!(ctx.text("msg-no-results", "?"), "No results found.");
    assert_eq!(ctx.lookup("ignored"), None);

    // A broken file leaves only what could be loaded.
    let fr = store.context("fr");
    assert_eq!(fr.text("msg-no-results", "No results found."), "No results found.");
}
