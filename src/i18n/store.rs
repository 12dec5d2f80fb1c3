use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use super::context::{I18nContext, TranslationTable};
use crate::logger;

const BUILTIN_TABLES: [(&str, &str); 2] = [
    ("en", include_str!("../../translations/en.json")),
    ("de", include_str!("../../translations/de.json")),
];

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads and caches translation tables.
///
/// Tables from `dir/<lang>.json` are layered over the compiled-in tables, so a
/// partial file only needs the keys it changes.
pub struct TranslationStore {
    dir: Option<PathBuf>,
    tables: HashMap<String, Arc<TranslationTable>>,
}

impl TranslationStore {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self {
            dir,
            tables: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(None)
    }

    /// Table for `lang`, loading it on first use. Never fails: problems are
    /// logged and whatever could be loaded is returned.
    pub fn load(&mut self, lang: &str) -> Arc<TranslationTable> {
        if let Some(table) = self.tables.get(lang) {
            return Arc::clone(table);
        }

        let mut table = Self::builtin_table(lang).unwrap_or_default();

        if let Some(dir) = &self.dir {
            let path = dir.join(format!("{}.json", lang));
            if path.exists() {
                match Self::read_table(&path) {
                    Ok(overrides) => table.extend(overrides),
                    Err(e) => logger::error(
                        "I18N",
                        &format!("Could not load translations for {}", lang),
                        Some(&e.to_string()),
                    ),
                }
            } else {
                logger::debug("I18N", &format!("No translation file at {}", path.display()), None);
            }
        }

        if table.is_empty() {
            logger::warn("I18N", &format!("No translations available for '{}'", lang), None);
        }

        let table = Arc::new(table);
        self.tables.insert(lang.to_string(), Arc::clone(&table));
        table
    }

    pub fn context(&mut self, lang: &str) -> I18nContext {
        I18nContext::new(lang, self.load(lang))
    }

    pub fn builtin_table(lang: &str) -> Option<TranslationTable> {
        let (_, raw) = BUILTIN_TABLES.iter().find(|(code, _)| *code == lang)?;
        match Self::parse_table(raw) {
            Ok(table) => Some(table),
            Err(e) => {
                logger::error("I18N", &format!("Built-in table for {} is invalid", lang), Some(&e.to_string()));
                None
            }
        }
    }

    pub fn read_table(path: &Path) -> Result<TranslationTable, TranslationError> {
        let content = fs::read_to_string(path)?;
        Self::parse_table(&content)
    }

    /// Parse a flat JSON object; non-string values are skipped.
    pub fn parse_table(content: &str) -> Result<TranslationTable, TranslationError> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(content)?;
        Ok(raw
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(text) => Some((key, text)),
                _ => None,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_tables_parse() {
        let en = TranslationStore::builtin_table("en").unwrap();
        let de = TranslationStore::builtin_table("de").unwrap();
        assert_eq!(en.get("msg-no-parameters").unwrap(), "No parameters entered.");
        assert_eq!(de.get("category-Science").unwrap(), "Wissenschaft");
        assert!(TranslationStore::builtin_table("fr").is_none());
    }

    #[test]
    fn test_directory_overrides_builtin() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("en.json"),
            r#"{"msg-searching": "Looking...", "count": 3}"#,
        )
        .unwrap();

        let mut store = TranslationStore::new(Some(temp_dir.path().to_path_buf()));
        let ctx = store.context("en");
        assert_eq!(ctx.lookup("msg-searching"), Some("Looking..."));
        assert_eq!(ctx.lookup("msg-no-results"), Some("No results found."));
        assert_eq!(ctx.lookup("count"), None);
    }

    #[test]
    fn test_broken_file_degrades_to_builtin() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("de.json"), "{ not json").unwrap();

        let mut store = TranslationStore::new(Some(temp_dir.path().to_path_buf()));
        let ctx = store.context("de");
        assert_eq!(ctx.lookup("msg-no-results"), Some("Keine Ergebnisse gefunden."));
    }

    #[test]
    fn test_unknown_language_is_empty() {
        let mut store = TranslationStore::builtin();
        let ctx = store.context("fr");
        assert_eq!(ctx.language(), "fr");
        assert_eq!(ctx.text("msg-no-results", "No results found."), "No results found.");
    }

    #[test]
    fn test_tables_are_cached() {
        let mut store = TranslationStore::builtin();
        let first = store.load("en");
        let second = store.load("en");
        assert!(Arc::ptr_eq(&first, &second));
    }
}
