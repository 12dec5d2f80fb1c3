use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::query_builder::SearchField;

use super::search_help_url;

pub type TranslationTable = HashMap<String, String>;

static ARGUMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\s*([A-Za-z0-9_]+)\s*\}").expect("argument pattern is valid"));

/// Language plus its translation table, passed to whatever renders UI text.
#[derive(Debug, Clone)]
pub struct I18nContext {
    language: String,
    table: Arc<TranslationTable>,
}

impl I18nContext {
    pub fn new(language: impl Into<String>, table: Arc<TranslationTable>) -> Self {
        Self {
            language: language.into(),
            table,
        }
    }

    /// A context that resolves every key to the caller's fallback.
    pub fn untranslated(language: impl Into<String>) -> Self {
        Self::new(language, Arc::new(TranslationTable::new()))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Translation for `key`. Empty strings count as missing.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.table
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn text(&self, key: &str, fallback: &str) -> String {
        self.lookup(key).unwrap_or(fallback).to_string()
    }

    /// Translate `key` and substitute `{name}` arguments.
    ///
    /// Unknown arguments are left in place.
    pub fn format(&self, key: &str, fallback: &str, args: &[(&str, &str)]) -> String {
        let template = self.lookup(key).unwrap_or(fallback);
        ARGUMENT_PATTERN
            .replace_all(template, |caps: &Captures| {
                let name = &caps[1];
                args.iter()
                    .find(|(arg, _)| *arg == name)
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    pub fn placeholder(&self, field: SearchField) -> Option<&str> {
        self.lookup(&format!("{}-placeholder", field.form_id()))
    }

    /// Label of a category dropdown option, the raw value when untranslated.
    pub fn category_label(&self, value: &str) -> String {
        if value.is_empty() {
            return self.text("placeholder-category-dropdown", "Select a category");
        }
        self.text(&format!("category-{}", value), value)
    }

    /// Label of a target-wiki option, the code itself when untranslated.
    pub fn language_label(&self, code: &str) -> String {
        self.text(&format!("lang-{}-option", code), code)
    }

    pub fn help_url(&self) -> &'static str {
        search_help_url(&self.language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> I18nContext {
        let mut table = TranslationTable::new();
        table.insert("msg-results-found".to_string(), "Found {count} results on {lang}.".to_string());
        table.insert("category-Science".to_string(), "Wissenschaft".to_string());
        table.insert("search-query-placeholder".to_string(), "Suchbegriffe".to_string());
        table.insert("empty".to_string(), String::new());
        I18nContext::new("de", Arc::new(table))
    }

    #[test]
    fn test_lookup_and_fallback() {
        let ctx = context();
        assert_eq!(ctx.lookup("category-Science"), Some("Wissenschaft"));
        assert_eq!(ctx.lookup("missing"), None);
        assert_eq!(ctx.lookup("empty"), None);
        assert_eq!(ctx.text("missing", "Fallback"), "Fallback");
    }

    #[test]
    fn test_format_substitutes_known_arguments() {
        let ctx = context();
        let text = ctx.format("msg-results-found", "", &[("count", "3"), ("lang", "de")]);
        assert_eq!(text, "Found 3 results on de.");

        let text = ctx.format("msg-results-found", "", &[("count", "3")]);
        assert_eq!(text, "Found 3 results on {lang}.");
    }

    #[test]
    fn test_format_uses_fallback_template() {
        let ctx = I18nContext::untranslated("en");
        assert_eq!(ctx.format("missing", "Saved \"{name}\".", &[("name", "x")]), "Saved \"x\".");
    }

    #[test]
    fn test_key_conventions() {
        let ctx = context();
        assert_eq!(ctx.placeholder(SearchField::MainQuery), Some("Suchbegriffe"));
        assert_eq!(ctx.placeholder(SearchField::Prefix), None);
        assert_eq!(ctx.category_label("Science"), "Wissenschaft");
        assert_eq!(ctx.category_label("Music"), "Music");
        assert_eq!(ctx.category_label(""), "Select a category");
        assert_eq!(ctx.language_label("fr"), "fr");
        assert_eq!(ctx.help_url(), "https://de.wikipedia.org/wiki/Hilfe:Suche");
    }
}
