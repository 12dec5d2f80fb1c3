//! Named field-set snapshots that pre-fill the search form.
//!
//! Text values in a preset are usually translation keys; resolving a preset
//! through an [`I18nContext`] swaps them for the localized text, keeping the
//! key itself when no translation exists.

pub mod catalog;

pub use catalog::*;

use serde::Serialize;

use crate::i18n::I18nContext;
use crate::query_builder::SearchFieldSet;

#[derive(Debug, Clone, Serialize)]
pub struct Preset {
    pub key: &'static str,
    pub fields: SearchFieldSet,
}

impl Preset {
    /// Field set with every translation key replaced by its text.
    pub fn resolve(&self, ctx: &I18nContext) -> SearchFieldSet {
        self.fields.map_text(|_, value| {
            if value.is_empty() {
                String::new()
            } else {
                ctx.text(value, value)
            }
        })
    }

    pub fn display_name(&self, ctx: &I18nContext) -> String {
        ctx.text(self.key, self.key)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PresetCategory {
    pub key: &'static str,
    /// `(language, name)` pairs; English is the fallback.
    pub names: Vec<(&'static str, &'static str)>,
    pub presets: Vec<Preset>,
}

impl PresetCategory {
    pub fn display_name(&self, lang: &str) -> &'static str {
        self.names
            .iter()
            .find(|(code, _)| *code == lang)
            .or_else(|| self.names.iter().find(|(code, _)| *code == "en"))
            .map(|(_, name)| *name)
            .unwrap_or(self.key)
    }

    pub fn preset(&self, key: &str) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::TranslationStore;
    use crate::query_builder::{generate, SearchField};

    #[test]
    fn test_category_names_fall_back_to_english() {
        let catalog = PresetCatalog::builtin();
        let history = catalog.category("history").unwrap();
        assert_eq!(history.display_name("de"), "Geschichte");
        assert_eq!(history.display_name("en"), "History");
        assert_eq!(history.display_name("fr"), "History");
    }

    #[test]
    fn test_resolve_translates_keys() {
        let mut store = TranslationStore::builtin();
        let ctx = store.context("en");
        let catalog = PresetCatalog::builtin();

        let preset = catalog.find("history", "ancient_rome").unwrap();
        let fields = preset.resolve(&ctx);
        assert_eq!(fields.main_query, "Roman Empire");
        assert_eq!(fields.in_category, "Ancient Rome");
        assert!(fields.title_only);
        assert!(fields.any_words.is_empty());

        assert_eq!(
            generate(&fields),
            "intitle:\"Roman Empire\" \"Julius Caesar\" -film -series incategory:\"Ancient Rome\""
        );
    }

    #[test]
    fn test_resolve_keeps_untranslated_keys() {
        let ctx = I18nContext::untranslated("fr");
        let catalog = PresetCatalog::builtin();
        let fields = catalog.find("space-exploration", "easy").unwrap().resolve(&ctx);
        assert_eq!(fields.main_query, "preset-easy-search-query");
        assert_eq!(fields.text(SearchField::ExactPhrase), "");
    }

    #[test]
    fn test_preset_display_name() {
        let mut store = TranslationStore::builtin();
        let ctx = store.context("de");
        let catalog = PresetCatalog::builtin();
        let preset = catalog.find("biology", "cells").unwrap();
        assert_eq!(preset.display_name(&ctx), "Zellen");
    }
}
