use serde::Serialize;

use crate::commands::AppState;
use crate::logger;
use crate::presets::{Preset, PresetCatalog};
use crate::query_builder::{GeneratedQuery, SearchFieldSet};

/// A preset resolved for the current language.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedPreset {
    pub category: String,
    pub category_name: String,
    pub preset: String,
    pub preset_name: String,
    /// Translation keys as stored in the catalog.
    pub raw_fields: SearchFieldSet,
    pub fields: SearchFieldSet,
    pub generated: GeneratedQuery,
}

pub fn list_presets(state: &AppState) -> &PresetCatalog {
    &state.catalog
}

pub fn apply_preset(state: &AppState, category: &str, preset: &str) -> Result<AppliedPreset, String> {
    let Some(found_category) = state.catalog.category(category) else {
        logger::warn("PRESET_COMMAND", "Unknown preset category", Some(category));
        return Err(format!("Unknown preset category '{}'", category));
    };
    let Some(found) = found_category.preset(preset) else {
        logger::warn("PRESET_COMMAND", "Unknown preset", Some(&format!("{}/{}", category, preset)));
        return Err(format!("Unknown preset '{}' in category '{}'", preset, category));
    };

    Ok(resolve(state, found_category.key, found_category.display_name(state.i18n.language()), found))
}

fn resolve(state: &AppState, category: &str, category_name: &str, preset: &Preset) -> AppliedPreset {
    let fields = preset.resolve(&state.i18n);
    let generated = state.builder.build(&fields);
    logger::debug(
        "PRESET_COMMAND",
        &format!("Applied preset {}/{}", category, preset.key),
        Some(generated.display()),
    );

    AppliedPreset {
        category: category.to_string(),
        category_name: category_name.to_string(),
        preset: preset.key.to_string(),
        preset_name: preset.display_name(&state.i18n),
        raw_fields: preset.fields.clone(),
        fields,
        generated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn state(lang: &str) -> AppState {
        let config = AppConfig {
            ui_language: lang.to_string(),
            ..AppConfig::default()
        };
        AppState::new(config)
    }

    #[test]
    fn test_apply_ancient_rome_in_english() {
        let applied = apply_preset(&state("en"), "history", "ancient_rome").unwrap();
        assert_eq!(applied.preset_name, "Ancient Rome");
        assert_eq!(applied.fields.main_query, "Roman Empire");
        assert!(applied.generated.query.starts_with("intitle:\"Roman Empire\" \"Julius Caesar\" -film -series"));
        assert!(applied.generated.query.contains("incategory:\"Ancient Rome\""));
        assert_eq!(applied.raw_fields.main_query, "preset-history-ancient-rome-query");
    }

    #[test]
    fn test_category_name_follows_language() {
        let applied = apply_preset(&state("de"), "biology", "cells").unwrap();
        assert_eq!(applied.preset_name, "Zellen");
        assert_ne!(applied.category_name, "biology");
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        let app = state("en");
        assert!(apply_preset(&app, "history", "nope").is_err());
        assert!(apply_preset(&app, "nope", "easy").is_err());
    }

    #[test]
    fn test_list_presets() {
        let app = state("en");
        let catalog = list_presets(&app);
        assert_eq!(catalog.categories.len(), 3);
    }
}
