use serde::Serialize;

use super::{Preset, PresetCategory};
use crate::query_builder::{SearchField, SearchFieldSet};

#[derive(Debug, Clone, Serialize)]
pub struct PresetCatalog {
    pub categories: Vec<PresetCategory>,
}

impl PresetCatalog {
    pub fn builtin() -> Self {
        Self {
            categories: vec![space_exploration(), history(), biology()],
        }
    }

    pub fn category(&self, key: &str) -> Option<&PresetCategory> {
        self.categories.iter().find(|category| category.key == key)
    }

    pub fn find(&self, category: &str, preset: &str) -> Option<&Preset> {
        self.category(category)?.preset(preset)
    }
}

fn space_exploration() -> PresetCategory {
    PresetCategory {
        key: "space-exploration",
        names: vec![("en", "Space Exploration"), ("de", "Weltraumforschung")],
        presets: vec![
            Preset {
                key: "easy",
                fields: SearchFieldSet::new()
                    .with(SearchField::MainQuery, "preset-easy-search-query"),
            },
            Preset {
                key: "medium",
                fields: SearchFieldSet::new()
                    .with(SearchField::MainQuery, "preset-medium-search-query")
                    .with(SearchField::ExactPhrase, "preset-medium-exact-phrase")
                    .with(SearchField::WithoutWords, "preset-medium-without-words")
                    .with(SearchField::AnyWords, "preset-medium-any-words"),
            },
        ],
    }
}

fn history() -> PresetCategory {
    PresetCategory {
        key: "history",
        names: vec![("en", "History"), ("de", "Geschichte")],
        presets: vec![
            Preset {
                key: "ancient_rome",
                fields: SearchFieldSet::new()
                    .with(SearchField::MainQuery, "preset-history-ancient-rome-query")
                    .with(SearchField::ExactPhrase, "preset-history-ancient-rome-exact-phrase")
                    .with(SearchField::WithoutWords, "preset-history-ancient-rome-without-words")
                    .with(SearchField::InCategory, "preset-history-ancient-rome-incategory")
                    .with_title_only(true),
            },
            Preset {
                key: "world_wars",
                fields: SearchFieldSet::new()
                    .with(SearchField::MainQuery, "preset-history-world-wars-query")
                    .with(SearchField::WithoutWords, "preset-history-world-wars-without-words")
                    .with(SearchField::AnyWords, "preset-history-world-wars-any-words")
                    .with(SearchField::InCategory, "preset-history-world-wars-incategory"),
            },
        ],
    }
}

fn biology() -> PresetCategory {
    PresetCategory {
        key: "biology",
        names: vec![("en", "Biology"), ("de", "Biologie")],
        presets: vec![Preset {
            key: "cells",
            fields: SearchFieldSet::new()
                .with(SearchField::MainQuery, "preset-biology-cells-query")
                .with(SearchField::ExactPhrase, "preset-biology-cells-exact-phrase")
                .with(SearchField::AnyWords, "preset-biology-cells-any-words")
                .with(SearchField::InCategory, "preset-biology-cells-incategory")
                .with(SearchField::DeepCategory, "preset-biology-cells-deepcat"),
        }],
    }
}
