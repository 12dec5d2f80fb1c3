//! Rendering of commands' results for the terminal, as text or JSON.

use std::fmt::Write as _;

use serde::Serialize;

use crate::database::SavedSearch;
use crate::i18n::{I18nContext, SUPPORTED_LANGUAGES};
use crate::presets::PresetCatalog;
use crate::query_builder::{GeneratedQuery, SearchField, SearchFieldSet, NO_PARAMETERS_MESSAGE, TITLE_ONLY_FORM_ID};
use crate::wikipedia::ArticleResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// Nothing to search for, or no wiki selected.
    MissingParameters,
    NoResults,
    Found,
}

/// Outcome of one search, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultView {
    pub query: String,
    pub language: String,
    pub status: SearchStatus,
    pub results: Vec<ArticleResult>,
}

impl SearchResultView {
    pub fn missing_parameters(query: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: language.into(),
            status: SearchStatus::MissingParameters,
            results: Vec::new(),
        }
    }

    pub fn from_results(query: impl Into<String>, language: impl Into<String>, results: Vec<ArticleResult>) -> Self {
        let status = if results.is_empty() {
            SearchStatus::NoResults
        } else {
            SearchStatus::Found
        };
        Self {
            query: query.into(),
            language: language.into(),
            status,
            results,
        }
    }
}

/// One selectable wiki / UI language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageInfo {
    pub code: String,
    pub label: String,
    pub help_url: String,
    pub current: bool,
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Serialization error: {}", e))
}

/// The generated query line, or the localized "no parameters" message.
pub fn render_generated(ctx: &I18nContext, generated: &GeneratedQuery) -> String {
    let fallback = ctx.text("msg-no-parameters", NO_PARAMETERS_MESSAGE);
    generated.display_or(&fallback).to_string()
}

/// Populated fields, one per line, labelled with their localized placeholder.
pub fn render_fields(ctx: &I18nContext, fields: &SearchFieldSet) -> String {
    let mut out = String::new();
    for field in fields.populated_fields() {
        let label = ctx.placeholder(field).unwrap_or(field.form_id());
        let value = match field {
            SearchField::Category => ctx.category_label(fields.text(field)),
            _ => fields.text(field).to_string(),
        };
        let _ = writeln!(out, "  {}: {}", label, value);
    }
    if fields.title_only {
        let _ = writeln!(out, "  [x] {}", ctx.text(TITLE_ONLY_FORM_ID, "Search in titles only"));
    }
    out
}

pub fn render_search(ctx: &I18nContext, view: &SearchResultView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {}",
        ctx.text("label-generated-query", "Generated search string"),
        render_generated(ctx, &GeneratedQuery { query: view.query.clone() })
    );

    match view.status {
        SearchStatus::MissingParameters => {
            let _ = writeln!(
                out,
                "{}",
                ctx.text(
                    "msg-missing-parameters",
                    "Please enter some search parameters or select a target language."
                )
            );
        }
        SearchStatus::NoResults => {
            let _ = writeln!(out, "{}", ctx.text("msg-no-results", "No results found."));
        }
        SearchStatus::Found => {
            let count = view.results.len().to_string();
            let _ = writeln!(
                out,
                "{}",
                ctx.format(
                    "msg-results-found",
                    "Found {count} results on {lang}.wikipedia.org.",
                    &[("count", count.as_str()), ("lang", view.language.as_str())],
                )
            );
            let link_label = ctx.text("label-link", "Link");
            for (index, result) in view.results.iter().enumerate() {
                let _ = writeln!(out);
                let _ = writeln!(out, "{}. {}", index + 1, result.title);
                if let Some(summary) = &result.summary {
                    let _ = writeln!(out, "   {}", summary);
                }
                let _ = writeln!(out, "   {}: {}", link_label, result.url);
            }
        }
    }
    out
}

pub fn render_preset_catalog(ctx: &I18nContext, catalog: &PresetCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}:", ctx.text("label-preset-categories", "Preset categories"));
    for category in &catalog.categories {
        let _ = writeln!(out, "  {} ({})", category.display_name(ctx.language()), category.key);
        for preset in &category.presets {
            let _ = writeln!(out, "    - {} ({})", preset.display_name(ctx), preset.key);
        }
    }
    out
}

pub fn render_preset(ctx: &I18nContext, title: &str, fields: &SearchFieldSet, generated: &GeneratedQuery) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    out.push_str(&render_fields(ctx, fields));
    let _ = writeln!(
        out,
        "{}: {}",
        ctx.text("label-generated-query", "Generated search string"),
        render_generated(ctx, generated)
    );
    out
}

pub fn render_saved_list(ctx: &I18nContext, searches: &[SavedSearch]) -> String {
    if searches.is_empty() {
        return format!("{}\n", ctx.text("msg-no-saved-searches", "No saved searches yet."));
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}:", ctx.text("label-saved-searches", "Saved searches"));
    for saved in searches {
        let _ = writeln!(
            out,
            "  {}  [{}]  {}",
            saved.name,
            saved.created_at.format("%Y-%m-%d %H:%M"),
            if saved.query.is_empty() { "-" } else { saved.query.as_str() }
        );
    }
    out
}

pub fn render_saved(ctx: &I18nContext, saved: &SavedSearch, generated: &GeneratedQuery) -> String {
    let title = format!("{} ({})", saved.name, saved.id);
    render_preset(ctx, &title, &saved.fields, generated)
}

pub fn language_infos(ctx: &I18nContext) -> Vec<LanguageInfo> {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|code| LanguageInfo {
            code: code.to_string(),
            label: ctx.language_label(code),
            help_url: crate::i18n::search_help_url(code).to_string(),
            current: *code == ctx.language(),
        })
        .collect()
}

pub fn render_languages(ctx: &I18nContext, languages: &[LanguageInfo]) -> String {
    let mut out = String::new();
    for info in languages {
        let marker = if info.current { "*" } else { " " };
        let _ = writeln!(out, "{} {:<3} {:<12} {}", marker, info.code, info.label, info.help_url);
    }
    let _ = writeln!(out, "{}: {}", ctx.text("label-help", "Search help"), ctx.help_url());
    out
}
