//! Localized UI text.
//!
//! Translations are plain JSON key/value tables per language. The active
//! language and its table travel together in an immutable [`I18nContext`].

pub mod context;
pub mod store;

pub use context::*;
pub use store::*;

pub const DEFAULT_UI_LANGUAGE: &str = "de";

/// Fallback wiki when the UI language is not one of [`SUPPORTED_LANGUAGES`].
pub const FALLBACK_TARGET_LANGUAGE: &str = "de";

pub const SUPPORTED_LANGUAGES: [&str; 9] = ["de", "en", "fr", "es", "zh", "hi", "ar", "ru", "pt"];

const SEARCH_HELP_URLS: [(&str, &str); 9] = [
    ("de", "https://de.wikipedia.org/wiki/Hilfe:Suche"),
    ("en", "https://en.wikipedia.org/wiki/Help:Searching"),
    ("fr", "https://fr.wikipedia.org/wiki/Aide:Recherche"),
    ("es", "https://es.wikipedia.org/wiki/Ayuda:Búsqueda"),
    ("zh", "https://zh.wikipedia.org/wiki/Help:Search"),
    ("hi", "https://hi.wikipedia.org/wiki/Help:Search"),
    ("ar", "https://ar.wikipedia.org/wiki/Help:Search"),
    ("ru", "https://ru.wikipedia.org/wiki/Help:Search"),
    ("pt", "https://pt.wikipedia.org/wiki/Ajuda:Pesquisa"),
];

/// Search-syntax help page for `lang`, English when unknown.
pub fn search_help_url(lang: &str) -> &'static str {
    SEARCH_HELP_URLS
        .iter()
        .find(|(code, _)| *code == lang)
        .or_else(|| SEARCH_HELP_URLS.iter().find(|(code, _)| *code == "en"))
        .map(|(_, url)| *url)
        .unwrap_or("https://en.wikipedia.org/wiki/Help:Searching")
}

/// Wiki searched by default for a given UI language.
pub fn default_target_language(ui_lang: &str) -> &str {
    if SUPPORTED_LANGUAGES.contains(&ui_lang) {
        ui_lang
    } else {
        FALLBACK_TARGET_LANGUAGE
    }
}

/// Accepts wiki subdomain codes such as `en`, `zh-yue` or `simple`.
pub fn is_valid_language_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= 16
        && !code.starts_with('-')
        && !code.ends_with('-')
        && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
