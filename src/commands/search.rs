use crate::commands::AppState;
use crate::i18n::is_valid_language_code;
use crate::logger;
use crate::presentation::SearchResultView;
use crate::query_builder::{GeneratedQuery, SearchFieldSet};
use crate::wikipedia::SUMMARY_FALLBACK;

#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub target_language: Option<String>,
    /// Overrides the configured result limit.
    pub limit: Option<usize>,
    pub skip_summaries: bool,
}

pub fn generate_query(state: &AppState, fields: &SearchFieldSet) -> GeneratedQuery {
    let generated = state.builder.build(fields);
    logger::debug("SEARCH_COMMAND", "Generated query", Some(generated.display()));
    generated
}

/// Generate the query for `fields` and run it against the target wiki.
///
/// Request failures degrade to an empty result list; only an unusable
/// language code is reported as an error.
pub async fn search(state: &AppState, fields: &SearchFieldSet, options: &SearchOptions) -> Result<SearchResultView, String> {
    let generated = generate_query(state, fields);
    let language = state.target_language(options.target_language.as_deref());

    if !is_valid_language_code(&language) {
        logger::error("SEARCH_COMMAND", "Rejected target language", Some(&language));
        return Err(format!("Invalid language code: '{}'", language));
    }

    let Some(query) = generated.into_option() else {
        logger::info("SEARCH_COMMAND", "Search query or target language missing", None);
        return Ok(SearchResultView::missing_parameters(String::new(), language));
    };

    let limit = options.limit.unwrap_or(state.config.result_limit).max(1);
    let fallback = state.i18n.text("msg-summary-unavailable", SUMMARY_FALLBACK);

    let client = &state.services()?.client;
    logger::info("SEARCH_COMMAND", &format!("Searching {}.wikipedia.org", language), Some(query.as_str()));
    let results = client
        .search_with_summaries(&query, &language, limit, !options.skip_summaries, &fallback)
        .await;

    Ok(SearchResultView::from_results(query, language, results))
}
