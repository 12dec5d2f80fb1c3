use url::Url;

use super::client::WikiError;
use crate::i18n::is_valid_language_code;

pub const DEFAULT_API_ENDPOINT: &str = "https://{lang}.wikipedia.org/w/api.php";
pub const ARTICLE_BASE: &str = "https://{lang}.wikipedia.org/wiki/";

/// Builds MediaWiki API request URLs for a language edition.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    endpoint_template: String,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_API_ENDPOINT)
    }
}

impl RequestBuilder {
    /// `endpoint_template` must contain `{lang}`.
    pub fn new(endpoint_template: impl Into<String>) -> Self {
        Self {
            endpoint_template: endpoint_template.into(),
        }
    }

    pub fn endpoint(&self, lang: &str) -> Result<Url, WikiError> {
        check_language(lang)?;
        Ok(Url::parse(&self.endpoint_template.replace("{lang}", lang))?)
    }

    pub fn build_search_query(&self, query: &str, lang: &str, limit: usize) -> Result<Url, WikiError> {
        let mut url = self.endpoint(lang)?;

        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("list", "search")
            .append_pair("srsearch", query)
            .append_pair("srlimit", &limit.to_string())
            .append_pair("format", "json");

        Ok(url)
    }

    pub fn build_summary_query(&self, title: &str, lang: &str) -> Result<Url, WikiError> {
        let mut url = self.endpoint(lang)?;

        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("prop", "extracts")
            .append_pair("exintro", "true")
            .append_pair("explaintext", "true")
            .append_pair("titles", title)
            .append_pair("format", "json");

        Ok(url)
    }
}

/// Public article link, with the title percent-encoded as one path segment.
pub fn article_url(title: &str, lang: &str) -> Result<Url, WikiError> {
    check_language(lang)?;
    let mut url = Url::parse(&ARTICLE_BASE.replace("{lang}", lang))?;
    url.path_segments_mut()
        .map_err(|_| WikiError::Api("article base URL cannot hold a path".to_string()))?
        .pop_if_empty()
        .push(title);
    Ok(url)
}

fn check_language(lang: &str) -> Result<(), WikiError> {
    if is_valid_language_code(lang) {
        Ok(())
    } else {
        Err(WikiError::InvalidLanguage(lang.to_string()))
    }
}
