use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use thiserror::Error;

use crate::config::AppConfig;
use crate::logger;
use crate::wikipedia::{
    cache::ApiCache,
    models::{ArticleResult, ExtractResponse, SearchHit, SearchResponse},
    request_builder::{article_url, RequestBuilder},
};

/// Shown when an article summary cannot be fetched.
pub const SUMMARY_FALLBACK: &str = "Summary could not be retrieved.";

const USER_AGENT: &str = concat!("wiki-search-builder/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum WikiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("API error: {0}")]
    Api(String),
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid language code: '{0}'")]
    InvalidLanguage(String),
}

/// Client for the search and extract endpoints of a Wikipedia edition.
pub struct WikipediaClient {
    http_client: Client,
    requests: RequestBuilder,
    cache: Option<ApiCache>,
    summary_concurrency: usize,
}

impl Default for WikipediaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WikipediaClient {
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            requests: RequestBuilder::default(),
            cache: None,
            summary_concurrency: 4,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, WikiError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            requests: RequestBuilder::default(),
            cache: None,
            summary_concurrency: config.summary_concurrency.max(1),
        })
    }

    pub fn with_cache(mut self, cache: ApiCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn with_request_builder(mut self, requests: RequestBuilder) -> Self {
        self.requests = requests;
        self
    }

    pub fn with_summary_concurrency(mut self, concurrency: usize) -> Self {
        self.summary_concurrency = concurrency.max(1);
        self
    }

    // High-level methods with caching

    pub async fn search(&self, query: &str, lang: &str, limit: usize) -> Result<Vec<SearchHit>, WikiError> {
        let limit_key = limit.to_string();
        let cache_key = ApiCache::cache_key("search", &[lang, limit_key.as_str(), query]);

        if let Some(cached_json) = self.cached(&cache_key) {
            logger::api::cache_hit("search", query);
            return Self::parse_search_results(&cached_json);
        }

        let response_text = self.fetch_search_results_raw(query, lang, limit).await?;
        let hits = Self::parse_search_results(&response_text)?;
        self.store(&cache_key, &response_text);

        Ok(hits)
    }

    /// Plain-text intro of `title`; `None` when the page has no extract.
    pub async fn summary(&self, title: &str, lang: &str) -> Result<Option<String>, WikiError> {
        let cache_key = ApiCache::cache_key("summary", &[lang, title]);

        if let Some(cached_json) = self.cached(&cache_key) {
            logger::api::cache_hit("summary", title);
            return Self::parse_summary(&cached_json);
        }

        let response_text = self.fetch_summary_raw(title, lang).await?;
        let summary = Self::parse_summary(&response_text)?;
        self.store(&cache_key, &response_text);

        Ok(summary)
    }

    /// Search that logs failures and reports them as "no results".
    pub async fn search_or_empty(&self, query: &str, lang: &str, limit: usize) -> Vec<SearchHit> {
        match self.search(query, lang, limit).await {
            Ok(hits) => hits,
            Err(e) => {
                logger::api::failure("search", query, &e.to_string());
                Vec::new()
            }
        }
    }

    pub async fn summary_or_fallback(&self, title: &str, lang: &str, fallback: &str) -> String {
        match self.summary(title, lang).await {
            Ok(Some(summary)) => summary,
            Ok(None) => fallback.to_string(),
            Err(e) => {
                logger::api::failure("summary", title, &e.to_string());
                fallback.to_string()
            }
        }
    }

    /// Run `query` and attach a link and, optionally, a summary to each hit.
    ///
    /// Summaries are fetched concurrently; results keep the search order.
    pub async fn search_with_summaries(
        &self,
        query: &str,
        lang: &str,
        limit: usize,
        fetch_summaries: bool,
        summary_fallback: &str,
    ) -> Vec<ArticleResult> {
        let hits = self.search_or_empty(query, lang, limit).await;
        logger::info("API", &format!("Found {} search results", hits.len()), Some(query));

        let summaries: Vec<Option<String>> = if fetch_summaries {
            stream::iter(hits.iter().map(|hit| async move {
                Some(self.summary_or_fallback(&hit.title, lang, summary_fallback).await)
            }))
            .buffered(self.summary_concurrency)
            .collect()
            .await
        } else {
            vec![None; hits.len()]
        };

        hits.into_iter()
            .zip(summaries)
            .map(|(hit, summary)| ArticleResult {
                url: article_url(&hit.title, lang)
                    .map(|url| url.to_string())
                    .unwrap_or_default(),
                title: hit.title,
                summary,
                snippet: hit.snippet,
            })
            .collect()
    }

    // Low-level API methods (no caching)

    pub async fn fetch_search_results_raw(&self, query: &str, lang: &str, limit: usize) -> Result<String, WikiError> {
        let url = self.requests.build_search_query(query, lang, limit)?;
        logger::api::request("search", lang, query);
        self.get_text(url).await
    }

    pub async fn fetch_summary_raw(&self, title: &str, lang: &str) -> Result<String, WikiError> {
        let url = self.requests.build_summary_query(title, lang)?;
        logger::api::request("summary", lang, title);
        self.get_text(url).await
    }

    async fn get_text(&self, url: url::Url) -> Result<String, WikiError> {
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WikiError::HttpStatus(status.as_u16()));
        }
        Ok(response.text().await?)
    }

    pub fn parse_search_results(json: &str) -> Result<Vec<SearchHit>, WikiError> {
        let response: SearchResponse = serde_json::from_str(json)?;
        if let Some(error) = response.error {
            return Err(WikiError::Api(format!("{}: {}", error.code, error.info)));
        }
        Ok(response.query.map(|query| query.search).unwrap_or_default())
    }

    /// Extract of the first returned page that has one.
    pub fn parse_summary(json: &str) -> Result<Option<String>, WikiError> {
        let response: ExtractResponse = serde_json::from_str(json)?;
        if let Some(error) = response.error {
            return Err(WikiError::Api(format!("{}: {}", error.code, error.info)));
        }
        Ok(response
            .query
            .and_then(|query| {
                query
                    .pages
                    .into_values()
                    .filter(|page| page.missing.is_none())
                    .find_map(|page| page.extract)
            })
            .map(|extract| extract.trim().to_string())
            .filter(|extract| !extract.is_empty()))
    }

    fn cached(&self, key: &str) -> Option<String> {
        let cache = self.cache.as_ref()?;
        match cache.get(key) {
            Ok(hit) => hit,
            Err(e) => {
                logger::warn("API", "Cache lookup failed", Some(&e.to_string()));
                None
            }
        }
    }

    fn store(&self, key: &str, value: &str) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set(key, value) {
                logger::warn("API", "Cache write failed", Some(&e.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_results() {
        let json = r#"{
            "batchcomplete": "",
            "query": {
                "searchinfo": {"totalhits": 2},
                "search": [
                    {"ns": 0, "title": "Rom", "pageid": 4438, "size": 1000, "wordcount": 200,
                     "snippet": "<span class=\"searchmatch\">Rom</span> ist", "timestamp": "2024-01-01T00:00:00Z"},
                    {"ns": 0, "title": "Römisches Reich", "pageid": 9}
                ]
            }
        }"#;
        let hits = WikipediaClient::parse_search_results(json).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Rom");
        assert_eq!(hits[0].pageid, Some(4438));
        assert_eq!(hits[1].snippet, None);
    }

    #[test]
    fn test_parse_search_without_query_block_is_empty() {
        assert!(WikipediaClient::parse_search_results(r#"{"batchcomplete": ""}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_parse_api_error() {
        let json = r#"{"error": {"code": "srsearch-text-disabled", "info": "Search disabled"}}"#;
        let result = WikipediaClient::parse_search_results(json);
        assert!(matches!(result, Err(WikiError::Api(msg)) if msg.contains("srsearch-text-disabled")));
    }

    #[test]
    fn test_parse_summary() {
        let json = r#"{"query": {"pages": {"736": {"pageid": 736, "ns": 0, "title": "Albert Einstein",
            "extract": "Albert Einstein was a physicist.\n"}}}}"#;
        assert_eq!(
            WikipediaClient::parse_summary(json).unwrap().as_deref(),
            Some("Albert Einstein was a physicist.")
        );
    }

    #[test]
    fn test_parse_summary_missing_page() {
        let json = r#"{"query": {"pages": {"-1": {"ns": 0, "title": "Nope", "missing": ""}}}}"#;
        assert_eq!(WikipediaClient::parse_summary(json).unwrap(), None);
    }

    #[test]
    fn test_parse_summary_rejects_garbage() {
        assert!(matches!(
            WikipediaClient::parse_summary("<html>"),
            Err(WikiError::Json(_))
        ));
    }
}
