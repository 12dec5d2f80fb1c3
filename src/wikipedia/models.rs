use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `action=query&list=search`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: Option<SearchQuery>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchHit {
    pub title: String,
    #[serde(default)]
    pub pageid: Option<u64>,
    /// HTML fragment with `<span class="searchmatch">` highlights.
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub wordcount: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Body of `action=query&prop=extracts`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ExtractResponse {
    #[serde(default)]
    pub query: Option<ExtractQuery>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ExtractQuery {
    #[serde(default)]
    pub pages: BTreeMap<String, ExtractPage>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ExtractPage {
    #[serde(default)]
    pub pageid: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub extract: Option<String>,
    /// Present (as an empty string) when the title does not exist.
    #[serde(default)]
    pub missing: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiErrorBody {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

/// One rendered search result.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ArticleResult {
    pub title: String,
    pub url: String,
    pub summary: Option<String>,
    pub snippet: Option<String>,
}
