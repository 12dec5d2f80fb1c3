pub mod cache;
pub mod client;
pub mod models;
pub mod request_builder;

pub use client::{WikiError, WikipediaClient, SUMMARY_FALLBACK};
pub use models::*;
pub use request_builder::{article_url, RequestBuilder};
