pub mod commands;
pub mod config;
pub mod database;
pub mod i18n;
pub mod logger;
pub mod presentation;
pub mod presets;
pub mod query_builder;
pub mod saved_searches;
pub mod wikipedia;

pub use query_builder::{generate, GeneratedQuery, QueryBuilder, SearchField, SearchFieldSet};
