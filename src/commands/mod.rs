//! Command handlers behind the CLI.
//!
//! Handlers take the shared [`AppState`], log failures under a component tag
//! and report them to the caller as plain strings.

pub mod presets;
pub mod saved;
pub mod search;
pub mod system;

use once_cell::sync::OnceCell;

use crate::config::AppConfig;
use crate::database::Database;
use crate::i18n::{default_target_language, I18nContext, TranslationStore};
use crate::logger;
use crate::presets::PresetCatalog;
use crate::query_builder::QueryBuilder;
use crate::saved_searches::SavedSearchStore;
use crate::wikipedia::{cache::ApiCache, WikipediaClient};

/// Database-backed services, opened on first use.
pub struct Services {
    pub db: Database,
    pub cache: ApiCache,
    pub client: WikipediaClient,
}

impl Services {
    fn build(config: &AppConfig, db: Database) -> Result<Self, String> {
        let cache = ApiCache::new(db.clone(), config.cache_ttl_hours).map_err(|e| {
            logger::error("APP_STATE", "Failed to set up API cache", Some(&e.to_string()));
            format!("Cache unavailable: {}", e)
        })?;

        match cache.purge_expired() {
            Ok(0) => {}
            Ok(count) => logger::debug("APP_STATE", &format!("Purged {} expired cache entries", count), None),
            Err(e) => logger::warn("APP_STATE", "Failed to purge expired cache entries", Some(&e.to_string())),
        }

        let client = match WikipediaClient::from_config(config) {
            Ok(client) => client.with_cache(cache.clone()),
            Err(e) => {
                logger::error("APP_STATE", "Failed to build HTTP client", Some(&e.to_string()));
                return Err(format!("HTTP client unavailable: {}", e));
            }
        };

        Ok(Self { db, cache, client })
    }
}

/// Everything a command needs.
///
/// Translations, presets and the query builder are ready immediately. The
/// database, cache and HTTP client are opened by [`AppState::services`] the
/// first time a command asks for them, so query generation never touches disk.
pub struct AppState {
    pub config: AppConfig,
    pub i18n: I18nContext,
    pub builder: QueryBuilder,
    pub catalog: PresetCatalog,
    services: OnceCell<Services>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let i18n = TranslationStore::new(config.translations_dir.clone()).context(&config.ui_language);
        Self {
            builder: QueryBuilder::new().with_quote_handling(config.quote_handling),
            catalog: PresetCatalog::builtin(),
            config,
            i18n,
            services: OnceCell::new(),
        }
    }

    /// Build the state around an already open database.
    pub fn with_database(config: AppConfig, db: Database) -> Result<Self, String> {
        let state = Self::new(config);
        let services = Services::build(&state.config, db)?;
        let _ = state.services.set(services);
        Ok(state)
    }

    /// Database, cache and client, opening the database file under the
    /// configured data directory on first call.
    pub fn services(&self) -> Result<&Services, String> {
        self.services.get_or_try_init(|| {
            let db_path = self.config.paths().database_file();
            let db = Database::open(&db_path).map_err(|e| {
                logger::database::connection_error(&db_path, &e.to_string());
                format!("Database unavailable: {}", e)
            })?;
            Services::build(&self.config, db)
        })
    }

    #[cfg(test)]
    pub(crate) fn has_open_services(&self) -> bool {
        self.services.get().is_some()
    }

    pub fn saved_searches(&self) -> Result<SavedSearchStore, String> {
        Ok(SavedSearchStore::new(self.services()?.db.clone(), self.builder))
    }

    /// Wiki to search: the explicit choice, then the configured one, then the UI default.
    ///
    /// An explicitly empty choice means English.
    pub fn target_language(&self, requested: Option<&str>) -> String {
        match requested.map(str::trim) {
            Some("") => "en".to_string(),
            Some(lang) => lang.to_string(),
            None => self
                .config
                .target_language
                .clone()
                .unwrap_or_else(|| default_target_language(&self.config.ui_language).to_string()),
        }
    }
}
