use crate::commands::AppState;
use crate::logger;
use crate::presentation::{language_infos, LanguageInfo};

pub fn list_languages(state: &AppState) -> Vec<LanguageInfo> {
    language_infos(&state.i18n)
}

/// Drop every cached API response; returns how many were removed.
pub fn clear_cache(state: &AppState) -> Result<usize, String> {
    match state.services()?.cache.clear() {
        Ok(count) => {
            logger::info("SYSTEM_COMMAND", &format!("Cleared {} cached responses", count), None);
            Ok(count)
        }
        Err(e) => {
            logger::error("SYSTEM_COMMAND", "Failed to clear API cache", Some(&e.to_string()));
            Err(format!("Failed to clear cache: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::database::Database;

    #[test]
    fn test_clear_cache_counts_entries() {
        let app = AppState::with_database(AppConfig::default(), Database::open_in_memory().unwrap()).unwrap();
        let cache = &app.services().unwrap().cache;
        cache.set("a", "{}").unwrap();
        cache.set("b", "{}").unwrap();
        assert_eq!(clear_cache(&app).unwrap(), 2);
        assert_eq!(clear_cache(&app).unwrap(), 0);
    }

    #[test]
    fn test_languages_follow_ui_language() {
        let app = AppState::new(AppConfig::default());
        let languages = list_languages(&app);
        let current = languages.iter().find(|info| info.current).unwrap();
        assert_eq!(current.code, "de");
        assert_eq!(current.label, "Deutsch");
        assert!(!app.has_open_services());
    }
}
