use crate::commands::AppState;
use crate::database::SavedSearch;
use crate::logger;
use crate::query_builder::SearchFieldSet;
use crate::saved_searches::AppliedSearch;

pub fn save_search(state: &AppState, name: &str, fields: &SearchFieldSet) -> Result<SavedSearch, String> {
    state.saved_searches()?.save(name, fields).map_err(|e| {
        logger::error("SAVED_COMMAND", "Failed to save search", Some(&e.to_string()));
        e.to_string()
    })
}

pub fn list_saved_searches(state: &AppState) -> Result<Vec<SavedSearch>, String> {
    state.saved_searches()?.list().map_err(|e| {
        logger::error("SAVED_COMMAND", "Failed to list saved searches", Some(&e.to_string()));
        e.to_string()
    })
}

pub fn delete_saved_search(state: &AppState, name: &str) -> Result<(), String> {
    state.saved_searches()?.delete(name).map_err(|e| {
        logger::error("SAVED_COMMAND", "Failed to delete saved search", Some(&e.to_string()));
        e.to_string()
    })
}

/// Load a saved search back into the form and regenerate its query.
pub fn apply_saved_search(state: &AppState, name: &str) -> Result<AppliedSearch, String> {
    state.saved_searches()?.apply(name).map_err(|e| {
        logger::error("SAVED_COMMAND", "Failed to load saved search", Some(&e.to_string()));
        e.to_string()
    })
}
