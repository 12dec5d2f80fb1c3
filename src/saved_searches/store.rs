use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use thiserror::Error;
use uuid::Uuid;

use crate::database::{Database, DatabaseError, SavedSearch};
use crate::logger;
use crate::query_builder::{GeneratedQuery, QueryBuilder, SearchFieldSet};

const MAX_NAME_LENGTH: usize = 120;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Database unavailable: {0}")]
    Connection(#[from] DatabaseError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No saved search named '{0}'")]
    NotFound(String),
    #[error("Saved search names must be 1-120 characters")]
    InvalidName,
    #[error("Stored timestamp '{0}' is not RFC 3339")]
    Timestamp(String),
}

/// A saved search loaded back into the form, with its query regenerated.
#[derive(Debug, Clone)]
pub struct AppliedSearch {
    pub saved: SavedSearch,
    pub generated: GeneratedQuery,
}

/// Named snapshots of the search form, kept in SQLite.
pub struct SavedSearchStore {
    db: Database,
    builder: QueryBuilder,
}

impl SavedSearchStore {
    pub fn new(db: Database, builder: QueryBuilder) -> Self {
        Self { db, builder }
    }

    /// Save `fields` under `name`, replacing any snapshot with that name.
    pub fn save(&self, name: &str, fields: &SearchFieldSet) -> Result<SavedSearch, StoreError> {
        let name = Self::normalize_name(name)?;
        let query = self.builder.generate(fields);
        let fields_json = serde_json::to_string(fields)?;
        let now = Utc::now();

        let conn = self.db.get_connection()?;
        let existing: Option<(String, String)> = conn
            .query_row(
                "SELECT id, created_at FROM saved_searches WHERE name = ?",
                [&name],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let saved = match existing {
            Some((id, created_at)) => {
                conn.execute(
                    "UPDATE saved_searches SET fields_json = ?, query = ?, updated_at = ? WHERE id = ?",
                    params![fields_json, query, now.to_rfc3339(), id],
                )?;
                logger::info("SAVED_SEARCH", &format!("Updated saved search '{}'", name), None);
                SavedSearch {
                    id,
                    name,
                    fields: fields.clone(),
                    query,
                    created_at: parse_timestamp(&created_at)?,
                    updated_at: now,
                }
            }
            None => {
                let id = Uuid::new_v4().to_string();
                conn.execute(
                    "INSERT INTO saved_searches (id, name, fields_json, query, created_at, updated_at)
                     VALUES (?, ?, ?, ?, ?, ?)",
                    params![id, name, fields_json, query, now.to_rfc3339(), now.to_rfc3339()],
                )?;
                logger::info("SAVED_SEARCH", &format!("Saved search '{}'", name), None);
                SavedSearch {
                    id,
                    name,
                    fields: fields.clone(),
                    query,
                    created_at: now,
                    updated_at: now,
                }
            }
        };

        Ok(saved)
    }

    /// All saved searches, most recently saved first.
    pub fn list(&self) -> Result<Vec<SavedSearch>, StoreError> {
        let conn = self.db.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, fields_json, query, created_at, updated_at
             FROM saved_searches ORDER BY created_at DESC, name ASC",
        )?;

        let rows = stmt.query_map([], Self::read_row)?;
        let mut searches = Vec::new();
        for row in rows {
            searches.push(Self::into_saved_search(row?)?);
        }
        Ok(searches)
    }

    pub fn get(&self, name: &str) -> Result<SavedSearch, StoreError> {
        let conn = self.db.get_connection()?;
        let row = conn
            .query_row(
                "SELECT id, name, fields_json, query, created_at, updated_at
                 FROM saved_searches WHERE name = ? OR id = ?",
                [name.trim(), name.trim()],
                Self::read_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        Self::into_saved_search(row)
    }

    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        let conn = self.db.get_connection()?;
        let removed = conn.execute(
            "DELETE FROM saved_searches WHERE name = ? OR id = ?",
            [name.trim(), name.trim()],
        )?;

        if removed == 0 {
            return Err(StoreError::NotFound(name.to_string()));
        }
        logger::info("SAVED_SEARCH", &format!("Deleted saved search '{}'", name), None);
        Ok(())
    }

    /// Load a snapshot and regenerate its query with the current builder.
    pub fn apply(&self, name: &str) -> Result<AppliedSearch, StoreError> {
        let saved = self.get(name)?;
        let generated = self.builder.build(&saved.fields);
        Ok(AppliedSearch { saved, generated })
    }

    fn normalize_name(name: &str) -> Result<String, StoreError> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LENGTH {
            return Err(StoreError::InvalidName);
        }
        Ok(name.to_string())
    }

    fn read_row(row: &Row<'_>) -> rusqlite::Result<StoredRow> {
        Ok(StoredRow {
            id: row.get(0)?,
            name: row.get(1)?,
            fields_json: row.get(2)?,
            query: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn into_saved_search(row: StoredRow) -> Result<SavedSearch, StoreError> {
        Ok(SavedSearch {
            fields: serde_json::from_str(&row.fields_json)?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
            id: row.id,
            name: row.name,
            query: row.query,
        })
    }
}

struct StoredRow {
    id: String,
    name: String,
    fields_json: String,
    query: String,
    created_at: String,
    updated_at: String,
}

fn parse_timestamp(timestamp: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| StoreError::Timestamp(timestamp.to_string()))
}
