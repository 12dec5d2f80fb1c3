use anyhow::anyhow;
use chrono::{Duration, Utc};
use rusqlite::OptionalExtension;
use sha2::{Digest, Sha256};

use crate::database::{Database, DatabaseResult};

/// Raw API responses stored in SQLite with an expiry.
#[derive(Clone)]
pub struct ApiCache {
    db: Database,
    ttl: Duration,
}

impl ApiCache {
    /// Fails when `ttl_hours` does not fit in a [`Duration`].
    pub fn new(db: Database, ttl_hours: i64) -> DatabaseResult<Self> {
        let ttl = Duration::try_hours(ttl_hours)
            .ok_or_else(|| anyhow!("Cache TTL of {} hours is out of range", ttl_hours))?;
        Ok(Self { db, ttl })
    }

    /// Stable key for a logical request, independent of URL encoding details.
    pub fn cache_key(kind: &str, parts: &[&str]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(kind.as_bytes());
        for part in parts {
            hasher.update([0x1f]);
            hasher.update(part.as_bytes());
        }
        hex::encode(hasher.finalize())
    }

    pub fn get(&self, key: &str) -> DatabaseResult<Option<String>> {
        let now = Utc::now().to_rfc3339();
        let conn = self.db.get_connection()?;

        let mut stmt = conn.prepare(
            "SELECT response_json FROM api_cache WHERE query_key = ? AND expires_at > ?",
        )?;

        let result: Option<String> = stmt
            .query_row([key, now.as_str()], |row| row.get(0))
            .optional()?;

        Ok(result)
    }

    pub fn set(&self, key: &str, value: &str) -> DatabaseResult<()> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let conn = self.db.get_connection()?;

        conn.execute(
            "INSERT OR REPLACE INTO api_cache (query_key, response_json, fetched_at, expires_at) VALUES (?, ?, ?, ?)",
            (key, value, now.to_rfc3339(), expires_at.to_rfc3339()),
        )?;

        Ok(())
    }

    /// Remove every cached response; returns how many were dropped.
    pub fn clear(&self) -> DatabaseResult<usize> {
        let conn = self.db.get_connection()?;
        Ok(conn.execute("DELETE FROM api_cache", [])?)
    }

    pub fn purge_expired(&self) -> DatabaseResult<usize> {
        let now = Utc::now().to_rfc3339();
        let conn = self.db.get_connection()?;
        Ok(conn.execute("DELETE FROM api_cache WHERE expires_at <= ?", [now])?)
    }
}
