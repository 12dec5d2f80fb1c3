use rusqlite::Connection;
use crate::database::connection::DatabaseResult;
use crate::logger;

pub const DATABASE_VERSION: u32 = 1;

pub struct DatabaseSchema;

impl DatabaseSchema {
    pub fn create_tables(conn: &Connection) -> DatabaseResult<()> {
        logger::debug("DATABASE", "Starting database table creation", None);

        let tables: [(&str, fn(&Connection) -> DatabaseResult<()>); 2] = [
            ("saved_searches", Self::create_saved_searches_table),
            ("api_cache", Self::create_api_cache_table),
        ];

        for (table_name, create_fn) in &tables {
            match create_fn(conn) {
                Ok(_) => logger::database::table_creation(table_name, true),
                Err(e) => {
                    logger::database::table_creation(table_name, false);
                    logger::error("DATABASE", &format!("Failed to create table: {}", table_name), Some(&e.to_string()));
                    return Err(e);
                }
            }
        }

        Self::create_indexes(conn)
    }

    fn create_saved_searches_table(conn: &Connection) -> DatabaseResult<()> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS saved_searches (
                id TEXT PRIMARY KEY,                  -- UUID v4
                name TEXT NOT NULL UNIQUE,
                fields_json TEXT NOT NULL,            -- serialized SearchFieldSet
                query TEXT NOT NULL,                  -- generated string at save time
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            [],
        )?;
        Ok(())
    }

    fn create_api_cache_table(conn: &Connection) -> DatabaseResult<()> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS api_cache (
                query_key TEXT PRIMARY KEY,           -- sha256 of the logical request
                response_json TEXT NOT NULL,
                fetched_at TEXT NOT NULL,
                expires_at TEXT NOT NULL
            )
            "#,
            [],
        )?;
        Ok(())
    }

    fn create_indexes(conn: &Connection) -> DatabaseResult<()> {
        let indexes = [
            ("idx_saved_searches_created_at", "CREATE INDEX IF NOT EXISTS idx_saved_searches_created_at ON saved_searches(created_at)"),
            ("idx_api_cache_expires_at", "CREATE INDEX IF NOT EXISTS idx_api_cache_expires_at ON api_cache(expires_at)"),
        ];

        for (index_name, sql) in &indexes {
            if let Err(e) = conn.execute(sql, []) {
                logger::error("DATABASE", &format!("Failed to create index: {}", index_name), Some(&e.to_string()));
                return Err(e.into());
            }
        }

        Ok(())
    }

    pub fn drop_tables(conn: &Connection) -> DatabaseResult<()> {
        for table in ["api_cache", "saved_searches"] {
            conn.execute(&format!("DROP TABLE IF EXISTS {}", table), [])?;
        }
        Ok(())
    }

    /// Stored schema version, 0 for a fresh database.
    pub fn get_database_version(conn: &Connection) -> DatabaseResult<u32> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS db_version (version INTEGER PRIMARY KEY)",
            [],
        )?;

        let version: u32 = conn
            .query_row("SELECT version FROM db_version LIMIT 1", [], |row| row.get(0))
            .unwrap_or(0);

        Ok(version)
    }

    pub fn set_database_version(conn: &Connection, version: u32) -> DatabaseResult<()> {
        conn.execute("DELETE FROM db_version", [])?;
        conn.execute("INSERT INTO db_version (version) VALUES (?)", [version])?;
        Ok(())
    }
}
