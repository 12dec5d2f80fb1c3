use anyhow::Result as AnyhowResult;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::database::schema::{DatabaseSchema, DATABASE_VERSION};
use crate::logger;

pub type DatabaseResult<T> = AnyhowResult<T>;

pub type DatabaseConnection = Arc<Mutex<Connection>>;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database lock poisoned")]
    LockPoisoned,
}

/// SQLite database holding saved searches and cached API responses.
///
/// The connection sits behind a synchronous mutex; hold the guard only for
/// the duration of a query, never across an `.await`.
#[derive(Clone)]
pub struct Database {
    conn: DatabaseConnection,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (creating if needed) the database file and bring its schema up to date.
    pub fn open<P: AsRef<Path>>(db_path: P) -> DatabaseResult<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        logger::database::connection_attempt(&db_path);

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(DatabaseError::Io)?;
        }

        let conn = Self::create_connection(&db_path).map_err(|e| {
            logger::database::connection_error(&db_path, &e.to_string());
            e
        })?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(db_path),
        };
        db.initialize_database()?;
        Ok(db)
    }

    pub fn open_in_memory() -> DatabaseResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        };
        db.initialize_database()?;
        Ok(db)
    }

    fn create_connection(db_path: &Path) -> DatabaseResult<Connection> {
        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )?;

        let _: rusqlite::Result<String> = conn.query_row("PRAGMA journal_mode=WAL;", [], |row| row.get(0));
        conn.execute_batch("PRAGMA synchronous=NORMAL; PRAGMA temp_store=memory;")?;

        // Verify connection is working
        let _: i64 = conn.query_row("SELECT count(*) FROM sqlite_master;", [], |row| row.get(0))?;

        Ok(conn)
    }

    /// Lock the connection for synchronous work.
    pub fn get_connection(&self) -> Result<MutexGuard<'_, Connection>, DatabaseError> {
        self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)
    }

    pub fn get_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Create the schema, or recreate it when the stored version differs.
    pub fn initialize_database(&self) -> DatabaseResult<()> {
        let conn = self.get_connection()?;
        let current_version = DatabaseSchema::get_database_version(&conn)?;

        if current_version != DATABASE_VERSION {
            if current_version != 0 {
                logger::database::migration(current_version, DATABASE_VERSION);
                DatabaseSchema::drop_tables(&conn)?;
            }
            DatabaseSchema::create_tables(&conn)?;
            DatabaseSchema::set_database_version(&conn, DATABASE_VERSION)?;
        }

        Ok(())
    }

    pub fn is_initialized(&self) -> DatabaseResult<bool> {
        let conn = self.get_connection()?;
        let count: i64 = conn.query_row(
            "SELECT count(name) FROM sqlite_master WHERE type='table' AND name='saved_searches'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
