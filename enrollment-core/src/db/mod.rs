mod courses;
mod enrollments;
mod schema;
mod students;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::{types::Type, Connection, Row};
use uuid::Uuid;

use crate::error::Result;

pub use schema::SCHEMA;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the enrollment store.
///
/// Cloning is cheap; every clone shares the same connection. Each operation
/// holds the connection lock for its whole duration, so the two reads behind
/// a roster lookup observe the same state.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        tracing::debug!(path = %path.display(), "opening database");
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens the database in the platform data directory.
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "enrollment").ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no home directory found")
        })?;
        Ok(dirs.data_dir().join("enrollment.db"))
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "foreign_keys", true)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })?;
        tracing::info!("database schema is up to date");
        Ok(())
    }

    pub fn ping(&self) -> bool {
        self.with_connection(|conn| Ok(conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?))
            .is_ok()
    }

    pub fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        // A panic while holding the lock cannot leave SQLite half-written.
        let guard = self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&*guard)
    }
}

fn uuid_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
