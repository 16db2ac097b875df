use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::data::LaunchRecord;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("database error: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("stored launch could not be decoded: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type LibraryResult<T> = Result<T, LibraryError>;

/// The Library keeps the user's favourite launches in a SQLite database
/// so they survive restarts.
pub struct Library {
    conn: Connection,
    db_path: PathBuf,
}

impl Library {
    /// Open (or create) the favourites database at `db_path`.
    ///
    /// The default location lives in the user's data directory:
    /// - Linux: ~/.local/share/launch-deck/launch_deck.db
    /// - macOS: ~/Library/Application Support/launch-deck/launch_deck.db
    /// - Windows: %APPDATA%\launch-deck\launch_deck.db
    pub fn open(db_path: &Path) -> LibraryResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LibraryError::DataDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(db_path)?;
        tracing::info!(path = %db_path.display(), "favourites database opened");

        let library = Library {
            conn,
            db_path: db_path.to_path_buf(),
        };
        library.init_schema()?;
        Ok(library)
    }

    /// Throwaway database, used when the data directory is unavailable
    pub fn open_in_memory() -> LibraryResult<Self> {
        let library = Library {
            conn: Connection::open_in_memory()?,
            db_path: PathBuf::from(":memory:"),
        };
        library.init_schema()?;
        Ok(library)
    }

    /// Default database path, or None when no home/data directory exists
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::data_dir().or_else(dirs::home_dir)?;
        path.push("launch-deck");
        path.push("launch_deck.db");
        Some(path)
    }

    fn init_schema(&self) -> LibraryResult<()> {
        // Whole launch stored as JSON so the drawer renders without a refetch
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS favourites (
                flight_number   INTEGER PRIMARY KEY,
                position        INTEGER NOT NULL,
                record_json     TEXT NOT NULL,
                added_at        INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_favourites_position
             ON favourites(position)",
            [],
        )?;

        Ok(())
    }

    /// All favourites, in the order they were added
    pub fn load_favourites(&self) -> LibraryResult<Vec<LaunchRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT record_json FROM favourites ORDER BY position ASC")?;

        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut records = Vec::new();
        for json in rows {
            records.push(serde_json::from_str(&json?)?);
        }
        Ok(records)
    }

    /// Append a favourite after the existing ones.
    /// Saving a flight that is already stored moves it to the end.
    pub fn save_favourite(&self, record: &LaunchRecord) -> LibraryResult<()> {
        let json = serde_json::to_string(record)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO favourites (flight_number, position, record_json, added_at)
             VALUES (?1, (SELECT COALESCE(MAX(position), -1) + 1 FROM favourites), ?2, ?3)",
            params![record.flight_number, json, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    /// Returns true if a row was deleted
    pub fn remove_favourite(&self, flight_number: u32) -> LibraryResult<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM favourites WHERE flight_number = ?1",
            params![flight_number],
        )?;
        Ok(deleted > 0)
    }
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}
