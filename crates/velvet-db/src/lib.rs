pub mod models;
pub mod queries;

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Candidate locations of the bot database, relative to the working directory.
pub const DEFAULT_DB_CANDIDATES: &[&str] = &["bot.db", "bot/dating_bot.db"];

/// Read-only handle on the database the bot maintains.
///
/// One handle per request: opened, queried, dropped. The gateway never
/// writes and never holds a connection between requests.
pub struct ProfileDb {
    conn: Connection,
}

impl ProfileDb {
    /// First candidate path that exists on disk, in list order.
    pub fn locate(candidates: &[PathBuf]) -> Option<&Path> {
        candidates
            .iter()
            .map(PathBuf::as_path)
            .find(|path| path.exists())
    }

    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("opening bot database at {}", path.display()))?;

        // SQLite reads lazily; touch the users table so a garbage or empty
        // file fails here instead of in the first query.
        conn.prepare("SELECT 1 FROM users LIMIT 0")
            .with_context(|| format!("{} is not a bot database", path.display()))?;

        debug!("Bot DB opened read-only at {}", path.display());
        Ok(Self { conn })
    }

    /// Open the first existing candidate. `Ok(None)` when none exists,
    /// which callers treat as "no data" rather than a failure.
    pub fn open_first(candidates: &[PathBuf]) -> Result<Option<Self>> {
        match Self::locate(candidates) {
            Some(path) => Self::open(path).map(Some),
            None => Ok(None),
        }
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        f(&self.conn)
    }
}
