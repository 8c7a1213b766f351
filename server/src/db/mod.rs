//! SQLite connection bootstrap.
//!
//! Returned connections have `foreign_keys=ON`, a busy timeout, and every
//! migration applied. File databases additionally run in WAL mode.

use std::path::Path;
use std::time::{Duration, Instant};

use rusqlite::Connection;
use tracing::{error, info};

use crate::error::StoreResult;

pub mod migrations;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if needed) a database file and migrates it.
pub fn open_db(path: impl AsRef<Path>) -> StoreResult<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    finish_open(conn, "file")
}

/// Opens a private in-memory database and migrates it.
pub fn open_db_in_memory() -> StoreResult<Connection> {
    finish_open(Connection::open_in_memory()?, "memory")
}

fn finish_open(mut conn: Connection, mode: &'static str) -> StoreResult<Connection> {
    let started_at = Instant::now();
    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                mode,
                duration_ms = started_at.elapsed().as_millis() as u64,
                "database opened"
            );
            Ok(conn)
        }
        Err(err) => {
            error!(mode, error = %err, "database bootstrap failed");
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> StoreResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    migrations::apply_migrations(conn)
}
