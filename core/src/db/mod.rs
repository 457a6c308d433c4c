//! SQLite connection bootstrap.
//!
//! # Invariants
//! - Connections handed out by this module have every migration applied.
//! - Nothing reads or writes `todos` before that happens.

pub mod migrations;

use std::path::Path;
use std::time::{Duration, Instant};

use rusqlite::Connection;

use crate::error::DbResult;
use migrations::apply_migrations;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) a database file and brings its schema up to date.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();

    let mut conn = Connection::open(path).inspect_err(|err| {
        tracing::error!(path = %path.display(), error = %err, "failed to open database");
    })?;
    bootstrap(&mut conn)?;

    tracing::info!(
        path = %path.display(),
        duration_ms = started_at.elapsed().as_millis() as u64,
        "database ready"
    );
    Ok(conn)
}

/// Opens a private in-memory database. Its contents vanish with the
/// connection.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let mut conn = Connection::open_in_memory()?;
    bootstrap(&mut conn)?;
    tracing::debug!("in-memory database ready");
    Ok(conn)
}

fn bootstrap(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}
