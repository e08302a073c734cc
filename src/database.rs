// src/database.rs

use log::debug;
use rusqlite::{Connection, Result};
use std::path::Path;

/// Opens (or creates) the database file and makes sure the schema exists.
pub fn open(path: &Path) -> Result<Connection> {
    debug!("Opening database at {:?}", path);
    let conn = Connection::open(path)?;
    init_db(&conn)?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    debug!("init_db: Checking key-value schema...");

    // One row per storage key; the value is an opaque JSON blob.
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        );
        ",
    )?;

    Ok(())
}
