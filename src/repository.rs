// src/repository.rs

use chrono::Utc;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Result};

/// Reads the raw blob stored under `key`, if any.
pub fn get_blob(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row("SELECT value FROM kv_store WHERE key = ?", [key], |row| {
        row.get(0)
    })
    .optional()
}

/// Replaces whatever is stored under `key`.
pub fn put_blob(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)",
        params![key, value, Utc::now().timestamp()],
    )?;
    debug!("[DB] Wrote {} bytes under {:?}", value.len(), key);
    Ok(())
}

pub fn delete_blob(conn: &Connection, key: &str) -> Result<()> {
    let removed = conn.execute("DELETE FROM kv_store WHERE key = ?", [key])?;
    debug!("[DB] Removed {} row(s) under {:?}", removed, key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::init_db;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        conn
    }

    #[test]
    fn missing_key_is_none() {
        assert_eq!(get_blob(&conn(), "nope").unwrap(), None);
    }

    #[test]
    fn put_overwrites_and_delete_clears() {
        let conn = conn();
        put_blob(&conn, "k", "one").unwrap();
        put_blob(&conn, "k", "two").unwrap();
        assert_eq!(get_blob(&conn, "k").unwrap().as_deref(), Some("two"));

        delete_blob(&conn, "k").unwrap();
        assert_eq!(get_blob(&conn, "k").unwrap(), None);
        // Deleting again is harmless.
        delete_blob(&conn, "k").unwrap();
    }
}
