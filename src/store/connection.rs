use std::fs;
use std::path::Path;

use rusqlite::Connection;

use super::StoreError;

/// Open (or create) the SQLite file at `path` and run lazy migrations. Parent
/// directories are created on demand so a fresh data directory just works.
pub(crate) fn open_database(path: &Path) -> Result<Connection, StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let conn = Connection::open(path).map_err(StoreError::Open)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// In-memory database with the same schema, used by tests and previews.
pub(crate) fn open_in_memory() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory().map_err(StoreError::Open)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// The store is a plain key-value table; each key holds one JSON document.
fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .map_err(StoreError::Schema)?;
    Ok(())
}
