use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

use crate::models::{Contestant, Winner};

use super::connection::{open_database, open_in_memory};
use super::{
    append_winners, decode_winners, encode_winners, new_winner, StoreError, WinnerStore,
    WINNERS_KEY,
};

/// Winner store backed by a single row of an embedded SQLite key-value table.
pub struct SqliteWinnerStore {
    conn: Mutex<Connection>,
}

impl SqliteWinnerStore {
    /// Open the database file at `path`, creating it and its directory if needed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = open_database(path)?;
        debug!(path = %path.display(), "opened winner store");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Non-durable store with the same behaviour, mostly for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: Mutex::new(open_in_memory()?),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_document(conn: &Connection) -> Result<Option<String>, StoreError> {
    conn.query_row(
        "SELECT value FROM kv_store WHERE key = ?1",
        params![WINNERS_KEY],
        |row| row.get(0),
    )
    .optional()
    .map_err(StoreError::Read)
}

fn write_document(conn: &Connection, document: &str) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![WINNERS_KEY, document],
    )
    .map_err(StoreError::Write)?;
    Ok(())
}

impl WinnerStore for SqliteWinnerStore {
    fn list(&self) -> Vec<Winner> {
        let conn = self.lock();
        match read_document(&conn) {
            Ok(raw) => decode_winners(raw.as_deref()),
            Err(err) => {
                warn!(error = %err, "could not read winners; treating store as empty");
                Vec::new()
            }
        }
    }

    fn add(&self, contestant: &Contestant) -> Result<Winner, StoreError> {
        let conn = self.lock();
        let mut winners = decode_winners(read_document(&conn)?.as_deref());
        let winner = new_winner(contestant);
        winners.push(winner.clone());
        write_document(&conn, &encode_winners(&winners)?)?;
        Ok(winner)
    }

    fn add_all(&self, contestants: &[Contestant]) -> Result<Vec<Winner>, StoreError> {
        if contestants.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.lock();
        let mut winners = decode_winners(read_document(&conn)?.as_deref());
        let added = append_winners(&mut winners, contestants);
        write_document(&conn, &encode_winners(&winners)?)?;
        Ok(added)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.lock()
            .execute("DELETE FROM kv_store WHERE key = ?1", params![WINNERS_KEY])
            .map_err(StoreError::Write)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Department;

    #[test]
    fn in_memory_database_starts_empty() {
        let store = SqliteWinnerStore::open_in_memory().unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn add_appends_in_draw_order() {
        let store = SqliteWinnerStore::open_in_memory().unwrap();
        store.add(&Contestant::new("A", Department::Apac, "S")).unwrap();
        store.add(&Contestant::new("B", Department::IndiaMessaging, "S")).unwrap();

        let names: Vec<_> = store.list().into_iter().map(|w| w.name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn malformed_row_reads_as_empty_and_is_replaced_on_add() {
        let store = SqliteWinnerStore::open_in_memory().unwrap();
        write_document(&store.lock(), "[{broken").unwrap();
        assert!(store.list().is_empty());

        store.add(&Contestant::new("A", Department::Apac, "S")).unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn add_all_appends_batch_after_existing_winners() {
        let store = SqliteWinnerStore::open_in_memory().unwrap();
        store.add(&Contestant::new("A", Department::Apac, "S")).unwrap();
        let added = store
            .add_all(&[
                Contestant::new("B", Department::IndiaMessaging, "S"),
                Contestant::new("C", Department::InternationalMessaging, "S"),
            ])
            .unwrap();

        assert_eq!(added.len(), 2);
        let names: Vec<_> = store.list().into_iter().map(|w| w.name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(store.add_all(&[]).unwrap().is_empty());
    }

    #[test]
    fn clear_on_empty_store_is_fine() {
        let store = SqliteWinnerStore::open_in_memory().unwrap();
        store.clear().unwrap();
        assert!(store.list().is_empty());
    }
}
