//! Persistence for drawn winners. The store is append-only from the point of
//! view of callers: winners are added one at a time and removed only all at
//! once. Two implementations share the same JSON document format so tests can
//! use the in-memory fake without losing fidelity.

mod connection;
mod memory;
mod sqlite;

use std::path::PathBuf;

use chrono::Utc;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::models::{Contestant, Winner};

pub use memory::InMemoryWinnerStore;
pub use sqlite::SqliteWinnerStore;

/// Key under which the winner list is persisted.
pub const WINNERS_KEY: &str = "contest_winners";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create data directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open winner database")]
    Open(#[source] rusqlite::Error),
    #[error("failed to prepare winner database schema")]
    Schema(#[source] rusqlite::Error),
    #[error("failed to read stored winners")]
    Read(#[source] rusqlite::Error),
    #[error("failed to write stored winners")]
    Write(#[source] rusqlite::Error),
    #[error("failed to encode winners")]
    Encode(#[from] serde_json::Error),
}

/// Durable collection of winners in draw order.
///
/// The store does not enforce unique names; callers filter the eligible pool
/// before drawing. Implementations serialize access internally, so a shared
/// reference is enough for every operation.
pub trait WinnerStore: Send + Sync {
    /// All winners in insertion order. Unreadable or malformed data yields an
    /// empty list rather than an error.
    fn list(&self) -> Vec<Winner>;

    /// Record `contestant` as a winner with a fresh id and the current time.
    fn add(&self, contestant: &Contestant) -> Result<Winner, StoreError>;

    /// Record every contestant in one write. Either all of them are stored, in
    /// order, or none are.
    fn add_all(&self, contestants: &[Contestant]) -> Result<Vec<Winner>, StoreError>;

    /// Remove every stored winner.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Stamp a contestant with a new id and the current time.
pub(crate) fn new_winner(contestant: &Contestant) -> Winner {
    Winner {
        id: Uuid::new_v4().to_string(),
        name: contestant.name.clone(),
        department: contestant.department,
        supervisor: contestant.supervisor.clone(),
        draw_date: Utc::now(),
    }
}

/// Stamp each contestant and append the results to `winners`, returning the
/// new records.
pub(crate) fn append_winners(winners: &mut Vec<Winner>, contestants: &[Contestant]) -> Vec<Winner> {
    let added: Vec<Winner> = contestants.iter().map(new_winner).collect();
    winners.extend(added.iter().cloned());
    added
}

/// Decode the persisted document. A missing or malformed document is treated
/// as an empty store.
pub(crate) fn decode_winners(raw: Option<&str>) -> Vec<Winner> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str(raw) {
        Ok(winners) => winners,
        Err(err) => {
            warn!(error = %err, "stored winners are malformed; treating store as empty");
            Vec::new()
        }
    }
}

pub(crate) fn encode_winners(winners: &[Winner]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(winners)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Department;

    #[test]
    fn missing_document_decodes_to_empty() {
        assert!(decode_winners(None).is_empty());
    }

    #[test]
    fn malformed_document_decodes_to_empty() {
        assert!(decode_winners(Some("{not json")).is_empty());
        assert!(decode_winners(Some(r#"{"id":"1"}"#)).is_empty());
        assert!(decode_winners(Some(r#"[{"id":"1","name":"A"}]"#)).is_empty());
    }

    #[test]
    fn new_winner_copies_contestant_fields() {
        let contestant = Contestant::new("Ada", Department::IndiaMessaging, "Grace");
        let first = new_winner(&contestant);
        let second = new_winner(&contestant);

        assert_eq!(first.contestant(), contestant);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn encoded_document_decodes_back() {
        let winners = vec![new_winner(&Contestant::new("Ada", Department::Apac, "Grace"))];
        let raw = encode_winners(&winners).unwrap();
        assert!(raw.contains("\"drawDate\""));
        assert_eq!(decode_winners(Some(&raw)), winners);
    }
}
