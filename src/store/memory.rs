use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::{Contestant, Winner};

use super::{append_winners, decode_winners, encode_winners, new_winner, StoreError, WinnerStore};

/// Winner store that keeps the persisted document in memory. It encodes and
/// decodes exactly like the durable store, so malformed data can be simulated
/// with [`InMemoryWinnerStore::with_document`].
#[derive(Default)]
pub struct InMemoryWinnerStore {
    document: Mutex<Option<String>>,
}

impl InMemoryWinnerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw document, as if it had been persisted earlier.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(document.into())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WinnerStore for InMemoryWinnerStore {
    fn list(&self) -> Vec<Winner> {
        decode_winners(self.lock().as_deref())
    }

    fn add(&self, contestant: &Contestant) -> Result<Winner, StoreError> {
        let mut document = self.lock();
        let mut winners = decode_winners(document.as_deref());
        let winner = new_winner(contestant);
        winners.push(winner.clone());
        *document = Some(encode_winners(&winners)?);
        Ok(winner)
    }

    fn add_all(&self, contestants: &[Contestant]) -> Result<Vec<Winner>, StoreError> {
        if contestants.is_empty() {
            return Ok(Vec::new());
        }
        let mut document = self.lock();
        let mut winners = decode_winners(document.as_deref());
        let added = append_winners(&mut winners, contestants);
        *document = Some(encode_winners(&winners)?);
        Ok(added)
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.lock() = None;
        Ok(())
    }
}
