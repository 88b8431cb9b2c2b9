//! The raffle service ties the roster, the winner store, and the draw engine
//! together. The UI only ever goes through this type for domain operations.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::draw::{draw, eligible_pool, winner_names};
use crate::models::{Contestant, Department, Winner};
use crate::report::stats::Overview;
use crate::report::{write_export, ExportError};
use crate::roster::Roster;
use crate::store::{StoreError, WinnerStore};

#[derive(Debug, Error)]
pub enum RaffleError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

pub struct Raffle<S> {
    roster: Roster,
    store: S,
}

impl<S: WinnerStore> Raffle<S> {
    pub fn new(roster: Roster, store: S) -> Self {
        Self { roster, store }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn winners(&self) -> Vec<Winner> {
        self.store.list()
    }

    /// Contestants who have not won yet, optionally limited to one department.
    pub fn eligible(&self, department: Option<Department>) -> Vec<Contestant> {
        eligible_pool(&self.pool(department), &winner_names(&self.store.list()))
    }

    /// Draw up to `count` new winners and record them in a single write.
    ///
    /// Returns the stored records in draw order; an empty vector means there
    /// was nobody left to draw. On error no winner from this draw is stored.
    pub fn draw(
        &self,
        count: usize,
        department: Option<Department>,
    ) -> Result<Vec<Winner>, RaffleError> {
        let already_won = winner_names(&self.store.list());
        let picked = draw(&self.pool(department), count, &already_won);

        let recorded = self.store.add_all(&picked)?;

        info!(
            requested = count,
            drawn = recorded.len(),
            department = department.map(Department::label).unwrap_or("all"),
            "completed draw"
        );
        Ok(recorded)
    }

    /// Forget every recorded winner.
    pub fn clear(&self) -> Result<(), RaffleError> {
        self.store.clear()?;
        info!("cleared all winners");
        Ok(())
    }

    /// Export `winners` (usually a filtered view) into `dir`.
    pub fn export(&self, dir: &Path, winners: &[Winner]) -> Result<PathBuf, RaffleError> {
        Ok(write_export(dir, winners)?)
    }

    pub fn overview(&self) -> Overview {
        Overview::compute(&self.roster, &self.store.list())
    }

    fn pool(&self, department: Option<Department>) -> Vec<Contestant> {
        match department {
            Some(department) => self.roster.by_department(department),
            None => self.roster.all_contestants().to_vec(),
        }
    }
}
