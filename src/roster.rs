//! Static contestant roster. The dataset ships inside the binary so the raffle
//! works without any setup; an override file can be pointed at through the
//! configuration when a different event needs a different list.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{Contestant, Department};

/// Roster compiled into the binary.
const BUILTIN_ROSTER: &str = include_str!("../data/contestants.json");

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("roster data is not a valid contestant list")]
    Parse(#[from] serde_json::Error),
}

/// Read-only view over the contestant list. Order is the order of the source
/// file and never changes for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    contestants: Vec<Contestant>,
}

impl Roster {
    pub fn new(contestants: Vec<Contestant>) -> Self {
        Self { contestants }
    }

    /// Parse the dataset embedded at compile time.
    pub fn builtin() -> Result<Self, RosterError> {
        Self::from_json(BUILTIN_ROSTER)
    }

    pub fn from_json(text: &str) -> Result<Self, RosterError> {
        let contestants: Vec<Contestant> = serde_json::from_str(text)?;
        Ok(Self::new(contestants))
    }

    pub fn from_path(path: &Path) -> Result<Self, RosterError> {
        let text = fs::read_to_string(path).map_err(|source| RosterError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Every contestant in roster order.
    pub fn all_contestants(&self) -> &[Contestant] {
        &self.contestants
    }

    /// Contestants of one department, preserving roster order.
    pub fn by_department(&self, department: Department) -> Vec<Contestant> {
        self.contestants
            .iter()
            .filter(|contestant| contestant.department == department)
            .cloned()
            .collect()
    }

    pub fn department_count(&self, department: Department) -> usize {
        self.contestants
            .iter()
            .filter(|contestant| contestant.department == department)
            .count()
    }

    pub fn len(&self) -> usize {
        self.contestants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contestants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_roster_parses_and_covers_every_department() {
        let roster = Roster::builtin().unwrap();
        assert!(!roster.is_empty());
        for department in Department::ALL {
            assert!(roster.department_count(department) > 0, "{department} is empty");
        }
        let sum: usize = Department::ALL
            .iter()
            .map(|department| roster.department_count(*department))
            .sum();
        assert_eq!(sum, roster.len());
    }

    #[test]
    fn by_department_preserves_roster_order() {
        let roster = Roster::new(vec![
            Contestant::new("A", Department::Apac, "S1"),
            Contestant::new("B", Department::IndiaMessaging, "S2"),
            Contestant::new("C", Department::Apac, "S1"),
        ]);

        let names: Vec<_> = roster
            .by_department(Department::Apac)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["A", "C"]);
        assert!(roster
            .by_department(Department::InternationalMessaging)
            .is_empty());
    }

    #[test]
    fn rejects_unknown_department() {
        let err = Roster::from_json(r#"[{"name":"A","department":"EMEA","supervisor":"S"}]"#)
            .unwrap_err();
        assert!(matches!(err, RosterError::Parse(_)));
    }

    #[test]
    fn missing_override_file_is_a_read_error() {
        let err = Roster::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, RosterError::Read { .. }));
    }
}
