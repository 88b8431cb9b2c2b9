//! Domain models shared by the roster, the winner store, and the TUI. These
//! types stay light-weight data holders so other layers can focus on
//! persistence and presentation. Field names on the wire follow the persisted
//! record layout (`drawDate` in camelCase) so older stores stay readable.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organisational unit a contestant belongs to. Serialized with the full label
/// because that is what the roster file and the persisted winners contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "International Messaging")]
    InternationalMessaging,
    #[serde(rename = "India Messaging")]
    IndiaMessaging,
    #[serde(rename = "APAC")]
    Apac,
}

impl Department {
    /// Every department in the order dashboards list them.
    pub const ALL: [Department; 3] = [
        Department::InternationalMessaging,
        Department::IndiaMessaging,
        Department::Apac,
    ];

    /// Full label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Department::InternationalMessaging => "International Messaging",
            Department::IndiaMessaging => "India Messaging",
            Department::Apac => "APAC",
        }
    }

    /// Compact label for narrow cards: the full label without " Messaging".
    pub fn short_label(self) -> &'static str {
        match self {
            Department::InternationalMessaging => "International",
            Department::IndiaMessaging => "India",
            Department::Apac => "APAC",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A person eligible for the raffle. The name doubles as identity: the
/// exclusion logic treats two entries with the same name as one contestant.
pub struct Contestant {
    pub name: String,
    pub department: Department,
    pub supervisor: String,
}

impl Contestant {
    pub fn new(name: impl Into<String>, department: Department, supervisor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            department,
            supervisor: supervisor.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A contestant picked by a draw. Records are created by the winner store and
/// never mutated afterwards.
pub struct Winner {
    /// Generated when the winner is stored; unique across the store.
    pub id: String,
    pub name: String,
    pub department: Department,
    pub supervisor: String,
    /// Moment the winner was recorded, persisted as RFC 3339.
    pub draw_date: DateTime<Utc>,
}

impl Winner {
    /// Recover the contestant fields of this record.
    pub fn contestant(&self) -> Contestant {
        Contestant {
            name: self.name.clone(),
            department: self.department,
            supervisor: self.supervisor.clone(),
        }
    }
}
