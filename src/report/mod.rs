//! Turning stored winners into something an operator can take away: the CSV
//! export, the search used by the winners screen, and dashboard statistics.

pub mod stats;

use std::fs;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use chrono::{Local, TimeZone};
use csv::{Terminator, WriterBuilder};
use thiserror::Error;
use tracing::info;

use crate::models::{Department, Winner};

/// File name used for every export.
pub const EXPORT_FILE_NAME: &str = "contest-winners.csv";
/// Header row of the export, in column order.
pub const EXPORT_HEADERS: [&str; 4] = ["Name", "Department", "Supervisor", "Draw Date"];
/// Short date form used in the export (e.g. `3/5/2024`).
const EXPORT_DATE_FORMAT: &str = "%-m/%-d/%Y";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode winners as CSV")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV buffer")]
    Flush(#[source] std::io::Error),
    #[error("CSV output is not valid UTF-8")]
    Encoding(#[from] FromUtf8Error),
    #[error("failed to write export to {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render winners as comma-delimited text with dates in the local timezone.
pub fn to_delimited_text(winners: &[Winner]) -> Result<String, ExportError> {
    to_delimited_text_in(winners, &Local)
}

/// Render winners as comma-delimited text with dates shown in `tz`.
///
/// Fields containing a comma, quote, or line break are quoted; every other
/// field is written verbatim.
pub fn to_delimited_text_in<Tz>(winners: &[Winner], tz: &Tz) -> Result<String, ExportError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    for winner in winners {
        let date = winner
            .draw_date
            .with_timezone(tz)
            .format(EXPORT_DATE_FORMAT)
            .to_string();
        writer.write_record([
            winner.name.as_str(),
            winner.department.label(),
            winner.supervisor.as_str(),
            date.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Write the export into `dir` and return the path of the created file.
pub fn write_export(dir: &Path, winners: &[Winner]) -> Result<PathBuf, ExportError> {
    let text = to_delimited_text(winners)?;
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, text).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), rows = winners.len(), "exported winners");
    Ok(path)
}

/// Search criteria for the winners list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinnerFilter {
    /// Case-insensitive text matched against name, department, and supervisor.
    pub query: String,
    pub department: Option<Department>,
}

impl WinnerFilter {
    pub fn matches(&self, winner: &Winner) -> bool {
        if let Some(department) = self.department {
            if winner.department != department {
                return false;
            }
        }

        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        winner.name.to_lowercase().contains(&query)
            || winner.department.label().to_lowercase().contains(&query)
            || winner.supervisor.to_lowercase().contains(&query)
    }

    pub fn is_active(&self) -> bool {
        self.department.is_some() || !self.query.trim().is_empty()
    }
}

/// Winners matching `filter`, newest draw first.
pub fn filter_winners(winners: &[Winner], filter: &WinnerFilter) -> Vec<Winner> {
    let mut matched: Vec<Winner> = winners
        .iter()
        .filter(|winner| filter.matches(winner))
        .cloned()
        .collect();
    matched.sort_by(|a, b| b.draw_date.cmp(&a.draw_date));
    matched
}
