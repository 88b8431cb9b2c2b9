//! Runtime configuration read from the environment. Everything has a default,
//! so a bare `contest-raffle` invocation works out of the box.

use std::env;
use std::path::PathBuf;

use directories::BaseDirs;
use thiserror::Error;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".contest-raffle";
/// SQLite file name stored inside the data directory.
const DB_FILE_NAME: &str = "raffle.sqlite";
/// Log file name stored inside the data directory.
const LOG_FILE_NAME: &str = "raffle.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not locate home directory; set RAFFLE_HOME")]
    NoHomeDirectory,
    #[error("{name} must not be empty")]
    Empty { name: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the database and the log file.
    pub data_dir: PathBuf,
    /// Directory exports are written to.
    pub export_dir: PathBuf,
    /// Roster file overriding the compiled-in dataset.
    pub roster_file: Option<PathBuf>,
    /// Credentials file overriding the compiled-in pair.
    pub auth_file: Option<PathBuf>,
    pub telemetry: TelemetryConfig,
}

/// Logging controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_level: String,
    pub log_file: PathBuf,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match non_empty(&lookup, "RAFFLE_HOME")? {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let export_dir = non_empty(&lookup, "RAFFLE_EXPORT_DIR")?
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.clone());
        let roster_file = non_empty(&lookup, "RAFFLE_ROSTER_FILE")?.map(PathBuf::from);
        let auth_file = non_empty(&lookup, "RAFFLE_AUTH_FILE")?.map(PathBuf::from);
        let log_level = non_empty(&lookup, "RAFFLE_LOG")?.unwrap_or_else(|| "info".to_string());

        Ok(Self {
            telemetry: TelemetryConfig {
                log_level,
                log_file: data_dir.join(LOG_FILE_NAME),
            },
            export_dir,
            roster_file,
            auth_file,
            data_dir,
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

/// A variable that is set but blank is a mistake worth reporting rather than
/// silently falling back to the default.
fn non_empty<F>(lookup: &F, name: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { name }),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDirectory)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn explicit_home_drives_every_path() {
        let config = AppConfig::from_lookup(lookup(&[("RAFFLE_HOME", "/tmp/raffle")])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/raffle"));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/raffle"));
        assert_eq!(config.database_path(), PathBuf::from("/tmp/raffle/raffle.sqlite"));
        assert_eq!(config.telemetry.log_file, PathBuf::from("/tmp/raffle/raffle.log"));
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.roster_file.is_none());
        assert!(config.auth_file.is_none());
    }

    #[test]
    fn overrides_are_picked_up() {
        let config = AppConfig::from_lookup(lookup(&[
            ("RAFFLE_HOME", "/data"),
            ("RAFFLE_EXPORT_DIR", "/exports"),
            ("RAFFLE_ROSTER_FILE", "/etc/roster.json"),
            ("RAFFLE_AUTH_FILE", "/etc/auth.json"),
            ("RAFFLE_LOG", "contest_raffle=debug"),
        ]))
        .unwrap();

        assert_eq!(config.export_dir, PathBuf::from("/exports"));
        assert_eq!(config.roster_file, Some(PathBuf::from("/etc/roster.json")));
        assert_eq!(config.auth_file, Some(PathBuf::from("/etc/auth.json")));
        assert_eq!(config.telemetry.log_level, "contest_raffle=debug");
    }

    #[test]
    fn blank_variable_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("RAFFLE_HOME", "/data"), ("RAFFLE_LOG", "  ")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Empty { name: "RAFFLE_LOG" }));
    }
}
