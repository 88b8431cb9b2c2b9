//! Core library surface for the Contest Raffle TUI application.
//!
//! The raffle logic (roster, winner store, draw engine, export) is usable on
//! its own; the `ui` module is one front-end on top of it.
pub mod auth;
pub mod config;
pub mod draw;
pub mod models;
pub mod raffle;
pub mod report;
pub mod roster;
pub mod store;
pub mod telemetry;
pub mod ui;

/// Domain types passed between the layers.
pub use models::{Contestant, Department, Winner};

/// The pieces `main.rs` wires together at startup.
pub use auth::{Credentials, Session};
pub use config::AppConfig;
pub use raffle::{Raffle, RaffleError};
pub use roster::Roster;
pub use store::{InMemoryWinnerStore, SqliteWinnerStore, StoreError, WinnerStore};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
