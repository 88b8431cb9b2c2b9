//! Ratatui front-end. The screens only render state and translate key presses
//! into calls on the raffle service; every rule about who may win lives in the
//! library modules.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
