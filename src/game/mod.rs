//! Core game logic: grid geometry, entities and the session orchestrator.
//!
//! Everything in here is I/O-free; rendering goes through the [`crate::render::Surface`]
//! trait and timing comes in as plain [`std::time::Duration`]s, so the whole
//! module is exercisable from tests without a terminal.

pub mod config;
pub mod direction;
pub mod food;
pub mod grid;
pub mod session;
pub mod snake;

pub use config::GameConfig;
pub use direction::Direction;
pub use food::Food;
pub use grid::{Grid, Position};
pub use session::Session;
pub use snake::{Snake, UpdateReport, Velocity};
