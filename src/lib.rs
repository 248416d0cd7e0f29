//! snek - terminal snake on a toroidal grid
//!
//! The interesting part is the timing: a fixed-timestep scheduler (timer
//! module) converts irregular display frames into deterministic simulation
//! ticks, and the snake carries a second, slower accumulator that gates its
//! movement. Everything else is small-grid state mutation:
//! - Core game logic and the session orchestrator (game module)
//! - Pixel surface + terminal presentation (render module)
//! - Key mapping (input module)
//! - Session stats (metrics module)
//! - The tokio/crossterm runtime (app module)

pub mod app;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
pub mod timer;
