use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a game session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the rendering surface in pixels
    pub surface_width: u32,
    /// Height of the rendering surface in pixels
    pub surface_height: u32,
    /// Pixels per grid cell
    pub cell_size: u32,
    /// Simulation ticks per second driven by the scheduler
    pub tick_rate: u32,
    /// Display frames per second (frame-signal delivery rate)
    pub refresh_rate: u32,
    /// Milliseconds the snake accumulates before each move
    pub move_interval_ms: u64,
    /// Maximum catch-up simulation ticks per frame before excess time is dropped
    pub max_catch_up: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: 800,
            surface_height: 600,
            cell_size: 20,
            tick_rate: 60,
            refresh_rate: 30,
            move_interval_ms: 200,
            max_catch_up: 5,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom surface size.
    pub fn new(surface_width: u32, surface_height: u32) -> Self {
        Self {
            surface_width,
            surface_height,
            ..Default::default()
        }
    }

    /// Small surface for tests.
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    /// How long the snake accumulates before each move.
    pub fn move_interval(&self) -> Duration {
        Duration::from_millis(self.move_interval_ms)
    }

    /// Check the grid preconditions before a session is built from this
    /// configuration.
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            bail!("cell size must be a positive number of pixels");
        }
        if self.surface_width < self.cell_size || self.surface_height < self.cell_size {
            bail!(
                "surface {}x{} is smaller than one {}px cell",
                self.surface_width,
                self.surface_height,
                self.cell_size
            );
        }
        if self.tick_rate == 0 || self.refresh_rate == 0 {
            bail!("tick rate and refresh rate must be non-zero");
        }
        if self.move_interval_ms == 0 {
            bail!("move interval must be non-zero");
        }
        Ok(())
    }
}
