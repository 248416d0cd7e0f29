use rand::Rng;

use super::grid::{Grid, Position};
use crate::render::{Rgb, Surface};

const FOOD_COLOR: Rgb = Rgb::new(0xEF, 0x67, 0x23);

/// The food item the snake grows by eating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    /// Spawn at a uniformly random cell. The initial spawn does no collision
    /// avoidance; avoidance on relocation is the caller's responsibility.
    pub fn spawn<R: Rng>(grid: &Grid, rng: &mut R) -> Self {
        Self {
            position: random_cell(grid, rng),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Pick a new uniformly random cell. Callers that need the cell clear of
    /// the snake body call this in a loop.
    pub fn relocate<R: Rng>(&mut self, grid: &Grid, rng: &mut R) {
        self.position = random_cell(grid, rng);
    }

    pub fn render(&self, surface: &mut dyn Surface, grid: &Grid) {
        let (px, py) = grid.to_pixel(self.position);
        surface.set_fill_color(FOOD_COLOR);
        surface.fill_rect(px, py, grid.cell_size(), grid.cell_size());
    }

    #[cfg(test)]
    pub(crate) fn at(position: Position) -> Self {
        Self { position }
    }
}

fn random_cell<R: Rng>(grid: &Grid, rng: &mut R) -> Position {
    Position::new(rng.gen_range(0..grid.cols()), rng.gen_range(0..grid.rows()))
}
