use std::time::Duration;

use rand::Rng;
use tracing::debug;

use super::direction::Direction;
use super::food::Food;
use super::grid::{Grid, Position};
use crate::render::{Rgb, Surface};

const BODY_COLOR: Rgb = Rgb::new(0x12, 0x99, 0xFF);
const HEAD_COLOR: Rgb = Rgb::new(0x23, 0xEF, 0x77);

/// Per-axis cell velocity, each component in {-1, 0, 1}.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { dx: 0, dy: 0 };

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

impl From<Direction> for Velocity {
    fn from(direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Velocity { dx, dy }
    }
}

/// What happened during one `Snake::update` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Move-timer ticks that elapsed (moves attempted, including zero-velocity no-ops)
    pub ticks: u32,
    /// Apples eaten across those ticks
    pub apples_eaten: u32,
}

/// The snake: an ordered body with the head at index 0, plus the slower
/// fixed-step accumulator that gates movement.
///
/// Movement runs on its own interval, independent of both the display frame
/// rate and the scheduler's tick rate; a simulation tick only moves the snake
/// once enough time has accumulated.
#[derive(Debug, Clone)]
pub struct Snake {
    body: Vec<Position>,
    velocity: Velocity,
    to_grow: bool,
    died: bool,
    move_timer: Duration,
    move_interval: Duration,
}

impl Snake {
    /// Create a snake at a random cell, with its second segment directly
    /// below the head and zero velocity.
    pub fn new<R: Rng>(grid: &Grid, move_interval: Duration, rng: &mut R) -> Self {
        let head = Position::new(rng.gen_range(0..grid.cols()), rng.gen_range(0..grid.rows()));
        let neck = grid.wrap(head.moved_by(0, 1));
        Self::from_body(vec![head, neck], move_interval)
    }

    fn from_body(body: Vec<Position>, move_interval: Duration) -> Self {
        debug_assert!(body.len() >= 2);
        Self {
            body,
            velocity: Velocity::ZERO,
            to_grow: false,
            died: false,
            move_timer: Duration::ZERO,
            move_interval,
        }
    }

    /// The head is always index 0 of the body.
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All body cells, head first.
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn died(&self) -> bool {
        self.died
    }

    /// Whether any body cell occupies `pos` (head included).
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Apply a steering input. A direction that would directly reverse the
    /// current velocity along its axis is silently ignored; anything is
    /// accepted while stationary. Takes effect at the next move-timer tick.
    pub fn steer(&mut self, direction: Direction) {
        let wanted = Velocity::from(direction);
        let reverses = (wanted.dx != 0 && self.velocity.dx == -wanted.dx)
            || (wanted.dy != 0 && self.velocity.dy == -wanted.dy);
        if !reverses {
            self.velocity = wanted;
        }
    }

    /// Advance the snake by `elapsed` simulation time.
    ///
    /// Drains the move-timer one interval at a time; each drained interval
    /// runs, in order: the food check, the self-collision check (current head
    /// against the current body, before moving), then the move itself.
    pub fn update<R: Rng>(
        &mut self,
        elapsed: Duration,
        food: &mut Food,
        grid: &Grid,
        rng: &mut R,
    ) -> UpdateReport {
        let mut report = UpdateReport::default();
        self.move_timer += elapsed;

        while self.move_timer >= self.move_interval {
            self.check_food(food, grid, rng, &mut report);
            self.check_self_collision();
            self.step(grid);

            report.ticks += 1;
            self.move_timer -= self.move_interval;
        }

        report
    }

    fn check_food<R: Rng>(
        &mut self,
        food: &mut Food,
        grid: &Grid,
        rng: &mut R,
        report: &mut UpdateReport,
    ) {
        if self.head() != food.position() {
            return;
        }

        self.to_grow = true;
        report.apples_eaten += 1;
        debug!(length = self.body.len() + 1, "apple eaten");

        // The head sits on the food right now, so this always relocates at
        // least once.
        while self.occupies(food.position()) {
            food.relocate(grid, rng);
        }
    }

    fn check_self_collision(&mut self) {
        let head = self.head();
        if self.body[1..].contains(&head) {
            self.died = true;
            debug!(length = self.body.len(), "self collision");
        }
    }

    fn step(&mut self, grid: &Grid) {
        if self.velocity.is_zero() {
            return;
        }

        if self.to_grow {
            self.to_grow = false;
        } else {
            self.body.pop();
        }

        let new_head = grid.wrap(self.head().moved_by(self.velocity.dx, self.velocity.dy));
        self.body.insert(0, new_head);
    }

    pub fn render(&self, surface: &mut dyn Surface, grid: &Grid) {
        let cell = grid.cell_size();

        surface.set_fill_color(BODY_COLOR);
        for &segment in &self.body {
            let (px, py) = grid.to_pixel(segment);
            surface.fill_rect(px, py, cell, cell);
        }

        surface.set_fill_color(HEAD_COLOR);
        let (px, py) = grid.to_pixel(self.head());
        surface.fill_rect(px, py, cell, cell);
    }

    #[cfg(test)]
    pub(crate) fn with_body(body: Vec<Position>, move_interval: Duration) -> Self {
        Self::from_body(body, move_interval)
    }

    #[cfg(test)]
    pub(crate) fn set_growing(&mut self) {
        self.to_grow = true;
    }
}
