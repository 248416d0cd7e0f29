use std::time::Duration;

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::info;

use super::config::GameConfig;
use super::direction::Direction;
use super::food::Food;
use super::grid::Grid;
use super::snake::Snake;
use crate::render::{PixelBuffer, Rgb, Surface};
use crate::timer::Simulate;

const BACKGROUND: Rgb = Rgb::new(0x2C, 0x2F, 0x33);

/// One game session: the composition root owning grid, snake, food, RNG and
/// the pixel surface the render step paints into.
///
/// The scheduler drives it through [`Simulate`]; input steers it between
/// ticks. Once the snake dies the session stops mutating game state.
pub struct Session<R: Rng = ThreadRng> {
    grid: Grid,
    snake: Snake,
    food: Food,
    rng: R,
    surface: PixelBuffer,
    apples: u32,
    game_over: bool,
}

impl Session<ThreadRng> {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(config: &GameConfig, mut rng: R) -> Self {
        let grid = Grid::new(config.surface_width, config.surface_height, config.cell_size);
        let snake = Snake::new(&grid, config.move_interval(), &mut rng);
        let food = Food::spawn(&grid, &mut rng);
        info!(
            cols = grid.cols(),
            rows = grid.rows(),
            "session started"
        );

        Self {
            grid,
            snake,
            food,
            rng,
            surface: PixelBuffer::new(config.surface_width, config.surface_height),
            apples: 0,
            game_over: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    /// The painted surface, for presentation.
    pub fn surface(&self) -> &PixelBuffer {
        &self.surface
    }

    pub fn apples(&self) -> u32 {
        self.apples
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Forward a steering input to the snake. Ignored after death.
    pub fn steer(&mut self, direction: Direction) {
        if !self.game_over {
            self.snake.steer(direction);
        }
    }
}

impl<R: Rng> Simulate for Session<R> {
    fn update(&mut self, dt: Duration) {
        if self.game_over {
            return;
        }

        let report = self
            .snake
            .update(dt, &mut self.food, &self.grid, &mut self.rng);
        self.apples += report.apples_eaten;

        if self.snake.died() {
            self.game_over = true;
            info!(apples = self.apples, length = self.snake.len(), "game over");
        }
    }

    fn render(&mut self) {
        self.surface.set_fill_color(BACKGROUND);
        self.surface.fill_background();

        self.snake.render(&mut self.surface, &self.grid);
        self.food.render(&mut self.surface, &self.grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Position;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TICK: Duration = Duration::from_millis(200);

    fn session() -> Session<StdRng> {
        Session::with_rng(&GameConfig::small(), StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_new_session_is_alive() {
        let session = session();
        assert!(!session.is_game_over());
        assert_eq!(session.apples(), 0);
        assert_eq!(session.snake().len(), 2);
    }

    #[test]
    fn test_eating_food_counts_apples() {
        let mut session = session();
        session.food = Food::at(session.snake().head());

        session.update(TICK);

        assert_eq!(session.apples(), 1);
        assert!(!session.snake().occupies(session.food().position()));
    }

    #[test]
    fn test_death_latches_game_over() {
        let mut session = session();
        session.snake = Snake::with_body(
            vec![
                Position::new(3, 4),
                Position::new(4, 4),
                Position::new(3, 4),
            ],
            TICK,
        );

        session.update(TICK);
        assert!(session.is_game_over());

        // Dead sessions stop mutating state entirely.
        let body: Vec<_> = session.snake().segments().to_vec();
        session.steer(Direction::Right);
        session.update(TICK);
        assert_eq!(session.snake().segments(), body.as_slice());
    }

    #[test]
    fn test_fixed_step_drives_movement_deterministically() {
        use crate::timer::FixedStep;

        let mut session = session();
        session.snake = Snake::with_body(
            vec![Position::new(3, 4), Position::new(3, 5)],
            TICK,
        );
        session.steer(Direction::Right);

        let mut timer = FixedStep::new(60, 5);
        timer.start();

        // 30 fps frame signals covering ~1.19s: the 60 Hz ticks feed the
        // snake's 200ms move timer exactly five times, frame jitter aside.
        for i in 0..=36u64 {
            timer.frame(Duration::from_millis(i * 33), &mut session);
        }

        assert_eq!(session.snake().head(), Position::new(8, 4));
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_render_paints_entities_over_background() {
        let mut session = session();
        session.snake = Snake::with_body(
            vec![Position::new(2, 2), Position::new(2, 3)],
            TICK,
        );
        session.food = Food::at(Position::new(5, 5));

        session.render();

        let grid = *session.grid();
        let surface = session.surface();
        let sample = |pos: Position| {
            let (px, py) = grid.to_pixel(pos);
            surface.pixel(px + grid.cell_size() / 2, py + grid.cell_size() / 2)
        };

        assert_eq!(sample(Position::new(8, 8)), BACKGROUND);
        assert_ne!(sample(Position::new(2, 2)), BACKGROUND);
        assert_ne!(sample(Position::new(5, 5)), BACKGROUND);
        // The head is repainted over the body color.
        assert_ne!(sample(Position::new(2, 2)), sample(Position::new(2, 3)));
    }
}
