use std::time::{Duration, Instant};

/// Session statistics shown in the header. Nothing here is persisted.
pub struct GameMetrics {
    start_time: Instant,
    elapsed_time: Duration,
    pub most_apples: u32,
    pub longest_snake: usize,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            most_apples: 0,
            longest_snake: 0,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, apples: u32, snake_length: usize) {
        self.games_played += 1;
        self.most_apples = self.most_apples.max(apples);
        self.longest_snake = self.longest_snake.max(snake_length);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }

    #[cfg(test)]
    fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed_time = elapsed;
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
