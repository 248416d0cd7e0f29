use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::info;

use crate::game::{GameConfig, Session};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::timer::FixedStep;

/// Terminal runtime: owns the session, the fixed-step scheduler and the
/// presentation, and feeds the scheduler frame signals from a tokio interval.
pub struct App {
    config: GameConfig,
    session: Session,
    timer: FixedStep,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    epoch: Instant,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        let session = Session::new(&config);
        let timer = FixedStep::new(config.tick_rate, config.max_catch_up);

        Self {
            config,
            session,
            timer,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            epoch: Instant::now(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Frame signals at the display refresh rate; the scheduler decides
        // how many simulation ticks each one is worth.
        let frame_interval = Duration::from_secs_f64(1.0 / f64::from(self.config.refresh_rate));
        let mut frames = interval(frame_interval);

        self.epoch = Instant::now();
        self.timer.start();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Frame signal
                _ = frames.tick() => {
                    self.handle_frame();
                    self.metrics.update();

                    let renderer = &self.renderer;
                    let session = &self.session;
                    let metrics = &self.metrics;
                    terminal.draw(|frame| {
                        renderer.render(frame, session, metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_frame(&mut self) {
        let t = self.epoch.elapsed();
        self.timer.frame(t, &mut self.session);

        if self.session.is_game_over() && self.timer.is_running() {
            self.timer.stop();
            self.metrics
                .on_game_over(self.session.apples(), self.session.snake().len());
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => {
                    self.session.steer(direction);
                }
                KeyAction::Restart => {
                    self.restart();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn restart(&mut self) {
        info!("restarting session");
        self.session = Session::new(&self.config);
        self.metrics.on_game_start();
        // The stop on death cleared the last frame timestamp, so the next
        // frame signal primes rather than draining the downtime.
        self.timer.start();
    }

    fn cleanup_terminal(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_initialization() {
        let app = App::new(GameConfig::default());
        assert!(!app.session.is_game_over());
        assert!(!app.timer.is_running());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_restart_builds_a_live_session() {
        let mut app = App::new(GameConfig::small());
        app.restart();
        assert!(!app.session.is_game_over());
        assert!(app.timer.is_running());
        assert_eq!(app.session.apples(), 0);
    }
}
