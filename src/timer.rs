//! Fixed-timestep scheduling.
//!
//! Frame signals arrive at whatever rate the display (or the driving runtime)
//! delivers them; the scheduler converts that irregular stream into a
//! deterministic sequence of fixed-size simulation ticks, followed by exactly
//! one render per handled frame. Simulation speed therefore never depends on
//! the refresh rate or on frame-delivery jitter.

use std::time::Duration;

use tracing::warn;

/// What the scheduler drives: a fixed-step update and a per-frame render.
pub trait Simulate {
    /// Advance the simulation by exactly `dt`.
    fn update(&mut self, dt: Duration);

    /// Paint the current state. Called once per handled frame, after all due
    /// ticks have run.
    fn render(&mut self);
}

/// Accumulator-based fixed-step scheduler.
///
/// Holds only its own timing bookkeeping; game state lives with the caller.
#[derive(Debug, Clone)]
pub struct FixedStep {
    tick_interval: Duration,
    max_catch_up: u32,
    running: bool,
    last_frame: Option<Duration>,
    accumulated: Duration,
}

impl FixedStep {
    /// `tick_rate` is simulation ticks per second; `max_catch_up` bounds how
    /// many ticks a single frame may run before the remaining accumulated
    /// time is dropped.
    pub fn new(tick_rate: u32, max_catch_up: u32) -> Self {
        Self {
            tick_interval: Duration::from_secs_f64(1.0 / f64::from(tick_rate)),
            max_catch_up,
            running: false,
            last_frame: None,
            accumulated: Duration::ZERO,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin handling frame signals. Neither the accumulator nor the last
    /// frame timestamp is reset; a fresh start after `stop` re-primes via the
    /// cleared timestamp.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Halt ticking. Clears the last frame timestamp so a later `start` does
    /// not read a huge elapsed time from a stale value.
    pub fn stop(&mut self) {
        self.running = false;
        self.last_frame = None;
    }

    /// Handle one frame signal carrying the monotonic timestamp `t`.
    ///
    /// Returns whether the caller should arm the next frame signal. The first
    /// frame after a (re)start only records `t` and schedules the next one;
    /// every later frame drains the accumulator into zero or more
    /// `update(tick_interval)` calls and then renders exactly once.
    pub fn frame<S: Simulate>(&mut self, t: Duration, sim: &mut S) -> bool {
        if !self.running {
            return false;
        }

        if let Some(last) = self.last_frame {
            self.accumulated += t.saturating_sub(last);

            let mut ticks = 0;
            while self.accumulated >= self.tick_interval {
                if ticks >= self.max_catch_up {
                    warn!(
                        dropped_ms = self.accumulated.as_millis() as u64,
                        "catch-up cap reached, dropping accumulated time"
                    );
                    self.accumulated = Duration::ZERO;
                    break;
                }
                sim.update(self.tick_interval);
                self.accumulated -= self.tick_interval;
                ticks += 1;
            }

            sim.render();
        }

        self.last_frame = Some(t);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        updates: Vec<Duration>,
        renders: u32,
    }

    impl Simulate for Recorder {
        fn update(&mut self, dt: Duration) {
            self.updates.push(dt);
        }

        fn render(&mut self) {
            self.renders += 1;
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_priming_frame_does_not_tick_or_render() {
        let mut timer = FixedStep::new(60, 5);
        let mut sim = Recorder::default();
        timer.start();

        assert!(timer.frame(ms(0), &mut sim));
        assert!(sim.updates.is_empty());
        assert_eq!(sim.renders, 0);
    }

    #[test]
    fn test_sixty_fps_catch_up_example() {
        // Timestamps 0, 50, 100 at a 60 Hz tick rate: prime, then two ticks
        // of one interval each with roughly one interval left over.
        let mut timer = FixedStep::new(60, 5);
        let interval = timer.tick_interval();
        let mut sim = Recorder::default();
        timer.start();

        timer.frame(ms(0), &mut sim);
        timer.frame(ms(50), &mut sim);

        assert_eq!(sim.updates, vec![interval, interval]);
        assert_eq!(sim.renders, 1);
        assert!(timer.accumulated < interval);
        assert!(timer.accumulated > ms(16));

        timer.frame(ms(100), &mut sim);
        assert_eq!(sim.updates.len(), 5);
        assert_eq!(sim.renders, 2);
        assert!(timer.accumulated < interval);
    }

    #[test]
    fn test_renders_even_without_due_ticks() {
        let mut timer = FixedStep::new(60, 5);
        let mut sim = Recorder::default();
        timer.start();

        timer.frame(ms(0), &mut sim);
        timer.frame(ms(5), &mut sim);

        assert!(sim.updates.is_empty());
        assert_eq!(sim.renders, 1);
    }

    #[test]
    fn test_frame_dropped_while_stopped() {
        let mut timer = FixedStep::new(60, 5);
        let mut sim = Recorder::default();

        assert!(!timer.frame(ms(0), &mut sim));
        assert!(sim.updates.is_empty());
        assert_eq!(sim.renders, 0);
        assert!(timer.last_frame.is_none());
    }

    #[test]
    fn test_stop_clears_timestamp_so_restart_reprimes() {
        let mut timer = FixedStep::new(60, 5);
        let mut sim = Recorder::default();
        timer.start();

        timer.frame(ms(0), &mut sim);
        timer.frame(ms(20), &mut sim);
        timer.stop();
        timer.start();

        // A long wall-clock gap across the stop must not turn into a burst.
        timer.frame(ms(10_000), &mut sim);
        let updates_after_restart = sim.updates.len();
        timer.frame(ms(10_020), &mut sim);

        // Only the ~20ms of the new frame (plus any preserved remainder)
        // became ticks, not the ten seconds of downtime.
        assert!(sim.updates.len() - updates_after_restart <= 2);
    }

    #[test]
    fn test_catch_up_cap_drops_excess_time() {
        let mut timer = FixedStep::new(60, 3);
        let mut sim = Recorder::default();
        timer.start();

        timer.frame(ms(0), &mut sim);
        // One second stall: sixty ticks due, only three allowed.
        timer.frame(ms(1_000), &mut sim);

        assert_eq!(sim.updates.len(), 3);
        assert_eq!(sim.renders, 1);
        assert_eq!(timer.accumulated, Duration::ZERO);
    }

    #[test]
    fn test_accumulator_stays_below_interval() {
        let mut timer = FixedStep::new(60, 10);
        let interval = timer.tick_interval();
        let mut sim = Recorder::default();
        timer.start();

        for t in [0u64, 33, 47, 90, 133, 150] {
            timer.frame(ms(t), &mut sim);
            assert!(timer.accumulated < interval);
        }
        assert_eq!(sim.renders, 5);
    }
}
