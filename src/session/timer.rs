use std::time::Instant;

use crate::session::host::Timer;

/// Counts correct keystrokes between `start` and `stop`.
#[derive(Clone, Debug, Default)]
pub struct Typometer {
    pub started_at: Option<Instant>,
    pub stopped_at: Option<Instant>,
    pub keystrokes: u32,
}

impl Typometer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_secs(&self) -> f64 {
        match (self.started_at, self.stopped_at) {
            (Some(start), Some(end)) => end.duration_since(start).as_secs_f64(),
            (Some(start), None) => start.elapsed().as_secs_f64(),
            _ => 0.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }
}

impl Timer for Typometer {
    fn start(&mut self) {
        self.started_at = Some(Instant::now());
        self.stopped_at = None;
        self.keystrokes = 0;
    }

    fn stop(&mut self) {
        if self.is_running() {
            self.stopped_at = Some(Instant::now());
        }
    }

    fn record_keystroke(&mut self) {
        self.keystrokes += 1;
    }

    fn keystrokes(&self) -> u32 {
        self.keystrokes
    }

    fn velocity(&self) -> f64 {
        let elapsed = self.elapsed_secs();
        if elapsed < 0.1 {
            return 0.0;
        }
        self.keystrokes as f64 / (elapsed / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_velocity_is_keys_per_minute() {
        let start = Instant::now();
        let timer = Typometer {
            started_at: Some(start),
            stopped_at: Some(start + Duration::from_secs(30)),
            keystrokes: 100,
        };
        assert!((timer.velocity() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_zero_before_start() {
        let timer = Typometer::new();
        assert_eq!(timer.velocity(), 0.0);
        assert_eq!(timer.elapsed_secs(), 0.0);
    }

    #[test]
    fn test_start_resets_and_stop_is_idempotent() {
        let mut timer = Typometer::new();
        timer.stop();
        assert!(timer.stopped_at.is_none());

        timer.start();
        timer.record_keystroke();
        timer.record_keystroke();
        assert_eq!(timer.keystrokes(), 2);
        timer.stop();
        let stopped = timer.stopped_at;
        timer.stop();
        assert_eq!(timer.stopped_at, stopped);

        timer.start();
        assert_eq!(timer.keystrokes(), 0);
        assert!(timer.is_running());
    }
}
