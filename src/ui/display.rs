use std::time::{Duration, Instant};

use crate::session::host::{InfoSnapshot, Renderer};

/// How long a new line takes to slide in from the right.
pub const SLIDE_IN: Duration = Duration::from_millis(180);

/// Renderer state read by the typing line, info bar and progress widgets.
#[derive(Clone, Debug, Default)]
pub struct LineDisplay {
    pub normal: String,
    pub green: String,
    pub red: String,
    pub info: InfoSnapshot,
    pub progress: (usize, usize),
    slide_started: Option<Instant>,
}

impl LineDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of the slide-in animation still to run, `0.0` when idle.
    pub fn slide_remaining(&self, now: Instant) -> f64 {
        match self.slide_started {
            Some(started) => {
                let elapsed = now.saturating_duration_since(started);
                if elapsed >= SLIDE_IN {
                    0.0
                } else {
                    1.0 - elapsed.as_secs_f64() / SLIDE_IN.as_secs_f64()
                }
            }
            None => 0.0,
        }
    }

    /// Drop the animation once it has run out.
    pub fn tick(&mut self, now: Instant) {
        if self.slide_remaining(now) == 0.0 {
            self.slide_started = None;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.slide_started.is_some()
    }

    pub fn progress_ratio(&self) -> f64 {
        let (index, total) = self.progress;
        if total == 0 {
            0.0
        } else {
            (index as f64 / total as f64).min(1.0)
        }
    }
}

impl Renderer for LineDisplay {
    fn set_normal_text(&mut self, text: &str) {
        self.normal = text.to_string();
    }

    fn set_green_text(&mut self, text: &str) {
        self.green = text.to_string();
    }

    fn set_red_text(&mut self, text: &str) {
        self.red = text.to_string();
    }

    fn line_slide_in(&mut self) {
        self.slide_started = Some(Instant::now());
    }

    fn update_info(&mut self, info: InfoSnapshot) {
        self.info = info;
    }

    fn update_progress(&mut self, index: usize, total: usize) {
        self.progress = (index, total);
    }
}
