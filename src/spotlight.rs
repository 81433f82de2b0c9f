use std::time::{Duration, Instant};

/// Auto-advancing index over the spotlight banner entries.
///
/// Rotation pauses while the banner holds focus so the buttons under the
/// cursor never change, and any manual move restarts the interval.
#[derive(Debug, Clone)]
pub struct SpotlightRotation {
    index: usize,
    len: usize,
    interval: Option<Duration>,
    last_change: Instant,
    paused: bool,
}

impl SpotlightRotation {
    pub fn new(interval: Option<Duration>, now: Instant) -> Self {
        Self {
            index: 0,
            len: 0,
            interval,
            last_change: now,
            paused: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_len(&mut self, len: usize, now: Instant) {
        if len != self.len {
            self.len = len;
            self.index = if len == 0 { 0 } else { self.index.min(len - 1) };
            self.last_change = now;
        }
    }

    pub fn set_paused(&mut self, paused: bool, now: Instant) {
        if self.paused && !paused {
            self.last_change = now;
        }
        self.paused = paused;
    }

    /// Advances when the interval elapsed. Returns true if the slide changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(interval) = self.interval else {
            return false;
        };
        if self.paused || self.len < 2 {
            return false;
        }
        if now.saturating_duration_since(self.last_change) >= interval {
            self.index = (self.index + 1) % self.len;
            self.last_change = now;
            return true;
        }
        false
    }

    pub fn next(&mut self, now: Instant) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
            self.last_change = now;
        }
    }

    pub fn previous(&mut self, now: Instant) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
            self.last_change = now;
        }
    }
}
