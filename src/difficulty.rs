use log::debug;

use crate::config::{Pace, Ramp};

/// Shrinks the inter-tick wait as the run goes on
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Difficulty {
    pace: Pace,
    wait_ms: u32,
    next_step_at: u32,
}

impl Difficulty {
    pub fn new(pace: Pace) -> Self {
        let next_step_at = match pace.ramp {
            Ramp::Reset { period_ms } => period_ms,
            Ramp::Advance { first_ms, .. } => first_ms,
        };
        Self {
            pace,
            wait_ms: pace.initial_wait_ms,
            next_step_at,
        }
    }

    /// Current per-tick delay
    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }

    /// Elapsed time at which the next step happens
    pub fn next_step_at(&self) -> u32 {
        self.next_step_at
    }

    /// Check the clock against the threshold, stepping at most once
    ///
    /// Returns the wait to apply for this tick.
    pub fn update(&mut self, elapsed_ms: u32) -> u32 {
        if elapsed_ms >= self.next_step_at {
            self.wait_ms = self
                .wait_ms
                .saturating_sub(self.pace.step_ms)
                .max(self.pace.min_wait_ms);
            self.next_step_at = match self.pace.ramp {
                Ramp::Reset { period_ms } => elapsed_ms.saturating_add(period_ms),
                Ramp::Advance { increment_ms, .. } => {
                    self.next_step_at.saturating_add(increment_ms)
                }
            };
            debug!(
                "speed up at {}ms: wait {}ms, next step at {}ms",
                elapsed_ms, self.wait_ms, self.next_step_at
            );
        }
        self.wait_ms
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.pace);
    }
}
