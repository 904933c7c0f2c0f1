//! Tick pacing.
use std::{thread, time::Instant};

use crate::constants::*;

/// Timer synchronizing the scheduler with the emulated 60 Hz system
/// clock.
///
/// The scheduler yields control back to the host between ticks; when it
/// resumes, the time spent away is counted against the current tick.
pub(crate) struct Clock {
    tick_started: Instant,
}

impl Clock {
    pub(crate) fn new() -> Self {
        Self {
            tick_started: Instant::now(),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.tick_started = Instant::now();
    }

    /// Block the current thread until the next 60 Hz boundary.
    pub(crate) fn wait(&mut self) {
        loop {
            let elapsed = self.tick_started.elapsed().as_nanos() as u64;
            if elapsed < TICK_INTERVAL {
                // Sleep lacks the resolution; a spin loop burns a core.
                // Yielding in a loop is the usable middle ground.
                thread::yield_now();
            } else {
                // Restart from now rather than catching up. A machine
                // paused under a debugger should resume at its usual
                // speed, not fast-forward through the missed ticks.
                self.reset();
                return;
            }
        }
    }
}
