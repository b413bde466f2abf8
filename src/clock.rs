//! Fixed-timestep scheduling.
//!
//! Turns variable frame times into whole simulation ticks. Ticks for a frame
//! are always run before that frame's frustum solve and upload.

use log::warn;

/// Accumulates frame time and hands out fixed ticks.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    fixed_dt: f32,
    max_ticks_per_frame: u32,
    accumulator: f32,
}

impl FixedStepClock {
    /// Clock with `fixed_dt` seconds per tick, running at most
    /// `max_ticks_per_frame` ticks per call to [`FixedStepClock::advance`].
    pub fn new(fixed_dt: f32, max_ticks_per_frame: u32) -> Self {
        Self {
            fixed_dt,
            max_ticks_per_frame,
            accumulator: 0.0,
        }
    }

    /// Seconds per tick
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Time carried over to the next frame
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Add `frame_dt` seconds and return how many ticks are due.
    ///
    /// Negative or non-finite deltas are ignored. When more than the per-frame
    /// limit is due, the surplus time is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }

        let mut ticks = 0;
        while self.accumulator >= self.fixed_dt {
            if ticks == self.max_ticks_per_frame {
                warn!(
                    "Dropping {:.3}s of simulation time after {} ticks in one frame",
                    self.accumulator, ticks
                );
                self.accumulator = 0.0;
                break;
            }
            self.accumulator -= self.fixed_dt;
            ticks += 1;
        }
        ticks
    }
}
