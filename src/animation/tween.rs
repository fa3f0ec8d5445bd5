use crate::foundation::error::{SvgMorphError, SvgMorphResult};

/// Result of advancing a [`Tween`] by one clock tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenStatus {
    /// Still running; `progress` is the normalized time in `[0, 1)`.
    InProgress {
        /// Normalized time.
        progress: f64,
    },
    /// Reached the end. Reported once per tween; later ticks keep reporting `Done`.
    Done,
}

/// Clock-driven normalized timeline over `[0, duration]`.
///
/// The owner calls [`Tween::advance`] once per frame with the elapsed wall/scene time and
/// applies its own frame update using the returned progress.
#[derive(Clone, Debug)]
pub struct Tween {
    duration_secs: f64,
    elapsed_secs: f64,
}

impl Tween {
    /// A tween at time zero. Fails for negative or non-finite durations.
    pub fn new(duration_secs: f64) -> SvgMorphResult<Self> {
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            return Err(SvgMorphError::validation(
                "tween duration must be finite and >= 0",
            ));
        }
        Ok(Self {
            duration_secs,
            elapsed_secs: 0.0,
        })
    }

    /// Total duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Normalized progress in `[0, 1]`; a zero-length tween is always complete.
    pub fn progress(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 1.0;
        }
        (self.elapsed_secs / self.duration_secs).clamp(0.0, 1.0)
    }

    /// Whether progress has reached 1.
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Move the clock forward by `dt_secs` (negative or non-finite deltas count as zero).
    pub fn advance(&mut self, dt_secs: f64) -> TweenStatus {
        if dt_secs.is_finite() && dt_secs > 0.0 {
            self.elapsed_secs = (self.elapsed_secs + dt_secs).min(self.duration_secs);
        }
        if self.is_finished() {
            TweenStatus::Done
        } else {
            TweenStatus::InProgress {
                progress: self.progress(),
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
