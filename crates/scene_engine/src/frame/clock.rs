//! Phase clocks

use serde::{Deserialize, Serialize};

use crate::foundation::time::Timer;

/// How the animation phase advances per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseClock {
    /// Advance by a constant step every tick, independent of wall time
    Fixed {
        /// Phase units per tick
        step: f32,
    },
    /// Advance by measured seconds since the previous tick
    Elapsed {
        /// Phase units per second
        scale: f32,
    },
}

impl Default for PhaseClock {
    fn default() -> Self {
        PhaseClock::Fixed { step: 1.0 }
    }
}

impl PhaseClock {
    /// Phase increment for this tick; `timer` must already be updated
    pub fn increment(&self, timer: &Timer) -> f64 {
        match *self {
            PhaseClock::Fixed { step } => f64::from(step),
            PhaseClock::Elapsed { scale } => f64::from(timer.delta_time()) * f64::from(scale),
        }
    }

    /// True when the clock produces finite, non-negative increments
    pub fn is_valid(&self) -> bool {
        let value = match *self {
            PhaseClock::Fixed { step } => step,
            PhaseClock::Elapsed { scale } => scale,
        };
        value.is_finite() && value >= 0.0
    }
}
