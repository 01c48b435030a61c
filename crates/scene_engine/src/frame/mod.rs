//! Frame scheduling
//!
//! The host calls [`FrameScheduler::tick`] once per display refresh. Each tick
//! applies pending texture completions, advances the phase, applies the bound
//! behaviors and submits one frame to the renderer. A tick cannot fail.

mod clock;
mod scheduler;

pub use clock::PhaseClock;
pub use scheduler::{FrameInfo, FrameScheduler, SchedulerState};
