//! Update/render cycle

use crate::animation::BehaviorSet;
use crate::assets::TextureProvider;
use crate::foundation::time::Timer;
use crate::render::{Camera, Renderer};
use crate::scene::Scene;

use super::PhaseClock;

/// Scheduler lifecycle
///
/// There is no stopped state: the host simply stops calling `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Created, no frame produced yet
    Idle,
    /// At least one tick has run
    Running,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// 1-based frame number
    pub number: u64,
    /// Phase the behaviors were applied with
    pub phase: f64,
}

/// Drives behaviors and rendering, one frame per host tick
#[derive(Debug)]
pub struct FrameScheduler {
    state: SchedulerState,
    clock: PhaseClock,
    timer: Timer,
    phase: f64,
    frame_count: u64,
}

impl FrameScheduler {
    /// Create an idle scheduler at phase 0
    pub fn new(clock: PhaseClock) -> Self {
        Self {
            state: SchedulerState::Idle,
            clock,
            timer: Timer::new(),
            phase: 0.0,
            frame_count: 0,
        }
    }

    /// Start from `phase` instead of 0
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Overwrite the current phase; the next tick advances from here
    pub fn set_phase(&mut self, phase: f64) {
        self.phase = phase;
    }

    /// Current lifecycle state
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Phase of the most recent tick
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Number of ticks run so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Clock in use
    pub fn clock(&self) -> PhaseClock {
        self.clock
    }

    /// Run one frame
    ///
    /// 1. Apply texture completions, so readiness only changes here
    /// 2. Advance the phase
    /// 3. Apply behaviors in registration order
    /// 4. Render once
    pub fn tick(
        &mut self,
        scene: &mut Scene,
        camera: &Camera,
        behaviors: &BehaviorSet,
        textures: &mut dyn TextureProvider,
        renderer: &mut dyn Renderer,
    ) -> FrameInfo {
        if self.state == SchedulerState::Idle {
            log::info!("Frame scheduler running ({:?})", self.clock);
            self.state = SchedulerState::Running;
            self.timer = Timer::new();
        }

        textures.pump();

        self.timer.update();
        self.phase += self.clock.increment(&self.timer);
        self.frame_count += 1;

        behaviors.apply(scene, self.phase);
        renderer.render(scene, camera);

        log::trace!("Frame {} rendered at phase {:.3}", self.frame_count, self.phase);
        FrameInfo { number: self.frame_count, phase: self.phase }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(PhaseClock::default())
    }
}
