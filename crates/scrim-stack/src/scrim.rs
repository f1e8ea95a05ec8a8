#![forbid(unsafe_code)]

//! The shared background dim element.
//!
//! There is exactly one scrim behind the popup stack. Only
//! [`PopupStack`](crate::stack::PopupStack) mutates it: every stack mutation
//! retargets the dim toward the opacity of the topmost modal entry (or zero),
//! and a retarget supersedes any fade still in flight. Last write wins; there
//! is no queue of background transitions.

use std::time::Duration;

use scrim_core::animation::{Animation, Fade};

/// Alpha below which the scrim is treated as invisible for input blocking.
const MIN_BLOCK_ALPHA: f32 = 0.001;

/// Animated state of the background dim.
#[derive(Debug, Clone)]
pub struct ScrimState {
    start: f32,
    target: f32,
    current: f32,
    fade: Option<Fade>,
    block_requested: bool,
}

impl ScrimState {
    /// A fully transparent, non-blocking scrim.
    pub fn new() -> Self {
        Self {
            start: 0.0,
            target: 0.0,
            current: 0.0,
            fade: None,
            block_requested: false,
        }
    }

    /// Start fading from the current alpha toward `target`.
    ///
    /// Any in-flight fade is abandoned; it only ever mutated `current`, so
    /// there is nothing to clean up.
    pub fn retarget(&mut self, target: f32, block: bool, fade: Duration) {
        self.start = self.current;
        self.target = target.clamp(0.0, 1.0);
        self.block_requested = block;
        self.fade = Some(Fade::new(fade));
    }

    /// Advance the fade, clamping to the target once the duration elapses.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(fade) = &mut self.fade {
            fade.tick(dt);
            let t = fade.value();
            self.current = self.start + (self.target - self.start) * t;
            if fade.is_complete() {
                self.current = self.target;
                self.fade = None;
            }
        }
    }

    /// Current animated alpha.
    pub fn alpha(&self) -> f32 {
        self.current
    }

    /// Alpha the scrim is fading toward.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether a fade is still in flight.
    pub fn is_animating(&self) -> bool {
        self.fade.is_some()
    }

    /// Whether input behind the scrim is blocked right now.
    ///
    /// Tied to the current animated alpha, not the final target: blocking
    /// engages as soon as the dim is visibly present and was requested, and
    /// releases the moment blocking is no longer requested.
    pub fn blocks_input(&self) -> bool {
        self.block_requested && self.current > MIN_BLOCK_ALPHA
    }
}

impl Default for ScrimState {
    fn default() -> Self {
        Self::new()
    }
}
