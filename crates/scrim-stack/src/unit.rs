#![forbid(unsafe_code)]

//! The behavioral contract every popup implements.

use std::any::Any;
use std::time::Duration;

/// Caller-supplied data injected into a unit before presentation.
pub type Payload = Box<dyn Any>;

/// Per-unit configuration, read once at present time.
///
/// The stack snapshots this when the unit is presented and never re-reads
/// it; changing a unit's answers afterwards has no effect on the live entry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayConfig {
    /// Whether this unit dims and blocks everything below it.
    pub modal: bool,
    /// Background opacity requested while this unit is the topmost modal,
    /// clamped to [0, 1] at snapshot time.
    pub dim: f32,
    /// Tapping the dimmed background dismisses this unit.
    pub close_on_scrim_tap: bool,
    /// The back/cancel gesture dismisses this unit.
    pub consume_back: bool,
    /// Entrance fade duration.
    pub enter: Duration,
    /// Exit fade duration.
    pub exit: Duration,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            modal: true,
            dim: 0.6,
            close_on_scrim_tap: true,
            consume_back: true,
            enter: Duration::from_millis(150),
            exit: Duration::from_millis(120),
        }
    }
}

/// What a unit decided to do with a gesture.
///
/// Handlers return a command instead of calling back into the manager;
/// `Dismiss` both consumes the gesture and asks the stack to dismiss the
/// unit that returned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Not handled; offer the gesture to the next unit down.
    Pass,
    /// Handled; routing stops, nothing is dismissed.
    Consumed,
    /// Handled; routing stops and this unit is dismissed.
    Dismiss,
}

impl GestureOutcome {
    /// Whether the gesture was consumed (routing stops).
    pub fn is_consumed(self) -> bool {
        !matches!(self, GestureOutcome::Pass)
    }
}

/// One popup instance's behavioral contract.
///
/// Instances are leased from the stack's pool, configured through
/// [`OverlayUnit::on_before_present`], faded in, and eventually faded out and
/// reclaimed. The stack drives [`set_alpha`](OverlayUnit::set_alpha) every
/// frame while a fade is active; completion of the entrance fade is the
/// "fully interactive" signal, completion of the exit fade is the "safe to
/// reclaim" signal.
pub trait OverlayUnit {
    /// Static configuration for this unit. Read once at present time.
    fn config(&self) -> OverlayConfig {
        OverlayConfig::default()
    }

    /// Inject caller data before the entrance starts. Must not block.
    fn on_before_present(&mut self, _payload: Option<Payload>) {}

    /// Apply the current fade alpha to the visual instance.
    fn set_alpha(&mut self, _alpha: f32) {}

    /// Toggle whether the unit accepts input. Off during fades.
    fn set_interactable(&mut self, _on: bool) {}

    /// Background tapped while this unit was offered the gesture.
    fn on_scrim_tap(&mut self) -> GestureOutcome {
        if self.config().close_on_scrim_tap {
            GestureOutcome::Dismiss
        } else {
            GestureOutcome::Pass
        }
    }

    /// Back/cancel gesture offered to this unit.
    fn on_back(&mut self) -> GestureOutcome {
        if self.config().consume_back {
            GestureOutcome::Dismiss
        } else {
            GestureOutcome::Pass
        }
    }
}
