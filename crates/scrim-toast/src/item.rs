#![forbid(unsafe_code)]

//! A single live toast and its lifecycle state machine.
//!
//! `Entering → Visible → Exiting → Done`. The auto-dismiss countdown starts
//! at setup and runs concurrently with the entrance transition; it is
//! cancelled the moment an exit starts. [`ToastItem::dismiss`] while already
//! exiting (or done) is a no-op, so the rack sees "reclaim me" exactly once.

use std::time::Duration;

use scrim_core::animation::{Animation, Fade, Slide};

use crate::data::{Rgba, ToastAction, ToastData};
use crate::rack::RackConfig;

/// Unique identifier for a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(pub u64);

impl ToastId {
    /// Create a toast ID.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Fallback height when the view reports a non-positive height.
const DEFAULT_HEIGHT: f32 = 60.0;

/// The visual instance behind a toast, leased from the instance pool.
///
/// Optional sub-elements may be absent in a given view; a view without an
/// icon slot or action button simply ignores those setters.
pub trait ToastView {
    /// Set the message text.
    fn set_message(&mut self, text: &str);

    /// Set the background color for the toast's kind.
    fn set_background(&mut self, color: Rgba);

    /// Show an icon, or hide the icon slot when `None`.
    fn set_icon(&mut self, icon: Option<&str>);

    /// Show the action button with a label, or hide it when `None`.
    fn set_action_label(&mut self, label: Option<&str>);

    /// Apply the current transition alpha.
    fn set_alpha(&mut self, alpha: f32);

    /// Place the view relative to the rack's anchored edge.
    fn set_offset(&mut self, x: f32, y: f32);

    /// Toggle whether the view accepts input.
    fn set_interactable(&mut self, on: bool);

    /// Measured height of the view, in points.
    fn height(&self) -> f32;
}

/// Lifecycle phase of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Fading/sliding in; countdown already running.
    Entering,
    /// Fully interactive.
    Visible,
    /// Fading/sliding out; countdown cancelled.
    Exiting,
    /// Exit finished; the view is ready to reclaim.
    Done,
}

/// One live toast: leased view plus animation and countdown state.
pub struct ToastItem {
    id: ToastId,
    view: Box<dyn ToastView>,
    phase: ToastPhase,
    fade: Fade,
    slide: Slide,
    alpha: f32,
    exit_start_alpha: f32,
    remaining: Option<Duration>,
    action: Option<ToastAction>,
    base_offset: f32,
    slide_distance: f32,
    anchored_top: bool,
    exit: Duration,
}

impl ToastItem {
    /// Set up a freshly leased view and start the entrance.
    pub fn new(id: ToastId, mut view: Box<dyn ToastView>, data: ToastData, config: &RackConfig) -> Self {
        view.set_message(&data.message);
        view.set_background(config.colors.color(data.kind));
        view.set_icon(data.icon.as_deref());
        view.set_action_label(data.action.as_ref().map(|a| a.label.as_str()));
        view.set_alpha(0.0);
        view.set_interactable(false);

        let anchored_top = config.anchor.is_top();
        let distance = config.slide_distance;
        let mut item = Self {
            id,
            view,
            phase: ToastPhase::Entering,
            fade: Fade::new(config.enter),
            slide: Slide::new(Self::away(anchored_top, distance), 0.0, config.enter),
            alpha: 0.0,
            exit_start_alpha: 0.0,
            // Countdown starts now, not when the entrance finishes.
            remaining: data.duration,
            action: data.action,
            base_offset: 0.0,
            slide_distance: distance,
            anchored_top,
            exit: config.exit,
        };
        item.apply_pose();
        item
    }

    /// Offset pointing away from the screen, relative to the rest position.
    fn away(anchored_top: bool, distance: f32) -> f32 {
        if anchored_top { distance } else { -distance }
    }

    /// This toast's id.
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> ToastPhase {
        self.phase
    }

    /// Height used for stacking, with a fallback for unmeasured views.
    pub fn height(&self) -> f32 {
        let h = self.view.height();
        if h > 0.0 { h } else { DEFAULT_HEIGHT }
    }

    /// Begin the exit transition. No-op while already exiting or done.
    pub fn dismiss(&mut self) {
        match self.phase {
            ToastPhase::Entering | ToastPhase::Visible => self.start_exit(),
            ToastPhase::Exiting | ToastPhase::Done => {}
        }
    }

    /// Invoke the action callback, if any. Does not dismiss the toast.
    pub fn activate_action(&mut self) -> bool {
        if let Some(action) = &mut self.action {
            action.activate();
            true
        } else {
            false
        }
    }

    /// Assign the stacking offset computed by the rack's layout pass.
    pub(crate) fn set_base_offset(&mut self, offset: f32) {
        self.base_offset = offset;
        self.apply_pose();
    }

    /// Advance the state machine. Returns `true` exactly once, when the exit
    /// finishes and the view is ready to reclaim.
    pub(crate) fn tick(&mut self, dt: Duration) -> bool {
        match self.phase {
            ToastPhase::Entering => {
                self.fade.tick(dt);
                self.slide.tick(dt);
                self.alpha = self.fade.value();
                if self.fade.is_complete() {
                    self.alpha = 1.0;
                    self.phase = ToastPhase::Visible;
                    self.view.set_interactable(true);
                }
                self.apply_pose();
                self.tick_countdown(dt);
                false
            }
            ToastPhase::Visible => {
                self.tick_countdown(dt);
                false
            }
            ToastPhase::Exiting => {
                self.fade.tick(dt);
                self.slide.tick(dt);
                self.alpha = self.exit_start_alpha * (1.0 - self.fade.value());
                self.apply_pose();
                if self.fade.is_complete() {
                    self.alpha = 0.0;
                    self.view.set_alpha(0.0);
                    self.phase = ToastPhase::Done;
                    return true;
                }
                false
            }
            ToastPhase::Done => false,
        }
    }

    fn tick_countdown(&mut self, dt: Duration) {
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(dt);
            if remaining.is_zero() {
                self.remaining = None;
                self.start_exit();
            }
        }
    }

    fn start_exit(&mut self) {
        self.remaining = None;
        self.exit_start_alpha = self.alpha;
        self.fade = Fade::new(self.exit);
        // Slide out from wherever the entrance left off, not from rest.
        self.slide = Slide::new(
            self.slide.position(),
            Self::away(self.anchored_top, self.slide_distance),
            self.exit,
        );
        self.phase = ToastPhase::Exiting;
        self.view.set_interactable(false);
    }

    fn apply_pose(&mut self) {
        // Stacking grows downward from a top anchor and upward from a
        // bottom anchor; the slide offset points away from the screen.
        let stack_y = if self.anchored_top {
            -self.base_offset
        } else {
            self.base_offset
        };
        self.view.set_alpha(self.alpha);
        self.view.set_offset(0.0, stack_y + self.slide.position());
    }

    /// Hand the leased view back for despawning.
    pub(crate) fn into_view(self) -> Box<dyn ToastView> {
        self.view
    }
}
