#![forbid(unsafe_code)]

//! Toast message payloads and the fixed kind→color mapping.

use std::fmt;
use std::time::Duration;

/// Category of a toast message, used only to pick a background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToastKind {
    /// General information.
    #[default]
    Info,
    /// An operation succeeded.
    Success,
    /// Something needs attention.
    Warning,
    /// An operation failed.
    Error,
}

/// An RGBA color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Create a color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// The enumerated kind→color table. Fixed at configuration time; there is
/// no theming system behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KindColors {
    pub info: Rgba,
    pub success: Rgba,
    pub warning: Rgba,
    pub error: Rgba,
}

impl Default for KindColors {
    fn default() -> Self {
        Self {
            info: Rgba::new(0.2, 0.4, 0.8, 0.9),
            success: Rgba::new(0.2, 0.8, 0.3, 0.9),
            warning: Rgba::new(1.0, 0.8, 0.2, 0.9),
            error: Rgba::new(0.9, 0.2, 0.2, 0.9),
        }
    }
}

impl KindColors {
    /// Background color for `kind`.
    pub fn color(&self, kind: ToastKind) -> Rgba {
        match kind {
            ToastKind::Info => self.info,
            ToastKind::Success => self.success,
            ToastKind::Warning => self.warning,
            ToastKind::Error => self.error,
        }
    }
}

/// An action button on a toast.
///
/// Activation invokes the callback; it does not dismiss the toast. The
/// callback may ask its own channels to dismiss if it wants that.
pub struct ToastAction {
    /// Button label.
    pub label: String,
    on_activate: Box<dyn FnMut()>,
}

impl ToastAction {
    /// Create an action with a label and callback.
    pub fn new(label: impl Into<String>, on_activate: impl FnMut() + 'static) -> Self {
        Self {
            label: label.into(),
            on_activate: Box::new(on_activate),
        }
    }

    /// Invoke the callback.
    pub(crate) fn activate(&mut self) {
        (self.on_activate)();
    }
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Everything needed to show one toast.
pub struct ToastData {
    /// Message text. Empty messages are rejected by the rack.
    pub message: String,
    /// Category, mapped to a background color.
    pub kind: ToastKind,
    /// Auto-dismiss countdown. `None` persists until manually dismissed.
    pub duration: Option<Duration>,
    /// Optional icon reference (resolved by the view).
    pub icon: Option<String>,
    /// Optional action button.
    pub action: Option<ToastAction>,
}

impl ToastData {
    /// Create toast data.
    ///
    /// `seconds <= 0` means "persist until manually dismissed" — there is no
    /// immediately-firing zero-length timer.
    pub fn new(message: impl Into<String>, kind: ToastKind, seconds: f32) -> Self {
        Self {
            message: message.into(),
            kind,
            duration: if seconds > 0.0 {
                Some(Duration::from_secs_f32(seconds))
            } else {
                None
            },
            icon: None,
            action: None,
        }
    }

    /// Set the auto-dismiss countdown directly.
    pub fn with_duration(mut self, duration: Option<Duration>) -> Self {
        self.duration = duration;
        self
    }

    /// Never auto-dismiss.
    pub fn persistent(mut self) -> Self {
        self.duration = None;
        self
    }

    /// Attach an icon reference.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Attach an action button.
    pub fn with_action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }
}

impl fmt::Debug for ToastData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastData")
            .field("message", &self.message)
            .field("kind", &self.kind)
            .field("duration", &self.duration)
            .field("icon", &self.icon)
            .field("action", &self.action.as_ref().map(|a| &a.label))
            .finish()
    }
}
