#![forbid(unsafe_code)]

//! Scrim public facade crate.
//!
//! This crate provides the stable surface area for users. It re-exports the
//! popup stack, the toast rack, and their shared primitives from the internal
//! crates, and offers a lightweight prelude for day-to-day usage.
//!
//! The two managers are independent: a [`PopupStack`] handles modal popups
//! (LIFO, dimmed scrim, back-gesture routing), a [`ToastRack`] handles toast
//! notifications (bounded concurrency, FIFO backlog). Both lease their visual
//! instances from an [`InstancePool`] and are driven by per-frame
//! [`Animation`] ticks, typically clocked with a [`FrameClock`].

// --- Core re-exports -------------------------------------------------------

pub use scrim_core::animation::{Animation, EasingFn, Fade, FrameClock, Slide};
pub use scrim_core::pool::{InstancePool, PoolRegistry, TemplateSpec};

// --- Popup stack re-exports ------------------------------------------------

pub use scrim_stack::scrim::ScrimState;
pub use scrim_stack::stack::{OverlayId, PopupStack, PresentError, StackConfig};
pub use scrim_stack::unit::{GestureOutcome, OverlayConfig, OverlayUnit, Payload};

// --- Toast re-exports ------------------------------------------------------

pub use scrim_toast::data::{KindColors, Rgba, ToastAction, ToastData, ToastKind};
pub use scrim_toast::item::{ToastId, ToastItem, ToastPhase, ToastView};
pub use scrim_toast::rack::{Anchor, RackConfig, TOAST_TEMPLATE_KEY, ToastRack};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Animation, Fade, FrameClock, GestureOutcome, InstancePool, OverlayConfig, OverlayId,
        OverlayUnit, Payload, PoolRegistry, PopupStack, PresentError, RackConfig, Slide,
        StackConfig,
        TemplateSpec, ToastData, ToastId, ToastKind, ToastRack, ToastView,
    };

    pub use crate::{core, stack, toast};
}

pub use scrim_core as core;
pub use scrim_stack as stack;
pub use scrim_toast as toast;
