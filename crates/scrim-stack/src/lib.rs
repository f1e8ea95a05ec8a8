#![forbid(unsafe_code)]

//! Popup overlay stack management.
//!
//! A [`stack::PopupStack`] owns an ordered list of live overlay units
//! (popups), computes the shared background dim from the current composition,
//! and routes back/background-tap gestures to the topmost unit willing to
//! take them. Units implement the [`unit::OverlayUnit`] contract; their
//! visual instances are leased from an instance pool and reclaimed once the
//! exit transition completes.
//!
//! All bookkeeping is synchronous: an entry is appended before `present`
//! returns and removed before `dismiss` returns. Only the entrance/exit
//! fades play out across subsequent [`stack::PopupStack::tick`] calls.

pub mod scrim;
pub mod stack;
pub mod unit;

pub use scrim::ScrimState;
pub use stack::{OverlayId, PopupStack, PresentError, StackConfig};
pub use unit::{GestureOutcome, OverlayConfig, OverlayUnit, Payload};
