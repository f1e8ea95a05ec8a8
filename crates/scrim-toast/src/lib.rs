#![forbid(unsafe_code)]

//! Toast notifications: bounded concurrent display with a FIFO backlog.
//!
//! A [`rack::ToastRack`] owns the currently visible toasts and a backlog of
//! pending [`data::ToastData`]. Admission is bounded: at most
//! `max_concurrent` toasts are visible, and in sequential mode only one shows
//! at a time. Each visible toast is a [`item::ToastItem`] state machine
//! (entering, visible, exiting, done) whose visual instance is leased from an
//! instance pool and reclaimed when the exit transition finishes, at which
//! point exactly one backlog entry is promoted.

pub mod data;
pub mod item;
pub mod rack;

pub use data::{KindColors, Rgba, ToastAction, ToastData, ToastKind};
pub use item::{ToastId, ToastItem, ToastPhase, ToastView};
pub use rack::{Anchor, RackConfig, TOAST_TEMPLATE_KEY, ToastRack};
