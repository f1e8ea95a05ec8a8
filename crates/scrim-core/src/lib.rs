#![forbid(unsafe_code)]

//! Core primitives for the scrim overlay toolkit.
//!
//! This crate carries no UI policy of its own. It provides the two building
//! blocks the manager crates are written against:
//!
//! - [`animation`]: time-driven interpolation ([`animation::Fade`],
//!   [`animation::Slide`]) advanced by per-frame wall-clock deltas.
//! - [`pool`]: the instance-provider contract ([`pool::InstancePool`]) and a
//!   registry-backed implementation ([`pool::PoolRegistry`]) that leases and
//!   reclaims boxed instances by logical key.

pub mod animation;
pub mod pool;

pub use animation::{Animation, EasingFn, Fade, FrameClock, Slide};
pub use pool::{InstancePool, PoolRegistry, TemplateSpec};
