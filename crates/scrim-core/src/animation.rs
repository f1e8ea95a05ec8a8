#![forbid(unsafe_code)]

//! Time-driven transition primitives.
//!
//! Animations produce normalized `f32` values (0.0–1.0) and are advanced
//! with explicit frame deltas, never by reading a clock themselves. The
//! deltas come from [`FrameClock`], which measures unscaled wall-clock time:
//! overlays keep animating while the host application's simulation time is
//! paused or scaled.
//!
//! A zero (or otherwise degenerate) duration still terminates: progress is
//! clamped to the final value as soon as elapsed time reaches the duration,
//! so a misconfigured transition completes on its first tick instead of
//! stalling its owner forever.

use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (slow start).
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based transition producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance by one frame delta.
    fn tick(&mut self, dt: Duration);

    /// Whether the transition has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value, clamped to [0.0, 1.0].
    fn value(&self) -> f32;

    /// Rewind to the initial state.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// Elapsed/duration bookkeeping shared by [`Fade`] and [`Slide`].
///
/// Elapsed time accumulates as [`Duration`], not `f32`, so long frame
/// sequences do not drift. A degenerate duration is bumped to one nanosecond
/// so the first tick completes it.
#[derive(Debug, Clone, Copy)]
struct Timeline {
    elapsed: Duration,
    duration: Duration,
}

impl Timeline {
    fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: duration.max(Duration::from_nanos(1)),
        }
    }

    fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn done(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    fn rewind(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

// ---------------------------------------------------------------------------
// Fade
// ---------------------------------------------------------------------------

/// Progression from 0.0 to 1.0 over a duration, with configurable easing.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    timeline: Timeline,
    easing: EasingFn,
}

impl Fade {
    /// Create a fade with the given duration and default linear easing.
    pub fn new(duration: Duration) -> Self {
        Self {
            timeline: Timeline::new(duration),
            easing: linear,
        }
    }

    /// Set the easing function.
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Raw linear progress (before easing), in [0.0, 1.0].
    pub fn raw_progress(&self) -> f32 {
        self.timeline.progress()
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.timeline.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.timeline.done()
    }

    fn value(&self) -> f32 {
        (self.easing)(self.timeline.progress())
    }

    fn reset(&mut self) {
        self.timeline.rewind();
    }
}

// ---------------------------------------------------------------------------
// Slide
// ---------------------------------------------------------------------------

/// Interpolates an `f32` offset between `from` and `to` over a duration.
///
/// [`Animation::value`] returns the normalized progress; use
/// [`Slide::position`] for the interpolated offset.
#[derive(Debug, Clone, Copy)]
pub struct Slide {
    from: f32,
    to: f32,
    timeline: Timeline,
    easing: EasingFn,
}

impl Slide {
    /// Create a new slide from `from` to `to` over `duration`.
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            timeline: Timeline::new(duration),
            easing: ease_out,
        }
    }

    /// Set the easing function (builder).
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Current interpolated offset.
    pub fn position(&self) -> f32 {
        let t = (self.easing)(self.timeline.progress());
        self.from + (self.to - self.from) * t
    }
}

impl Animation for Slide {
    fn tick(&mut self, dt: Duration) {
        self.timeline.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.timeline.done()
    }

    fn value(&self) -> f32 {
        (self.easing)(self.timeline.progress())
    }

    fn reset(&mut self) {
        self.timeline.rewind();
    }
}

// ---------------------------------------------------------------------------
// FrameClock
// ---------------------------------------------------------------------------

/// Wall-clock frame-delta source.
///
/// The host application calls [`FrameClock::frame`] once per frame and feeds
/// the returned delta into the managers' `tick`. Deltas are measured with
/// [`Instant`], so they ignore any simulation-time scaling the application
/// applies elsewhere.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    /// Create a clock; the first [`frame`](Self::frame) measures from now.
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Time elapsed since the previous call (or since construction).
    pub fn frame(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fade_progresses_linearly() {
        let mut fade = Fade::new(Duration::from_millis(100));
        assert_eq!(fade.value(), 0.0);
        assert!(!fade.is_complete());

        fade.tick(Duration::from_millis(50));
        assert!((fade.value() - 0.5).abs() < 1e-3);

        fade.tick(Duration::from_millis(50));
        assert!(fade.is_complete());
        assert_eq!(fade.value(), 1.0);
    }

    #[test]
    fn test_fade_clamps_past_duration() {
        let mut fade = Fade::new(Duration::from_millis(10));
        fade.tick(Duration::from_secs(5));
        assert!(fade.is_complete());
        assert_eq!(fade.value(), 1.0);
    }

    #[test]
    fn test_fade_zero_duration_completes_on_first_tick() {
        let mut fade = Fade::new(Duration::ZERO);
        assert!(!fade.is_complete());
        fade.tick(MS);
        assert!(fade.is_complete());
        assert_eq!(fade.value(), 1.0);
    }

    #[test]
    fn test_fade_reset() {
        let mut fade = Fade::new(Duration::from_millis(10));
        fade.tick(Duration::from_millis(10));
        assert!(fade.is_complete());
        fade.reset();
        assert!(!fade.is_complete());
        assert_eq!(fade.value(), 0.0);
    }

    #[test]
    fn test_slide_position_endpoints() {
        let mut slide = Slide::new(-50.0, 0.0, Duration::from_millis(100)).easing(linear);
        assert_eq!(slide.position(), -50.0);
        slide.tick(Duration::from_millis(100));
        assert_eq!(slide.position(), 0.0);
        assert!(slide.is_complete());
    }

    #[test]
    fn test_slide_midpoint_linear() {
        let mut slide = Slide::new(0.0, 80.0, Duration::from_millis(100)).easing(linear);
        slide.tick(Duration::from_millis(25));
        assert!((slide.position() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [linear, ease_in, ease_out, ease_in_out] {
            assert!((easing(0.0)).abs() < 1e-6);
            assert!((easing(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_easing_clamps_out_of_range_input() {
        assert_eq!(linear(-1.0), 0.0);
        assert_eq!(linear(2.0), 1.0);
        assert_eq!(ease_out(2.0), 1.0);
    }

    #[test]
    fn test_frame_clock_monotonic() {
        let mut clock = FrameClock::new();
        let a = clock.frame();
        let b = clock.frame();
        // Deltas are non-negative by construction of Instant.
        assert!(a >= Duration::ZERO);
        assert!(b >= Duration::ZERO);
    }

    proptest! {
        #[test]
        fn test_fade_value_stays_clamped_and_monotone(
            duration_ms in 1u64..2_000,
            steps in proptest::collection::vec(0u64..500, 1..32),
        ) {
            let mut fade = Fade::new(Duration::from_millis(duration_ms));
            let mut last = fade.value();
            for ms in steps {
                fade.tick(Duration::from_millis(ms));
                let v = fade.value();
                prop_assert!((0.0..=1.0).contains(&v));
                prop_assert!(v >= last);
                last = v;
            }
        }

        #[test]
        fn test_slide_position_stays_between_endpoints(
            from in -200.0f32..200.0,
            to in -200.0f32..200.0,
            duration_ms in 1u64..2_000,
            steps in proptest::collection::vec(0u64..500, 1..32),
        ) {
            let mut slide = Slide::new(from, to, Duration::from_millis(duration_ms));
            let lo = from.min(to);
            let hi = from.max(to);
            for ms in steps {
                slide.tick(Duration::from_millis(ms));
                let p = slide.position();
                prop_assert!(p >= lo - 1e-3 && p <= hi + 1e-3);
            }
            slide.tick(Duration::from_secs(10));
            prop_assert!((slide.position() - to).abs() < 1e-3);
        }
    }
}
