//! Time-based interpolation of the displayed progress value.

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

/// Default length of a progress animation.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(1000);

/// Maps linear time progress in `[0, 1]` to eased progress in `[0, 1]`.
pub type Easing = Arc<dyn Fn(f32) -> f32 + Send + Sync>;

/// Identity curve.
pub fn linear() -> Easing {
    Arc::new(|t| t)
}

/// Decelerating curve, fast at first and easing out: `1 - (1 - t)^2`.
///
/// This is the default progress animation curve.
pub fn decelerate() -> Easing {
    Arc::new(|t| {
        let inv = 1.0 - t;
        1.0 - inv * inv
    })
}

/// Cubic ease-in-out mapping.
pub fn ease_in_out_cubic() -> Easing {
    Arc::new(|t| {
        if t < 0.5 {
            4.0 * t * t * t
        } else {
            1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
        }
    })
}

/// One in-flight value animation.
///
/// A widget holds at most one session; starting a new one drops the old,
/// which is thereby cancelled and can never tick or report completion again.
#[derive(Clone)]
pub struct AnimationSession {
    start_value: f32,
    end_value: f32,
    started_at: Instant,
    duration: Duration,
    easing: Easing,
}

impl fmt::Debug for AnimationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationSession")
            .field("start_value", &self.start_value)
            .field("end_value", &self.end_value)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

impl AnimationSession {
    /// Starts a session at `started_at`, animating from `start_value` to
    /// `end_value` over `duration`.
    pub fn new(
        start_value: f32,
        end_value: f32,
        started_at: Instant,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            start_value,
            end_value,
            started_at,
            duration,
            easing,
        }
    }

    /// The value this session is animating towards.
    #[inline]
    pub fn end_value(&self) -> f32 {
        self.end_value
    }

    /// Samples the session at `now`.
    ///
    /// Returns the displayed value, rounded to a whole number, and whether
    /// the session has reached its end. A zero duration completes on the
    /// first sample at the exact target.
    pub fn sample(&self, now: Instant) -> (f32, bool) {
        let elapsed = now.saturating_duration_since(self.started_at);
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
        };
        let finished = t >= 1.0;
        if finished {
            return (self.end_value, true);
        }
        let eased = (self.easing)(t).clamp(0.0, 1.0);
        let value = self.start_value + (self.end_value - self.start_value) * eased;
        (value.round(), false)
    }
}
