use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Cubic ease-in-out: slow start, fast middle, slow stop.
    EaseInOut,
    /// Cubic ease-out: fast start, long deceleration.
    EaseOut,
}

impl Easing {
    pub fn apply(self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// A value moving from `from` to `to` over a fixed duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
    easing: Easing,
}

impl Animation {
    pub fn new(from: f64, to: f64, started: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            started,
            duration,
            easing,
        }
    }

    pub fn finishes_at(&self) -> Instant {
        self.started + self.duration
    }

    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now >= self.finishes_at()
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        if self.is_finished(now) {
            return self.to;
        }
        let eased = self.easing.apply(self.progress(now));
        self.from + (self.to - self.from) * eased
    }
}
