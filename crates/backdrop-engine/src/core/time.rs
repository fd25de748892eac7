/// Frame-rate limiter for animation-frame callbacks.
/// Accepts at most one frame per `interval_ms`, regardless of the display refresh rate.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    /// Minimum time between accepted frames, in milliseconds.
    interval_ms: f64,
    /// Timestamp marker of the last accepted frame (already snapped to the interval grid).
    last_ms: f64,
}

impl FrameLimiter {
    /// Create a limiter for `target_fps` updates per second.
    /// A non-positive or non-finite rate disables limiting.
    pub fn new(target_fps: f32) -> Self {
        let interval_ms = if target_fps.is_finite() && target_fps > 0.0 {
            1000.0 / target_fps as f64
        } else {
            0.0
        };
        Self {
            interval_ms,
            last_ms: 0.0,
        }
    }

    /// Decide whether the callback fired at `now_ms` should run a pass.
    ///
    /// On acceptance the marker advances to `now - (elapsed % interval)`, so
    /// time lost to skipped callbacks never accumulates as drift.
    pub fn accept(&mut self, now_ms: f64) -> bool {
        let elapsed = now_ms - self.last_ms;
        if elapsed < 0.0 {
            // Clock went backwards (e.g. a re-based timeline); re-anchor.
            self.last_ms = now_ms;
            return false;
        }
        if elapsed < self.interval_ms {
            return false;
        }
        self.last_ms = if self.interval_ms > 0.0 {
            now_ms - (elapsed % self.interval_ms)
        } else {
            now_ms
        };
        true
    }

    /// The minimum frame interval in milliseconds.
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn last_ms(&self) -> f64 {
        self.last_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_callback_at_zero_is_skipped() {
        let mut limiter = FrameLimiter::new(20.0);
        assert!(!limiter.accept(0.0));
    }

    #[test]
    fn accepts_once_interval_elapsed() {
        let mut limiter = FrameLimiter::new(20.0);
        assert_eq!(limiter.interval_ms(), 50.0);
        assert!(!limiter.accept(49.0));
        assert!(limiter.accept(50.0));
        assert_eq!(limiter.last_ms(), 50.0);
    }

    #[test]
    fn double_rate_accepts_every_other_callback() {
        let mut limiter = FrameLimiter::new(20.0);
        let accepted: Vec<bool> = (1..=8).map(|i| limiter.accept(i as f64 * 25.0)).collect();
        assert_eq!(
            accepted,
            vec![false, true, false, true, false, true, false, true]
        );
    }

    #[test]
    fn late_frame_snaps_marker_to_grid() {
        let mut limiter = FrameLimiter::new(20.0);
        assert!(limiter.accept(130.0));
        // 130 - (130 % 50) = 100
        assert_eq!(limiter.last_ms(), 100.0);
        assert!(limiter.accept(150.0));
    }

    #[test]
    fn backwards_clock_reanchors() {
        let mut limiter = FrameLimiter::new(20.0);
        assert!(limiter.accept(500.0));
        assert!(!limiter.accept(10.0));
        assert_eq!(limiter.last_ms(), 10.0);
        assert!(limiter.accept(60.0));
    }

    #[test]
    fn zero_rate_never_limits() {
        let mut limiter = FrameLimiter::new(0.0);
        assert!(limiter.accept(0.0));
        assert!(limiter.accept(0.5));
    }
}
