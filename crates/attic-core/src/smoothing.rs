//! Linear ramps for control values.
//!
//! The filter engine reads its controls once per block but advances them
//! every sample through a [`Smoother`], so knob sweeps and automation do not
//! produce zipper noise.
//!
//! ```
//! use attic_core::Smoother;
//!
//! let mut ramp = Smoother::new(10.0);
//! ramp.set_sample_rate(1000.0);
//! ramp.reset(1.0);
//! ramp.set_target(0.5);
//! assert!((ramp.next() - 0.95).abs() < 1e-12);
//! ```

/// Linear ramp toward the most recent target.
///
/// A new target restarts the ramp from the current value, so every change
/// takes the full ramp time to land.
#[derive(Debug, Clone)]
pub struct Smoother {
    ramp_ms: f64,
    ramp_samples: u32,
    current: f64,
    target: f64,
    step: f64,
    remaining: u32,
}

impl Smoother {
    /// A ramp lasting `ramp_ms` milliseconds. Call
    /// [`set_sample_rate`](Self::set_sample_rate) before use.
    pub fn new(ramp_ms: f64) -> Self {
        Self {
            ramp_ms,
            ramp_samples: 1,
            current: 0.0,
            target: 0.0,
            step: 0.0,
            remaining: 0,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.ramp_samples = ((self.ramp_ms * sample_rate / 1000.0) as u32).max(1);
    }

    /// Start ramping toward `target`. Repeating the current target is a no-op.
    pub fn set_target(&mut self, target: f64) {
        if target == self.target {
            return;
        }
        self.target = target;
        self.remaining = self.ramp_samples;
        self.step = (target - self.current) / self.ramp_samples as f64;
    }

    /// Jump to `value` with no ramp.
    pub fn reset(&mut self, value: f64) {
        self.current = value;
        self.target = value;
        self.step = 0.0;
        self.remaining = 0;
    }

    /// Advance one sample and return the new value.
    #[inline]
    pub fn next(&mut self) -> f64 {
        if self.remaining > 0 {
            self.remaining -= 1;
            // Land exactly on the target, free of accumulated rounding
            self.current = if self.remaining == 0 {
                self.target
            } else {
                self.current + self.step
            };
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Smoother {
        let mut ramp = Smoother::new(10.0);
        ramp.set_sample_rate(1000.0);
        ramp.reset(0.0);
        ramp
    }

    #[test]
    fn test_reaches_target_after_ramp_time() {
        let mut ramp = ramp();
        ramp.set_target(1.0);

        for _ in 0..9 {
            assert!(ramp.next() < 1.0);
        }
        assert_eq!(ramp.next(), 1.0);
        assert_eq!(ramp.next(), 1.0);
    }

    #[test]
    fn test_retarget_mid_ramp() {
        let mut ramp = ramp();
        ramp.set_target(1.0);
        for _ in 0..5 {
            ramp.next();
        }
        ramp.set_target(0.0);
        for _ in 0..9 {
            ramp.next();
        }
        assert_eq!(ramp.next(), 0.0);
    }

    #[test]
    fn test_same_target_does_not_restart() {
        let mut ramp = ramp();
        ramp.set_target(1.0);
        for _ in 0..8 {
            ramp.next();
        }
        ramp.set_target(1.0);
        ramp.next();
        assert_eq!(ramp.next(), 1.0);
    }

    #[test]
    fn test_short_ramp_takes_one_sample() {
        let mut ramp = Smoother::new(0.01);
        ramp.set_sample_rate(1000.0);
        ramp.reset(2.0);
        ramp.set_target(3.0);
        assert_eq!(ramp.next(), 3.0);
    }
}
