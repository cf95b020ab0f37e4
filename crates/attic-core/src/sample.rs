//! Sample type abstraction for f32/f64 audio processing.
//!
//! Enables generic block processing through monomorphization. DSP code
//! converts to `f64` at the edges and runs its inner math there.

/// Trait for audio sample types (f32, f64).
pub trait Sample: Copy + Default + Send + Sync + PartialOrd + 'static {
    /// Zero value (0.0).
    const ZERO: Self;

    /// Convert from f64.
    fn from_f64(value: f64) -> Self;

    /// Convert to f64.
    fn to_f64(self) -> f64;
}

impl Sample for f32 {
    const ZERO: Self = 0.0;

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Sample for f64 {
    const ZERO: Self = 0.0;

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }
}
