//! Resonant multi-mode ladder filter.
//!
//! The engine is split in two halves:
//!
//! - [`FilterControls`] holds the control values (cutoff, resonance, drive,
//!   mode) in independent atomic slots. It is shared through an `Arc` and
//!   written at control rate from any thread.
//! - [`LadderFilter`] owns the per-channel stage memory and runs on the
//!   audio thread. It reads the controls once per block and never blocks or
//!   allocates while processing.
//!
//! # Algorithm
//!
//! Four cascaded one-pole stages per channel with a saturated feedback loop.
//! Each stage computes `y = b1·x[n-1] + a1·y[n-1] + b0·x` where
//! `a1 = exp(-2π·fc/fs)`, `b0 = (1 - a1)·10/13` and `b1 = (1 - a1)·3/13`.
//! The loop input is
//!
//! ```text
//! a = dx - k·(gain2·tanh(drive2·s4) - comp·dx),   dx = gain·tanh(drive·x)
//! ```
//!
//! and the output mixes `[a, s1, s2, s3, s4]` with per-mode tap weights.
//! Switching mode only swaps the tap weights, so the stage memory carries
//! over and the switch is click-free.

use std::f64::consts::TAU;
use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;

use attic_core::{AudioSetup, Buffer, PluginResult, Sample, Smoother};

use crate::params::{
    FilterMode, CUTOFF_DEFAULT_HZ, CUTOFF_MAX_HZ, CUTOFF_MIN_HZ, DRIVE_DEFAULT, DRIVE_MAX,
    DRIVE_MIN, RESONANCE_DEFAULT, RESONANCE_MAX, RESONANCE_MIN,
};

/// Ramp time for cutoff and resonance changes.
pub const SMOOTHING_MS: f64 = 50.0;

/// Stage values below this magnitude are flushed to zero.
const DENORMAL_THRESHOLD: f64 = 1.0e-15;

/// Ladder input node plus the four stage outputs.
type StageMemory = [f64; 5];

// =============================================================================
// Controls
// =============================================================================

/// Lock-free control values shared between control and audio threads.
///
/// Every setter is a single atomic store. Values are clamped to their legal
/// range before they are published; non-finite values are ignored.
#[derive(Debug)]
pub struct FilterControls {
    cutoff_hz: AtomicU32,
    resonance: AtomicU32,
    drive: AtomicU32,
    mode: AtomicU8,
}

impl FilterControls {
    /// Controls initialized to the parameter defaults.
    pub fn new() -> Self {
        Self {
            cutoff_hz: AtomicU32::new((CUTOFF_DEFAULT_HZ as f32).to_bits()),
            resonance: AtomicU32::new((RESONANCE_DEFAULT as f32).to_bits()),
            drive: AtomicU32::new((DRIVE_DEFAULT as f32).to_bits()),
            mode: AtomicU8::new(FilterMode::default() as u8),
        }
    }

    /// Set the cutoff frequency, clamped to 20 Hz - 20 kHz.
    #[inline]
    pub fn set_cutoff_hz(&self, hz: f32) {
        store_clamped(&self.cutoff_hz, hz, CUTOFF_MIN_HZ, CUTOFF_MAX_HZ);
    }

    /// Set the resonance, clamped to 0 - 1.2.
    #[inline]
    pub fn set_resonance(&self, resonance: f32) {
        store_clamped(&self.resonance, resonance, RESONANCE_MIN, RESONANCE_MAX);
    }

    /// Set the input drive, clamped to 1 - 25.
    #[inline]
    pub fn set_drive(&self, drive: f32) {
        store_clamped(&self.drive, drive, DRIVE_MIN, DRIVE_MAX);
    }

    /// Select the filter response.
    #[inline]
    pub fn set_mode(&self, mode: FilterMode) {
        self.mode.store(mode as u8, Ordering::Relaxed);
    }

    #[inline]
    pub fn cutoff_hz(&self) -> f32 {
        f32::from_bits(self.cutoff_hz.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn resonance(&self) -> f32 {
        f32::from_bits(self.resonance.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn drive(&self) -> f32 {
        f32::from_bits(self.drive.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn mode(&self) -> FilterMode {
        FilterMode::from_index(self.mode.load(Ordering::Relaxed) as usize).unwrap_or_default()
    }
}

impl Default for FilterControls {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn store_clamped(slot: &AtomicU32, value: f32, min: f64, max: f64) {
    if !value.is_finite() {
        return;
    }
    let clamped = value.clamp(min as f32, max as f32);
    slot.store(clamped.to_bits(), Ordering::Relaxed);
}

// =============================================================================
// Coefficients
// =============================================================================

/// One-pole feedback coefficient `a1` for a cutoff frequency.
///
/// Decreases monotonically as the cutoff rises.
#[inline]
pub fn pole_coefficient(cutoff_hz: f64, sample_rate: f64) -> f64 {
    let cutoff_hz = cutoff_hz.clamp(CUTOFF_MIN_HZ, CUTOFF_MAX_HZ);
    (-TAU * cutoff_hz / sample_rate).exp()
}

/// Output tap weights over `[a, s1, s2, s3, s4]` and input compensation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Taps {
    weights: [f64; 5],
    compensation: f64,
}

impl Taps {
    fn for_mode(mode: FilterMode) -> Self {
        let (weights, compensation) = match mode {
            FilterMode::Lpf12 => ([0.0, 0.0, 1.0, 0.0, 0.0], 0.5),
            FilterMode::Lpf24 => ([0.0, 0.0, 0.0, 0.0, 1.0], 0.5),
            FilterMode::Hpf12 => ([1.0, -2.0, 1.0, 0.0, 0.0], 0.0),
            FilterMode::Hpf24 => ([1.0, -4.0, 6.0, -4.0, 1.0], 0.0),
            FilterMode::Bpf12 => ([0.0, 0.0, -1.0, 1.0, 0.0], 0.5),
            FilterMode::Bpf24 => ([0.0, 0.0, 1.0, -2.0, 1.0], 0.5),
        };
        Self {
            weights,
            compensation,
        }
    }
}

/// Saturation gains derived from the drive amount.
#[derive(Debug, Clone, Copy)]
struct Saturation {
    drive: f64,
    gain: f64,
    feedback_drive: f64,
    feedback_gain: f64,
}

impl Saturation {
    fn new(drive: f64) -> Self {
        let feedback_drive = 0.04 * drive + 0.96;
        Self {
            drive,
            gain: makeup_gain(drive),
            feedback_drive,
            feedback_gain: makeup_gain(feedback_drive),
        }
    }
}

/// Level compensation for `tanh(drive·x)`.
#[inline]
fn makeup_gain(drive: f64) -> f64 {
    drive.powf(-2.642) * 0.6103 + 0.3903
}

#[inline]
fn flush_denormal(value: f64) -> f64 {
    if value.abs() < DENORMAL_THRESHOLD {
        0.0
    } else {
        value
    }
}

/// Advance one channel by one sample and return the mixed output.
#[inline]
fn tick(
    s: &mut StageMemory,
    x: f64,
    a1: f64,
    k: f64,
    saturation: &Saturation,
    taps: &Taps,
) -> f64 {
    let g = 1.0 - a1;
    let b0 = g * (10.0 / 13.0);
    let b1 = g * (3.0 / 13.0);

    let dx = saturation.gain * (saturation.drive * x).tanh();
    let a = dx
        - k * (saturation.feedback_gain * (saturation.feedback_drive * s[4]).tanh()
            - taps.compensation * dx);

    let b = b1 * s[0] + a1 * s[1] + b0 * a;
    let c = b1 * s[1] + a1 * s[2] + b0 * b;
    let d = b1 * s[2] + a1 * s[3] + b0 * c;
    let e = b1 * s[3] + a1 * s[4] + b0 * d;

    *s = [
        flush_denormal(a),
        flush_denormal(b),
        flush_denormal(c),
        flush_denormal(d),
        flush_denormal(e),
    ];

    taps.weights
        .iter()
        .zip(s.iter())
        .map(|(weight, value)| weight * value)
        .sum()
}

// =============================================================================
// Engine
// =============================================================================

/// Audio half of the filter: per-channel stage memory and smoothed controls.
pub struct LadderFilter {
    controls: Arc<FilterControls>,
    sample_rate: f64,
    /// One entry per prepared channel. Empty until prepared.
    state: Vec<StageMemory>,
    /// Smooths the pole coefficient, not the cutoff in Hz.
    pole: Smoother,
    resonance: Smoother,
}

impl LadderFilter {
    /// Create an unprepared filter reading from `controls`.
    ///
    /// Until [`prepare`](Self::prepare) succeeds, [`process`](Self::process)
    /// leaves audio untouched.
    pub fn new(controls: Arc<FilterControls>) -> Self {
        Self {
            controls,
            sample_rate: 0.0,
            state: Vec::new(),
            pole: Smoother::new(SMOOTHING_MS),
            resonance: Smoother::new(SMOOTHING_MS),
        }
    }

    /// The control half this filter reads from.
    pub fn controls(&self) -> &Arc<FilterControls> {
        &self.controls
    }

    /// Configure for a stream and clear all stage memory.
    ///
    /// Smoothers jump straight to the current control values. Invalid
    /// arguments return [`PrepareError`](attic_core::PluginError::PrepareError)
    /// and leave the previous configuration and memory untouched.
    pub fn prepare(
        &mut self,
        sample_rate: f64,
        max_block_size: usize,
        num_channels: usize,
    ) -> PluginResult<()> {
        AudioSetup::new(sample_rate, max_block_size, num_channels).validate()?;

        self.sample_rate = sample_rate;
        self.state.clear();
        self.state.resize(num_channels, [0.0; 5]);

        self.pole.set_sample_rate(sample_rate);
        self.pole
            .reset(pole_coefficient(self.controls.cutoff_hz() as f64, sample_rate));
        self.resonance.set_sample_rate(sample_rate);
        self.resonance.reset(self.controls.resonance() as f64);
        Ok(())
    }

    /// Zero the stage memory of every channel.
    pub fn reset(&mut self) {
        self.state.fill([0.0; 5]);
    }

    /// Returns true once [`prepare`](Self::prepare) has succeeded.
    pub fn is_prepared(&self) -> bool {
        !self.state.is_empty()
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn num_channels(&self) -> usize {
        self.state.len()
    }

    /// Stage memory `[a, s1, s2, s3, s4]` of one channel.
    pub fn stage_memory(&self, channel: usize) -> Option<&[f64; 5]> {
        self.state.get(channel)
    }

    /// Filter the output channels of `buffer` in place.
    ///
    /// Drive and mode are read once at block start; cutoff and resonance
    /// ramp toward their latest values sample by sample. Output channels
    /// beyond the prepared channel count are left as they are.
    pub fn process<S: Sample>(&mut self, buffer: &mut Buffer<S>) {
        if self.state.is_empty() {
            return;
        }

        let controls = &self.controls;
        let taps = Taps::for_mode(controls.mode());
        let saturation = Saturation::new(controls.drive() as f64);
        self.pole
            .set_target(pole_coefficient(controls.cutoff_hz() as f64, self.sample_rate));
        self.resonance.set_target(controls.resonance() as f64);

        let num_samples = buffer.num_samples();
        let num_channels = buffer.num_output_channels().min(self.state.len());

        for i in 0..num_samples {
            let a1 = self.pole.next();
            let k = 4.0 * (0.1 + 0.9 * self.resonance.next());

            for (ch, memory) in self.state[..num_channels].iter_mut().enumerate() {
                if let Some(output) = buffer.output(ch) {
                    let x = output[i].to_f64();
                    output[i] = S::from_f64(tick(memory, x, a1, k, &saturation, &taps));
                }
            }
        }
    }
}
