//! Parameter layout for the ladder filter.
//!
//! Four parameters drive the plugin: cutoff, resonance, drive and the filter
//! type. Their ids double as keys in the persisted state document.

use attic_core::{ParameterInfo, ParameterStore, PluginResult};

// =============================================================================
// Parameter Ids
// =============================================================================

/// Cutoff frequency in Hz.
pub const CUTOFF: &str = "cutoff";
/// Resonance (feedback amount), 0 to 1.2.
pub const RESONANCE: &str = "resonance";
/// Input drive, 1 to 25.
pub const DRIVE: &str = "drive";
/// Filter type, an index into [`FilterMode::ALL`].
pub const MODE: &str = "mode";

// =============================================================================
// Ranges
// =============================================================================

pub const CUTOFF_MIN_HZ: f64 = 20.0;
pub const CUTOFF_MAX_HZ: f64 = 20000.0;
pub const CUTOFF_DEFAULT_HZ: f64 = 20000.0;

pub const RESONANCE_MIN: f64 = 0.0;
pub const RESONANCE_MAX: f64 = 1.2;
pub const RESONANCE_DEFAULT: f64 = 0.15;

pub const DRIVE_MIN: f64 = 1.0;
pub const DRIVE_MAX: f64 = 25.0;
pub const DRIVE_DEFAULT: f64 = 1.0;

// =============================================================================
// Filter Mode
// =============================================================================

/// Filter response: low-, high- or band-pass at 12 or 24 dB/oct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum FilterMode {
    #[default]
    Lpf12 = 0,
    Lpf24 = 1,
    Hpf12 = 2,
    Hpf24 = 3,
    Bpf12 = 4,
    Bpf24 = 5,
}

impl FilterMode {
    /// Every mode, in parameter index order.
    pub const ALL: [FilterMode; 6] = [
        FilterMode::Lpf12,
        FilterMode::Lpf24,
        FilterMode::Hpf12,
        FilterMode::Hpf24,
        FilterMode::Bpf12,
        FilterMode::Bpf24,
    ];

    /// Display labels, in parameter index order.
    pub const LABELS: [&'static str; 6] = ["LPF12", "LPF24", "HPF12", "HPF24", "BPF12", "BPF24"];

    /// Mode for a parameter index, or `None` if out of range.
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parameter index of this mode.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display label.
    pub fn name(self) -> &'static str {
        Self::LABELS[self.index()]
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Declaration
// =============================================================================

/// Declare the filter's parameters on `store`, in host enumeration order.
pub fn declare_parameters(store: &mut ParameterStore) -> PluginResult<()> {
    store.declare(ParameterInfo::frequency(
        CUTOFF,
        "Cutoff",
        CUTOFF_MIN_HZ,
        CUTOFF_MAX_HZ,
        CUTOFF_DEFAULT_HZ,
    ))?;
    store.declare(ParameterInfo::new(
        RESONANCE,
        "Resonance",
        RESONANCE_MIN,
        RESONANCE_MAX,
        RESONANCE_DEFAULT,
    ))?;
    store.declare(ParameterInfo::new(DRIVE, "Drive", DRIVE_MIN, DRIVE_MAX, DRIVE_DEFAULT))?;
    store.declare(ParameterInfo::choice(
        MODE,
        "Filter Type",
        &FilterMode::LABELS,
        FilterMode::default().index(),
    ))?;
    Ok(())
}
