//! Common types used throughout the plugin core.

/// Maximum number of audio channels per block.
///
/// Set to 32 to leave headroom for immersive layouts. Channels beyond this
/// limit are ignored when a [`Buffer`](crate::Buffer) is built.
pub const MAX_CHANNELS: usize = 32;

/// Parameter identifier.
///
/// Parameters are addressed by stable string ids (e.g. `"cutoff"`). The same
/// ids are used as keys in the persisted state document.
pub type ParameterId = &'static str;

/// Parameter value in plain units (Hz, ratio, choice index, ...).
pub type ParameterValue = f64;
