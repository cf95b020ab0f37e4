//! Attic - a resonant multi-mode ladder filter plugin.
//!
//! Four parameters (cutoff, resonance, drive, filter type) drive a
//! four-stage ladder filter with low-, high- and band-pass responses at
//! 12 and 24 dB/oct.
//!
//! The host shell talks to [`FilterProcessor`] through
//! [`AudioProcessor`](attic_core::AudioProcessor). Parameter changes from
//! the editor, automation or a state restore go through the shared
//! [`ParameterStore`](attic_core::ParameterStore); a [`FilterBinding`]
//! forwards each change into lock-free [`FilterControls`] that the
//! [`LadderFilter`] reads once per block.
//!
//! ```
//! use attic::{FilterProcessor, MODE};
//! use attic_core::{AudioProcessor, AudioSetup, Buffer};
//!
//! let mut processor = FilterProcessor::new().unwrap();
//! processor.prepare(&AudioSetup::stereo(48000.0, 256)).unwrap();
//! processor.parameters().set(MODE, 3.0).unwrap();
//!
//! let input = [0.1f32; 256];
//! let mut output = [0.0f32; 256];
//! let mut buffer = Buffer::new([&input[..]], [&mut output[..]], 256);
//! processor.on_block(&mut buffer);
//! ```

use attic_core::PluginConfig;

pub mod binding;
pub mod ladder;
pub mod params;
pub mod processor;

pub use binding::FilterBinding;
pub use ladder::{FilterControls, LadderFilter};
pub use params::{FilterMode, CUTOFF, DRIVE, MODE, RESONANCE};
pub use processor::FilterProcessor;

/// Static plugin configuration
pub static CONFIG: PluginConfig = PluginConfig::new("Attic")
    .with_vendor("Attic Audio")
    .with_version(env!("CARGO_PKG_VERSION"))
    .with_category("Fx|Filter")
    .with_sub_categories("Filter")
    .with_editor();
