//! Core processor trait definitions.
//!
//! [`AudioProcessor`] is the narrow capability interface the host shell
//! drives: configure with [`prepare`](AudioProcessor::prepare), stream blocks
//! through [`on_block`](AudioProcessor::on_block), and persist parameters
//! with [`save_state`](AudioProcessor::save_state) /
//! [`load_state`](AudioProcessor::load_state). Parameter enumeration for
//! automation and editor binding goes through
//! [`parameters`](AudioProcessor::parameters).

use std::sync::Arc;

use crate::buffer::Buffer;
use crate::config::PluginConfig;
use crate::error::{PluginError, PluginResult};
use crate::parameter_store::ParameterStore;

/// Audio configuration handed to [`AudioProcessor::prepare`].
#[derive(Clone, Debug, PartialEq)]
pub struct AudioSetup {
    /// Sample rate in Hz (e.g., 44100.0, 48000.0, 96000.0)
    pub sample_rate: f64,
    /// Maximum number of samples per block
    pub max_buffer_size: usize,
    /// Number of channels that will be processed
    pub num_channels: usize,
}

impl AudioSetup {
    /// Create a new audio setup.
    pub const fn new(sample_rate: f64, max_buffer_size: usize, num_channels: usize) -> Self {
        Self {
            sample_rate,
            max_buffer_size,
            num_channels,
        }
    }

    /// Stereo setup at the given sample rate and block size.
    pub const fn stereo(sample_rate: f64, max_buffer_size: usize) -> Self {
        Self::new(sample_rate, max_buffer_size, 2)
    }

    /// Check that the configuration can be processed.
    ///
    /// Rejects non-positive or non-finite sample rates, a zero block size and
    /// a zero channel count.
    pub fn validate(&self) -> PluginResult<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(PluginError::PrepareError(format!(
                "invalid sample rate {}",
                self.sample_rate
            )));
        }
        if self.max_buffer_size == 0 {
            return Err(PluginError::PrepareError("max buffer size is zero".into()));
        }
        if self.num_channels == 0 {
            return Err(PluginError::PrepareError("channel count is zero".into()));
        }
        Ok(())
    }
}

/// Processor interface consumed by the host shell.
///
/// # Thread Safety
///
/// `on_block` is called on the audio thread and must be real-time safe:
/// - No allocations
/// - No locks
/// - No syscalls
///
/// `prepare` and `release_resources` take `&mut self`, so they can never run
/// concurrently with `on_block`.
pub trait AudioProcessor: Send {
    /// Static plugin metadata.
    fn config(&self) -> &'static PluginConfig;

    /// The parameter store, shared with the editor and host automation.
    fn parameters(&self) -> &Arc<ParameterStore>;

    /// (Re)configure for a sample rate, block size and channel count.
    ///
    /// On error the previous processing state is kept.
    fn prepare(&mut self, setup: &AudioSetup) -> PluginResult<()>;

    /// Called when the stream stops. Clears any audio history.
    fn release_resources(&mut self) {}

    /// Process one block of 32-bit audio.
    fn on_block(&mut self, buffer: &mut Buffer<f32>);

    /// Whether [`on_block_f64`](Self::on_block_f64) processes natively.
    fn supports_double_precision(&self) -> bool {
        false
    }

    /// Process one block of 64-bit audio.
    ///
    /// The default passes input straight through and silences extra outputs.
    fn on_block_f64(&mut self, buffer: &mut Buffer<f64>) {
        buffer.clear_unused_outputs();
        buffer.copy_to_output();
    }

    /// Serialize the processor state.
    fn save_state(&self) -> PluginResult<Vec<u8>>;

    /// Restore processor state produced by [`save_state`](Self::save_state).
    fn load_state(&mut self, data: &[u8]) -> PluginResult<()>;

    /// Tail length in samples after input stops.
    fn tail_samples(&self) -> u32 {
        0
    }

    /// Processing latency in samples.
    fn latency_samples(&self) -> u32 {
        0
    }
}
