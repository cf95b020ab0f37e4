//! The filter plugin processor.
//!
//! [`FilterProcessor`] ties the pieces together: it owns the parameter
//! store, the ladder filter and the binding between them, and exposes them
//! to the host through [`AudioProcessor`].

use std::sync::Arc;

use attic_core::{
    AudioProcessor, AudioSetup, Buffer, ParameterStore, PluginConfig, PluginResult, Sample,
};

use crate::binding::FilterBinding;
use crate::ladder::{FilterControls, LadderFilter};
use crate::params::declare_parameters;
use crate::CONFIG;

/// Ladder filter processor.
pub struct FilterProcessor {
    /// Parameters, shared with the editor and host automation
    parameters: Arc<ParameterStore>,
    /// Audio half of the filter
    filter: LadderFilter,
}

impl FilterProcessor {
    /// Declare the parameters and wire them to a fresh filter.
    pub fn new() -> PluginResult<Self> {
        let mut parameters = ParameterStore::new();
        declare_parameters(&mut parameters)?;

        let controls = Arc::new(FilterControls::new());
        FilterBinding::attach(&parameters, controls.clone());
        parameters.notify_all();

        Ok(Self {
            parameters: Arc::new(parameters),
            filter: LadderFilter::new(controls),
        })
    }

    /// Control values the filter currently reads.
    pub fn controls(&self) -> &Arc<FilterControls> {
        self.filter.controls()
    }

    /// Returns true once [`prepare`](AudioProcessor::prepare) has succeeded.
    pub fn is_prepared(&self) -> bool {
        self.filter.is_prepared()
    }

    /// Generic processing implementation for both f32 and f64.
    fn process_generic<S: Sample>(&mut self, buffer: &mut Buffer<S>) {
        buffer.clear_unused_outputs();
        buffer.copy_to_output();
        self.filter.process(buffer);
    }
}

impl AudioProcessor for FilterProcessor {
    fn config(&self) -> &'static PluginConfig {
        &CONFIG
    }

    fn parameters(&self) -> &Arc<ParameterStore> {
        &self.parameters
    }

    fn prepare(&mut self, setup: &AudioSetup) -> PluginResult<()> {
        self.filter
            .prepare(setup.sample_rate, setup.max_buffer_size, setup.num_channels)
            .inspect_err(|e| log::warn!("{}", e))?;
        log::debug!(
            "Prepared at {} Hz, {} samples, {} channels",
            setup.sample_rate,
            setup.max_buffer_size,
            setup.num_channels
        );
        Ok(())
    }

    fn release_resources(&mut self) {
        self.filter.reset();
        log::debug!("Released filter resources");
    }

    fn on_block(&mut self, buffer: &mut Buffer<f32>) {
        self.process_generic(buffer);
    }

    fn supports_double_precision(&self) -> bool {
        true
    }

    fn on_block_f64(&mut self, buffer: &mut Buffer<f64>) {
        self.process_generic(buffer);
    }

    fn save_state(&self) -> PluginResult<Vec<u8>> {
        let data = self.parameters.serialize()?;
        log::debug!("Saved {} bytes of state", data.len());
        Ok(data)
    }

    fn load_state(&mut self, data: &[u8]) -> PluginResult<()> {
        self.parameters
            .deserialize(data)
            .inspect_err(|e| log::warn!("Rejected stored state: {}", e))?;
        self.parameters.notify_all();
        Ok(())
    }
}
