//! Routes parameter store changes into the filter controls.

use std::sync::Arc;

use attic_core::{ParameterId, ParameterListener, ParameterStore, ParameterValue, PluginError};

use crate::ladder::FilterControls;
use crate::params::{FilterMode, CUTOFF, DRIVE, MODE, RESONANCE};

/// Listener that forwards each parameter change to the matching
/// [`FilterControls`] setter.
///
/// One notification becomes one atomic store, so the order in which the
/// store publishes updates for an id is the order the engine sees them.
pub struct FilterBinding {
    controls: Arc<FilterControls>,
}

impl FilterBinding {
    pub fn new(controls: Arc<FilterControls>) -> Self {
        Self { controls }
    }

    /// Create a binding and register it on `store`.
    ///
    /// A single registration covers all four filter ids: the listener
    /// dispatches on the id it is handed, which behaves the same as one
    /// listener per id and keeps each id's updates in store order.
    pub fn attach(store: &ParameterStore, controls: Arc<FilterControls>) -> Arc<Self> {
        let binding = Arc::new(Self::new(controls));
        store.add_listener(binding.clone());
        binding
    }

    pub fn controls(&self) -> &Arc<FilterControls> {
        &self.controls
    }
}

/// Map a mode parameter value to a mode, clamping out-of-range indices.
fn mode_for_value(value: ParameterValue) -> FilterMode {
    let last = FilterMode::ALL.len() - 1;
    let rounded = value.round();
    // NaN lands on the first mode
    let index = if rounded >= last as f64 {
        last
    } else if rounded > 0.0 {
        rounded as usize
    } else {
        0
    };

    if rounded < 0.0 || rounded > last as f64 || value.is_nan() {
        log::warn!(
            "{}; using {}",
            PluginError::ParameterOutOfRange {
                id: MODE.to_string(),
                value,
            },
            FilterMode::ALL[index]
        );
    }
    FilterMode::ALL[index]
}

impl ParameterListener for FilterBinding {
    fn on_parameter_changed(&self, id: ParameterId, value: ParameterValue) {
        match id {
            CUTOFF => self.controls.set_cutoff_hz(value as f32),
            RESONANCE => self.controls.set_resonance(value as f32),
            DRIVE => self.controls.set_drive(value as f32),
            MODE => self.controls.set_mode(mode_for_value(value)),
            _ => log::trace!("Ignoring change to unbound parameter '{}'", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::declare_parameters;

    fn bound() -> (ParameterStore, Arc<FilterControls>) {
        let mut store = ParameterStore::new();
        declare_parameters(&mut store).unwrap();
        let controls = Arc::new(FilterControls::new());
        FilterBinding::attach(&store, controls.clone());
        (store, controls)
    }

    #[test]
    fn test_store_changes_reach_controls() {
        let (store, controls) = bound();

        store.set(CUTOFF, 1200.0).unwrap();
        store.set(RESONANCE, 0.75).unwrap();
        store.set(DRIVE, 8.0).unwrap();
        store.set(MODE, 3.0).unwrap();

        assert_eq!(controls.cutoff_hz(), 1200.0);
        assert_eq!(controls.resonance(), 0.75);
        assert_eq!(controls.drive(), 8.0);
        assert_eq!(controls.mode(), FilterMode::Hpf24);
    }

    #[test]
    fn test_last_update_wins() {
        let (store, controls) = bound();
        for hz in [100.0, 5000.0, 250.0] {
            store.set(CUTOFF, hz).unwrap();
        }
        assert_eq!(controls.cutoff_hz(), 250.0);
    }

    #[test]
    fn test_out_of_range_modes_clamped() {
        let binding = FilterBinding::new(Arc::new(FilterControls::new()));
        let cases = [
            (-3.0, FilterMode::Lpf12),
            (0.4, FilterMode::Lpf12),
            (1.6, FilterMode::Hpf12),
            (5.0, FilterMode::Bpf24),
            (17.0, FilterMode::Bpf24),
            (f64::NAN, FilterMode::Lpf12),
        ];
        for (value, expected) in cases {
            binding.on_parameter_changed(MODE, value);
            assert_eq!(binding.controls().mode(), expected, "{value}");
        }
    }

    #[test]
    fn test_unknown_id_ignored() {
        let binding = FilterBinding::new(Arc::new(FilterControls::new()));
        binding.on_parameter_changed("gain", 0.5);
        let controls = binding.controls();
        assert_eq!(controls.cutoff_hz(), 20000.0);
        assert_eq!(controls.resonance(), 0.15);
        assert_eq!(controls.drive(), 1.0);
        assert_eq!(controls.mode(), FilterMode::Lpf12);
    }
}
