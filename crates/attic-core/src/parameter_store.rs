//! Named, range-bounded parameter store with change notification.
//!
//! The [`ParameterStore`] is the single source of truth for plugin parameter
//! values. The host shell, the editor and state restore all go through it;
//! DSP code never reads it directly. Instead a [`ParameterListener`] is
//! registered that forwards each change to wherever the audio thread can
//! pick it up without locking.
//!
//! # Thread Safety
//!
//! Values are stored in atomics (`AtomicU64` with `to_bits`/`from_bits`), so
//! [`get`](ParameterStore::get) is lock-free. [`set`](ParameterStore::set) is
//! a control-rate operation: it holds a per-parameter lock while storing the
//! value and notifying listeners, so that updates to one id reach listeners
//! in the same order they were stored. Never call `set` from the audio
//! thread.
//!
//! # Persisted State
//!
//! [`serialize`](ParameterStore::serialize) writes a JSON document:
//!
//! ```text
//! { "tag": "PARAMETERS", "version": 1,
//!   "parameters": { "cutoff": 20000.0, "mode": 0 } }
//! ```
//!
//! Discrete parameters are written as integers, continuous ones as floats.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PluginError, PluginResult};
use crate::parameter_info::ParameterInfo;
use crate::types::{ParameterId, ParameterValue};

/// Root tag of the persisted state document.
pub const STATE_ROOT_TAG: &str = "PARAMETERS";

/// Newest state document version this store understands.
pub const STATE_VERSION: u32 = 1;

/// Receives parameter change notifications from a [`ParameterStore`].
///
/// Called synchronously on the thread that changed the value. Implementations
/// must not call `set` for the id they are being notified about.
pub trait ParameterListener: Send + Sync {
    /// A parameter's value changed to `value` (plain units, already clamped).
    fn on_parameter_changed(&self, id: ParameterId, value: ParameterValue);
}

impl<F> ParameterListener for F
where
    F: Fn(ParameterId, ParameterValue) + Send + Sync,
{
    fn on_parameter_changed(&self, id: ParameterId, value: ParameterValue) {
        self(id, value)
    }
}

/// One declared parameter and its current value.
struct Parameter {
    info: ParameterInfo,
    /// Plain value, stored as `f64` bits.
    value: AtomicU64,
    /// Serializes store + notify for this id.
    write_lock: Mutex<()>,
}

impl Parameter {
    fn new(info: ParameterInfo) -> Self {
        Self {
            value: AtomicU64::new(info.default.to_bits()),
            info,
            write_lock: Mutex::new(()),
        }
    }

    #[inline]
    fn get(&self) -> ParameterValue {
        f64::from_bits(self.value.load(Ordering::Relaxed))
    }
}

/// Serialized form of the store.
#[derive(Debug, Serialize, Deserialize)]
struct StateDocument {
    tag: String,
    version: u32,
    parameters: Map<String, Value>,
}

/// Parameter collection with listener notification and JSON persistence.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use attic_core::{ParameterInfo, ParameterStore};
///
/// let mut store = ParameterStore::new();
/// store.declare(ParameterInfo::new("drive", "Drive", 1.0, 25.0, 1.0)).unwrap();
/// store.add_listener(Arc::new(|id: &'static str, value: f64| {
///     println!("{id} -> {value}");
/// }));
///
/// store.set("drive", 40.0).unwrap();
/// assert_eq!(store.get("drive").unwrap(), 25.0);
/// ```
pub struct ParameterStore {
    parameters: Vec<Parameter>,
    listeners: RwLock<Vec<Arc<dyn ParameterListener>>>,
}

impl ParameterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            parameters: Vec::new(),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Declare a parameter, initialized to its default value.
    ///
    /// Declaration happens once at construction, before the store is shared.
    pub fn declare(&mut self, info: ParameterInfo) -> PluginResult<()> {
        if self.index_of(info.id).is_some() {
            return Err(PluginError::DuplicateParameterId(info.id.to_string()));
        }
        self.parameters.push(Parameter::new(info));
        Ok(())
    }

    /// Register a listener. It is notified of every subsequent change.
    pub fn add_listener(&self, listener: Arc<dyn ParameterListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    // =========================================================================
    // Enumeration
    // =========================================================================

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns true if no parameters are declared.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Parameter info by declaration index.
    pub fn info(&self, index: usize) -> Option<&ParameterInfo> {
        self.parameters.get(index).map(|p| &p.info)
    }

    /// Parameter info by id.
    pub fn info_by_id(&self, id: &str) -> Option<&ParameterInfo> {
        self.index_of(id).map(|index| &self.parameters[index].info)
    }

    /// Iterate over parameter infos in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterInfo> + '_ {
        self.parameters.iter().map(|p| &p.info)
    }

    // =========================================================================
    // Value Access
    // =========================================================================

    /// Current plain value of a parameter.
    pub fn get(&self, id: &str) -> PluginResult<ParameterValue> {
        Ok(self.parameter(id)?.get())
    }

    /// Set a parameter's plain value.
    ///
    /// The value is clamped to the declared range (and rounded for discrete
    /// parameters). Listeners are notified only if the stored value actually
    /// changed. Non-finite values are ignored.
    pub fn set(&self, id: &str, value: ParameterValue) -> PluginResult<()> {
        let index = self
            .index_of(id)
            .ok_or_else(|| PluginError::InvalidParameterId(id.to_string()))?;
        self.set_index(index, value);
        Ok(())
    }

    /// Current value in normalized form (0.0-1.0).
    pub fn get_normalized(&self, id: &str) -> PluginResult<ParameterValue> {
        let parameter = self.parameter(id)?;
        Ok(parameter.info.normalize(parameter.get()))
    }

    /// Set a parameter from a normalized value (0.0-1.0).
    pub fn set_normalized(&self, id: &str, normalized: ParameterValue) -> PluginResult<()> {
        let index = self
            .index_of(id)
            .ok_or_else(|| PluginError::InvalidParameterId(id.to_string()))?;
        let plain = self.parameters[index].info.denormalize(normalized);
        self.set_index(index, plain);
        Ok(())
    }

    /// Format the current value for display.
    pub fn display(&self, id: &str) -> PluginResult<String> {
        let parameter = self.parameter(id)?;
        Ok(parameter.info.formatter.format(parameter.get()))
    }

    /// Parse display text to a plain value for this parameter.
    ///
    /// Returns `Ok(None)` when the text cannot be parsed.
    pub fn parse(&self, id: &str, text: &str) -> PluginResult<Option<ParameterValue>> {
        let parameter = self.parameter(id)?;
        Ok(parameter
            .info
            .formatter
            .parse(text)
            .map(|value| parameter.info.clamp(value)))
    }

    /// Re-publish every current value to all listeners.
    ///
    /// Used after a state restore so listeners end up consistent with the
    /// store even for values that did not change.
    pub fn notify_all(&self) {
        for parameter in &self.parameters {
            let _guard = parameter
                .write_lock
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            self.notify(parameter.info.id, parameter.get());
        }
    }

    // =========================================================================
    // State Serialization
    // =========================================================================

    /// Serialize all parameter values to a JSON state document.
    pub fn serialize(&self) -> PluginResult<Vec<u8>> {
        let parameters = self
            .parameters
            .iter()
            .map(|p| {
                let value = p.get();
                let json = if p.info.is_discrete() {
                    Value::from(value as i64)
                } else {
                    Value::from(value)
                };
                (p.info.id.to_string(), json)
            })
            .collect();

        let document = StateDocument {
            tag: STATE_ROOT_TAG.to_string(),
            version: STATE_VERSION,
            parameters,
        };

        serde_json::to_vec(&document)
            .map_err(|e| PluginError::StateFormatMismatch(format!("failed to encode state: {}", e)))
    }

    /// Restore parameter values from a JSON state document.
    ///
    /// The whole document is validated before anything is applied: a wrong
    /// root tag, an unsupported version, unparseable JSON, or a known id
    /// bound to a non-numeric value all return
    /// [`PluginError::StateFormatMismatch`] with every value left as it was.
    /// Unknown ids are ignored and missing ids keep their current value.
    /// An empty slice means no stored state and changes nothing.
    pub fn deserialize(&self, data: &[u8]) -> PluginResult<()> {
        if data.is_empty() {
            log::debug!("No stored state to restore");
            return Ok(());
        }

        let document: StateDocument = serde_json::from_slice(data)
            .map_err(|e| PluginError::StateFormatMismatch(format!("unreadable document: {}", e)))?;

        if document.tag != STATE_ROOT_TAG {
            return Err(PluginError::StateFormatMismatch(format!(
                "expected root tag '{}', found '{}'",
                STATE_ROOT_TAG, document.tag
            )));
        }
        if document.version > STATE_VERSION {
            return Err(PluginError::StateFormatMismatch(format!(
                "unsupported state version {}",
                document.version
            )));
        }

        let mut restored = Vec::with_capacity(document.parameters.len());
        for (key, json) in &document.parameters {
            let Some(index) = self.index_of(key) else {
                log::debug!("Ignoring unknown parameter '{}' in stored state", key);
                continue;
            };
            let value = json
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    PluginError::StateFormatMismatch(format!(
                        "parameter '{}' has non-numeric value {}",
                        key, json
                    ))
                })?;
            restored.push((index, value));
        }

        for (index, value) in restored {
            self.set_index(index, value);
        }
        log::debug!("Restored parameter state");
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn index_of(&self, id: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.info.id == id)
    }

    fn parameter(&self, id: &str) -> PluginResult<&Parameter> {
        self.index_of(id)
            .map(|index| &self.parameters[index])
            .ok_or_else(|| PluginError::InvalidParameterId(id.to_string()))
    }

    fn set_index(&self, index: usize, value: ParameterValue) {
        let parameter = &self.parameters[index];
        let info = &parameter.info;

        if !value.is_finite() {
            log::warn!("Ignoring non-finite value for parameter '{}'", info.id);
            return;
        }

        let clamped = info.clamp(value);
        if clamped != value && (value < info.min || value > info.max) {
            log::debug!(
                "{}; clamped to {}",
                PluginError::ParameterOutOfRange {
                    id: info.id.to_string(),
                    value,
                },
                clamped
            );
        }

        let _guard = parameter
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if parameter.get() == clamped {
            return;
        }
        parameter.value.store(clamped.to_bits(), Ordering::Relaxed);
        self.notify(info.id, clamped);
    }

    fn notify(&self, id: ParameterId, value: ParameterValue) {
        // Snapshot so a listener may register further listeners.
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in &listeners {
            listener.on_parameter_changed(id, value);
        }
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const MODES: &[&str] = &["LPF12", "LPF24", "HPF12", "HPF24", "BPF12", "BPF24"];

    fn store() -> ParameterStore {
        let mut store = ParameterStore::new();
        store
            .declare(ParameterInfo::frequency("cutoff", "Cutoff", 20.0, 20000.0, 20000.0))
            .unwrap();
        store
            .declare(ParameterInfo::new("resonance", "Resonance", 0.0, 1.2, 0.15))
            .unwrap();
        store
            .declare(ParameterInfo::new("drive", "Drive", 1.0, 25.0, 1.0))
            .unwrap();
        store
            .declare(ParameterInfo::choice("mode", "Filter Type", MODES, 0))
            .unwrap();
        store
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<(ParameterId, ParameterValue)>>,
    }

    impl ParameterListener for Recorder {
        fn on_parameter_changed(&self, id: ParameterId, value: ParameterValue) {
            self.events.lock().unwrap().push((id, value));
        }
    }

    fn values(store: &ParameterStore) -> Vec<f64> {
        store.iter().map(|info| store.get(info.id).unwrap()).collect()
    }

    #[test]
    fn test_defaults() {
        let store = store();
        assert_eq!(store.len(), 4);
        assert_eq!(values(&store), vec![20000.0, 0.15, 1.0, 0.0]);
    }

    #[test]
    fn test_duplicate_declare_rejected() {
        let mut store = store();
        let err = store
            .declare(ParameterInfo::new("drive", "Drive", 0.0, 1.0, 0.0))
            .unwrap_err();
        assert_eq!(err, PluginError::DuplicateParameterId("drive".into()));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_set_get_clamps() {
        let store = store();
        let cases = [
            ("cutoff", 5.0, 20.0),
            ("cutoff", 1234.5, 1234.5),
            ("cutoff", 1e9, 20000.0),
            ("resonance", 1.5, 1.2),
            ("resonance", -1.0, 0.0),
            ("drive", 0.0, 1.0),
            ("drive", 12.25, 12.25),
            ("mode", 2.4, 2.0),
            ("mode", 9.0, 5.0),
            ("mode", -2.0, 0.0),
        ];
        for (id, value, expected) in cases {
            store.set(id, value).unwrap();
            assert_eq!(store.get(id).unwrap(), expected, "{id} <- {value}");
        }
    }

    #[test]
    fn test_unknown_id() {
        let store = store();
        let recorder = Arc::new(Recorder::default());
        store.add_listener(recorder.clone());

        let err = store.set("cutOff", 100.0).unwrap_err();
        assert_eq!(err, PluginError::InvalidParameterId("cutOff".into()));
        assert!(store.get("cutOff").is_err());
        assert_eq!(values(&store), vec![20000.0, 0.15, 1.0, 0.0]);
        assert!(recorder.events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_listener_only_notified_on_change() {
        let store = store();
        let recorder = Arc::new(Recorder::default());
        store.add_listener(recorder.clone());

        store.set("drive", 5.0).unwrap();
        store.set("drive", 5.0).unwrap();
        store.set("drive", 30.0).unwrap();
        store.set("drive", 25.0).unwrap();
        store.set("mode", 3.2).unwrap();

        let events = recorder.events.lock().unwrap();
        assert_eq!(*events, vec![("drive", 5.0), ("drive", 25.0), ("mode", 3.0)]);
    }

    #[test]
    fn test_non_finite_ignored() {
        let store = store();
        store.set("resonance", f64::NAN).unwrap();
        store.set("resonance", f64::INFINITY).unwrap();
        assert_eq!(store.get("resonance").unwrap(), 0.15);
    }

    #[test]
    fn test_closure_listener() {
        let store = store();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.add_listener(Arc::new(move |id: ParameterId, value: ParameterValue| {
            sink.lock().unwrap().push((id, value));
        }));

        store.set("cutoff", 440.0).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![("cutoff", 440.0)]);
    }

    #[test]
    fn test_notify_all_publishes_every_value() {
        let store = store();
        let recorder = Arc::new(Recorder::default());
        store.add_listener(recorder.clone());

        store.notify_all();
        let events = recorder.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![("cutoff", 20000.0), ("resonance", 0.15), ("drive", 1.0), ("mode", 0.0)]
        );
    }

    #[test]
    fn test_normalized_access() {
        let store = store();
        store.set_normalized("mode", 1.0).unwrap();
        assert_eq!(store.get("mode").unwrap(), 5.0);
        store.set_normalized("mode", 0.5).unwrap();
        assert_eq!(store.get("mode").unwrap(), 3.0);
        store.set("drive", 13.0).unwrap();
        assert!((store.get_normalized("drive").unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_display_and_parse() {
        let store = store();
        assert_eq!(store.display("cutoff").unwrap(), "20.00 kHz");
        assert_eq!(store.display("mode").unwrap(), "LPF12");
        assert_eq!(store.parse("mode", "bpf24").unwrap(), Some(5.0));
        assert_eq!(store.parse("cutoff", "50 kHz").unwrap(), Some(20000.0));
        assert_eq!(store.parse("drive", "lots").unwrap(), None);
        assert!(store.parse("gain", "1").is_err());
    }

    #[test]
    fn test_state_round_trip() {
        let source = store();
        source.set("cutoff", 1234.567).unwrap();
        source.set("resonance", 0.987654321).unwrap();
        source.set("drive", 7.125).unwrap();
        source.set("mode", 4.0).unwrap();
        let data = source.serialize().unwrap();

        let target = store();
        target.deserialize(&data).unwrap();
        assert_eq!(values(&target), values(&source));
    }

    #[test]
    fn test_state_document_shape() {
        let store = store();
        store.set("mode", 3.0).unwrap();
        let data = store.serialize().unwrap();
        let json: Value = serde_json::from_slice(&data).unwrap();

        assert_eq!(json["tag"], STATE_ROOT_TAG);
        assert_eq!(json["version"], STATE_VERSION);
        assert_eq!(json["parameters"]["mode"], Value::from(3));
        assert!(json["parameters"]["mode"].is_i64());
        assert!(json["parameters"]["cutoff"].is_f64());
    }

    #[test]
    fn test_deserialize_rejects_foreign_documents() {
        let store = store();
        store.set("drive", 3.0).unwrap();
        let before = values(&store);

        let documents: [&[u8]; 6] = [
            b"not json at all",
            br#"{"tag":"PRESETS","version":1,"parameters":{"drive":9.0}}"#,
            br#"{"version":1,"parameters":{"drive":9.0}}"#,
            br#"{"tag":"PARAMETERS","version":99,"parameters":{"drive":9.0}}"#,
            br#"{"tag":"PARAMETERS","version":1,"parameters":{"cutoff":500.0,"drive":"loud"}}"#,
            br#"[1, 2, 3]"#,
        ];
        for document in documents {
            let err = store.deserialize(document).unwrap_err();
            assert!(matches!(err, PluginError::StateFormatMismatch(_)), "{err}");
            assert_eq!(values(&store), before);
        }
    }

    #[test]
    fn test_deserialize_partial_and_unknown_ids() {
        let store = store();
        store.set("drive", 3.0).unwrap();

        store
            .deserialize(br#"{"tag":"PARAMETERS","version":1,"parameters":{"cutoff":800.0,"gain":0.5,"mode":9}}"#)
            .unwrap();
        assert_eq!(values(&store), vec![800.0, 0.15, 3.0, 5.0]);
    }

    #[test]
    fn test_deserialize_empty_is_noop() {
        let store = store();
        store.set("cutoff", 300.0).unwrap();
        store.deserialize(&[]).unwrap();
        assert_eq!(store.get("cutoff").unwrap(), 300.0);
    }
}
