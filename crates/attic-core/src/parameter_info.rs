//! Parameter metadata types.
//!
//! [`ParameterInfo`] is the complete description of one parameter: id,
//! name, range, default, units and display formatter.
//!
//! Values are always held in plain units. The normalized 0.0-1.0 view that
//! hosts expect is derived from the declared range with a linear mapping.

use crate::parameter_format::Formatter;
use crate::types::{ParameterId, ParameterValue};

/// Metadata describing a single parameter.
#[derive(Debug, Clone)]
pub struct ParameterInfo {
    /// Unique parameter identifier, also the key in persisted state.
    pub id: ParameterId,
    /// Display name (e.g., "Filter Type").
    pub name: &'static str,
    /// Unit label (e.g., "Hz").
    pub units: &'static str,
    /// Lower bound in plain units.
    pub min: ParameterValue,
    /// Upper bound in plain units.
    pub max: ParameterValue,
    /// Default value in plain units.
    pub default: ParameterValue,
    /// Number of discrete steps. 0 = continuous, N > 0 = N + 1 integer values.
    pub step_count: u32,
    /// Display formatter. Choice parameters carry their labels here.
    pub formatter: Formatter,
}

impl ParameterInfo {
    /// Create a continuous parameter with linear range and float formatting.
    ///
    /// The range endpoints are ordered and the default is clamped into it.
    pub fn new(id: ParameterId, name: &'static str, min: f64, max: f64, default: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            id,
            name,
            units: "",
            min,
            max,
            default: default.clamp(min, max),
            step_count: 0,
            formatter: Formatter::default(),
        }
    }

    /// Create a frequency parameter displayed in Hz/kHz.
    pub fn frequency(id: ParameterId, name: &'static str, min: f64, max: f64, default: f64) -> Self {
        let info = Self::new(id, name, min, max, default);
        Self {
            units: Formatter::Frequency.units(),
            formatter: Formatter::Frequency,
            ..info
        }
    }

    /// Create a choice parameter whose plain value is an index into `labels`.
    pub fn choice(
        id: ParameterId,
        name: &'static str,
        labels: &'static [&'static str],
        default_index: usize,
    ) -> Self {
        let max = labels.len().saturating_sub(1);
        let info = Self::new(id, name, 0.0, max as f64, default_index.min(max) as f64);
        Self {
            step_count: max as u32,
            formatter: Formatter::Choice { labels },
            ..info
        }
    }

    /// Returns true for parameters restricted to integer values.
    #[inline]
    pub fn is_discrete(&self) -> bool {
        self.step_count > 0
    }

    /// Clamp a plain value into range, rounding discrete parameters.
    #[inline]
    pub fn clamp(&self, value: ParameterValue) -> ParameterValue {
        let value = if self.is_discrete() { value.round() } else { value };
        value.clamp(self.min, self.max)
    }

    /// Convert a plain value to normalized (0.0-1.0).
    pub fn normalize(&self, plain: ParameterValue) -> ParameterValue {
        if (self.max - self.min).abs() < f64::EPSILON {
            return 0.5;
        }
        ((plain - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Convert a normalized value (0.0-1.0) to plain.
    pub fn denormalize(&self, normalized: ParameterValue) -> ParameterValue {
        let normalized = normalized.clamp(0.0, 1.0);
        self.clamp(self.min + normalized * (self.max - self.min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_orders_range_and_clamps_default() {
        let info = ParameterInfo::new("drive", "Drive", 25.0, 1.0, 40.0);
        assert_eq!(info.min, 1.0);
        assert_eq!(info.max, 25.0);
        assert_eq!(info.default, 25.0);
        assert!(!info.is_discrete());
    }

    #[test]
    fn test_choice_is_discrete_list() {
        let info = ParameterInfo::choice("mode", "Mode", &["A", "B", "C"], 1);
        assert_eq!(info.step_count, 2);
        assert_eq!(info.max, 2.0);
        assert_eq!(info.default, 1.0);
        assert!(matches!(info.formatter, Formatter::Choice { .. }));
        assert_eq!(info.clamp(1.4), 1.0);
        assert_eq!(info.clamp(1.6), 2.0);
        assert_eq!(info.clamp(-4.0), 0.0);
    }

    #[test]
    fn test_normalize_round_trip() {
        let info = ParameterInfo::frequency("cutoff", "Cutoff", 20.0, 20000.0, 1000.0);
        assert_eq!(info.units, "Hz");
        let n = info.normalize(10010.0);
        assert!((n - 0.5).abs() < 1e-12);
        assert!((info.denormalize(n) - 10010.0).abs() < 1e-9);
        assert_eq!(info.denormalize(2.0), 20000.0);
    }
}
