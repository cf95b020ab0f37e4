//! Parameter value formatting and parsing.
//!
//! [`Formatter`] converts plain parameter values to display strings for the
//! host's automation lanes and the editor, and parses typed-in text back.
//!
//! # Example
//!
//! ```
//! use attic_core::Formatter;
//!
//! let hz = Formatter::Frequency;
//! assert_eq!(hz.format(440.0), "440 Hz");
//! assert_eq!(hz.format(1500.0), "1.50 kHz");
//! assert_eq!(hz.parse("2 kHz"), Some(2000.0));
//! ```

/// Parameter value formatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Formatter {
    /// Generic float with configurable precision (e.g., "1.23").
    Float {
        /// Number of decimal places.
        precision: usize,
    },

    /// Frequency formatter with automatic Hz/kHz scaling.
    ///
    /// Display: "440 Hz", "1.50 kHz"
    Frequency,

    /// Named choices indexed by the (integer) plain value.
    ///
    /// Display: the label at the rounded index.
    Choice {
        /// Labels in index order.
        labels: &'static [&'static str],
    },
}

impl Formatter {
    /// Format a plain value to a display string.
    pub fn format(&self, value: f64) -> String {
        match self {
            Formatter::Float { precision } => {
                format!("{:.prec$}", value, prec = *precision)
            }

            Formatter::Frequency => {
                if value >= 1000.0 {
                    format!("{:.2} kHz", value / 1000.0)
                } else if value >= 100.0 {
                    format!("{:.0} Hz", value)
                } else {
                    format!("{:.1} Hz", value)
                }
            }

            Formatter::Choice { labels } => {
                if labels.is_empty() {
                    return String::new();
                }
                let index = value.round().clamp(0.0, (labels.len() - 1) as f64) as usize;
                labels[index].to_string()
            }
        }
    }

    /// Parse a display string to a plain value.
    ///
    /// Returns `None` if the string cannot be parsed.
    pub fn parse(&self, s: &str) -> Option<f64> {
        let s = s.trim();

        match self {
            Formatter::Float { .. } => s.parse().ok(),

            Formatter::Frequency => {
                if let Some(khz_str) = s
                    .strip_suffix(" kHz")
                    .or_else(|| s.strip_suffix("kHz"))
                    .or_else(|| s.strip_suffix(" khz"))
                    .or_else(|| s.strip_suffix("khz"))
                {
                    return khz_str.trim().parse::<f64>().ok().map(|v| v * 1000.0);
                }

                let hz_str = s
                    .trim_end_matches(" Hz")
                    .trim_end_matches("Hz")
                    .trim_end_matches(" hz")
                    .trim_end_matches("hz")
                    .trim();

                hz_str.parse().ok()
            }

            Formatter::Choice { labels } => {
                if let Some(index) = labels.iter().position(|label| label.eq_ignore_ascii_case(s)) {
                    return Some(index as f64);
                }
                // Bare index, e.g. typed by hand into an automation lane
                let index: usize = s.parse().ok()?;
                (index < labels.len()).then_some(index as f64)
            }
        }
    }

    /// Unit string for this formatter.
    pub fn units(&self) -> &'static str {
        match self {
            Formatter::Float { .. } => "",
            Formatter::Frequency => "Hz",
            Formatter::Choice { .. } => "",
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::Float { precision: 2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: &[&str] = &["LPF12", "LPF24", "HPF12"];

    #[test]
    fn test_frequency_format() {
        assert_eq!(Formatter::Frequency.format(20.0), "20.0 Hz");
        assert_eq!(Formatter::Frequency.format(20000.0), "20.00 kHz");
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!(Formatter::Frequency.parse("440 Hz"), Some(440.0));
        assert_eq!(Formatter::Frequency.parse("1.5kHz"), Some(1500.0));
        assert_eq!(Formatter::Frequency.parse("loud"), None);
    }

    #[test]
    fn test_choice_format_clamps_index() {
        let f = Formatter::Choice { labels: MODES };
        assert_eq!(f.format(1.0), "LPF24");
        assert_eq!(f.format(1.6), "HPF12");
        assert_eq!(f.format(-3.0), "LPF12");
        assert_eq!(f.format(99.0), "HPF12");
    }

    #[test]
    fn test_choice_parse() {
        let f = Formatter::Choice { labels: MODES };
        assert_eq!(f.parse("hpf12"), Some(2.0));
        assert_eq!(f.parse("1"), Some(1.0));
        assert_eq!(f.parse("3"), None);
        assert_eq!(f.parse("BPF24"), None);
    }

    #[test]
    fn test_float_round_trip() {
        let f = Formatter::Float { precision: 2 };
        assert_eq!(f.format(0.15), "0.15");
        assert_eq!(f.parse(" 0.15 "), Some(0.15));
    }
}
