//! # attic-core
//!
//! Core abstractions for the Attic ladder filter plugin.
//!
//! This crate provides the format-agnostic pieces a plugin is built from:
//! the parameter store with change notification and JSON persistence, block
//! buffers, control smoothing, and the processor capability trait the host
//! shell drives.
//!
//! ## Main Traits
//!
//! - [`AudioProcessor`] - Host-facing processor interface
//! - [`ParameterListener`] - Parameter change notification
//! - [`Sample`] - f32/f64 sample abstraction
//!
//! ## Types
//!
//! - [`ParameterStore`] - Declared parameters, values, listeners, persistence
//! - [`ParameterInfo`] - Parameter metadata
//! - [`Buffer`] - Audio block I/O
//! - [`AudioSetup`] - Sample rate, block size and channel count
//! - [`PluginConfig`] - Static plugin metadata
//! - [`PluginError`] - Error types

pub mod buffer;
pub mod config;
pub mod error;
pub mod parameter_format;
pub mod parameter_info;
pub mod parameter_store;
pub mod plugin;
pub mod sample;
pub mod smoothing;
pub mod types;

// Re-exports for convenience
pub use buffer::Buffer;
pub use config::PluginConfig;
pub use error::{PluginError, PluginResult};
pub use parameter_format::Formatter;
pub use parameter_info::ParameterInfo;
pub use parameter_store::{ParameterListener, ParameterStore, STATE_ROOT_TAG, STATE_VERSION};
pub use plugin::{AudioProcessor, AudioSetup};
pub use sample::Sample;
pub use smoothing::Smoother;
pub use types::{ParameterId, ParameterValue, MAX_CHANNELS};
