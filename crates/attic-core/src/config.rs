//! Static plugin metadata reported to the host shell.
//!
//! ```
//! use attic_core::PluginConfig;
//!
//! static CONFIG: PluginConfig = PluginConfig::new("Attic")
//!     .with_category("Fx|Filter")
//!     .with_editor();
//!
//! assert_eq!(CONFIG.category, "Fx|Filter");
//! assert!(CONFIG.has_editor);
//! ```

/// Name, vendor and classification of a plugin.
///
/// Built with `const` methods so a plugin can hold it in a `static`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    pub name: &'static str,
    pub vendor: &'static str,
    pub version: &'static str,
    /// Host category path, e.g. "Fx|Filter".
    pub category: &'static str,
    /// Extra pipe-separated tags for host browsers.
    pub sub_categories: &'static str,
    pub has_editor: bool,
}

impl PluginConfig {
    /// An effect with no editor, vendor or tags.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            vendor: "",
            version: "0.0.0",
            category: "Fx",
            sub_categories: "",
            has_editor: false,
        }
    }

    pub const fn with_vendor(self, vendor: &'static str) -> Self {
        Self { vendor, ..self }
    }

    pub const fn with_version(self, version: &'static str) -> Self {
        Self { version, ..self }
    }

    pub const fn with_category(self, category: &'static str) -> Self {
        Self { category, ..self }
    }

    pub const fn with_sub_categories(self, sub_categories: &'static str) -> Self {
        Self {
            sub_categories,
            ..self
        }
    }

    /// Report that an editor is available for this plugin.
    pub const fn with_editor(self) -> Self {
        Self {
            has_editor: true,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_earlier_fields() {
        let config = PluginConfig::new("Attic")
            .with_vendor("Attic Audio")
            .with_version("0.1.0")
            .with_category("Fx|Filter")
            .with_sub_categories("Filter");
        assert_eq!(config.name, "Attic");
        assert_eq!(config.vendor, "Attic Audio");
        assert_eq!(config.version, "0.1.0");
        assert_eq!(config.category, "Fx|Filter");
        assert_eq!(config.sub_categories, "Filter");
        assert!(!config.has_editor);
    }
}
