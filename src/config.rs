//! Configuration loader
//!
//! `defaults/selmark.default.toml` is embedded into the crate so the documented defaults and
//! the runtime behavior stay in sync. Callers layer their own files and overrides on top with
//! [`Loader`] before deserializing into [`SelmarkConfig`].

use crate::document::BuildOptions;
use crate::formats::TreevizOptions;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/selmark.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct SelmarkConfig {
    pub inspect: InspectConfig,
    pub document: DocumentConfig,
}

/// Controls `inspect` output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub default_format: String,
    pub treeviz: TreevizConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreevizConfig {
    pub show_line_numbers: bool,
    pub label_width: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    pub keep_blank_text: bool,
}

impl From<&TreevizConfig> for TreevizOptions {
    fn from(config: &TreevizConfig) -> Self {
        TreevizOptions {
            show_line_numbers: config.show_line_numbers,
            label_width: config.label_width,
        }
    }
}

impl From<&DocumentConfig> for BuildOptions {
    fn from(config: &DocumentConfig) -> Self {
        BuildOptions {
            keep_blank_text: config.keep_blank_text,
        }
    }
}

/// Layers user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files are an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file if it exists.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. from a command line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<SelmarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<SelmarkConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.inspect.default_format, "treeviz");
        assert!(!config.inspect.treeviz.show_line_numbers);
        assert_eq!(config.inspect.treeviz.label_width, 30);
        assert!(config.document.keep_blank_text);
    }

    #[test]
    fn defaults_match_option_defaults() {
        let config = load_defaults().unwrap();
        assert_eq!(
            TreevizOptions::from(&config.inspect.treeviz),
            TreevizOptions::default()
        );
        assert_eq!(
            BuildOptions::from(&config.document),
            BuildOptions::default()
        );
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("inspect.treeviz.show_line_numbers", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.inspect.treeviz.show_line_numbers);
    }

    #[test]
    fn layers_files_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[inspect.treeviz]\nlabel_width = 12").unwrap();

        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert_eq!(config.inspect.treeviz.label_width, 12);
        assert_eq!(config.inspect.default_format, "treeviz");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("/nonexistent/selmark.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/selmark.toml")
            .build()
            .unwrap();
        assert_eq!(config.inspect.treeviz.label_width, 30);
    }
}
