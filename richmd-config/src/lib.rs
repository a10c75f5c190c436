//! Shared configuration loader for the richmd toolchain.
//!
//! `defaults/richmd.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`RichmdConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use richmd_convert::RenderOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/richmd.default.toml");

/// Top-level configuration consumed by richmd applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RichmdConfig {
    pub render: RenderConfig,
    pub convert: ConvertConfig,
    pub output: OutputConfig,
}

/// Mirrors the knobs exposed by the conversion renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub allow_raw_markup: bool,
    pub hard_line_breaks: bool,
    pub github_extensions: bool,
    pub heading_anchors: bool,
}

impl From<RenderConfig> for RenderOptions {
    fn from(config: RenderConfig) -> Self {
        RenderOptions {
            allow_raw_markup: config.allow_raw_markup,
            line_breaks_as_hard: config.hard_line_breaks,
            github_flavored_extensions: config.github_extensions,
            heading_anchors: config.heading_anchors,
        }
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        RenderOptions {
            allow_raw_markup: config.allow_raw_markup,
            line_breaks_as_hard: config.hard_line_breaks,
            github_flavored_extensions: config.github_extensions,
            heading_anchors: config.heading_anchors,
        }
    }
}

/// Parse-mode configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub inline: bool,
}

/// Controls how the CLI writes its result.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub trailing_newline: bool,
}

/// Helper for layering user overrides over the built-in defaults.
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

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<RichmdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<RichmdConfig, ConfigError> {
    Loader::new().build()
}
