//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the [`Settings`]
//! and [`NameRule`] built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (`--settings FILE`, handled at the call-site)
//! 2. Environment variables: `FORMCHECK_VALIDATION__FORM_SELECTOR=.form`
//! 3. Config file (`--config FILE`, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use formcheck_core::domain::{NameRule, Settings};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "FORMCHECK";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Selectors and classes handed to the validator.
    pub validation: Settings,
    /// Bounds of the name rule applied to inputs with a custom message.
    pub name_rule: NameRuleConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRuleConfig {
    pub min_len: usize,
    pub max_len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            validation: Settings::new(
                ".popup__form",
                ".popup__input",
                ".popup__button",
                "popup__button_disabled",
                "popup__input_type_error",
                "popup__error_visible",
            ),
            name_rule: NameRuleConfig {
                min_len: NameRule::DEFAULT_MIN_LEN,
                max_len: NameRule::DEFAULT_MAX_LEN,
            },
            output: OutputConfig { no_color: false },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        let config = Config::builder()
            .add_source(
                Config::try_from(&Self::default()).context("Failed to encode defaults")?,
            )
            .add_source(File::from(path.as_path()).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let config: Self = config
            .try_deserialize()
            .context("Configuration has an invalid shape")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject blank settings and inverted name-rule bounds.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validation
            .validate()
            .context("Invalid [validation] section")?;
        self.name_rule().context("Invalid [name_rule] section")?;
        Ok(())
    }

    pub fn name_rule(&self) -> anyhow::Result<NameRule> {
        Ok(NameRule::new(self.name_rule.min_len, self.name_rule.max_len)?)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.formcheck.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "formcheck", "formcheck")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".formcheck.toml"))
    }

    /// The file `init` writes and `config path` reports.
    pub fn active_path(config_file: Option<&Path>) -> PathBuf {
        config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path)
    }
}
