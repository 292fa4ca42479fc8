//! Settings loader.
//!
//! Reads validator [`Settings`] from a TOML or JSON file. The six keys may
//! sit at the top level or under a `[settings]` table:
//!
//! ```toml
//! [settings]
//! form_selector          = ".popup__form"
//! input_selector         = ".popup__input"
//! submit_button_selector = ".popup__button"
//! inactive_button_class  = "popup__button_disabled"
//! input_error_class      = "popup__input_type_error"
//! error_class            = "popup__error_visible"
//! ```

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::{debug, instrument};

use formcheck_core::{
    application::ApplicationError,
    domain::Settings,
    error::{FormError, FormResult},
};

use crate::fixture_loader::FileFormat;

#[derive(Deserialize)]
#[serde(untagged)]
enum SettingsFile {
    Wrapped { settings: Settings },
    Flat(Settings),
}

impl From<SettingsFile> for Settings {
    fn from(file: SettingsFile) -> Self {
        match file {
            SettingsFile::Wrapped { settings } | SettingsFile::Flat(settings) => settings,
        }
    }
}

/// Reads and validates settings files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsLoader;

impl SettingsLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse settings from text in the given format. Does not validate.
    pub fn parse(&self, content: &str, format: FileFormat) -> Result<Settings, String> {
        let file: SettingsFile = match format {
            FileFormat::Toml => toml::from_str(content).map_err(|e| e.to_string())?,
            FileFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string())?,
        };
        Ok(file.into())
    }

    /// Read the settings file at `path`.
    ///
    /// Unreadable or malformed files yield `ApplicationError::SettingsLoad`;
    /// a blank key yields `DomainError::MissingSetting`.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> FormResult<Settings> {
        let fail = |reason: String| -> FormError {
            ApplicationError::SettingsLoad {
                path: path.to_path_buf(),
                reason,
            }
            .into()
        };

        let content = fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;
        let settings = self
            .parse(&content, FileFormat::from_path(path))
            .map_err(fail)?;
        settings.validate()?;

        debug!(form_selector = %settings.form_selector, "settings loaded");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_core::domain::DomainError;
    use std::io::Write;

    const FLAT: &str = r#"
form_selector = ".f"
input_selector = ".i"
submit_button_selector = ".b"
inactive_button_class = "off"
input_error_class = "bad"
error_class = "shown"
"#;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_flat_and_wrapped_toml() {
        let loader = SettingsLoader::new();
        let flat = loader.parse(FLAT, FileFormat::Toml).unwrap();
        let wrapped = loader
            .parse(&format!("[settings]\n{FLAT}"), FileFormat::Toml)
            .unwrap();
        assert_eq!(flat, wrapped);
        assert_eq!(flat.error_class, "shown");
    }

    #[test]
    fn loads_json_files() {
        let file = write_temp(
            ".json",
            r#"{"settings":{"form_selector":"form","input_selector":"input",
               "submit_button_selector":"button","inactive_button_class":"a",
               "input_error_class":"b","error_class":"c"}}"#,
        );
        let settings = SettingsLoader::new().load(file.path()).unwrap();
        assert_eq!(settings.form_selector, "form");
    }

    #[test]
    fn missing_key_is_a_load_error() {
        let file = write_temp(".toml", "form_selector = \".f\"\n");
        let err = SettingsLoader::new().load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            FormError::Application(ApplicationError::SettingsLoad { .. })
        ));
    }

    #[test]
    fn blank_key_is_rejected_by_validation() {
        let content = FLAT.replace("\"shown\"", "\"  \"");
        let file = write_temp(".toml", &content);
        let err = SettingsLoader::new().load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            FormError::Domain(DomainError::MissingSetting { key: "error_class" })
        ));
    }
}
