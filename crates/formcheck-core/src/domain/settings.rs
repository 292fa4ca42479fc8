//! Validator settings: the selectors and class names that control how
//! validity is rendered.
//!
//! The core defines no defaults. The caller supplies every key; a
//! [`Settings`] value is checked once with [`Settings::validate`] and then
//! treated as immutable for the lifetime of the validator.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Caller-supplied configuration of CSS selectors and class names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    /// Selector matching every form to validate.
    pub form_selector: String,
    /// Selector matching the validated inputs inside a form.
    pub input_selector: String,
    /// Selector matching the submit button inside a form.
    pub submit_button_selector: String,
    /// Class added to the submit button while it is disabled.
    pub inactive_button_class: String,
    /// Class added to an input while it is invalid.
    pub input_error_class: String,
    /// Class added to an error element while it shows a message.
    pub error_class: String,
}

impl Settings {
    pub fn new(
        form_selector: impl Into<String>,
        input_selector: impl Into<String>,
        submit_button_selector: impl Into<String>,
        inactive_button_class: impl Into<String>,
        input_error_class: impl Into<String>,
        error_class: impl Into<String>,
    ) -> Self {
        Self {
            form_selector: form_selector.into(),
            input_selector: input_selector.into(),
            submit_button_selector: submit_button_selector.into(),
            inactive_button_class: inactive_button_class.into(),
            input_error_class: input_error_class.into(),
            error_class: error_class.into(),
        }
    }

    /// Reject settings with an empty (or whitespace-only) key.
    pub fn validate(&self) -> Result<(), DomainError> {
        let keys: [(&'static str, &str); 6] = [
            ("form_selector", &self.form_selector),
            ("input_selector", &self.input_selector),
            ("submit_button_selector", &self.submit_button_selector),
            ("inactive_button_class", &self.inactive_button_class),
            ("input_error_class", &self.input_error_class),
            ("error_class", &self.error_class),
        ];

        for (key, value) in keys {
            if value.trim().is_empty() {
                return Err(DomainError::MissingSetting { key });
            }
        }

        Ok(())
    }
}
