//! Native constraint validity and the input snapshot read from a document.

use serde::{Deserialize, Serialize};

/// Native constraint validation flags of one input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityState {
    pub value_missing: bool,
    pub type_mismatch: bool,
    pub pattern_mismatch: bool,
    pub too_long: bool,
    pub too_short: bool,
    pub range_underflow: bool,
    pub range_overflow: bool,
    pub step_mismatch: bool,
    pub bad_input: bool,
    pub custom_error: bool,
}

impl ValidityState {
    pub const fn valid(&self) -> bool {
        !(self.value_missing
            || self.type_mismatch
            || self.pattern_mismatch
            || self.too_long
            || self.too_short
            || self.range_underflow
            || self.range_overflow
            || self.step_mismatch
            || self.bad_input
            || self.custom_error)
    }
}

/// Everything the validator needs to know about one input.
///
/// Read through the document port on every check; never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    /// Element id, empty when the input has none.
    pub id: String,
    pub value: String,
    pub validity: ValidityState,
    /// Native validation message, empty when the input is natively valid.
    pub validation_message: String,
    /// The `data-error-message` attribute, when present.
    pub custom_message: Option<String>,
}

impl InputState {
    /// The custom message, if present and non-empty.
    ///
    /// An empty `data-error-message` does not opt the input into the name
    /// rule.
    pub fn custom_message(&self) -> Option<&str> {
        self.custom_message.as_deref().filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_valid() {
        assert!(ValidityState::default().valid());
    }

    #[test]
    fn any_flag_invalidates() {
        let missing = ValidityState {
            value_missing: true,
            ..ValidityState::default()
        };
        assert!(!missing.valid());

        let custom = ValidityState {
            custom_error: true,
            ..ValidityState::default()
        };
        assert!(!custom.valid());
    }

    #[test]
    fn empty_custom_message_is_absent() {
        let state = InputState {
            custom_message: Some(String::new()),
            ..InputState::default()
        };
        assert_eq!(state.custom_message(), None);
    }
}
