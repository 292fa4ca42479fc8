//! Core domain layer for formcheck.
//!
//! This module contains pure validation logic with no document access.
//! Reading inputs and mutating elements happen through the `Document` port
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No document, filesystem, or network calls
//! - **Immutable values**: Settings and snapshots are Clone + PartialEq
//! - **One computation**: Validity and message come from [`assess`]
//!
// Public API - what the world sees
pub mod assessment;
pub mod error;
pub mod name_rule;
pub mod node;
pub mod settings;
pub mod validity;

// Re-exports for convenience
pub use assessment::{Assessment, FailureReason, assess};
pub use error::{DomainError, ErrorCategory};
pub use name_rule::{NameRule, NameRuleViolation};
pub use node::{ERROR_ELEMENT_CLASS, ERROR_ELEMENT_TAG, NodeId, error_element_id};
pub use settings::Settings;
pub use validity::{InputState, ValidityState};

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::new(
            ".popup__form",
            ".popup__input",
            ".popup__button",
            "popup__button_disabled",
            "popup__input_type_error",
            "popup__error_visible",
        )
    }

    fn input(value: &str) -> InputState {
        InputState {
            id: "name".into(),
            value: value.into(),
            ..InputState::default()
        }
    }

    fn named(value: &str) -> InputState {
        InputState {
            custom_message: Some("Invalid name".into()),
            ..input(value)
        }
    }

    // ========================================================================
    // Settings Tests
    // ========================================================================

    #[test]
    fn settings_accept_complete_configuration() {
        assert!(settings().validate().is_ok());
    }

    #[test]
    fn settings_reject_empty_key() {
        let mut s = settings();
        s.error_class = "  ".into();

        assert_eq!(
            s.validate(),
            Err(DomainError::MissingSetting { key: "error_class" })
        );
    }

    #[test]
    fn settings_deserialize_from_snake_case_keys() {
        let json = r#"{
            "form_selector": "form",
            "input_selector": "input",
            "submit_button_selector": "button",
            "inactive_button_class": "off",
            "input_error_class": "bad",
            "error_class": "shown"
        }"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.submit_button_selector, "button");
    }

    // ========================================================================
    // Name Rule Tests
    // ========================================================================

    #[test]
    fn name_rule_accepts_latin_and_cyrillic() {
        let rule = NameRule::default();
        assert!(rule.accepts("Anna"));
        assert!(rule.accepts("Жак-Ив Кусто"));
        assert!(rule.accepts("Ёлка ёж"));
    }

    #[test]
    fn name_rule_length_bounds_are_inclusive() {
        let rule = NameRule::default();
        assert!(rule.accepts("Al"));
        assert!(rule.accepts(&"a".repeat(30)));
        assert_eq!(
            rule.check("A"),
            Err(NameRuleViolation::TooShort { length: 1, min: 2 })
        );
        assert_eq!(
            rule.check(&"a".repeat(31)),
            Err(NameRuleViolation::TooLong { length: 31, max: 30 })
        );
    }

    #[test]
    fn name_rule_counts_characters_not_bytes() {
        // 15 Cyrillic letters are 30 bytes in UTF-8.
        let rule = NameRule::default();
        assert!(rule.accepts(&"ж".repeat(30)));
    }

    #[test]
    fn name_rule_rejects_forbidden_characters() {
        let rule = NameRule::default();
        assert_eq!(
            rule.check("Anna1"),
            Err(NameRuleViolation::ForbiddenCharacter { character: '1' })
        );
        assert!(!rule.accepts("O'Brien"));
        assert!(!rule.accepts("Zoë"));
    }

    #[test]
    fn name_rule_rejects_empty() {
        assert_eq!(NameRule::default().check(""), Err(NameRuleViolation::Empty));
    }

    #[test]
    fn name_rule_rejects_inverted_bounds() {
        assert!(NameRule::new(5, 2).is_err());
        assert!(NameRule::new(0, 2).is_err());
        assert!(NameRule::new(1, 1).is_ok());
    }

    // ========================================================================
    // Assessment Tests
    // ========================================================================

    #[test]
    fn empty_value_is_invalid() {
        let rule = NameRule::default();
        let result = assess(&input(""), &rule);
        assert!(!result.is_valid());
        assert!(matches!(
            result,
            Assessment::Invalid {
                reason: FailureReason::Missing,
                ..
            }
        ));
    }

    #[test]
    fn value_missing_flag_is_invalid_even_with_value() {
        let mut state = input("Anna");
        state.validity.value_missing = true;
        state.validation_message = "Please fill out this field.".into();

        let result = assess(&state, &NameRule::default());
        assert_eq!(result.message(), Some("Please fill out this field."));
    }

    #[test]
    fn short_name_uses_custom_message() {
        let result = assess(&named("A"), &NameRule::default());
        assert_eq!(
            result,
            Assessment::Invalid {
                message: "Invalid name".into(),
                reason: FailureReason::NameRule {
                    violation: NameRuleViolation::TooShort { length: 1, min: 2 }
                },
            }
        );
    }

    #[test]
    fn custom_rule_overrides_native_validity() {
        // Natively valid, but the name rule rejects digits.
        let result = assess(&named("Anna2"), &NameRule::default());
        assert_eq!(result.message(), Some("Invalid name"));
    }

    #[test]
    fn native_failure_keeps_native_message_when_name_rule_passes() {
        let mut state = named("Anna");
        state.validity.too_short = true;
        state.validation_message = "Please lengthen this text.".into();

        let result = assess(&state, &NameRule::default());
        assert_eq!(result.message(), Some("Please lengthen this text."));
    }

    #[test]
    fn empty_named_value_uses_custom_message() {
        let result = assess(&named(""), &NameRule::default());
        assert_eq!(result.message(), Some("Invalid name"));
    }

    #[test]
    fn empty_custom_message_does_not_apply_name_rule() {
        let mut state = input("Anna2");
        state.custom_message = Some(String::new());

        assert!(assess(&state, &NameRule::default()).is_valid());
    }

    #[test]
    fn valid_name_passes() {
        assert!(assess(&named("Anna"), &NameRule::default()).is_valid());
    }

    // ========================================================================
    // Node Tests
    // ========================================================================

    #[test]
    fn error_element_id_is_derived_from_input_id() {
        assert_eq!(error_element_id("name").as_deref(), Some("name-error"));
        assert_eq!(error_element_id(""), None);
        assert_eq!(error_element_id("a b"), None);
    }
}
