//! One validity computation shared by the predicate and the renderer.

use serde::Serialize;

use crate::domain::{
    name_rule::{NameRule, NameRuleViolation},
    validity::InputState,
};

/// Why an input is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// The value is empty or natively missing.
    Missing,
    /// The input opted into the name rule and the value breaks it.
    NameRule { violation: NameRuleViolation },
    /// A native constraint failed.
    Native,
}

/// Result of assessing one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assessment {
    Valid,
    Invalid {
        /// Text to show in the error element.
        message: String,
        reason: FailureReason,
    },
}

impl Assessment {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid { message, .. } => Some(message),
        }
    }
}

/// Assess an input snapshot.
///
/// An input is invalid when its value is empty or natively missing, when it
/// carries a custom message and the value breaks `rule`, or when native
/// validity fails. The custom message replaces the native one only when
/// the name rule is what failed.
pub fn assess(input: &InputState, rule: &NameRule) -> Assessment {
    let missing = input.validity.value_missing || input.value.is_empty();

    let violation = input
        .custom_message()
        .and_then(|_| rule.check(&input.value).err());

    if !missing && violation.is_none() && input.validity.valid() {
        return Assessment::Valid;
    }

    let message = match (input.custom_message(), &violation) {
        (Some(custom), Some(_)) => custom.to_string(),
        _ => input.validation_message.clone(),
    };

    let reason = if missing {
        FailureReason::Missing
    } else if let Some(violation) = violation {
        FailureReason::NameRule { violation }
    } else {
        FailureReason::Native
    };

    Assessment::Invalid { message, reason }
}
