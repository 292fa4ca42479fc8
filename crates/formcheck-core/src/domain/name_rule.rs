//! The name rule applied to inputs that carry a custom error message.
//!
//! Accepted characters are Latin and Cyrillic letters (including `ё`/`Ё`),
//! the hyphen and whitespace. Length is counted in characters and must lie
//! within the rule's inclusive bounds (2..=30 by default).

use std::{fmt, sync::OnceLock};

use regex::Regex;
use serde::Serialize;

use crate::domain::error::DomainError;

/// Matches the first character outside the accepted set.
const FORBIDDEN_PATTERN: &str = r"[^a-zA-Zа-яА-ЯёЁ\-\s]";

fn forbidden_character() -> &'static Regex {
    static FORBIDDEN: OnceLock<Regex> = OnceLock::new();
    FORBIDDEN.get_or_init(|| Regex::new(FORBIDDEN_PATTERN).expect("name pattern is valid"))
}

/// Why a value failed the name rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum NameRuleViolation {
    Empty,
    ForbiddenCharacter { character: char },
    TooShort { length: usize, min: usize },
    TooLong { length: usize, max: usize },
}

impl fmt::Display for NameRuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("value is empty"),
            Self::ForbiddenCharacter { character } => {
                write!(f, "character '{character}' is not allowed")
            }
            Self::TooShort { length, min } => {
                write!(f, "{length} characters, at least {min} required")
            }
            Self::TooLong { length, max } => {
                write!(f, "{length} characters, at most {max} allowed")
            }
        }
    }
}

/// Character set and length bounds for free-text name-like fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameRule {
    min_len: usize,
    max_len: usize,
}

impl NameRule {
    pub const DEFAULT_MIN_LEN: usize = 2;
    pub const DEFAULT_MAX_LEN: usize = 30;

    /// Build a rule with custom inclusive bounds.
    pub fn new(min_len: usize, max_len: usize) -> Result<Self, DomainError> {
        if min_len == 0 {
            return Err(DomainError::InvalidNameRule {
                reason: "minimum length must be at least 1".into(),
            });
        }
        if min_len > max_len {
            return Err(DomainError::InvalidNameRule {
                reason: format!("minimum length {min_len} exceeds maximum {max_len}"),
            });
        }
        Ok(Self { min_len, max_len })
    }

    pub const fn min_len(&self) -> usize {
        self.min_len
    }

    pub const fn max_len(&self) -> usize {
        self.max_len
    }

    /// Check a value against the rule, reporting the first violation.
    pub fn check(&self, value: &str) -> Result<(), NameRuleViolation> {
        if value.is_empty() {
            return Err(NameRuleViolation::Empty);
        }

        if let Some(found) = forbidden_character().find(value) {
            // `find` always matches exactly one character.
            if let Some(character) = found.as_str().chars().next() {
                return Err(NameRuleViolation::ForbiddenCharacter { character });
            }
        }

        let length = value.chars().count();
        if length < self.min_len {
            return Err(NameRuleViolation::TooShort {
                length,
                min: self.min_len,
            });
        }
        if length > self.max_len {
            return Err(NameRuleViolation::TooLong {
                length,
                max: self.max_len,
            });
        }

        Ok(())
    }

    pub fn accepts(&self, value: &str) -> bool {
        self.check(value).is_ok()
    }
}

impl Default for NameRule {
    fn default() -> Self {
        Self {
            min_len: Self::DEFAULT_MIN_LEN,
            max_len: Self::DEFAULT_MAX_LEN,
        }
    }
}
