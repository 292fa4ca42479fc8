//! Node handles and error element identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle of a node owned by a [`crate::application::ports::Document`].
///
/// Handles are only meaningful for the document that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tag of a lazily created error element.
pub const ERROR_ELEMENT_TAG: &str = "span";

/// Base class every lazily created error element carries.
pub const ERROR_ELEMENT_CLASS: &str = "popup__error";

/// Derive the id of the error element paired with an input.
///
/// `name` becomes `name-error`. Inputs without a usable id get no derived
/// id; their error element is tracked by handle only.
pub fn error_element_id(input_id: &str) -> Option<String> {
    if input_id.is_empty() || input_id.chars().any(char::is_whitespace) {
        return None;
    }
    Some(format!("{input_id}-error"))
}
