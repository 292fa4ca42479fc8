//! Read-only snapshots of a form's rendered validation state.

use serde::Serialize;

use crate::domain::{FailureReason, NodeId};

/// Rendered state of one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputReport {
    pub node: NodeId,
    pub id: String,
    pub value: String,
    pub valid: bool,
    /// Why the input is invalid, `None` when valid.
    pub reason: Option<FailureReason>,
    /// Text currently shown in the paired error element.
    pub error_text: String,
    /// The paired error element carries the error class.
    pub error_visible: bool,
}

/// Rendered state of one form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormReport {
    pub node: NodeId,
    pub inputs: Vec<InputReport>,
    /// `None` when the form has no submit button.
    pub submit_disabled: Option<bool>,
}

impl FormReport {
    pub fn invalid_count(&self) -> usize {
        self.inputs.iter().filter(|i| !i.valid).count()
    }

    pub fn is_valid(&self) -> bool {
        self.invalid_count() == 0
    }
}
