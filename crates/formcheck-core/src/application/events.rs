//! Host events routed to the validator.

use std::fmt;

use serde::Serialize;

use crate::domain::NodeId;

/// Kinds of host events the validator listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// The value of an input changed.
    Input,
    /// A form is being submitted.
    Submit,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Submit => f.write_str("submit"),
        }
    }
}

/// An event fired at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
}

impl Event {
    pub fn input(target: NodeId) -> Self {
        Self {
            kind: EventKind::Input,
            target,
        }
    }

    pub fn submit(form: NodeId) -> Self {
        Self {
            kind: EventKind::Submit,
            target: form,
        }
    }
}

/// What the validator did with an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventOutcome {
    /// A listener was registered for the event.
    pub handled: bool,
    /// The host must not run the event's default action.
    pub default_prevented: bool,
}

impl EventOutcome {
    pub const fn ignored() -> Self {
        Self {
            handled: false,
            default_prevented: false,
        }
    }
}

/// Reaction registered for a `(node, kind)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Listener {
    /// Re-check the input, then re-toggle the form's submit button.
    Revalidate {
        form: NodeId,
        button: Option<NodeId>,
    },
    /// Suppress the form's default submit action.
    PreventSubmit,
}
