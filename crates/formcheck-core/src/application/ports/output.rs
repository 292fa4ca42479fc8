//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from the host document.
//! The `formcheck-adapters` crate provides implementations.

use crate::domain::{InputState, NodeId};
use crate::error::FormResult;

/// Port for document access.
///
/// Implemented by:
/// - `formcheck_adapters::MemoryDocument` (arena DOM, CLI and tests)
///
/// ## Design Notes
///
/// - Methods take `&self`; implementations guard their tree internally
/// - Every query is live, nothing is cached by the caller
/// - `scope: None` means the whole document
#[cfg_attr(test, mockall::automock)]
pub trait Document: Send + Sync {
    /// All elements matching `selector` under `scope`, in document order.
    fn query_all(&self, scope: Option<NodeId>, selector: &str) -> FormResult<Vec<NodeId>>;

    /// First element matching `selector` under `scope`.
    fn query(&self, scope: Option<NodeId>, selector: &str) -> FormResult<Option<NodeId>>;

    /// Descendant of `scope` whose id equals `id`.
    fn element_by_id(&self, scope: NodeId, id: &str) -> FormResult<Option<NodeId>>;

    /// Parent element, `None` for detached nodes and the root.
    fn parent(&self, node: NodeId) -> FormResult<Option<NodeId>>;

    /// Element id, empty when unset.
    fn id(&self, node: NodeId) -> FormResult<String>;

    /// Snapshot of a form control's value and native validity.
    fn input_state(&self, input: NodeId) -> FormResult<InputState>;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> FormResult<NodeId>;

    fn set_id(&self, node: NodeId, id: &str) -> FormResult<()>;

    /// Append `child` as the last child of `parent`.
    fn append_child(&self, parent: NodeId, child: NodeId) -> FormResult<()>;

    fn text(&self, node: NodeId) -> FormResult<String>;

    fn set_text(&self, node: NodeId, text: &str) -> FormResult<()>;

    fn add_class(&self, node: NodeId, class: &str) -> FormResult<()>;

    fn remove_class(&self, node: NodeId, class: &str) -> FormResult<()>;

    fn has_class(&self, node: NodeId, class: &str) -> FormResult<bool>;

    fn is_disabled(&self, node: NodeId) -> FormResult<bool>;

    fn set_disabled(&self, node: NodeId, disabled: bool) -> FormResult<()>;
}
