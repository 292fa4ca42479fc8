//! In-memory document adapter.
//!
//! An arena of elements behind `Arc<RwLock<..>>`. Clones share the same
//! tree, so a test or the CLI can keep a handle while the validator owns
//! another one.

use std::{
    borrow::Cow,
    collections::BTreeMap,
    fmt::Write as _,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::trace;

use formcheck_core::{
    application::{ApplicationError, ports::Document},
    domain::{InputState, NodeId},
    error::FormResult,
};

use super::constraints::{self, ControlView};
use crate::selector::{SelectorContext, SelectorList};

const ROOT_TAG: &str = "#document";
const VOID_TAGS: &[&str] = &["input", "br", "img", "hr", "meta", "link"];

/// In-memory document used by the CLI and tests.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    inner: Arc<RwLock<Tree>>,
}

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    id: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    dirty: bool,
    disabled: bool,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<Element>,
}

impl Tree {
    fn new() -> Self {
        Self {
            nodes: vec![Element {
                tag: ROOT_TAG.into(),
                ..Element::default()
            }],
        }
    }

    fn get(&self, node: NodeId) -> FormResult<&Element> {
        self.nodes
            .get(node.index())
            .ok_or_else(|| ApplicationError::NodeNotFound { node }.into())
    }

    fn get_mut(&mut self, node: NodeId) -> FormResult<&mut Element> {
        self.nodes
            .get_mut(node.index())
            .ok_or_else(|| ApplicationError::NodeNotFound { node }.into())
    }

    fn push(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Element {
            tag: tag.trim().to_ascii_lowercase(),
            ..Element::default()
        });
        NodeId::new(self.nodes.len() - 1)
    }

    /// Descendants of `scope` in document order, `scope` excluded.
    fn descendants(&self, scope: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.nodes[scope].children.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            out.push(index);
            stack.extend(self.nodes[index].children.iter().rev().copied());
        }
        out
    }

    fn is_ancestor_or_self(&self, candidate: usize, mut node: usize) -> bool {
        loop {
            if node == candidate {
                return true;
            }
            match self.nodes[node].parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn append(&mut self, parent: NodeId, child: NodeId) -> FormResult<()> {
        self.get(parent)?;
        self.get(child)?;

        let reject = |reason: &str| -> FormResult<()> {
            Err(ApplicationError::InvalidHierarchy {
                parent,
                child,
                reason: reason.into(),
            }
            .into())
        };

        if child.index() == 0 {
            return reject("the document root cannot be moved");
        }
        if self.is_ancestor_or_self(child.index(), parent.index()) {
            return reject("the child contains the parent");
        }

        if let Some(old) = self.nodes[child.index()].parent.take() {
            self.nodes[old].children.retain(|&c| c != child.index());
        }
        self.nodes[child.index()].parent = Some(parent.index());
        self.nodes[parent.index()].children.push(child.index());
        Ok(())
    }

    fn query_all(&self, scope: Option<NodeId>, selector: &str) -> FormResult<Vec<NodeId>> {
        let list = SelectorList::parse(selector).map_err(|e| e.into_form_error(selector))?;
        let scope = match scope {
            Some(node) => {
                self.get(node)?;
                node.index()
            }
            None => 0,
        };
        Ok(self
            .descendants(scope)
            .into_iter()
            .map(NodeId::new)
            .filter(|&node| list.matches(self, node))
            .collect())
    }

    fn render(&self, index: usize, depth: usize, out: &mut String) {
        let element = &self.nodes[index];
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{}", element.tag);
        if !element.id.is_empty() {
            let _ = write!(out, " id=\"{}\"", escape(&element.id));
        }
        if !element.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&element.classes.join(" ")));
        }
        for (name, value) in &element.attributes {
            if value.is_empty() {
                let _ = write!(out, " {name}");
            } else {
                let _ = write!(out, " {name}=\"{}\"", escape(value));
            }
        }
        if constraints::is_form_control(&element.tag) && !element.value.is_empty() {
            let _ = write!(out, " value=\"{}\"", escape(&element.value));
        }
        if element.disabled {
            out.push_str(" disabled");
        }
        out.push('>');

        if VOID_TAGS.contains(&element.tag.as_str()) {
            out.push('\n');
            return;
        }

        if element.children.is_empty() {
            let _ = writeln!(out, "{}</{}>", escape(&element.text), element.tag);
            return;
        }

        out.push('\n');
        if !element.text.is_empty() {
            let _ = writeln!(out, "{indent}  {}", escape(&element.text));
        }
        for &child in &element.children {
            self.render(child, depth + 1, out);
        }
        let _ = writeln!(out, "{indent}</{}>", element.tag);
    }
}

fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;"),
    )
}

impl SelectorContext for Tree {
    fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes
            .get(node.index())
            .filter(|e| e.tag != ROOT_TAG)
            .map(|e| e.tag.as_str())
    }

    fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.nodes
            .get(node.index())?
            .parent
            .filter(|&p| p != 0)
            .map(NodeId::new)
    }

    fn element_id(&self, node: NodeId) -> Option<&str> {
        self.nodes
            .get(node.index())
            .map(|e| e.id.as_str())
            .filter(|id| !id.is_empty())
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .get(node.index())
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<Cow<'_, str>> {
        let element = self.nodes.get(node.index())?;
        match name {
            "id" => self.element_id(node).map(Cow::Borrowed),
            "class" if element.classes.is_empty() => None,
            "class" => Some(Cow::Owned(element.classes.join(" "))),
            "disabled" => element.disabled.then_some(Cow::Borrowed("")),
            "value" if constraints::is_form_control(&element.tag) => {
                Some(Cow::Borrowed(element.value.as_str()))
            }
            _ => element.attributes.get(name).map(|v| Cow::Borrowed(v.as_str())),
        }
    }
}

impl MemoryDocument {
    /// Create an empty document holding only the root.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Tree::new())),
        }
    }

    fn read(&self) -> FormResult<RwLockReadGuard<'_, Tree>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::DocumentLock)?)
    }

    fn write(&self) -> FormResult<RwLockWriteGuard<'_, Tree>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::DocumentLock)?)
    }

    /// The document root. Never matched by selectors.
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Create an element and append it to `parent`.
    pub fn append_element(&self, parent: NodeId, tag: &str) -> FormResult<NodeId> {
        let mut tree = self.write()?;
        tree.get(parent)?;
        let node = tree.push(tag);
        tree.append(parent, node)?;
        Ok(node)
    }

    pub fn tag(&self, node: NodeId) -> FormResult<String> {
        Ok(self.read()?.get(node)?.tag.clone())
    }

    pub fn children(&self, node: NodeId) -> FormResult<Vec<NodeId>> {
        Ok(self
            .read()?
            .get(node)?
            .children
            .iter()
            .copied()
            .map(NodeId::new)
            .collect())
    }

    /// Class list in insertion order.
    pub fn classes(&self, node: NodeId) -> FormResult<Vec<String>> {
        Ok(self.read()?.get(node)?.classes.clone())
    }

    /// Set a markup attribute.
    ///
    /// `id`, `class`, `disabled` and `value` are reflected onto the element
    /// properties instead of the attribute map. Setting `value` this way
    /// does not mark the control as edited.
    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> FormResult<()> {
        let mut tree = self.write()?;
        let element = tree.get_mut(node)?;
        match name.to_ascii_lowercase().as_str() {
            "id" => element.id = value.to_string(),
            "class" => {
                element.classes.clear();
                for class in value.split_whitespace() {
                    if !element.classes.iter().any(|c| c == class) {
                        element.classes.push(class.to_string());
                    }
                }
            }
            "disabled" => element.disabled = true,
            "value" => element.value = value.to_string(),
            other => {
                element.attributes.insert(other.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    pub fn remove_attribute(&self, node: NodeId, name: &str) -> FormResult<()> {
        let mut tree = self.write()?;
        let element = tree.get_mut(node)?;
        match name.to_ascii_lowercase().as_str() {
            "id" => element.id.clear(),
            "class" => element.classes.clear(),
            "disabled" => element.disabled = false,
            "value" => element.value.clear(),
            other => {
                element.attributes.remove(other);
            }
        }
        Ok(())
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> FormResult<Option<String>> {
        let tree = self.read()?;
        tree.get(node)?;
        Ok(SelectorContext::attribute(&*tree, node, name).map(Cow::into_owned))
    }

    /// Current value of a form control.
    pub fn value(&self, node: NodeId) -> FormResult<String> {
        Ok(self.read()?.get(node)?.value.clone())
    }

    /// Replace the value programmatically. Length constraints stay dormant.
    pub fn set_value(&self, node: NodeId, value: &str) -> FormResult<()> {
        let mut tree = self.write()?;
        tree.get_mut(node)?.value = value.to_string();
        Ok(())
    }

    /// Replace the value as if the user typed it.
    pub fn type_text(&self, node: NodeId, value: &str) -> FormResult<()> {
        let mut tree = self.write()?;
        let element = tree.get_mut(node)?;
        element.value = value.to_string();
        element.dirty = true;
        trace!(node = %node, "value edited");
        Ok(())
    }

    /// Number of elements, root included.
    pub fn len(&self) -> FormResult<usize> {
        Ok(self.read()?.nodes.len())
    }

    /// `true` while the document holds only the root.
    pub fn is_empty(&self) -> FormResult<bool> {
        Ok(self.len()? <= 1)
    }

    /// Indented markup of the subtree under `node`.
    pub fn to_html(&self, node: NodeId) -> FormResult<String> {
        let tree = self.read()?;
        tree.get(node)?;
        let mut out = String::new();
        if node.index() == 0 {
            for &child in &tree.nodes[0].children {
                tree.render(child, 0, &mut out);
            }
        } else {
            tree.render(node.index(), 0, &mut out);
        }
        Ok(out)
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    fn query_all(&self, scope: Option<NodeId>, selector: &str) -> FormResult<Vec<NodeId>> {
        self.read()?.query_all(scope, selector)
    }

    fn query(&self, scope: Option<NodeId>, selector: &str) -> FormResult<Option<NodeId>> {
        Ok(self.read()?.query_all(scope, selector)?.into_iter().next())
    }

    fn element_by_id(&self, scope: NodeId, id: &str) -> FormResult<Option<NodeId>> {
        let tree = self.read()?;
        tree.get(scope)?;
        if id.is_empty() {
            return Ok(None);
        }
        Ok(tree
            .descendants(scope.index())
            .into_iter()
            .find(|&index| tree.nodes[index].id == id)
            .map(NodeId::new))
    }

    fn parent(&self, node: NodeId) -> FormResult<Option<NodeId>> {
        Ok(self.read()?.get(node)?.parent.map(NodeId::new))
    }

    fn id(&self, node: NodeId) -> FormResult<String> {
        Ok(self.read()?.get(node)?.id.clone())
    }

    fn input_state(&self, input: NodeId) -> FormResult<InputState> {
        let tree = self.read()?;
        let element = tree.get(input)?;
        if !constraints::is_form_control(&element.tag) {
            return Err(ApplicationError::NotAnInput {
                node: input,
                tag: element.tag.clone(),
            }
            .into());
        }

        let lookup = |name: &str| element.attributes.get(name).map(String::as_str);
        let input_type = constraints::control_type(
            &element.tag,
            lookup("type"),
            lookup("multiple").is_some(),
        );
        let value = constraints::effective_value(&input_type, &element.value);
        let view = ControlView {
            tag: &element.tag,
            input_type: &input_type,
            value,
            dirty: element.dirty,
            disabled: element.disabled,
            attribute: &lookup,
        };
        let (validity, validation_message) = constraints::evaluate(&view);

        Ok(InputState {
            id: element.id.clone(),
            value: value.to_string(),
            validity,
            validation_message,
            custom_message: element.attributes.get("data-error-message").cloned(),
        })
    }

    fn create_element(&self, tag: &str) -> FormResult<NodeId> {
        let node = self.write()?.push(tag);
        trace!(node = %node, tag, "element created");
        Ok(node)
    }

    fn set_id(&self, node: NodeId, id: &str) -> FormResult<()> {
        self.write()?.get_mut(node)?.id = id.to_string();
        Ok(())
    }

    fn append_child(&self, parent: NodeId, child: NodeId) -> FormResult<()> {
        self.write()?.append(parent, child)
    }

    fn text(&self, node: NodeId) -> FormResult<String> {
        Ok(self.read()?.get(node)?.text.clone())
    }

    fn set_text(&self, node: NodeId, text: &str) -> FormResult<()> {
        self.write()?.get_mut(node)?.text = text.to_string();
        Ok(())
    }

    fn add_class(&self, node: NodeId, class: &str) -> FormResult<()> {
        let mut tree = self.write()?;
        let element = tree.get_mut(node)?;
        if !element.classes.iter().any(|c| c == class) {
            element.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&self, node: NodeId, class: &str) -> FormResult<()> {
        self.write()?
            .get_mut(node)?
            .classes
            .retain(|c| c != class);
        Ok(())
    }

    fn has_class(&self, node: NodeId, class: &str) -> FormResult<bool> {
        Ok(self
            .read()?
            .get(node)?
            .classes
            .iter()
            .any(|c| c == class))
    }

    fn is_disabled(&self, node: NodeId) -> FormResult<bool> {
        Ok(self.read()?.get(node)?.disabled)
    }

    fn set_disabled(&self, node: NodeId, disabled: bool) -> FormResult<()> {
        self.write()?.get_mut(node)?.disabled = disabled;
        Ok(())
    }
}
