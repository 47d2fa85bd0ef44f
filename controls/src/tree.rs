//! Host UI-tree abstraction and an in-memory implementation.
//!
//! Every builder in this crate talks to the host through [`UiTree`]: element
//! creation, attribute and class assignment, text content, input value and
//! checked state, and id lookup within a subtree. The browser implementation
//! lives in [`crate::dom`]; [`MemoryTree`] is used natively by tests and by
//! the static page renderer, and can serialise any subtree to HTML.

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;

use std::fmt::Write as _;

use crate::error::TreeError;

/// The host UI tree consumed by the control factory, panel and table.
pub trait UiTree {
    /// Opaque handle to one element.
    type Node: Clone + std::fmt::Debug;

    /// The document root that panel and table containers are looked up from.
    fn root(&self) -> Self::Node;

    /// Create a detached element with the given tag name.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Host`] if the host refuses to create the element.
    fn create_element(&mut self, tag: &str) -> Result<Self::Node, TreeError>;

    /// Append `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if either handle is stale or the host rejects the move.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), TreeError>;

    /// Set an attribute (including `id`, `type`, `min`, `for`, ...).
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or the attribute name is invalid.
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> Result<(), TreeError>;

    /// Replace the element's content with plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    fn set_text(&mut self, node: &Self::Node, text: &str) -> Result<(), TreeError>;

    /// Replace the element's content with markup (labels may carry math or `<sup>`).
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    fn set_inner_html(&mut self, node: &Self::Node, html: &str) -> Result<(), TreeError>;

    /// Current text content, empty for stale handles.
    fn text(&self, node: &Self::Node) -> String;

    /// Add a class to the element's class list.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or the class token is invalid.
    fn add_class(&mut self, node: &Self::Node, class: &str) -> Result<(), TreeError>;

    /// Remove a class from the element's class list.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or the class token is invalid.
    fn remove_class(&mut self, node: &Self::Node, class: &str) -> Result<(), TreeError>;

    /// Whether the element carries `class`.
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Set the live `value` property of an input.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or not an input.
    fn set_value(&mut self, node: &Self::Node, value: &str) -> Result<(), TreeError>;

    /// Live `value` property of an input, empty for non-inputs.
    fn value(&self, node: &Self::Node) -> String;

    /// Set the live `checked` property of a checkbox or radio input.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or not an input.
    fn set_checked(&mut self, node: &Self::Node, checked: bool) -> Result<(), TreeError>;

    /// Live `checked` property; `false` for non-inputs.
    fn checked(&self, node: &Self::Node) -> bool;

    /// Find a descendant of `root` (excluding `root` itself) by its `id`.
    fn find_by_id(&self, root: &Self::Node, id: &str) -> Option<Self::Node>;
}

/// Handle to an element inside a [`MemoryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
enum Content {
    #[default]
    Empty,
    Text(String),
    Html(String),
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    content: Content,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    value: Option<String>,
    checked: bool,
    /// Number of content writes (`set_text` / `set_inner_html`) since creation.
    writes: usize,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            attributes: Vec::new(),
            classes: Vec::new(),
            content: Content::Empty,
            children: Vec::new(),
            parent: None,
            value: None,
            checked: false,
            writes: 0,
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn is_radio(&self) -> bool {
        self.tag == "input" && self.attribute("type") == Some("radio")
    }
}

/// Arena-backed UI tree with a single `body` root.
///
/// Radio inputs sharing a `name` anywhere in the tree behave as one group:
/// checking one unchecks the rest, as a browser does for radios outside a form.
#[derive(Debug, Clone)]
pub struct MemoryTree {
    elements: Vec<Element>,
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTree {
    /// Create a tree containing only the `body` root.
    #[must_use]
    pub fn new() -> Self {
        Self { elements: vec![Element::new("body")] }
    }

    /// Look up an element anywhere in the tree, including the root.
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let root = self.root();
        if self.attribute(root, "id").as_deref() == Some(id) {
            return Some(root);
        }
        self.find_by_id(&root, id)
    }

    /// Tag name of an element.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.get(node).map(|e| e.tag.as_str())
    }

    /// Attribute value, if set.
    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.get(node).and_then(|e| e.attribute(name)).map(str::to_owned)
    }

    /// Child elements in document order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.get(node).map(|e| e.children.clone()).unwrap_or_default()
    }

    /// Class list in insertion order.
    #[must_use]
    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.get(node).map(|e| e.classes.clone()).unwrap_or_default()
    }

    /// How many times the element's content has been written.
    #[must_use]
    pub fn content_writes(&self, node: NodeId) -> usize {
        self.get(node).map_or(0, |e| e.writes)
    }

    /// Serialise `node` and its descendants to HTML.
    #[must_use]
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn get(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0)
    }

    fn get_mut(&mut self, node: NodeId) -> Result<&mut Element, TreeError> {
        self.elements
            .get_mut(node.0)
            .ok_or_else(|| TreeError::UnknownNode(format!("{node:?}")))
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(el) = self.get(node) else {
            return;
        };
        out.push('<');
        out.push_str(&el.tag);
        for (name, value) in &el.attributes {
            if name == "value" && el.value.is_some() {
                continue;
            }
            write!(out, " {name}=\"{}\"", escape(value)).unwrap_or_default();
        }
        if !el.classes.is_empty() {
            write!(out, " class=\"{}\"", escape(&el.classes.join(" "))).unwrap_or_default();
        }
        if let Some(value) = &el.value {
            write!(out, " value=\"{}\"", escape(value)).unwrap_or_default();
        }
        if el.checked {
            out.push_str(" checked");
        }
        out.push('>');
        if el.tag == "input" {
            return;
        }
        match &el.content {
            Content::Empty => {}
            Content::Text(text) => out.push_str(&escape(text)),
            Content::Html(html) => out.push_str(html),
        }
        for child in &el.children {
            self.write_html(*child, out);
        }
        write!(out, "</{}>", el.tag).unwrap_or_default();
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).into_iter().rev());
        }
        out
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.get(current).and_then(|e| e.parent);
        }
        false
    }
}

impl UiTree for MemoryTree {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId, TreeError> {
        if tag.is_empty() {
            return Err(TreeError::Host("empty tag name".to_owned()));
        }
        self.elements.push(Element::new(tag));
        Ok(NodeId(self.elements.len() - 1))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), TreeError> {
        self.get_mut(*parent)?;
        self.get_mut(*child)?;
        if self.is_ancestor(*child, *parent) {
            return Err(TreeError::Host("cannot append an ancestor to its descendant".to_owned()));
        }
        if let Some(old_parent) = self.get_mut(*child)?.parent.take() {
            self.get_mut(old_parent)?.children.retain(|c| c != child);
        }
        self.get_mut(*child)?.parent = Some(*parent);
        self.get_mut(*parent)?.children.push(*child);
        Ok(())
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), TreeError> {
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(TreeError::Host(format!("invalid attribute name `{name}`")));
        }
        let el = self.get_mut(*node)?;
        if let Some(slot) = el.attributes.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value.to_owned();
        } else {
            el.attributes.push((name.to_owned(), value.to_owned()));
        }
        Ok(())
    }

    fn set_text(&mut self, node: &NodeId, text: &str) -> Result<(), TreeError> {
        let children = self.children(*node);
        for child in children {
            self.get_mut(child)?.parent = None;
        }
        let el = self.get_mut(*node)?;
        el.children.clear();
        el.content = Content::Text(text.to_owned());
        el.writes += 1;
        Ok(())
    }

    fn set_inner_html(&mut self, node: &NodeId, html: &str) -> Result<(), TreeError> {
        let children = self.children(*node);
        for child in children {
            self.get_mut(child)?.parent = None;
        }
        let el = self.get_mut(*node)?;
        el.children.clear();
        el.content = Content::Html(html.to_owned());
        el.writes += 1;
        Ok(())
    }

    fn text(&self, node: &NodeId) -> String {
        let Some(el) = self.get(*node) else {
            return String::new();
        };
        let mut out = match &el.content {
            Content::Empty => String::new(),
            Content::Text(text) | Content::Html(text) => text.clone(),
        };
        for child in &el.children {
            out.push_str(&self.text(child));
        }
        out
    }

    fn add_class(&mut self, node: &NodeId, class: &str) -> Result<(), TreeError> {
        validate_class(class)?;
        let el = self.get_mut(*node)?;
        if !el.classes.iter().any(|c| c == class) {
            el.classes.push(class.to_owned());
        }
        Ok(())
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) -> Result<(), TreeError> {
        validate_class(class)?;
        self.get_mut(*node)?.classes.retain(|c| c != class);
        Ok(())
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.get(*node).is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    fn set_value(&mut self, node: &NodeId, value: &str) -> Result<(), TreeError> {
        self.get_mut(*node)?.value = Some(value.to_owned());
        Ok(())
    }

    fn value(&self, node: &NodeId) -> String {
        let Some(el) = self.get(*node) else {
            return String::new();
        };
        el.value
            .clone()
            .or_else(|| el.attribute("value").map(str::to_owned))
            .unwrap_or_default()
    }

    fn set_checked(&mut self, node: &NodeId, checked: bool) -> Result<(), TreeError> {
        let el = self.get_mut(*node)?;
        el.checked = checked;
        let group = if checked && el.is_radio() {
            el.attribute("name").map(str::to_owned)
        } else {
            None
        };
        if let Some(name) = group {
            for other in &mut self.elements {
                if other.is_radio() && other.attribute("name") == Some(name.as_str()) {
                    other.checked = false;
                }
            }
            self.get_mut(*node)?.checked = true;
        }
        Ok(())
    }

    fn checked(&self, node: &NodeId) -> bool {
        self.get(*node).is_some_and(|e| e.checked)
    }

    fn find_by_id(&self, root: &NodeId, id: &str) -> Option<NodeId> {
        self.descendants(*root)
            .into_iter()
            .find(|n| self.get(*n).and_then(|e| e.attribute("id")) == Some(id))
    }
}

fn validate_class(class: &str) -> Result<(), TreeError> {
    if class.is_empty() || class.contains(char::is_whitespace) {
        return Err(TreeError::Host(format!("invalid class token `{class}`")));
    }
    Ok(())
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
