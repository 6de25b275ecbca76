//! # Document Model
//!
//! A small arena-backed element tree standing in for the browser DOM. The
//! renderer, loader and search filter mutate it; the server serializes it
//! to HTML for the browser.
//!
//! Nodes are never freed. Clearing an element detaches its children, which
//! then stop appearing in queries and in the serialized output.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Document shared between the loader, renderer and request handlers
pub type SharedDocument = Arc<Mutex<Document>>;

/// Lock a shared document, ignoring poisoning
pub fn lock(document: &SharedDocument) -> MutexGuard<'_, Document> {
    document.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Index of a node in its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tags serialized without a closing tag
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    hidden: bool,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: None,
            children: Vec::new(),
            parent: None,
            hidden: false,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
}

impl Document {
    /// Create a document with a single root element
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![Element::new(root_tag)],
            root: NodeId(0),
        }
    }

    pub fn into_shared(self) -> SharedDocument {
        Arc::new(Mutex::new(self))
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Element::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    /// Create an element with classes and append it to `parent`
    pub fn append_new(&mut self, parent: NodeId, tag: &str, classes: &[&str]) -> NodeId {
        let node = self.create_element(tag);
        for class in classes {
            self.add_class(node, class);
        }
        self.append_child(parent, node);
        node
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    pub fn element(&self, node: NodeId) -> &Element {
        &self.nodes[node.0]
    }

    fn element_mut(&mut self, node: NodeId) -> &mut Element {
        &mut self.nodes[node.0]
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let previous = self.element(child).parent;
        if let Some(old) = previous {
            self.element_mut(old).children.retain(|c| *c != child);
        }
        self.element_mut(child).parent = Some(parent);
        self.element_mut(parent).children.push(child);
    }

    /// Remove the text and every child of `node`
    pub fn clear(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.element_mut(node).children);
        for child in children {
            self.element_mut(child).parent = None;
        }
        self.element_mut(node).text = None;
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.element(node).children
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.element_mut(node).text = Some(text.into());
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.element(node).text()
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        self.element_mut(node)
            .attributes
            .insert(name.to_string(), value.into());
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        self.element_mut(node).attributes.remove(name);
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).attribute(name)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        let element = self.element_mut(node);
        if !element.classes.iter().any(|c| c == class) {
            element.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.element_mut(node).classes.retain(|c| c != class);
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).classes.iter().any(|c| c == class)
    }

    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        self.element_mut(node).hidden = hidden;
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.element(node).hidden
    }

    /// Attached nodes in document order
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// First attached element whose `id` attribute matches
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|n| self.attribute(*n, "id") == Some(id))
    }

    /// Attached elements carrying `class`, in document order
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    /// Serialize the attached tree
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if self.element(self.root).tag == "html" {
            out.push_str("<!DOCTYPE html>\n");
        }
        self.write_node(self.root, &mut out);
        out
    }

    /// Serialize one subtree
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        let element = self.element(node);
        out.push('<');
        out.push_str(&element.tag);
        if !element.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape(&element.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &element.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        if element.hidden {
            out.push_str(" style=\"display: none\"");
        }
        out.push('>');

        if VOID_TAGS.contains(&element.tag.as_str()) {
            return;
        }

        if let Some(text) = &element.text {
            out.push_str(&escape(text));
        }
        for child in &element.children {
            self.write_node(*child, out);
        }
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }
}

/// Escape text for HTML content and attribute values
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
