//! In-memory page document.
//!
//! The effects never touch a real browser. They mutate this arena of
//! element nodes, and a host (the desktop webview, the CLI, a test)
//! renders it and feeds events back in.
//!
//! ## Node lifetime
//!
//! Nodes are created detached and become connected when appended under the
//! root. [`Document::remove`] frees a node and its subtree; the slots are
//! reused by later elements. Each [`NodeId`] carries the generation of its
//! slot, so a stale id held by a timer resolves to nothing instead of
//! aliasing the slot's new occupant.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

/// Identifier of a node inside one [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    /// Arena slot, used by hosts to tag rendered elements.
    ///
    /// Only unique among live nodes; resolve it back with [`Document::node_at`].
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Element kinds the pages are built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    Body,
    Main,
    Section,
    Div,
    Span,
    Button,
    Heading,
    Paragraph,
}

impl Tag {
    /// HTML element name
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Body => "body",
            Tag::Main => "main",
            Tag::Section => "section",
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::Button => "button",
            Tag::Heading => "h2",
            Tag::Paragraph => "p",
        }
    }
}

/// A point in client (viewport) coordinates, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box of a rendered element in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlap of two rectangles, `None` when they do not intersect
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// One element of the page
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub tag: Tag,
    /// The `id` attribute
    pub element_id: Option<String>,
    /// Class list, insertion ordered, no duplicates
    pub classes: Vec<String>,
    /// Inline style declarations (custom properties included), insertion ordered
    pub styles: Vec<(String, String)>,
    /// `data-*` attributes without the prefix
    pub data: BTreeMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    /// Last layout box reported by the host
    pub rect: Option<Rect>,
}

impl Node {
    fn new(tag: Tag) -> Self {
        Self {
            tag,
            element_id: None,
            classes: Vec::new(),
            styles: Vec::new(),
            data: BTreeMap::new(),
            text: None,
            children: Vec::new(),
            parent: None,
            rect: None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Space-separated class attribute
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }

    /// Serialized inline `style` attribute
    pub fn style_attr(&self) -> String {
        self.styles
            .iter()
            .map(|(prop, value)| format!("{}: {};", prop, value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn style(&self, prop: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(p, _)| p == prop)
            .map(|(_, v)| v.as_str())
    }
}

/// One arena slot; `node` is None while the slot is on the free list
#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena-backed element tree rooted at a `body` node
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only the root `body`
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node::new(Tag::Body)),
            }],
            free: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId {
            index: 0,
            generation: 0,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// The live node occupying a slot, from a host-side index
    /// (e.g. a `data-node` attribute)
    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        let slot = self.slots.get(index)?;
        slot.node.as_ref().map(|_| NodeId {
            index,
            generation: slot.generation,
        })
    }

    /// Number of arena slots, live or free
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Create a detached element, reusing a freed slot when there is one
    pub fn create_element(&mut self, tag: Tag) -> NodeId {
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.node = Some(Node::new(tag));
                return NodeId {
                    index,
                    generation: slot.generation,
                };
            }
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(Node::new(tag)),
        });
        NodeId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    /// Create an element with classes and append it under `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: Tag, classes: &[&str]) -> NodeId {
        let id = self.create_element(tag);
        for class in classes {
            self.add_class(id, class);
        }
        self.append_child(parent, id);
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is moved, like `appendChild` on an
    /// attached node. Appending a node under itself or its own descendant is
    /// refused.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if parent == child || self.node(parent).is_none() || self.node(child).is_none() {
            return false;
        }
        if self.ancestors(parent).any(|a| a == child) {
            return false;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        true
    }

    fn detach(&mut self, id: NodeId) {
        let parent = self.node(id).and_then(|n| n.parent);
        if let Some(parent) = parent {
            if let Some(p) = self.node_mut(parent) {
                p.children.retain(|c| *c != id);
            }
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
    }

    /// Detach a node and free it along with its subtree.
    /// Returns false if it was already removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root() || self.node(id).is_none() {
            return false;
        }
        let subtree = self.descendants(id);
        self.detach(id);
        for freed in std::iter::once(id).chain(subtree) {
            if let Some(slot) = self.slots.get_mut(freed.index) {
                slot.node = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(freed.index);
            }
        }
        true
    }

    /// Whether the node is reachable from the root
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == self.root() {
                return true;
            }
            current = match self.node(cur) {
                Some(node) => node.parent,
                None => return false,
            };
        }
        false
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// The node itself followed by each parent up to the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = self.node(id).map(|_| id);
        std::iter::successors(start, move |cur| self.parent(*cur))
    }

    /// Every descendant in document (pre-)order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(cur) = stack.pop() {
            out.push(cur);
            stack.extend(self.children(cur).iter().rev().copied());
        }
        out
    }

    pub fn set_element_id(&mut self, id: NodeId, element_id: &str) {
        if let Some(node) = self.node_mut(id) {
            node.element_id = Some(element_id.to_string());
        }
    }

    /// Connected node with the given `id` attribute
    pub fn get_by_id(&self, element_id: &str) -> Option<NodeId> {
        std::iter::once(self.root())
            .chain(self.descendants(self.root()))
            .find(|id| {
                self.node(*id)
                    .and_then(|n| n.element_id.as_deref())
                    .is_some_and(|e| e == element_id)
            })
    }

    /// Connected nodes carrying `class`, in document order
    pub fn query_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    /// Descendants of `scope` carrying `class`, in document order
    pub fn query_class_within(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).is_some_and(|n| n.has_class(class))
    }

    /// Returns true if the class was not already present
    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        match self.node_mut(id) {
            Some(node) if !node.has_class(class) => {
                node.classes.push(class.to_string());
                true
            }
            _ => false,
        }
    }

    /// Returns true if the class was present
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                let before = node.classes.len();
                node.classes.retain(|c| c != class);
                node.classes.len() != before
            }
            None => false,
        }
    }

    /// Set an inline style declaration, replacing an existing one in place
    pub fn set_style(&mut self, id: NodeId, prop: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(node) = self.node_mut(id) {
            match node.styles.iter_mut().find(|(p, _)| p == prop) {
                Some(entry) => entry.1 = value,
                None => node.styles.push((prop.to_string(), value)),
            }
        }
    }

    pub fn style(&self, id: NodeId, prop: &str) -> Option<&str> {
        self.node(id).and_then(|n| n.style(prop))
    }

    pub fn set_data(&mut self, id: NodeId, key: &str, value: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.data.insert(key.to_string(), value.into());
        }
    }

    pub fn data(&self, id: NodeId, key: &str) -> Option<&str> {
        self.node(id)
            .and_then(|n| n.data.get(key))
            .map(String::as_str)
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.text = Some(text.into());
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.text.as_deref())
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        if let Some(node) = self.node_mut(id) {
            node.rect = Some(rect);
        }
    }

    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.node(id).and_then(|n| n.rect)
    }

    /// Number of nodes currently reachable from the root (root included)
    pub fn connected_len(&self) -> usize {
        1 + self.descendants(self.root()).len()
    }

    /// Indented outline of the connected tree, one element per line:
    ///
    /// ```text
    /// body
    ///   div#bg-particles
    ///     div.particle [width: 2.1px; ...]
    /// ```
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        self.render_node(self.root(), 0, &mut out);
        out
    }

    fn render_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        let _ = write!(out, "{}{}", "  ".repeat(depth), node.tag.name());
        if let Some(eid) = &node.element_id {
            let _ = write!(out, "#{}", eid);
        }
        for class in &node.classes {
            let _ = write!(out, ".{}", class);
        }
        for (key, value) in &node.data {
            let _ = write!(out, " data-{}=\"{}\"", key, value);
        }
        if !node.styles.is_empty() {
            let _ = write!(out, " [{}]", node.style_attr());
        }
        if let Some(text) = &node.text {
            let _ = write!(out, " \"{}\"", text);
        }
        out.push('\n');
        for child in &node.children {
            self.render_node(*child, depth + 1, out);
        }
    }
}
