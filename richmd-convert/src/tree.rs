//! Arena-backed markup tree
//!
//! Renderer output is parsed into an addressable tree so hooks and the
//! normalizer can restructure it before the result is read back out as
//! markup text. Nodes live in a flat arena and reference each other through
//! integer handles, which turns reparenting (the block-extraction pass) into
//! plain index rewrites.
//!
//! # Library Choice
//!
//! Parsing uses `html5ever` + `markup5ever_rcdom`: a browser-grade parser
//! that handles whatever a Markdown renderer (or a raw-markup author) throws
//! at it. The RcDom is converted into the arena immediately after parsing;
//! nothing outside this module touches reference-counted DOM handles.

use crate::error::ConvertError;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use std::fmt::Write;

/// Handle to a node inside a [`MarkupTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Payload of a markup tree node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Synthetic root; never serialized
    Root,
    /// Element with tag name and attributes in document order
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    /// Text leaf
    Text(String),
}

#[derive(Debug)]
struct MarkupNode {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Ordered tree of markup elements and text leaves
///
/// Constructed fresh per parse call, mutated in place, discarded after
/// [`MarkupTree::inner_markup`] is read out. Detached nodes stay in the
/// arena; they are simply unreachable from the root.
#[derive(Debug)]
pub struct MarkupTree {
    nodes: Vec<MarkupNode>,
}

const ROOT: NodeId = NodeId(0);

/// Tags serialized without a closing tag
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl MarkupTree {
    /// Create an empty tree containing only the root
    pub fn new() -> Self {
        MarkupTree {
            nodes: vec![MarkupNode {
                data: NodeData::Root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Parse serialized markup into a tree
    ///
    /// The input is treated as body content; surrounding document structure
    /// the parser materializes (html/head/body) is not represented.
    pub fn parse(markup: &str) -> Result<MarkupTree, ConvertError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut markup.as_bytes())
            .map_err(|e| ConvertError::TreeParse(e.to_string()))?;

        let body = find_body(&dom.document)
            .ok_or_else(|| ConvertError::TreeParse("no body element in parse result".into()))?;

        let mut tree = MarkupTree::new();
        for child in body.children.borrow().iter() {
            tree.convert_rcdom(child, ROOT);
        }
        Ok(tree)
    }

    fn convert_rcdom(&mut self, handle: &Handle, parent: NodeId) {
        match &handle.data {
            RcNodeData::Element { name, attrs, .. } => {
                let tag = name.local.to_string();
                let attrs = attrs
                    .borrow()
                    .iter()
                    .map(|a| (a.name.local.to_string(), a.value.to_string()))
                    .collect();
                let id = self.create_element_with_attrs(tag, attrs);
                self.append(parent, id);
                for child in handle.children.borrow().iter() {
                    self.convert_rcdom(child, id);
                }
            }
            RcNodeData::Text { contents } => {
                let id = self.create_text(contents.borrow().to_string());
                self.append(parent, id);
            }
            // Comments, doctypes and processing instructions are renderer
            // noise with no counterpart in the document model.
            _ => {}
        }
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    /// Tag name if the node is an element
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Text content if the node is a text leaf
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, id: NodeId) -> Option<&mut String> {
        match &mut self.nodes[id.0].data {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Attribute value on an element
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// Set (or replace) an attribute on an element
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attrs, .. } = &mut self.nodes[id.0].data {
            if let Some(entry) = attrs.iter_mut().find(|(key, _)| key == name) {
                entry.1 = value.to_string();
            } else {
                attrs.push((name.to_string(), value.to_string()));
            }
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Index of a node within its parent's child list
    pub fn position_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.nodes[parent.0].children.iter().position(|&c| c == id)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let pos = self.position_in_parent(id)?;
        self.nodes[parent.0].children.get(pos + 1).copied()
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.create_element_with_attrs(tag.to_string(), Vec::new())
    }

    fn create_element_with_attrs(&mut self, tag: String, attrs: Vec<(String, String)>) -> NodeId {
        self.push_node(NodeData::Element { tag, attrs })
    }

    pub fn create_text(&mut self, text: String) -> NodeId {
        self.push_node(NodeData::Text(text))
    }

    fn push_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MarkupNode {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append a detached node as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert a detached node at `index` in `parent`'s child list
    ///
    /// Out-of-range indices clamp to the end of the list.
    pub fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        let len = self.nodes[parent.0].children.len();
        self.nodes[parent.0].children.insert(index.min(len), child);
    }

    /// Remove a node from its parent, leaving it (and its subtree) detached
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    /// All nodes reachable from `id`, preorder, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Serialize the children of `id` back to markup text
    pub fn inner_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_node(&mut out, child);
        }
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId) {
        match &self.nodes[id.0].data {
            NodeData::Root => {}
            NodeData::Text(text) => {
                out.push_str(&html_escape::encode_text(text));
            }
            NodeData::Element { tag, attrs } => {
                let _ = write!(out, "<{tag}");
                for (name, value) in attrs {
                    let _ = write!(
                        out,
                        " {name}=\"{}\"",
                        html_escape::encode_double_quoted_attribute(value)
                    );
                }
                if VOID_TAGS.contains(&tag.as_str()) {
                    out.push_str(" />");
                    return;
                }
                out.push('>');
                for &child in self.children(id) {
                    self.write_node(out, child);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }
}

impl Default for MarkupTree {
    fn default() -> Self {
        MarkupTree::new()
    }
}

fn find_body(document: &Handle) -> Option<Handle> {
    let html = find_element(document, "html")?;
    find_element(&html, "body")
}

fn find_element(parent: &Handle, tag: &str) -> Option<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .find(|child| match &child.data {
            RcNodeData::Element { name, .. } => name.local.as_ref() == tag,
            _ => false,
        })
        .cloned()
}
