//! Target schema description
//!
//! The conversion pipeline needs very little from the rich-text schema: which
//! tags are block-level, which subtrees are verbatim (code), and which tag is
//! the container a bare inline parse lands in. `Schema` carries exactly that.
//!
//! The block-tag set is derived from the node table on first use and cached
//! on the schema instance itself, so two threads asking at once can at worst
//! compute the same set twice before one wins the cell.

use once_cell::sync::OnceCell;
use std::collections::{HashMap, HashSet};

/// Classification of a single tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSpec {
    /// Block-level node; may not appear inside the inline container
    pub block: bool,
    /// Content is verbatim; normalization must not touch text inside it
    pub verbatim: bool,
}

/// Tag classification table for a rich-text schema
#[derive(Debug)]
pub struct Schema {
    nodes: HashMap<String, NodeSpec>,
    inline_container: String,
    block_tags: OnceCell<HashSet<String>>,
}

impl Schema {
    /// Build a schema from an explicit tag table
    pub fn new(nodes: HashMap<String, NodeSpec>, inline_container: &str) -> Self {
        Schema {
            nodes,
            inline_container: inline_container.to_string(),
            block_tags: OnceCell::new(),
        }
    }

    /// Default schema matching a conventional rich-text editor
    pub fn rich_text() -> Self {
        let block = NodeSpec {
            block: true,
            verbatim: false,
        };
        let inline = NodeSpec {
            block: false,
            verbatim: false,
        };
        let mut nodes = HashMap::new();
        for tag in [
            "p",
            "h1",
            "h2",
            "h3",
            "h4",
            "h5",
            "h6",
            "ul",
            "ol",
            "li",
            "blockquote",
            "hr",
            "table",
            "thead",
            "tbody",
            "tr",
            "th",
            "td",
            "figure",
            "div",
        ] {
            nodes.insert(tag.to_string(), block);
        }
        nodes.insert(
            "pre".to_string(),
            NodeSpec {
                block: true,
                verbatim: true,
            },
        );
        for tag in ["em", "strong", "a", "span", "del", "sup", "sub", "img", "br"] {
            nodes.insert(tag.to_string(), inline);
        }
        nodes.insert(
            "code".to_string(),
            NodeSpec {
                block: false,
                verbatim: true,
            },
        );
        Schema::new(nodes, "p")
    }

    /// Tag of the container an inline parse is implicitly wrapped in
    pub fn inline_container(&self) -> &str {
        &self.inline_container
    }

    pub fn is_block(&self, tag: &str) -> bool {
        self.nodes.get(tag).is_some_and(|spec| spec.block)
    }

    pub fn is_verbatim(&self, tag: &str) -> bool {
        self.nodes.get(tag).is_some_and(|spec| spec.verbatim)
    }

    /// Set of block-level tags, computed once per schema instance
    pub fn block_tags(&self) -> &HashSet<String> {
        self.block_tags.get_or_init(|| {
            self.nodes
                .iter()
                .filter(|(_, spec)| spec.block)
                .map(|(tag, _)| tag.clone())
                .collect()
        })
    }
}

impl Default for Schema {
    fn default() -> Self {
        Schema::rich_text()
    }
}
