//! Rendered-tree normalization
//!
//! The renderer emits generic markup; the target schema is stricter. Three
//! passes close the gap: block-level elements are pulled out of inline
//! containers, structural newlines the renderer inserts after block tags are
//! stripped, and for inline parses the implicit wrapping paragraph is
//! removed with the source text's surrounding whitespace spliced back in.
//!
//! Every pass degrades to a no-op on trees it does not recognize; this
//! module never fails.

use crate::schema::Schema;
use crate::tree::{MarkupTree, NodeId};

/// Per-call normalization parameters
#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions<'a> {
    /// The source was parsed in inline mode
    pub inline: bool,
    /// Original Markdown source, used to restore surrounding whitespace
    pub source_text: &'a str,
}

/// Normalize a rendered markup tree in place
pub fn normalize(tree: &mut MarkupTree, schema: &Schema, options: &NormalizeOptions) {
    extract_blocks(tree, schema);
    strip_newline_artifacts(tree, schema);
    if options.inline {
        unwrap_inline_root(tree, schema, options.source_text);
    }
}

/// Relocate block-level elements nested directly inside an inline container
/// to be following siblings of that container, preserving document order.
fn extract_blocks(tree: &mut MarkupTree, schema: &Schema) {
    let containers: Vec<NodeId> = tree
        .descendants(tree.root())
        .into_iter()
        .filter(|&node| tree.tag(node) == Some(schema.inline_container()))
        .collect();

    for container in containers {
        let Some(parent) = tree.parent(container) else {
            continue;
        };
        let extracted: Vec<NodeId> = tree
            .children(container)
            .iter()
            .copied()
            .filter(|&child| {
                tree.tag(child)
                    .is_some_and(|tag| schema.block_tags().contains(tag))
            })
            .collect();
        for (i, node) in extracted.into_iter().enumerate() {
            let Some(pos) = tree.position_in_parent(container) else {
                break;
            };
            tree.insert(parent, pos + 1 + i, node);
        }
    }
}

/// Strip the single structural line feed the renderer places after closing
/// block tags. Verbatim regions keep their whitespace untouched.
fn strip_newline_artifacts(tree: &mut MarkupTree, schema: &Schema) {
    let elements: Vec<NodeId> = tree
        .descendants(tree.root())
        .into_iter()
        .filter(|&node| tree.tag(node).is_some())
        .collect();

    for element in elements {
        if in_verbatim(tree, element, schema) {
            continue;
        }
        let Some(sibling) = tree.next_sibling(element) else {
            continue;
        };
        let mut now_empty = false;
        match tree.text_mut(sibling) {
            Some(text) if text.starts_with('\n') => {
                text.remove(0);
                now_empty = text.is_empty();
            }
            _ => continue,
        }
        if now_empty {
            tree.detach(sibling);
        }
    }
}

fn in_verbatim(tree: &MarkupTree, node: NodeId, schema: &Schema) -> bool {
    let mut current = tree.parent(node);
    while let Some(ancestor) = current {
        if tree.tag(ancestor).is_some_and(|tag| schema.is_verbatim(tag)) {
            return true;
        }
        current = tree.parent(ancestor);
    }
    false
}

/// Remove the implicit paragraph an inline parse is wrapped in and splice
/// the source text's leading/trailing whitespace back around its content.
fn unwrap_inline_root(tree: &mut MarkupTree, schema: &Schema, source: &str) {
    let root = tree.root();
    let Some(&container) = tree.children(root).first() else {
        return;
    };
    if tree.tag(container) != Some(schema.inline_container()) {
        return;
    }

    let leading = &source[..source.len() - source.trim_start().len()];
    let trailing = &source[source.trim_end().len()..];

    // A source starting with a blank line asks for an explicit empty first
    // block. Intentional narrow heuristic: keep the wrapper and restore only
    // the trailing whitespace inside it.
    if source.starts_with("\n\n") {
        if !trailing.is_empty() {
            let text = tree.create_text(trailing.to_string());
            tree.append(container, text);
        }
        return;
    }

    let Some(parent) = tree.parent(container) else {
        return;
    };
    let Some(pos) = tree.position_in_parent(container) else {
        return;
    };
    // Trailing whitespace acts as a block separator when another block
    // follows; only restore it when the container is the last element.
    let has_following_element = tree.children(parent)[pos + 1..]
        .iter()
        .any(|&node| tree.tag(node).is_some());

    let children: Vec<NodeId> = tree.children(container).to_vec();
    tree.detach(container);

    let mut at = pos;
    if !leading.is_empty() {
        let lead = tree.create_text(leading.to_string());
        tree.insert(parent, at, lead);
        at += 1;
    }
    for child in children {
        tree.insert(parent, at, child);
        at += 1;
    }
    if !trailing.is_empty() && !has_following_element {
        let trail = tree.create_text(trailing.to_string());
        tree.insert(parent, at, trail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_options() -> NormalizeOptions<'static> {
        NormalizeOptions {
            inline: false,
            source_text: "",
        }
    }

    #[test]
    fn extracts_block_out_of_inline_container() {
        let mut tree = MarkupTree::new();
        let root = tree.root();
        let p = tree.create_element("p");
        tree.append(root, p);
        let a = tree.create_text("a".into());
        tree.append(p, a);
        let div = tree.create_element("div");
        tree.append(p, div);
        let b = tree.create_text("b".into());
        tree.append(div, b);
        let c = tree.create_text("c".into());
        tree.append(p, c);

        normalize(&mut tree, &Schema::rich_text(), &block_options());
        assert_eq!(tree.inner_markup(root), "<p>ac</p><div>b</div>");
    }

    #[test]
    fn extraction_preserves_sibling_order() {
        let mut tree = MarkupTree::new();
        let root = tree.root();
        let p = tree.create_element("p");
        tree.append(root, p);
        for tag in ["div", "blockquote"] {
            let el = tree.create_element(tag);
            tree.append(p, el);
        }

        normalize(&mut tree, &Schema::rich_text(), &block_options());
        assert_eq!(
            tree.inner_markup(root),
            "<p></p><div></div><blockquote></blockquote>"
        );
    }

    #[test]
    fn strips_structural_newline_after_block() {
        let mut tree = MarkupTree::new();
        let root = tree.root();
        let h1 = tree.create_element("h1");
        tree.append(root, h1);
        let title = tree.create_text("x".into());
        tree.append(h1, title);
        let text = tree.create_text("\nHello".into());
        tree.append(root, text);

        normalize(&mut tree, &Schema::rich_text(), &block_options());
        assert_eq!(tree.inner_markup(root), "<h1>x</h1>Hello");
    }

    #[test]
    fn drops_text_leaf_reduced_to_nothing() {
        let mut tree = MarkupTree::new();
        let root = tree.root();
        let hr = tree.create_element("hr");
        tree.append(root, hr);
        let text = tree.create_text("\n".into());
        tree.append(root, text);

        normalize(&mut tree, &Schema::rich_text(), &block_options());
        assert_eq!(tree.inner_markup(root), "<hr />");
    }

    #[test]
    fn verbatim_regions_keep_newlines() {
        let mut tree = MarkupTree::new();
        let root = tree.root();
        let pre = tree.create_element("pre");
        tree.append(root, pre);
        let span = tree.create_element("span");
        tree.append(pre, span);
        let text = tree.create_text("\ncontent".into());
        tree.append(pre, text);

        normalize(&mut tree, &Schema::rich_text(), &block_options());
        assert_eq!(
            tree.inner_markup(root),
            "<pre><span></span>\ncontent</pre>"
        );
    }

    #[test]
    fn inline_unwrap_restores_surrounding_whitespace() {
        let mut tree = MarkupTree::new();
        let root = tree.root();
        let p = tree.create_element("p");
        tree.append(root, p);
        let em = tree.create_element("em");
        tree.append(p, em);
        let hi = tree.create_text("hi".into());
        tree.append(em, hi);

        let options = NormalizeOptions {
            inline: true,
            source_text: "  *hi*  ",
        };
        normalize(&mut tree, &Schema::rich_text(), &options);
        assert_eq!(tree.inner_markup(root), "  <em>hi</em>  ");
    }

    #[test]
    fn inline_unwrap_skipped_in_block_mode() {
        let mut tree = MarkupTree::new();
        let root = tree.root();
        let p = tree.create_element("p");
        tree.append(root, p);
        let hi = tree.create_text("hi".into());
        tree.append(p, hi);

        normalize(&mut tree, &Schema::rich_text(), &block_options());
        assert_eq!(tree.inner_markup(root), "<p>hi</p>");
    }

    #[test]
    fn leading_blank_line_keeps_wrapper() {
        let mut tree = MarkupTree::new();
        let root = tree.root();
        let p = tree.create_element("p");
        tree.append(root, p);
        let hi = tree.create_text("hi".into());
        tree.append(p, hi);

        let options = NormalizeOptions {
            inline: true,
            source_text: "\n\nhi  ",
        };
        normalize(&mut tree, &Schema::rich_text(), &options);
        assert_eq!(tree.inner_markup(root), "<p>hi  </p>");
    }

    #[test]
    fn trailing_whitespace_not_restored_before_following_block() {
        let mut tree = MarkupTree::new();
        let root = tree.root();
        let p = tree.create_element("p");
        tree.append(root, p);
        let a = tree.create_text("a".into());
        tree.append(p, a);
        let div = tree.create_element("div");
        tree.append(root, div);

        let options = NormalizeOptions {
            inline: true,
            source_text: "a  ",
        };
        normalize(&mut tree, &Schema::rich_text(), &options);
        assert_eq!(tree.inner_markup(root), "a<div></div>");
    }
}
