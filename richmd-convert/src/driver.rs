//! Conversion pipeline driver
//!
//! Ties the pieces together: render the Markdown source, clean the raw
//! renderer output, parse it into a tree, let registered hooks rewrite the
//! tree, normalize, and serialize the result. Any failure along the way is
//! caught here and downgraded to returning the source text unchanged, so a
//! broken renderer or hook can never block content from loading.

use crate::error::ConvertError;
use crate::hooks::SchemaHook;
use crate::normalize::{normalize, NormalizeOptions};
use crate::renderer::{ComrakRenderer, RenderOptions, Renderer};
use crate::schema::Schema;
use crate::tree::MarkupTree;

/// Per-call parse parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Parse in inline mode: unwrap the implicit paragraph and restore the
    /// source's surrounding whitespace
    pub inline: bool,
}

/// Markdown to normalized-markup converter
pub struct ConversionDriver {
    renderer: Box<dyn Renderer>,
    schema: Schema,
    hooks: Vec<Box<dyn SchemaHook>>,
    options: RenderOptions,
}

impl ConversionDriver {
    pub fn new(schema: Schema) -> Self {
        ConversionDriver {
            renderer: Box::new(ComrakRenderer),
            schema,
            hooks: Vec::new(),
            options: RenderOptions::default(),
        }
    }

    /// Replace the default renderer
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replace the render options fixed at construction
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Register a hook at the end of the ordered hook list
    ///
    /// The hook's `setup` runs once, here; its `update_dom` runs on every
    /// subsequent [`ConversionDriver::parse`] call, in registration order.
    pub fn register_hook(&mut self, hook: Box<dyn SchemaHook>) {
        hook.setup(&mut self.options);
        self.hooks.push(hook);
    }

    /// Convert Markdown source text to normalized markup text
    ///
    /// Never fails: renderer, hook, or tree errors are logged and the
    /// source text is returned unchanged.
    pub fn parse(&self, content: &str, options: &ParseOptions) -> String {
        match self.try_parse(content, options) {
            Ok(markup) => markup,
            Err(err) => {
                tracing::warn!(error = %err, "conversion failed, falling back to raw text");
                content.to_string()
            }
        }
    }

    fn try_parse(&self, content: &str, options: &ParseOptions) -> Result<String, ConvertError> {
        let raw = if options.inline {
            self.renderer.render_inline(content, &self.options)?
        } else {
            self.renderer.render(content, &self.options)?
        };
        let cleaned = strip_trailing_newline(&raw);

        let mut tree = MarkupTree::parse(cleaned)?;
        for hook in &self.hooks {
            hook.update_dom(&mut tree)
                .map_err(|err| ConvertError::HookFailed {
                    hook: hook.name().to_string(),
                    message: err.to_string(),
                })?;
        }

        normalize(
            &mut tree,
            &self.schema,
            &NormalizeOptions {
                inline: options.inline,
                source_text: content,
            },
        );
        Ok(tree.inner_markup(tree.root()))
    }
}

impl Default for ConversionDriver {
    fn default() -> Self {
        ConversionDriver::new(Schema::rich_text())
    }
}

/// Strip the single line feed the renderer appends to its output. An output
/// that is exactly one line feed is a soft break and is kept verbatim.
fn strip_trailing_newline(raw: &str) -> &str {
    if raw == "\n" {
        return raw;
    }
    raw.strip_suffix('\n').unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_exactly_one_trailing_newline() {
        assert_eq!(strip_trailing_newline("<p>x</p>\n"), "<p>x</p>");
        assert_eq!(strip_trailing_newline("<p>x</p>\n\n"), "<p>x</p>\n");
        assert_eq!(strip_trailing_newline("<p>x</p>"), "<p>x</p>");
    }

    #[test]
    fn preserves_lone_soft_break() {
        assert_eq!(strip_trailing_newline("\n"), "\n");
    }
}
