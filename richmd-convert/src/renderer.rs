//! Markdown renderer boundary
//!
//! The renderer is an external collaborator: the conversion pipeline only
//! needs a function from Markdown text to serialized markup text. We consume
//! it through the [`Renderer`] trait so the driver can be tested against a
//! stub, and provide [`ComrakRenderer`] as the default implementation.
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown rendering. This choice is based on:
//! - CommonMark compliance with GitHub-flavored extensions
//! - Robust and well-maintained
//! - A single options struct covering everything the pipeline configures

use crate::error::ConvertError;
use comrak::{markdown_to_html, ComrakOptions};

/// Rendering options fixed at driver construction time.
///
/// These map one-to-one onto the knobs the host exposes; [`ComrakRenderer`]
/// translates them into `comrak` options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pass raw markup in the Markdown source through to the output
    pub allow_raw_markup: bool,
    /// Render single line breaks as hard breaks instead of soft breaks
    pub line_breaks_as_hard: bool,
    /// Enable GitHub-flavored extensions (tables, strikethrough, autolink, tasklists)
    pub github_flavored_extensions: bool,
    /// Emit anchor ids on headings
    pub heading_anchors: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            allow_raw_markup: true,
            line_breaks_as_hard: false,
            github_flavored_extensions: true,
            heading_anchors: false,
        }
    }
}

/// Trait for Markdown renderers
///
/// Implementors turn Markdown text into serialized markup text. Both entry
/// points must be pure functions of their inputs.
pub trait Renderer {
    /// Render block-level Markdown to markup text
    fn render(&self, text: &str, options: &RenderOptions) -> Result<String, ConvertError>;

    /// Render Markdown in inline mode
    ///
    /// Implementations may delegate to [`Renderer::render`]; the normalizer
    /// unwraps the implicit paragraph container an inline parse produces.
    fn render_inline(&self, text: &str, options: &RenderOptions) -> Result<String, ConvertError>;
}

/// Default renderer backed by `comrak`
#[derive(Debug, Default)]
pub struct ComrakRenderer;

impl ComrakRenderer {
    fn comrak_options(options: &RenderOptions) -> ComrakOptions<'static> {
        let mut comrak = ComrakOptions::default();
        if options.github_flavored_extensions {
            comrak.extension.table = true;
            comrak.extension.strikethrough = true;
            comrak.extension.autolink = true;
            comrak.extension.tasklist = true;
        }
        if options.heading_anchors {
            comrak.extension.header_ids = Some(String::new());
        }
        comrak.render.unsafe_ = options.allow_raw_markup;
        comrak.render.hardbreaks = options.line_breaks_as_hard;
        comrak
    }
}

impl Renderer for ComrakRenderer {
    fn render(&self, text: &str, options: &RenderOptions) -> Result<String, ConvertError> {
        let comrak = Self::comrak_options(options);
        Ok(markdown_to_html(text, &comrak))
    }

    fn render_inline(&self, text: &str, options: &RenderOptions) -> Result<String, ConvertError> {
        // comrak has no inline-only entry point. Block rendering wraps the
        // content in an implicit paragraph, which the inline unwrap step of
        // the normalizer removes again.
        self.render(text, options)
    }
}
