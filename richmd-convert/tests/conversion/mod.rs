//! End-to-end conversion scenarios (Markdown source → normalized markup)

use insta::assert_snapshot;
use richmd_convert::error::ConvertError;
use richmd_convert::{
    ConversionDriver, MarkupTree, ParseOptions, RenderOptions, Renderer, Schema, SchemaHook,
};

fn parse(md: &str) -> String {
    ConversionDriver::default().parse(md, &ParseOptions::default())
}

fn parse_inline(md: &str) -> String {
    ConversionDriver::default().parse(md, &ParseOptions { inline: true })
}

#[test]
fn paragraph_with_emphasis() {
    assert_eq!(parse("Hello **world**"), "<p>Hello <strong>world</strong></p>");
}

#[test]
fn heading_then_paragraph_loses_structural_newline() {
    assert_eq!(parse("# Title\n\nBody"), "<h1>Title</h1><p>Body</p>");
}

#[test]
fn list_rendering() {
    assert_snapshot!(parse("- a\n- b"), @"<ul>\n<li>a</li><li>b</li></ul>");
}

#[test]
fn strikethrough_is_enabled_by_default() {
    assert_eq!(parse("~~gone~~"), "<p><del>gone</del></p>");
}

#[test]
fn code_block_keeps_inner_whitespace() {
    assert_snapshot!(parse("```\nlet x = 1;\n```"), @"<pre><code>let x = 1;\n</code></pre>");
}

#[test]
fn raw_markup_passes_through_by_default() {
    assert_eq!(parse("a <span>b</span>"), "<p>a <span>b</span></p>");
}

#[test]
fn raw_markup_can_be_disabled() {
    let driver = ConversionDriver::new(Schema::rich_text()).with_render_options(RenderOptions {
        allow_raw_markup: false,
        ..RenderOptions::default()
    });
    // The renderer replaces the raw tags with comments, which the tree
    // drops; the inner text survives.
    assert_eq!(
        driver.parse("a <span>b</span>", &ParseOptions::default()),
        "<p>a b</p>"
    );
}

#[test]
fn inline_parse_restores_surrounding_whitespace() {
    assert_eq!(parse_inline("  *hi*  "), "  <em>hi</em>  ");
}

#[test]
fn inline_parse_with_leading_blank_line_keeps_wrapper() {
    assert_eq!(parse_inline("\n\nhi  "), "<p>hi  </p>");
}

struct BrokenRenderer;

impl Renderer for BrokenRenderer {
    fn render(&self, _text: &str, _options: &RenderOptions) -> Result<String, ConvertError> {
        Err(ConvertError::RenderFailed("renderer is down".to_string()))
    }

    fn render_inline(&self, text: &str, options: &RenderOptions) -> Result<String, ConvertError> {
        self.render(text, options)
    }
}

#[test]
fn renderer_failure_degrades_to_raw_text() {
    let driver =
        ConversionDriver::new(Schema::rich_text()).with_renderer(Box::new(BrokenRenderer));
    assert_eq!(driver.parse("anything", &ParseOptions::default()), "anything");
}

struct FigureHook;

impl SchemaHook for FigureHook {
    fn name(&self) -> &str {
        "figure"
    }

    fn update_dom(&self, tree: &mut MarkupTree) -> Result<(), ConvertError> {
        let root = tree.root();
        if let Some(&first) = tree.children(root).first() {
            let figure = tree.create_element("figure");
            tree.append(first, figure);
        }
        Ok(())
    }
}

#[test]
fn hook_inserted_block_is_extracted_from_paragraph() {
    let mut driver = ConversionDriver::new(Schema::rich_text());
    driver.register_hook(Box::new(FigureHook));
    // The hook nests a figure inside the paragraph; normalization pulls it
    // back out to a sibling position.
    assert_eq!(
        driver.parse("x", &ParseOptions::default()),
        "<p>x</p><figure></figure>"
    );
}

struct HardBreakHook;

impl SchemaHook for HardBreakHook {
    fn name(&self) -> &str {
        "hard-break"
    }

    fn setup(&self, options: &mut RenderOptions) {
        options.line_breaks_as_hard = true;
    }
}

#[test]
fn hook_setup_adjusts_render_options_at_registration() {
    let mut driver = ConversionDriver::new(Schema::rich_text());
    driver.register_hook(Box::new(HardBreakHook));
    assert_eq!(
        driver.parse("a\nb", &ParseOptions::default()),
        "<p>a<br />b</p>"
    );
}

struct MarkerHook(&'static str);

impl SchemaHook for MarkerHook {
    fn name(&self) -> &str {
        self.0
    }

    fn update_dom(&self, tree: &mut MarkupTree) -> Result<(), ConvertError> {
        let root = tree.root();
        let marker = tree.create_text(self.0.to_string());
        tree.append(root, marker);
        Ok(())
    }
}

#[test]
fn hooks_run_in_registration_order() {
    let mut driver = ConversionDriver::new(Schema::rich_text());
    driver.register_hook(Box::new(MarkerHook("one")));
    driver.register_hook(Box::new(MarkerHook("two")));
    assert_eq!(
        driver.parse("x", &ParseOptions::default()),
        "<p>x</p>onetwo"
    );
}

struct FailingHook;

impl SchemaHook for FailingHook {
    fn name(&self) -> &str {
        "failing"
    }

    fn update_dom(&self, _tree: &mut MarkupTree) -> Result<(), ConvertError> {
        Err(ConvertError::RenderFailed("boom".to_string()))
    }
}

#[test]
fn hook_failure_degrades_to_raw_text() {
    let mut driver = ConversionDriver::new(Schema::rich_text());
    driver.register_hook(Box::new(FailingHook));
    assert_eq!(driver.parse("# fine", &ParseOptions::default()), "# fine");
}
