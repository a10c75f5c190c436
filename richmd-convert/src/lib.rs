//! Markdown to rich-text markup conversion
//!
//!     This crate converts a linear Markdown text into normalized rich-text
//!     markup, preserving semantic fidelity (emphasis boundaries, whitespace,
//!     block structure) across the conversion.
//!
//!     TLDR: the renderer is not the hard part. Rendering is delegated to a
//!     Markdown library behind the Renderer trait; the core of this crate is
//!     the two algorithms that patch the mismatch between a generic
//!     renderer's output and the stricter rules of a rich-text schema:
//!         - Delimiter flanking repair (./emphasis.rs): walking emphasis
//!           markers inward until both boundaries are legal per the
//!           CommonMark flanking rule, collapsing degenerate spans.
//!         - Render normalization (./normalize.rs): block extraction out of
//!           inline containers, newline-artifact stripping, and inline-mode
//!           unwrapping with whitespace restoration.
//!
//! Architecture
//!
//!     This is a pure lib, that is, it powers the richmd-cli but is shell
//!     agnostic: no code here supposes a shell environment, be it std print,
//!     env vars etc. The only observable side channel is `tracing`.
//!
//!     The file structure :
//!     .
//!     ├── error.rs            # ConvertError
//!     ├── renderer.rs         # Renderer trait + comrak adapter
//!     ├── tree.rs             # arena markup tree, parse + serialize
//!     ├── schema.rs           # tag classification (block / verbatim)
//!     ├── hooks.rs            # SchemaHook extension trait
//!     ├── emphasis.rs         # flanking classifier / shifter / trimmer
//!     ├── normalize.rs        # tree normalization passes
//!     ├── driver.rs           # ConversionDriver orchestration
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── conversion          # end-to-end driver scenarios (insta)
//!     └── properties          # algebraic laws of the trimmer (proptest)
//!
//!     Note that rust does not by default discover tests in subdirectories,
//!     so we need to include these in the mod.
//!
//! Core Algorithms
//!
//!     The markup tree is arena-backed (./tree.rs): nodes reference each
//!     other by integer handle, so the reparenting done by block extraction
//!     is an index rewrite, not pointer surgery. The tree is built per parse
//!     call from the renderer's output and discarded after serialization.
//!
//!     The emphasis trimmer is not wired into the parse pipeline; it is the
//!     serialization-side repair used when wrapping an arbitrary text run in
//!     emphasis markers. It shares the whitespace/punctuation edge cases
//!     with the normalizer, which is why it lives here.
//!
//! Error Policy
//!
//!     Nothing in this crate panics on bad input. The emphasis helpers are
//!     total functions; the normalizer degrades to no-ops on trees it does
//!     not recognize; and the driver catches every remaining failure
//!     (renderer, hook, tree parse) at its boundary, logs a warning and
//!     returns the source text unchanged. A broken extension never blocks
//!     content from loading.
//!
//! Library Choices
//!
//!     We offload as much as possible to better, specialized crates:
//!     comrak for Markdown rendering, html5ever + markup5ever_rcdom for
//!     parsing the rendered markup (a browser-grade parser, since raw HTML
//!     can pass through the renderer), html-escape on the way back out.
//!     The scope here is only the two correction algorithms and the glue.

pub mod driver;
pub mod emphasis;
pub mod error;
pub mod hooks;
pub mod normalize;
pub mod renderer;
pub mod schema;
pub mod tree;

pub use driver::{ConversionDriver, ParseOptions};
pub use error::ConvertError;
pub use hooks::SchemaHook;
pub use renderer::{ComrakRenderer, RenderOptions, Renderer};
pub use schema::{NodeSpec, Schema};
pub use tree::{MarkupTree, NodeData, NodeId};
