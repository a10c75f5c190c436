//! Conversion hooks
//!
//! Hooks let embedders customize the pipeline without forking it. A hook can
//! adjust the render options when it is registered and rewrite the parsed
//! tree on every conversion. The driver keeps hooks in an explicit ordered
//! list and runs `update_dom` in registration order.

use crate::error::ConvertError;
use crate::renderer::RenderOptions;
use crate::tree::MarkupTree;

/// Extension point for embedders of the conversion pipeline
pub trait SchemaHook {
    /// Name used in diagnostics when the hook fails
    fn name(&self) -> &str;

    /// Adjust render options; called once when the hook is registered
    fn setup(&self, _options: &mut RenderOptions) {}

    /// Rewrite the parsed tree; called once per conversion, before
    /// normalization
    fn update_dom(&self, _tree: &mut MarkupTree) -> Result<(), ConvertError> {
        Ok(())
    }
}
