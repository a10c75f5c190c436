//! Error types for conversion operations

use std::fmt;

/// Errors that can occur while converting Markdown to markup
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The external renderer failed to produce markup text
    RenderFailed(String),
    /// The renderer output could not be parsed into a markup tree
    TreeParse(String),
    /// A registered schema hook failed while mutating the tree
    HookFailed { hook: String, message: String },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::RenderFailed(msg) => write!(f, "Render error: {msg}"),
            ConvertError::TreeParse(msg) => write!(f, "Tree parse error: {msg}"),
            ConvertError::HookFailed { hook, message } => {
                write!(f, "Hook '{hook}' failed: {message}")
            }
        }
    }
}

impl std::error::Error for ConvertError {}
