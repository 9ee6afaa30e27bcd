//! Errors raised while building or rendering a document.

use thiserror::Error;

/// Errors produced by the document model.
///
/// Heading levels are checked when a [`Heading`](crate::Heading) is built.
/// Column alignments are only checked when the owning
/// [`Table`](crate::Table) is rendered, because a column may carry a raw
/// alignment string supplied from elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkdownError {
    #[error("Invalid heading level: {0}. Expected a number between `1` and `6`.")]
    InvalidHeadingLevel(i32),

    #[error("Invalid column alignment `\"{0}\"`. Expected one of `\"left\"`, `\"right\"`.")]
    InvalidColumnAlignment(String),
}
