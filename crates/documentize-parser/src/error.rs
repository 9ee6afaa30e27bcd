//! Diagnostics reported while scanning component sources.
//!
//! Every problem found by this crate is a [`Diagnostic`]: an [`ErrorCode`], a
//! message, one primary [`Label`] pointing at the offending text, optional
//! secondary labels for related locations, and optional help.
//! Entry points return [`ParseError`], which carries one or more diagnostics.
//!
//! ```
//! # use documentize_parser::error::{Diagnostic, ErrorCode};
//! # use documentize_parser::Span;
//! let diag = Diagnostic::error("attribute `data-description` is defined multiple times")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(40..56), "duplicate attribute")
//!     .with_secondary_label(Span::new(6..22), "first defined here");
//!
//! assert_eq!(
//!     diag.to_string(),
//!     "error[E100]: attribute `data-description` is defined multiple times"
//! );
//! ```

mod code;
mod collector;
mod diagnostic;

pub(crate) use collector::DiagnosticCollector;

pub use code::ErrorCode;
pub use collector::ParseError;
pub use diagnostic::{Diagnostic, Label};
