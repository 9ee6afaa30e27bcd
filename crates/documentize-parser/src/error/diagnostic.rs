use thiserror::Error;

use crate::{error::ErrorCode, span::Span};

/// A message attached to a span of source text.
///
/// A diagnostic normally has exactly one primary label, the place to fix.
/// Secondary labels point at related text such as an earlier definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
    primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            primary: false,
            ..Self::primary(span, message)
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.primary
    }
}

/// A single error about some source text.
///
/// Built with the `with_*` methods:
///
/// ```
/// # use documentize_parser::error::{Diagnostic, ErrorCode};
/// # use documentize_parser::Span;
/// let diag = Diagnostic::error("unterminated string literal")
///     .with_code(ErrorCode::E001)
///     .with_label(Span::new(12..20), "string starts here")
///     .with_help("add the closing quote");
///
/// assert_eq!(diag.code(), Some(ErrorCode::E001));
/// assert_eq!(diag.labels().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error{}: {message}", .code.map(|code| format!("[{code}]")).unwrap_or_default())]
pub struct Diagnostic {
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Adds a primary label.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Adds a secondary label.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Moves every label forward by `offset` bytes.
    ///
    /// Used when a diagnostic was produced against a slice of a larger text.
    pub fn shifted(mut self, offset: usize) -> Self {
        for label in &mut self.labels {
            label.span = label.span.shift(offset);
        }
        self
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns the first primary label, if any.
    pub fn primary_label(&self) -> Option<&Label> {
        self.labels.iter().find(|label| label.is_primary())
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_and_without_code() {
        let coded = Diagnostic::error("multiple marker tags found").with_code(ErrorCode::E101);
        assert_eq!(coded.to_string(), "error[E101]: multiple marker tags found");

        let plain = Diagnostic::error("nothing to document");
        assert_eq!(plain.to_string(), "error: nothing to document");
    }

    #[test]
    fn test_labels_keep_order_and_kind() {
        let diag = Diagnostic::error("duplicate")
            .with_label(Span::new(10..14), "again")
            .with_secondary_label(Span::new(2..6), "first");

        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(diag.primary_label().map(Label::message), Some("again"));
    }

    #[test]
    fn test_shifted_moves_every_label() {
        let diag = Diagnostic::error("x")
            .with_label(Span::new(1..2), "a")
            .with_secondary_label(Span::new(3..5), "b")
            .shifted(100);

        let spans: Vec<_> = diag.labels().iter().map(Label::span).collect();
        assert_eq!(spans, vec![Span::new(101..102), Span::new(103..105)]);
    }

    #[test]
    fn test_help_is_optional() {
        assert_eq!(Diagnostic::error("x").help(), None);
        assert_eq!(
            Diagnostic::error("x").with_help("try this").help(),
            Some("try this")
        );
    }
}
