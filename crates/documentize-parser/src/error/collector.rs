use std::fmt;

use crate::error::Diagnostic;

/// One or more diagnostics returned from a failed scan.
///
/// Displays as the first diagnostic, followed by `(+N more)` when there are
/// others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Moves every label of every diagnostic forward by `offset` bytes.
    pub fn shifted(self, offset: usize) -> Self {
        Self::new(
            self.diagnostics
                .into_iter()
                .map(|diagnostic| diagnostic.shifted(offset))
                .collect(),
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.diagnostics.first() else {
            return Ok(());
        };
        write!(f, "{first}")?;
        match self.diagnostics.len() {
            0 | 1 => Ok(()),
            count => write!(f, " (+{} more)", count - 1),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(vec![diagnostic])
    }
}

/// Accumulates diagnostics so a scan can report every problem at once.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Fails with every collected diagnostic, if there are any.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(ParseError::new(self.diagnostics))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_display_single_and_multiple() {
        let single = ParseError::from(Diagnostic::error("first").with_code(ErrorCode::E002));
        assert_eq!(single.to_string(), "error[E002]: first");

        let many = ParseError::new(vec![
            Diagnostic::error("first"),
            Diagnostic::error("second"),
            Diagnostic::error("third"),
        ]);
        assert_eq!(many.to_string(), "error: first (+2 more)");
    }

    #[test]
    fn test_collector_empty_is_ok() {
        assert!(DiagnosticCollector::new().finish().is_ok());
    }

    #[test]
    fn test_collector_keeps_all_diagnostics() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::error("first"));
        collector.emit(Diagnostic::error("second"));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[1].message(), "second");
    }

    #[test]
    fn test_shifted_moves_every_diagnostic() {
        let err = ParseError::new(vec![
            Diagnostic::error("a").with_label(Span::new(0..1), "here"),
            Diagnostic::error("b").with_label(Span::new(4..6), "here"),
        ])
        .shifted(10);

        let starts: Vec<_> = err
            .diagnostics()
            .iter()
            .filter_map(Diagnostic::primary_label)
            .map(|label| label.span().start())
            .collect();
        assert_eq!(starts, vec![10, 14]);
    }
}
