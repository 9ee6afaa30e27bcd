//! Rendering Documentize errors with miette.
//!
//! Every [`DocumentizeError`] becomes one or more [`Report`]s. A parser
//! failure yields one report per diagnostic, carrying the component text under
//! its file name so the snippet shows the offending marker tag or script.
//! Other errors yield a single report without source.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, NamedSource, SourceSpan};

use documentize::{ConfigError, DocumentizeError, config::DATA_ATTRIBUTE_PATTERN};
use documentize_parser::{Span, error::Diagnostic};

/// One renderable problem in one input.
#[derive(Debug)]
pub struct Report {
    message: String,
    code: Option<String>,
    help: Option<String>,
    labels: Vec<LabeledSpan>,
    source: Option<NamedSource<String>>,
}

impl Report {
    /// A report for a parser diagnostic whose spans point into `src`.
    fn from_diagnostic(origin: &str, src: &str, diag: &Diagnostic) -> Self {
        let labels = diag
            .labels()
            .iter()
            .map(|label| {
                let message = Some(label.message().to_string());
                let span = source_span(label.span());
                if label.is_primary() {
                    LabeledSpan::new_primary_with_span(message, span)
                } else {
                    LabeledSpan::new_with_span(message, span)
                }
            })
            .collect();

        Self {
            message: diag.message().to_string(),
            code: diag.code().map(|code| code.to_string()),
            help: diag.help().map(str::to_string),
            labels,
            source: Some(NamedSource::new(origin, src.to_string())),
        }
    }

    /// A report for an error that has no source location.
    fn from_error(err: &DocumentizeError) -> Self {
        Self {
            message: err.to_string(),
            code: Some(format!("documentize::{}", error_code(err))),
            help: error_help(err),
            labels: Vec::new(),
            source: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Report {}

impl MietteDiagnostic for Report {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.code
            .as_deref()
            .map(|code| Box::new(code) as Box<dyn fmt::Display + 'a>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_deref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.source
            .as_ref()
            .map(|source| source as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            return None;
        }
        Some(Box::new(self.labels.iter().cloned()))
    }
}

fn source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

fn error_code(err: &DocumentizeError) -> &'static str {
    match err {
        DocumentizeError::Io(_) => "io",
        DocumentizeError::Parse { .. } => "parse",
        DocumentizeError::AmbiguousSymbol { .. } => "ambiguous_symbol",
        DocumentizeError::Markdown(_) => "markdown",
        DocumentizeError::Config(_) => "config",
        DocumentizeError::UnitNameCollision(_) => "unit_name_collision",
    }
}

fn error_help(err: &DocumentizeError) -> Option<String> {
    let help = match err {
        DocumentizeError::AmbiguousSymbol { name } => {
            format!("declare `{name}` either as an interface or as a type alias, not both")
        }
        DocumentizeError::Config(ConfigError::InvalidDataAttribute { .. }) => {
            format!("data attributes must match `{DATA_ATTRIBUTE_PATTERN}`")
        }
        DocumentizeError::UnitNameCollision(_) => {
            "pass each declaration file only once".to_string()
        }
        _ => return None,
    };
    Some(help)
}

/// Converts `err`, raised while processing `origin`, into reports.
///
/// [`DocumentizeError::Parse`] yields one report per diagnostic. Every other
/// variant yields a single report.
pub fn reports(origin: &str, err: &DocumentizeError) -> Vec<Report> {
    match err {
        DocumentizeError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Report::from_diagnostic(origin, src, diag))
            .collect(),
        _ => vec![Report::from_error(err)],
    }
}
