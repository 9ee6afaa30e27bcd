//! Error types for Documentize operations.

use std::{io, path::PathBuf};

use thiserror::Error;

use documentize_markdown::MarkdownError;
use documentize_parser::ParseError;

use crate::config::DATA_ATTRIBUTE_PATTERN;

/// The main error type for processing a component.
///
/// Every variant aborts the current file only. The `Parse` variant keeps the
/// text its diagnostics point into, so callers can render source snippets.
#[derive(Debug, Error)]
pub enum DocumentizeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Ambiguous symbol `{name}`: found both an interface and a type alias")]
    AmbiguousSymbol { name: String },

    #[error("Markdown error: {0}")]
    Markdown(#[from] MarkdownError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Virtual unit `{0}` is already registered")]
    UnitNameCollision(String),
}

impl DocumentizeError {
    /// Creates a `Parse` error with the text the diagnostics refer to.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

/// Errors raised while loading or checking configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {field} data attribute `{value}`: expected format `{}`", DATA_ATTRIBUTE_PATTERN)]
    InvalidDataAttribute { field: &'static str, value: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),
}
