//! Stable codes identifying each kind of diagnostic.
//!
//! - `E0xx`: declaration lexing
//! - `E1xx`: markup scanning (attributes, marker tags, scripts)

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A `'` or `"` string was not closed before the end of the line.
    E001,
    /// A `/*` comment was not closed before the end of the source.
    E002,
    /// A template literal was not closed before the end of the source.
    E003,
    /// An attribute name appears twice in one tag.
    E100,
    /// More than one marker tag was found in a component.
    E101,
    /// More than one instance `<script>` block was found.
    E102,
    /// More than one `<script context="module">` block was found.
    E103,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 7] = [
        ErrorCode::E001,
        ErrorCode::E002,
        ErrorCode::E003,
        ErrorCode::E100,
        ErrorCode::E101,
        ErrorCode::E102,
        ErrorCode::E103,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
        }
    }

    /// A short lowercase description, used as the default label text.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated string literal",
            ErrorCode::E002 => "unterminated block comment",
            ErrorCode::E003 => "unterminated template literal",
            ErrorCode::E100 => "duplicate attribute",
            ErrorCode::E101 => "multiple marker tags",
            ErrorCode::E102 => "multiple instance scripts",
            ErrorCode::E103 => "multiple module scripts",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
