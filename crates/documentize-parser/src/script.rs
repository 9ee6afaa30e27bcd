//! Splitting a component into its `<script>` blocks.
//!
//! A Svelte component has at most one instance script and at most one module
//! script (`<script context="module">`). Their contents, joined, form the
//! declaration source searched for the events, props and slots shapes.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::{
    attributes::{Attributes, parse_attributes_at},
    declarations::SourceUnit,
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
};

static SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<script([^>]*)>(.*?)</script>").expect("script pattern is valid")
});

/// One `<script>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    attributes: Attributes,
    content: String,
    span: Span,
    content_span: Span,
}

impl Script {
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// The text between the opening and closing tags.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Location of the whole block, tags included.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Location of [`Script::content`].
    pub fn content_span(&self) -> Span {
        self.content_span
    }

    /// Whether this is a `<script context="module">` block.
    pub fn is_module(&self) -> bool {
        self.attributes.get("context") == Some("module")
    }
}

/// The script blocks of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentScripts {
    instance: Option<Script>,
    module: Option<Script>,
}

impl ComponentScripts {
    pub fn instance(&self) -> Option<&Script> {
        self.instance.as_ref()
    }

    pub fn module(&self) -> Option<&Script> {
        self.module.as_ref()
    }

    /// Module script content, a newline, then instance script content.
    ///
    /// Missing blocks contribute an empty string, so the result is never
    /// shorter than one newline.
    pub fn declaration_source(&self) -> String {
        format!(
            "{}\n{}",
            self.module().map_or("", Script::content),
            self.instance().map_or("", Script::content)
        )
    }

    /// Scans the declarations of each block on its own, so that diagnostics
    /// point into the component rather than into
    /// [`ComponentScripts::declaration_source`].
    ///
    /// # Errors
    ///
    /// Returns the lexer diagnostics of the first block that fails.
    pub fn check_declarations(&self) -> Result<(), ParseError> {
        for script in [self.module(), self.instance()].into_iter().flatten() {
            SourceUnit::parse(script.content())
                .map_err(|err| err.shifted(script.content_span().start()))?;
        }
        Ok(())
    }
}

/// Finds the instance and module scripts of a component.
///
/// # Errors
///
/// - `E102` for a second instance script
/// - `E103` for a second module script
/// - `E100` when a script tag repeats an attribute
pub fn extract_scripts(content: &str) -> Result<ComponentScripts, ParseError> {
    let mut scripts = ComponentScripts::default();

    for captures in SCRIPT.captures_iter(content) {
        let (Some(whole), Some(raw), Some(body)) = (captures.get(0), captures.get(1), captures.get(2))
        else {
            continue;
        };

        let script = Script {
            attributes: parse_attributes_at(raw.as_str(), raw.start(), "")?.into(),
            content: body.as_str().to_string(),
            span: Span::new(whole.range()),
            content_span: Span::new(body.range()),
        };

        let (slot, code, kind) = if script.is_module() {
            (&mut scripts.module, ErrorCode::E103, "module")
        } else {
            (&mut scripts.instance, ErrorCode::E102, "instance")
        };

        if let Some(first) = slot.as_ref() {
            return Err(Diagnostic::error(format!("multiple {kind} scripts found"))
                .with_code(code)
                .with_label(script.span, code.description())
                .with_secondary_label(first.span, format!("first {kind} script"))
                .with_help(format!("a component can have only one {kind} script"))
                .into());
        }

        debug!(kind, length = script.content.len(); "Found script block");
        *slot = Some(script);
    }

    Ok(scripts)
}
