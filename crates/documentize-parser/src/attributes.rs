//! Reading `name="value"` pairs out of a raw attribute string.
//!
//! The scan is a single left-to-right regex pass. A name is
//! `[a-zA-Z_-][a-zA-Z0-9_-]*`, optionally followed by `='…'` or `="…"`.
//! Quoted values are taken verbatim: no entity decoding and no escapes.
//! Anything that is not part of a match (stray `=`, unquoted values, `/`) is
//! ignored.

use std::{collections::HashMap, sync::LazyLock};

use log::trace;
use regex::Regex;

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
};

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z_-][a-zA-Z0-9_-]*)(?:=(?:'([^']*)'|"([^"]*)"))?"#)
        .expect("attribute pattern is valid")
});

/// A single attribute read from a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    value: String,
    span: Span,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            span,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Location of the whole `name="value"` text.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// The attributes of one tag, in source order, with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    items: Vec<Attribute>,
}

impl Attributes {
    /// Returns the value of the attribute called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|attribute| attribute.name == name)
            .map(Attribute::value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.items.iter()
    }
}

impl From<Vec<Attribute>> for Attributes {
    fn from(items: Vec<Attribute>) -> Self {
        Self { items }
    }
}

/// Parses a raw attribute string such as `data-documentize data-description="Button"`.
///
/// Attributes without a value, or with an empty quoted value, get `""`.
///
/// # Errors
///
/// Fails with an `E100` diagnostic as soon as a name repeats. The primary
/// label marks the repeated attribute and a secondary label marks the first
/// one.
///
/// # Example
///
/// ```
/// # use documentize_parser::parse_attributes;
/// let attributes = parse_attributes(r#"data-documentize data-description='A button'"#).unwrap();
///
/// assert_eq!(attributes.len(), 2);
/// assert_eq!(attributes[0].value(), "");
/// assert_eq!(attributes[1].value(), "A button");
/// ```
pub fn parse_attributes(raw: &str) -> Result<Vec<Attribute>, ParseError> {
    parse_attributes_with_default(raw, "")
}

/// Like [`parse_attributes`], with `default` standing in for missing or empty values.
pub fn parse_attributes_with_default(
    raw: &str,
    default: &str,
) -> Result<Vec<Attribute>, ParseError> {
    parse_attributes_at(raw, 0, default)
}

/// Parses `raw` as if it started at byte `offset` of a larger text, so that
/// spans point into that text.
pub(crate) fn parse_attributes_at(
    raw: &str,
    offset: usize,
    default: &str,
) -> Result<Vec<Attribute>, ParseError> {
    let mut attributes = Vec::new();
    let mut seen: HashMap<&str, Span> = HashMap::new();

    for captures in ATTRIBUTE.captures_iter(raw) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let name = name.as_str();
        let span = Span::new(offset + whole.start()..offset + whole.end());

        if let Some(first) = seen.get(name) {
            return Err(Diagnostic::error(format!(
                "attribute `{name}` is defined multiple times"
            ))
            .with_code(ErrorCode::E100)
            .with_label(span, ErrorCode::E100.description())
            .with_secondary_label(*first, "first defined here")
            .with_help("remove one of the attributes")
            .into());
        }
        seen.insert(name, span);

        let value = captures
            .get(2)
            .or_else(|| captures.get(3))
            .map(|value| value.as_str())
            .filter(|value| !value.is_empty())
            .unwrap_or(default);

        trace!(name, value; "Parsed attribute");
        attributes.push(Attribute::new(name, value, span));
    }

    Ok(attributes)
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn name_strategy() -> impl Strategy<Value = String> {
        "[a-z_][a-z0-9_-]{0,8}"
    }

    fn value_strategy() -> impl Strategy<Value = Option<String>> {
        prop::option::of("[a-zA-Z0-9 .,]{0,12}")
    }

    /// N distinct names come back as N attributes in source order, with their
    /// values intact.
    fn check_distinct_names(entries: &[(String, Option<String>)]) -> Result<(), TestCaseError> {
        let raw = entries
            .iter()
            .map(|(name, value)| match value {
                Some(value) => format!("{name}=\"{value}\""),
                None => name.clone(),
            })
            .collect::<Vec<_>>()
            .join(" ");

        let attributes = parse_attributes(&raw).unwrap();
        prop_assert_eq!(attributes.len(), entries.len());

        for (attribute, (name, value)) in attributes.iter().zip(entries) {
            prop_assert_eq!(attribute.name(), name.as_str());
            prop_assert_eq!(attribute.value(), value.as_deref().unwrap_or(""));
            prop_assert_eq!(&raw[attribute.span().range()].split('=').next(), &Some(name.as_str()));
        }
        Ok(())
    }

    /// Any repeated name is rejected.
    fn check_duplicate_rejected(name: &str, others: &[String]) -> Result<(), TestCaseError> {
        let mut parts: Vec<&str> = others
            .iter()
            .map(String::as_str)
            .filter(|other| *other != name)
            .collect();
        parts.insert(0, name);
        parts.push(name);

        let err = parse_attributes(&parts.join(" ")).unwrap_err();
        prop_assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E100));
        Ok(())
    }

    proptest! {
        #[test]
        fn distinct_names_round_trip(
            entries in prop::collection::btree_map(name_strategy(), value_strategy(), 0..6)
        ) {
            let entries: Vec<_> = entries.into_iter().collect();
            check_distinct_names(&entries)?;
        }

        #[test]
        fn duplicate_names_are_rejected(
            name in name_strategy(),
            others in prop::collection::btree_set(name_strategy(), 0..4),
        ) {
            let others: Vec<_> = others.into_iter().collect();
            check_duplicate_rejected(&name, &others)?;
        }
    }
}
