//! Locating the marker `<meta>` tag in component markup.
//!
//! The marker tag opts a component into documentation and carries its
//! configuration:
//!
//! ```html
//! <meta data-documentize data-description="A clickable button" />
//! ```
//!
//! Scanning is regex based. The marker must be the first attribute of the
//! tag, and a `>` inside a quoted attribute value ends the tag early.

use log::debug;
use regex::{NoExpand, Regex};

use crate::{
    attributes::{Attributes, parse_attributes_at},
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
};

/// A located marker tag.
#[derive(Debug, Clone)]
pub struct MetaTag {
    attributes: Attributes,
    span: Span,
    locator: Regex,
}

impl MetaTag {
    /// Attributes of the tag, marker included.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Location of the whole tag in the scanned content.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Replaces the first marker tag in `content` with `replacement`.
    ///
    /// `$` in `replacement` is inserted literally. Content without a marker
    /// tag is returned unchanged.
    pub fn replace(&self, content: &str, replacement: &str) -> String {
        self.locator
            .replacen(content, 1, NoExpand(replacement))
            .into_owned()
    }
}

fn marker_pattern(marker: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r#"<meta\s+({}(?:=(?:"[^"]*"|'[^']*'))?(?:\s[^>]*?)?)\s*/?>"#,
        regex::escape(marker)
    ))
}

/// Finds the tag carrying the `marker` attribute.
///
/// Returns `Ok(None)` when the content has no marker tag.
///
/// # Errors
///
/// - `E101` when more than one marker tag is present
/// - `E100` when the tag repeats an attribute
///
/// # Example
///
/// ```
/// # use documentize_parser::locate_meta_tag;
/// let content = r#"<meta data-documentize data-description="Hi" /><button />"#;
/// let tag = locate_meta_tag(content, "data-documentize").unwrap().unwrap();
///
/// assert_eq!(tag.attributes().get("data-description"), Some("Hi"));
/// assert_eq!(tag.replace(content, "<!-- docs -->"), "<!-- docs --><button />");
/// ```
pub fn locate_meta_tag(content: &str, marker: &str) -> Result<Option<MetaTag>, ParseError> {
    let locator = marker_pattern(marker).map_err(|err| {
        Diagnostic::error(format!("invalid marker attribute `{marker}`")).with_help(err.to_string())
    })?;

    let (span, raw, extra) = {
        let mut matches = locator.captures_iter(content);
        let Some(first) = matches.next() else {
            debug!(marker; "No marker tag found");
            return Ok(None);
        };

        // Group 0 and 1 always participate in a match.
        let (Some(tag), Some(raw)) = (first.get(0), first.get(1)) else {
            return Ok(None);
        };
        let extra = matches
            .next()
            .and_then(|captures| captures.get(0))
            .map(|extra| Span::new(extra.range()));
        (Span::new(tag.range()), raw, extra)
    };

    if let Some(extra) = extra {
        return Err(Diagnostic::error(format!(
            "multiple `{marker}` tags found"
        ))
        .with_code(ErrorCode::E101)
        .with_label(extra, ErrorCode::E101.description())
        .with_secondary_label(span, "first marker tag")
        .with_help("a component can carry only one marker tag")
        .into());
    }

    let attributes = parse_attributes_at(raw.as_str(), raw.start(), "")?;
    debug!(marker, attributes = attributes.len(); "Located marker tag");

    Ok(Some(MetaTag {
        attributes: attributes.into(),
        span,
        locator,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "data-documentize";

    #[test]
    fn test_no_marker_is_none() {
        assert!(
            locate_meta_tag("<script></script><div />", MARKER)
                .unwrap()
                .is_none()
        );
        assert!(
            locate_meta_tag(r#"<meta charset="utf-8">"#, MARKER)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_marker_must_be_whole_name() {
        assert!(
            locate_meta_tag("<meta data-documentize-not />", MARKER)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_single_marker() {
        let content = "<div />\n<meta data-documentize data-symbol-props=\"Props\">\n";
        let tag = locate_meta_tag(content, MARKER).unwrap().unwrap();

        assert_eq!(&content[tag.span().range()], "<meta data-documentize data-symbol-props=\"Props\">");
        assert_eq!(tag.attributes().iter().count(), 2);
        assert_eq!(tag.attributes().get("data-symbol-props"), Some("Props"));
    }

    #[test]
    fn test_self_closing_and_bare() {
        for content in [
            "<meta data-documentize/>",
            "<meta data-documentize />",
            "<meta   data-documentize>",
            "<meta\n  data-documentize\n  data-description='x'\n/>",
        ] {
            let tag = locate_meta_tag(content, MARKER).unwrap().unwrap();
            assert_eq!(tag.span().range(), 0..content.len(), "{content}");
        }
    }

    #[test]
    fn test_attribute_spans_point_into_content() {
        let content = "abc<meta data-documentize data-description=\"Lorem\" />";
        let tag = locate_meta_tag(content, MARKER).unwrap().unwrap();
        let description = tag.attributes().iter().nth(1).unwrap();

        assert_eq!(&content[description.span().range()], "data-description=\"Lorem\"");
    }

    #[test]
    fn test_multiple_markers_fail() {
        let content = "<meta data-documentize />\n<meta data-documentize />";
        let err = locate_meta_tag(content, MARKER).unwrap_err();
        let diagnostic = &err.diagnostics()[0];

        assert_eq!(diagnostic.code(), Some(ErrorCode::E101));
        assert_eq!(diagnostic.labels()[0].span(), Span::new(26..51));
        assert_eq!(diagnostic.labels()[1].span(), Span::new(0..25));
    }

    #[test]
    fn test_duplicate_attribute_in_tag_fails() {
        let content = r#"<meta data-documentize data-description="a" data-description="b" />"#;
        let err = locate_meta_tag(content, MARKER).unwrap_err();

        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E100));
    }

    #[test]
    fn test_replace_is_literal() {
        let content = "before <meta data-documentize /> after";
        let tag = locate_meta_tag(content, MARKER).unwrap().unwrap();

        assert_eq!(tag.replace(content, "$1 $$"), "before $1 $$ after");
    }

    #[test]
    fn test_custom_marker_is_escaped() {
        let content = "<meta data-docs.v2 />";
        assert!(locate_meta_tag(content, "data-docs.v2").unwrap().is_some());
        assert!(locate_meta_tag("<meta data-docsXv2 />", "data-docs.v2").unwrap().is_none());
    }
}
