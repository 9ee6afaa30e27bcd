//! # Documentize Parser
//!
//! Text scanning for Svelte components:
//!
//! - [`parse_attributes`] reads `name="value"` pairs out of a tag
//! - [`locate_meta_tag`] finds the marker `<meta>` tag that opts a component in
//! - [`extract_scripts`] splits out the instance and module `<script>` blocks
//! - [`SourceUnit`] scans typed-declaration source for `interface` and `type`
//!   declarations
//!
//! Failures are reported as a [`ParseError`] holding one or more
//! [`Diagnostic`](error::Diagnostic)s with spans into the scanned text.
//!
//! ## Usage
//!
//! ```
//! # use documentize_parser::{DeclarationKind, ParseError, SourceUnit, extract_scripts, locate_meta_tag};
//! fn main() -> Result<(), ParseError> {
//!     let component = r#"<script lang="ts">
//!   interface $$Props { disabled: boolean }
//! </script>
//! <meta data-documentize data-description="A button" />
//! <button />"#;
//!
//!     let tag = locate_meta_tag(component, "data-documentize")?.expect("marker tag");
//!     assert_eq!(tag.attributes().get("data-description"), Some("A button"));
//!
//!     let scripts = extract_scripts(component)?;
//!     let unit = SourceUnit::parse(&scripts.declaration_source())?;
//!     assert!(unit.declaration("$$Props", DeclarationKind::Interface).is_some());
//!     Ok(())
//! }
//! ```

mod attributes;
mod declarations;
pub mod error;
mod lexer;
mod meta;
mod script;
mod span;

pub use attributes::{Attribute, Attributes, parse_attributes, parse_attributes_with_default};
pub use declarations::{Declaration, DeclarationKind, Member, SourceUnit, TypeExpr};
pub use error::ParseError;
pub use lexer::{PositionedToken, Token, tokenize};
pub use meta::{MetaTag, locate_meta_tag};
pub use script::{ComponentScripts, Script, extract_scripts};
pub use span::Span;
