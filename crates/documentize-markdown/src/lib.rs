//! Documentize Markdown
//!
//! A small document model for the Markdown that Documentize writes into
//! component sources. It covers:
//!
//! - **Nodes**: [`Text`], [`Paragraph`], [`Heading`], [`Section`] and the
//!   document root [`Builder`], unified by the [`Node`] sum type
//! - **Tables**: [`Table`], [`Column`], [`Row`] and [`Cell`], rendered with
//!   per-column widths and alignment-aware padding
//!
//! Rendering is pure: the same tree always renders to the same string.
//!
//! # Example
//!
//! ```
//! use documentize_markdown::{Alignment, Builder, Cell, Column, Heading, Paragraph, Row, Section, Table};
//!
//! # fn main() -> Result<(), documentize_markdown::MarkdownError> {
//! let table = Table::new(
//!     vec![Column::new(Alignment::Left).with("Event")],
//!     vec![Row::new().with(Cell::from_text("`click`"))],
//! );
//! let section = Section::new(Heading::new(3, "Events")?)
//!     .with(Paragraph::from_text("The following events are dispatched by this component:"))
//!     .with(table);
//!
//! let markdown = Builder::new().with(section).render()?;
//! assert!(markdown.starts_with("### Events\n"));
//! assert!(markdown.contains("| `click` |"));
//! # Ok(())
//! # }
//! ```

mod error;
mod node;
mod table;

pub use error::MarkdownError;
pub use node::{Builder, Heading, HeadingLevel, Node, Paragraph, Section, Text};
pub use table::{Alignment, Cell, Column, Row, Table};
