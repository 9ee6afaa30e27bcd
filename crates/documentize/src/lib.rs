//! Documentize - component documentation from typed declarations.
//!
//! Documentize reads the `$$Events`, `$$Props` and `$$Slots` declarations of a
//! Svelte component, renders them as Markdown tables and writes the result
//! into the component as a `@component` documentation comment, in place of a
//! `<meta data-documentize>` marker tag.
//!
//! The pipeline is:
//!
//! 1. locate the marker tag and read its attributes
//! 2. register the component's script declarations in a [`TypeSession`]
//! 3. resolve each symbol with a [`SymbolResolver`] into [`Metadata`]
//! 4. build and render the document with [`render_markdown`]
//! 5. replace the marker tag with the rendered comment
//!
//! [`Preprocessor`] runs the whole pipeline for one file at a time.

pub mod config;

mod assemble;
mod error;
mod extract;
mod logger;
mod metadata;
mod preprocessor;
mod resolver;
mod session;

pub use assemble::{build_document, locale_compare, render_markdown};
pub use error::{ConfigError, DocumentizeError};
pub use extract::{ComponentConfig, extract_metadata};
pub use logger::{LogReporter, Logger, REPORT_TARGET, Reporter};
pub use metadata::{Event, Metadata, Prop, PropertySymbol, Slot, SlotProperty};
pub use preprocessor::{Preprocessor, ProcessedMarkup, component_comment};
pub use resolver::{Resolution, SymbolResolver};
pub use session::{Project, TypeSession, UnitId, unique_unit_name};

pub use documentize_markdown as markdown;
pub use documentize_parser as parser;
