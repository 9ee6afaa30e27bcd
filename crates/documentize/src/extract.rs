//! Metadata extraction for one component.

use log::{debug, trace};

use documentize_parser::MetaTag;

use crate::{
    config::Config,
    error::DocumentizeError,
    logger::Logger,
    metadata::{Event, Metadata, Prop},
    resolver::{Resolution, SymbolResolver},
    session::TypeSession,
};

/// Symbol names and description for one component.
///
/// Each value comes from the marker tag when the tag carries the attribute,
/// even with an empty value, otherwise from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentConfig {
    description: String,
    events: String,
    props: String,
    slots: String,
}

impl ComponentConfig {
    /// Merges the marker tag attributes over the configured defaults.
    pub fn resolve(config: &Config, tag: &MetaTag) -> Self {
        let names = config.data_attributes();
        let symbols = config.symbols();
        let attributes = tag.attributes();

        Self {
            description: attributes.get(names.description()).unwrap_or_default().to_string(),
            events: attributes.get(names.events()).unwrap_or(symbols.events()).to_string(),
            props: attributes.get(names.props()).unwrap_or(symbols.props()).to_string(),
            slots: attributes.get(names.slots()).unwrap_or(symbols.slots()).to_string(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn events(&self) -> &str {
        &self.events
    }

    pub fn props(&self) -> &str {
        &self.props
    }

    pub fn slots(&self) -> &str {
        &self.slots
    }
}

/// Resolves events, props and slots for the component in `filename`.
///
/// A symbol that does not resolve yields an empty collection and a warning
/// on `logger`.
///
/// # Errors
///
/// Returns [`DocumentizeError::AmbiguousSymbol`] as soon as any symbol, or a
/// name it references, is declared both as an interface and as a type alias.
pub fn extract_metadata<S: TypeSession + ?Sized>(
    filename: &str,
    component: &ComponentConfig,
    resolver: &SymbolResolver<'_, S>,
    logger: Logger<'_>,
) -> Result<Metadata, DocumentizeError> {
    let warn_missing = |kind: &str, symbol: &str| {
        debug!(filename, kind, symbol; "Symbol not found");
        logger.warn(format!(
            "Failed to resolve {kind} for symbol '{symbol}' inside '{filename}'"
        ));
    };

    let events = match resolver.resolve(component.events()) {
        Resolution::Found(symbols) => symbols.into_iter().map(Event::from).collect(),
        Resolution::Missing => {
            warn_missing("events", component.events());
            Vec::new()
        }
        Resolution::Ambiguous { name } => return Err(DocumentizeError::AmbiguousSymbol { name }),
    };

    let props = match resolver.resolve(component.props()) {
        Resolution::Found(symbols) => symbols.into_iter().map(Prop::from).collect(),
        Resolution::Missing => {
            warn_missing("props", component.props());
            Vec::new()
        }
        Resolution::Ambiguous { name } => return Err(DocumentizeError::AmbiguousSymbol { name }),
    };

    let slots = match resolver.resolve_slots(component.slots()) {
        Resolution::Found(slots) => slots,
        Resolution::Missing => {
            warn_missing("slots", component.slots());
            Vec::new()
        }
        Resolution::Ambiguous { name } => return Err(DocumentizeError::AmbiguousSymbol { name }),
    };

    let metadata = Metadata::new(filename, component.description(), events, props, slots);
    trace!(metadata:?; "Extracted metadata");
    Ok(metadata)
}
