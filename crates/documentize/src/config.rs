//! Configuration for the Documentize preprocessor.
//!
//! All sections implement [`serde::Deserialize`] and fall back to their
//! defaults when omitted, so an empty document is a valid configuration:
//!
//! ```toml
//! debug = true
//!
//! [data_attributes]
//! global = "data-doc"
//!
//! [symbols]
//! props = "Props"
//! ```
//!
//! # Example
//!
//! ```
//! # use documentize::config::Config;
//! let config = Config::default();
//! assert_eq!(config.data_attributes().global(), "data-documentize");
//! assert_eq!(config.symbols().events(), "$$Events");
//! assert!(config.validate().is_ok());
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::ConfigError;

/// The accepted shape of every configurable data attribute.
pub const DATA_ATTRIBUTE_PATTERN: &str = "^data-[a-zA-Z_-][a-zA-Z0-9_-]*$";

static DATA_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DATA_ATTRIBUTE_PATTERN).expect("data attribute pattern is valid")
});

/// Top-level preprocessor configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Report skipped files and unresolved symbols.
    #[serde(default)]
    debug: bool,

    /// Names of the marker tag attributes.
    #[serde(default)]
    data_attributes: DataAttributes,

    /// Default declaration names for events, props and slots.
    #[serde(default)]
    symbols: Symbols,
}

impl Config {
    pub fn new(debug: bool, data_attributes: DataAttributes, symbols: Symbols) -> Self {
        Self {
            debug,
            data_attributes,
            symbols,
        }
    }

    /// Returns a copy with debug reporting switched on or off.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn data_attributes(&self) -> &DataAttributes {
        &self.data_attributes
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    /// Checks every data attribute against [`DATA_ATTRIBUTE_PATTERN`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDataAttribute`] for the first attribute
    /// that does not match, checked in the order description, global, events,
    /// props, slots.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let attributes = &self.data_attributes;
        [
            ("description", &attributes.description),
            ("global", &attributes.global),
            ("events", &attributes.events),
            ("props", &attributes.props),
            ("slots", &attributes.slots),
        ]
        .into_iter()
        .find(|(_, value)| !DATA_ATTRIBUTE.is_match(value))
        .map_or(Ok(()), |(field, value)| {
            Err(ConfigError::InvalidDataAttribute {
                field,
                value: value.clone(),
            })
        })
    }
}

/// Attribute names read from the marker tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataAttributes {
    /// Presence-only attribute that opts a component in.
    global: String,
    /// Holds the component description.
    description: String,
    /// Overrides the events declaration name.
    events: String,
    /// Overrides the props declaration name.
    props: String,
    /// Overrides the slots declaration name.
    slots: String,
}

impl DataAttributes {
    pub fn new(
        global: impl Into<String>,
        description: impl Into<String>,
        events: impl Into<String>,
        props: impl Into<String>,
        slots: impl Into<String>,
    ) -> Self {
        Self {
            global: global.into(),
            description: description.into(),
            events: events.into(),
            props: props.into(),
            slots: slots.into(),
        }
    }

    pub fn global(&self) -> &str {
        &self.global
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

impl Default for DataAttributes {
    fn default() -> Self {
        Self::new(
            "data-documentize",
            "data-description",
            "data-symbol-events",
            "data-symbol-props",
            "data-symbol-slots",
        )
    }
}

/// Declaration names resolved when the marker tag does not override them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Symbols {
    events: String,
    props: String,
    slots: String,
}

impl Symbols {
    pub fn new(
        events: impl Into<String>,
        props: impl Into<String>,
        slots: impl Into<String>,
    ) -> Self {
        Self {
            events: events.into(),
            props: props.into(),
            slots: slots.into(),
        }
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

impl Default for Symbols {
    fn default() -> Self {
        Self::new("$$Events", "$$Props", "$$Slots")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.debug());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config: Config = toml::from_str(
            "debug = true\n[data_attributes]\nglobal = \"data-doc\"\n[symbols]\nprops = \"Props\"\n",
        )
        .unwrap();

        assert!(config.debug());
        assert_eq!(config.data_attributes().global(), "data-doc");
        assert_eq!(config.data_attributes().description(), "data-description");
        assert_eq!(config.symbols().props(), "Props");
        assert_eq!(config.symbols().slots(), "$$Slots");
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_data_attribute() {
        let config = Config::new(
            false,
            DataAttributes::new("data-doc", "data-description", "events", "data-p", "data-s"),
            Symbols::default(),
        );

        match config.validate() {
            Err(ConfigError::InvalidDataAttribute { field, value }) => {
                assert_eq!(field, "events");
                assert_eq!(value, "events");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_data_attribute_pattern() {
        for valid in ["data-x", "data-_x", "data--x", "data-a1_b-c"] {
            assert!(DATA_ATTRIBUTE.is_match(valid), "{valid}");
        }
        for invalid in ["data-", "data-1x", "x-data", "data-a b", "data-a.b", ""] {
            assert!(!DATA_ATTRIBUTE.is_match(invalid), "{invalid}");
        }
    }

    #[test]
    fn test_with_debug() {
        assert!(Config::default().with_debug(true).debug());
    }
}
