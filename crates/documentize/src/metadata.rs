//! Component metadata extracted from declarations.

/// A flattened member of a shape declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySymbol {
    name: String,
    declared_type: String,
}

impl PropertySymbol {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type as written in the source.
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }
}

/// An event dispatched by a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: String,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<PropertySymbol> for Event {
    fn from(symbol: PropertySymbol) -> Self {
        Self { name: symbol.name }
    }
}

/// A property accepted by a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prop {
    name: String,
}

impl Prop {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<PropertySymbol> for Prop {
    fn from(symbol: PropertySymbol) -> Self {
        Self { name: symbol.name }
    }
}

/// A property a slot exposes to its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotProperty {
    name: String,
}

impl SlotProperty {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A named slot and the properties it exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    name: String,
    properties: Vec<SlotProperty>,
}

impl Slot {
    pub fn new(name: impl Into<String>, properties: Vec<SlotProperty>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[SlotProperty] {
        &self.properties
    }
}

/// Everything documented about one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    filename: String,
    description: String,
    events: Vec<Event>,
    props: Vec<Prop>,
    slots: Vec<Slot>,
}

impl Metadata {
    pub fn new(
        filename: impl Into<String>,
        description: impl Into<String>,
        events: Vec<Event>,
        props: Vec<Prop>,
        slots: Vec<Slot>,
    ) -> Self {
        Self {
            filename: filename.into(),
            description: description.into(),
            events,
            props,
            slots,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Whether there is nothing beyond the description to document.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.props.is_empty() && self.slots.is_empty()
    }
}
