//! Typed-declaration sessions.
//!
//! A session holds parsed declaration units for the lifetime of a run.
//! Component scripts are registered as short-lived virtual units, resolved,
//! then removed again. Units registered up front (ambient declaration files)
//! stay in the session and serve references a component cannot satisfy on its
//! own.

use std::{
    collections::HashMap,
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use indexmap::IndexMap;
use log::{debug, trace};

use documentize_parser::{Declaration, DeclarationKind, SourceUnit};

use crate::error::DocumentizeError;

static UNIT_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Returns a unit name for `filename` that no earlier call has produced.
pub fn unique_unit_name(filename: &str) -> String {
    let id = UNIT_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{filename}.{id}.ts")
}

/// Handle to a unit registered in a [`TypeSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(u64);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declaration lookup across registered source units.
pub trait TypeSession {
    /// Parses `source` and registers it under `name`.
    ///
    /// # Errors
    ///
    /// Fails with [`DocumentizeError::UnitNameCollision`] when `name` is
    /// already registered, or with [`DocumentizeError::Parse`] when the source
    /// cannot be tokenized.
    fn create_unit(&mut self, name: &str, source: &str) -> Result<UnitId, DocumentizeError>;

    /// Removes a unit. Returns whether it was registered.
    fn remove_unit(&mut self, unit: UnitId) -> bool;

    /// Looks up a declaration inside `unit` only.
    fn find_declaration(
        &self,
        unit: UnitId,
        name: &str,
        kind: DeclarationKind,
    ) -> Option<&Declaration>;

    /// Looks up a declaration in every registered unit except `unit`, in
    /// registration order.
    fn find_external(&self, unit: UnitId, name: &str, kind: DeclarationKind)
    -> Option<&Declaration>;
}

#[derive(Debug)]
struct RegisteredUnit {
    name: String,
    unit: SourceUnit,
}

/// In-memory [`TypeSession`] backed by the lenient declaration parser.
#[derive(Debug, Default)]
pub struct Project {
    units: IndexMap<UnitId, RegisteredUnit>,
    names: HashMap<String, UnitId>,
    next_id: u64,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns the id of the unit registered under `name`.
    pub fn unit_named(&self, name: &str) -> Option<UnitId> {
        self.names.get(name).copied()
    }

    pub fn unit_names(&self) -> impl Iterator<Item = &str> {
        self.units.values().map(|registered| registered.name.as_str())
    }
}

impl TypeSession for Project {
    fn create_unit(&mut self, name: &str, source: &str) -> Result<UnitId, DocumentizeError> {
        if self.names.contains_key(name) {
            return Err(DocumentizeError::UnitNameCollision(name.to_string()));
        }

        let unit = SourceUnit::parse(source)
            .map_err(|err| DocumentizeError::new_parse_error(err, source))?;

        let id = UnitId(self.next_id);
        self.next_id += 1;

        debug!(name, unit = id.to_string(), declarations = unit.len(); "Registered unit");
        self.names.insert(name.to_string(), id);
        self.units.insert(
            id,
            RegisteredUnit {
                name: name.to_string(),
                unit,
            },
        );
        Ok(id)
    }

    fn remove_unit(&mut self, unit: UnitId) -> bool {
        let Some(registered) = self.units.shift_remove(&unit) else {
            return false;
        };
        self.names.remove(&registered.name);
        trace!(name = registered.name.as_str(); "Removed unit");
        true
    }

    fn find_declaration(
        &self,
        unit: UnitId,
        name: &str,
        kind: DeclarationKind,
    ) -> Option<&Declaration> {
        self.units
            .get(&unit)
            .and_then(|registered| registered.unit.declaration(name, kind))
    }

    fn find_external(
        &self,
        unit: UnitId,
        name: &str,
        kind: DeclarationKind,
    ) -> Option<&Declaration> {
        self.units
            .iter()
            .filter(|(id, _)| **id != unit)
            .find_map(|(_, registered)| registered.unit.declaration(name, kind))
    }
}
