//! Symbol resolution and member flattening.
//!
//! A symbol names either an `interface` or a `type` alias. Declaring both
//! under one name is rejected before any members are looked at. Interfaces
//! merge their `extends` targets in declared order and then their own
//! members; aliases flatten object literals, references and intersections.
//! When two sources define a member of the same name, the later one wins.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, trace};

use documentize_parser::{Declaration, DeclarationKind, Member, TypeExpr};

use crate::{
    metadata::{PropertySymbol, Slot, SlotProperty},
    session::{TypeSession, UnitId},
};

/// The outcome of resolving a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Found(T),
    /// No declaration has the name.
    Missing,
    /// `name` is declared both as an interface and as a type alias.
    Ambiguous { name: String },
}

impl<T> Resolution<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Resolution::Found(value) => Resolution::Found(f(value)),
            Resolution::Missing => Resolution::Missing,
            Resolution::Ambiguous { name } => Resolution::Ambiguous { name },
        }
    }
}

#[cfg(test)]
impl<T> Resolution<T> {
    fn found(self) -> Option<T> {
        match self {
            Resolution::Found(value) => Some(value),
            Resolution::Missing | Resolution::Ambiguous { .. } => None,
        }
    }

    fn is_ambiguous(&self) -> bool {
        matches!(self, Resolution::Ambiguous { .. })
    }
}

/// Raised from deep inside flattening when a referenced name is ambiguous.
struct Ambiguity(String);

type MemberMap<'s> = IndexMap<&'s str, &'s Member>;

type ActiveSet<'s> = HashSet<(DeclarationKind, &'s str)>;

/// Resolves symbols of one unit, falling back to the rest of the session.
pub struct SymbolResolver<'s, S: ?Sized> {
    session: &'s S,
    unit: UnitId,
}

impl<'s, S: TypeSession + ?Sized> SymbolResolver<'s, S> {
    pub fn new(session: &'s S, unit: UnitId) -> Self {
        Self { session, unit }
    }

    /// Finds the declaration named `name`.
    ///
    /// The resolver's own unit is searched first. Only when it declares
    /// nothing under `name` are the other units of the session consulted.
    /// Within either scope, finding both an interface and a type alias is
    /// ambiguous.
    pub fn lookup(&self, name: &str) -> Resolution<&'s Declaration> {
        let session = self.session;
        let unit = self.unit;

        match pick(name, |kind| session.find_declaration(unit, name, kind)) {
            Resolution::Missing => pick(name, |kind| session.find_external(unit, name, kind)),
            resolution => resolution,
        }
    }

    /// Resolves `name` into its flattened members.
    pub fn resolve(&self, name: &str) -> Resolution<Vec<PropertySymbol>> {
        self.flatten_named(name).map(|members| {
            members
                .into_values()
                .map(|member| PropertySymbol::new(member.name(), member.ty().text()))
                .collect()
        })
    }

    /// Resolves `name` into slots.
    ///
    /// Every flattened member is a slot. Its properties are the flattened
    /// members of its type, by name only. A member whose type is not a shape
    /// yields a slot without properties.
    pub fn resolve_slots(&self, name: &str) -> Resolution<Vec<Slot>> {
        let members = match self.flatten_named(name) {
            Resolution::Found(members) => members,
            Resolution::Missing => return Resolution::Missing,
            Resolution::Ambiguous { name } => return Resolution::Ambiguous { name },
        };

        let mut slots = Vec::with_capacity(members.len());
        for member in members.into_values() {
            let mut active = ActiveSet::new();
            match self.type_members(member.ty(), &mut active) {
                Ok(properties) => slots.push(Slot::new(
                    member.name(),
                    properties.into_keys().map(SlotProperty::new).collect(),
                )),
                Err(Ambiguity(name)) => return Resolution::Ambiguous { name },
            }
        }
        Resolution::Found(slots)
    }

    fn flatten_named(&self, name: &str) -> Resolution<MemberMap<'s>> {
        let declaration = match self.lookup(name) {
            Resolution::Found(declaration) => declaration,
            Resolution::Missing => return Resolution::Missing,
            Resolution::Ambiguous { name } => return Resolution::Ambiguous { name },
        };

        trace!(name, kind = declaration.kind().to_string(); "Flattening declaration");
        let mut active = ActiveSet::new();
        match self.declaration_members(declaration, &mut active) {
            Ok(members) => Resolution::Found(members),
            Err(Ambiguity(name)) => Resolution::Ambiguous { name },
        }
    }

    fn declaration_members(
        &self,
        declaration: &'s Declaration,
        active: &mut ActiveSet<'s>,
    ) -> Result<MemberMap<'s>, Ambiguity> {
        let key = (declaration.kind(), declaration.name());
        if !active.insert(key) {
            debug!(name = declaration.name(); "Cutting reference cycle");
            return Ok(MemberMap::new());
        }

        let members = self.collect_declaration(declaration, active);
        active.remove(&key);
        members
    }

    fn collect_declaration(
        &self,
        declaration: &'s Declaration,
        active: &mut ActiveSet<'s>,
    ) -> Result<MemberMap<'s>, Ambiguity> {
        match declaration.kind() {
            DeclarationKind::Interface => {
                let mut members = MemberMap::new();
                for base in declaration.heritage() {
                    members.extend(self.type_members(base, active)?);
                }
                members.extend(
                    declaration
                        .members()
                        .iter()
                        .map(|member| (member.name(), member)),
                );
                Ok(members)
            }
            DeclarationKind::TypeAlias => match declaration.body() {
                Some(body) => self.type_members(body, active),
                None => Ok(MemberMap::new()),
            },
        }
    }

    fn type_members(
        &self,
        ty: &'s TypeExpr,
        active: &mut ActiveSet<'s>,
    ) -> Result<MemberMap<'s>, Ambiguity> {
        match ty {
            TypeExpr::Object { members, .. } => Ok(members
                .iter()
                .map(|member| (member.name(), member))
                .collect()),
            TypeExpr::Reference { name, .. } => {
                // `ns.Name` is looked up by its last segment.
                let name = name.rsplit('.').next().unwrap_or(name);
                match self.lookup(name) {
                    Resolution::Found(declaration) => self.declaration_members(declaration, active),
                    Resolution::Missing => {
                        debug!(name; "Unresolved reference contributes no members");
                        Ok(MemberMap::new())
                    }
                    Resolution::Ambiguous { name } => Err(Ambiguity(name)),
                }
            }
            TypeExpr::Intersection { parts, .. } => {
                let mut members = MemberMap::new();
                for part in parts {
                    members.extend(self.type_members(part, active)?);
                }
                Ok(members)
            }
            TypeExpr::Opaque { text } => {
                debug!(ty = text.as_str(); "Opaque type contributes no members");
                Ok(MemberMap::new())
            }
        }
    }
}

fn pick<'s>(
    name: &str,
    find: impl Fn(DeclarationKind) -> Option<&'s Declaration>,
) -> Resolution<&'s Declaration> {
    match (
        find(DeclarationKind::Interface),
        find(DeclarationKind::TypeAlias),
    ) {
        (Some(_), Some(_)) => Resolution::Ambiguous {
            name: name.to_string(),
        },
        (Some(declaration), None) | (None, Some(declaration)) => Resolution::Found(declaration),
        (None, None) => Resolution::Missing,
    }
}
