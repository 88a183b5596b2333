//! Conversion catalog: user-written one-argument methods that the
//! generator may call instead of synthesizing a nested mapping.

use crate::accessibility::AccessibilityResolver;
use crate::db::TypeDatabase;
use crate::objects::ancestry;
use crate::relations::is_implicitly_convertible;
use crate::types::{MethodRef, TypeId};
use mapgen_common::Atom;
use serde::Serialize;
use tracing::{debug, debug_span};

/// A method usable as a `from -> to` conversion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CustomConversion {
    pub from_type: TypeId,
    pub to_type: TypeId,
    pub method: MethodRef,
    /// Name used to invoke the method.
    pub name: Atom,
    pub is_static: bool,
}

/// Conversions available to one generation request, in discovery order.
#[derive(Clone, Debug, Default)]
pub struct ConversionCatalog {
    conversions: Vec<CustomConversion>,
}

impl ConversionCatalog {
    pub fn new(conversions: Vec<CustomConversion>) -> Self {
        Self { conversions }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Discover the conversions usable while generating `generating`.
    pub fn for_method(db: &TypeDatabase, generating: MethodRef) -> Self {
        Self::new(find_custom_conversions(db, generating))
    }

    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomConversion> {
        self.conversions.iter()
    }

    /// Find a conversion for `source -> target`.
    ///
    /// An exact `(from, to)` match wins; otherwise the first conversion in
    /// catalog order whose parameter accepts `source` and whose result is
    /// assignable to `target`.
    pub fn find(
        &self,
        db: &TypeDatabase,
        source: TypeId,
        target: TypeId,
    ) -> Option<&CustomConversion> {
        self.conversions
            .iter()
            .find(|c| c.from_type == source && c.to_type == target)
            .or_else(|| {
                self.conversions.iter().find(|c| {
                    is_implicitly_convertible(db, source, c.from_type)
                        && is_implicitly_convertible(db, c.to_type, target)
                })
            })
    }
}

/// Collect the methods of the generating method's declaring type (and its
/// ancestors) that can serve as conversions.
///
/// A candidate takes exactly one parameter, returns a value, is not generic,
/// is accessible from the declaring type, and converts between two distinct
/// types. The generating method itself is never a candidate. When the
/// generating method is static there is no `this` to call instance methods
/// on, so only static candidates qualify.
pub fn find_custom_conversions(db: &TypeDatabase, generating: MethodRef) -> Vec<CustomConversion> {
    let owner = generating.owner;
    let _span = debug_span!("find_custom_conversions", owner = owner.0).entered();

    let Some(generating_info) = db.defs.method(generating) else {
        return Vec::new();
    };
    let static_context = generating_info.is_static && !generating.is_constructor();
    let access = AccessibilityResolver::new(&db.defs);

    let mut found = Vec::new();
    for def in ancestry(db, owner) {
        let Some(info) = db.defs.get(def) else {
            continue;
        };
        for (index, method) in info.methods.iter().enumerate() {
            let method_ref = MethodRef::method(def, index as u32);
            if method_ref == generating {
                continue;
            }
            if method.params.len() != 1 || method.returns_void() || method.type_param_count > 0 {
                continue;
            }
            let from_type = method.params[0].type_id;
            let to_type = method.return_type;
            if from_type == to_type {
                debug!(name = %db.resolve_atom(method.name), "skipping identity conversion");
                continue;
            }
            if static_context && !method.is_static {
                debug!(name = %db.resolve_atom(method.name), "skipping instance conversion in static context");
                continue;
            }
            if !access.is_method_accessible(method_ref, owner) {
                debug!(name = %db.resolve_atom(method.name), "skipping inaccessible conversion");
                continue;
            }
            found.push(CustomConversion {
                from_type,
                to_type,
                method: method_ref,
                name: method.name,
                is_static: method.is_static,
            });
        }
    }

    debug!(count = found.len(), "conversion catalog built");
    found
}

#[cfg(test)]
#[path = "../tests/conversions_tests.rs"]
mod tests;
