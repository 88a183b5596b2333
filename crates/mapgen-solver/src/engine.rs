//! Mapping synthesis engine.
//!
//! Matches target slots against source candidates and picks a strategy for
//! each one, in this order:
//!
//! 1. no candidate (after flattening): unmapped
//! 2. source implicitly convertible to target: direct assignment
//! 3. member-function reuse enabled and a catalog conversion fits: call it
//! 4. both collections: element-wise projection
//! 5. both object-like: nested construction, guarded by the visited set
//! 6. otherwise: unmapped
//!
//! Individual slots never fail the plan; only cancellation and an
//! unconstructible top-level target do.

use crate::accessibility::AccessibilityResolver;
use crate::context::MappingContext;
use crate::db::TypeDatabase;
use crate::def::DefKind;
use crate::options::NameMatching;
use crate::plan::{
    Construction, MappingEntry, MappingPlan, MappingValue, Projection, UnmappedReason,
};
use crate::recursion::RecursionResult;
use crate::relations::is_implicitly_convertible;
use crate::shapes::{
    SourceCandidate, SourceExpr, SourceShape, TargetShape, TargetSlot, TargetSlotKind,
    writable_slots,
};
use crate::types::{CollectionKind, MethodRef, ParamInfo, TypeId};
use mapgen_common::interner::strip_prefix_folded;
use mapgen_common::limits::MAX_FLATTEN_DEPTH;
use mapgen_common::{Atom, Cancelled};
use std::fmt;
use tracing::{debug, debug_span, trace};

/// Why no plan could be produced at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MappingError {
    /// The request was cancelled; no partial result exists.
    Cancelled,
    /// The top-level target cannot be built or resolved.
    UnresolvableShape(String),
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingError::Cancelled => write!(f, "mapping generation was cancelled"),
            MappingError::UnresolvableShape(msg) => write!(f, "unresolvable mapping shape: {msg}"),
        }
    }
}

impl std::error::Error for MappingError {}

impl From<Cancelled> for MappingError {
    fn from(_: Cancelled) -> Self {
        MappingError::Cancelled
    }
}

/// Keywords a generated lambda variable must not be spelled as.
const RESERVED_WORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "static", "string", "struct", "switch", "this", "throw", "true", "try", "typeof",
    "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual", "void", "volatile",
    "while",
];

fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Run the engine once: `target` filled from `source` under `ctx`.
pub fn generate_mapping(
    db: &TypeDatabase,
    target: &TargetShape,
    source: &SourceShape,
    ctx: &mut MappingContext,
) -> Result<MappingPlan, MappingError> {
    MappingEngine::new(db, ctx).generate_mapping(target, source)
}

pub struct MappingEngine<'a> {
    db: &'a TypeDatabase,
    ctx: &'a mut MappingContext,
    /// Identifiers visible at the current point of the generated code;
    /// element variables must not shadow them.
    names_in_use: Vec<Atom>,
}

impl<'a> MappingEngine<'a> {
    pub fn new(db: &'a TypeDatabase, ctx: &'a mut MappingContext) -> Self {
        let names_in_use = ctx.names_in_scope.clone();
        Self {
            db,
            ctx,
            names_in_use,
        }
    }

    pub fn generate_mapping(
        &mut self,
        target: &TargetShape,
        source: &SourceShape,
    ) -> Result<MappingPlan, MappingError> {
        let _span = debug_span!(
            "generate_mapping",
            target = ?target.target_type().map(|t| t.0),
            candidates = source.len(),
            reuse = self.ctx.allow_member_function_reuse,
        )
        .entered();
        self.ctx.check_cancelled()?;

        let saved = self.names_in_use.len();
        self.names_in_use.extend(
            source
                .candidates
                .iter()
                .filter_map(|c| c.expr.root_identifier()),
        );

        let types = &self.db.types;
        let pair = source
            .origin
            .zip(target.target_type())
            .map(|(s, t)| (types.non_nullable(s), types.non_nullable(t)));
        let result = match pair {
            Some(key) => match self.with_type_pair(key, |this| this.build_plan(target, source)) {
                Ok(result) => result,
                Err(_) => self.build_plan(target, source),
            },
            None => self.build_plan(target, source),
        };
        self.names_in_use.truncate(saved);

        match &result {
            Ok(plan) => debug!(entries = plan.entries.len(), "plan generated"),
            Err(err) => debug!(%err, "no plan"),
        }
        result
    }

    fn build_plan(
        &mut self,
        target: &TargetShape,
        source: &SourceShape,
    ) -> Result<MappingPlan, MappingError> {
        match target {
            TargetShape::Slots { target_type, slots } => {
                let mut entries = Vec::with_capacity(slots.len());
                for slot in slots {
                    let value = self.map_slot(slot, source)?;
                    entries.push(MappingEntry {
                        target: slot.clone(),
                        value,
                    });
                }
                Ok(MappingPlan {
                    target_type: *target_type,
                    construction: None,
                    entries,
                })
            }
            TargetShape::Construct { target_type } => {
                if let Some(reason) = self.construction_blocker(*target_type) {
                    return Err(MappingError::UnresolvableShape(format!(
                        "cannot construct {}: {reason}",
                        self.db.display(*target_type)
                    )));
                }
                self.plan_construction(*target_type, source)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Slots
    // -------------------------------------------------------------------------

    fn map_slot(
        &mut self,
        slot: &TargetSlot,
        source: &SourceShape,
    ) -> Result<MappingValue, MappingError> {
        self.ctx.check_cancelled()?;
        let Some(found) = self.resolve_source(slot.name, source) else {
            trace!(slot = %self.db.resolve_atom(slot.name), "no source candidate");
            return Ok(MappingValue::Unmapped(UnmappedReason::NoSource));
        };
        let value = self.map_value(found.expr, found.type_id, slot.type_id)?;
        trace!(
            slot = %self.db.resolve_atom(slot.name),
            strategy = ?value.strategy(),
            "slot mapped"
        );
        Ok(value)
    }

    /// Name lookup, falling back to flattened member paths.
    fn resolve_source(&self, name: Atom, source: &SourceShape) -> Option<SourceCandidate> {
        let matching = self.ctx.options.name_matching;
        if let Some(found) = source.find(self.db, name, matching) {
            return Some(found.clone());
        }
        if !self.ctx.options.flatten_members {
            return None;
        }
        let text = self.db.resolve_atom(name);
        self.flatten(&text, source, 1)
    }

    /// `HomeAddressCity` -> `HomeAddress.City`.
    fn flatten(&self, name: &str, source: &SourceShape, depth: u32) -> Option<SourceCandidate> {
        if depth > MAX_FLATTEN_DEPTH {
            return None;
        }
        let matching = self.ctx.options.name_matching;
        for candidate in &source.candidates {
            let prefix = self.db.resolve_atom(candidate.name);
            if prefix.is_empty() {
                continue;
            }
            let rest = match matching {
                NameMatching::CaseSensitive => name.strip_prefix(&*prefix),
                NameMatching::CaseInsensitive => strip_prefix_folded(name, &prefix),
            };
            let Some(rest) = rest.filter(|rest| !rest.is_empty()) else {
                continue;
            };
            if self.db.types.is_collection(candidate.type_id)
                || self.db.definition_of(candidate.type_id).is_none()
            {
                continue;
            }

            let inner = SourceShape::members_of(
                self.db,
                candidate.expr.clone(),
                candidate.type_id,
                self.ctx.viewing_type,
            );
            let rest_atom = self.db.intern_string(rest);
            if let Some(found) = inner.find(self.db, rest_atom, matching) {
                trace!(name, "flattened");
                return Some(found.clone());
            }
            if let Some(found) = self.flatten(rest, &inner, depth + 1) {
                return Some(found);
            }
        }
        None
    }

    // -------------------------------------------------------------------------
    // Values
    // -------------------------------------------------------------------------

    fn map_value(
        &mut self,
        expr: SourceExpr,
        source_type: TypeId,
        target_type: TypeId,
    ) -> Result<MappingValue, MappingError> {
        let db = self.db;
        if is_implicitly_convertible(db, source_type, target_type) {
            return Ok(MappingValue::Direct(expr));
        }
        if self.ctx.allow_member_function_reuse {
            if let Some(conversion) = self.ctx.conversions.find(db, source_type, target_type) {
                return Ok(MappingValue::Conversion {
                    conversion: conversion.clone(),
                    argument: expr,
                });
            }
        }

        let source_inner = db.types.non_nullable(source_type);
        let target_inner = db.types.non_nullable(target_type);
        if let (Some((source_kind, source_element)), Some((target_kind, target_element))) = (
            db.types.collection_element(source_inner),
            db.types.collection_element(target_inner),
        ) {
            return self.map_collection(
                expr,
                (source_kind, source_element),
                (target_kind, target_element),
            );
        }
        if self.is_object_like(source_inner) && self.is_object_like(target_inner) {
            return self.map_nested(expr, source_inner, target_inner);
        }
        Ok(MappingValue::Unmapped(UnmappedReason::NoConversion))
    }

    fn is_object_like(&self, type_id: TypeId) -> bool {
        self.db.definition_of(type_id).is_some()
    }

    fn map_collection(
        &mut self,
        expr: SourceExpr,
        (source_kind, source_element): (CollectionKind, TypeId),
        (target_kind, target_element): (CollectionKind, TypeId),
    ) -> Result<MappingValue, MappingError> {
        let variable = self.element_variable(source_element);
        self.names_in_use.push(variable);
        let element = self.map_value(
            SourceExpr::Identifier(variable),
            source_element,
            target_element,
        );
        self.names_in_use.pop();

        let element = element?;
        if let MappingValue::Unmapped(reason) = element {
            return Ok(MappingValue::Unmapped(reason));
        }
        Ok(MappingValue::Projection(Box::new(Projection {
            source: expr,
            variable,
            source_kind,
            source_element,
            target_kind,
            target_element,
            element,
        })))
    }

    /// Lambda variable for elements of `element`: the element type's name in
    /// lower camel case, `item` for anything unnamed.
    fn element_variable(&self, element: TypeId) -> Atom {
        let base = match self.db.definition_of(element) {
            Some((_, info)) => lower_camel(&self.db.resolve_atom(info.name)),
            None => "item".to_string(),
        };
        let base = if RESERVED_WORDS.contains(&base.as_str()) {
            format!("@{base}")
        } else {
            base
        };

        let mut candidate = self.db.intern_string(&base);
        let mut counter = 1u32;
        while self.names_in_use.contains(&candidate) {
            candidate = self.db.intern_string(&format!("{base}{counter}"));
            counter += 1;
        }
        candidate
    }

    fn map_nested(
        &mut self,
        expr: SourceExpr,
        source_type: TypeId,
        target_type: TypeId,
    ) -> Result<MappingValue, MappingError> {
        if let Some(reason) = self.construction_blocker(target_type) {
            return Ok(MappingValue::Unmapped(reason));
        }

        let viewing = self.ctx.viewing_type;
        let outcome = self.with_type_pair((source_type, target_type), |this| {
            let shape = SourceShape::members_of(this.db, expr.clone(), source_type, viewing);
            this.plan_construction(target_type, &shape)
        });

        match outcome {
            Ok(plan) => {
                let plan = plan?;
                if !plan.has_mapped_entries() {
                    return Ok(MappingValue::Unmapped(UnmappedReason::NoMatchingMembers));
                }
                Ok(MappingValue::Nested {
                    source: expr,
                    plan: Box::new(plan),
                })
            }
            Err(denied) if denied.is_cycle() => {
                trace!(
                    source = %self.db.display(source_type),
                    target = %self.db.display(target_type),
                    "cyclic type pair"
                );
                Ok(MappingValue::Unmapped(UnmappedReason::Cycle))
            }
            Err(denied) => {
                let visited = &self.ctx.visited;
                debug!(
                    ?denied,
                    depth = visited.depth(),
                    max_depth = visited.max_depth(),
                    iterations = visited.iterations(),
                    exceeded = visited.is_exceeded(),
                    "nested mapping limit reached"
                );
                Ok(MappingValue::Unmapped(UnmappedReason::DepthLimit))
            }
        }
    }

    /// Run `f` with `key` in the visited set. The key is removed again
    /// before returning, whatever `f` produced.
    fn with_type_pair<T>(
        &mut self,
        key: (TypeId, TypeId),
        f: impl FnOnce(&mut Self) -> T,
    ) -> Result<T, RecursionResult> {
        match self.ctx.visited.enter(key) {
            RecursionResult::Entered => {
                let result = f(self);
                self.ctx.visited.leave(key);
                Ok(result)
            }
            denied => Err(denied),
        }
    }

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Why `target_type` cannot be built from the viewing type, if it can't.
    fn construction_blocker(&self, target_type: TypeId) -> Option<UnmappedReason> {
        let viewing = self.ctx.viewing_type;
        let Some((def, info)) = self.db.definition_of(target_type) else {
            return Some(UnmappedReason::NotConstructible);
        };
        if !info.is_constructible() {
            return Some(UnmappedReason::NotConstructible);
        }
        let access = AccessibilityResolver::new(&self.db.defs);
        if !access.is_type_accessible(def, viewing) {
            return Some(UnmappedReason::NotConstructible);
        }
        let has_usable_constructor = info.kind == DefKind::Struct
            || info.constructors.is_empty()
            || (0..info.constructors.len())
                .any(|i| access.is_method_accessible(MethodRef::constructor(def, i as u32), viewing));
        if !has_usable_constructor {
            return Some(UnmappedReason::NotConstructible);
        }
        None
    }

    /// Choose a constructor for `target_type` and plan its arguments plus
    /// the remaining writable members.
    ///
    /// The accessible constructor with the most parameters matched by name
    /// wins; ties go to fewer parameters, then to the first declared.
    fn plan_construction(
        &mut self,
        target_type: TypeId,
        source: &SourceShape,
    ) -> Result<MappingPlan, MappingError> {
        let viewing = self.ctx.viewing_type;
        let Some((def, info)) = self.db.definition_of(target_type) else {
            return Err(MappingError::UnresolvableShape(format!(
                "no definition for {}",
                self.db.display(target_type)
            )));
        };

        let access = AccessibilityResolver::new(&self.db.defs);
        let mut candidates: Vec<(Option<MethodRef>, Vec<ParamInfo>)> = info
            .constructors
            .iter()
            .enumerate()
            .map(|(i, ctor)| (MethodRef::constructor(def, i as u32), ctor))
            .filter(|(ctor_ref, _)| access.is_method_accessible(*ctor_ref, viewing))
            .map(|(ctor_ref, ctor)| (Some(ctor_ref), ctor.params.clone()))
            .collect();
        if info.constructors.is_empty() || info.kind == DefKind::Struct {
            candidates.push((None, Vec::new()));
        }

        let mut best: Option<(usize, usize, usize)> = None;
        for (i, (_, params)) in candidates.iter().enumerate() {
            let matched = params
                .iter()
                .filter(|p| self.resolve_source(p.name, source).is_some())
                .count();
            let better = match best {
                None => true,
                Some((_, best_matched, best_len)) => {
                    matched > best_matched || (matched == best_matched && params.len() < best_len)
                }
            };
            if better {
                best = Some((i, matched, params.len()));
            }
        }
        let Some((chosen, _, _)) = best else {
            return Err(MappingError::UnresolvableShape(format!(
                "no accessible constructor for {}",
                self.db.display(target_type)
            )));
        };
        let (constructor, params) = candidates.swap_remove(chosen);
        trace!(
            target = %self.db.display(target_type),
            implicit = constructor.is_none(),
            params = params.len(),
            "constructor selected"
        );

        let mut entries = Vec::new();
        for (index, param) in params.iter().enumerate() {
            let slot = TargetSlot {
                name: param.name,
                type_id: param.type_id,
                kind: TargetSlotKind::ConstructorParameter { index },
            };
            let value = self.map_slot(&slot, source)?;
            entries.push(MappingEntry {
                target: slot,
                value,
            });
        }

        let interner = &self.db.types.string_interner;
        let initializers: Vec<TargetSlot> = writable_slots(self.db, target_type, viewing)
            .into_iter()
            .filter(|slot| !params.iter().any(|p| interner.eq_ignore_case(p.name, slot.name)))
            .collect();
        for slot in initializers {
            let value = self.map_slot(&slot, source)?;
            entries.push(MappingEntry {
                target: slot,
                value,
            });
        }

        Ok(MappingPlan {
            target_type: Some(target_type),
            construction: Some(Construction {
                type_id: target_type,
                constructor,
            }),
            entries,
        })
    }
}

#[cfg(test)]
#[path = "../tests/engine_tests.rs"]
mod tests;
