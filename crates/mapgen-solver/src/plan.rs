//! Mapping plans: the engine's output.
//!
//! A plan records, for every target slot, where its value comes from and
//! which strategy produces it. The emitter lowers plans to code; nothing in
//! here knows about syntax.

use crate::conversions::CustomConversion;
use crate::shapes::{SourceExpr, TargetSlot};
use crate::types::{CollectionKind, MethodRef, TypeId};
use mapgen_common::Atom;
use serde::Serialize;
use std::fmt;

/// Why a target slot received no value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum UnmappedReason {
    /// No source candidate matched the slot's name.
    NoSource,
    /// The nested type pair is already being mapped further up.
    Cycle,
    /// Nesting depth or the work budget ran out.
    DepthLimit,
    /// A source was found but its type cannot become the slot's type.
    NoConversion,
    /// The target type is abstract, an interface, or has no accessible
    /// constructor.
    NotConstructible,
    /// A nested construction where not a single member could be mapped.
    NoMatchingMembers,
}

impl fmt::Display for UnmappedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnmappedReason::NoSource => "no matching source member",
            UnmappedReason::Cycle => "cyclic type graph",
            UnmappedReason::DepthLimit => "nesting limit reached",
            UnmappedReason::NoConversion => "no conversion between types",
            UnmappedReason::NotConstructible => "type cannot be constructed",
            UnmappedReason::NoMatchingMembers => "no members could be mapped",
        };
        f.write_str(text)
    }
}

/// The strategy chosen for one entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MappingStrategy {
    DirectAssign,
    CustomConversionCall,
    NestedObjectConstruction,
    CollectionProjection,
    Unmapped,
}

/// Element-wise transformation of a collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub source: SourceExpr,
    /// Lambda variable bound to each source element.
    pub variable: Atom,
    pub source_kind: CollectionKind,
    pub source_element: TypeId,
    pub target_kind: CollectionKind,
    pub target_element: TypeId,
    /// How one element is mapped; reads from `variable`.
    pub element: MappingValue,
}

impl Projection {
    /// True when elements pass through unchanged and only the collection
    /// shape differs.
    pub fn is_reshape_only(&self) -> bool {
        self.source_element == self.target_element
            && matches!(&self.element, MappingValue::Direct(SourceExpr::Identifier(v)) if *v == self.variable)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum MappingValue {
    Direct(SourceExpr),
    Conversion {
        conversion: CustomConversion,
        argument: SourceExpr,
    },
    Nested {
        source: SourceExpr,
        plan: Box<MappingPlan>,
    },
    Projection(Box<Projection>),
    Unmapped(UnmappedReason),
}

impl MappingValue {
    pub fn strategy(&self) -> MappingStrategy {
        match self {
            MappingValue::Direct(_) => MappingStrategy::DirectAssign,
            MappingValue::Conversion { .. } => MappingStrategy::CustomConversionCall,
            MappingValue::Nested { .. } => MappingStrategy::NestedObjectConstruction,
            MappingValue::Projection(_) => MappingStrategy::CollectionProjection,
            MappingValue::Unmapped(_) => MappingStrategy::Unmapped,
        }
    }

    /// The source expression this value reads, if any.
    pub fn source(&self) -> Option<&SourceExpr> {
        match self {
            MappingValue::Direct(expr) => Some(expr),
            MappingValue::Conversion { argument, .. } => Some(argument),
            MappingValue::Nested { source, .. } => Some(source),
            MappingValue::Projection(projection) => Some(&projection.source),
            MappingValue::Unmapped(_) => None,
        }
    }

    #[inline]
    pub fn is_unmapped(&self) -> bool {
        matches!(self, MappingValue::Unmapped(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub target: TargetSlot,
    pub value: MappingValue,
}

impl MappingEntry {
    #[inline]
    pub fn strategy(&self) -> MappingStrategy {
        self.value.strategy()
    }

    #[inline]
    pub fn source(&self) -> Option<&SourceExpr> {
        self.value.source()
    }
}

/// How the value of a constructed target is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Construction {
    pub type_id: TypeId,
    /// `None` for the implicit parameterless constructor.
    pub constructor: Option<MethodRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MappingPlan {
    pub target_type: Option<TypeId>,
    pub construction: Option<Construction>,
    /// Constructor arguments first (in parameter order), then members.
    pub entries: Vec<MappingEntry>,
}

impl MappingPlan {
    /// Whether at least one entry got a value.
    pub fn has_mapped_entries(&self) -> bool {
        self.entries.iter().any(|e| !e.value.is_unmapped())
    }

    pub fn entry(&self, name: Atom) -> Option<&MappingEntry> {
        self.entries.iter().find(|e| e.target.name == name)
    }

    pub fn constructor_arguments(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter().filter(|e| e.target.is_constructor_parameter())
    }

    pub fn member_entries(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter().filter(|e| !e.target.is_constructor_parameter())
    }

    pub fn strategies(&self) -> Vec<MappingStrategy> {
        self.entries.iter().map(MappingEntry::strategy).collect()
    }
}
