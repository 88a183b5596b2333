//! Mapping Solver
//!
//! Decides how a target object graph is populated from a source one:
//!
//! - **Member model**: the unified property/field surface of a type
//! - **Accessibility**: which members, constructors and methods may be
//!   referenced from the type declaring the generated method
//! - **Conversion catalog**: user-written methods reusable as conversions
//! - **Engine**: the recursive matcher producing a `MappingPlan`
//!
//! Types are interned (`TypeId` comparison is O(1)) and recursive type
//! graphs terminate through a visited-pair guard.
pub mod accessibility;
pub mod context;
pub mod conversions;
mod db;
pub mod def;
pub mod engine;
mod format;
mod intern;
pub mod objects;
pub mod options;
pub mod plan;
pub mod recursion;
pub mod relations;
pub mod shapes;
pub mod types;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use accessibility::AccessibilityResolver;
pub use context::MappingContext;
pub use conversions::{ConversionCatalog, CustomConversion, find_custom_conversions};
pub use db::TypeDatabase;
pub use def::{AssemblyId, DefId, DefKind, DefinitionInfo, DefinitionStore};
pub use engine::{MappingEngine, MappingError, generate_mapping};
pub use format::TypeFormatter;
pub use intern::TypeInterner;
pub use objects::{FieldOrigin, ObjectField, get_object_fields};
pub use options::{MappingOptions, NameMatching};
pub use plan::{
    Construction, MappingEntry, MappingPlan, MappingStrategy, MappingValue, Projection,
    UnmappedReason,
};
pub use relations::{is_implicitly_convertible, is_same_or_derived};
pub use shapes::{
    SourceCandidate, SourceExpr, SourceShape, TargetShape, TargetSlot, TargetSlotKind,
};
pub use types::{
    CollectionKind, IntrinsicKind, MemberFlags, MemberInfo, MemberKind, MethodInfo, MethodKind,
    MethodRef, ParamInfo, TypeData, TypeId, Visibility,
};
