//! Centralized limits and thresholds for mapping generation.
//!
//! Recursion limits for the matcher itself live in
//! `mapgen_solver::recursion::RecursionProfile`; the values here are the
//! defaults those profiles and the configuration layer start from.

/// Default maximum nesting depth of nested-object / collection mappings.
///
/// Each nested construction or element projection adds one level. Real
/// DTO graphs rarely exceed a handful of levels; beyond this depth the
/// branch degrades to an unmapped member instead of growing the output.
pub const DEFAULT_MAX_MAPPING_DEPTH: u32 = 32;

/// Upper bound on nested mapping attempts in one request.
///
/// Wide graphs with many distinct type pairs can explode combinatorially
/// even without cycles. Once exhausted, remaining nested branches are
/// left unmapped.
pub const MAX_MAPPING_ITERATIONS: u32 = 50_000;

/// Maximum length of a base-type chain walked when collecting members.
///
/// Guards against malformed (cyclic) inheritance handed over by the host.
pub const MAX_BASE_CHAIN_DEPTH: usize = 64;

/// Maximum depth of flattened member paths (`HomeAddressCity` ->
/// `HomeAddress.City`).
pub const MAX_FLATTEN_DEPTH: u32 = 3;
