//! mapgen: synthesizes the bodies of mapping methods.
//!
//! Given a method such as `OrderDto Map(Order order)`, mapgen matches the
//! target's members against the source's, picks a strategy for each (direct
//! assignment, a user-written conversion, a nested construction, or an
//! element-wise projection) and prints the resulting body.
//!
//! The work is split across the workspace crates, re-exported here:
//!
//! - [`common`]: atoms, cancellation, limits
//! - [`solver`]: type model, accessibility, conversion catalog, engine
//! - [`emitter`]: plan lowering and printing
//! - [`lsp`]: candidate detection, method shapes, code actions, options

pub use mapgen_common as common;
pub use mapgen_emitter as emitter;
pub use mapgen_lsp as lsp;
pub use mapgen_solver as solver;

pub mod tracing_config;

pub use mapgen_lsp::{
    CodeAction, DriverOptions, GenerationError, MappingRefactoring, MethodDeclaration,
    SemanticResolver, TextSpan,
};
pub use mapgen_solver::{MappingPlan, MappingStrategy, TypeDatabase, generate_mapping};
