//! Editor-facing driver for mapgen.
//!
//! This crate provides:
//! - Candidate detection and the two "Generate mapping code" refactorings
//! - Method shape classification (which body to write for which signature)
//! - The `SemanticResolver` seam to the host's compilation
//! - `mapgen.json` option loading

pub mod code_actions;
pub mod config;
pub mod implementors;
pub mod position;
pub mod resolver;

pub use code_actions::{
    CodeAction, GENERATE_MAPPING_TITLE, GENERATE_MAPPING_WITH_MEMBER_FUNCTIONS_TITLE,
    GenerationError, MappingRefactoring, REFACTOR_KIND, RefactoringInfo, TextEdit,
};
pub use config::{DriverOptions, load_options, parse_options, resolve_options};
pub use implementors::{Implementation, MethodShape, classify, implement};
pub use position::TextSpan;
pub use resolver::{DatabaseResolver, MethodDeclaration, SemanticResolver};
