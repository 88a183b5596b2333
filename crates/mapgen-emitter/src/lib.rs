//! Code emission for mapping plans.
//!
//! - `lowering`: `MappingPlan` to IR, applying the unmapped policy
//! - `ir`: the small expression/statement tree bodies are built from
//! - `ir_printer`: IR to indented source text

pub mod ir;
pub mod ir_printer;
pub mod lowering;

pub use ir::{IRInitializer, IRNode};
pub use ir_printer::{DEFAULT_INDENT, IRPrinter};
pub use lowering::{BodyForm, PlanLowering, UnmappedPolicy};
