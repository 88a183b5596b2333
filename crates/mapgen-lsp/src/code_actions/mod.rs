//! "Generate mapping code" refactorings.
//!
//! Two actions are offered on every implementable method: one that only
//! synthesizes assignments and nested constructions, and one that may also
//! call conversion methods the user already wrote. Applying either replaces
//! the method body.

use crate::config::DriverOptions;
use crate::implementors::{MethodShape, implement};
use crate::position::TextSpan;
use crate::resolver::{MethodDeclaration, SemanticResolver};
use mapgen_common::CancellationToken;
use mapgen_emitter::{IRPrinter, PlanLowering};
use mapgen_solver::{MappingContext, MappingError, generate_mapping};
use serde::Serialize;
use std::fmt;
use tracing::{debug, debug_span};

pub const GENERATE_MAPPING_TITLE: &str = "Generate mapping code";
pub const GENERATE_MAPPING_WITH_MEMBER_FUNCTIONS_TITLE: &str =
    "Generate mapping code using member functions";
pub const REFACTOR_KIND: &str = "refactor.rewrite.generateMapping";

/// An offered refactoring, before any generation has run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactoringInfo {
    pub title: String,
    pub kind: String,
    pub use_member_functions: bool,
}

impl RefactoringInfo {
    fn new(use_member_functions: bool) -> Self {
        let title = if use_member_functions {
            GENERATE_MAPPING_WITH_MEMBER_FUNCTIONS_TITLE
        } else {
            GENERATE_MAPPING_TITLE
        };
        Self {
            title: title.to_string(),
            kind: REFACTOR_KIND.to_string(),
            use_member_functions,
        }
    }
}

/// Replace `span` in `file_name` with `new_text`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    pub file_name: String,
    pub span: TextSpan,
    pub new_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAction {
    pub title: String,
    pub kind: String,
    pub shape: MethodShape,
    pub edit: TextEdit,
}

/// Why no edit was produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationError {
    /// Not an ordinary method or a constructor with parameters.
    NotACandidate,
    /// The host could not resolve the declaration.
    UnresolvedMethod,
    /// The method's signature matches none of the supported shapes.
    UnsupportedShape,
    /// The return type cannot be built from the declaring type.
    UnresolvableShape(String),
    /// The request was cancelled; nothing may be applied.
    Cancelled,
}

impl GenerationError {
    /// Whether the host should simply show no action, as opposed to
    /// abandoning a request.
    pub fn is_no_action(&self) -> bool {
        !matches!(self, GenerationError::Cancelled)
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::NotACandidate => write!(f, "declaration is not a mapping candidate"),
            GenerationError::UnresolvedMethod => write!(f, "declaration did not resolve to a method"),
            GenerationError::UnsupportedShape => {
                write!(f, "method signature has no mapping implementation")
            }
            GenerationError::UnresolvableShape(msg) => write!(f, "{msg}"),
            GenerationError::Cancelled => write!(f, "mapping generation was cancelled"),
        }
    }
}

impl std::error::Error for GenerationError {}

impl From<MappingError> for GenerationError {
    fn from(err: MappingError) -> Self {
        match err {
            MappingError::Cancelled => GenerationError::Cancelled,
            MappingError::UnresolvableShape(msg) => GenerationError::UnresolvableShape(msg),
        }
    }
}

impl From<mapgen_common::Cancelled> for GenerationError {
    fn from(_: mapgen_common::Cancelled) -> Self {
        GenerationError::Cancelled
    }
}

pub struct MappingRefactoring<'a, R: SemanticResolver> {
    resolver: &'a R,
    options: DriverOptions,
    cancellation: CancellationToken,
}

impl<'a, R: SemanticResolver> MappingRefactoring<'a, R> {
    pub fn new(resolver: &'a R, options: DriverOptions) -> Self {
        Self {
            resolver,
            options,
            cancellation: CancellationToken::none(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// The two refactorings for `declaration`, or none when it is not a
    /// candidate or resolves to a method no shape can implement.
    pub fn provide_refactorings(&self, declaration: &MethodDeclaration) -> Vec<RefactoringInfo> {
        if !declaration.is_mapping_candidate() {
            return Vec::new();
        }
        let Some(method) = self.resolver.resolve_declared_method(declaration) else {
            return Vec::new();
        };
        if implement(self.resolver.database(), method).is_none() {
            debug!(file = %declaration.file_name, "no mapping shape for declaration");
            return Vec::new();
        }
        vec![RefactoringInfo::new(false), RefactoringInfo::new(true)]
    }

    /// Generate the body of `declaration` and return the edit replacing the
    /// existing one.
    pub fn generate_mapping_body(
        &self,
        declaration: &MethodDeclaration,
        use_member_functions: bool,
    ) -> Result<CodeAction, GenerationError> {
        let _span = debug_span!(
            "generate_mapping_body",
            file = %declaration.file_name,
            start = declaration.body_span.start,
            reuse = use_member_functions,
        )
        .entered();

        if !declaration.is_mapping_candidate() {
            return Err(GenerationError::NotACandidate);
        }
        let method = self
            .resolver
            .resolve_declared_method(declaration)
            .ok_or(GenerationError::UnresolvedMethod)?;
        self.cancellation.check()?;

        let db = self.resolver.database();
        let implementation = implement(db, method).ok_or(GenerationError::UnsupportedShape)?;
        debug!(shape = ?implementation.shape, "implementing");

        let mut ctx = MappingContext::for_method(
            db,
            method,
            use_member_functions,
            self.options.mapping.clone(),
        )
        .with_names_in_scope(implementation.parameters.iter().copied())
        .with_cancellation(self.cancellation.clone());
        let plan = generate_mapping(db, &implementation.target, &implementation.source, &mut ctx)
            .inspect_err(|err| debug!(%err, "no mapping generated"))?;
        self.cancellation.check()?;

        let statements =
            PlanLowering::new(db, self.options.unmapped).lower_body(&plan, &implementation.form);
        let new_text = self.format_body(&statements, declaration.indent_level);

        let info = RefactoringInfo::new(use_member_functions);
        Ok(CodeAction {
            title: info.title,
            kind: info.kind,
            shape: implementation.shape,
            edit: TextEdit {
                file_name: declaration.file_name.clone(),
                span: declaration.body_span,
                new_text,
            },
        })
    }

    /// `{`, the statements one level deeper than the declaration, `}`.
    fn format_body(&self, statements: &[mapgen_emitter::IRNode], level: u32) -> String {
        let indent = self.options.indent.as_str();
        let mut text = String::from("{\n");
        text.push_str(&IRPrinter::print_statements(statements, indent, level + 1));
        for _ in 0..level {
            text.push_str(indent);
        }
        text.push('}');
        text
    }
}

#[cfg(test)]
#[path = "../../tests/code_actions_tests.rs"]
mod tests;
