//! Host seam: how the driver reaches the host's semantic model.

use crate::position::TextSpan;
use mapgen_solver::{MethodRef, TypeDatabase};
use rustc_hash::FxHashMap;

/// Syntactic facts about the method under the cursor.
///
/// These are enough to decide whether a refactoring is offered at all,
/// before any semantic work happens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub file_name: String,
    /// The body including its braces; the generated edit replaces it.
    pub body_span: TextSpan,
    pub is_constructor: bool,
    pub parameter_count: usize,
    /// Declared inside an interface (default interface methods included).
    pub in_interface: bool,
    /// Indentation level of the declaration itself.
    pub indent_level: u32,
}

impl MethodDeclaration {
    pub fn method(file_name: impl Into<String>, body_span: TextSpan, parameter_count: usize) -> Self {
        Self {
            file_name: file_name.into(),
            body_span,
            is_constructor: false,
            parameter_count,
            in_interface: false,
            indent_level: 0,
        }
    }

    pub fn constructor(
        file_name: impl Into<String>,
        body_span: TextSpan,
        parameter_count: usize,
    ) -> Self {
        Self {
            is_constructor: true,
            ..Self::method(file_name, body_span, parameter_count)
        }
    }

    pub fn at_indent(mut self, level: u32) -> Self {
        self.indent_level = level;
        self
    }

    pub fn inside_interface(mut self) -> Self {
        self.in_interface = true;
        self
    }

    /// Ordinary methods qualify, constructors only with parameters, and
    /// nothing declared in an interface.
    pub fn is_mapping_candidate(&self) -> bool {
        !self.in_interface && (!self.is_constructor || self.parameter_count > 0)
    }
}

/// Resolves declarations against the host's compilation.
pub trait SemanticResolver {
    /// Types and definitions of the current compilation.
    fn database(&self) -> &TypeDatabase;

    /// The symbol declared by `declaration`, if it resolves.
    fn resolve_declared_method(&self, declaration: &MethodDeclaration) -> Option<MethodRef>;
}

/// A resolver over a prebuilt database, keyed by file and body start.
///
/// Used by hosts that build the whole universe up front, and by tests.
#[derive(Default)]
pub struct DatabaseResolver {
    db: TypeDatabase,
    methods: FxHashMap<(String, u32), MethodRef>,
}

impl DatabaseResolver {
    pub fn new(db: TypeDatabase) -> Self {
        Self {
            db,
            methods: FxHashMap::default(),
        }
    }

    /// Record that the body starting at `body_start` in `file_name` belongs
    /// to `method`.
    pub fn bind(&mut self, file_name: impl Into<String>, body_start: u32, method: MethodRef) {
        self.methods.insert((file_name.into(), body_start), method);
    }
}

impl SemanticResolver for DatabaseResolver {
    fn database(&self) -> &TypeDatabase {
        &self.db
    }

    fn resolve_declared_method(&self, declaration: &MethodDeclaration) -> Option<MethodRef> {
        self.methods
            .get(&(declaration.file_name.clone(), declaration.body_span.start))
            .copied()
    }
}
