//! Lowered IR (Intermediate Representation) for generated method bodies.
//!
//! Lowering turns a `MappingPlan` into a tree of `IRNode`s; the printer walks
//! the tree and produces source text. Keeping the two apart means the
//! lowering is testable without comparing strings, and formatting decisions
//! live in one place.

/// Intermediate Representation node for a generated body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IRNode {
    // =========================================================================
    // Expressions
    // =========================================================================
    /// Identifier: `order`, `item`
    Identifier(String),

    /// `this`
    This,

    /// `default`, the placeholder for a constructor argument with no source
    Default,

    /// Property access: `object.property`
    PropertyAccess { object: Box<Self>, property: String },

    /// Call expression: `callee(args)`
    CallExpr {
        callee: Box<Self>,
        arguments: Vec<Self>,
    },

    /// Object creation: `new Type(args) { Member = value, ... }`
    NewExpr {
        type_name: String,
        arguments: Vec<Self>,
        initializers: Vec<IRInitializer>,
    },

    /// Single-parameter lambda: `x => body`
    Lambda { parameter: String, body: Box<Self> },

    /// Cast: `(Type)expr`
    Cast { type_name: String, expr: Box<Self> },

    /// Expression followed by an inline comment: `expr /* text */`
    Annotated { expr: Box<Self>, comment: String },

    // =========================================================================
    // Statements
    // =========================================================================
    /// Assignment statement: `target = value;`
    Assignment { target: Box<Self>, value: Box<Self> },

    /// Return statement: `return expr;`
    ReturnStatement(Option<Box<Self>>),

    /// Line comment: `// text`
    Comment(String),
}

/// One `Member = value` entry of an object initializer. `value` is `None`
/// for a placeholder that is printed as a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IRInitializer {
    pub member: String,
    pub value: Option<IRNode>,
    pub comment: Option<String>,
}

impl IRInitializer {
    pub fn assign(member: impl Into<String>, value: IRNode) -> Self {
        Self {
            member: member.into(),
            value: Some(value),
            comment: None,
        }
    }

    pub fn placeholder(member: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            value: None,
            comment: Some(comment.into()),
        }
    }
}

impl IRNode {
    /// Create an identifier
    pub fn id(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Create a property access: `object.property`
    pub fn prop(object: Self, property: impl Into<String>) -> Self {
        Self::PropertyAccess {
            object: Box::new(object),
            property: property.into(),
        }
    }

    /// Create a call: `callee(args)`
    pub fn call(callee: Self, args: Vec<Self>) -> Self {
        Self::CallExpr {
            callee: Box::new(callee),
            arguments: args,
        }
    }

    /// Create a method call: `receiver.method(args)`
    pub fn method_call(receiver: Self, method: impl Into<String>, args: Vec<Self>) -> Self {
        Self::call(Self::prop(receiver, method), args)
    }

    /// Create an object creation expression
    pub fn new_expr(
        type_name: impl Into<String>,
        args: Vec<Self>,
        initializers: Vec<IRInitializer>,
    ) -> Self {
        Self::NewExpr {
            type_name: type_name.into(),
            arguments: args,
            initializers,
        }
    }

    /// Create a lambda: `parameter => body`
    pub fn lambda(parameter: impl Into<String>, body: Self) -> Self {
        Self::Lambda {
            parameter: parameter.into(),
            body: Box::new(body),
        }
    }

    /// Create a cast: `(Type)expr`
    pub fn cast(type_name: impl Into<String>, expr: Self) -> Self {
        Self::Cast {
            type_name: type_name.into(),
            expr: Box::new(expr),
        }
    }

    pub fn annotated(self, comment: impl Into<String>) -> Self {
        Self::Annotated {
            expr: Box::new(self),
            comment: comment.into(),
        }
    }

    /// Create an assignment statement: `target = value;`
    pub fn assign(target: Self, value: Self) -> Self {
        Self::Assignment {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    /// Create a return statement
    pub fn ret(expr: Option<Self>) -> Self {
        Self::ReturnStatement(expr.map(Box::new))
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(text.into())
    }

    /// Whether this node is printed as a statement.
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Self::Assignment { .. } | Self::ReturnStatement(_) | Self::Comment(_)
        )
    }
}
