//! Core type representation for the mapping solver.
//!
//! A type is a `TypeId` handle into the `TypeInterner`; its structure is a
//! `TypeData`. Declarations (classes, structs, interfaces) live in the
//! `DefinitionStore` and are referenced from types by `DefId`.

use crate::def::DefId;
use bitflags::bitflags;
use mapgen_common::Atom;
use serde::Serialize;

// =============================================================================
// TypeId
// =============================================================================

/// Interned type handle. Equal ids mean structurally identical types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Unresolved or erroneous type. Never convertible to anything.
    pub const ERROR: TypeId = TypeId(0);
    pub const VOID: TypeId = TypeId(1);
    pub const BOOL: TypeId = TypeId(2);
    pub const CHAR: TypeId = TypeId(3);
    pub const BYTE: TypeId = TypeId(4);
    pub const INT16: TypeId = TypeId(5);
    pub const INT32: TypeId = TypeId(6);
    pub const INT64: TypeId = TypeId(7);
    pub const FLOAT32: TypeId = TypeId(8);
    pub const FLOAT64: TypeId = TypeId(9);
    pub const DECIMAL: TypeId = TypeId(10);
    pub const STRING: TypeId = TypeId(11);
    pub const OBJECT: TypeId = TypeId(12);
    pub const DATE_TIME: TypeId = TypeId(13);
    pub const GUID: TypeId = TypeId(14);

    /// First id handed out for non-intrinsic types.
    pub const FIRST_USER: u32 = 15;

    #[inline]
    pub const fn is_intrinsic(self) -> bool {
        self.0 > 0 && self.0 < Self::FIRST_USER
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 == 0
    }
}

/// Built-in scalar types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    Void,
    Bool,
    Char,
    Byte,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Decimal,
    String,
    Object,
    DateTime,
    Guid,
}

impl IntrinsicKind {
    /// All intrinsics in `TypeId` order.
    pub const ALL: [IntrinsicKind; 14] = [
        Self::Void,
        Self::Bool,
        Self::Char,
        Self::Byte,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Float32,
        Self::Float64,
        Self::Decimal,
        Self::String,
        Self::Object,
        Self::DateTime,
        Self::Guid,
    ];

    pub const fn type_id(self) -> TypeId {
        match self {
            Self::Void => TypeId::VOID,
            Self::Bool => TypeId::BOOL,
            Self::Char => TypeId::CHAR,
            Self::Byte => TypeId::BYTE,
            Self::Int16 => TypeId::INT16,
            Self::Int32 => TypeId::INT32,
            Self::Int64 => TypeId::INT64,
            Self::Float32 => TypeId::FLOAT32,
            Self::Float64 => TypeId::FLOAT64,
            Self::Decimal => TypeId::DECIMAL,
            Self::String => TypeId::STRING,
            Self::Object => TypeId::OBJECT,
            Self::DateTime => TypeId::DATE_TIME,
            Self::Guid => TypeId::GUID,
        }
    }

    /// Surface keyword used when printing the type.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Byte => "byte",
            Self::Int16 => "short",
            Self::Int32 => "int",
            Self::Int64 => "long",
            Self::Float32 => "float",
            Self::Float64 => "double",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::Object => "object",
            Self::DateTime => "DateTime",
            Self::Guid => "Guid",
        }
    }

    /// Value types need an explicit nullable wrapper to hold null.
    pub const fn is_value_type(self) -> bool {
        !matches!(self, Self::String | Self::Object | Self::Void)
    }
}

/// Shape of a collection-like type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum CollectionKind {
    /// `T[]`
    Array,
    /// `List<T>`
    List,
    /// `IEnumerable<T>`
    Enumerable,
    /// `IReadOnlyList<T>`
    ReadOnlyList,
    /// `HashSet<T>`
    Set,
}

/// Structural description of an interned type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Error,
    Intrinsic(IntrinsicKind),
    /// A declared class/struct/interface, optionally with generic arguments.
    Named { def: DefId, args: Vec<TypeId> },
    Collection { kind: CollectionKind, element: TypeId },
    Nullable(TypeId),
}

// =============================================================================
// Members
// =============================================================================

/// Declared accessibility of a type, member, constructor or method.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Protected,
    ProtectedInternal,
    PrivateProtected,
    Private,
}

/// Whether a member is declared as a property or as a data field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MemberKind {
    Property,
    Field,
}

bitflags! {
    /// Declaration modifiers that take a member out of the mapping surface.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MemberFlags: u8 {
        const STATIC = 1 << 0;
        /// Property with parameters (`this[int i]`).
        const INDEXER = 1 << 1;
        /// Compiler-synthesized (backing fields, closures).
        const IMPLICIT = 1 << 2;
    }
}

/// A declared property or field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberInfo {
    pub name: Atom,
    pub type_id: TypeId,
    pub kind: MemberKind,
    /// Visibility of the getter; `None` for write-only properties.
    pub getter: Option<Visibility>,
    /// Visibility of the setter; `None` for read-only members.
    pub setter: Option<Visibility>,
    pub flags: MemberFlags,
}

impl MemberInfo {
    /// Public read/write property.
    pub fn property(name: Atom, type_id: TypeId) -> Self {
        Self {
            name,
            type_id,
            kind: MemberKind::Property,
            getter: Some(Visibility::Public),
            setter: Some(Visibility::Public),
            flags: MemberFlags::empty(),
        }
    }

    /// Public mutable field.
    pub fn field(name: Atom, type_id: TypeId) -> Self {
        Self {
            kind: MemberKind::Field,
            ..Self::property(name, type_id)
        }
    }

    /// Apply `visibility` to every accessor the member has.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.getter = self.getter.map(|_| visibility);
        self.setter = self.setter.map(|_| visibility);
        self
    }

    /// Restrict only the setter (`public int Id { get; private set; }`).
    pub fn with_setter(mut self, visibility: Visibility) -> Self {
        self.setter = Some(visibility);
        self
    }

    /// Get-only property or readonly field.
    pub fn read_only(mut self) -> Self {
        self.setter = None;
        self
    }

    /// Set-only property.
    pub fn write_only(mut self) -> Self {
        self.getter = None;
        self
    }

    pub fn static_member(mut self) -> Self {
        self.flags |= MemberFlags::STATIC;
        self
    }

    pub fn indexer(mut self) -> Self {
        self.flags |= MemberFlags::INDEXER;
        self
    }

    pub fn implicit(mut self) -> Self {
        self.flags |= MemberFlags::IMPLICIT;
        self
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }
}

// =============================================================================
// Methods
// =============================================================================

/// A method or constructor parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamInfo {
    pub name: Atom,
    pub type_id: TypeId,
}

impl ParamInfo {
    pub const fn new(name: Atom, type_id: TypeId) -> Self {
        Self { name, type_id }
    }
}

/// A declared method or constructor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodInfo {
    pub name: Atom,
    pub params: Vec<ParamInfo>,
    /// `TypeId::VOID` for procedures and constructors.
    pub return_type: TypeId,
    pub visibility: Visibility,
    pub is_static: bool,
    /// Number of generic type parameters.
    pub type_param_count: u32,
}

impl MethodInfo {
    pub fn new(name: Atom, params: Vec<ParamInfo>, return_type: TypeId) -> Self {
        Self {
            name,
            params,
            return_type,
            visibility: Visibility::Public,
            is_static: false,
            type_param_count: 0,
        }
    }

    pub fn constructor(params: Vec<ParamInfo>) -> Self {
        Self::new(Atom::NONE, params, TypeId::VOID)
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn generic(mut self, type_param_count: u32) -> Self {
        self.type_param_count = type_param_count;
        self
    }

    #[inline]
    pub fn returns_void(&self) -> bool {
        self.return_type == TypeId::VOID
    }
}

/// Which list of a definition a `MethodRef` indexes into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MethodKind {
    Method,
    Constructor,
}

/// Stable identity of a method: owner + list + position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MethodRef {
    pub owner: DefId,
    pub kind: MethodKind,
    pub index: u32,
}

impl MethodRef {
    pub const fn method(owner: DefId, index: u32) -> Self {
        Self {
            owner,
            kind: MethodKind::Method,
            index,
        }
    }

    pub const fn constructor(owner: DefId, index: u32) -> Self {
        Self {
            owner,
            kind: MethodKind::Constructor,
            index,
        }
    }

    #[inline]
    pub fn is_constructor(self) -> bool {
        self.kind == MethodKind::Constructor
    }
}
