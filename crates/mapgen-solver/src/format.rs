//! Type formatting for generated code and log output.

use crate::db::TypeDatabase;
use crate::types::{CollectionKind, TypeData, TypeId};
use std::fmt::Write;

/// Renders a `TypeId` the way it is written in source.
pub struct TypeFormatter<'a> {
    db: &'a TypeDatabase,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(db: &'a TypeDatabase) -> Self {
        Self { db }
    }

    pub fn format(&self, type_id: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, type_id);
        out
    }

    fn write_type(&self, out: &mut String, type_id: TypeId) {
        match self.db.types.lookup(type_id) {
            None | Some(TypeData::Error) => out.push_str("error"),
            Some(TypeData::Intrinsic(kind)) => out.push_str(kind.keyword()),
            Some(TypeData::Named { def, args }) => {
                match self.db.defs.get_name(def) {
                    Some(name) => out.push_str(&self.db.resolve_atom(name)),
                    None => {
                        let _ = write!(out, "<def {}>", def.0);
                    }
                }
                self.write_args(out, &args);
            }
            Some(TypeData::Collection { kind, element }) => match kind {
                CollectionKind::Array => {
                    self.write_type(out, element);
                    out.push_str("[]");
                }
                CollectionKind::List => self.write_generic(out, "List", element),
                CollectionKind::Enumerable => self.write_generic(out, "IEnumerable", element),
                CollectionKind::ReadOnlyList => self.write_generic(out, "IReadOnlyList", element),
                CollectionKind::Set => self.write_generic(out, "HashSet", element),
            },
            Some(TypeData::Nullable(inner)) => {
                self.write_type(out, inner);
                out.push('?');
            }
        }
    }

    fn write_generic(&self, out: &mut String, name: &str, element: TypeId) {
        out.push_str(name);
        self.write_args(out, &[element]);
    }

    fn write_args(&self, out: &mut String, args: &[TypeId]) {
        if args.is_empty() {
            return;
        }
        out.push('<');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_type(out, *arg);
        }
        out.push('>');
    }
}
