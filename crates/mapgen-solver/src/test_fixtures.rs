//! Builders for small type universes used across the solver tests.

use crate::db::TypeDatabase;
use crate::def::{DefId, DefinitionInfo};
use crate::plan::MappingPlan;
use crate::shapes::SourceExpr;
use crate::types::{MemberInfo, MethodInfo, MethodRef, ParamInfo, TypeId};
use mapgen_common::Atom;

pub(crate) struct Fixture {
    pub db: TypeDatabase,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            db: TypeDatabase::new(),
        }
    }

    pub fn atom(&self, s: &str) -> Atom {
        self.db.intern_string(s)
    }

    pub fn text(&self, atom: Atom) -> String {
        self.db.resolve_atom(atom).to_string()
    }

    pub fn declare(&self, info: DefinitionInfo) -> (DefId, TypeId) {
        self.db.declare(info)
    }

    /// Public class with public read/write properties.
    pub fn class(&self, name: &str, props: &[(&str, TypeId)]) -> (DefId, TypeId) {
        let (def, ty) = self.declare(DefinitionInfo::class(self.atom(name)));
        for (prop, prop_type) in props {
            self.prop(def, prop, *prop_type);
        }
        (def, ty)
    }

    pub fn prop(&self, def: DefId, name: &str, type_id: TypeId) {
        self.member(def, MemberInfo::property(self.atom(name), type_id));
    }

    pub fn member(&self, def: DefId, member: MemberInfo) {
        self.db.defs.add_member(def, member);
    }

    pub fn params(&self, params: &[(&str, TypeId)]) -> Vec<ParamInfo> {
        params
            .iter()
            .map(|(name, ty)| ParamInfo::new(self.atom(name), *ty))
            .collect()
    }

    pub fn method(
        &self,
        owner: DefId,
        name: &str,
        params: &[(&str, TypeId)],
        return_type: TypeId,
    ) -> MethodRef {
        self.add_method(
            owner,
            MethodInfo::new(self.atom(name), self.params(params), return_type),
        )
    }

    pub fn add_method(&self, owner: DefId, method: MethodInfo) -> MethodRef {
        self.db.defs.add_method(owner, method)
    }

    pub fn ctor(&self, owner: DefId, params: &[(&str, TypeId)]) -> MethodRef {
        self.db
            .defs
            .add_constructor(owner, MethodInfo::constructor(self.params(params)))
    }

    pub fn list(&self, element: TypeId) -> TypeId {
        self.db.types.list(element)
    }

    pub fn ident(&self, name: &str) -> SourceExpr {
        SourceExpr::Identifier(self.atom(name))
    }

    /// `root.a.b...` as a source expression.
    pub fn path(&self, root: &str, members: &[&str]) -> SourceExpr {
        members
            .iter()
            .fold(self.ident(root), |expr, m| expr.member(self.atom(m)))
    }

    /// Target names of a plan, in entry order.
    pub fn target_names(&self, plan: &MappingPlan) -> Vec<String> {
        plan.entries
            .iter()
            .map(|e| self.text(e.target.name))
            .collect()
    }
}
