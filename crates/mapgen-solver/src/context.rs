//! Per-request mapping state.

use crate::conversions::ConversionCatalog;
use crate::db::TypeDatabase;
use crate::def::DefId;
use crate::options::MappingOptions;
use crate::recursion::RecursionGuard;
use crate::types::{MethodRef, TypeId};
use mapgen_common::{Atom, CancellationToken, Cancelled};

/// Everything one generation request carries through the engine.
///
/// The visited set holds the `(source, target)` type pairs currently being
/// mapped. It is empty whenever no `generate_mapping` call is running.
pub struct MappingContext {
    pub conversions: ConversionCatalog,
    pub allow_member_function_reuse: bool,
    /// The type declaring the method being generated; all accessibility is
    /// checked from here.
    pub viewing_type: DefId,
    pub options: MappingOptions,
    /// Identifiers already declared around the generated body, such as the
    /// parameters of the method being implemented.
    pub names_in_scope: Vec<Atom>,
    cancellation: CancellationToken,
    pub(crate) visited: RecursionGuard<(TypeId, TypeId)>,
}

impl MappingContext {
    pub fn new(viewing_type: DefId, options: MappingOptions) -> Self {
        let visited = RecursionGuard::with_profile(options.recursion_profile());
        Self {
            conversions: ConversionCatalog::empty(),
            allow_member_function_reuse: false,
            viewing_type,
            options,
            names_in_scope: Vec::new(),
            cancellation: CancellationToken::none(),
            visited,
        }
    }

    /// Context for generating the body of `method`.
    ///
    /// The conversion catalog is only built when member functions may be
    /// reused.
    pub fn for_method(
        db: &TypeDatabase,
        method: MethodRef,
        use_member_functions: bool,
        options: MappingOptions,
    ) -> Self {
        let ctx = Self::new(method.owner, options);
        if use_member_functions {
            ctx.with_member_function_reuse(ConversionCatalog::for_method(db, method))
        } else {
            ctx
        }
    }

    pub fn with_member_function_reuse(mut self, conversions: ConversionCatalog) -> Self {
        self.conversions = conversions;
        self.allow_member_function_reuse = true;
        self
    }

    pub fn with_names_in_scope(mut self, names: impl IntoIterator<Item = Atom>) -> Self {
        self.names_in_scope.extend(names);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    #[inline]
    pub fn check_cancelled(&self) -> Result<(), Cancelled> {
        self.cancellation.check()
    }

    pub fn is_visiting(&self, source: TypeId, target: TypeId) -> bool {
        self.visited.is_visiting(&(source, target))
    }

    pub fn visited_count(&self) -> usize {
        self.visited.visiting_count()
    }
}
