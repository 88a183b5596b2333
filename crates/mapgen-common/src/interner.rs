//! String interner for member, parameter and type names.
//!
//! Names are interned into a shared pool and passed around as `Atom`s, so
//! the matcher compares integers instead of strings. Case-insensitive
//! matching resolves atoms back to text and folds them on demand.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// An interned string identifier.
///
/// Atoms are cheap to copy (just a u32) and can be compared with == in O(1).
/// To get the actual string, use `Interner::resolve(atom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// A sentinel value representing no atom / empty string.
    pub const NONE: Atom = Atom(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Names that show up in nearly every mapping request.
const COMMON_STRINGS: &[&str] = &[
    "this", "value", "item", "source", "target", "id", "Id", "name", "Name", "items", "Items",
];

#[derive(Default)]
struct InternerState {
    /// Map from string to atom index
    map: FxHashMap<Arc<str>, Atom>,
    /// All interned strings (index 0 is the empty string)
    strings: Vec<Arc<str>>,
}

/// Thread-safe string interner.
///
/// Interning takes `&self` so the interner can live inside shared type
/// tables without threading `&mut` through every builder.
pub struct Interner {
    state: RwLock<InternerState>,
}

impl Interner {
    /// Create a new interner with the empty string pre-interned at index 0.
    pub fn new() -> Self {
        let mut state = InternerState::default();
        let empty: Arc<str> = Arc::from("");
        state.strings.push(empty.clone());
        state.map.insert(empty, Atom::NONE);
        Interner {
            state: RwLock::new(state),
        }
    }

    /// Intern a string, returning its Atom handle.
    pub fn intern(&self, s: &str) -> Atom {
        if let Some(&atom) = self
            .state
            .read()
            .expect("interner lock poisoned")
            .map
            .get(s)
        {
            return atom;
        }

        let mut state = self.state.write().expect("interner lock poisoned");
        // Another writer may have interned it between the two locks.
        if let Some(&atom) = state.map.get(s) {
            return atom;
        }
        let atom = Atom(state.strings.len() as u32);
        let owned: Arc<str> = Arc::from(s);
        state.strings.push(owned.clone());
        state.map.insert(owned, atom);
        atom
    }

    /// Resolve an Atom back to its string value.
    /// Returns the empty string if the atom is out of bounds.
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        self.try_resolve(atom).unwrap_or_else(|| Arc::from(""))
    }

    /// Try to resolve an Atom, returning None if invalid.
    pub fn try_resolve(&self, atom: Atom) -> Option<Arc<str>> {
        self.state
            .read()
            .expect("interner lock poisoned")
            .strings
            .get(atom.0 as usize)
            .cloned()
    }

    /// Compare two atoms ignoring case.
    pub fn eq_ignore_case(&self, a: Atom, b: Atom) -> bool {
        if a == b {
            return true;
        }
        let state = self.state.read().expect("interner lock poisoned");
        match (state.strings.get(a.0 as usize), state.strings.get(b.0 as usize)) {
            (Some(a), Some(b)) => eq_folded(a, b),
            _ => false,
        }
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.state.read().expect("interner lock poisoned").strings.len()
    }

    /// True when only the empty string is interned.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Pre-intern names used by nearly every request.
    pub fn intern_common(&self) {
        for s in COMMON_STRINGS {
            self.intern(s);
        }
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive comparison using Unicode lowercase folding.
pub fn eq_folded(a: &str, b: &str) -> bool {
    if a.len() == b.len() && a.eq_ignore_ascii_case(b) {
        return true;
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Case-insensitive prefix test; returns the remainder of `s` after `prefix`.
pub fn strip_prefix_folded<'s>(s: &'s str, prefix: &str) -> Option<&'s str> {
    let mut rest = s.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = rest.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    match rest.next() {
        Some((idx, _)) => Some(&s[idx..]),
        None => Some(""),
    }
}

#[cfg(test)]
#[path = "../tests/interner_tests.rs"]
mod tests;
