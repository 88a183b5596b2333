use super::*;

#[test]
fn test_intern_deduplicates() {
    let interner = Interner::new();
    let a = interner.intern("HomeAddress");
    let b = interner.intern("HomeAddress");
    let c = interner.intern("homeAddress");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(&*interner.resolve(a), "HomeAddress");
}

#[test]
fn test_empty_string_is_none_atom() {
    let interner = Interner::new();
    assert_eq!(interner.intern(""), Atom::NONE);
    assert!(interner.is_empty());
    assert!(Atom::NONE.is_none());
}

#[test]
fn test_resolve_out_of_bounds_is_empty() {
    let interner = Interner::new();
    assert_eq!(&*interner.resolve(Atom(9999)), "");
    assert!(interner.try_resolve(Atom(9999)).is_none());
}

#[test]
fn test_eq_ignore_case() {
    let interner = Interner::new();
    let upper = interner.intern("Name");
    let lower = interner.intern("name");
    let other = interner.intern("Names");

    assert!(interner.eq_ignore_case(upper, lower));
    assert!(!interner.eq_ignore_case(upper, other));
}

#[test]
fn test_eq_folded_unicode() {
    assert!(eq_folded("Straße", "straße"));
    assert!(eq_folded("ÄRGER", "ärger"));
    assert!(!eq_folded("id", "ids"));
}

#[test]
fn test_strip_prefix_folded() {
    assert_eq!(strip_prefix_folded("HomeAddressCity", "homeaddress"), Some("City"));
    assert_eq!(strip_prefix_folded("HomeAddress", "HomeAddress"), Some(""));
    assert_eq!(strip_prefix_folded("Home", "HomeAddress"), None);
    assert_eq!(strip_prefix_folded("OfficeCity", "Home"), None);
}

#[test]
fn test_intern_common_is_idempotent() {
    let interner = Interner::new();
    interner.intern_common();
    let len = interner.len();
    interner.intern_common();
    assert_eq!(interner.len(), len);
}
