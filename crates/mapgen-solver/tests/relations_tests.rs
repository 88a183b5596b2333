use super::*;
use crate::def::DefinitionInfo;
use crate::test_fixtures::Fixture;

#[test]
fn test_identity_and_object() {
    let fx = Fixture::new();
    let (_, customer) = fx.class("Customer", &[]);

    assert!(is_implicitly_convertible(&fx.db, TypeId::STRING, TypeId::STRING));
    assert!(is_implicitly_convertible(&fx.db, customer, customer));
    assert!(is_implicitly_convertible(&fx.db, customer, TypeId::OBJECT));
    assert!(is_implicitly_convertible(&fx.db, TypeId::INT32, TypeId::OBJECT));
}

#[test]
fn test_error_and_void_never_convert() {
    let fx = Fixture::new();

    assert!(!is_implicitly_convertible(&fx.db, TypeId::ERROR, TypeId::ERROR));
    assert!(!is_implicitly_convertible(&fx.db, TypeId::ERROR, TypeId::OBJECT));
    assert!(!is_implicitly_convertible(&fx.db, TypeId::VOID, TypeId::OBJECT));
}

#[test]
fn test_numeric_widening() {
    let fx = Fixture::new();

    assert!(is_implicitly_convertible(&fx.db, TypeId::INT32, TypeId::INT64));
    assert!(is_implicitly_convertible(&fx.db, TypeId::BYTE, TypeId::DECIMAL));
    assert!(is_implicitly_convertible(&fx.db, TypeId::FLOAT32, TypeId::FLOAT64));
    assert!(is_implicitly_convertible(&fx.db, TypeId::CHAR, TypeId::INT32));
    assert!(!is_implicitly_convertible(&fx.db, TypeId::INT64, TypeId::INT32));
    assert!(!is_implicitly_convertible(&fx.db, TypeId::FLOAT64, TypeId::DECIMAL));
    assert!(!is_implicitly_convertible(&fx.db, TypeId::INT32, TypeId::STRING));
}

#[test]
fn test_nullable_lifting() {
    let fx = Fixture::new();
    let int_opt = fx.db.types.nullable(TypeId::INT32);
    let long_opt = fx.db.types.nullable(TypeId::INT64);

    assert!(is_implicitly_convertible(&fx.db, TypeId::INT32, int_opt));
    assert!(is_implicitly_convertible(&fx.db, TypeId::INT32, long_opt));
    assert!(is_implicitly_convertible(&fx.db, int_opt, long_opt));
    assert!(!is_implicitly_convertible(&fx.db, int_opt, TypeId::INT32));
}

#[test]
fn test_derived_to_base() {
    let fx = Fixture::new();
    let (shape_def, shape) = fx.declare(DefinitionInfo::interface(fx.atom("IShape")));
    let (base_def, base) = fx.class("Entity", &[]);
    let (derived_def, derived) = fx.declare(
        DefinitionInfo::class(fx.atom("Square"))
            .with_extends(base_def)
            .with_implements(vec![shape_def]),
    );

    assert!(is_same_or_derived(&fx.db.defs, derived_def, base_def));
    assert!(is_implicitly_convertible(&fx.db, derived, base));
    assert!(is_implicitly_convertible(&fx.db, derived, shape));
    assert!(!is_implicitly_convertible(&fx.db, base, derived));
}

#[test]
fn test_generic_arguments_must_match() {
    let fx = Fixture::new();
    let (wrapper, _) = fx.class("Wrapper", &[]);
    let of_int = fx.db.types.generic(wrapper, vec![TypeId::INT32]);
    let of_long = fx.db.types.generic(wrapper, vec![TypeId::INT64]);

    assert!(is_implicitly_convertible(&fx.db, of_int, of_int));
    assert!(!is_implicitly_convertible(&fx.db, of_int, of_long));
}

#[test]
fn test_collection_views_and_covariance() {
    let fx = Fixture::new();
    let (base_def, base) = fx.class("Animal", &[]);
    let (_, dog) = fx.declare(DefinitionInfo::class(fx.atom("Dog")).with_extends(base_def));
    let types = &fx.db.types;

    let dogs = types.list(dog);
    assert!(is_implicitly_convertible(&fx.db, dogs, types.enumerable(dog)));
    assert!(is_implicitly_convertible(&fx.db, dogs, types.enumerable(base)));
    assert!(is_implicitly_convertible(
        &fx.db,
        dogs,
        types.collection(CollectionKind::ReadOnlyList, dog)
    ));
    assert!(!is_implicitly_convertible(&fx.db, dogs, types.list(base)));
    assert!(is_implicitly_convertible(&fx.db, types.array(dog), types.array(base)));
    assert!(!is_implicitly_convertible(&fx.db, types.array(dog), dogs));

    // Value-type elements are not covariant.
    let ints = types.list(TypeId::INT32);
    assert!(!is_implicitly_convertible(&fx.db, ints, types.enumerable(TypeId::INT64)));
    assert!(!is_implicitly_convertible(
        &fx.db,
        types.collection(CollectionKind::Set, dog),
        types.collection(CollectionKind::ReadOnlyList, dog)
    ));
}
