//! Conversion, update and construction through the public API

use recmix::{convert_by_shape, convert_with, staged};
use recmix_test::prelude::*;
use std::sync::Arc;

#[test]
fn test_convert_same_parts() {
    let town: Town = convert(&Colour::new(1, 2, 3));
    assert_eq!(town, Town::new(1, 2, 3));
    let back: Colour = town.to();
    assert_eq!(back, Colour::new(1, 2, 3));
}

#[test]
fn test_convert_with_constructor() {
    let source = NameWithMiddle::new("Benji", "???", "Weber");
    let name: Name = convert_with(&source, |first: String, middle: String, last: String| {
        Name::new(first + " " + &middle, last)
    })
    .unwrap();
    assert_eq!(name, Name::new("Benji ???", "Weber"));

    let err = convert_with(&Nums::new(1, 2), |a: String, b: String| Name::new(a, b)).unwrap_err();
    assert!(matches!(err, MatchError::NoCompatibleConstructor { .. }));
}

#[test]
fn test_convert_with_does_not_drop_fields() {
    let source = NameWithMiddle::new("Benji", "???", "Weber");
    let err = convert_with(&source, |first: String, last: String| Name::new(first, last))
        .unwrap_err();
    match err {
        MatchError::NoCompatibleConstructor { reason, .. } => {
            assert_eq!(reason, "source has 3 fields but the constructor takes 2");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_convert_by_shape() {
    let town: Town = convert_by_shape(&Colour::new(4, 5, 6)).unwrap();
    assert_eq!(town, Town::new(4, 5, 6));

    let zoo: Zoo = convert_by_shape(&Zoo::new(Duck, Dog)).unwrap();
    let noises = zoo.decompose(|(one, two)| [one.noise(), two.noise()]);
    assert_eq!(noises, ["Quack", "Woof"]);
}

#[test]
fn test_convert_by_shape_requires_exact_arity() {
    let err = convert_by_shape::<Name>(&NameWithMiddle::new("A", "B", "C")).unwrap_err();
    match err {
        MatchError::NoCompatibleConstructor { reason, .. } => {
            assert!(reason.contains("3 fields"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_with_field_named_and_accessor() {
    let bob = Person::new("Bob", 5, 2.5);
    let older = with_field(&bob, person::AGE, 6).unwrap();
    assert_eq!(older, Person::new("Bob", 6, 2.5));
    let renamed = older.with(person::NAME, "Robert".to_string()).unwrap();
    assert_eq!(renamed, Person::new("Robert", 6, 2.5));
    assert_eq!(bob, Person::new("Bob", 5, 2.5));
}

#[test]
fn test_with_field_capability() {
    let zoo = Zoo::new(Duck, Duck);
    let dog: Arc<dyn Animal> = Arc::new(Dog);
    let updated = zoo.with(zoo::TWO, dog).unwrap();
    assert_eq!(updated.two.noise(), "Woof");
    assert_eq!(zoo.two.noise(), "Quack");
}

#[test]
fn test_staged_builder() {
    let colour = staged::<Colour>()
        .with(colour::R, 10)
        .with(colour::G, 20)
        .with(colour::B, 30)
        .unwrap();
    assert_eq!(colour, Colour::new(10, 20, 30));

    let name = staged::<Name>()
        .with(name::FIRST, "Benji".into())
        .with(name::LAST, "Weber".into())
        .unwrap();
    assert_eq!(name, Name::new("Benji", "Weber"));
}

#[test]
fn test_staged_builder_rejects_unknown_token() {
    const WRONG: Field<Colour, i32, 0> = Field::named("no_such_field");
    let err = staged::<Colour>()
        .with(WRONG, 1)
        .with(colour::G, 2)
        .with(colour::B, 3)
        .unwrap_err();
    match err {
        MatchError::UnknownField { field, available, .. } => {
            assert_eq!(field, "no_such_field");
            assert_eq!(available, ["r", "g", "b"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_auto_builder() {
    let person = auto_builder::<Person>()
        .with(person::AGE, 40)
        .and_then(|b| b.with(person::NAME, "Ada".to_string()))
        .unwrap()
        .build();
    assert_eq!(person, Person::new("Ada", 40, 0.0));
}

#[test]
fn test_decompose_to() {
    let greeting = Name::new("Benji", "Weber")
        .decompose_to(|first: String, last: String| format!("Hi {first} {last}"));
    assert_eq!(greeting, "Hi Benji Weber");
}
