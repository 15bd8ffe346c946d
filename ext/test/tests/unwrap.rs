//! Nested optional values, reached through a record field

use recmix::{field_value, unwrap_nested, unwrap_nested_as};
use recmix_test::Maybe;

fn maybe(value: Option<Option<String>>) -> Maybe {
    Maybe {
        label: "x".into(),
        value,
    }
}

#[test]
fn test_unwrap_field() {
    let record = maybe(Some(Some("Hello".into())));
    let field = field_value(&record, 1);
    assert_eq!(unwrap_nested_as::<String>(field).map(String::as_str), Some("Hello"));
}

#[test]
fn test_unwrap_empty_layers() {
    for value in [None, Some(None)] {
        let record = maybe(value);
        assert!(unwrap_nested(field_value(&record, 1)).is_absent());
    }
}

#[test]
fn test_unwrap_non_container_is_itself() {
    let record = maybe(None);
    let label = unwrap_nested(field_value(&record, 0));
    assert!(label.is_present());
    assert_eq!(label.downcast_ref::<String>().map(String::as_str), Some("x"));
}

#[test]
fn test_unwrap_wrong_type_is_absent() {
    let record = maybe(Some(Some("Hello".into())));
    assert!(unwrap_nested_as::<i32>(field_value(&record, 1)).is_none());
}
