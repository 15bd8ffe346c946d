//! Positional type compatibility
//!
//! Decides whether a declared parameter type accepts a component. The rules are
//! checked in order and the table is closed:
//!
//! | # | Rule | Result |
//! |---|------|--------|
//! | 1 | declared type is the component's exact type | [`Compatibility::Exact`] |
//! | 2 | declared type is a capability the component implements | [`Compatibility::Ancestor`] |
//! | 3 | declared and actual types are a numeric `N` / `Box<N>` pair | [`Compatibility::Boxing`] |
//! | 4 | anything else | no match |
//!
//! There is no narrowing and no cross-family coercion: `i32` never accepts an
//! `i64`, and `String` never accepts a number.

use crate::{Component, TypeTag};

/// Which rule admitted a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Compatibility {
    /// Declared type equals the component's runtime type.
    Exact,
    /// Declared type is a capability (`Arc<dyn Trait>`) the component implements.
    Ancestor,
    /// Declared and actual types are a numeric primitive and its boxed form.
    Boxing,
}

/// Check whether `declared` accepts `actual`.
///
/// Returns the first rule that admits the component, or `None`.
///
/// # Example
///
/// ```
/// use recmix::compatibility::{accepts, Compatibility};
/// use recmix::TypeTag;
///
/// assert_eq!(accepts(TypeTag::of::<i32>(), &5_i32), Some(Compatibility::Exact));
/// assert_eq!(accepts(TypeTag::of::<Box<i32>>(), &5_i32), Some(Compatibility::Boxing));
/// assert_eq!(accepts(TypeTag::of::<String>(), &5_i32), None);
/// ```
#[must_use]
pub fn accepts(declared: TypeTag, actual: &dyn Component) -> Option<Compatibility> {
    let actual_tag = actual.type_tag();
    if declared == actual_tag {
        Some(Compatibility::Exact)
    } else if actual.implements(declared) {
        Some(Compatibility::Ancestor)
    } else if is_boxed_pair(declared, actual_tag) {
        Some(Compatibility::Boxing)
    } else {
        None
    }
}

/// Static form of [`accepts`] for declared field types.
///
/// Only rules 1 and 3 can be decided without a value, so capability
/// membership is not considered here.
#[must_use]
pub fn accepts_type(declared: TypeTag, actual: TypeTag) -> bool {
    declared == actual || is_boxed_pair(declared, actual)
}

/// Returns `true` if the two tags are `N` and `Box<N>` (either order) for a
/// numeric primitive `N`.
#[must_use]
pub fn is_boxed_pair(a: TypeTag, b: TypeTag) -> bool {
    fn pair<N: 'static>(a: TypeTag, b: TypeTag) -> bool {
        (a.is::<N>() && b.is::<Box<N>>()) || (a.is::<Box<N>>() && b.is::<N>())
    }

    pair::<i8>(a, b)
        || pair::<i16>(a, b)
        || pair::<i32>(a, b)
        || pair::<i64>(a, b)
        || pair::<i128>(a, b)
        || pair::<isize>(a, b)
        || pair::<u8>(a, b)
        || pair::<u16>(a, b)
        || pair::<u32>(a, b)
        || pair::<u64>(a, b)
        || pair::<u128>(a, b)
        || pair::<usize>(a, b)
        || pair::<f32>(a, b)
        || pair::<f64>(a, b)
}
