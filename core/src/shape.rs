//! Tuple shapes: the fixed, ordered, named field list of a tuple type
//!
//! A type becomes tuple-shaped by implementing [`TupleType`]. The field list is
//! declared once, as a `const`, and shared by every instance; inspecting a shape
//! never touches instance data.
//!
//! [`Tuple`] is the object-safe half of the same contract. It is blanket
//! implemented for every `TupleType`, and is what [`Component::as_tuple`]
//! returns so that the engine can walk fields of a value it only knows as
//! `&dyn Component`.

use crate::compatibility::accepts_type;
use crate::{Arguments, Component, FromArguments, MatchError, TypeTag};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════════
// FieldDescriptor
// ═══════════════════════════════════════════════════════════════════════════════

/// One declared field of a tuple type: name, declared type and position.
///
/// Descriptors are built in `const` context, so a type's whole field list can
/// live in a `&'static [FieldDescriptor]`.
#[derive(Clone, Copy)]
pub struct FieldDescriptor {
    name: &'static str,
    type_tag: fn() -> TypeTag,
    position: usize,
}

impl FieldDescriptor {
    /// Describe a field named `name` of declared type `T` at `position`.
    #[must_use]
    pub const fn new<T: ?Sized + 'static>(name: &'static str, position: usize) -> Self {
        Self {
            name,
            type_tag: TypeTag::of::<T>,
            position,
        }
    }

    /// Field name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type of the field.
    #[inline]
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        (self.type_tag)()
    }

    /// Zero-based position in the constructor.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }
}

impl PartialEq for FieldDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.position == other.position
            && self.type_tag() == other.type_tag()
    }
}

impl Eq for FieldDescriptor {}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("type", &self.type_tag().name())
            .field("position", &self.position)
            .finish()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FieldDescriptor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("FieldDescriptor", 3)?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("type", self.type_tag().name())?;
        state.serialize_field("position", &self.position)?;
        state.end()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TupleType / Tuple
// ═══════════════════════════════════════════════════════════════════════════════

/// A type with a fixed, ordered, named field list and one total constructor.
///
/// # Contract
///
/// - `FIELDS[i].position() == i` for every `i`.
/// - `component(i)` returns the value of field `i` for every `i < FIELDS.len()`,
///   borrowed from `self` (capability fields return the value behind the pointer).
/// - `from_parts(x.to_parts())` equals `x`.
///
/// The canonical constructor is [`construct`](Self::construct); by default it
/// pulls [`Parts`](Self::Parts) out of an [`Arguments`] list and calls
/// [`from_parts`](Self::from_parts).
pub trait TupleType: Component + Sized {
    /// Declared fields, in constructor order.
    const FIELDS: &'static [FieldDescriptor];

    /// The field types as a Rust tuple, in constructor order.
    type Parts: FromArguments;

    /// Borrow the field at `position`.
    fn component(&self, position: usize) -> Option<&dyn Component>;

    /// Copy every field out, in order.
    fn to_parts(&self) -> Self::Parts;

    /// The total constructor.
    fn from_parts(parts: Self::Parts) -> Self;

    /// Construct from a positional argument list.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::ArgumentMismatch`] if an argument cannot be
    /// produced as the declared type at its position.
    fn construct(arguments: &mut Arguments<'_>) -> Result<Self, MatchError> {
        Self::Parts::from_arguments(arguments).map(Self::from_parts)
    }
}

/// Object-safe view of a tuple-shaped value.
pub trait Tuple: Component {
    /// Declared fields of the value's type.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// Borrow the field at `position`.
    fn field(&self, position: usize) -> Option<&dyn Component>;

    /// Number of declared fields.
    fn arity(&self) -> usize {
        self.fields().len()
    }
}

impl<T: TupleType> Tuple for T {
    #[inline]
    fn fields(&self) -> &'static [FieldDescriptor] {
        T::FIELDS
    }

    #[inline]
    fn field(&self, position: usize) -> Option<&dyn Component> {
        self.component(position)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Shape
// ═══════════════════════════════════════════════════════════════════════════════

/// The shape of a tuple type: its tag and declared fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Shape {
    type_tag: TypeTag,
    fields: &'static [FieldDescriptor],
}

impl Shape {
    /// Shape of the tuple type `T`.
    #[must_use]
    pub fn of<T: TupleType>() -> Self {
        Self {
            type_tag: TypeTag::of::<T>(),
            fields: T::FIELDS,
        }
    }

    /// The tuple type.
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    /// Declared fields, in order.
    #[must_use]
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// Number of declared fields.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Position of the field called `name`.
    #[must_use]
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .find(|descriptor| descriptor.name() == name)
            .map(FieldDescriptor::position)
    }

    /// Field names, in order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(FieldDescriptor::name).collect()
    }

    /// Returns `true` if a value of this shape could be converted into `other`:
    /// same arity and positionally compatible declared types.
    #[must_use]
    pub fn compatible_with(&self, other: &Shape) -> bool {
        self.arity() == other.arity()
            && self
                .fields
                .iter()
                .zip(other.fields)
                .all(|(from, to)| accepts_type(to.type_tag(), from.type_tag()))
    }
}

/// The value is not tuple-shaped, or has fewer fields than were requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{type_name} is not a tuple of at least {requested} fields")]
pub struct NotATuple {
    /// Runtime type of the value that was described.
    pub type_name: &'static str,
    /// Arity that was asked for (0 when any tuple would do).
    pub requested: usize,
}

/// Describe the shape of `value`.
///
/// # Errors
///
/// Returns [`NotATuple`] if `value` is not tuple-shaped.
pub fn describe(value: &dyn Component) -> Result<Shape, NotATuple> {
    describe_with_arity(value, 0)
}

/// Describe the shape of `value`, requiring at least `arity` fields.
///
/// A shape with fewer fields is reported as [`NotATuple`], never as a partial
/// description.
///
/// # Errors
///
/// Returns [`NotATuple`] if `value` is not tuple-shaped or is too short.
pub fn describe_with_arity(value: &dyn Component, arity: usize) -> Result<Shape, NotATuple> {
    let not_a_tuple = NotATuple {
        type_name: value.type_tag().name(),
        requested: arity,
    };
    let tuple = value.as_tuple().ok_or(not_a_tuple)?;
    if tuple.arity() < arity {
        return Err(not_a_tuple);
    }
    Ok(Shape {
        type_tag: value.type_tag(),
        fields: tuple.fields(),
    })
}

/// Borrow the field of `value` at `position`.
///
/// Returns `None` for non-tuples and out-of-range positions.
#[must_use]
pub fn field_value(value: &dyn Component, position: usize) -> Option<&dyn Component> {
    value.as_tuple()?.field(position)
}
