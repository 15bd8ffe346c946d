//! Positional constructor arguments
//!
//! [`Arguments`] is the ordered list handed to [`TupleType::construct`](crate::TupleType::construct).
//! Each slot is either borrowed from an existing value (conversion, update) or
//! owned (the replacement value in an update).

use crate::{Component, MatchError, Param, TypeTag};
use std::any::Any;
use std::collections::VecDeque;
use std::fmt;

/// One positional argument.
pub enum Argument<'a> {
    /// A component borrowed from another value; produced through [`Param::extract`].
    Borrowed(&'a dyn Component),
    /// A value supplied directly; produced by downcasting.
    Owned {
        /// The value, boxed as its own type.
        value: Box<dyn Any>,
        /// Type of `value`, for error messages.
        type_tag: TypeTag,
    },
}

impl<'a> Argument<'a> {
    /// Wrap an owned value.
    #[must_use]
    pub fn owned<T: Param>(value: T) -> Self {
        Self::Owned {
            value: Box::new(value),
            type_tag: T::type_tag(),
        }
    }

    /// Type of the argument.
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Borrowed(component) => component.type_tag(),
            Self::Owned { type_tag, .. } => *type_tag,
        }
    }
}

impl fmt::Debug for Argument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrowed(component) => f.debug_tuple("Borrowed").field(component).finish(),
            Self::Owned { type_tag, .. } => f.debug_struct("Owned").field("type", type_tag).finish(),
        }
    }
}

/// Ordered constructor arguments for one tuple type.
#[derive(Debug)]
pub struct Arguments<'a> {
    items: VecDeque<Argument<'a>>,
    type_name: &'static str,
    position: usize,
}

impl<'a> Arguments<'a> {
    /// Empty argument list for constructing `type_name`.
    #[must_use]
    pub fn new(type_name: &'static str) -> Self {
        Self {
            items: VecDeque::new(),
            type_name,
            position: 0,
        }
    }

    /// Argument list borrowing every component, in order.
    #[must_use]
    pub fn borrowing<I>(type_name: &'static str, components: I) -> Self
    where
        I: IntoIterator<Item = &'a dyn Component>,
    {
        Self {
            items: components.into_iter().map(Argument::Borrowed).collect(),
            type_name,
            position: 0,
        }
    }

    /// Append an argument.
    pub fn push(&mut self, argument: Argument<'a>) {
        self.items.push_back(argument);
    }

    /// Number of arguments not yet taken.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.items.len()
    }

    /// Take the next argument as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::ArgumentMismatch`] if the list is exhausted or the
    /// next argument cannot be produced as `T`.
    pub fn take<T: Param>(&mut self) -> Result<T, MatchError> {
        let position = self.position;
        let type_name = self.type_name;
        self.position += 1;

        let mismatch = |found: &str| MatchError::ArgumentMismatch {
            type_name: type_name.to_owned(),
            position,
            expected: T::type_tag().name().to_owned(),
            found: found.to_owned(),
        };

        match self.items.pop_front() {
            None => Err(mismatch("nothing")),
            Some(Argument::Borrowed(component)) => {
                T::extract(component).ok_or_else(|| mismatch(component.type_tag().name()))
            }
            Some(Argument::Owned { value, type_tag }) => value
                .downcast::<T>()
                .map(|value| *value)
                .map_err(|_| mismatch(type_tag.name())),
        }
    }
}

/// A Rust tuple of [`Param`]s that can be pulled out of [`Arguments`] in order.
pub trait FromArguments: Sized {
    /// Take one argument per element.
    ///
    /// # Errors
    ///
    /// Propagates the first [`MatchError::ArgumentMismatch`].
    fn from_arguments(arguments: &mut Arguments<'_>) -> Result<Self, MatchError>;
}

macro_rules! impl_from_arguments {
    ($($ty:ident),*) => {
        impl<$($ty: Param,)*> FromArguments for ($($ty,)*) {
            fn from_arguments(arguments: &mut Arguments<'_>) -> Result<Self, MatchError> {
                Ok(($(arguments.take::<$ty>()?,)*))
            }
        }
    };
}

impl_from_arguments!(T1);
impl_from_arguments!(T1, T2);
impl_from_arguments!(T1, T2, T3);
impl_from_arguments!(T1, T2, T3, T4);
