//! Decomposition and update helpers available on every tuple type

use crate::{convert, with_field, Field, MatchError, Param, TupleType};

/// Calls a closure with a tuple's elements as separate arguments.
pub trait Spread<F, O> {
    /// Call `f` with each element of `self`, in order.
    fn spread(self, f: F) -> O;
}

macro_rules! impl_spread {
    ($($ty:ident),*) => {
        impl<F, O, $($ty,)*> Spread<F, O> for ($($ty,)*)
        where
            F: FnOnce($($ty),*) -> O,
        {
            #[allow(non_snake_case)]
            fn spread(self, f: F) -> O {
                let ($($ty,)*) = self;
                f($($ty),*)
            }
        }
    };
}

impl_spread!(T1);
impl_spread!(T1, T2);
impl_spread!(T1, T2, T3);
impl_spread!(T1, T2, T3, T4);

/// Helpers for values whose tuple type is known statically.
///
/// Unlike [`try_apply`](crate::try_apply), nothing here can fail to match:
/// the compiler has already checked the field types.
pub trait TupleExt: TupleType {
    /// Hand all fields, as one Rust tuple, to `f`.
    fn decompose<F, O>(&self, f: F) -> O
    where
        F: FnOnce(Self::Parts) -> O,
    {
        f(self.to_parts())
    }

    /// Hand each field, as a separate argument, to `f`.
    fn decompose_to<F, O>(&self, f: F) -> O
    where
        Self::Parts: Spread<F, O>,
    {
        self.to_parts().spread(f)
    }

    /// Convert into another tuple type with the same field types.
    fn to<T>(&self) -> T
    where
        T: TupleType<Parts = Self::Parts>,
    {
        convert(self)
    }

    /// A copy with one field replaced. See [`with_field`].
    ///
    /// # Errors
    ///
    /// Propagates errors from [`with_field`].
    fn with<T: Param, const P: usize>(&self, field: Field<Self, T, P>, value: T) -> Result<Self, MatchError> {
        with_field(self, field, value)
    }
}

impl<R: TupleType> TupleExt for R {}
