//! Handlers: closures whose parameter types are the match pattern
//!
//! A handler's signature is read from its closure type, so it is known at
//! compile time and can never be missing. [`Param`] is how each parameter type
//! pulls itself out of a `&dyn Component`; [`Handler`] ties a closure to the
//! tuple of its parameter types.
//!
//! # Example
//!
//! ```
//! use recmix::{signature_of, TypeTag};
//!
//! let handler = |first: String, age: i32| format!("{first} ({age})");
//! let signature = signature_of(&handler);
//!
//! assert_eq!(signature.arity(), 2);
//! assert_eq!(signature.params()[1], TypeTag::of::<i32>());
//! ```

use crate::{Component, TypeTag};
use std::fmt;
use std::sync::Arc;

// ═══════════════════════════════════════════════════════════════════════════════
// Param
// ═══════════════════════════════════════════════════════════════════════════════

/// A type that can appear as a handler parameter.
///
/// Implemented for every `Component + Clone` (taken by exact type or through
/// [`Component::upcast`]) and for `Arc<C>` capability views such as
/// `Arc<dyn Animal>` (taken through `upcast`).
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a handler parameter",
    note = "parameters must implement `Component + Clone`, or be an `Arc<dyn Capability>`"
)]
pub trait Param: Sized + 'static {
    /// Declared type of this parameter.
    fn type_tag() -> TypeTag {
        TypeTag::of::<Self>()
    }

    /// Produce `Self` from a component that passed the compatibility gate.
    ///
    /// Returns `None` if the component cannot be viewed as `Self`.
    fn extract(component: &dyn Component) -> Option<Self>;
}

impl<T: Component + Clone> Param for T {
    fn extract(component: &dyn Component) -> Option<Self> {
        extract_as(component)
    }
}

impl<C: ?Sized + Send + Sync + 'static> Param for Arc<C> {
    fn extract(component: &dyn Component) -> Option<Self> {
        extract_as(component)
    }
}

fn extract_as<T: Clone + 'static>(component: &dyn Component) -> Option<T> {
    if let Some(value) = component.as_any().downcast_ref::<T>() {
        return Some(value.clone());
    }
    component
        .upcast(TypeTag::of::<T>())?
        .downcast::<T>()
        .ok()
        .map(|value| *value)
}

// ═══════════════════════════════════════════════════════════════════════════════
// HandlerSignature
// ═══════════════════════════════════════════════════════════════════════════════

/// Declared parameter types of a handler, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HandlerSignature {
    params: Vec<TypeTag>,
}

impl HandlerSignature {
    /// Signature with the given parameter types.
    #[must_use]
    pub fn new(params: Vec<TypeTag>) -> Self {
        Self { params }
    }

    /// Parameter types, in order.
    #[must_use]
    pub fn params(&self) -> &[TypeTag] {
        &self.params
    }

    /// Number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for HandlerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(param.name())?;
        }
        f.write_str(")")
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Handler
// ═══════════════════════════════════════════════════════════════════════════════

/// A closure taking `Args` (a tuple of [`Param`]s) and returning `R`.
///
/// Implemented for `FnOnce` closures of arity 1 to [`MAX_ARITY`](crate::MAX_ARITY).
/// Closure parameters must be annotated so that `Args` can be inferred.
pub trait Handler<Args, R>: Sized {
    /// Declared parameter types.
    fn signature() -> HandlerSignature;

    /// Extract each parameter from `components`, in order, and call the handler.
    ///
    /// Returns `None` (without calling) if there are too few components or one
    /// cannot be extracted. Surplus components are ignored.
    fn invoke(self, components: &[&dyn Component]) -> Option<R>;
}

macro_rules! impl_handler {
    ($($ty:ident),*) => {
        impl<F, R, $($ty,)*> Handler<($($ty,)*), R> for F
        where
            F: FnOnce($($ty),*) -> R,
            $($ty: Param,)*
        {
            fn signature() -> HandlerSignature {
                HandlerSignature::new(vec![$(<$ty as Param>::type_tag()),*])
            }

            #[allow(non_snake_case)]
            fn invoke(self, components: &[&dyn Component]) -> Option<R> {
                let mut components = components.iter();
                $(
                    let $ty = <$ty as Param>::extract(*components.next()?)?;
                )*
                Some(self($($ty),*))
            }
        }
    };
}

impl_handler!(T1);
impl_handler!(T1, T2);
impl_handler!(T1, T2, T3);
impl_handler!(T1, T2, T3, T4);

/// Signature of `handler`.
#[must_use]
pub fn signature_of<H, Args, R>(handler: &H) -> HandlerSignature
where
    H: Handler<Args, R>,
{
    let _ = handler;
    H::signature()
}
