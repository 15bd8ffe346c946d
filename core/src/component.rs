//! `Component`: the erased view of a value the engine can inspect
//!
//! Every candidate handed to the engine, and every field inside a tuple, is seen
//! through `&dyn Component`. The trait answers four runtime questions:
//!
//! - what is your concrete type? ([`Component::type_tag`])
//! - which capabilities do you implement? ([`Component::implements`], [`Component::upcast`])
//! - are you tuple-shaped? ([`Component::as_tuple`])
//! - are you a single-value container? ([`Component::contents`])
//!
//! All four have defaults, so a plain leaf type only needs `impl Component for T {}`.
//!
//! # Capabilities
//!
//! Rust has no class hierarchy; "declared as an ancestor" means "declared as a
//! trait object the value implements". A capability parameter is written as
//! `Arc<dyn Trait>` and a type opts into it by answering `implements` and
//! `upcast` for `TypeTag::of::<Arc<dyn Trait>>()`:
//!
//! ```
//! use std::any::Any;
//! use std::sync::Arc;
//! use recmix::{capability, Component, TypeTag};
//!
//! trait Animal: Component {
//!     fn noise(&self) -> &str;
//! }
//!
//! #[derive(Debug, Clone)]
//! struct Duck;
//!
//! impl Animal for Duck {
//!     fn noise(&self) -> &str { "Quack" }
//! }
//!
//! impl Component for Duck {
//!     fn implements(&self, capability: TypeTag) -> bool {
//!         capability.is::<Arc<dyn Animal>>()
//!     }
//!
//!     fn upcast(&self, target: TypeTag) -> Option<Box<dyn Any>> {
//!         target
//!             .is::<Arc<dyn Animal>>()
//!             .then(|| capability::<dyn Animal>(Arc::new(self.clone())))
//!     }
//! }
//!
//! assert!(Duck.implements(TypeTag::of::<Arc<dyn Animal>>()));
//! ```

use crate::{Tuple, TypeTag};
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// Upcasts to `&dyn Any` and `&dyn Component`.
///
/// Blanket-implemented for every sized [`Component`]; never implement it by hand.
/// Because the methods live in the vtable, calling them through a trait object
/// (including `dyn Trait` where `Trait: Component`) reaches the concrete value.
pub trait AsComponent {
    /// Borrow as `&dyn Any` for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Borrow as `&dyn Component`.
    fn as_component(&self) -> &dyn Component;
}

impl<T: Component> AsComponent for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_component(&self) -> &dyn Component {
        self
    }
}

/// A value the engine can inspect at runtime.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: tuple values are immutable and are
/// freely shared between callers.
///
/// # Example
///
/// ```
/// use recmix::{Component, TypeTag};
///
/// #[derive(Debug)]
/// struct Celsius(f64);
///
/// impl Component for Celsius {}
///
/// let reading = Celsius(21.5);
/// assert!(reading.type_tag().is::<Celsius>());
/// assert!(reading.as_tuple().is_none());
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Component`",
    label = "this type cannot be inspected by the matching engine",
    note = "add `impl Component for {Self} {{}}`; tuple-shaped types also override `as_tuple`"
)]
pub trait Component: AsComponent + Any + Debug + Send + Sync {
    /// Runtime type of this value.
    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<Self>()
    }

    /// Returns `true` if this value can be viewed as `capability`
    /// (the tag of an `Arc<dyn Trait>` it implements).
    fn implements(&self, capability: TypeTag) -> bool {
        let _ = capability;
        false
    }

    /// View this value as `target`, boxed as `Box<dyn Any>` holding exactly `target`.
    ///
    /// Used for capability views (`Arc<dyn Trait>`) and for the numeric
    /// boxed/unboxed pairs. Returns `None` when no such view exists.
    fn upcast(&self, target: TypeTag) -> Option<Box<dyn Any>> {
        let _ = target;
        None
    }

    /// Tuple view of this value, if it is tuple-shaped.
    ///
    /// Tuple types implement this as `Some(self)`.
    fn as_tuple(&self) -> Option<&dyn Tuple> {
        None
    }

    /// Contents of a single-value container, or `None` if this is not a container.
    fn contents(&self) -> Option<Contents<'_>> {
        None
    }
}

/// What a single-value container currently holds.
#[derive(Debug, Clone, Copy)]
pub enum Contents<'a> {
    /// The container holds a value.
    Present(&'a dyn Component),
    /// The container is empty.
    Empty,
}

/// Box a capability view for returning from [`Component::upcast`].
///
/// Exists mostly to let the unsizing coercion happen at the call site:
/// `capability::<dyn Animal>(Arc::new(duck))`.
#[must_use]
pub fn capability<C: ?Sized + 'static>(view: Arc<C>) -> Box<dyn Any> {
    Box::new(view)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Built-in components
// ═══════════════════════════════════════════════════════════════════════════════

macro_rules! leaf_components {
    ($($ty:ty),* $(,)?) => {
        $( impl Component for $ty {} )*
    };
}

leaf_components!(bool, char, String, &'static str, ());

// Numeric primitives and their boxed forms view each other through `upcast`.
macro_rules! numeric_components {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Component for $ty {
                fn upcast(&self, target: TypeTag) -> Option<Box<dyn Any>> {
                    target
                        .is::<Box<$ty>>()
                        .then(|| Box::new(Box::new(*self)) as Box<dyn Any>)
                }
            }

            impl Component for Box<$ty> {
                fn upcast(&self, target: TypeTag) -> Option<Box<dyn Any>> {
                    target
                        .is::<$ty>()
                        .then(|| Box::new(**self) as Box<dyn Any>)
                }
            }
        )*
    };
}

numeric_components!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T: Component> Component for Option<T> {
    fn contents(&self) -> Option<Contents<'_>> {
        Some(match self {
            Some(value) => Contents::Present(value),
            None => Contents::Empty,
        })
    }
}
