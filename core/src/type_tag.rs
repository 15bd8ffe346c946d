//! `TypeTag`: runtime identity of a component or parameter type
//!
//! A `TypeTag` pairs a [`TypeId`] with the compiler's type name. Identity is the
//! `TypeId` alone; the name only exists so traces and errors can say *which*
//! type was involved.

use std::any::{self, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime identity of a type.
///
/// # Example
///
/// ```
/// use recmix::TypeTag;
///
/// let tag = TypeTag::of::<String>();
/// assert!(tag.is::<String>());
/// assert!(!tag.is::<&str>());
/// assert_eq!(tag.name(), "alloc::string::String");
/// ```
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Tag of `T`. Works for unsized types, so `dyn Trait` has a tag too.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    /// The underlying `TypeId`.
    #[inline]
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Compiler-provided type name (diagnostic only, not guaranteed stable).
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this is the tag of `T`.
    #[inline]
    #[must_use]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TypeTag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}
