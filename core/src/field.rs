//! Field handles: typed tokens naming one field of a tuple type
//!
//! A `Field<R, T, P>` says "the field of `R` at position `P`, of type `T`".
//! Handles are declared once per tuple type, usually as associated or module
//! constants:
//!
//! ```ignore
//! pub const NAME: Field<Person, String, 0> = Field::named("name");
//! pub const AGE: Field<Person, i32, 1> = Field::accessor(Person::age);
//! ```
//!
//! The type and position in the token are what the staged builder relies on.
//! [`resolve`](Field::resolve) checks them against the declared field list at
//! runtime, so a handle that disagrees with its tuple type fails loudly instead
//! of updating the wrong field.
//!
//! # Accessor handles
//!
//! An accessor handle is resolved by probing: build `R::default()`, call the
//! accessor, and find the field whose address equals the returned reference.
//! This requires [`TupleType::component`] to return references into `self`.
//! Candidates must also match the accessor's return type in size, so a
//! zero-sized field next to a real one does not get in the way. Several
//! zero-sized fields at one address remain ambiguous. Resolutions are memoised
//! per `(record type, accessor)`.

use crate::{MatchError, TupleType, TypeTag};
use log::{debug, trace};
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

enum Handle<R, T> {
    Named(&'static str),
    Accessor { get: fn(&R) -> &T, probe: fn() -> R },
}

/// Token for the field of `R` at position `P` with type `T`.
pub struct Field<R, T, const P: usize> {
    handle: Handle<R, T>,
}

impl<R, T, const P: usize> Field<R, T, P> {
    /// Handle resolved by field name.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self {
            handle: Handle::Named(name),
        }
    }

    /// Handle resolved by probing a default instance with `get`.
    ///
    /// `get` must return a reference to one of `R`'s declared fields. An
    /// accessor for a zero-sized field fails to resolve when another
    /// zero-sized field shares its address.
    #[must_use]
    pub const fn accessor(get: fn(&R) -> &T) -> Self
    where
        R: Default,
    {
        Self {
            handle: Handle::Accessor {
                get,
                probe: R::default,
            },
        }
    }

    /// Position carried by the token's type.
    #[must_use]
    pub const fn position(&self) -> usize {
        P
    }
}

impl<R, T, const P: usize> Field<R, T, P>
where
    R: TupleType,
    T: 'static,
{
    /// Resolve the handle to a declared field position.
    ///
    /// # Errors
    ///
    /// - [`MatchError::UnknownField`]: a named handle matches no declared field
    /// - [`MatchError::Introspection`]: an accessor borrows no field (or several),
    ///   or the resolved field disagrees with the token's type or position
    pub fn resolve(&self) -> Result<usize, MatchError> {
        let position = match self.handle {
            Handle::Named(name) => resolve_named::<R>(name)?,
            Handle::Accessor { get, probe } => resolve_accessor(get, probe)?,
        };

        let descriptor = R::FIELDS.get(position).ok_or_else(|| {
            self.introspection(format!("no field is declared at position {position}"))
        })?;
        if descriptor.type_tag() != TypeTag::of::<T>() {
            return Err(self.introspection(format!(
                "the handle carries {} but field \"{}\" is declared as {}",
                TypeTag::of::<T>(),
                descriptor.name(),
                descriptor.type_tag()
            )));
        }
        if position != P {
            return Err(self.introspection(format!(
                "the handle carries position {P} but field \"{}\" is at position {position}",
                descriptor.name()
            )));
        }
        trace!("resolved {self:?} to position {position}");
        Ok(position)
    }

    fn introspection(&self, reason: String) -> MatchError {
        MatchError::Introspection {
            subject: format!("{self:?}"),
            reason,
        }
    }
}

fn resolve_named<R: TupleType>(name: &str) -> Result<usize, MatchError> {
    R::FIELDS
        .iter()
        .find(|descriptor| descriptor.name() == name)
        .map(|descriptor| descriptor.position())
        .ok_or_else(|| MatchError::UnknownField {
            type_name: TypeTag::of::<R>().name().to_owned(),
            field: name.to_owned(),
            available: R::FIELDS.iter().map(|d| d.name().to_owned()).collect(),
        })
}

type ResolutionCache = RwLock<HashMap<(TypeId, usize), usize>>;

fn resolutions() -> &'static ResolutionCache {
    static CACHE: OnceLock<ResolutionCache> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

fn resolve_accessor<R, T>(get: fn(&R) -> &T, probe: fn() -> R) -> Result<usize, MatchError>
where
    R: TupleType,
    T: 'static,
{
    let key = (TypeId::of::<R>(), get as usize);
    let cached = resolutions()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
        .copied();
    if let Some(position) = cached {
        return Ok(position);
    }

    let instance = probe();
    let target = (get(&instance) as *const T).cast::<()>();
    // A zero-sized field may share its address with a neighbour, so a hit
    // must also agree on size with the accessor's return type.
    let hits: Vec<usize> = (0..R::FIELDS.len())
        .filter(|&position| {
            instance.component(position).is_some_and(|component| {
                std::ptr::eq((component as *const dyn crate::Component).cast::<()>(), target)
                    && std::mem::size_of_val(component) == std::mem::size_of::<T>()
            })
        })
        .collect();

    let subject = || format!("accessor handle of {}", TypeTag::of::<R>());
    let position = match hits.as_slice() {
        [position] => *position,
        [] => {
            return Err(MatchError::Introspection {
                subject: subject(),
                reason: "the accessor does not return a declared field".to_owned(),
            })
        }
        _ => {
            return Err(MatchError::Introspection {
                subject: subject(),
                reason: format!("the accessor matches fields at positions {hits:?}"),
            })
        }
    };

    resolutions()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key, position);
    debug!("memoised {} at position {position}", subject());
    Ok(position)
}

impl<R, T, const P: usize> Clone for Field<R, T, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, T, const P: usize> Copy for Field<R, T, P> {}

impl<R, T> Clone for Handle<R, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, T> Copy for Handle<R, T> {}

impl<R, T, const P: usize> fmt::Debug for Field<R, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = std::any::type_name::<R>();
        match self.handle {
            Handle::Named(name) => write!(f, "Field({record}.{name} @ {P})"),
            Handle::Accessor { .. } => write!(f, "Field({record}.<accessor> @ {P})"),
        }
    }
}
