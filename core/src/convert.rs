//! Structural conversion between tuple types
//!
//! Three forms, from most to least static:
//!
//! - [`convert`]: the target's `Parts` equal the source's, checked by the compiler.
//! - [`convert_with`]: an explicit constructor closure, gated like any handler.
//! - [`convert_by_shape`]: positional compatibility of declared fields, checked
//!   at runtime against the target's single canonical constructor.

use crate::compatibility::accepts;
use crate::{
    try_apply_with_trace, Arguments, Component, Handler, MatchError, MatchOutcome, Tuple,
    TupleType, TypeTag,
};
use log::trace;

/// Convert between tuple types with identical field types.
///
/// Cannot fail: the compiler has already checked positional compatibility.
#[must_use]
pub fn convert<S, T>(source: &S) -> T
where
    S: TupleType,
    T: TupleType<Parts = S::Parts>,
{
    T::from_parts(source.to_parts())
}

/// Convert by decomposing `source` into an explicit constructor.
///
/// Unlike [`try_apply`](crate::try_apply), surplus fields are not ignored: the
/// constructor must take exactly as many parameters as `source` has fields.
///
/// # Errors
///
/// Returns [`MatchError::NoCompatibleConstructor`] if the constructor's
/// parameter count differs from `source`'s arity, or its parameters do not
/// accept `source`'s fields.
pub fn convert_with<H, Args, T>(source: &dyn Component, constructor: H) -> Result<T, MatchError>
where
    H: Handler<Args, T>,
    T: 'static,
{
    let params = H::signature().arity();
    if let Some(fields) = source.as_tuple().map(Tuple::arity) {
        if fields != params {
            trace!(
                "cannot convert {} with a {params}-parameter constructor",
                source.type_tag()
            );
            return Err(MatchError::NoCompatibleConstructor {
                source_type: source.type_tag().name().to_owned(),
                target_type: TypeTag::of::<T>().name().to_owned(),
                reason: format!("source has {fields} fields but the constructor takes {params}"),
            });
        }
    }

    match try_apply_with_trace(source, constructor) {
        (MatchOutcome::Matched(value), _) => Ok(value),
        (MatchOutcome::NoMatch, trace) => Err(MatchError::NoCompatibleConstructor {
            source_type: trace.candidate.name().to_owned(),
            target_type: TypeTag::of::<T>().name().to_owned(),
            reason: trace
                .reason
                .map_or_else(|| "constructor rejected the fields".to_owned(), |r| r.to_string()),
        }),
    }
}

/// Convert `source` into `T` by positional field compatibility.
///
/// The source must be tuple-shaped with exactly as many fields as `T`
/// declares, and each source field must be accepted by `T`'s declared type at
/// the same position.
///
/// # Errors
///
/// Returns [`MatchError::NoCompatibleConstructor`] naming the failed check.
pub fn convert_by_shape<T: TupleType>(source: &dyn Component) -> Result<T, MatchError> {
    let target = TypeTag::of::<T>();
    let reject = |reason: String| {
        trace!("cannot convert {} into {target}: {reason}", source.type_tag());
        MatchError::NoCompatibleConstructor {
            source_type: source.type_tag().name().to_owned(),
            target_type: target.name().to_owned(),
            reason,
        }
    };

    let tuple = source
        .as_tuple()
        .ok_or_else(|| reject("source is not tuple-shaped".to_owned()))?;
    if tuple.arity() != T::FIELDS.len() {
        return Err(reject(format!(
            "source has {} fields but the constructor takes {}",
            tuple.arity(),
            T::FIELDS.len()
        )));
    }

    let mut components = Vec::with_capacity(T::FIELDS.len());
    for descriptor in T::FIELDS {
        let position = descriptor.position();
        let field = tuple
            .field(position)
            .ok_or_else(|| reject(format!("source has no field at position {position}")))?;
        if accepts(descriptor.type_tag(), field).is_none() {
            return Err(reject(format!(
                "position {position} ({}) takes {} but the source holds {}",
                descriptor.name(),
                descriptor.type_tag(),
                field.type_tag()
            )));
        }
        components.push(field);
    }

    T::construct(&mut Arguments::borrowing(target.name(), components))
}
