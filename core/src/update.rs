//! Non-destructive single-field updates

use crate::{Argument, Arguments, Field, MatchError, Param, TupleType, TypeTag};

/// A copy of `source` with the field named by `field` replaced by `value`.
///
/// Every other field is taken from `source`; the result is built through the
/// type's canonical constructor, so `source` is never touched.
///
/// # Errors
///
/// - [`MatchError::UnknownField`] / [`MatchError::Introspection`] from
///   [`Field::resolve`]
/// - [`MatchError::ArgumentMismatch`] if the constructor rejects an argument
pub fn with_field<R, T, const P: usize>(
    source: &R,
    field: Field<R, T, P>,
    value: T,
) -> Result<R, MatchError>
where
    R: TupleType,
    T: Param,
{
    let target = field.resolve()?;
    let type_name = TypeTag::of::<R>().name();

    let mut value = Some(value);
    let mut arguments = Arguments::new(type_name);
    for position in 0..R::FIELDS.len() {
        let replacement = if position == target { value.take() } else { None };
        let argument = match replacement {
            Some(replacement) => Argument::owned(replacement),
            None => Argument::Borrowed(source.component(position).ok_or_else(|| {
                MatchError::Introspection {
                    subject: type_name.to_owned(),
                    reason: format!("no component is returned for position {position}"),
                }
            })?),
        };
        arguments.push(argument);
    }
    R::construct(&mut arguments)
}
