//! The match engine: gate a candidate against a handler signature, then invoke
//!
//! Every entry point shares one gate:
//!
//! 1. the candidate must be tuple-shaped,
//! 2. it must have at least as many fields as the handler has parameters
//!    (surplus trailing fields are ignored),
//! 3. each of the first `arity` fields must be accepted by the parameter at its
//!    position (see [`accepts`](crate::compatibility::accepts)).
//!
//! Failing any step is a no-match, never an error.

use crate::compatibility::accepts;
use crate::trace::{MatchTrace, NoMatchReason, PositionTrace};
use crate::{Component, Contents, Handler, HandlerSignature, MatchOutcome};
use log::trace;

// ═══════════════════════════════════════════════════════════════════════════════
// Gate
// ═══════════════════════════════════════════════════════════════════════════════

fn gate<'a>(
    candidate: &'a dyn Component,
    signature: &HandlerSignature,
    mut steps: Option<&mut Vec<PositionTrace>>,
) -> Result<Vec<&'a dyn Component>, NoMatchReason> {
    let Some(tuple) = candidate.as_tuple() else {
        return Err(NoMatchReason::NotATuple {
            type_name: candidate.type_tag().name(),
        });
    };

    let needed = signature.arity();
    let available = tuple.arity();
    if available < needed {
        return Err(NoMatchReason::InsufficientArity { needed, available });
    }

    let fields = tuple.fields();
    let mut bound = Vec::with_capacity(needed);
    for (position, &declared) in signature.params().iter().enumerate() {
        let Some(field) = tuple.field(position) else {
            return Err(NoMatchReason::InsufficientArity {
                needed,
                available: position,
            });
        };
        let compatibility = accepts(declared, field);
        if let Some(steps) = steps.as_deref_mut() {
            steps.push(PositionTrace {
                position,
                field: fields.get(position).map_or("", |descriptor| descriptor.name()),
                declared,
                actual: field.type_tag(),
                compatibility,
            });
        }
        if compatibility.is_none() {
            return Err(NoMatchReason::Incompatible {
                position,
                declared,
                actual: field.type_tag(),
            });
        }
        bound.push(field);
    }
    Ok(bound)
}

fn gate_logged<'a>(
    candidate: &'a dyn Component,
    signature: &HandlerSignature,
) -> Option<Vec<&'a dyn Component>> {
    match gate(candidate, signature, None) {
        Ok(bound) => Some(bound),
        Err(reason) => {
            trace!("no match for {} against {signature}: {reason}", candidate.type_tag());
            None
        }
    }
}

/// Gate and record each position; shared with [`Cases`](crate::Cases) and the registry.
pub(crate) fn bind_traced<'a>(
    candidate: &'a dyn Component,
    signature: &HandlerSignature,
) -> (Option<Vec<&'a dyn Component>>, MatchTrace) {
    let mut steps = Vec::with_capacity(signature.arity());
    let result = gate(candidate, signature, Some(&mut steps));
    let (bound, reason) = match result {
        Ok(bound) => (Some(bound), None),
        Err(reason) => {
            trace!("no match for {} against {signature}: {reason}", candidate.type_tag());
            (None, Some(reason))
        }
    };
    let trace = MatchTrace {
        candidate: candidate.type_tag(),
        signature: signature.clone(),
        steps,
        matched: bound.is_some(),
        reason,
    };
    (bound, trace)
}

/// Bind `candidate`'s fields to `signature`.
///
/// Returns the first `signature.arity()` fields, in order, if the candidate
/// passes the gate.
#[must_use]
pub fn bind<'a>(
    candidate: &'a dyn Component,
    signature: &HandlerSignature,
) -> Option<Vec<&'a dyn Component>> {
    gate_logged(candidate, signature)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Decomposition
// ═══════════════════════════════════════════════════════════════════════════════

/// Decompose `candidate` into `handler`'s parameters and return its result.
///
/// # Example
///
/// ```
/// use recmix::{try_apply, MatchOutcome};
///
/// // `i32` is not tuple-shaped.
/// assert_eq!(try_apply(&3_i32, |n: i32| n), MatchOutcome::NoMatch);
/// ```
pub fn try_apply<H, Args, R>(candidate: &dyn Component, handler: H) -> MatchOutcome<R>
where
    H: Handler<Args, R>,
{
    let signature = H::signature();
    let Some(bound) = gate_logged(candidate, &signature) else {
        return MatchOutcome::NoMatch;
    };
    match handler.invoke(&bound) {
        Some(value) => MatchOutcome::Matched(value),
        None => {
            trace!(
                "no match for {} against {signature}: {}",
                candidate.type_tag(),
                NoMatchReason::ExtractionFailed
            );
            MatchOutcome::NoMatch
        }
    }
}

/// Decompose `candidate` into `handler`'s parameters and call it.
///
/// Does nothing when the candidate does not fit.
pub fn try_accept<H, Args>(candidate: &dyn Component, handler: H)
where
    H: Handler<Args, ()>,
{
    let _ = try_apply(candidate, handler);
}

/// Like [`try_apply`], also returning the evaluation trace.
pub fn try_apply_with_trace<H, Args, R>(
    candidate: &dyn Component,
    handler: H,
) -> (MatchOutcome<R>, MatchTrace)
where
    H: Handler<Args, R>,
{
    let (bound, mut trace) = bind_traced(candidate, &H::signature());
    let outcome = match bound.and_then(|bound| handler.invoke(&bound)) {
        Some(value) => MatchOutcome::Matched(value),
        None => {
            if trace.matched {
                trace.matched = false;
                trace.reason = Some(NoMatchReason::ExtractionFailed);
            }
            MatchOutcome::NoMatch
        }
    };
    (outcome, trace)
}

/// A producing match with a default for the no-match case.
///
/// Created by [`with_fallback`].
#[derive(Debug, Clone)]
pub struct Fallback<R> {
    default: R,
}

/// Start a producing match that returns `default` when the candidate does not fit.
///
/// ```
/// use recmix::with_fallback;
///
/// let result = with_fallback("Fail").try_apply(&1_u8, |_: u8| "Success");
/// assert_eq!(result, "Fail");
/// ```
pub fn with_fallback<R>(default: R) -> Fallback<R> {
    Fallback { default }
}

impl<R> Fallback<R> {
    /// Decompose `candidate`, falling back to the default on no match.
    pub fn try_apply<H, Args>(self, candidate: &dyn Component, handler: H) -> R
    where
        H: Handler<Args, R>,
    {
        try_apply(candidate, handler).or(self.default)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Unwrap
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of [`unwrap_nested`]: the innermost present value, or absent.
#[derive(Debug, Clone, Copy)]
pub enum Unwrapped<'a> {
    /// The first non-container value found.
    Present(&'a dyn Component),
    /// The reference or some container layer was empty.
    Absent,
}

impl<'a> Unwrapped<'a> {
    /// Returns `true` if a value was found.
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Returns `true` if nothing was found.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Downcast the found value to `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&'a T> {
        match *self {
            Self::Present(value) => value.as_any().downcast_ref::<T>(),
            Self::Absent => None,
        }
    }

    /// Convert into an `Option`.
    #[must_use]
    pub fn into_option(self) -> Option<&'a dyn Component> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }
}

/// Strip nested single-value containers down to the innermost present value.
///
/// Recurses to any depth and stops at the first non-container. An absent
/// reference or any empty layer yields [`Unwrapped::Absent`].
///
/// ```
/// use recmix::unwrap_nested;
///
/// let nested = Some(Some(Some("Hello".to_string())));
/// assert_eq!(unwrap_nested(Some(&nested)).downcast_ref::<String>().unwrap(), "Hello");
///
/// let empty: Option<Option<String>> = Some(None);
/// assert!(unwrap_nested(Some(&empty)).is_absent());
/// assert!(unwrap_nested(None).is_absent());
/// ```
#[must_use]
pub fn unwrap_nested(value: Option<&dyn Component>) -> Unwrapped<'_> {
    let Some(mut current) = value else {
        return Unwrapped::Absent;
    };
    loop {
        match current.contents() {
            None => return Unwrapped::Present(current),
            Some(Contents::Present(inner)) => current = inner,
            Some(Contents::Empty) => {
                trace!("unwrap stopped at an empty {}", current.type_tag());
                return Unwrapped::Absent;
            }
        }
    }
}

/// [`unwrap_nested`], then downcast to `T`. A value of any other type is absent.
#[must_use]
pub fn unwrap_nested_as<T: 'static>(value: Option<&dyn Component>) -> Option<&T> {
    unwrap_nested(value).downcast_ref::<T>()
}
