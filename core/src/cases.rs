//! Cases: ordered handler arms with first-match-wins semantics
//!
//! A `Cases<R>` is the runtime analogue of a `match` over tuple shapes: arms
//! are tried in order, the first arm whose signature binds the candidate
//! produces the result, and an optional fallback covers everything else.
//! There is no exhaustiveness checking; a candidate no arm accepts simply
//! yields the fallback (or `None`).

use crate::engine::{bind, bind_traced};
use crate::trace::CasesTrace;
use crate::{Component, Handler, HandlerSignature, MatchError, MAX_ARMS};
use std::fmt;

type BoxedArm<R> = Box<dyn Fn(&[&dyn Component]) -> Option<R> + Send + Sync>;

struct Arm<R> {
    signature: HandlerSignature,
    invoke: BoxedArm<R>,
}

/// Ordered handler arms with an optional fallback.
///
/// # INV: First-match-wins
///
/// Arms are evaluated in insertion order. The first arm that binds the
/// candidate terminates evaluation, even if later arms would also bind.
///
/// # Example
///
/// ```
/// use recmix::Cases;
///
/// let describe = Cases::new()
///     .case(|n: i32| format!("int {n}"))
///     .otherwise("something else".to_string());
///
/// // A bare integer is not tuple-shaped, so only the fallback applies.
/// assert_eq!(describe.evaluate(&5_i32).as_deref(), Some("something else"));
/// ```
pub struct Cases<R> {
    arms: Vec<Arm<R>>,
    fallback: Option<R>,
}

impl<R: 'static> Cases<R> {
    /// Empty dispatcher (no arms, no fallback).
    #[must_use]
    pub fn new() -> Self {
        Self {
            arms: Vec::new(),
            fallback: None,
        }
    }

    /// Append an arm.
    ///
    /// The handler is cloned for each invocation, so closures capturing state
    /// must capture something cheap to clone.
    #[must_use]
    pub fn case<H, Args>(mut self, handler: H) -> Self
    where
        H: Handler<Args, R> + Clone + Send + Sync + 'static,
        Args: 'static,
    {
        self.arms.push(Arm {
            signature: H::signature(),
            invoke: Box::new(move |components: &[&dyn Component]| {
                handler.clone().invoke(components)
            }),
        });
        self
    }

    /// Set the value returned when no arm binds.
    #[must_use]
    pub fn otherwise(mut self, fallback: R) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Returns the number of arms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arms.len()
    }

    /// Returns `true` if there are no arms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    /// Returns `true` if a fallback is set.
    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Signatures of every arm, in order.
    pub fn signatures(&self) -> impl Iterator<Item = &HandlerSignature> {
        self.arms.iter().map(|arm| &arm.signature)
    }

    /// Check the arm count against [`MAX_ARMS`].
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::TooManyArms`] if there are more than [`MAX_ARMS`] arms.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.arms.len() > MAX_ARMS {
            return Err(MatchError::TooManyArms {
                count: self.arms.len(),
                max: MAX_ARMS,
            });
        }
        Ok(())
    }
}

impl<R: Clone + 'static> Cases<R> {
    /// Evaluate arms in order against `candidate`.
    ///
    /// Returns the first arm's result, else the fallback, else `None`.
    pub fn evaluate(&self, candidate: &dyn Component) -> Option<R> {
        for arm in &self.arms {
            if let Some(bound) = bind(candidate, &arm.signature) {
                if let Some(result) = (arm.invoke)(&bound) {
                    return Some(result);
                }
            }
        }
        self.fallback.clone()
    }

    /// Evaluate with a per-arm trace.
    ///
    /// The returned result always equals what [`evaluate`](Self::evaluate) returns.
    pub fn evaluate_with_trace(&self, candidate: &dyn Component) -> (Option<R>, CasesTrace) {
        let mut arms = Vec::new();
        for (index, arm) in self.arms.iter().enumerate() {
            let (bound, trace) = bind_traced(candidate, &arm.signature);
            arms.push(trace);
            if let Some(result) = bound.and_then(|bound| (arm.invoke)(&bound)) {
                let trace = CasesTrace {
                    arms,
                    matched_arm: Some(index),
                    used_fallback: false,
                };
                return (Some(result), trace);
            }
        }
        let trace = CasesTrace {
            arms,
            matched_arm: None,
            used_fallback: self.fallback.is_some(),
        };
        (self.fallback.clone(), trace)
    }
}

impl<R: 'static> Default for Cases<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: fmt::Debug> fmt::Debug for Cases<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cases")
            .field("arms", &self.arms.len())
            .field("fallback", &self.fallback)
            .finish()
    }
}
