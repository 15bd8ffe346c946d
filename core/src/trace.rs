//! Evaluation trace types for debugging match decisions.
//!
//! Trace types capture *why* a candidate did or did not fit a handler. Use
//! [`try_apply_with_trace`](crate::try_apply_with_trace) for a single handler
//! and [`Cases::evaluate_with_trace`](crate::Cases::evaluate_with_trace) for a
//! dispatcher.
//!
//! # Example
//!
//! ```
//! use recmix::{try_apply_with_trace, NoMatchReason};
//!
//! let (outcome, trace) = try_apply_with_trace(&7_i32, |n: i32| n);
//! assert!(outcome.is_no_match());
//! assert!(matches!(trace.reason, Some(NoMatchReason::NotATuple { .. })));
//! ```

use crate::{Compatibility, HandlerSignature, TypeTag};
use std::fmt;

/// Why a candidate did not fit a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NoMatchReason {
    /// The candidate is not tuple-shaped.
    NotATuple {
        /// Runtime type of the candidate.
        type_name: &'static str,
    },
    /// The candidate has fewer fields than the handler has parameters.
    InsufficientArity {
        /// Handler arity.
        needed: usize,
        /// Candidate arity.
        available: usize,
    },
    /// A field's runtime type is not accepted by the parameter at its position.
    Incompatible {
        /// Zero-based position.
        position: usize,
        /// Parameter type.
        declared: TypeTag,
        /// Runtime type of the field.
        actual: TypeTag,
    },
    /// Every position was accepted, but a parameter could not be produced.
    ExtractionFailed,
}

impl fmt::Display for NoMatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotATuple { type_name } => write!(f, "{type_name} is not tuple-shaped"),
            Self::InsufficientArity { needed, available } => {
                write!(f, "needs {needed} fields but the value has {available}")
            }
            Self::Incompatible {
                position,
                declared,
                actual,
            } => write!(f, "position {position} declares {declared} but holds {actual}"),
            Self::ExtractionFailed => f.write_str("a component could not be extracted"),
        }
    }
}

/// The compatibility check at one position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PositionTrace {
    /// Zero-based position.
    pub position: usize,
    /// Field name at this position.
    pub field: &'static str,
    /// Parameter type.
    pub declared: TypeTag,
    /// Runtime type of the field.
    pub actual: TypeTag,
    /// Which rule admitted the field, if any.
    pub compatibility: Option<Compatibility>,
}

/// Trace of one handler against one candidate.
///
/// # INV: `matched` == `reason.is_none()`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MatchTrace {
    /// Runtime type of the candidate.
    pub candidate: TypeTag,
    /// The handler's signature.
    pub signature: HandlerSignature,
    /// Positions checked, in order. Stops at the first incompatible position.
    pub steps: Vec<PositionTrace>,
    /// Whether the handler fit (and, for `try_apply_with_trace`, was invoked).
    pub matched: bool,
    /// Why the handler did not fit.
    pub reason: Option<NoMatchReason>,
}

/// Trace of a [`Cases`](crate::Cases) evaluation.
///
/// # INV: arms after `matched_arm` are not traced (first-match-wins)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CasesTrace {
    /// One trace per arm tried, in order.
    pub arms: Vec<MatchTrace>,
    /// Index of the arm that produced the result.
    pub matched_arm: Option<usize>,
    /// Whether the fallback value was returned.
    pub used_fallback: bool,
}
