//! recmix - Runtime structural matching for tuple-shaped values
//!
//! A matching engine that decomposes opaque values into typed components,
//! converts between differently-named tuple shapes, replaces single fields
//! non-destructively, and builds values through a staged typestate chain.
//!
//! # Architecture
//!
//! The type system uses the same hybrid erasure approach everywhere:
//!
//! - [`Component`]: erased view of any value (runtime type, capabilities, shape)
//! - [`TupleType`]: a fixed, ordered, named field list declared once per type
//! - [`Param`]: a handler parameter type that knows how to pull itself out of a `Component`
//! - [`Handler<Args, R>`]: a closure whose parameter types *are* its match pattern
//! - [`compatibility::accepts`]: the four-rule gate (exact, ancestor, boxing, otherwise no)
//! - [`try_apply`] / [`try_accept`]: decomposition with [`MatchOutcome`] instead of errors
//!
//! # Key Design Insights
//!
//! 1. **Signatures come from the type system**: a handler's parameter types are read
//!    from its closure signature at compile time, so they can never be missing.
//!
//! 2. **No match is a value**: arity mismatches, incompatible types and non-tuple
//!    candidates produce [`MatchOutcome::NoMatch`]. Only contract violations
//!    (unknown fields, missing constructors, broken field handles) become [`MatchError`].
//!
//! 3. **Surplus fields are ignored**: a three-field value matches a two-parameter
//!    handler using its first two fields.
//!
//! # Example
//!
//! ```
//! use recmix::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Name { first: String, last: String }
//!
//! impl Component for Name {
//!     fn as_tuple(&self) -> Option<&dyn Tuple> { Some(self) }
//! }
//!
//! impl TupleType for Name {
//!     const FIELDS: &'static [FieldDescriptor] = &[
//!         FieldDescriptor::new::<String>("first", 0),
//!         FieldDescriptor::new::<String>("last", 1),
//!     ];
//!     type Parts = (String, String);
//!
//!     fn component(&self, position: usize) -> Option<&dyn Component> {
//!         match position {
//!             0 => Some(&self.first),
//!             1 => Some(&self.last),
//!             _ => None,
//!         }
//!     }
//!     fn to_parts(&self) -> Self::Parts { (self.first.clone(), self.last.clone()) }
//!     fn from_parts((first, last): Self::Parts) -> Self { Self { first, last } }
//! }
//!
//! let name = Name { first: "Benji".into(), last: "Weber".into() };
//!
//! let joined = with_fallback("Fail".to_string())
//!     .try_apply(&name, |first: String, last: String| first.to_lowercase() + &last.to_lowercase());
//! assert_eq!(joined, "benjiweber");
//!
//! // Numbers are not text: the handler is never invoked.
//! let outcome = try_apply(&name, |first: i32, last: i32| first + last);
//! assert!(outcome.is_no_match());
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod arguments;
mod builder;
mod cases;
pub mod compatibility;
mod component;
mod convert;
mod engine;
mod field;
mod handler;
mod outcome;
mod shape;
mod trace;
mod tuple_ext;
mod type_tag;
mod update;

#[cfg(feature = "registry")]
mod config;
#[cfg(feature = "registry")]
mod registry;


// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use arguments::{Argument, Arguments, FromArguments};
pub use cases::Cases;
pub use compatibility::Compatibility;
pub use component::{capability, AsComponent, Component, Contents};
pub use field::Field;
pub use handler::{signature_of, Handler, HandlerSignature, Param};
pub use outcome::MatchOutcome;
pub use shape::{
    describe, describe_with_arity, field_value, FieldDescriptor, NotATuple, Shape, Tuple,
    TupleType,
};
pub use tuple_ext::{Spread, TupleExt};
pub use type_tag::TypeTag;

// Operations
pub use builder::{auto_builder, staged, AutoBuilder, Missing1, Missing2, Missing3, StageChain};
pub use convert::{convert, convert_by_shape, convert_with};
pub use engine::{
    bind, try_accept, try_apply, try_apply_with_trace, unwrap_nested, unwrap_nested_as,
    with_fallback, Fallback, Unwrapped,
};
pub use update::with_field;

// Trace types
pub use trace::{CasesTrace, MatchTrace, NoMatchReason, PositionTrace};

// Registry (feature-gated)
#[cfg(feature = "registry")]
pub use config::{SignatureConfig, ValueConfig};
#[cfg(feature = "registry")]
pub use registry::{register_core, IntoComponent, Registry, RegistryBuilder};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use recmix::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Operations
        auto_builder,
        convert,
        convert_by_shape,
        convert_with,
        staged,
        try_accept,
        try_apply,
        unwrap_nested,
        unwrap_nested_as,
        with_fallback,
        with_field,
        // Traits
        Component,
        // Core types
        Cases,
        Field,
        FieldDescriptor,
        Handler,
        HandlerSignature,
        // Errors
        MatchError,
        MatchOutcome,
        // Trace types
        MatchTrace,
        Param,
        Tuple,
        TupleExt,
        TupleType,
        TypeTag,
        Unwrapped,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Largest handler arity with a [`Handler`] implementation.
///
/// Tuple types may declare more fields than this; surplus fields are simply
/// never bound by a handler.
pub const MAX_ARITY: usize = 4;

/// Maximum number of arms in a single [`Cases`] dispatcher.
///
/// Validate at construction time via [`Cases::validate`].
pub const MAX_ARMS: usize = 256;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Contract violations reported by conversion, update and registry operations.
///
/// A handler that does not fit a candidate is *not* an error; that outcome is
/// [`MatchOutcome::NoMatch`]. Every variant here points at a programming or
/// configuration mistake and must be fixed by the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// A field handle or handler could not be mapped back to a declared field.
    #[error("cannot introspect {subject}: {reason}")]
    Introspection {
        /// What was being introspected (e.g. a field handle of `Person`).
        subject: String,
        /// Why the metadata could not be recovered.
        reason: String,
    },

    /// No constructor of the target type accepts the source's fields.
    #[error("no constructor of {target_type} accepts the fields of {source_type}: {reason}")]
    NoCompatibleConstructor {
        /// Type being converted from.
        source_type: String,
        /// Type being converted into.
        target_type: String,
        /// Which position or arity check failed.
        reason: String,
    },

    /// A field handle names a field the tuple type does not declare.
    #[error("{type_name} has no field named \"{field}\" (fields: {})", .available.join(", "))]
    UnknownField {
        /// The tuple type that was searched.
        type_name: String,
        /// The name carried by the handle.
        field: String,
        /// Field names the type does declare.
        available: Vec<String>,
    },

    /// A constructor argument could not be produced as the expected type.
    #[error("argument {position} of {type_name} expected {expected} but found {found}")]
    ArgumentMismatch {
        /// The tuple type being constructed.
        type_name: String,
        /// Zero-based constructor position.
        position: usize,
        /// Type the constructor asked for.
        expected: String,
        /// Type that was supplied (or `"nothing"`).
        found: String,
    },

    /// Too many arms in a single [`Cases`] dispatcher.
    #[error("cases has {count} arms, but maximum allowed is {max}")]
    TooManyArms {
        /// Actual number of arms.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// A kind or parameter name was not found in the registry.
    #[error("unknown {registry} \"{kind}\"{}", registered_suffix(.registry, .available))]
    UnknownKind {
        /// The unregistered name.
        kind: String,
        /// Which table was searched (`"kind"` or `"param"`).
        registry: &'static str,
        /// Names that ARE registered (for self-correcting error messages).
        available: Vec<String>,
    },

    /// Configuration deserialization or validation failed.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// The underlying error message.
        reason: String,
    },
}

fn registered_suffix(registry: &str, available: &[String]) -> String {
    if available.is_empty() {
        format!(" (no {registry} names are registered)")
    } else {
        let mut names = available.to_vec();
        names.sort_unstable();
        format!(" (registered: {})", names.join(", "))
    }
}
