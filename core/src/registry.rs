//! Type registry for config-driven matching.
//!
//! The registry turns names into types: a *kind* name into a factory that
//! builds a `Box<dyn Component>` from a JSON payload, and a *param* name into
//! the [`TypeTag`] a handler parameter of that type would declare. Together
//! they let a candidate and a signature be written in config and checked with
//! the same gate the typed API uses.
//!
//! # Architecture
//!
//! Each kind registers through [`IntoComponent`]. At registration time the
//! concrete type `T` is monomorphized into a closure and erased behind
//! `Box<dyn Fn>`; lookup and invocation happen at load time.
//!
//! # Example
//!
//! ```
//! use recmix::{register_core, RegistryBuilder, SignatureConfig, ValueConfig};
//!
//! let registry = register_core(RegistryBuilder::new()).build();
//!
//! let value: ValueConfig = serde_json::from_str(r#"{ "kind": "i32", "value": 5 }"#).unwrap();
//! let signature: SignatureConfig = serde_json::from_str(r#"["i32"]"#).unwrap();
//!
//! // A bare integer is not tuple-shaped.
//! assert_eq!(registry.matches(&value, &signature), Ok(false));
//! ```

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::engine::bind_traced;
use crate::{
    Component, HandlerSignature, MatchError, MatchTrace, Param, SignatureConfig, TypeTag,
    ValueConfig, MAX_ARITY,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Traits
// ═══════════════════════════════════════════════════════════════════════════════

/// A component type that can be constructed from configuration.
///
/// # Example
///
/// ```ignore
/// impl IntoComponent for Name {
///     type Config = Self;
///     fn from_config(config: Self) -> Result<Box<dyn Component>, MatchError> {
///         Ok(Box::new(config))
///     }
/// }
/// ```
pub trait IntoComponent: Send + Sync + 'static {
    /// The configuration type deserialized from JSON/YAML.
    type Config: DeserializeOwned + Send + Sync;

    /// Construct the component from deserialized configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfig`] if the config is semantically invalid.
    fn from_config(config: Self::Config) -> Result<Box<dyn Component>, MatchError>;
}

macro_rules! leaf_into_component {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoComponent for $ty {
                type Config = Self;

                fn from_config(config: Self) -> Result<Box<dyn Component>, MatchError> {
                    Ok(Box::new(config))
                }
            }
        )*
    };
}

leaf_into_component!(
    bool, char, String, (), i8, i16, i32, i64, u8, u16, u32, u64, f32, f64,
    Box<i32>, Box<i64>, Box<u32>, Box<u64>, Box<f32>, Box<f64>,
);

// ═══════════════════════════════════════════════════════════════════════════════
// Builder
// ═══════════════════════════════════════════════════════════════════════════════

type BoxedComponentFactory =
    Box<dyn Fn(&serde_json::Value) -> Result<Box<dyn Component>, MatchError> + Send + Sync>;

/// Builder for constructing a [`Registry`].
///
/// Register kinds and params, then call [`build()`](Self::build) to produce an
/// immutable `Registry`. No registration is possible after `build()`.
pub struct RegistryBuilder {
    kinds: HashMap<String, BoxedComponentFactory>,
    params: HashMap<String, TypeTag>,
}

impl RegistryBuilder {
    /// Create a new empty registry builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
            params: HashMap::new(),
        }
    }

    /// Register a component kind under `name`.
    ///
    /// At load time the payload is deserialized as `T::Config` and handed to
    /// `T::from_config()`.
    #[must_use]
    pub fn kind<T: IntoComponent>(mut self, name: &str) -> Self {
        self.kinds.insert(
            name.to_owned(),
            Box::new(|value: &serde_json::Value| {
                let config: T::Config = serde_json::from_value(value.clone()).map_err(|e| {
                    MatchError::InvalidConfig {
                        reason: e.to_string(),
                    }
                })?;
                T::from_config(config)
            }),
        );
        self
    }

    /// Register a handler parameter type under `name`.
    #[must_use]
    pub fn param<P: Param>(mut self, name: &str) -> Self {
        self.params.insert(name.to_owned(), P::type_tag());
        self
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            kinds: self.kinds,
            params: self.params,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Register the built-in leaf kinds and params.
///
/// Names: `bool`, `char`, `string`, `i32`, `i64`, `u32`, `u64`, `f32`, `f64`,
/// and `box<N>` for each of those numeric types. Domain `register()`
/// functions add their tuple kinds on top.
#[must_use]
pub fn register_core(builder: RegistryBuilder) -> RegistryBuilder {
    macro_rules! both {
        ($builder:expr, $($name:literal => $ty:ty),* $(,)?) => {
            $builder $( .kind::<$ty>($name).param::<$ty>($name) )*
        };
    }
    both!(builder,
        "bool" => bool,
        "char" => char,
        "string" => String,
        "i32" => i32,
        "i64" => i64,
        "u32" => u32,
        "u64" => u64,
        "f32" => f32,
        "f64" => f64,
        "box<i32>" => Box<i32>,
        "box<i64>" => Box<i64>,
        "box<u32>" => Box<u32>,
        "box<u64>" => Box<u64>,
        "box<f32>" => Box<f32>,
        "box<f64>" => Box<f64>,
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════════════

/// Immutable registry of component kinds and parameter types.
///
/// Constructed via [`RegistryBuilder`].
pub struct Registry {
    kinds: HashMap<String, BoxedComponentFactory>,
    params: HashMap<String, TypeTag>,
}

impl Registry {
    /// Build a candidate value from configuration.
    ///
    /// # Errors
    ///
    /// - [`MatchError::UnknownKind`] with `registry: "kind"` for unregistered kinds
    /// - [`MatchError::InvalidConfig`] if the payload does not deserialize
    pub fn load_value(&self, config: &ValueConfig) -> Result<Box<dyn Component>, MatchError> {
        let factory = self
            .kinds
            .get(&config.kind)
            .ok_or_else(|| MatchError::UnknownKind {
                kind: config.kind.clone(),
                registry: "kind",
                available: self.kinds.keys().cloned().collect(),
            })?;
        factory(&config.value)
    }

    /// Build a handler signature from configuration.
    ///
    /// # Errors
    ///
    /// - [`MatchError::UnknownKind`] with `registry: "param"` for unregistered params
    /// - [`MatchError::InvalidConfig`] if the signature has no parameters or more
    ///   than [`MAX_ARITY`]
    pub fn load_signature(&self, config: &SignatureConfig) -> Result<HandlerSignature, MatchError> {
        if config.params.is_empty() || config.params.len() > MAX_ARITY {
            return Err(MatchError::InvalidConfig {
                reason: format!(
                    "signature has {} params, expected 1 to {MAX_ARITY}",
                    config.params.len()
                ),
            });
        }
        let params = config
            .params
            .iter()
            .map(|name| {
                self.params
                    .get(name)
                    .copied()
                    .ok_or_else(|| MatchError::UnknownKind {
                        kind: name.clone(),
                        registry: "param",
                        available: self.params.keys().cloned().collect(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(HandlerSignature::new(params))
    }

    /// Returns whether a handler with `signature` would match `value`.
    ///
    /// # Errors
    ///
    /// Propagates loading errors; a no-match is `Ok(false)`.
    pub fn matches(
        &self,
        value: &ValueConfig,
        signature: &SignatureConfig,
    ) -> Result<bool, MatchError> {
        self.trace(value, signature).map(|trace| trace.matched)
    }

    /// Trace the gate for `signature` against `value`.
    ///
    /// # Errors
    ///
    /// Propagates loading errors.
    pub fn trace(
        &self,
        value: &ValueConfig,
        signature: &SignatureConfig,
    ) -> Result<MatchTrace, MatchError> {
        let candidate = self.load_value(value)?;
        let signature = self.load_signature(signature)?;
        let (_, trace) = bind_traced(&*candidate, &signature);
        Ok(trace)
    }

    /// Returns `true` if the kind is registered.
    #[must_use]
    pub fn contains_kind(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// Returns `true` if the param is registered.
    #[must_use]
    pub fn contains_param(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Returns all registered kind names (sorted).
    #[must_use]
    pub fn kind_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns all registered param names (sorted).
    #[must_use]
    pub fn param_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.params.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("kinds", &self.kind_names())
            .field("params", &self.param_names())
            .finish()
    }
}
