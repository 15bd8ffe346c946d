//! Config types for registry-driven matching.
//!
//! These types describe candidates and handler signatures by registered name,
//! so match decisions can be expressed in JSON/YAML and checked through a
//! [`Registry`](crate::Registry).
//!
//! | Config type | Runtime type | Loader method |
//! |-------------|-------------|---------------|
//! | [`ValueConfig`] | `Box<dyn Component>` | `Registry::load_value()` |
//! | [`SignatureConfig`] | [`HandlerSignature`](crate::HandlerSignature) | `Registry::load_signature()` |

use serde::Deserialize;

/// A candidate value: a registered kind plus its payload.
///
/// ```json
/// { "kind": "test.Name", "value": { "first": "Benji", "last": "Weber" } }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValueConfig {
    /// Name the kind was registered under.
    pub kind: String,

    /// Kind-specific payload, deserialized as the kind's `Config` type.
    #[serde(default)]
    pub value: serde_json::Value,
}

/// A handler signature as a list of registered parameter names.
///
/// Deserializes from a plain sequence:
///
/// ```json
/// ["string", "box<i32>"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SignatureConfig {
    /// Parameter names, in order.
    pub params: Vec<String>,
}
