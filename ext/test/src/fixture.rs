//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against a [`Registry`]. Each case names a
//! candidate value and a handler signature by their registered names, plus the
//! expected decision:
//!
//! ```yaml
//! name: name_decomposition
//! description: Two strings bind to a two-string handler
//! cases:
//!   - name: exact
//!     value: { kind: test.Name, value: { first: Benji, last: Weber } }
//!     signature: [string, string]
//!     expect: match
//!     compatibility: [exact, exact]
//!   - name: wrong type
//!     value: { kind: test.Name, value: { first: Benji, last: Weber } }
//!     signature: [string, i32]
//!     expect: no_match
//!     reason: incompatible
//! ```

use recmix::{Compatibility, MatchError, MatchTrace, NoMatchReason, Registry};
use recmix::{SignatureConfig, ValueConfig};
use serde::Deserialize;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cases: Vec<TestCase>,
}

/// Expected decision for one case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expect {
    /// The handler binds.
    Match,
    /// The handler does not bind.
    NoMatch,
    /// Loading the value or signature fails.
    Error,
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub value: ValueConfig,
    pub signature: SignatureConfig,
    pub expect: Expect,

    /// For `no_match`: the expected [`NoMatchReason`] label.
    /// For `error`: the expected [`MatchError`] label.
    #[serde(default)]
    pub reason: Option<String>,

    /// Expected per-position compatibility labels, for `match` cases.
    #[serde(default)]
    pub compatibility: Option<Vec<String>>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Labels
// ═══════════════════════════════════════════════════════════════════════════════

/// Fixture label for a no-match reason.
#[must_use]
pub fn reason_label(reason: &NoMatchReason) -> &'static str {
    match reason {
        NoMatchReason::NotATuple { .. } => "not_a_tuple",
        NoMatchReason::InsufficientArity { .. } => "insufficient_arity",
        NoMatchReason::Incompatible { .. } => "incompatible",
        NoMatchReason::ExtractionFailed => "extraction_failed",
    }
}

/// Fixture label for a compatibility kind.
#[must_use]
pub fn compatibility_label(compatibility: Compatibility) -> &'static str {
    match compatibility {
        Compatibility::Exact => "exact",
        Compatibility::Ancestor => "ancestor",
        Compatibility::Boxing => "boxing",
    }
}

/// Fixture label for a loading error.
#[must_use]
pub fn error_label(error: &MatchError) -> &'static str {
    match error {
        MatchError::UnknownKind { .. } => "unknown_kind",
        MatchError::InvalidConfig { .. } => "invalid_config",
        MatchError::Introspection { .. } => "introspection",
        MatchError::NoCompatibleConstructor { .. } => "no_compatible_constructor",
        MatchError::UnknownField { .. } => "unknown_field",
        MatchError::ArgumentMismatch { .. } => "argument_mismatch",
        MatchError::TooManyArms { .. } => "too_many_arms",
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// What a case actually produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actual {
    Matched { compatibility: Vec<String> },
    NoMatch { reason: Option<String> },
    Error { reason: String },
}

impl Actual {
    fn from_trace(trace: &MatchTrace) -> Self {
        if trace.matched {
            Self::Matched {
                compatibility: trace
                    .steps
                    .iter()
                    .filter_map(|step| step.compatibility)
                    .map(|c| compatibility_label(c).to_string())
                    .collect(),
            }
        } else {
            Self::NoMatch {
                reason: trace.reason.as_ref().map(|r| reason_label(r).to_string()),
            }
        }
    }
}

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub actual: Actual,
}

impl TestCase {
    fn actual(&self, registry: &Registry) -> Actual {
        match registry.trace(&self.value, &self.signature) {
            Ok(trace) => Actual::from_trace(&trace),
            Err(e) => Actual::Error {
                reason: error_label(&e).to_string(),
            },
        }
    }

    fn accepts(&self, actual: &Actual) -> bool {
        match (self.expect, actual) {
            (Expect::Match, Actual::Matched { compatibility }) => self
                .compatibility
                .as_ref()
                .map_or(true, |expected| expected == compatibility),
            (Expect::NoMatch, Actual::NoMatch { reason }) => self
                .reason
                .as_ref()
                .map_or(true, |expected| reason.as_ref() == Some(expected)),
            (Expect::Error, Actual::Error { reason }) => self
                .reason
                .as_ref()
                .map_or(true, |expected| expected == reason),
            _ => false,
        }
    }
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all test cases and return results
    pub fn run(&self, registry: &Registry) -> Vec<CaseResult> {
        self.cases
            .iter()
            .map(|case| {
                let actual = case.actual(registry);
                CaseResult {
                    case_name: case.name.clone(),
                    passed: case.accepts(&actual),
                    actual,
                }
            })
            .collect()
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self, registry: &Registry) {
        for (case, result) in self.cases.iter().zip(self.run(registry)) {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {:?} (reason {:?}, compatibility {:?}), got {:?}",
                self.name,
                result.case_name,
                case.expect,
                case.reason,
                case.compatibility,
                result.actual
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r"
name: smoke
cases:
  - name: two strings
    value: { kind: test.Name, value: { first: Benji, last: Weber } }
    signature: [string, string]
    expect: match
    compatibility: [exact, exact]
---
name: errors
description: Unregistered names fail to load
cases:
  - name: unknown kind
    value: { kind: test.Nope }
    signature: [string]
    expect: error
    reason: unknown_kind
";

    #[test]
    fn test_parse_multi() {
        let fixtures = Fixture::from_yaml_multi(YAML).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].cases[0].expect, Expect::Match);
        assert!(fixtures[0].description.is_empty());
        assert_eq!(fixtures[1].cases[0].reason.as_deref(), Some("unknown_kind"));
    }

    #[test]
    fn test_run_smoke() {
        let registry = crate::register(recmix::RegistryBuilder::new()).build();
        for fixture in Fixture::from_yaml_multi(YAML).unwrap() {
            fixture.run_and_assert(&registry);
        }
    }

    #[test]
    fn test_mismatched_expectation_fails() {
        let registry = crate::register(recmix::RegistryBuilder::new()).build();
        let fixture = Fixture::from_yaml(
            r"
name: wrong
cases:
  - name: expects a match that cannot happen
    value: { kind: i32, value: 3 }
    signature: [i32]
    expect: match
",
        )
        .unwrap();
        let results = fixture.run(&registry);
        assert!(!results[0].passed);
        assert_eq!(
            results[0].actual,
            Actual::NoMatch {
                reason: Some("not_a_tuple".into())
            }
        );
    }
}
