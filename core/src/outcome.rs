//! `MatchOutcome`: the value-level result of a match attempt

/// Either the handler ran and produced `R`, or the candidate did not fit.
///
/// `NoMatch` is an expected outcome, not an error. Use [`or`](Self::or) (or
/// [`with_fallback`](crate::with_fallback)) to turn it into a concrete value.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOutcome<R> {
    /// The handler was invoked and returned this value.
    Matched(R),
    /// The candidate's shape or types did not line up with the handler.
    NoMatch,
}

impl<R> MatchOutcome<R> {
    /// Returns `true` if the handler was invoked.
    #[inline]
    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    /// Returns `true` if the handler was not invoked.
    #[inline]
    #[must_use]
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch)
    }

    /// The matched value, or `default`.
    pub fn or(self, default: R) -> R {
        match self {
            Self::Matched(value) => value,
            Self::NoMatch => default,
        }
    }

    /// The matched value, or the result of `default`.
    pub fn or_else<F: FnOnce() -> R>(self, default: F) -> R {
        match self {
            Self::Matched(value) => value,
            Self::NoMatch => default(),
        }
    }

    /// Transform the matched value.
    pub fn map<U, F: FnOnce(R) -> U>(self, f: F) -> MatchOutcome<U> {
        match self {
            Self::Matched(value) => MatchOutcome::Matched(f(value)),
            Self::NoMatch => MatchOutcome::NoMatch,
        }
    }

    /// Borrow the matched value.
    pub fn as_ref(&self) -> MatchOutcome<&R> {
        match self {
            Self::Matched(value) => MatchOutcome::Matched(value),
            Self::NoMatch => MatchOutcome::NoMatch,
        }
    }

    /// Convert into an `Option`.
    #[must_use]
    pub fn into_option(self) -> Option<R> {
        match self {
            Self::Matched(value) => Some(value),
            Self::NoMatch => None,
        }
    }
}

impl<R> From<Option<R>> for MatchOutcome<R> {
    fn from(value: Option<R>) -> Self {
        value.map_or(Self::NoMatch, Self::Matched)
    }
}

impl<R> From<MatchOutcome<R>> for Option<R> {
    fn from(outcome: MatchOutcome<R>) -> Self {
        outcome.into_option()
    }
}
