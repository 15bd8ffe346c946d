//! Builders: a staged typestate chain and a permissive auto builder
//!
//! The staged chain makes skipping or repeating a field a compile error. Each
//! stage is its own type with exactly one `with` transition, and that
//! transition only accepts the [`Field`] token for the next position:
//!
//! ```text
//! three fields: Missing3<R> -> Missing2<R, (T,)> -> Missing1<R, (T, U)> -> Result<R>
//! two fields:   Missing2<R, ()> -> Missing1<R, (T,)> -> Result<R>
//! ```
//!
//! Every transition also resolves its token against the declared field list.
//! The first failure is carried down the chain and returned by the last step.
//!
//! [`AutoBuilder`] starts from `R::default()` and accepts any subset of fields
//! in any order, trading that guarantee for convenience.

use crate::{with_field, Field, MatchError, Param, TupleType};
use log::debug;
use std::fmt;
use std::marker::PhantomData;

// ═══════════════════════════════════════════════════════════════════════════════
// Staged
// ═══════════════════════════════════════════════════════════════════════════════

/// Three fields still missing.
pub struct Missing3<R> {
    _record: PhantomData<fn() -> R>,
}

/// Two fields still missing; `Done` holds the values supplied so far.
pub struct Missing2<R, Done> {
    done: Done,
    checked: Result<(), MatchError>,
    _record: PhantomData<fn() -> R>,
}

/// One field still missing; `Done` holds the values supplied so far.
pub struct Missing1<R, Done> {
    done: Done,
    checked: Result<(), MatchError>,
    _record: PhantomData<fn() -> R>,
}

/// Maps a tuple type's `Parts` to the first stage of its chain.
pub trait StageChain<R> {
    /// First stage.
    type Start;

    /// Create the first stage.
    fn start() -> Self::Start;
}

impl<R, T, U> StageChain<R> for (T, U) {
    type Start = Missing2<R, ()>;

    fn start() -> Self::Start {
        Missing2 {
            done: (),
            checked: Ok(()),
            _record: PhantomData,
        }
    }
}

impl<R, T, U, V> StageChain<R> for (T, U, V) {
    type Start = Missing3<R>;

    fn start() -> Self::Start {
        Missing3 {
            _record: PhantomData,
        }
    }
}

/// Start a staged build of `R`.
///
/// # Example
///
/// ```
/// use recmix_test::prelude::*;
///
/// let built = staged::<Colour>()
///     .with(colour::R, 1)
///     .with(colour::G, 2)
///     .with(colour::B, 3)?;
/// assert_eq!(built, Colour::new(1, 2, 3));
/// # Ok::<(), MatchError>(())
/// ```
///
/// Fields must be supplied in declaration order. Skipping one does not compile:
///
/// ```compile_fail
/// use recmix_test::prelude::*;
///
/// let _ = staged::<Colour>().with(colour::G, 2);
/// ```
///
/// Neither does supplying one twice:
///
/// ```compile_fail
/// use recmix_test::prelude::*;
///
/// let _ = staged::<Colour>().with(colour::R, 1).with(colour::R, 2);
/// ```
///
/// A chain that stops early is a stage, not a value:
///
/// ```compile_fail
/// use recmix_test::prelude::*;
///
/// let built: Colour = staged::<Colour>().with(colour::R, 1).with(colour::G, 2);
/// ```
#[must_use]
pub fn staged<R>() -> <R::Parts as StageChain<R>>::Start
where
    R: TupleType,
    R::Parts: StageChain<R>,
{
    <R::Parts as StageChain<R>>::start()
}

/// Resolve `field` unless an earlier token already failed.
fn check<R, T, const P: usize>(
    checked: Result<(), MatchError>,
    field: Field<R, T, P>,
) -> Result<(), MatchError>
where
    R: TupleType,
    T: 'static,
{
    checked?;
    field.resolve().map(drop).inspect_err(|err| {
        debug!("staged build of {} rejected {field:?}: {err}", std::any::type_name::<R>());
    })
}

impl<R, T, U, V> Missing3<R>
where
    R: TupleType<Parts = (T, U, V)>,
    T: 'static,
{
    /// Supply the first field.
    #[must_use]
    pub fn with(self, field: Field<R, T, 0>, value: T) -> Missing2<R, (T,)> {
        Missing2 {
            done: (value,),
            checked: check(Ok(()), field),
            _record: PhantomData,
        }
    }
}

impl<R, T, U, V> Missing2<R, (T,)>
where
    R: TupleType<Parts = (T, U, V)>,
    U: 'static,
{
    /// Supply the second field.
    #[must_use]
    pub fn with(self, field: Field<R, U, 1>, value: U) -> Missing1<R, (T, U)> {
        let (first,) = self.done;
        Missing1 {
            done: (first, value),
            checked: check(self.checked, field),
            _record: PhantomData,
        }
    }
}

impl<R, T, U, V> Missing1<R, (T, U)>
where
    R: TupleType<Parts = (T, U, V)>,
    V: 'static,
{
    /// Supply the last field and construct the value.
    ///
    /// # Errors
    ///
    /// Returns the first error from resolving any token in the chain,
    /// such as [`MatchError::UnknownField`].
    pub fn with(self, field: Field<R, V, 2>, value: V) -> Result<R, MatchError> {
        check(self.checked, field)?;
        let (first, second) = self.done;
        Ok(R::from_parts((first, second, value)))
    }
}

impl<R, T, U> Missing2<R, ()>
where
    R: TupleType<Parts = (T, U)>,
    T: 'static,
{
    /// Supply the first field.
    #[must_use]
    pub fn with(self, field: Field<R, T, 0>, value: T) -> Missing1<R, (T,)> {
        Missing1 {
            done: (value,),
            checked: check(self.checked, field),
            _record: PhantomData,
        }
    }
}

impl<R, T, U> Missing1<R, (T,)>
where
    R: TupleType<Parts = (T, U)>,
    U: 'static,
{
    /// Supply the last field and construct the value.
    ///
    /// # Errors
    ///
    /// Returns the first error from resolving either token.
    pub fn with(self, field: Field<R, U, 1>, value: U) -> Result<R, MatchError> {
        check(self.checked, field)?;
        let (first,) = self.done;
        Ok(R::from_parts((first, value)))
    }
}

impl<R> fmt::Debug for Missing3<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Missing3<{}>", std::any::type_name::<R>())
    }
}

impl<R, Done: fmt::Debug> fmt::Debug for Missing2<R, Done> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Missing2")
            .field("record", &std::any::type_name::<R>())
            .field("done", &self.done)
            .field("checked", &self.checked)
            .finish()
    }
}

impl<R, Done: fmt::Debug> fmt::Debug for Missing1<R, Done> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Missing1")
            .field("record", &std::any::type_name::<R>())
            .field("done", &self.done)
            .field("checked", &self.checked)
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Auto
// ═══════════════════════════════════════════════════════════════════════════════

/// Builder that starts from a complete value and replaces fields one at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoBuilder<R> {
    value: R,
}

/// Start an [`AutoBuilder`] from `R::default()`.
#[must_use]
pub fn auto_builder<R: TupleType + Default>() -> AutoBuilder<R> {
    AutoBuilder::from_value(R::default())
}

impl<R: TupleType> AutoBuilder<R> {
    /// Start from an existing value.
    #[must_use]
    pub fn from_value(value: R) -> Self {
        Self { value }
    }

    /// Replace one field.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`with_field`].
    pub fn with<T: Param, const P: usize>(
        self,
        field: Field<R, T, P>,
        value: T,
    ) -> Result<Self, MatchError> {
        Ok(Self {
            value: with_field(&self.value, field, value)?,
        })
    }

    /// The value built so far.
    #[must_use]
    pub fn current(&self) -> &R {
        &self.value
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> R {
        self.value
    }
}
