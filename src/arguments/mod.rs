//! # Argument System
//!
//! An [`Argument`] turns one or more tokens from a [`CursorReader`] into a
//! typed payload. The engine stores that payload type-erased in the context,
//! so every argument declares its output through an associated type and the
//! erasure happens once, here, at the argument boundary.
//!
//! ## Module Structure
//!
//! - **`numeric`**: integer and decimal arguments with inclusive bounds
//! - **`text`**: string and boolean arguments
//! - **`lookup`**: map- and choice-backed arguments
//!
//! ## Contract
//!
//! - `parse` must leave the reader where it found it when it fails.
//! - `parse` never panics or errors for input that simply does not parse.
//! - `default_value` is consulted only when the reader is already exhausted.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::context::{Context, Payload, Value};
use crate::reader::CursorReader;

pub mod lookup;
pub mod numeric;
pub mod text;

pub use lookup::{ChoiceArgument, MapArgument};
pub use numeric::{DoubleArgument, FloatArgument, IntegerArgument, LongArgument};
pub use text::{BooleanArgument, StringArgument};

// ============================================================================
// PARSE RESULT
// ============================================================================

/// Outcome of one argument parse: an optional value and a success flag.
///
/// When `success` is false, callers ignore the value even if one is present.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<A> {
    value: Option<A>,
    success: bool,
}

impl<A> ParseResult<A> {
    pub fn success(value: A) -> Self {
        Self {
            value: Some(value),
            success: true,
        }
    }

    pub fn failure() -> Self {
        Self {
            value: None,
            success: false,
        }
    }

    /// A failed parse that still read something worth reporting.
    pub fn rejected(value: A) -> Self {
        Self {
            value: Some(value),
            success: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The value, whether or not the parse succeeded.
    pub fn value(&self) -> Option<&A> {
        self.value.as_ref()
    }

    /// The value, only if the parse succeeded.
    pub fn into_value(self) -> Option<A> {
        if self.success {
            self.value
        } else {
            None
        }
    }

    /// Splits into `(value, success)`.
    pub fn into_parts(self) -> (Option<A>, bool) {
        (self.value, self.success)
    }

    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> ParseResult<B> {
        ParseResult {
            value: self.value.map(f),
            success: self.success,
        }
    }
}

// ============================================================================
// ARGUMENT CONTRACT
// ============================================================================

/// Parses tokens into a typed payload for an argument node.
pub trait Argument<S, R>: Send + Sync {
    type Output: Payload;

    /// Consumes zero or more tokens. On failure the reader must be back at
    /// its starting position.
    fn parse(
        &self,
        reader: &mut CursorReader<'_>,
        context: &Context<S, R>,
    ) -> ParseResult<Self::Output>;

    /// Value to use when there is no input left at this node.
    fn default_value(&self, _source: &S) -> Option<ParseResult<Self::Output>> {
        None
    }

    /// Candidate completions for the partially typed token.
    fn suggest(&self, _context: &Context<S, R>, _remaining: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Object-safe view of an [`Argument`] with its output erased.
pub(crate) trait ErasedArgument<S, R>: Send + Sync {
    fn parse_erased(
        &self,
        reader: &mut CursorReader<'_>,
        context: &Context<S, R>,
    ) -> ParseResult<Value>;

    fn default_erased(&self, source: &S) -> Option<ParseResult<Value>>;

    fn suggest_erased(&self, context: &Context<S, R>, remaining: &str) -> Vec<String>;
}

impl<S, R, T> ErasedArgument<S, R> for T
where
    T: Argument<S, R>,
{
    fn parse_erased(
        &self,
        reader: &mut CursorReader<'_>,
        context: &Context<S, R>,
    ) -> ParseResult<Value> {
        self.parse(reader, context).map(erase)
    }

    fn default_erased(&self, source: &S) -> Option<ParseResult<Value>> {
        self.default_value(source).map(|result| result.map(erase))
    }

    fn suggest_erased(&self, context: &Context<S, R>, remaining: &str) -> Vec<String> {
        self.suggest(context, remaining)
    }
}

fn erase<A: Payload>(value: A) -> Value {
    Arc::new(value)
}

/// Keeps the candidates that start with `remaining`, in order.
pub fn filter_prefix<I, T>(candidates: I, remaining: &str) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    candidates
        .into_iter()
        .filter(|candidate| candidate.as_ref().starts_with(remaining))
        .map(|candidate| candidate.as_ref().to_string())
        .collect()
}

// ============================================================================
// DEFAULT VALUES
// ============================================================================

type DefaultSupplier<S, A> = Arc<dyn Fn(&S) -> ParseResult<A> + Send + Sync>;

/// Wraps an argument with a value substituted when input is absent.
///
/// Built through [`ArgumentExt::with_default`] or
/// [`ArgumentExt::with_default_fn`].
pub struct WithDefault<T, S, R>
where
    T: Argument<S, R>,
{
    inner: T,
    supplier: DefaultSupplier<S, T::Output>,
    _marker: PhantomData<fn() -> R>,
}

impl<T, S, R> Argument<S, R> for WithDefault<T, S, R>
where
    T: Argument<S, R>,
{
    type Output = T::Output;

    fn parse(
        &self,
        reader: &mut CursorReader<'_>,
        context: &Context<S, R>,
    ) -> ParseResult<Self::Output> {
        self.inner.parse(reader, context)
    }

    fn default_value(&self, source: &S) -> Option<ParseResult<Self::Output>> {
        Some((self.supplier)(source))
    }

    fn suggest(&self, context: &Context<S, R>, remaining: &str) -> Vec<String> {
        self.inner.suggest(context, remaining)
    }
}

/// Builder sugar available on every argument.
pub trait ArgumentExt<S, R>: Argument<S, R> + Sized {
    /// Substitutes `value` when no input is left at this node.
    fn with_default(self, value: Self::Output) -> WithDefault<Self, S, R>
    where
        Self::Output: Clone,
    {
        self.with_default_fn(move |_| ParseResult::success(value.clone()))
    }

    /// Computes the substitute from the source. The supplier may itself
    /// report failure.
    fn with_default_fn<F>(self, supplier: F) -> WithDefault<Self, S, R>
    where
        F: Fn(&S) -> ParseResult<Self::Output> + Send + Sync + 'static,
    {
        WithDefault {
            inner: self,
            supplier: Arc::new(supplier),
            _marker: PhantomData,
        }
    }
}

impl<S, R, T: Argument<S, R>> ArgumentExt<S, R> for T {}
