//! The result of walking a command tree: an ordered record of matched slots
//! plus whatever executor the walk resolved.
//!
//! A context is built fresh for every parse and is read-only once handed back
//! to the caller. Slot values are type-erased; typed retrieval goes through
//! [`Context::get_argument`], which yields `None` on a type mismatch rather
//! than failing.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::CommandError;

/// Handler invoked with the finished context.
pub type Executor<S, R> = Arc<dyn Fn(&Context<S, R>) -> R + Send + Sync>;

/// Completion override: receives the context so far and the partial text.
pub type Suggester<S, R> = Arc<dyn Fn(&Context<S, R>, &str) -> Vec<String> + Send + Sync>;

/// A type-erased value recorded into a slot.
pub type Value = Arc<dyn Payload>;

/// Anything that can be stored in a context slot.
///
/// Blanket-implemented for every `'static + Debug + Send + Sync` type.
pub trait Payload: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> Payload for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// One `(key, value, present)` entry.
#[derive(Debug, Clone)]
pub struct Slot {
    key: String,
    value: Option<Value>,
    present: bool,
}

impl Slot {
    pub(crate) fn present(key: &str, value: Value) -> Self {
        Self {
            key: key.to_string(),
            value: Some(value),
            present: true,
        }
    }

    pub(crate) fn absent(key: &str, value: Option<Value>) -> Self {
        Self {
            key: key.to_string(),
            value,
            present: false,
        }
    }

    /// Id of the node that produced this slot.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    /// The recorded value, only if the slot parsed successfully.
    pub fn value(&self) -> Option<&dyn Payload> {
        if self.present {
            self.raw_value()
        } else {
            None
        }
    }

    /// The recorded value regardless of success. A rejected argument may
    /// still carry what it read, e.g. an out-of-range number.
    pub fn raw_value(&self) -> Option<&dyn Payload> {
        self.value.as_deref()
    }

    /// Typed view of [`value`](Self::value).
    pub fn downcast<T: Any>(&self) -> Option<&T> {
        self.value().and_then(|value| value.as_any().downcast_ref::<T>())
    }
}

/// Accumulated state of one parse.
pub struct Context<S, R> {
    source: S,
    input: String,
    consumed: usize,
    slots: Vec<Slot>,
    failed: bool,
    executor: Option<Executor<S, R>>,
    failure: Option<Executor<S, R>>,
}

impl<S, R> Context<S, R> {
    pub(crate) fn new(source: S, input: &str) -> Self {
        Self {
            source,
            input: input.to_string(),
            consumed: 0,
            slots: Vec::new(),
            failed: false,
            executor: None,
            failure: None,
        }
    }

    pub(crate) fn push(&mut self, slot: Slot) {
        if !slot.present {
            self.failed = true;
        }
        self.slots.push(slot);
    }

    pub(crate) fn resolve(
        &mut self,
        executor: Option<Executor<S, R>>,
        failure: Option<Executor<S, R>>,
        consumed: usize,
    ) {
        self.executor = executor;
        self.failure = if self.failed { failure } else { None };
        self.consumed = consumed.min(self.input.len());
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The raw text this context was parsed from.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Trailing text the walk did not consume.
    pub fn unparsed(&self) -> &str {
        &self.input[self.consumed..]
    }

    /// Number of recorded slots, successful or not.
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Slot at a position along the matched path.
    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// The most recent slot recorded under `key`.
    pub fn slot(&self, key: &str) -> Option<&Slot> {
        self.slots.iter().rev().find(|slot| slot.key == key)
    }

    pub fn last_slot(&self) -> Option<&Slot> {
        self.slots.last()
    }

    /// Typed value of a successfully parsed slot.
    ///
    /// Returns `None` if the key was never reached, the slot failed, or the
    /// stored value is not a `T`.
    pub fn get_argument<T: Any>(&self, key: &str) -> Option<&T> {
        self.slot(key).and_then(Slot::downcast::<T>)
    }

    /// Untyped value of a successfully parsed slot.
    pub fn raw_argument(&self, key: &str) -> Option<&dyn Payload> {
        self.slot(key).and_then(Slot::value)
    }

    pub fn last_argument<T: Any>(&self) -> Option<&T> {
        self.last_slot().and_then(Slot::downcast::<T>)
    }

    pub fn is_argument_success(&self, key: &str) -> bool {
        self.slot(key).is_some_and(Slot::is_present)
    }

    /// True iff the deepest matched node has an executor and no slot on the
    /// path failed.
    pub fn is_executable(&self) -> bool {
        !self.failed && self.executor.is_some()
    }

    /// Runs the resolved executor.
    ///
    /// If the walk stopped on a rejected argument whose node carries a failure
    /// handler, that handler runs instead. Otherwise, with nothing to run,
    /// fails with [`CommandError::NoExecutorBound`]. The handler's own result
    /// (including an `Err` when `R` is a `Result`) is returned untouched.
    pub fn execute(&self) -> Result<R, CommandError> {
        if !self.failed {
            if let Some(executor) = &self.executor {
                return Ok(executor(self));
            }
        }
        match &self.failure {
            Some(failure) => Ok(failure(self)),
            None => Err(CommandError::NoExecutorBound),
        }
    }

    /// Like [`execute`](Self::execute), but runs `fallback` when the walk
    /// succeeded and ended on a node with no executor.
    ///
    /// A walk that stopped on a rejected slot never reaches `fallback`: it runs
    /// the failure handler or fails with [`CommandError::NoExecutorBound`].
    pub fn execute_or<F>(&self, fallback: F) -> Result<R, CommandError>
    where
        F: FnOnce(&Self) -> R,
    {
        if !self.failed && self.executor.is_none() {
            return Ok(fallback(self));
        }
        self.execute()
    }
}

impl<S: fmt::Debug, R> fmt::Debug for Context<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("source", &self.source)
            .field("input", &self.input)
            .field("slots", &self.slots)
            .field("executable", &self.is_executable())
            .field("unparsed", &self.unparsed())
            .finish()
    }
}
