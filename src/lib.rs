//! # cmdtree
//!
//! A command-tree parsing and dispatch engine. A tree of literal and argument
//! nodes is walked against one line of input; the walk records typed
//! argument values into a [`Context`] and resolves the handler bound to the
//! deepest node it reached. The same tree answers "what can come next"
//! queries for tab-completion.
//!
//! ## Module Structure
//!
//! - **`reader`**: cursor over the input line with mark/reset
//! - **`arguments`**: the argument contract and stock argument types
//! - **`context`**: slots recorded by a walk, typed lookup, execution
//! - **`node`**: tree construction, matching, parse/execute/suggest
//! - **`definition`**: trees declared in JSON or YAML files
//! - **`cli`**: the `cmdtree` command-line host

pub use crate::arguments::{Argument, ArgumentExt, ParseResult};
pub use crate::context::{Context, Executor, Payload, Slot, Suggester, Value};
pub use crate::diagnostics::CommandError;
pub use crate::node::Node;
pub use crate::reader::{CursorReader, Mark};

pub mod arguments;
pub mod cli;
pub mod context;
pub mod definition;
pub mod diagnostics;
pub mod node;
pub mod reader;
