//! Unified, `miette`-based diagnostics for the command tree engine.
//!
//! Only two things can go wrong while *using* a tree: asking a context to
//! execute when nothing is bound to it, and asking the reader for a token past
//! the end of input. Every other failure mode (non-matching literals, rejected
//! arguments) is recorded as data inside the [`Context`](crate::context::Context)
//! and never raised.
//!
//! The remaining variants belong to the declarative definition layer and the
//! command-line host, where files are read and decoded.
//!
//! # Error Construction
//!
//! - Use `definition_err!` for message-only definition errors:
//!   `definition_err!("argument '{}' has no default of type {}", id, ty)`
//! - Use [`CommandError::decode`] to turn a serde error into a labelled
//!   diagnostic pointing into the offending file.

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Every failure the crate can surface to a caller.
#[derive(Debug, Error, Diagnostic)]
pub enum CommandError {
    /// `Context::execute` was called on a context with no resolved executor.
    #[error("no executor is bound to the parsed command")]
    #[diagnostic(
        code(cmdtree::no_executor),
        help("check `Context::is_executable` before calling `execute`")
    )]
    NoExecutorBound,

    /// A token was requested after the reader was exhausted.
    #[error("unexpected end of input at offset {offset}")]
    #[diagnostic(code(cmdtree::end_of_input))]
    EndOfInput { offset: usize },

    /// A tree definition is structurally valid but semantically wrong.
    #[error("invalid tree definition: {message}")]
    #[diagnostic(code(cmdtree::definition))]
    Definition {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A tree definition file could not be decoded.
    #[error("failed to decode {format} tree definition: {message}")]
    #[diagnostic(code(cmdtree::decode))]
    Decode {
        format: &'static str,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
    },

    /// A file could not be read.
    #[error("failed to read '{}'", path.display())]
    #[diagnostic(code(cmdtree::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CommandError {
    /// Builds a `Decode` error, resolving a 1-based line/column into a span.
    pub fn decode(
        format: &'static str,
        name: &str,
        text: &str,
        message: impl Into<String>,
        location: Option<(usize, usize)>,
    ) -> Self {
        let span = location.and_then(|(line, column)| offset_of(text, line, column));
        CommandError::Decode {
            format,
            message: message.into(),
            src: NamedSource::new(name, text.to_string()),
            span: span.map(|offset| SourceSpan::from((offset, 1))),
        }
    }

    /// Returns true if this is the `NoExecutorBound` condition.
    pub fn is_no_executor(&self) -> bool {
        matches!(self, CommandError::NoExecutorBound)
    }
}

fn offset_of(text: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut offset = 0;
    for (index, current) in text.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let within = column.saturating_sub(1).min(current.len());
            return Some(offset + within);
        }
        offset += current.len();
    }
    None
}

/// Constructs a `CommandError::Definition` with a formatted message and no help.
#[macro_export]
macro_rules! definition_err {
    ($msg:expr) => {
        $crate::CommandError::Definition {
            message: format!("{}", $msg),
            help: None,
        }
    };
    ($fmt:expr, $($arg:expr),+ $(,)?) => {
        $crate::CommandError::Definition {
            message: format!($fmt, $($arg),+),
            help: None,
        }
    };
}
