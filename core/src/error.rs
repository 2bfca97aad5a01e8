//! Parse status and error types.
//!
//! A successful parse yields an [`Outcome`]; failures are reported as
//! [`ParseError`], which distinguishes parser-detected problems
//! ([`ParseError::BadArgument`]) from handler rejections
//! ([`ParseError::Callback`]) so callers can tell "the syntax was wrong"
//! apart from "my validation rejected this".

use thiserror::Error;

use crate::handler::HandlerError;

/// Successful parse results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// All tokens were dispatched (or `--` ended the scan early).
    Done,
    /// Automatic help or version output was rendered; no tokens were
    /// dispatched to the handler.
    HelpOrVersion,
}

/// Errors terminating a parse.
///
/// Parse-time errors are also reported to the context's output sink,
/// naming the offending token, before the error is returned. Once an
/// error is raised no further tokens are classified or dispatched;
/// occurrences already dispatched keep their effects.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The context is not usable for parsing (e.g. an empty registry).
    #[error("invalid parse context: {0}")]
    InvalidContext(&'static str),
    /// The handler rejected a dispatched occurrence.
    #[error("callback failed: {0}")]
    Callback(#[source] HandlerError),
    /// The first positional token named no declared sub-command.
    ///
    /// Currently never produced: an unmatched first token falls through
    /// to normal classification so a base catch-all can absorb it.
    #[error("no such sub-command: {0}")]
    BadSubcommand(String),
    /// An unresolvable option, a missing required value, an unexpected
    /// inline value, or a bad argument file. Carries the offending
    /// token.
    #[error("bad argument: {0}")]
    BadArgument(String),
    /// Writing to the output sink or reading an argument file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
