//! The callback contract between the parser and its caller.

use crate::{OptSpec, Scope};

/// Error type a handler may return to abort parsing.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by [`Handler::handle`].
pub type HandlerResult = std::result::Result<(), HandlerError>;

/// Receives every resolved occurrence during a parse.
///
/// The parser calls [`handle`](Handler::handle) once per switch
/// occurrence (with `value` `None`), once per required-value occurrence
/// (with the resolved value), and once per positional token absorbed by
/// a catch-all (with the literal token). `scope` is the scope that
/// resolved the occurrence: the live sub-command scope or the base.
///
/// Returning an `Err` aborts the parse immediately with
/// [`ParseError::Callback`](crate::ParseError::Callback); occurrences
/// dispatched before the failure keep their effects.
///
/// Closures with the matching signature implement `Handler` directly:
///
/// ```
/// use cliparse_core::{HandlerResult, OptSpec, Scope};
///
/// let mut count = 0usize;
/// let mut handler = |_: &Scope, _: &OptSpec, _: Option<&str>| -> HandlerResult {
///     count += 1;
///     Ok(())
/// };
/// # let _ = &mut handler;
/// ```
pub trait Handler {
    /// Handles one resolved occurrence.
    fn handle(&mut self, scope: &Scope, opt: &OptSpec, value: Option<&str>) -> HandlerResult;
}

impl<F> Handler for F
where
    F: FnMut(&Scope, &OptSpec, Option<&str>) -> HandlerResult,
{
    fn handle(&mut self, scope: &Scope, opt: &OptSpec, value: Option<&str>) -> HandlerResult {
        self(scope, opt, value)
    }
}
