//! `@file` argument expansion.
//!
//! An `@path` token names a plain-text file holding one `key=value` or
//! `key value` pair per line (value optional). Each key runs through
//! the same two-level scope lookup and handler dispatch as a
//! command-line token would. The file handle is scoped to the
//! expansion and released on every exit path.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};

use tracing::debug;

use crate::context::ParseContext;
use crate::error::{ParseError, Result};
use crate::handler::Handler;
use crate::parse::{KeyShape, dispatch};
use crate::types::Scope;

/// Longest accepted line, in bytes, including the terminator. Longer
/// lines are rejected outright rather than silently truncated.
const MAX_LINE: usize = 1024;

/// Strips one trailing line terminator, `\n` or `\r\n`, regardless of
/// platform.
fn strip_line_terminator(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => line,
    }
}

/// Splits an entry at the first `=`, or the first space if no `=` is
/// present, into a key and an optional value.
fn split_entry(entry: &str) -> (&str, Option<&str>) {
    let at = entry.find('=').or_else(|| entry.find(' '));
    match at {
        Some(i) => (&entry[..i], Some(&entry[i + 1..])),
        None => (entry, None),
    }
}

impl<'r, W: Write> ParseContext<'r, W> {
    pub(crate) fn expand_file<H: Handler>(
        &mut self,
        live: Option<&'r Scope>,
        handler: &mut H,
        path: &str,
    ) -> Result<()> {
        debug!(path = %path, "expanding arguments file");
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                debug!(path = %path, error = %err, "arguments file not readable");
                self.report_bad(KeyShape::File, "Arguments file could not be opened:", path)?;
                return Err(ParseError::BadArgument(format!("@{path}")));
            }
        };

        let registry = self.registry;
        let mut reader = BufReader::new(file);
        let mut line = String::new();
        loop {
            line.clear();
            let read = reader.read_line(&mut line)?;
            if read == 0 {
                return Ok(());
            }
            if read > MAX_LINE {
                self.report_bad(KeyShape::File, "Overlong line in arguments file:", path)?;
                return Err(ParseError::BadArgument(format!("@{path}")));
            }

            let entry = strip_line_terminator(&line);
            if entry.is_empty() {
                continue;
            }
            let (key, value) = split_entry(entry);

            let Some((scope, opt)) = registry.resolve(live, key) else {
                self.report_bad(KeyShape::of(key), "Invalid option:", key)?;
                return Err(ParseError::BadArgument(key.to_string()));
            };

            if opt.takes_value() {
                let Some(value) = value else {
                    self.report_bad(KeyShape::of(key), "Missing required value for", key)?;
                    return Err(ParseError::BadArgument(key.to_string()));
                };
                dispatch(handler, scope, opt, Some(value))?;
            } else {
                if value.is_some() {
                    self.report_bad(KeyShape::of(key), "Option does not take a value:", key)?;
                    return Err(ParseError::BadArgument(key.to_string()));
                }
                dispatch(handler, scope, opt, None)?;
            }
        }
    }
}
