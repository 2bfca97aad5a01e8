//! The token scanner and dispatch loop.
//!
//! Parsing proceeds in phases: sub-command resolution consumes the
//! first positional token if it names a declared scope, a non-consuming
//! pre-scan intercepts automatic `-h`/`--help` and `-v`/`--version`,
//! and the dispatch loop then classifies every remaining token (short
//! cluster, long option, `@file` inclusion, `--` terminator, or
//! positional) until exhaustion or an error.

use std::io::Write;

use tracing::{debug, trace};

use crate::context::ParseContext;
use crate::error::{Outcome, ParseError, Result};
use crate::handler::Handler;
use crate::summary::{ANSI_END, ANSI_ERR, ANSI_PROG};
use crate::types::{OptSpec, Scope};

/// Classification of a single argument-vector token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'p> {
    /// `-X…` where X is alphanumeric; body excludes the dash.
    ShortCluster(&'p str),
    /// `--name` or `--name=value`; body excludes the dashes.
    Long(&'p str),
    /// Exactly `--`: end of options.
    DoubleDash,
    /// `@path`: argument-file inclusion; body excludes the `@`.
    ArgFile(&'p str),
    /// Anything else; fed to the live scope's catch-all.
    Positional,
}

fn starts_alnum(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
}

fn classify(token: &str) -> Token<'_> {
    if let Some(body) = token.strip_prefix("--") {
        if body.is_empty() {
            Token::DoubleDash
        } else if starts_alnum(body) {
            Token::Long(body)
        } else {
            Token::Positional
        }
    } else if let Some(body) = token.strip_prefix('-') {
        if starts_alnum(body) {
            Token::ShortCluster(body)
        } else {
            Token::Positional
        }
    } else if let Some(path) = token.strip_prefix('@') {
        Token::ArgFile(path)
    } else {
        Token::Positional
    }
}

/// Dash marker prepended to the offending key in diagnostics.
#[derive(Debug, Clone, Copy)]
pub(crate) enum KeyShape {
    Bare,
    Short,
    Long,
    File,
}

impl KeyShape {
    pub(crate) fn of(key: &str) -> Self {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(_), None) => KeyShape::Short,
            _ => KeyShape::Long,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            KeyShape::Bare => "",
            KeyShape::Short => "-",
            KeyShape::Long => "--",
            KeyShape::File => "@",
        }
    }
}

/// The per-call parse state: the argument vector, a cursor into it, and
/// the currently live scope. Deliberately separate from [`ParseContext`]
/// so the context stays free of run-time state.
pub(crate) struct Cursor<'r, 'p> {
    args: &'p [&'p str],
    index: usize,
    pub(crate) live: Option<&'r Scope>,
}

impl<'r, 'p> Cursor<'r, 'p> {
    fn next(&mut self) -> Option<&'p str> {
        let arg = self.args.get(self.index).copied();
        if arg.is_some() {
            self.index += 1;
        }
        arg
    }

    pub(crate) fn take_value(&mut self) -> Option<&'p str> {
        self.next()
    }

    fn remaining(&self) -> &'p [&'p str] {
        &self.args[self.index..]
    }
}

pub(crate) fn dispatch<H: Handler>(
    handler: &mut H,
    scope: &Scope,
    opt: &OptSpec,
    value: Option<&str>,
) -> Result<()> {
    trace!(option = %opt.display_name(), value = ?value, "dispatching occurrence");
    handler.handle(scope, opt, value).map_err(ParseError::Callback)
}

impl<'r, W: Write> ParseContext<'r, W> {
    /// Parses an argument vector, reporting every resolved occurrence
    /// to `handler`.
    ///
    /// `args` follows the `argv` convention: `args[0]` is the program
    /// name and is never classified. With zero or one element there is
    /// nothing to do and the parse succeeds immediately.
    ///
    /// # Examples
    ///
    /// ```
    /// use cliparse_core::*;
    ///
    /// let registry = Registry::new()
    ///     .with_base(Scope::base().with_opt(OptSpec::value(Some('l'), Some("log"), "FILE")));
    ///
    /// let mut seen = Vec::new();
    /// let mut handler = |_: &Scope, opt: &OptSpec, value: Option<&str>| -> HandlerResult {
    ///     seen.push((opt.display_name(), value.map(String::from)));
    ///     Ok(())
    /// };
    ///
    /// let mut ctx = ParseContext::new(&registry, "tool", Vec::new());
    /// let outcome = ctx.parse(&["tool", "--log=a.txt", "-l", "b.txt"], &mut handler).unwrap();
    ///
    /// assert_eq!(outcome, Outcome::Done);
    /// assert_eq!(seen, vec![
    ///     ("--log".to_string(), Some("a.txt".to_string())),
    ///     ("--log".to_string(), Some("b.txt".to_string())),
    /// ]);
    /// ```
    pub fn parse<S, H>(&mut self, args: &[S], handler: &mut H) -> Result<Outcome>
    where
        S: AsRef<str>,
        H: Handler,
    {
        let registry = self.registry;
        if registry.is_empty() {
            return Err(ParseError::InvalidContext(
                "registry declares no options and no sub-commands",
            ));
        }

        let argv: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        if argv.len() <= 1 {
            return Ok(Outcome::Done);
        }

        let mut cur = Cursor {
            args: &argv,
            index: 1,
            live: registry.base.as_ref(),
        };

        // Sub-command resolution: only the very first token, and only
        // when it could be a name. An unmatched token stays in place
        // for normal classification (catch-all or error).
        let first = argv[1];
        if !registry.commands.is_empty() && starts_alnum(first) {
            if let Some(cmd) = registry.find_command(first) {
                debug!(command = %first, "selected sub-command scope");
                cur.live = Some(cmd);
                cur.index += 1;
            }
        }

        if let Some(outcome) = self.pre_scan(&cur)? {
            return Ok(outcome);
        }

        while let Some(token) = cur.next() {
            match classify(token) {
                Token::ShortCluster(body) => self.short_cluster(&mut cur, handler, body)?,
                Token::Long(body) => self.long_option(&mut cur, handler, body)?,
                Token::DoubleDash => {
                    trace!("explicit end of options");
                    return Ok(Outcome::Done);
                }
                Token::ArgFile(path) => self.expand_file(cur.live, handler, path)?,
                Token::Positional => self.positional(&cur, handler, token)?,
            }
        }

        Ok(Outcome::Done)
    }

    /// Scans the remaining tokens, without consuming any, for automatic
    /// help/version spellings. Caller-declared options shadow the
    /// synthesized ones, and version interception requires a configured
    /// version string.
    fn pre_scan(&mut self, cur: &Cursor<'r, '_>) -> Result<Option<Outcome>> {
        let registry = self.registry;
        for &arg in cur.remaining() {
            if self.settings.auto_help && (arg == "-h" || arg == "--help") {
                let key = arg.trim_start_matches('-');
                if registry.resolve(cur.live, key).is_none() {
                    debug!(token = %arg, "automatic help intercepted");
                    let live = cur.live;
                    self.summary(live)?;
                    return Ok(Some(Outcome::HelpOrVersion));
                }
            }
            if self.settings.auto_version && (arg == "-v" || arg == "--version") {
                let key = arg.trim_start_matches('-');
                if registry.resolve(cur.live, key).is_none() && self.version.is_some() {
                    debug!(token = %arg, "automatic version intercepted");
                    if let Some(version) = &self.version {
                        if self.settings.ansi {
                            writeln!(
                                self.out,
                                "{ANSI_PROG}{}{ANSI_END} {version}",
                                self.progname
                            )?;
                        } else {
                            writeln!(self.out, "{} {version}", self.progname)?;
                        }
                    }
                    return Ok(Some(Outcome::HelpOrVersion));
                }
            }
        }
        Ok(None)
    }

    /// Processes one `-abc…` token: each character resolves on its own,
    /// and a character that takes a value consumes the rest of the
    /// token (or the next token) and ends the cluster.
    fn short_cluster<H: Handler>(
        &mut self,
        cur: &mut Cursor<'r, '_>,
        handler: &mut H,
        body: &str,
    ) -> Result<()> {
        let registry = self.registry;
        let mut rest = body;
        while let Some(ch) = rest.chars().next() {
            rest = &rest[ch.len_utf8()..];
            let mut keybuf = [0u8; 4];
            let key: &str = ch.encode_utf8(&mut keybuf);

            let Some((scope, opt)) = registry.resolve(cur.live, key) else {
                self.report_bad(KeyShape::Short, "Invalid option:", key)?;
                return Err(ParseError::BadArgument(format!("-{ch}")));
            };

            if opt.takes_value() {
                let value = if rest.is_empty() {
                    cur.take_value()
                } else {
                    Some(rest)
                };
                let Some(value) = value else {
                    self.report_bad(KeyShape::Short, "Missing required value for", key)?;
                    return Err(ParseError::BadArgument(format!("-{ch}")));
                };
                dispatch(handler, scope, opt, Some(value))?;
                // A consumed value ends the cluster; no further
                // characters are examined.
                return Ok(());
            }

            dispatch(handler, scope, opt, None)?;
        }
        Ok(())
    }

    /// Processes one `--name[=value]` token.
    fn long_option<H: Handler>(
        &mut self,
        cur: &mut Cursor<'r, '_>,
        handler: &mut H,
        body: &str,
    ) -> Result<()> {
        let registry = self.registry;
        let (key, inline) = match body.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (body, None),
        };

        let Some((scope, opt)) = registry.resolve(cur.live, key) else {
            self.report_bad(KeyShape::Long, "Invalid option:", key)?;
            return Err(ParseError::BadArgument(format!("--{key}")));
        };

        if opt.takes_value() {
            let value = inline.or_else(|| cur.take_value());
            let Some(value) = value else {
                self.report_bad(KeyShape::Long, "Missing required value for", key)?;
                return Err(ParseError::BadArgument(format!("--{key}")));
            };
            dispatch(handler, scope, opt, Some(value))
        } else {
            if inline.is_some() {
                self.report_bad(KeyShape::Long, "Option does not take a value:", key)?;
                return Err(ParseError::BadArgument(format!("--{key}")));
            }
            dispatch(handler, scope, opt, None)
        }
    }

    /// Feeds a positional token to the live scope's catch-all.
    fn positional<H: Handler>(
        &mut self,
        cur: &Cursor<'r, '_>,
        handler: &mut H,
        token: &str,
    ) -> Result<()> {
        let catch_all = cur.live.and_then(Scope::catch_all);
        let (Some(scope), Some(opt)) = (cur.live, catch_all) else {
            self.report_bad(KeyShape::Bare, "Unrecognised option:", token)?;
            return Err(ParseError::BadArgument(token.to_string()));
        };
        dispatch(handler, scope, opt, Some(token))
    }

    /// Writes a diagnostic naming the offending token, coloring the
    /// token when ANSI output is enabled.
    pub(crate) fn report_bad(
        &mut self,
        shape: KeyShape,
        message: &str,
        key: &str,
    ) -> std::io::Result<()> {
        if self.settings.ansi {
            writeln!(
                self.out,
                "{message} {ANSI_ERR}{}{key}{ANSI_END}",
                shape.prefix()
            )
        } else {
            writeln!(self.out, "{message} {}{key}", shape.prefix())
        }
    }
}
