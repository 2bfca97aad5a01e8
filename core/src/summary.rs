//! Help/usage rendering.
//!
//! Renders, in order: the usage line, the header, the sub-command list
//! (when rendering the base scope of a registry that declares any), the
//! synthesized "Default Options" block for automatic help/version, the
//! scope's own documented options with word-wrapped help text, and the
//! footer. Every colored span is closed with an explicit reset so no
//! color bleeds past its field.

use std::io::{self, Write};

use crate::context::ParseContext;
use crate::error::Result;
use crate::types::{OptSpec, Scope};

pub(crate) const ANSI_END: &str = "\x1b[0m";
pub(crate) const ANSI_PROG: &str = "\x1b[1m\x1b[1;37m";
pub(crate) const ANSI_SUBTITLE: &str = "\x1b[2m\x1b[1;37m";
pub(crate) const ANSI_CMD: &str = "\x1b[1;32m";
pub(crate) const ANSI_OPT: &str = "\x1b[1;34m";
pub(crate) const ANSI_ANY: &str = "\x1b[1;33m";
pub(crate) const ANSI_ERR: &str = "\x1b[0;31m";

/// Column budget for wrapped help paragraphs.
const WRAP_COLUMNS: usize = 78;

const AUTO_HELP_PLAIN: &str = "Show help message.";
const AUTO_HELP_COMMANDS: &str = "Show help message. If this option is used along with a \
     sub-command, then a help message specific to that sub-command is shown.";
const AUTO_VERSION: &str = "Show version and if available, copyright information.";

fn puts<W: Write>(out: &mut W, ansi: bool, color: &str, text: &str) -> io::Result<()> {
    if ansi {
        write!(out, "{color}{text}{ANSI_END}")
    } else {
        write!(out, "{text}")
    }
}

/// Greedy, whitespace-based word wrap with a two-space indent. Lines
/// break at the last whitespace run at or before the column budget; a
/// single word longer than the budget is emitted unsplit.
fn wrap_text<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
        } else if line.len() + 1 + word.len() <= WRAP_COLUMNS {
            line.push(' ');
            line.push_str(word);
        } else {
            writeln!(out, "  {line}")?;
            line.clear();
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        writeln!(out, "  {line}")?;
    }
    Ok(())
}

impl<'r, W: Write> ParseContext<'r, W> {
    /// Renders the usage/help summary for `scope`, or for the base
    /// scope when `None`, to the output sink.
    ///
    /// # Examples
    ///
    /// ```
    /// use cliparse_core::*;
    ///
    /// let registry = Registry::new().with_base(
    ///     Scope::base()
    ///         .with_opt(OptSpec::switch(Some('v'), Some("verbose")).with_help("Give more output.")),
    /// );
    /// let mut ctx = ParseContext::new(&registry, "mytool", Vec::new());
    /// ctx.summary(None).unwrap();
    ///
    /// let text = String::from_utf8(ctx.into_sink()).unwrap();
    /// assert!(text.starts_with("Usage: mytool"));
    /// assert!(text.contains("-v, --verbose"));
    /// ```
    pub fn summary(&mut self, scope: Option<&Scope>) -> Result<()> {
        let registry = self.registry;
        let scope = match scope {
            Some(scope) => Some(scope),
            None => registry.base.as_ref(),
        };
        let ansi = self.settings.ansi;
        let has_commands = !registry.commands.is_empty();
        let is_base = scope.is_none_or(Scope::is_base);

        write!(self.out, "Usage: ")?;
        puts(&mut self.out, ansi, ANSI_PROG, &self.progname)?;
        if is_base && has_commands {
            puts(&mut self.out, ansi, ANSI_CMD, " [COMMAND]")?;
        }
        if let Some(name) = scope.and_then(|s| s.name.as_deref()) {
            puts(&mut self.out, ansi, ANSI_OPT, &format!(" {name} [OPTIONS]"))?;
        }
        if let Some(tag) = scope
            .and_then(Scope::catch_all)
            .and_then(|any| any.tag.as_deref())
        {
            puts(&mut self.out, ansi, ANSI_ANY, &format!(" {tag}..."))?;
        }
        writeln!(self.out)?;

        if let Some(header) = &self.header {
            writeln!(self.out, "{header}")?;
        }

        if is_base && has_commands {
            writeln!(self.out, "\nSub-commands:")?;
            for cmd in &registry.commands {
                if let Some(name) = &cmd.name {
                    puts(&mut self.out, ansi, ANSI_CMD, &format!("\t{name}\n"))?;
                }
            }
        }

        if self.settings.auto_help || self.settings.auto_version {
            puts(&mut self.out, ansi, ANSI_SUBTITLE, "\nDefault Options:\n")?;
            self.put_auto_entries(scope, is_base && has_commands)?;
        }

        if let Some(scope) = scope {
            let title = if scope.is_base() {
                "\nCommon options:\n"
            } else {
                "\nOptions:\n"
            };
            puts(&mut self.out, ansi, ANSI_SUBTITLE, title)?;
            for opt in &scope.opts {
                if opt.help.as_deref().is_some_and(|help| !help.is_empty()) {
                    self.put_opt(opt)?;
                }
            }
        }

        if let Some(footer) = &self.footer {
            writeln!(self.out, "\n{footer}")?;
        }

        Ok(())
    }

    /// Renders the synthesized help/version entries, skipping or
    /// trimming any whose spelling a caller-declared option shadows.
    fn put_auto_entries(&mut self, scope: Option<&Scope>, base_with_commands: bool) -> Result<()> {
        let registry = self.registry;

        if self.settings.auto_help
            && registry.resolve(scope, "h").is_none()
            && registry.resolve(scope, "help").is_none()
        {
            let text = if base_with_commands {
                AUTO_HELP_COMMANDS
            } else {
                AUTO_HELP_PLAIN
            };
            let entry = OptSpec::switch(Some('h'), Some("help")).with_help(text);
            self.put_opt(&entry)?;
        }

        if self.settings.auto_version && registry.resolve(scope, "version").is_none() {
            let short = if registry.resolve(scope, "v").is_some() {
                None
            } else {
                Some('v')
            };
            let entry = OptSpec::switch(short, Some("version")).with_help(AUTO_VERSION);
            self.put_opt(&entry)?;
        }

        Ok(())
    }

    /// Renders one option: its spellings on one line, then its wrapped
    /// help paragraph.
    fn put_opt(&mut self, opt: &OptSpec) -> Result<()> {
        let ansi = self.settings.ansi;

        if opt.is_catch_all() {
            if let Some(tag) = &opt.tag {
                puts(&mut self.out, ansi, ANSI_ANY, &format!("{tag}..."))?;
            }
        } else {
            let mut line = String::new();
            if let Some(short) = opt.short {
                line.push('-');
                line.push(short);
                if let Some(tag) = &opt.tag {
                    line.push(' ');
                    line.push_str(tag);
                }
                if opt.long.is_some() {
                    line.push_str(", ");
                }
            }
            if let Some(long) = &opt.long {
                line.push_str("--");
                line.push_str(long);
                if let Some(tag) = &opt.tag {
                    line.push('=');
                    line.push_str(tag);
                }
            }
            puts(&mut self.out, ansi, ANSI_OPT, &line)?;
        }
        writeln!(self.out)?;

        if let Some(help) = opt.help.as_deref() {
            if !help.is_empty() {
                wrap_text(&mut self.out, help)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{ParseContext, Registry, Settings};

    use super::*;

    fn registry() -> Registry {
        Registry::new()
            .with_base(
                Scope::base()
                    .with_opt(
                        OptSpec::switch(Some('q'), Some("quiet")).with_help("Give less output."),
                    )
                    .with_opt(
                        OptSpec::value(Some('l'), Some("log"), "FILE")
                            .with_help("Append a verbose log to FILE."),
                    )
                    .with_opt(OptSpec::switch(None, Some("secret"))),
            )
            .with_command(
                Scope::named("install")
                    .with_opt(
                        OptSpec::value(Some('t'), Some("target"), "DIR")
                            .with_help("Install packages into DIR."),
                    )
                    .with_opt(OptSpec::catch_all("PACKAGE").with_help("Packages to install.")),
            )
    }

    fn render(scope_name: Option<&str>, settings: Settings) -> String {
        let reg = registry();
        let scope = scope_name.map(|name| reg.find_command(name).unwrap().clone());
        let mut ctx = ParseContext::new(&reg, "pkgtool", Vec::new())
            .with_header("Package things")
            .with_footer("Copyright (c) 2026")
            .with_version("1.0.0")
            .with_settings(settings);
        ctx.summary(scope.as_ref()).unwrap();
        String::from_utf8(ctx.into_sink()).unwrap()
    }

    #[test]
    fn test_base_summary_layout() {
        let text = render(None, Settings::default());
        assert!(text.starts_with("Usage: pkgtool [COMMAND]\n"));
        assert!(text.contains("Package things\n"));
        assert!(text.contains("\nSub-commands:\n\tinstall\n"));
        assert!(text.contains("\nCommon options:\n"));
        assert!(text.contains("-q, --quiet\n  Give less output.\n"));
        assert!(text.contains("-l FILE, --log=FILE\n"));
        assert!(text.ends_with("\nCopyright (c) 2026\n"));
    }

    #[test]
    fn test_undocumented_option_is_hidden() {
        let text = render(None, Settings::default());
        assert!(!text.contains("--secret"));
    }

    #[test]
    fn test_named_scope_summary() {
        let text = render(Some("install"), Settings::default());
        assert!(text.starts_with("Usage: pkgtool install [OPTIONS] PACKAGE...\n"));
        assert!(!text.contains("[COMMAND]"));
        assert!(!text.contains("Sub-commands:"));
        assert!(text.contains("\nOptions:\n"));
        assert!(text.contains("-t DIR, --target=DIR\n"));
        assert!(text.contains("PACKAGE...\n  Packages to install.\n"));
    }

    #[test]
    fn test_auto_entries_rendered_when_enabled() {
        let settings = Settings {
            auto_help: true,
            auto_version: true,
            ansi: false,
        };
        let text = render(None, settings);
        assert!(text.contains("\nDefault Options:\n"));
        assert!(text.contains("-h, --help\n"));
        assert!(text.contains("-v, --version\n"));
        // With sub-commands declared, the help text mentions them.
        assert!(text.contains("sub-command"));
    }

    #[test]
    fn test_auto_version_drops_shadowed_short_form() {
        let reg = Registry::new().with_base(
            Scope::base().with_opt(OptSpec::switch(Some('v'), Some("verbose")).with_help("More.")),
        );
        let mut ctx = ParseContext::new(&reg, "tool", Vec::new()).with_settings(Settings {
            auto_version: true,
            ..Settings::default()
        });
        ctx.summary(None).unwrap();
        let text = String::from_utf8(ctx.into_sink()).unwrap();
        assert!(text.contains("--version\n"));
        assert!(!text.contains("-v, --version"));
    }

    #[test]
    fn test_auto_help_skipped_when_declared() {
        let reg = Registry::new().with_base(
            Scope::base().with_opt(OptSpec::switch(Some('h'), Some("help")).with_help("Mine.")),
        );
        let mut ctx = ParseContext::new(&reg, "tool", Vec::new()).with_settings(Settings {
            auto_help: true,
            ..Settings::default()
        });
        ctx.summary(None).unwrap();
        let text = String::from_utf8(ctx.into_sink()).unwrap();
        // Exactly one rendering: the caller's, under the options title.
        assert_eq!(text.matches("-h, --help").count(), 1);
        assert!(text.contains("Mine."));
    }

    #[test]
    fn test_ansi_spans_are_reset() {
        let settings = Settings {
            auto_help: true,
            auto_version: true,
            ansi: true,
        };
        let text = render(None, settings);
        assert!(text.contains(&format!("{ANSI_PROG}pkgtool{ANSI_END}")));
        assert!(text.contains(&format!("{ANSI_CMD} [COMMAND]{ANSI_END}")));
        assert!(text.contains(&format!("{ANSI_OPT}-q, --quiet{ANSI_END}")));
        // Every colored span closes with exactly one reset.
        let spans = ["\x1b[1;37m", "\x1b[1;32m", "\x1b[1;34m", "\x1b[1;33m", "\x1b[0;31m"]
            .iter()
            .map(|seq| text.matches(seq).count())
            .sum::<usize>();
        assert_eq!(text.matches(ANSI_END).count(), spans);
    }

    #[test]
    fn test_wrap_breaks_at_budget() {
        let mut out = Vec::new();
        let words = vec!["word"; 40].join(" ");
        wrap_text(&mut out, &words).unwrap();
        let text = String::from_utf8(out).unwrap();
        for line in text.lines() {
            assert!(line.starts_with("  "));
            assert!(line.len() <= WRAP_COLUMNS + 2);
        }
        assert!(text.lines().count() > 1);
    }

    #[test]
    fn test_wrap_keeps_overlong_word_unsplit() {
        let mut out = Vec::new();
        let long_word = "x".repeat(120);
        wrap_text(&mut out, &format!("tiny {long_word} tail")).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![
            "  tiny".to_string(),
            format!("  {long_word}"),
            "  tail".to_string(),
        ]);
    }
}
