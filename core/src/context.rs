//! Parse configuration: program metadata, settings, and the output sink.

use std::io::Write;

use crate::Registry;
use crate::validate::{ValidationError, validate_registry};

/// Automatic-behavior toggles for a [`ParseContext`].
///
/// # Examples
///
/// ```
/// use cliparse_core::Settings;
///
/// let settings = Settings { auto_help: true, auto_version: true, ansi: false };
/// assert!(settings.auto_help);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    /// Intercept `-h`/`--help` and render the summary, unless the
    /// caller declared an option under that name.
    pub auto_help: bool,
    /// Intercept `-v`/`--version` and print the version line, unless
    /// shadowed by a caller-declared option. Requires a version string.
    pub auto_version: bool,
    /// Decorate output with ANSI color codes.
    pub ansi: bool,
}

/// Everything a parse needs besides the argument vector: the registry,
/// program metadata, settings, and the output sink for help text and
/// diagnostics.
///
/// A context holds no run-time parse state; the cursor and live scope
/// live on the stack of each [`parse`](ParseContext::parse) call, so a
/// context can run any number of parses and several contexts can share
/// one [`Registry`] across threads.
///
/// # Examples
///
/// ```
/// use cliparse_core::*;
///
/// let registry = Registry::new()
///     .with_base(Scope::base().with_opt(OptSpec::switch(Some('v'), Some("verbose"))));
///
/// let ctx = ParseContext::new(&registry, "mytool", Vec::new())
///     .with_header("Does tool things")
///     .with_version("0.3.0")
///     .with_settings(Settings { auto_help: true, auto_version: true, ansi: false });
///
/// assert!(ctx.validate().is_empty());
/// ```
pub struct ParseContext<'r, W> {
    pub(crate) registry: &'r Registry,
    pub(crate) progname: String,
    pub(crate) header: Option<String>,
    pub(crate) footer: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) settings: Settings,
    pub(crate) out: W,
}

impl<'r, W: Write> ParseContext<'r, W> {
    /// Creates a context over `registry`, writing help and diagnostics
    /// to `out`.
    ///
    /// The program name is stated explicitly rather than taken from
    /// `argv[0]`, which is unreliable.
    pub fn new(registry: &'r Registry, progname: impl Into<String>, out: W) -> Self {
        Self {
            registry,
            progname: progname.into(),
            header: None,
            footer: None,
            version: None,
            settings: Settings::default(),
            out,
        }
    }

    /// Sets the one-line description shown under the usage line.
    pub fn with_header(mut self, text: impl Into<String>) -> Self {
        self.header = Some(text.into());
        self
    }

    /// Sets the footer paragraph (copyright, licenses).
    pub fn with_footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    /// Sets the version string used by automatic `--version` handling.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the automatic-behavior toggles.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// The registry this context parses against.
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// The configured settings.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Borrows the output sink.
    pub fn sink(&self) -> &W {
        &self.out
    }

    /// Consumes the context, returning the output sink.
    pub fn into_sink(self) -> W {
        self.out
    }

    /// Validates the registry plus context-level configuration.
    ///
    /// Extends [`validate_registry`] with a check that automatic
    /// version handling has a version string to print.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = validate_registry(self.registry);
        if self.settings.auto_version && self.version.is_none() {
            errors.push(ValidationError::MissingVersion);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use crate::{OptSpec, Registry, Scope, ValidationError};

    use super::*;

    #[test]
    fn test_validate_flags_missing_version_string() {
        let registry = Registry::new()
            .with_base(Scope::base().with_opt(OptSpec::switch(Some('v'), None)));
        let ctx = ParseContext::new(&registry, "tool", Vec::new()).with_settings(Settings {
            auto_version: true,
            ..Settings::default()
        });
        assert_eq!(ctx.validate(), vec![ValidationError::MissingVersion]);
    }

    #[test]
    fn test_context_is_reusable_after_into_sink() {
        let registry = Registry::new()
            .with_base(Scope::base().with_opt(OptSpec::switch(Some('v'), None)));
        let ctx = ParseContext::new(&registry, "tool", Vec::new());
        let sink = ctx.into_sink();
        assert!(sink.is_empty());
    }
}
