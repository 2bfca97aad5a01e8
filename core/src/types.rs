//! Option model for command-line declarations.
//!
//! This module defines the immutable description a caller hands to the
//! parser: individual options ([`OptSpec`]), named or base option scopes
//! ([`Scope`]), and the full [`Registry`] of scopes. The types derive
//! [`serde`] traits so registries can be persisted or embedded as data.

use serde::{Deserialize, Serialize};

/// How an option consumes values.
///
/// # Examples
///
/// ```
/// use cliparse_core::OptMode;
///
/// assert_eq!(OptMode::default(), OptMode::Switch);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OptMode {
    /// Takes no value; dispatched once per appearance (the default).
    #[default]
    Switch,
    /// Requires a value: inline, `=`-suffixed, or the next token.
    Value,
    /// Absorbs positional tokens. At most one per scope, and it carries
    /// no short or long name, only a tag.
    CatchAll,
}

/// A single command-line option declaration.
///
/// An option has an optional short form (e.g. `-v`) and/or long form
/// (e.g. `--verbose`), a mode describing whether it takes a value, a tag
/// naming that value in help output, and optional help text. Options
/// without help text are hidden from the rendered summary but remain
/// parseable.
///
/// # Examples
///
/// ```
/// use cliparse_core::OptSpec;
///
/// let verbose = OptSpec::switch(Some('v'), Some("verbose"))
///     .with_help("Give more output.");
/// assert!(verbose.matches("v"));
/// assert!(verbose.matches("verbose"));
/// assert!(!verbose.takes_value());
///
/// let log = OptSpec::value(Some('l'), Some("log"), "FILE");
/// assert!(log.takes_value());
/// assert_eq!(log.display_name(), "--log");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptSpec {
    /// Short, single-character form.
    pub short: Option<char>,
    /// Long form, without the leading dashes.
    pub long: Option<String>,
    /// Display name for the option's value (required for value and
    /// catch-all options).
    pub tag: Option<String>,
    /// Value-handling mode.
    pub mode: OptMode,
    /// Help text; `None` hides the option from summaries.
    pub help: Option<String>,
}

impl OptSpec {
    /// Creates a switch option (no value).
    ///
    /// # Examples
    ///
    /// ```
    /// use cliparse_core::OptSpec;
    ///
    /// let quiet = OptSpec::switch(Some('q'), None);
    /// assert!(quiet.matches("q"));
    /// assert!(!quiet.matches("quiet"));
    /// ```
    pub fn switch(short: Option<char>, long: Option<&str>) -> Self {
        Self {
            short,
            long: long.map(String::from),
            tag: None,
            mode: OptMode::Switch,
            help: None,
        }
    }

    /// Creates an option that requires a value, with `tag` naming the
    /// value in help output.
    pub fn value(short: Option<char>, long: Option<&str>, tag: &str) -> Self {
        Self {
            short,
            long: long.map(String::from),
            tag: Some(tag.to_string()),
            mode: OptMode::Value,
            help: None,
        }
    }

    /// Creates the catch-all option for a scope.
    ///
    /// A catch-all has no short or long name; it receives every
    /// positional token in its scope.
    pub fn catch_all(tag: &str) -> Self {
        Self {
            short: None,
            long: None,
            tag: Some(tag.to_string()),
            mode: OptMode::CatchAll,
            help: None,
        }
    }

    /// Adds help text.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Returns true if this option requires a value.
    pub fn takes_value(&self) -> bool {
        self.mode == OptMode::Value
    }

    /// Returns true if this option is a scope's catch-all.
    pub fn is_catch_all(&self) -> bool {
        self.mode == OptMode::CatchAll
    }

    /// Checks whether a textual key resolves to this option.
    ///
    /// A single-character key matches the short form; a longer key
    /// matches the long form by exact length and content. Catch-alls
    /// never match by name.
    ///
    /// # Examples
    ///
    /// ```
    /// use cliparse_core::OptSpec;
    ///
    /// let opt = OptSpec::switch(Some('v'), Some("verbose"));
    /// assert!(opt.matches("v"));
    /// assert!(opt.matches("verbose"));
    /// assert!(!opt.matches("verb"));
    /// ```
    pub fn matches(&self, key: &str) -> bool {
        if self.is_catch_all() {
            return false;
        }
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.short == Some(c),
            (Some(_), Some(_)) => self.long.as_deref() == Some(key),
            (None, _) => false,
        }
    }

    /// Returns the name used in diagnostics: long form preferred, then
    /// short form, then the tag for catch-alls.
    pub fn display_name(&self) -> String {
        if let Some(long) = &self.long {
            format!("--{long}")
        } else if let Some(short) = self.short {
            format!("-{short}")
        } else {
            self.tag.clone().unwrap_or_default()
        }
    }
}

/// An ordered collection of options, either for a named sub-command or
/// for the unnamed base/global scope.
///
/// # Examples
///
/// ```
/// use cliparse_core::{OptSpec, Scope};
///
/// let install = Scope::named("install")
///     .with_opt(OptSpec::value(Some('t'), Some("target"), "DIR"))
///     .with_opt(OptSpec::catch_all("PACKAGE"));
///
/// assert!(!install.is_base());
/// assert!(install.find_opt("target").is_some());
/// assert!(install.catch_all().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    /// Sub-command name; `None` marks the base scope.
    pub name: Option<String>,
    /// Declared options, in declaration order.
    pub opts: Vec<OptSpec>,
}

impl Scope {
    /// Creates the unnamed base scope.
    pub fn base() -> Self {
        Self::default()
    }

    /// Creates a named sub-command scope.
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            opts: Vec::new(),
        }
    }

    /// Adds an option to this scope.
    pub fn with_opt(mut self, opt: OptSpec) -> Self {
        self.opts.push(opt);
        self
    }

    /// Returns true if this is the unnamed base scope.
    pub fn is_base(&self) -> bool {
        self.name.is_none()
    }

    /// Finds an option by short or long key. Catch-alls are excluded;
    /// they carry no name.
    pub fn find_opt(&self, key: &str) -> Option<&OptSpec> {
        self.opts.iter().find(|opt| opt.matches(key))
    }

    /// Returns this scope's catch-all option, if declared.
    pub fn catch_all(&self) -> Option<&OptSpec> {
        self.opts.iter().find(|opt| opt.is_catch_all())
    }
}

/// The full, immutable option registry: one optional base scope plus
/// zero or more named sub-command scopes.
///
/// A registry is built once by the caller and never mutated during
/// parsing, so one registry may serve any number of parses, including
/// concurrent ones on separate threads.
///
/// # Examples
///
/// ```
/// use cliparse_core::{OptSpec, Registry, Scope};
///
/// let registry = Registry::new()
///     .with_base(Scope::base().with_opt(OptSpec::switch(Some('v'), Some("verbose"))))
///     .with_command(Scope::named("install"));
///
/// assert!(registry.find_command("install").is_some());
/// assert!(registry.find_command("remove").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// The base/global scope, if any.
    pub base: Option<Scope>,
    /// Named sub-command scopes, in declaration order.
    pub commands: Vec<Scope>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base scope.
    pub fn with_base(mut self, scope: Scope) -> Self {
        self.base = Some(scope);
        self
    }

    /// Adds a named sub-command scope.
    pub fn with_command(mut self, scope: Scope) -> Self {
        self.commands.push(scope);
        self
    }

    /// Returns true if neither a base scope nor any sub-command is
    /// declared. Such a registry cannot parse anything.
    pub fn is_empty(&self) -> bool {
        self.base.is_none() && self.commands.is_empty()
    }

    /// Finds a sub-command scope by exact name.
    pub fn find_command(&self, name: &str) -> Option<&Scope> {
        self.commands
            .iter()
            .find(|cmd| cmd.name.as_deref() == Some(name))
    }

    /// Resolves a key against the two-level scope chain: the live scope
    /// first, then the base scope when the live scope is not itself the
    /// base. Returns the resolving scope alongside the option.
    ///
    /// # Examples
    ///
    /// ```
    /// use cliparse_core::{OptSpec, Registry, Scope};
    ///
    /// let registry = Registry::new()
    ///     .with_base(Scope::base().with_opt(OptSpec::switch(Some('v'), Some("verbose"))))
    ///     .with_command(Scope::named("install").with_opt(OptSpec::switch(Some('U'), Some("upgrade"))));
    ///
    /// let install = registry.find_command("install").unwrap();
    /// // Declared directly in the live scope.
    /// assert!(registry.resolve(Some(install), "upgrade").is_some());
    /// // Falls back to the base scope.
    /// let (scope, _) = registry.resolve(Some(install), "verbose").unwrap();
    /// assert!(scope.is_base());
    /// // Scope-local options do not leak into the base.
    /// assert!(registry.resolve(registry.base.as_ref(), "upgrade").is_none());
    /// ```
    pub fn resolve<'a>(
        &'a self,
        live: Option<&'a Scope>,
        key: &str,
    ) -> Option<(&'a Scope, &'a OptSpec)> {
        if let Some(scope) = live {
            if let Some(opt) = scope.find_opt(key) {
                return Some((scope, opt));
            }
            if scope.is_base() {
                return None;
            }
        }
        let base = self.base.as_ref()?;
        base.find_opt(key).map(|opt| (base, opt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> Registry {
        Registry::new()
            .with_base(
                Scope::base()
                    .with_opt(OptSpec::switch(Some('v'), Some("verbose")))
                    .with_opt(OptSpec::value(Some('l'), Some("log"), "FILE")),
            )
            .with_command(
                Scope::named("install")
                    .with_opt(OptSpec::value(Some('t'), Some("target"), "DIR"))
                    .with_opt(OptSpec::catch_all("PACKAGE")),
            )
    }

    #[test]
    fn test_matches_short_and_long() {
        let opt = OptSpec::switch(Some('v'), Some("verbose"));
        assert!(opt.matches("v"));
        assert!(opt.matches("verbose"));
        assert!(!opt.matches("verb"));
        assert!(!opt.matches("verbosee"));
        assert!(!opt.matches(""));
    }

    #[test]
    fn test_catch_all_never_matches_by_name() {
        let any = OptSpec::catch_all("FILE");
        assert!(!any.matches("FILE"));
        assert!(!any.matches("F"));
    }

    #[test]
    fn test_scope_lookup_skips_catch_all() {
        let registry = sample_registry();
        let install = registry.find_command("install").unwrap();
        assert!(install.find_opt("target").is_some());
        assert!(install.find_opt("PACKAGE").is_none());
        assert_eq!(install.catch_all().unwrap().tag.as_deref(), Some("PACKAGE"));
    }

    #[test]
    fn test_resolve_falls_back_to_base() {
        let registry = sample_registry();
        let install = registry.find_command("install").unwrap();

        let (scope, opt) = registry.resolve(Some(install), "verbose").unwrap();
        assert!(scope.is_base());
        assert_eq!(opt.display_name(), "--verbose");

        let (scope, _) = registry.resolve(Some(install), "t").unwrap();
        assert_eq!(scope.name.as_deref(), Some("install"));
    }

    #[test]
    fn test_resolve_without_live_scope_uses_base() {
        let registry = sample_registry();
        assert!(registry.resolve(None, "verbose").is_some());
        assert!(registry.resolve(None, "target").is_none());
    }

    #[test]
    fn test_find_command_is_exact() {
        let registry = sample_registry();
        assert!(registry.find_command("install").is_some());
        assert!(registry.find_command("inst").is_none());
        assert!(registry.find_command("installer").is_none());
    }

    #[test]
    fn test_registry_round_trips_through_json() {
        let registry = sample_registry();
        let json = serde_json::to_string(&registry).unwrap();
        let back: Registry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, registry);
    }
}
