//! Registry validation.
//!
//! Structural checks for caller-declared registries: value options
//! without tags, misdeclared catch-alls, nameless options and scopes,
//! and duplicate declarations. Validation is available in every build
//! and returns the full list of violations rather than asserting, so
//! callers can run it unconditionally at startup.
//!
//! # Examples
//!
//! ```
//! use cliparse_core::*;
//!
//! let good = Registry::new()
//!     .with_base(Scope::base().with_opt(OptSpec::switch(Some('v'), Some("verbose"))));
//! assert!(validate_registry(&good).is_empty());
//!
//! // A value option must name a tag for its value.
//! let mut bad = good.clone();
//! bad.base.as_mut().unwrap().opts.push(OptSpec {
//!     short: None,
//!     long: Some("log".into()),
//!     tag: None,
//!     mode: OptMode::Value,
//!     help: None,
//! });
//! let errors = validate_registry(&bad);
//! assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingValueTag(_))));
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{OptMode, Registry, Scope};

/// Structural problems in a registry or parse-context configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The registry declares neither options nor sub-commands.
    #[error("registry declares no options and no sub-commands")]
    EmptyRegistry,
    /// The base scope carries a sub-command name.
    #[error("base scope must not carry a name: {0}")]
    NamedBase(String),
    /// A sub-command scope has no name (or a blank one).
    #[error("sub-command scope has no name")]
    UnnamedCommand,
    /// Two sub-command scopes share a name.
    #[error("duplicate sub-command: {0}")]
    DuplicateCommand(String),
    /// A value option names no tag for its value.
    #[error("option takes a value but names no tag: {0}")]
    MissingValueTag(String),
    /// A catch-all option names no tag.
    #[error("catch-all names no tag in scope: {0}")]
    MissingCatchAllTag(String),
    /// A catch-all option carries a short or long name.
    #[error("catch-all must not carry an option name in scope: {0}")]
    NamedCatchAll(String),
    /// More than one catch-all option in a single scope.
    #[error("more than one catch-all in scope: {0}")]
    MultipleCatchAll(String),
    /// A switch or value option with neither a short nor a long form.
    #[error("option has neither a short nor a long name in scope: {0}")]
    NamelessOption(String),
    /// Two options in the same scope share a short or long form.
    #[error("duplicate option in scope {scope}: {key}")]
    DuplicateOption {
        /// Scope label.
        scope: String,
        /// The shared short or long form.
        key: String,
    },
    /// Automatic `--version` handling is enabled but no version string
    /// was configured.
    #[error("automatic version enabled but no version string configured")]
    MissingVersion,
}

/// Validates a registry, returning every violation found.
///
/// An empty result means the registry is structurally sound. Violations
/// are configuration bugs in the calling program, not run-time input
/// errors; the parser's behavior over an invalid registry is safe but
/// unspecified.
///
/// # Examples
///
/// ```
/// use cliparse_core::{Registry, ValidationError, validate_registry};
///
/// let errors = validate_registry(&Registry::new());
/// assert_eq!(errors, vec![ValidationError::EmptyRegistry]);
/// ```
pub fn validate_registry(registry: &Registry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if registry.is_empty() {
        errors.push(ValidationError::EmptyRegistry);
        return errors;
    }

    if let Some(base) = &registry.base {
        if let Some(name) = &base.name {
            errors.push(ValidationError::NamedBase(name.clone()));
        }
        validate_scope(base, &mut errors);
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for cmd in &registry.commands {
        match cmd.name.as_deref() {
            None => errors.push(ValidationError::UnnamedCommand),
            Some(name) if name.trim().is_empty() => {
                errors.push(ValidationError::UnnamedCommand);
            }
            Some(name) => {
                if !seen.insert(name) {
                    errors.push(ValidationError::DuplicateCommand(name.to_string()));
                }
            }
        }
        validate_scope(cmd, &mut errors);
    }

    errors
}

fn scope_label(scope: &Scope) -> String {
    scope.name.clone().unwrap_or_else(|| "(base)".to_string())
}

fn validate_scope(scope: &Scope, errors: &mut Vec<ValidationError>) {
    let label = scope_label(scope);
    let mut catch_alls = 0usize;
    let mut seen: HashSet<String> = HashSet::new();

    for opt in &scope.opts {
        if opt.mode == OptMode::CatchAll {
            catch_alls += 1;
            if opt.short.is_some() || opt.long.is_some() {
                errors.push(ValidationError::NamedCatchAll(label.clone()));
            }
            if opt.tag.as_deref().is_none_or(str::is_empty) {
                errors.push(ValidationError::MissingCatchAllTag(label.clone()));
            }
            continue;
        }

        if opt.short.is_none() && opt.long.is_none() {
            errors.push(ValidationError::NamelessOption(label.clone()));
        }
        if opt.takes_value() && opt.tag.as_deref().is_none_or(str::is_empty) {
            errors.push(ValidationError::MissingValueTag(opt.display_name()));
        }

        if let Some(short) = opt.short {
            if !seen.insert(short.to_string()) {
                errors.push(ValidationError::DuplicateOption {
                    scope: label.clone(),
                    key: format!("-{short}"),
                });
            }
        }
        if let Some(long) = &opt.long {
            if !seen.insert(long.clone()) {
                errors.push(ValidationError::DuplicateOption {
                    scope: label.clone(),
                    key: format!("--{long}"),
                });
            }
        }
    }

    if catch_alls > 1 {
        errors.push(ValidationError::MultipleCatchAll(label));
    }
}

#[cfg(test)]
mod tests {
    use crate::{OptSpec, Scope};

    use super::*;

    #[test]
    fn test_accepts_valid_registry() {
        let registry = Registry::new()
            .with_base(
                Scope::base()
                    .with_opt(OptSpec::switch(Some('v'), Some("verbose")))
                    .with_opt(OptSpec::value(Some('l'), Some("log"), "FILE")),
            )
            .with_command(
                Scope::named("install")
                    .with_opt(OptSpec::switch(Some('U'), Some("upgrade")))
                    .with_opt(OptSpec::catch_all("PACKAGE")),
            );
        assert!(validate_registry(&registry).is_empty());
    }

    #[test]
    fn test_rejects_empty_registry() {
        assert_eq!(
            validate_registry(&Registry::new()),
            vec![ValidationError::EmptyRegistry]
        );
    }

    #[test]
    fn test_rejects_named_base() {
        let registry = Registry::new()
            .with_base(Scope::named("oops").with_opt(OptSpec::switch(Some('v'), None)));
        assert_eq!(
            validate_registry(&registry),
            vec![ValidationError::NamedBase("oops".to_string())]
        );
    }

    #[test]
    fn test_rejects_value_option_without_tag() {
        let mut opt = OptSpec::switch(None, Some("log"));
        opt.mode = OptMode::Value;
        let registry = Registry::new().with_base(Scope::base().with_opt(opt));
        assert_eq!(
            validate_registry(&registry),
            vec![ValidationError::MissingValueTag("--log".to_string())]
        );
    }

    #[test]
    fn test_rejects_named_catch_all() {
        let mut any = OptSpec::catch_all("FILE");
        any.long = Some("files".to_string());
        let registry = Registry::new().with_base(Scope::base().with_opt(any));
        assert_eq!(
            validate_registry(&registry),
            vec![ValidationError::NamedCatchAll("(base)".to_string())]
        );
    }

    #[test]
    fn test_rejects_multiple_catch_alls() {
        let registry = Registry::new().with_base(
            Scope::base()
                .with_opt(OptSpec::catch_all("A"))
                .with_opt(OptSpec::catch_all("B")),
        );
        assert_eq!(
            validate_registry(&registry),
            vec![ValidationError::MultipleCatchAll("(base)".to_string())]
        );
    }

    #[test]
    fn test_rejects_duplicate_option() {
        let registry = Registry::new().with_base(
            Scope::base()
                .with_opt(OptSpec::switch(Some('v'), Some("verbose")))
                .with_opt(OptSpec::switch(Some('v'), Some("version"))),
        );
        assert_eq!(
            validate_registry(&registry),
            vec![ValidationError::DuplicateOption {
                scope: "(base)".to_string(),
                key: "-v".to_string(),
            }]
        );
    }

    #[test]
    fn test_rejects_unnamed_and_duplicate_commands() {
        let registry = Registry::new()
            .with_command(Scope::named("install"))
            .with_command(Scope::named("install"))
            .with_command(Scope::base());
        let errors = validate_registry(&registry);
        assert!(errors.contains(&ValidationError::DuplicateCommand("install".to_string())));
        assert!(errors.contains(&ValidationError::UnnamedCommand));
    }
}
