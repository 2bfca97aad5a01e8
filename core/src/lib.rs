//! Callback-driven command-line argument parsing.
//!
//! Callers declare their options as plain data (a [`Registry`] of
//! [`Scope`]s holding [`OptSpec`]s), wrap it in a [`ParseContext`]
//! carrying program metadata and an output sink, and hand
//! [`parse`](ParseContext::parse) an argument vector plus a [`Handler`].
//! The parser walks the vector left to right and calls the handler once
//! per resolved occurrence; it never stores parsed values itself.
//!
//! Supported syntax covers short clusters (`-abc`), long options with
//! inline or split values (`--log=FILE`, `--log FILE`), one level of
//! sub-commands with fallback to the global scope, positional capture
//! through a per-scope catch-all, `@file` argument inclusion, the `--`
//! terminator, and optional automatic `-h`/`--help` and
//! `-v`/`--version` handling with colored usage summaries.
//!
//! # Examples
//!
//! ```
//! use cliparse_core::*;
//!
//! let registry = Registry::new()
//!     .with_base(
//!         Scope::base()
//!             .with_opt(OptSpec::switch(Some('v'), Some("verbose")).with_help("Give more output."))
//!             .with_opt(OptSpec::value(Some('l'), Some("log"), "FILE").with_help("Log to FILE.")),
//!     )
//!     .with_command(
//!         Scope::named("install")
//!             .with_opt(OptSpec::switch(Some('U'), Some("upgrade")).with_help("Upgrade packages."))
//!             .with_opt(OptSpec::catch_all("PACKAGE").with_help("Packages to install.")),
//!     );
//! assert!(validate_registry(&registry).is_empty());
//!
//! let mut verbose = false;
//! let mut packages = Vec::new();
//! let mut handler = |_: &Scope, opt: &OptSpec, value: Option<&str>| -> HandlerResult {
//!     match opt.display_name().as_str() {
//!         "--verbose" => verbose = true,
//!         "PACKAGE" => packages.push(value.unwrap_or_default().to_string()),
//!         _ => {}
//!     }
//!     Ok(())
//! };
//!
//! let mut ctx = ParseContext::new(&registry, "pkgtool", Vec::new());
//! let outcome = ctx
//!     .parse(&["pkgtool", "install", "-v", "requests", "flask"], &mut handler)
//!     .unwrap();
//! drop(handler);
//!
//! assert_eq!(outcome, Outcome::Done);
//! assert!(verbose);
//! assert_eq!(packages, vec!["requests", "flask"]);
//! ```

mod argfile;
mod context;
mod error;
mod handler;
mod parse;
mod summary;
mod types;
mod validate;

pub use context::{ParseContext, Settings};
pub use error::{Outcome, ParseError, Result};
pub use handler::{Handler, HandlerError, HandlerResult};
pub use types::{OptMode, OptSpec, Registry, Scope};
pub use validate::{ValidationError, validate_registry};
