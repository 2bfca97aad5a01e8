//! Sub-command usage demo.
//!
//! Declares a pip-like interface: a base scope of global options plus an
//! `install` sub-command with its own options and a positional
//! catch-all. The handler just echoes every occurrence it receives.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p cliparse-demos --example pkgtool -- install -U requests flask
//! cargo run -p cliparse-demos --example pkgtool -- install --help
//! ```

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use cliparse_core::{
    HandlerResult, OptSpec, Outcome, ParseContext, Registry, Scope, Settings,
};

fn registry() -> Registry {
    Registry::new()
        .with_base(
            Scope::base()
                .with_opt(OptSpec::switch(Some('v'), Some("verbose")).with_help("Give more output."))
                .with_opt(OptSpec::switch(None, Some("version")).with_help("Show version and exit."))
                .with_opt(OptSpec::switch(Some('q'), Some("quiet")).with_help("Give less output."))
                .with_opt(
                    OptSpec::value(None, Some("log"), "path")
                        .with_help("Path to a verbose appending log."),
                )
                .with_opt(
                    OptSpec::switch(None, Some("no-input")).with_help("Disable prompting for input."),
                ),
        )
        .with_command(
            Scope::named("install")
                .with_opt(
                    OptSpec::value(Some('e'), Some("editable"), "path/url")
                        .with_help("Install a project in editable mode"),
                )
                .with_opt(
                    OptSpec::value(Some('r'), Some("requirement"), "file")
                        .with_help("Install from the given requirements file."),
                )
                .with_opt(
                    OptSpec::value(Some('t'), Some("target"), "dir")
                        .with_help("Install packages into <dir>."),
                )
                .with_opt(
                    OptSpec::switch(Some('U'), Some("upgrade"))
                        .with_help("Upgrade all packages to the newest available version."),
                )
                .with_opt(
                    OptSpec::switch(None, Some("no-deps"))
                        .with_help("Don't install package dependencies."),
                )
                // No help text, so this one stays out of the summary.
                .with_opt(OptSpec::switch(None, Some("secret")))
                .with_opt(OptSpec::catch_all("PACKAGE").with_help("Packages to install.")),
        )
}

fn echo(scope: &Scope, opt: &OptSpec, value: Option<&str>) -> HandlerResult {
    print!("CB: ");
    if let Some(name) = &scope.name {
        print!("{name} >> ");
    }
    print!("{}", opt.display_name());
    if let Some(tag) = &opt.tag {
        print!(" <{tag}>");
    }
    if let Some(value) = value {
        print!("\t -> {value}");
    }
    println!();
    Ok(())
}

fn main() -> ExitCode {
    let registry = registry();
    let out = io::stdout();
    let mut ctx = ParseContext::new(&registry, "pip", out.lock())
        .with_header("A tool for installing and managing Python packages")
        .with_footer("Copyright (c) 2020 someone")
        .with_version("1.2.3-alpha")
        .with_settings(Settings {
            auto_help: true,
            auto_version: true,
            ansi: io::stdout().is_terminal(),
        });

    if cfg!(debug_assertions) {
        for error in ctx.validate() {
            eprintln!("declaration error: {error}");
        }
    }

    let args: Vec<String> = std::env::args().collect();
    let mut handler = echo;
    match ctx.parse(&args, &mut handler) {
        Ok(Outcome::Done | Outcome::HelpOrVersion) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
