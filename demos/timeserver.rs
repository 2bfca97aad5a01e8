//! Flat (no sub-commands) usage demo.
//!
//! Declares an ntpd-like interface: a single base scope mixing short-only
//! options, long options, and value options. The handler echoes every
//! occurrence it receives.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p cliparse-demos --example timeserver -- -Nl -p pool.ntp.org
//! cargo run -p cliparse-demos --example timeserver -- --help
//! ```

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use cliparse_core::{
    HandlerResult, OptSpec, Outcome, ParseContext, Registry, Scope, Settings,
};

fn registry() -> Registry {
    Registry::new().with_base(
        Scope::base()
            .with_opt(OptSpec::switch(Some('v'), Some("verbose")).with_help("Give more output"))
            .with_opt(OptSpec::switch(Some('d'), Some("no-daemon")).with_help("Do not daemonize"))
            .with_opt(OptSpec::switch(Some('q'), Some("quit")).with_help("Quit after clock is set"))
            .with_opt(OptSpec::switch(Some('N'), None).with_help("Run at high priority"))
            .with_opt(
                OptSpec::switch(Some('w'), Some("query-only"))
                    .with_help("Do not set time (only query peers), implies -n"),
            )
            .with_opt(
                OptSpec::value(Some('s'), Some("run"), "PROG")
                    .with_help("Run PROG after stepping time, stratum change, and every 11 min"),
            )
            .with_opt(
                OptSpec::value(Some('k'), None, "FILE")
                    .with_help("FILE Key file (ntp.keys compatible)"),
            )
            .with_opt(
                OptSpec::value(Some('p'), Some("peer"), "[keyno:NUM:]PEER").with_help(
                    "Obtain time from PEER (may be repeated). Use key NUM for authentication. \
                     If -p is not given, 'server HOST' lines from /etc/ntp.conf are used",
                ),
            )
            .with_opt(OptSpec::switch(Some('l'), None).with_help("Also run as server on port 123"))
            .with_opt(
                OptSpec::value(Some('I'), Some("interface"), "IFACE")
                    .with_help("Bind server to IFACE, implies -l"),
            ),
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
    let mut ctx = ParseContext::new(&registry, "ntpd", out.lock())
        .with_header("NTP client/server")
        .with_footer("BusyBox v1.33.0 (2021-05-22 10:51:33 +08) multi-call binary.")
        .with_version("1.33.0")
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
