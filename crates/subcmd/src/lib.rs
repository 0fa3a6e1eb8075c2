//! Lightweight subcommands for command-line programs.
//!
//! `subcmd` registers named subcommands, routes the process arguments to
//! the one named by the first argument, gives each subcommand its own flag
//! scope (backed by clap), and generates usage text.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::io::Write;
//! use subcmd::{Command, Definition, FlagSet, Options, Program};
//!
//! #[derive(Default)]
//! struct Echo;
//!
//! impl Command for Echo {
//!     fn set_flags(&self, flags: &mut FlagSet) {
//!         flags.bool("n", false, "Suppress trailing newline.");
//!     }
//!
//!     fn run(&mut self, opt: Options<'_>) -> anyhow::Result<()> {
//!         let flags = opt.parse_flags()?;
//!         let mut out = opt.stdout();
//!         write!(out, "{}", flags.args().join(" "))?;
//!         if !flags.get_bool("n") {
//!             writeln!(out)?;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut program = Program::from_env("");
//! program.register(
//!     Definition::new("echo")
//!         .summary("Display text.")
//!         .arguments("[-n] [TEXT...]")
//!         .description("Write the given arguments to standard output.")
//!         .factory(Echo::default),
//! );
//! std::process::exit(program.main_status().exit_code());
//! ```
//!
//! # Errors
//!
//! Registering an empty name, a definition without factory, or a name
//! twice panics: those are bugs in the program. Everything the user can
//! cause is an [`Error`], and [`Program::main`] reports it on standard
//! error instead of returning it.
//!
//! # Key Types
//!
//! - [`Program`]: owns the input and registry, dispatches
//! - [`Registry`] / [`Definition`]: what can be run
//! - [`Command`]: what runs
//! - [`FlagSet`] / [`Flags`]: per-command flags, declared and parsed
//! - [`Options`] / [`Input`]: what a running command sees
//! - [`Reader`] / [`Writer`] / [`Buffer`]: substitutable I/O handles

mod command;
mod error;
mod flags;
mod help;
mod input;
pub mod io;
mod options;
mod program;
mod registry;

pub use command::{Command, Definition, Factory};
pub use error::{Error, Result};
pub use flags::{format_duration, parse_duration, FlagSet, Flags};
pub use help::{DEFAULT_GLOBAL_USAGE, HELP};
pub use input::Input;
pub use io::{Buffer, Reader, Writer};
pub use options::Options;
pub use program::{Outcome, Program};
pub use registry::Registry;

// Re-exported for `FlagSet::var`.
pub use clap::{Arg, ArgAction};
