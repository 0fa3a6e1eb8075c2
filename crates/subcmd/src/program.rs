//! The top-level coordinator.
//!
//! [`Program`] owns the process-wide [`Input`] and the [`Registry`]. It
//! resolves the first argument to a subcommand, builds that subcommand's
//! flag scope, and runs it:
//!
//! ```text
//! arguments[0] → Registry::get → Definition::instantiate
//!   → Command::set_flags → Command::run(Options)
//! ```
//!
//! [`Program::main`] wraps that in the user-facing behavior: help when
//! nothing is given, a usage message for unknown commands, and error
//! reporting on standard error.

use std::io::Write;

use tracing::{debug, warn};

use crate::command::Definition;
use crate::error::{Error, Result};
use crate::flags::FlagSet;
use crate::help::{self, HELP};
use crate::input::Input;
use crate::io::{Reader, Writer};
use crate::options::Options;
use crate::registry::Registry;

/// Terminal state of one [`Program::main_status`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The subcommand ran and returned `Ok`.
    Success,
    /// No arguments and no `help` command; the global usage was printed.
    UsagePrinted,
    /// The first argument named no registered command.
    UnknownCommand,
    /// The subcommand asked for help; its usage was printed.
    HelpPrinted,
    /// The subcommand failed; the error was printed.
    Failed,
}

impl Outcome {
    /// A conventional process exit code for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success | Outcome::HelpPrinted => 0,
            Outcome::Failed => 1,
            Outcome::UsagePrinted | Outcome::UnknownCommand => 2,
        }
    }

    /// Returns true if the exit code is zero.
    pub fn is_success(self) -> bool {
        self.exit_code() == 0
    }
}

/// A command-line program made of subcommands.
///
/// # Example
///
/// ```rust,no_run
/// use std::io::Write;
/// use subcmd::{Command, Definition, Options, Program};
///
/// struct Greet;
///
/// impl Command for Greet {
///     fn run(&mut self, opt: Options<'_>) -> anyhow::Result<()> {
///         let flags = opt.parse_flags()?;
///         let mut out = opt.stdout();
///         writeln!(out, "hello, {}", flags.arg(0).unwrap_or("world"))?;
///         Ok(())
///     }
/// }
///
/// let mut program = Program::from_env("");
/// program.register(
///     Definition::new("greet")
///         .summary("Say hello.")
///         .arguments("[NAME]")
///         .factory(|| Greet),
/// );
/// program.main();
/// ```
#[derive(Debug)]
pub struct Program {
    input: Input,
    registry: Registry,
}

impl Program {
    /// Creates a program from raw arguments, including argument zero.
    ///
    /// An empty `name` is replaced by argument zero. The program starts
    /// with the process's standard streams and a built-in `help` command;
    /// see [`no_help`](Program::no_help).
    pub fn new<I, S>(name: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let arg0 = args.next();
        let program = if name.is_empty() {
            arg0.unwrap_or_default()
        } else {
            name.to_string()
        };

        let mut registry = Registry::new();
        registry.register(help::help_definition());

        Self {
            input: Input {
                program,
                arguments: args.collect(),
                stdin: Some(Reader::stdin()),
                stdout: Some(Writer::stdout()),
                stderr: Some(Writer::stderr()),
                global_usage: None,
            },
            registry,
        }
    }

    /// Creates a program from the process arguments.
    pub fn from_env(name: &str) -> Self {
        Self::new(name, std::env::args())
    }

    /// Sets the global usage template. See [`Input::global_usage`].
    pub fn usage(mut self, template: impl Into<String>) -> Self {
        self.input.global_usage = Some(template.into());
        self
    }

    /// Unregisters the built-in `help` command.
    pub fn no_help(mut self) -> Self {
        self.registry.remove(HELP);
        self
    }

    /// Replaces standard input.
    pub fn stdin(mut self, stdin: Reader) -> Self {
        self.input.stdin = Some(stdin);
        self
    }

    /// Replaces standard output.
    pub fn stdout(mut self, stdout: Writer) -> Self {
        self.input.stdout = Some(stdout);
        self
    }

    /// Replaces standard error.
    pub fn stderr(mut self, stderr: Writer) -> Self {
        self.input.stderr = Some(stderr);
        self
    }

    /// Drops standard error. Usage messages and diagnostics from
    /// [`main`](Program::main) are then discarded.
    pub fn no_stderr(mut self) -> Self {
        self.input.stderr = None;
        self
    }

    /// Registers a subcommand.
    ///
    /// # Panics
    ///
    /// See [`Registry::register`].
    #[track_caller]
    pub fn register(&mut self, def: Definition) -> &mut Self {
        self.registry.register(def);
        self
    }

    /// The process-wide input, with the subcommand name still first.
    pub fn input(&self) -> &Input {
        &self.input
    }

    /// Every registered command, `help` included unless removed.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns whether `name` is a registered subcommand.
    pub fn has(&self, name: &str) -> bool {
        self.registry.has(name)
    }

    /// Looks up the definition registered as `name`.
    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.registry.get(name)
    }

    /// Writes the global usage message to `w`.
    pub fn write_usage<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        help::write_global_usage(w, &self.input, &self.registry)
    }

    /// Writes the global usage message to standard error, or nothing when
    /// no standard error is configured.
    pub fn print_usage(&self) {
        self.report(|w| self.write_usage(w));
    }

    /// Resolves the first argument to a registered subcommand.
    ///
    /// Returns its name and the input to run it with, or `None` when there
    /// are no arguments or the first one is not registered.
    pub fn prepare(&self) -> Option<(String, Input)> {
        let name = self.input.arguments.first()?;
        if !self.registry.has(name) {
            debug!(command = %name, "could not resolve subcommand");
            return None;
        }
        Some((name.clone(), self.input.shifted()))
    }

    /// Runs the subcommand `name` with `input`.
    ///
    /// Fails with [`Error::UnknownCommand`] if `name` is not registered.
    pub fn run_with_input(&self, name: &str, input: Input) -> Result<()> {
        let Some((def, mut command)) = self
            .registry
            .get(name)
            .and_then(|def| def.instantiate().map(|command| (def, command)))
        else {
            return Err(Error::unknown_command(name));
        };

        let mut flags = FlagSet::new(self.input.program.clone());
        command.set_flags(&mut flags);
        debug!(command = name, args = ?input.arguments, flags = flags.len(), "running subcommand");

        let opt = Options::new(input, flags, def, &self.registry);
        command.run(opt).map_err(Error::from_command)
    }

    /// Runs `name` with the program's arguments minus the first one.
    pub fn run(&self, name: &str) -> Result<()> {
        self.run_with_input(name, self.input.shifted())
    }

    /// Entry point: runs the subcommand named by the first argument and
    /// reports problems on standard error.
    ///
    /// - No arguments: runs `help`, or prints the global usage if `help`
    ///   was removed.
    /// - Unknown command: prints `unknown command "name"` and the global
    ///   usage.
    /// - [`Error::HelpRequested`]: prints the command's usage.
    /// - Any other error: prints the error.
    ///
    /// Never exits the process; use [`main_status`](Program::main_status)
    /// to pick an exit code.
    pub fn main(&self) {
        self.main_status();
    }

    /// Like [`main`](Program::main), returning which outcome was reached.
    pub fn main_status(&self) -> Outcome {
        let Some(name) = self.input.arguments.first() else {
            if !self.registry.has(HELP) {
                self.print_usage();
                return Outcome::UsagePrinted;
            }
            return self.dispatch(HELP);
        };

        if !self.registry.has(name) {
            debug!(command = %name, "unknown command");
            self.report(|w| {
                writeln!(w, "{}", Error::unknown_command(name.as_str()))?;
                self.write_usage(w)
            });
            return Outcome::UnknownCommand;
        }

        self.dispatch(name)
    }

    fn dispatch(&self, name: &str) -> Outcome {
        match self.run(name) {
            Ok(()) => Outcome::Success,
            Err(Error::HelpRequested) => {
                if let Some(def) = self.registry.get(name) {
                    self.report(|w| self.input.write_usage_of(w, def));
                }
                Outcome::HelpPrinted
            }
            Err(err) => {
                debug!(command = name, error = %err, "subcommand failed");
                self.report(|w| Ok(writeln!(w, "{err:#}")?));
                Outcome::Failed
            }
        }
    }

    /// Writes a diagnostic to standard error, if one is configured.
    fn report<F>(&self, f: F)
    where
        F: FnOnce(&mut Writer) -> Result<()>,
    {
        let Some(mut stderr) = self.input.stderr.clone() else {
            return;
        };
        if let Err(err) = f(&mut stderr) {
            warn!(error = %err, "failed to write to standard error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::io::Buffer;

    struct Noop;

    impl Command for Noop {
        fn run(&mut self, _opt: Options<'_>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_new_separates_argument_zero() {
        let program = Program::new("", ["prog", "echo", "hi"]);
        assert_eq!(program.input().program, "prog");
        assert_eq!(program.input().arguments, vec!["echo", "hi"]);
    }

    #[test]
    fn test_new_explicit_name_wins() {
        let program = Program::new("tool", ["/usr/bin/tool-bin", "x"]);
        assert_eq!(program.input().program, "tool");
        assert_eq!(program.input().arguments, vec!["x"]);
    }

    #[test]
    fn test_new_without_arguments() {
        let program = Program::new("", Vec::<String>::new());
        assert_eq!(program.input().program, "");
        assert!(program.input().arguments.is_empty());
    }

    #[test]
    fn test_help_registered_by_default() {
        let program = Program::new("prog", ["prog"]);
        assert!(program.has(HELP));
        assert!(!program.no_help().has(HELP));
    }

    #[test]
    fn test_register_chains() {
        let mut program = Program::new("prog", ["prog"]);
        program
            .register(Definition::new("a").factory(|| Noop))
            .register(Definition::new("b").factory(|| Noop));
        assert_eq!(program.registry().names().collect::<Vec<_>>(), ["a", "b", "help"]);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_register_help_twice_panics() {
        let mut program = Program::new("prog", ["prog"]);
        program.register(Definition::new(HELP).factory(|| Noop));
    }

    #[test]
    fn test_run_with_input_unknown() {
        let program = Program::new("prog", ["prog"]);
        let err = program
            .run_with_input("bogus", Input::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownCommand { ref name } if name == "bogus"));
    }

    #[test]
    fn test_main_without_stderr_stays_silent() {
        let stdout = Buffer::new();
        let program = Program::new("prog", ["prog", "bogus"])
            .stdout(stdout.writer())
            .no_stderr();

        assert_eq!(program.main_status(), Outcome::UnknownCommand);
        assert!(stdout.is_empty());
    }

    #[test]
    fn test_print_usage() {
        let stderr = Buffer::new();
        let program = Program::new("prog", ["prog"]).stderr(stderr.writer());
        program.print_usage();
        assert!(stderr.contents().starts_with("Usage: prog <command>\n"));

        let silent = Program::new("prog", ["prog"]).no_stderr();
        assert!(silent.input().stderr.is_none());
        silent.print_usage();
    }

    #[test]
    fn test_outcome_exit_codes() {
        assert_eq!(Outcome::Success.exit_code(), 0);
        assert_eq!(Outcome::HelpPrinted.exit_code(), 0);
        assert_eq!(Outcome::Failed.exit_code(), 1);
        assert_eq!(Outcome::UnknownCommand.exit_code(), 2);
        assert_eq!(Outcome::UsagePrinted.exit_code(), 2);
        assert!(!Outcome::Failed.is_success());
    }
}
