//! The bundle handed to a running subcommand.

use std::io::Write;

use crate::command::Definition;
use crate::error::Result;
use crate::flags::{FlagSet, Flags};
use crate::help;
use crate::input::Input;
use crate::io::{Reader, Writer};
use crate::registry::Registry;

/// Input and flags passed to [`Command::run`](crate::Command::run).
#[derive(Debug)]
pub struct Options<'a> {
    /// Inputs to the subcommand. `arguments` holds the unprocessed
    /// arguments after the subcommand name.
    pub input: Input,

    /// The flags declared by the command's `set_flags` hook.
    pub flags: FlagSet,

    /// Definition of the running command.
    pub definition: &'a Definition,

    registry: &'a Registry,
}

impl<'a> Options<'a> {
    pub(crate) fn new(
        input: Input,
        flags: FlagSet,
        definition: &'a Definition,
        registry: &'a Registry,
    ) -> Self {
        Self {
            input,
            flags,
            definition,
            registry,
        }
    }

    /// Parses the declared flags against the input arguments.
    ///
    /// Propagate the error with `?`: a `-h` yields
    /// [`Error::HelpRequested`](crate::Error::HelpRequested), which the
    /// program turns into this command's usage message.
    pub fn parse_flags(&self) -> Result<Flags> {
        self.flags.parse(&self.input.arguments)
    }

    /// Every registered command, including this one.
    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Name of the program.
    pub fn program(&self) -> &str {
        &self.input.program
    }

    /// Unparsed arguments after the subcommand name.
    pub fn arguments(&self) -> &[String] {
        &self.input.arguments
    }

    /// Standard input, or an empty reader.
    pub fn stdin(&self) -> Reader {
        self.input.stdin()
    }

    /// Standard output, or a sink.
    pub fn stdout(&self) -> Writer {
        self.input.stdout()
    }

    /// Standard error, or a sink.
    pub fn stderr(&self) -> Writer {
        self.input.stderr()
    }

    /// Writes the program's global usage message to `w`.
    pub fn write_global_usage<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        help::write_global_usage(w, &self.input, self.registry)
    }

    /// Writes the detailed usage of `def` to `w`.
    pub fn write_usage_of<W: Write + ?Sized>(&self, w: &mut W, def: &Definition) -> Result<()> {
        help::write_usage_of(w, &self.input, def)
    }
}
