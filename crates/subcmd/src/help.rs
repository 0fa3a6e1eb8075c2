//! Usage messages and the built-in `help` command.

use std::io::Write;

use minijinja::{context, Environment};
use serde::Serialize;

use crate::command::{Command, Definition};
use crate::error::{Error, Result};
use crate::flags::FlagSet;
use crate::input::Input;
use crate::options::Options;
use crate::registry::Registry;

/// Name of the built-in help command.
pub const HELP: &str = "help";

/// Global usage template used when none is configured.
pub const DEFAULT_GLOBAL_USAGE: &str =
    "Usage: {{ program }} <command>\n\nThe following commands are available:\n{{ commands }}";

/// One row of `command_list` in the global usage template context.
#[derive(Debug, Serialize)]
struct CommandEntry<'a> {
    name: &'a str,
    summary: &'a str,
    arguments: &'a str,
}

/// Renders the global usage template of `input` into `w`.
pub(crate) fn write_global_usage<W: Write + ?Sized>(
    w: &mut W,
    input: &Input,
    registry: &Registry,
) -> Result<()> {
    let mut summary = Vec::new();
    registry.write_summary(&mut summary)?;
    let commands = String::from_utf8_lossy(&summary);

    let command_list: Vec<CommandEntry<'_>> = registry
        .list()
        .into_iter()
        .map(|def| CommandEntry {
            name: &def.name,
            summary: &def.summary,
            arguments: &def.arguments,
        })
        .collect();

    let template = input
        .global_usage
        .as_deref()
        .unwrap_or(DEFAULT_GLOBAL_USAGE);
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    let rendered = env.render_str(
        template,
        context! {
            program => &input.program,
            commands => &commands,
            command_list => &command_list,
        },
    )?;

    w.write_all(rendered.as_bytes())?;
    Ok(())
}

/// Writes the detailed usage of one command: the usage line, the
/// description, and its flags when it declares any.
pub(crate) fn write_usage_of<W: Write + ?Sized>(
    w: &mut W,
    input: &Input,
    def: &Definition,
) -> Result<()> {
    let arguments = def.arguments.trim();
    if arguments.is_empty() {
        writeln!(w, "Usage: {} {}", input.program, def.name)?;
    } else {
        writeln!(w, "Usage: {} {} {}", input.program, def.name, arguments)?;
    }

    let description = def.description.trim();
    if !description.is_empty() {
        write!(w, "\n{description}\n")?;
    }

    if let Some(command) = def.instantiate() {
        let mut flags = FlagSet::new(input.program.clone());
        command.set_flags(&mut flags);
        if !flags.is_empty() {
            write!(w, "\nFlags:\n")?;
            flags.write_defaults(w)?;
            writeln!(w)?;
        }
    }
    Ok(())
}

impl Input {
    /// Writes the detailed usage of `def` to `w`.
    pub fn write_usage_of<W: Write + ?Sized>(&self, w: &mut W, def: &Definition) -> Result<()> {
        write_usage_of(w, self, def)
    }
}

pub(crate) fn help_definition() -> Definition {
    Definition::new(HELP)
        .summary("Display help.")
        .arguments("[command]")
        .description("Displays help for a command, or general help if no command is given.")
        .factory(|| HelpCommand)
}

struct HelpCommand;

impl Command for HelpCommand {
    fn run(&mut self, opt: Options<'_>) -> anyhow::Result<()> {
        let flags = opt.parse_flags()?;
        let mut stderr = opt.stderr();

        match flags.arg(0).filter(|name| !name.is_empty()) {
            Some(name) => match opt.registry().get(name) {
                Some(def) => opt.write_usage_of(&mut stderr, def)?,
                None => {
                    writeln!(stderr, "{}", Error::unknown_command(name))?;
                    writeln!(stderr, "The following commands are available:")?;
                    opt.registry().write_summary(&mut stderr)?;
                }
            },
            None => opt.write_global_usage(&mut stderr)?,
        }
        Ok(())
    }
}
