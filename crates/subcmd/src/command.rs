//! The subcommand contract and its static description.

use std::fmt;
use std::rc::Rc;

use crate::flags::FlagSet;
use crate::options::Options;

/// An instance of a subcommand.
///
/// A fresh instance is created through the [`Definition`] factory for every
/// invocation and dropped once [`run`](Command::run) returns.
///
/// # Example
///
/// ```rust
/// use subcmd::{Command, FlagSet, Options};
/// use std::io::Write;
///
/// #[derive(Default)]
/// struct Echo;
///
/// impl Command for Echo {
///     fn set_flags(&self, flags: &mut FlagSet) {
///         flags.bool("n", false, "Suppress trailing newline.");
///     }
///
///     fn run(&mut self, opt: Options<'_>) -> anyhow::Result<()> {
///         let flags = opt.parse_flags()?;
///         let mut out = opt.stdout();
///         write!(out, "{}", flags.args().join(" "))?;
///         if !flags.get_bool("n") {
///             writeln!(out)?;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Command {
    /// Declares the flags this command accepts.
    ///
    /// Optional. A command that declares nothing takes only positional
    /// arguments and its usage has no flags section.
    fn set_flags(&self, flags: &mut FlagSet) {
        let _ = flags;
    }

    /// Executes the command.
    ///
    /// Returning [`Error::HelpRequested`](crate::Error::HelpRequested), for
    /// example by propagating [`Options::parse_flags`] with `?`, makes
    /// [`Program::main`](crate::Program::main) print this command's usage.
    fn run(&mut self, opt: Options<'_>) -> anyhow::Result<()>;
}

/// Produces a new command instance.
pub type Factory = Rc<dyn Fn() -> Box<dyn Command>>;

/// Describes a subcommand.
///
/// Built once at startup and handed to
/// [`Program::register`](crate::Program::register); never mutated after.
#[derive(Clone, Default)]
pub struct Definition {
    /// The name the command is invoked by.
    pub name: String,
    /// One-line description shown in the command list.
    pub summary: String,
    /// Arguments shown after the name in the usage line, e.g. `[-n] [TEXT...]`.
    pub arguments: String,
    /// Detailed description shown by `help <name>`.
    pub description: String,
    /// Creates a fresh instance of the command.
    pub factory: Option<Factory>,
}

impl Definition {
    /// Starts a definition with only a name. Set a factory before
    /// registering it.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the one-line summary.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Sets the argument synopsis shown in the usage line.
    pub fn arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = arguments.into();
        self
    }

    /// Sets the detailed description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the factory from a closure returning a concrete command type.
    pub fn factory<C, F>(mut self, f: F) -> Self
    where
        C: Command + 'static,
        F: Fn() -> C + 'static,
    {
        self.factory = Some(Rc::new(move || Box::new(f()) as Box<dyn Command>));
        self
    }

    /// Creates a new command instance, or `None` if no factory is set.
    pub fn instantiate(&self) -> Option<Box<dyn Command>> {
        self.factory.as_ref().map(|factory| factory())
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .field("arguments", &self.arguments)
            .field("description", &self.description)
            .field("factory", &self.factory.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl Command for Noop {
        fn run(&mut self, _opt: Options<'_>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_definition_builder() {
        let def = Definition::new("sync")
            .summary("Synchronize.")
            .arguments("[PATH]")
            .description("Synchronizes the given path.")
            .factory(|| Noop);

        assert_eq!(def.name, "sync");
        assert_eq!(def.summary, "Synchronize.");
        assert_eq!(def.arguments, "[PATH]");
        assert_eq!(def.description, "Synchronizes the given path.");
        assert!(def.instantiate().is_some());
    }

    #[test]
    fn test_definition_without_factory() {
        let def = Definition::new("empty");
        assert!(def.instantiate().is_none());
        assert!(format!("{def:?}").contains("factory: false"));
    }

    #[test]
    fn test_default_set_flags_declares_nothing() {
        let mut flags = FlagSet::new("prog");
        Noop.set_flags(&mut flags);
        assert!(flags.is_empty());
    }
}
