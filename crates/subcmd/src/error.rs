//! Run-time errors.
//!
//! Registration mistakes are not represented here: they panic, since they
//! can only come from a misconfigured program. Everything a user can cause
//! from the command line is an [`Error`] value.

use thiserror::Error;

/// Errors produced while resolving, parsing or running a subcommand.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested name is not a registered subcommand.
    #[error("unknown command {name:?}")]
    UnknownCommand {
        /// The name that was looked up.
        name: String,
    },

    /// Flag parsing hit `-h` or `--help`.
    ///
    /// [`Program::main`](crate::Program::main) prints the usage of the
    /// running command instead of reporting this as a failure.
    #[error("help requested")]
    HelpRequested,

    /// The arguments did not match the declared flags.
    #[error("{0}")]
    Flag(String),

    /// The global usage template could not be rendered.
    #[error("usage template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Writing usage or diagnostics failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Any other failure returned by a command.
    #[error(transparent)]
    Command(anyhow::Error),
}

impl Error {
    /// Creates an unknown-command error for `name`.
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Error::UnknownCommand { name: name.into() }
    }

    /// Returns true if this is the help-requested sentinel.
    pub fn is_help_requested(&self) -> bool {
        matches!(self, Error::HelpRequested)
    }

    /// Recovers an [`Error`] that travelled through `anyhow`, wrapping
    /// anything else as [`Error::Command`].
    pub(crate) fn from_command(err: anyhow::Error) -> Self {
        match err.downcast::<Error>() {
            Ok(err) => err,
            Err(other) => Error::Command(other),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
