//! Arguments and stream handles passed down to subcommands.

use std::io;

use crate::io::{Reader, Writer};

/// Inputs to a program or subcommand.
///
/// A [`Program`](crate::Program) owns the process-wide input; each
/// subcommand receives a copy whose `arguments` start after the subcommand
/// name. Copies share the same I/O handles.
#[derive(Debug, Clone, Default)]
pub struct Input {
    /// Name of the program, e.g. the first process argument.
    pub program: String,

    /// Arguments to the program, or to the subcommand.
    pub arguments: Vec<String>,

    /// Standard input. `None` reads as empty.
    pub stdin: Option<Reader>,

    /// Standard output. `None` discards output.
    pub stdout: Option<Writer>,

    /// Standard error. `None` discards diagnostics and usage messages.
    pub stderr: Option<Writer>,

    /// Template for the global usage message, rendered with minijinja.
    ///
    /// Variables: `program`, `commands` (the formatted command list), and
    /// `command_list` (entries with `name`, `summary` and `arguments`).
    /// `None` selects [`DEFAULT_GLOBAL_USAGE`](crate::DEFAULT_GLOBAL_USAGE).
    pub global_usage: Option<String>,
}

impl Input {
    /// A copy with the first argument removed.
    pub fn shifted(&self) -> Input {
        let mut input = self.clone();
        if !input.arguments.is_empty() {
            input.arguments.remove(0);
        }
        input
    }

    /// The standard input handle, or an empty reader.
    pub fn stdin(&self) -> Reader {
        self.stdin
            .clone()
            .unwrap_or_else(|| Reader::new(io::empty()))
    }

    /// The standard output handle, or a sink.
    pub fn stdout(&self) -> Writer {
        self.stdout
            .clone()
            .unwrap_or_else(|| Writer::new(io::sink()))
    }

    /// The standard error handle, or a sink.
    pub fn stderr(&self) -> Writer {
        self.stderr
            .clone()
            .unwrap_or_else(|| Writer::new(io::sink()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Buffer;
    use std::io::Write;

    #[test]
    fn test_shifted_drops_first_argument() {
        let input = Input {
            program: "prog".into(),
            arguments: vec!["echo".into(), "hi".into(), "there".into()],
            ..Default::default()
        };
        let shifted = input.shifted();
        assert_eq!(shifted.program, "prog");
        assert_eq!(shifted.arguments, vec!["hi", "there"]);
        assert_eq!(input.arguments.len(), 3);
    }

    #[test]
    fn test_shifted_empty_arguments() {
        assert!(Input::default().shifted().arguments.is_empty());
    }

    #[test]
    fn test_shifted_shares_handles() {
        let buffer = Buffer::new();
        let input = Input {
            stdout: Some(buffer.writer()),
            ..Default::default()
        };
        write!(input.shifted().stdout(), "shared").unwrap();
        assert_eq!(buffer.contents(), "shared");
    }

    #[test]
    fn test_missing_handles_fall_back() {
        let input = Input::default();
        assert_eq!(input.stdin().read_all().unwrap(), "");
        write!(input.stderr(), "dropped").unwrap();
    }
}
