//! In-process test harness for programs built with `subcmd`.
//!
//! A [`TestHarness`] builds a [`Program`] from a list of arguments, routes
//! its standard streams to in-memory buffers, runs it through
//! [`Program::main_status`] and hands back a [`TestResult`]. Nothing touches
//! the real process streams, so tests can run in parallel.
//!
//! ```rust
//! use std::io::Write;
//! use subcmd::{Command, Definition, Options};
//! use subcmd_test::TestHarness;
//!
//! struct Hello;
//!
//! impl Command for Hello {
//!     fn run(&mut self, opt: Options<'_>) -> anyhow::Result<()> {
//!         writeln!(opt.stdout(), "hello")?;
//!         Ok(())
//!     }
//! }
//!
//! let result = TestHarness::new().run(&["hello"], |program| {
//!     program.register(Definition::new("hello").factory(|| Hello));
//! });
//! result.assert_success();
//! result.assert_stdout_eq("hello\n");
//! ```

use subcmd::{Buffer, Outcome, Program, Reader};

/// Default program name used as argument zero.
pub const PROGRAM: &str = "prog";

/// Builder for one captured program run.
#[derive(Debug, Clone)]
pub struct TestHarness {
    program: String,
    stdin: String,
    usage: Option<String>,
    help: bool,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self {
            program: PROGRAM.to_string(),
            stdin: String::new(),
            usage: None,
            help: true,
        }
    }
}

impl TestHarness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the program name seen by commands and usage text.
    pub fn program(mut self, name: impl Into<String>) -> Self {
        self.program = name.into();
        self
    }

    /// Sets what the program reads from standard input.
    pub fn stdin(mut self, content: impl Into<String>) -> Self {
        self.stdin = content.into();
        self
    }

    /// Sets the global usage template.
    pub fn usage(mut self, template: impl Into<String>) -> Self {
        self.usage = Some(template.into());
        self
    }

    /// Runs without the built-in `help` command.
    pub fn no_help(mut self) -> Self {
        self.help = false;
        self
    }

    /// Builds a program over `args` (without argument zero), lets `setup`
    /// register its commands, and runs it.
    pub fn run<F>(&self, args: &[&str], setup: F) -> TestResult
    where
        F: FnOnce(&mut Program),
    {
        let stdout = Buffer::new();
        let stderr = Buffer::new();

        let argv = std::iter::once(self.program.as_str()).chain(args.iter().copied());
        let mut program = Program::new(&self.program, argv)
            .stdin(Reader::from_string(self.stdin.clone()))
            .stdout(stdout.writer())
            .stderr(stderr.writer());
        if let Some(template) = &self.usage {
            program = program.usage(template.clone());
        }
        if !self.help {
            program = program.no_help();
        }
        setup(&mut program);

        let outcome = program.main_status();
        TestResult {
            stdout: stdout.contents(),
            stderr: stderr.contents(),
            outcome,
        }
    }
}

/// What a captured run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    pub stdout: String,
    pub stderr: String,
    pub outcome: Outcome,
}

impl TestResult {
    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }

    #[track_caller]
    pub fn assert_success(&self) {
        assert!(
            self.outcome.is_success(),
            "expected success, got {:?}\nstdout:\n{}\nstderr:\n{}",
            self.outcome,
            self.stdout,
            self.stderr
        );
    }

    #[track_caller]
    pub fn assert_outcome(&self, expected: Outcome) {
        assert_eq!(
            self.outcome, expected,
            "unexpected outcome\nstderr:\n{}",
            self.stderr
        );
    }

    #[track_caller]
    pub fn assert_stdout_eq(&self, expected: &str) {
        assert_eq!(self.stdout, expected, "stdout mismatch");
    }

    #[track_caller]
    pub fn assert_stdout_contains(&self, needle: &str) {
        assert!(
            self.stdout.contains(needle),
            "stdout does not contain {needle:?}:\n{}",
            self.stdout
        );
    }

    #[track_caller]
    pub fn assert_stderr_eq(&self, expected: &str) {
        assert_eq!(self.stderr, expected, "stderr mismatch");
    }

    #[track_caller]
    pub fn assert_stderr_contains(&self, needle: &str) {
        assert!(
            self.stderr.contains(needle),
            "stderr does not contain {needle:?}:\n{}",
            self.stderr
        );
    }
}
