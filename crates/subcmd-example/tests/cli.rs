//! The demo program end to end, through the in-process harness.

use subcmd::Outcome;
use subcmd_example::{register, NAME};
use subcmd_test::{TestHarness, TestResult};

fn run(args: &[&str]) -> TestResult {
    TestHarness::new().program(NAME).run(args, register)
}

#[test]
fn echo_joins_arguments() {
    let result = run(&["echo", "hello", "world"]);
    result.assert_success();
    result.assert_stdout_eq("hello world\n");
}

#[test]
fn echo_without_newline() {
    run(&["echo", "-n", "hello"]).assert_stdout_eq("hello");
}

#[test]
fn echo_stops_flags_at_first_argument() {
    run(&["echo", "a", "-n"]).assert_stdout_eq("a -n\n");
}

#[test]
fn upper_reads_stdin() {
    let result = TestHarness::new()
        .stdin("  quiet please \n")
        .run(&["upper"], register);
    result.assert_success();
    result.assert_stdout_eq("  QUIET PLEASE \n");
}

#[test]
fn upper_trim() {
    TestHarness::new()
        .stdin("  quiet please \n")
        .run(&["upper", "--trim"], register)
        .assert_stdout_eq("QUIET PLEASE");
}

#[test]
fn upper_rejects_arguments() {
    let result = run(&["upper", "extra"]);
    result.assert_outcome(Outcome::Failed);
    result.assert_stderr_eq("upper takes no arguments, got \"extra\"\n");
}

#[test]
fn pause_dry_run_reports_duration() {
    run(&["pause", "--dry-run"]).assert_stdout_eq("would wait 1s\n");
    run(&["pause", "-d", "1500ms", "--dry-run"]).assert_stdout_eq("would wait 1.5s\n");
    run(&["pause", "-d=2m", "--dry-run"]).assert_stdout_eq("would wait 2m0s\n");
}

#[test]
fn pause_zero_returns_immediately() {
    let result = run(&["pause", "-d", "0"]);
    result.assert_success();
    assert!(result.stdout.is_empty());
}

#[test]
fn pause_rejects_bad_duration() {
    let result = run(&["pause", "-d", "soon"]);
    result.assert_outcome(Outcome::Failed);
    result.assert_stderr_contains("invalid duration \"soon\"");
}

#[test]
fn no_arguments_lists_commands() {
    let result = run(&[]);
    result.assert_success();
    result.assert_stderr_eq(
        "Usage: subcmd-demo <command>\n\
         \n\
         The following commands are available:\n\
         \techo     Print arguments.\n\
         \thelp     Display help.\n\
         \tpause    Wait for a while.\n\
         \tupper    Uppercase standard input.\n",
    );
}

#[test]
fn unknown_command_exits_with_usage_code() {
    let result = run(&["frobnicate"]);
    assert_eq!(result.exit_code(), 2);
    result.assert_stderr_contains("unknown command \"frobnicate\"\n");
    result.assert_stderr_contains("\tpause    Wait for a while.\n");
}

#[test]
fn help_for_pause_shows_flags() {
    let result = run(&["help", "pause"]);
    result.assert_success();
    result.assert_stderr_contains("Usage: subcmd-demo pause [-d DURATION] [--dry-run]\n");
    result.assert_stderr_contains("Sleeps for the given duration, one second by default.\n");
    result.assert_stderr_contains("Flags:\n");
    result.assert_stderr_contains("--dry-run");
    result.assert_stderr_contains("How long to wait.");
}

#[test]
fn dash_h_prints_command_usage() {
    let result = run(&["upper", "-h"]);
    result.assert_outcome(Outcome::HelpPrinted);
    result.assert_stderr_contains("Usage: subcmd-demo upper [--trim]\n");
    assert!(result.stdout.is_empty());
}
