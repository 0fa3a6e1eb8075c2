//! Per-subcommand flag scope, bound to clap.
//!
//! A [`FlagSet`] collects flag declarations and builds a `clap::Command`
//! from them when parsing or printing defaults. Parsing yields [`Flags`],
//! which exposes typed values and the remaining positional arguments.
//!
//! # Flag syntax
//!
//! - A single-character name is a short flag: `-n`.
//! - A longer name is a long flag: `--count 3` or `--count=3`.
//! - Boolean flags take no value (`-n`) but accept an explicit one with `=`
//!   (`-n=false`).
//! - Parsing stops at the first positional argument. It and everything after
//!   it, flags included, are remaining arguments, as is everything after `--`.
//! - Flags that take a value consume the next argument even when it starts
//!   with `-`: `--pattern -foo`.
//! - `-h` and `--help` yield [`Error::HelpRequested`] unless the command
//!   declares a flag of that name itself.

use std::ffi::OsString;
use std::io::{self, Write};
use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice};

use crate::error::{Error, Result};

/// Id of the catch-all positional holding the remaining arguments.
const ARGS_ID: &str = "subcmd-remaining-args";
const HELP_ID: &str = "subcmd-help";

/// Declares the flags of one subcommand.
#[derive(Debug, Clone)]
pub struct FlagSet {
    name: String,
    args: Vec<Arg>,
}

impl FlagSet {
    /// Creates an empty flag set. `name` appears in clap's own messages.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Returns true if no flags have been declared.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Number of declared flags.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Declares a boolean flag.
    pub fn bool(&mut self, name: &str, default: bool, usage: &str) -> &mut Self {
        let arg = flag(name, usage)
            .action(ArgAction::Set)
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true")
            .default_value(if default { "true" } else { "false" })
            .hide_default_value(!default)
            .value_name("BOOL")
            .value_parser(BoolishValueParser::new());
        self.push(arg)
    }

    /// Declares a string flag. An empty default is not shown in usage.
    pub fn string(&mut self, name: &str, default: &str, usage: &str) -> &mut Self {
        let mut arg = flag(name, usage)
            .action(ArgAction::Set)
            .allow_hyphen_values(true)
            .value_name("STRING");
        if !default.is_empty() {
            arg = arg.default_value(default.to_string());
        }
        self.push(arg)
    }

    /// Declares a signed integer flag.
    pub fn int(&mut self, name: &str, default: i64, usage: &str) -> &mut Self {
        let arg = flag(name, usage)
            .action(ArgAction::Set)
            .default_value(default.to_string())
            .hide_default_value(default == 0)
            .allow_negative_numbers(true)
            .value_name("INT")
            .value_parser(value_parser!(i64));
        self.push(arg)
    }

    /// Declares an unsigned integer flag.
    pub fn uint(&mut self, name: &str, default: u64, usage: &str) -> &mut Self {
        let arg = flag(name, usage)
            .action(ArgAction::Set)
            .default_value(default.to_string())
            .hide_default_value(default == 0)
            .value_name("UINT")
            .value_parser(value_parser!(u64));
        self.push(arg)
    }

    /// Declares a floating-point flag.
    pub fn float(&mut self, name: &str, default: f64, usage: &str) -> &mut Self {
        let arg = flag(name, usage)
            .action(ArgAction::Set)
            .default_value(default.to_string())
            .hide_default_value(default == 0.0)
            .allow_negative_numbers(true)
            .value_name("FLOAT")
            .value_parser(value_parser!(f64));
        self.push(arg)
    }

    /// Declares a duration flag, written like `90s`, `1h30m` or `250ms`.
    pub fn duration(&mut self, name: &str, default: Duration, usage: &str) -> &mut Self {
        let arg = flag(name, usage)
            .action(ArgAction::Set)
            .default_value(format_duration(default))
            .hide_default_value(default.is_zero())
            .allow_hyphen_values(true)
            .value_name("DURATION")
            .value_parser(parse_duration);
        self.push(arg)
    }

    /// Declares a flag whose every occurrence is checked by `validate`.
    ///
    /// The flag may be repeated; [`Flags::get_func`] returns all accepted
    /// values in order. A rejected value fails parsing with the message
    /// returned by `validate`.
    pub fn func<F>(&mut self, name: &str, usage: &str, validate: F) -> &mut Self
    where
        F: Fn(&str) -> std::result::Result<(), String> + Clone + Send + Sync + 'static,
    {
        let parser = move |value: &str| validate(value).map(|()| value.to_string());
        let arg = flag(name, usage)
            .action(ArgAction::Append)
            .allow_hyphen_values(true)
            .value_name("VALUE")
            .value_parser(parser);
        self.push(arg)
    }

    /// Declares an arbitrary clap argument.
    ///
    /// For value types the typed helpers don't cover; read the value back
    /// with [`Flags::get`].
    pub fn var(&mut self, arg: Arg) -> &mut Self {
        self.push(arg)
    }

    fn push(&mut self, arg: Arg) -> &mut Self {
        self.args.push(arg);
        self
    }

    /// The hidden `-h`/`--help` argument, minus whichever spelling a
    /// declared flag already uses.
    fn help_arg(&self) -> Option<Arg> {
        let short = !self.args.iter().any(|arg| arg.get_short() == Some('h'));
        let long = !self.args.iter().any(|arg| arg.get_long() == Some("help"));
        if !short && !long {
            return None;
        }
        let mut arg = Arg::new(HELP_ID).action(ArgAction::Help).hide(true);
        if short {
            arg = arg.short('h');
        }
        if long {
            arg = arg.long("help");
        }
        Some(arg)
    }

    fn command(&self) -> clap::Command {
        let command = clap::Command::new(self.name.clone())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .disable_help_subcommand(true)
            .args_override_self(true)
            .color(ColorChoice::Never)
            .args(self.args.iter().cloned())
            .arg(
                Arg::new(ARGS_ID)
                    .action(ArgAction::Append)
                    .num_args(1..)
                    .trailing_var_arg(true)
                    .value_name("ARGS")
                    .hide(true),
            );
        match self.help_arg() {
            Some(help) => command.arg(help),
            None => command,
        }
    }

    /// Parses `args` against the declared flags.
    pub fn parse<I, S>(&self, args: I) -> Result<Flags>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        match self.command().try_get_matches_from(args) {
            Ok(matches) => Ok(Flags::new(matches)),
            Err(err) if err.kind() == ErrorKind::DisplayHelp => Err(Error::HelpRequested),
            Err(err) => Err(Error::Flag(describe(&err))),
        }
    }

    /// Writes one entry per declared flag: its name, usage and non-zero
    /// default.
    pub fn write_defaults<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        let help = self
            .command()
            .help_template("{options}")
            .render_help()
            .to_string();
        writeln!(w, "{}", help.trim_end_matches('\n'))
    }
}

fn flag(name: &str, usage: &str) -> Arg {
    assert!(!name.is_empty(), "flag name must not be empty");
    let arg = Arg::new(name.to_string()).help(usage.to_string());
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(short), None) => arg.short(short),
        _ => arg.long(name.to_string()),
    }
}

/// First line of clap's rendered error, without the `error: ` prefix or
/// the usage block that follows it.
fn describe(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

/// Parsed flag values and remaining arguments.
#[derive(Debug, Clone)]
pub struct Flags {
    matches: ArgMatches,
    args: Vec<String>,
}

impl Flags {
    fn new(matches: ArgMatches) -> Self {
        let args = matches
            .try_get_many::<String>(ARGS_ID)
            .ok()
            .flatten()
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        Self { matches, args }
    }

    /// Value of a [`FlagSet::bool`] flag; false if undeclared.
    pub fn get_bool(&self, name: &str) -> bool {
        self.get::<bool>(name).unwrap_or(false)
    }

    /// Value of a [`FlagSet::string`] flag; empty if unset.
    pub fn get_string(&self, name: &str) -> String {
        self.get::<String>(name).unwrap_or_default()
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name)
    }

    pub fn get_uint(&self, name: &str) -> Option<u64> {
        self.get(name)
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name)
    }

    pub fn get_duration(&self, name: &str) -> Option<Duration> {
        self.get(name)
    }

    /// All values accepted for a [`FlagSet::func`] flag, in order.
    pub fn get_func(&self, name: &str) -> Vec<String> {
        self.matches
            .try_get_many::<String>(name)
            .ok()
            .flatten()
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    }

    /// Typed value of any flag. `None` if the flag is undeclared, unset,
    /// or holds a different type.
    pub fn get<T>(&self, name: &str) -> Option<T>
    where
        T: std::any::Any + Clone + Send + Sync + 'static,
    {
        self.matches.try_get_one::<T>(name).ok().flatten().cloned()
    }

    /// Returns true if the flag was given on the command line rather than
    /// taken from its default.
    pub fn is_set(&self, name: &str) -> bool {
        self.matches.try_contains_id(name).unwrap_or(false)
            && self.matches.value_source(name) == Some(ValueSource::CommandLine)
    }

    /// Arguments remaining after the flags.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The `i`th remaining argument.
    pub fn arg(&self, i: usize) -> Option<&str> {
        self.args.get(i).map(String::as_str)
    }

    /// The underlying clap matches.
    pub fn matches(&self) -> &ArgMatches {
        &self.matches
    }
}

/// Parses a duration such as `300ms`, `1.5h` or `2h45m`.
///
/// Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare `0`
/// is accepted; any other number needs a unit.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let invalid = || format!("invalid duration {s:?}");
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    let mut rest = s;
    while !rest.is_empty() {
        let (int_part, after) = split_digits(rest);
        let (frac_part, after) = match after.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", after),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }

        let unit_len = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, next) = after.split_at(unit_len);
        let unit_nanos: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 3_600 * 1_000_000_000,
            "" => return Err(format!("missing unit in duration {s:?}")),
            other => return Err(format!("unknown unit {other:?} in duration {s:?}")),
        };

        let int: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| invalid())?
        };
        let mut value = int.checked_mul(unit_nanos).ok_or_else(invalid)?;
        if !frac_part.is_empty() {
            // Digits past the 20th cannot change the result at nanosecond precision.
            let digits = &frac_part[..frac_part.len().min(20)];
            let frac: u128 = digits.parse().map_err(|_| invalid())?;
            let scale = 10u128.pow(digits.len() as u32);
            value = value
                .checked_add(frac * unit_nanos / scale)
                .ok_or_else(invalid)?;
        }
        total = total.checked_add(value).ok_or_else(invalid)?;
        rest = next;
    }

    let secs = u64::try_from(total / 1_000_000_000).map_err(|_| invalid())?;
    Ok(Duration::new(secs, (total % 1_000_000_000) as u32))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Formats a duration so that [`parse_duration`] reads it back unchanged.
pub fn format_duration(d: Duration) -> String {
    if d.is_zero() {
        return "0s".to_string();
    }
    let nanos = d.as_nanos();
    if nanos < 1_000_000_000 {
        return if nanos % 1_000_000 == 0 {
            format!("{}ms", nanos / 1_000_000)
        } else if nanos % 1_000 == 0 {
            format!("{}µs", nanos / 1_000)
        } else {
            format!("{nanos}ns")
        };
    }

    let secs = d.as_secs();
    let (hours, minutes, seconds) = (secs / 3_600, (secs % 3_600) / 60, secs % 60);
    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    match d.subsec_nanos() {
        0 => out.push_str(&format!("{seconds}s")),
        frac => {
            let frac = format!("{frac:09}");
            out.push_str(&format!("{seconds}.{}s", frac.trim_end_matches('0')));
        }
    }
    out
}
