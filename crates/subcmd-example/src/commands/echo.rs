use std::io::Write;

use subcmd::{Command, Definition, FlagSet, Options};

#[derive(Default)]
pub struct Echo;

impl Command for Echo {
    fn set_flags(&self, flags: &mut FlagSet) {
        flags.bool("n", false, "Do not print the trailing newline.");
    }

    fn run(&mut self, opt: Options<'_>) -> anyhow::Result<()> {
        let flags = opt.parse_flags()?;
        let mut out = opt.stdout();
        write!(out, "{}", flags.args().join(" "))?;
        if !flags.get_bool("n") {
            writeln!(out)?;
        }
        Ok(())
    }
}

pub fn definition() -> Definition {
    Definition::new("echo")
        .summary("Print arguments.")
        .arguments("[-n] [TEXT...]")
        .description("Writes the arguments to standard output, separated by spaces.")
        .factory(Echo::default)
}
