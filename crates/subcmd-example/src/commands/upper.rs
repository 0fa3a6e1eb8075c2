use std::io::{Read, Write};

use subcmd::{Command, Definition, FlagSet, Options};
use tracing::debug;

#[derive(Default)]
pub struct Upper;

impl Command for Upper {
    fn set_flags(&self, flags: &mut FlagSet) {
        flags.bool("trim", false, "Strip surrounding whitespace first.");
    }

    fn run(&mut self, opt: Options<'_>) -> anyhow::Result<()> {
        let flags = opt.parse_flags()?;
        if let Some(extra) = flags.arg(0) {
            anyhow::bail!("upper takes no arguments, got {extra:?}");
        }

        let mut text = String::new();
        opt.stdin().read_to_string(&mut text)?;
        debug!(bytes = text.len(), "read standard input");

        let text = if flags.get_bool("trim") {
            text.trim()
        } else {
            text.as_str()
        };
        write!(opt.stdout(), "{}", text.to_uppercase())?;
        Ok(())
    }
}

pub fn definition() -> Definition {
    Definition::new("upper")
        .summary("Uppercase standard input.")
        .arguments("[--trim]")
        .factory(Upper::default)
}
