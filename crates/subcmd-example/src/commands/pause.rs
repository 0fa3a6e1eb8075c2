use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use subcmd::{format_duration, Command, Definition, FlagSet, Options};
use tracing::info;

#[derive(Default)]
pub struct Pause;

impl Command for Pause {
    fn set_flags(&self, flags: &mut FlagSet) {
        flags
            .duration("d", Duration::from_secs(1), "How long to wait.")
            .bool("dry-run", false, "Print the duration instead of waiting.");
    }

    fn run(&mut self, opt: Options<'_>) -> anyhow::Result<()> {
        let flags = opt.parse_flags()?;
        let wait = flags
            .get_duration("d")
            .context("duration flag has no value")?;

        if flags.get_bool("dry-run") {
            writeln!(opt.stdout(), "would wait {}", format_duration(wait))?;
            return Ok(());
        }

        info!(wait = %format_duration(wait), "pausing");
        std::thread::sleep(wait);
        Ok(())
    }
}

pub fn definition() -> Definition {
    Definition::new("pause")
        .summary("Wait for a while.")
        .arguments("[-d DURATION] [--dry-run]")
        .description("Sleeps for the given duration, one second by default.")
        .factory(Pause::default)
}
