//! Name → definition mapping.

use std::collections::BTreeMap;
use std::io::{self, Write};

use tracing::trace;
use unicode_width::UnicodeWidthStr;

use crate::command::Definition;

/// The set of registered subcommands.
///
/// Keys are unique and iteration is ordered by name, so listings and help
/// output are deterministic regardless of registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: BTreeMap<String, Definition>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `def` under its name.
    ///
    /// # Panics
    ///
    /// If the name is empty, the definition has no factory, or a command
    /// with the same name is already registered. These are mistakes in the
    /// program itself and should surface the first time it starts.
    #[track_caller]
    pub fn register(&mut self, def: Definition) {
        if def.name.is_empty() {
            panic!("cannot register a command with an empty name");
        }
        if def.factory.is_none() {
            panic!("command {:?} has no factory", def.name);
        }
        if self.definitions.contains_key(&def.name) {
            panic!("command {:?} is already registered", def.name);
        }
        trace!(command = %def.name, "registered command");
        self.definitions.insert(def.name.clone(), def);
    }

    /// Unregisters `name`, returning its definition if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Definition> {
        self.definitions.remove(name)
    }

    /// Returns whether `name` is a registered subcommand.
    pub fn has(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Looks up the definition registered as `name`.
    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    /// All definitions, sorted by name.
    pub fn list(&self) -> Vec<&Definition> {
        self.definitions.values().collect()
    }

    /// All names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Writes one line per command: a tab, the name padded to the widest
    /// registered name, four spaces, then the summary.
    pub fn write_summary<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        let width = self
            .definitions
            .keys()
            .map(|name| name.width())
            .max()
            .unwrap_or(0);
        for def in self.definitions.values() {
            let pad = width - def.name.width();
            writeln!(w, "\t{}{:pad$}    {}", def.name, "", def.summary)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::options::Options;
    use proptest::prelude::*;

    struct Noop;

    impl Command for Noop {
        fn run(&mut self, _opt: Options<'_>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn def(name: &str, summary: &str) -> Definition {
        Definition::new(name).summary(summary).factory(|| Noop)
    }

    fn summary_of(registry: &Registry) -> String {
        let mut out = Vec::new();
        registry.write_summary(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = Registry::new();
        registry.register(def("echo", "Display text."));

        assert!(registry.has("echo"));
        assert!(!registry.has("cat"));
        assert_eq!(registry.get("echo").unwrap().summary, "Display text.");
        assert!(registry.get("cat").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_register_duplicate_panics() {
        let mut registry = Registry::new();
        registry.register(def("echo", "first"));
        registry.register(def("echo", "second"));
    }

    #[test]
    #[should_panic(expected = "empty name")]
    fn test_register_empty_name_panics() {
        Registry::new().register(def("", "nameless"));
    }

    #[test]
    #[should_panic(expected = "has no factory")]
    fn test_register_missing_factory_panics() {
        Registry::new().register(Definition::new("ghost"));
    }

    #[test]
    fn test_remove() {
        let mut registry = Registry::new();
        registry.register(def("echo", ""));
        assert!(registry.remove("echo").is_some());
        assert!(registry.remove("echo").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_write_summary_pads_to_longest_name() {
        let mut registry = Registry::new();
        registry.register(def("help", "Display help."));
        registry.register(def("echo", "Display text."));
        registry.register(def("version", "Print the version."));

        assert_eq!(
            summary_of(&registry),
            "\techo       Display text.\n\
             \thelp       Display help.\n\
             \tversion    Print the version.\n"
        );
    }

    #[test]
    fn test_write_summary_empty_registry() {
        assert_eq!(summary_of(&Registry::new()), "");
    }

    proptest! {
        #[test]
        fn prop_list_is_sorted(names in proptest::collection::hash_set("[a-z][a-z0-9-]{0,11}", 0..24)) {
            let mut registry = Registry::new();
            for name in &names {
                registry.register(def(name, ""));
            }

            let listed: Vec<&str> = registry.list().iter().map(|d| d.name.as_str()).collect();
            let mut expected: Vec<&str> = names.iter().map(String::as_str).collect();
            expected.sort();
            prop_assert_eq!(listed, expected);
        }

        #[test]
        fn prop_summary_columns_align(names in proptest::collection::hash_set("[a-z]{1,16}", 1..16)) {
            let mut registry = Registry::new();
            for name in &names {
                registry.register(def(name, "SUMMARY"));
            }
            let longest = names.iter().map(String::len).max().unwrap_or(0);

            let out = summary_of(&registry);
            let lines: Vec<&str> = out.lines().collect();
            prop_assert_eq!(lines.len(), names.len());
            for line in lines {
                // tab + padded name + four spaces precede every summary
                prop_assert_eq!(line.find("SUMMARY"), Some(1 + longest + 4));
            }
        }
    }
}
