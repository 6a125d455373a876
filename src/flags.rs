use crate::error::ShellError;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: BTreeMap<&'static str, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: &'static str,
    pub long: &'static str,
    pub description: &'static str,
    pub set: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = BTreeMap::new();

        flags.insert(
            "help",
            Flag {
                short: "-h",
                long: "--help",
                description: "Print this help message",
                set: false,
            },
        );

        flags.insert(
            "version",
            Flag {
                short: "-v",
                long: "--version",
                description: "Show version information",
                set: false,
            },
        );

        flags.insert(
            "quiet",
            Flag {
                short: "-q",
                long: "--quiet",
                description: "Do not print the prompt",
                set: false,
            },
        );

        flags.insert(
            "debug",
            Flag {
                short: "-d",
                long: "--debug",
                description: "Enable debug output on stderr",
                set: false,
            },
        );

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        for arg in args {
            let flag = self
                .flags
                .values_mut()
                .find(|flag| arg == flag.short || arg == flag.long);

            match flag {
                Some(flag) => flag.set = true,
                None => return Err(ShellError::FlagError(format!("unknown option {}", arg))),
            }
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags.get(name).is_some_and(|f| f.set)
    }

    pub fn help(&self) -> String {
        let mut text = String::from("Usage: bash-mini [OPTIONS]\n\nOptions:\n");
        for flag in self.flags.values() {
            text.push_str(&format!(
                "  {}, {:<15} {}\n",
                flag.short, flag.long, flag.description
            ));
        }
        text
    }
}
