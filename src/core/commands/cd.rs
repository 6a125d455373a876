use std::env;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use nix::unistd::chdir;
use tracing::debug;

use super::{Command, CommandError, Flow};

#[derive(Debug, Clone)]
enum Home {
    Env,
    Fixed(Option<OsString>),
}

/// `cd [dir]`. With no argument goes to `$HOME`; extra arguments are ignored.
#[derive(Debug, Clone)]
pub struct CdCommand {
    home: Home,
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    /// Reads `$HOME` each time it runs.
    pub fn new() -> Self {
        Self { home: Home::Env }
    }

    pub fn with_home(home: Option<OsString>) -> Self {
        Self {
            home: Home::Fixed(home),
        }
    }

    fn home(&self) -> Option<OsString> {
        let home = match &self.home {
            Home::Env => env::var_os("HOME"),
            Home::Fixed(home) => home.clone(),
        };
        home.filter(|h| !h.is_empty())
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[&[u8]]) -> Result<Flow, CommandError> {
        let target = match args.first() {
            Some(arg) => OsStr::from_bytes(arg).to_os_string(),
            None => self.home().ok_or(CommandError::HomeNotSet)?,
        };

        chdir(Path::new(&target))?;
        debug!(dir = ?target, "changed directory");
        Ok(Flow::Continue)
    }
}
