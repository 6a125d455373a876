use std::collections::BTreeMap;

use nix::errno::Errno;

mod cd;
mod exit;

pub use cd::CdCommand;
pub use exit::ExitCommand;

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    HomeNotSet,
    ChangeDir(Errno),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::HomeNotSet => write!(f, "cd: HOME not set"),
            CommandError::ChangeDir(e) => write!(f, "cd: {}", e.desc()),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<Errno> for CommandError {
    fn from(err: Errno) -> Self {
        CommandError::ChangeDir(err)
    }
}

/// A command the shell runs itself. `args` excludes the command name.
pub trait Command {
    fn execute(&self, args: &[&[u8]]) -> Result<Flow, CommandError>;
}

#[derive(Debug, Clone)]
enum CommandType {
    Cd(CdCommand),
    Exit(ExitCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[&[u8]]) -> Result<Flow, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args),
            CommandType::Exit(cmd) => cmd.execute(args),
        }
    }
}

/// Table of built-ins, looked up by exact name.
#[derive(Debug, Clone)]
pub struct Builtins {
    commands: BTreeMap<&'static [u8], CommandType>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl Builtins {
    pub fn new() -> Self {
        Self::with_cd(CdCommand::new())
    }

    pub fn with_cd(cd: CdCommand) -> Self {
        let mut commands = BTreeMap::new();
        commands.insert(&b"cd"[..], CommandType::Cd(cd));
        commands.insert(&b"exit"[..], CommandType::Exit(ExitCommand::new()));
        Self { commands }
    }

    /// `None` when `name` is not a built-in.
    pub fn execute(&self, name: &[u8], args: &[&[u8]]) -> Option<Result<Flow, CommandError>> {
        self.commands.get(name).map(|cmd| cmd.execute(args))
    }

    #[cfg(test)]
    fn is_builtin(&self, name: &[u8]) -> bool {
        self.commands.contains_key(name)
    }
}
