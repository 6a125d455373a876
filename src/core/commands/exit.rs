use super::{Command, CommandError, Flow};

/// Ends the loop. Arguments are ignored and the shell exits 0.
#[derive(Debug, Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(&self, _args: &[&[u8]]) -> Result<Flow, CommandError> {
        Ok(Flow::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_command() {
        let cmd = ExitCommand::new();
        assert_eq!(cmd.execute(&[]), Ok(Flow::Exit));
    }
}
