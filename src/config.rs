use crate::flags::Flags;

pub const PROMPT: &str = "bash-mini$ ";

/// Settings the read loop runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: &'static str,
    pub show_prompt: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: PROMPT,
            show_prompt: true,
        }
    }
}

impl ShellConfig {
    pub fn from_flags(flags: &Flags) -> Self {
        Self {
            show_prompt: !flags.is_set("quiet"),
            ..Self::default()
        }
    }
}
