use std::fmt;

use nix::errno::Errno;
use nix::sys::wait::WaitStatus;

pub mod executor;
pub mod launcher;

pub use executor::{Outcome, ProcessExecutor};
pub use launcher::{ExecImage, ForkLauncher, Launcher, Spawned, EXEC_FAILURE_CODE};

/// How a waited-for child ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildResult {
    Exited(u8),
    Signaled(u8),
    Unknown,
}

impl From<WaitStatus> for ChildResult {
    fn from(status: WaitStatus) -> Self {
        match status {
            WaitStatus::Exited(_, code) => ChildResult::Exited(code as u8),
            WaitStatus::Signaled(_, signal, _) => ChildResult::Signaled(signal as i32 as u8),
            _ => ChildResult::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessError {
    Spawn(Errno),
    Wait(Errno),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Spawn(e) => write!(f, "fork: {}", e.desc()),
            ProcessError::Wait(e) => write!(f, "waitpid: {}", e.desc()),
        }
    }
}

impl std::error::Error for ProcessError {}
