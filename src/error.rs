use std::borrow::Cow;
use std::io;

use nix::errno::Errno;

/// Errors that end the shell. Everything recoverable is reported where it
/// happens and never reaches this type.
#[derive(Debug)]
pub enum ShellError {
    Read(io::Error),
    Io(io::Error),
    FlagError(String),
}

impl From<io::Error> for ShellError {
    fn from(err: io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Read(e) => write!(f, "read: {}", describe(e)),
            ShellError::Io(e) => write!(f, "write: {}", describe(e)),
            ShellError::FlagError(msg) => write!(f, "Flag error: {}", msg),
        }
    }
}

impl std::error::Error for ShellError {}

impl ShellError {
    /// Process status to leave with. Losing stdin ends the session like end
    /// of input does; only a failed write is a failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ShellError::Read(_) => 0,
            ShellError::Io(_) | ShellError::FlagError(_) => 1,
        }
    }
}

/// The `strerror` text for an OS error, the same words `perror` prints.
pub fn describe(err: &io::Error) -> Cow<'static, str> {
    match err.raw_os_error() {
        Some(code) => Cow::Borrowed(Errno::from_raw(code).desc()),
        None => Cow::Owned(err.to_string()),
    }
}
