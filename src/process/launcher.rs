use std::ffi::{CStr, CString};
use std::io;
use std::os::raw::c_char;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use nix::errno::Errno;
use nix::sys::signal::{signal, SigHandler, Signal};
use nix::sys::wait::waitpid;
use nix::unistd::{self, fork, ForkResult, Pid};

use super::{ChildResult, ProcessError};

/// Exit status of a child whose exec failed.
pub const EXEC_FAILURE_CODE: i32 = 127;

/// Program path and argument vector, ready for `execv`.
///
/// Everything is allocated up front so the forked child never touches the
/// allocator.
#[derive(Debug)]
pub struct ExecImage {
    path: CString,
    args: Vec<CString>,
    argv: Vec<*const c_char>,
}

impl ExecImage {
    /// `tokens[0]` stays the name the user typed, not `path`.
    pub fn new(path: &Path, tokens: &[&[u8]]) -> Self {
        let path = c_string(path.as_os_str().as_bytes());
        let args: Vec<CString> = tokens.iter().map(|t| c_string(t)).collect();
        let mut argv: Vec<*const c_char> = args.iter().map(|a| a.as_ptr()).collect();
        argv.push(std::ptr::null());

        Self { path, args, argv }
    }

    pub fn path(&self) -> &CStr {
        &self.path
    }

    pub fn args(&self) -> &[CString] {
        &self.args
    }
}

// A C string stops at the first NUL; mirror that instead of failing.
fn c_string(bytes: &[u8]) -> CString {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    CString::new(&bytes[..end]).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawned {
    Parent(Pid),
    Child,
}

/// Process primitives the executor is written against.
pub trait Launcher {
    /// Creates the child. Returns twice with the real launcher.
    fn spawn(&mut self, image: &ExecImage) -> Result<Spawned, ProcessError>;

    /// Swaps the current image for `image`. Only returns on failure.
    fn replace_image(&mut self, image: &ExecImage) -> Errno;

    /// Blocks until `pid` terminates.
    fn wait_for(&mut self, pid: Pid) -> Result<ChildResult, ProcessError>;
}

/// `fork` / `execv` / `waitpid`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ForkLauncher;

impl Launcher for ForkLauncher {
    fn spawn(&mut self, _image: &ExecImage) -> Result<Spawned, ProcessError> {
        // SAFETY: the child only runs `signal`, `execv`, `write` and `_exit`
        // before its image is replaced or it terminates.
        match unsafe { fork() } {
            Ok(ForkResult::Parent { child }) => Ok(Spawned::Parent(child)),
            Ok(ForkResult::Child) => Ok(Spawned::Child),
            Err(e) => Err(ProcessError::Spawn(e)),
        }
    }

    fn replace_image(&mut self, image: &ExecImage) -> Errno {
        // The runtime ignores SIGPIPE and an ignored disposition survives exec.
        // SAFETY: `SigDfl` installs no handler.
        let _ = unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) };
        // SAFETY: `argv` is NULL-terminated and points into `args`, which
        // lives as long as `image`.
        unsafe { libc::execv(image.path.as_ptr(), image.argv.as_ptr()) };
        Errno::last()
    }

    fn wait_for(&mut self, pid: Pid) -> Result<ChildResult, ProcessError> {
        waitpid(pid, None)
            .map(ChildResult::from)
            .map_err(ProcessError::Wait)
    }
}

/// Reports a failed exec from inside the child and terminates it.
///
/// Uses raw writes and `_exit` so nothing inherited from the parent (stdio
/// buffers, locks, atexit handlers) runs twice.
pub fn exit_after_exec_failure(errno: Errno) -> ! {
    write_stderr(b"exec: ");
    write_stderr(errno.desc().as_bytes());
    write_stderr(b"\n");
    unsafe { libc::_exit(EXEC_FAILURE_CODE) }
}

fn write_stderr(mut bytes: &[u8]) {
    let stderr = io::stderr();
    while !bytes.is_empty() {
        match unistd::write(&stderr, bytes) {
            Ok(0) => return,
            Ok(n) => bytes = &bytes[n..],
            Err(Errno::EINTR) => continue,
            Err(_) => return,
        }
    }
}
