use std::io::{self, Write};

use tracing::{debug, warn};

use super::launcher::{exit_after_exec_failure, ExecImage, ForkLauncher, Launcher, Spawned};
use super::ChildResult;
use crate::input::TokenList;
use crate::path::SearchPath;

/// What happened to one external command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unknown,
    SpawnFailed,
    WaitFailed,
    Completed(ChildResult),
}

/// Runs external commands and reports how they ended.
pub struct ProcessExecutor<L = ForkLauncher> {
    launcher: L,
}

impl Default for ProcessExecutor<ForkLauncher> {
    fn default() -> Self {
        Self::new(ForkLauncher)
    }
}

impl<L: Launcher> ProcessExecutor<L> {
    pub fn new(launcher: L) -> Self {
        Self { launcher }
    }

    #[cfg(test)]
    pub(crate) fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Resolves `tokens` against `search` and runs the result.
    ///
    /// Only a failed write to `out` or `err` is returned as an error.
    pub fn run<O, E>(
        &mut self,
        search: &SearchPath,
        tokens: &TokenList<'_>,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<Outcome>
    where
        O: Write + ?Sized,
        E: Write + ?Sized,
    {
        let Some(name) = tokens.command() else {
            return Ok(Outcome::Unknown);
        };

        match search.resolve(name) {
            Some(path) => {
                let image = ExecImage::new(&path, tokens.as_slice());
                self.execute(&image, out, err)
            }
            None => {
                report_unknown(name, err)?;
                Ok(Outcome::Unknown)
            }
        }
    }

    /// Spawns `image`, waits for it and prints the result.
    pub fn execute<O, E>(&mut self, image: &ExecImage, out: &mut O, err: &mut E) -> io::Result<Outcome>
    where
        O: Write + ?Sized,
        E: Write + ?Sized,
    {
        // The child inherits whatever is still buffered.
        out.flush()?;
        err.flush()?;

        let pid = match self.launcher.spawn(image) {
            Ok(Spawned::Parent(pid)) => pid,
            Ok(Spawned::Child) => {
                let errno = self.launcher.replace_image(image);
                exit_after_exec_failure(errno)
            }
            Err(e) => {
                warn!(error = %e, "spawn failed");
                writeln!(err, "{}", e)?;
                return Ok(Outcome::SpawnFailed);
            }
        };
        debug!(pid = pid.as_raw(), program = ?image.path(), "spawned child");

        let result = match self.launcher.wait_for(pid) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, pid = pid.as_raw(), "wait failed");
                writeln!(err, "{}", e)?;
                return Ok(Outcome::WaitFailed);
            }
        };
        debug!(pid = pid.as_raw(), ?result, "child finished");

        report(result, out)?;
        Ok(Outcome::Completed(result))
    }
}

/// `]name]: Unknown Command[`
pub fn report_unknown<E: Write + ?Sized>(name: &[u8], err: &mut E) -> io::Result<()> {
    err.write_all(b"]")?;
    err.write_all(name)?;
    err.write_all(b"]: Unknown Command[\n")?;
    err.flush()
}

// The banner is printed whatever the status was.
fn report<O: Write + ?Sized>(result: ChildResult, out: &mut O) -> io::Result<()> {
    writeln!(out, "Command executed successfully.")?;
    match result {
        ChildResult::Exited(code) => writeln!(out, "Command finished. Return code: {}", code)?,
        ChildResult::Signaled(signal) => writeln!(out, "Command terminated by signal: {}", signal)?,
        ChildResult::Unknown => writeln!(out, "Command finished with unknown status.")?,
    }
    out.flush()
}
