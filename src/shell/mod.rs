use std::io::{self, Read, Write};

use tracing::{debug, info};

mod executor;

use crate::{
    config::ShellConfig,
    core::commands::{Builtins, Flow},
    error::ShellError,
    input::{tokenize, InputLine, LineReader, ReadOutcome, StdinReader},
    path::SearchPath,
    process::{ForkLauncher, Launcher, ProcessExecutor},
};

use executor::CommandHandler;

/// The read-eval loop: prompt, read, tokenize, dispatch, repeat.
pub struct Shell<L = ForkLauncher> {
    pub(crate) config: ShellConfig,
    pub(crate) search_path: SearchPath,
    pub(crate) builtins: Builtins,
    pub(crate) executor: ProcessExecutor<L>,
}

impl Shell<ForkLauncher> {
    pub fn new(config: ShellConfig) -> Self {
        Self::with_parts(
            config,
            SearchPath::from_env(),
            Builtins::new(),
            ProcessExecutor::default(),
        )
    }

    /// Runs on the process's own stdin, stdout and stderr.
    pub fn run(&mut self) -> Result<(), ShellError> {
        let stdout = io::stdout();
        let stderr = io::stderr();
        self.run_with(StdinReader, &mut stdout.lock(), &mut stderr.lock())
    }
}

impl<L: Launcher> Shell<L> {
    pub fn with_parts(
        config: ShellConfig,
        search_path: SearchPath,
        builtins: Builtins,
        executor: ProcessExecutor<L>,
    ) -> Self {
        Shell {
            config,
            search_path,
            builtins,
            executor,
        }
    }

    /// Loops until `exit` or end of input.
    ///
    /// Returns an error only when input can't be read or output can't be
    /// written.
    pub fn run_with<R, O, E>(&mut self, input: R, out: &mut O, err: &mut E) -> Result<(), ShellError>
    where
        R: Read,
        O: Write + ?Sized,
        E: Write + ?Sized,
    {
        debug!(dirs = ?self.search_path, "starting read loop");
        let mut reader = LineReader::new(input);
        let mut line = InputLine::new();

        loop {
            if self.config.show_prompt {
                out.write_all(self.config.prompt.as_bytes())?;
                out.flush()?;
            }

            match reader.read_line(&mut line).map_err(ShellError::Read)? {
                ReadOutcome::Line => {}
                ReadOutcome::Eof => {
                    // Finish the prompt line
                    if self.config.show_prompt {
                        out.write_all(b"\n")?;
                        out.flush()?;
                    }
                    info!("end of input");
                    break;
                }
            }

            let tokens = tokenize(line.as_bytes());
            if tokens.is_empty() {
                continue;
            }

            if self.execute_tokens(&tokens, out, err)? == Flow::Exit {
                info!("exit requested");
                break;
            }
        }

        Ok(())
    }
}
