use std::io::Write;

use tracing::debug;

use crate::core::commands::Flow;
use crate::error::ShellError;
use crate::input::TokenList;
use crate::process::Launcher;

pub(crate) trait CommandHandler {
    fn execute_tokens<O, E>(
        &mut self,
        tokens: &TokenList<'_>,
        out: &mut O,
        err: &mut E,
    ) -> Result<Flow, ShellError>
    where
        O: Write + ?Sized,
        E: Write + ?Sized;
}

impl<L: Launcher> CommandHandler for super::Shell<L> {
    fn execute_tokens<O, E>(
        &mut self,
        tokens: &TokenList<'_>,
        out: &mut O,
        err: &mut E,
    ) -> Result<Flow, ShellError>
    where
        O: Write + ?Sized,
        E: Write + ?Sized,
    {
        // Blank lines never get here, but an empty list is still a no-op
        let Some(name) = tokens.command() else {
            return Ok(Flow::Continue);
        };

        if let Some(result) = self.builtins.execute(name, tokens.args()) {
            return match result {
                Ok(flow) => Ok(flow),
                Err(e) => {
                    writeln!(err, "{}", e)?;
                    err.flush()?;
                    Ok(Flow::Continue)
                }
            };
        }

        let outcome = self.executor.run(&self.search_path, tokens, out, err)?;
        debug!(?outcome, "external command done");
        Ok(Flow::Continue)
    }
}
