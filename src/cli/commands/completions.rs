//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::TaskerError;

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, TaskerError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "tasker", &mut buf);
    String::from_utf8(buf)
        .map_err(|e| TaskerError::InvalidInput(format!("Completion script is not UTF-8: {e}")))
}
