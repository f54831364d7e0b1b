use std::process::Command;

use crate::error::{Error, Result};

/// Exit information from one external command invocation.
///
/// Stdout and stderr are discarded; the enforcement interface only promises
/// that the process ran.
#[derive(Clone, Copy, Debug)]
pub struct CommandStatus {
    pub success: bool,
    pub code: Option<i32>,
}

/// Seam for shell side effects so the pipeline can run without a real shell
/// or a real firewall tool.
pub trait CommandRunner {
    /// Run `program` with `args` to completion and report its exit status.
    ///
    /// Returns an error only when the command could not be spawned.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandStatus>;
}

/// Runs commands on the host via `std::process::Command`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandStatus> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| Error::CommandSpawn {
                program: program.to_string(),
                source,
            })?;
        Ok(CommandStatus {
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}
