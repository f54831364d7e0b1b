use tracing::{info, warn};

use crate::command::CommandRunner;
use crate::error::{Error, Result};

/// Log target for the per-ban audit records.
pub const AUDIT_TARGET: &str = "regionban::audit";

/// Invokes the external enforcement command for addresses flagged to ban.
///
/// The command line is fixed at construction; each ban appends the offending
/// address as one positional argument. There is no un-ban, no retry, and no
/// rate limiting; ban idempotence is the enforcement tool's problem.
pub struct BanExecutor<'a, C: CommandRunner> {
    runner: &'a C,
    program: String,
    args: Vec<String>,
}

impl<'a, C: CommandRunner> BanExecutor<'a, C> {
    /// Split a command line like "fail2ban-client set sshd banip" into the
    /// program and its fixed arguments.
    pub fn from_command_line(runner: &'a C, command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(Error::EmptyBanCommand)?;
        Ok(Self {
            runner,
            program,
            args: parts.collect(),
        })
    }

    /// Ban one address.
    ///
    /// The audit record is written before the command runs. Enforcement
    /// failures are surfaced as warnings but never undo the ban accounting;
    /// the return value only feeds the run summary counter.
    pub fn ban(&self, address: &str, region: &str) -> bool {
        let record = serde_json::json!({ "address": address, "region": region });
        info!(target: AUDIT_TARGET, %record, "banning address");

        let mut args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        args.push(address);

        match self.runner.run(&self.program, &args) {
            Ok(status) if status.success => true,
            Ok(status) => {
                warn!(
                    address,
                    code = ?status.code,
                    "enforcement command exited unsuccessfully"
                );
                false
            }
            Err(err) => {
                warn!(address, error = %err, "enforcement command could not be run");
                false
            }
        }
    }
}
