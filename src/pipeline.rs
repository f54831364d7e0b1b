use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use crate::command::CommandRunner;
use crate::error::{Error, Result};
use crate::executor::BanExecutor;
use crate::extractor::IpExtractor;
use crate::policy::{BanPolicy, Decision};
use crate::resolver::RegionResolver;
use crate::tail;

/// Per-address outcome of one run.
///
/// Each address moves through exactly one transition per run:
/// Extracted -> Resolved -> (Allowed | Banned | Skipped). There is no
/// cross-address state and no run-to-run memory; an address that reappears
/// in the trailing window next run is reprocessed from scratch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Region string contained the allow marker.
    Allowed { region: String },
    /// Handed to the ban executor. `enforced` is false when the enforcement
    /// command could not be run or exited unsuccessfully.
    Banned { region: String, enforced: bool },
    /// Resolution failed; fail-open, the address was never banned.
    Skipped { reason: String },
}

/// Counters for one pipeline run, logged when the run completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: usize,
    pub unique_addresses: usize,
    pub allowed: usize,
    pub banned: usize,
    pub skipped: usize,
    pub enforcement_failures: usize,
}

/// Static configuration for one run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Web server log to scan.
    pub log_file: Utf8PathBuf,
    /// Size of the trailing line window.
    pub lines: usize,
    /// Legacy side effect: chmod the log world-readable before reading.
    pub widen_permissions: bool,
}

/// Run the whole pipeline once: tail, extract, dedupe, then resolve and
/// judge each unique address independently.
///
/// Failures to read the log (or to widen its permissions) are fatal and
/// produce no partial results. Everything per-address is contained: one bad
/// address never aborts processing of the rest.
pub fn run_once<R, C>(
    config: &RunConfig,
    extractor: &IpExtractor,
    resolver: &R,
    policy: &BanPolicy,
    executor: &BanExecutor<'_, C>,
    runner: &C,
) -> Result<RunSummary>
where
    R: RegionResolver,
    C: CommandRunner,
{
    if config.widen_permissions {
        widen_permissions(runner, &config.log_file)?;
    }

    let lines = tail::tail_lines(&config.log_file, config.lines)?;
    let addresses = extractor.unique_addresses(&lines);

    let mut summary = RunSummary {
        lines: lines.len(),
        unique_addresses: addresses.len(),
        ..RunSummary::default()
    };

    for address in &addresses {
        match judge_address(address, resolver, policy, executor) {
            Verdict::Allowed { region } => {
                debug!(%address, %region, "address allowed");
                summary.allowed += 1;
            }
            Verdict::Banned { region, enforced } => {
                debug!(%address, %region, enforced, "address banned");
                summary.banned += 1;
                if !enforced {
                    summary.enforcement_failures += 1;
                }
            }
            Verdict::Skipped { reason } => {
                debug!(%address, %reason, "address skipped");
                summary.skipped += 1;
            }
        }
    }

    info!(
        lines = summary.lines,
        unique_addresses = summary.unique_addresses,
        allowed = summary.allowed,
        banned = summary.banned,
        skipped = summary.skipped,
        enforcement_failures = summary.enforcement_failures,
        "run complete"
    );

    Ok(summary)
}

/// Resolve and judge a single address.
///
/// Any resolver error yields `Skipped`: unresolvable addresses are never
/// banned and never reach the executor.
fn judge_address<R, C>(
    address: &str,
    resolver: &R,
    policy: &BanPolicy,
    executor: &BanExecutor<'_, C>,
) -> Verdict
where
    R: RegionResolver,
    C: CommandRunner,
{
    let region = match resolver.resolve(address) {
        Ok(region) => region,
        Err(err) => {
            return Verdict::Skipped {
                reason: err.to_string(),
            }
        }
    };

    match policy.decide(&region) {
        Decision::Allow => Verdict::Allowed { region },
        Decision::Ban => {
            let enforced = executor.ban(address, &region);
            Verdict::Banned { region, enforced }
        }
    }
}

fn widen_permissions<C: CommandRunner>(runner: &C, path: &Utf8Path) -> Result<()> {
    let status = runner.run("chmod", &["o+r", path.as_str()])?;
    if !status.success {
        return Err(Error::CommandExit {
            program: "chmod".to_string(),
            code: status.code,
        });
    }
    Ok(())
}
