use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{error, warn};

use regionban::command::SystemRunner;
use regionban::executor::BanExecutor;
use regionban::extractor::IpExtractor;
use regionban::logging::{self, LoggingOptions};
use regionban::pipeline::{self, RunConfig};
use regionban::policy::BanPolicy;
use regionban::resolver::GeoDbResolver;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Web server log file to scan
    #[clap(
        long,
        value_name = "FILE",
        value_hint = clap::ValueHint::FilePath,
        env = "REGIONBAN_LOG_FILE"
    )]
    log_file: Utf8PathBuf,

    /// Number of trailing log lines to scan each run
    #[clap(short = 'n', long, default_value_t = 1000)]
    lines: usize,

    /// MaxMind-format City database file
    #[clap(
        long,
        value_name = "FILE",
        value_hint = clap::ValueHint::FilePath,
        env = "REGIONBAN_GEODB",
        default_value = "/usr/share/GeoIP/GeoLite2-City.mmdb"
    )]
    geodb: Utf8PathBuf,

    /// Addresses whose resolved region contains this marker are never banned
    #[clap(long, value_name = "MARKER", env = "REGIONBAN_ALLOW_MARKER")]
    allow_marker: String,

    /// Language tag for localized region names ("en", "zh-CN", ...)
    #[clap(long, default_value = "en")]
    lang: String,

    /// Enforcement command; the offending address is appended as the final
    /// positional argument
    #[clap(
        long,
        value_name = "CMDLINE",
        default_value = "fail2ban-client set sshd banip"
    )]
    ban_command: String,

    /// Make the log file world-readable (via chmod) before reading it.
    /// Legacy privilege hack; prefer running with read access instead
    #[clap(long)]
    widen_permissions: bool,

    /// Keep running, repeating the scan at this interval ("5m", "90s", ...).
    /// Without this flag the program performs a single run and exits
    #[clap(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    interval: Option<Duration>,

    /// Directory for the rotating audit log; stderr only when unset
    #[clap(long, value_name = "DIR", env = "REGIONBAN_LOG_DIR")]
    log_dir: Option<Utf8PathBuf>,

    /// Log level filter (trace, debug, info, warn, error)
    #[clap(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let err = match run_main() {
        Ok(code) => return code,
        Err(err) => err,
    };

    writeln!(&mut std::io::stderr(), "{:#}", err).ok();
    ExitCode::FAILURE
}

fn run_main() -> Result<ExitCode> {
    let args = Args::parse();

    // Held to end of process so the audit file is flushed on exit.
    let _guard = logging::init(&LoggingOptions {
        dir: args.log_dir.clone(),
        level: args.log_level.clone(),
    })?;

    let extractor = IpExtractor::new()?;
    let resolver = GeoDbResolver::open(&args.geodb, Some(args.lang.clone()))?;
    let policy = BanPolicy::new(args.allow_marker.clone());
    let runner = SystemRunner;
    let executor = BanExecutor::from_command_line(&runner, &args.ban_command)?;

    let config = RunConfig {
        log_file: args.log_file.clone(),
        lines: args.lines,
        widen_permissions: args.widen_permissions,
    };

    match args.interval {
        None => {
            pipeline::run_once(&config, &extractor, &resolver, &policy, &executor, &runner)?;
            Ok(ExitCode::SUCCESS)
        }
        // Recurring-timer loop with single-flight execution: the next tick
        // is not considered until the current run finishes, so overlapping
        // runs cannot happen within one process.
        Some(every) => loop {
            let started = Instant::now();
            if let Err(err) =
                pipeline::run_once(&config, &extractor, &resolver, &policy, &executor, &runner)
            {
                error!(error = %err, "run failed");
            }

            let elapsed = started.elapsed();
            match every.checked_sub(elapsed) {
                Some(remaining) => std::thread::sleep(remaining),
                None => warn!(
                    ?elapsed,
                    interval = ?every,
                    "run overran its interval; starting next run immediately"
                ),
            }
        },
    }
}
