use camino::Utf8PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Name of the rotating audit log file inside the configured directory.
const LOG_FILE_NAME: &str = "regionban.log";

/// Options used to construct the global logger.
#[derive(Clone, Debug)]
pub struct LoggingOptions {
    /// Directory for the rotating audit file. When unset, logs go to stderr
    /// only.
    pub dir: Option<Utf8PathBuf>,
    /// Default level filter, overridden by `RUST_LOG` when set.
    pub level: String,
}

/// Initialize the global subscriber: a stderr layer plus, when a directory
/// is configured, a daily-rotating audit file behind a non-blocking writer.
///
/// The returned guard owns the writer's flush thread; the caller must hold
/// it until the process ends so the final records reach the file.
pub fn init(opts: &LoggingOptions) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&opts.level));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match &opts.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            Ok(None)
        }
    }
}
