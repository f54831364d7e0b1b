use camino::Utf8PathBuf;

/// Error types for the regionban library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target log file could not be read. Fatal to the run.
    #[error("failed to read log {path}")]
    LogRead {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The geo database could not be opened. Fatal to the run.
    #[error("could not open geo database at {path}")]
    DatabaseOpen {
        path: Utf8PathBuf,
        #[source]
        source: maxminddb::MaxMindDBError,
    },

    /// Matched text that does not parse as an IPv4 address.
    #[error("not a usable address: {addr}")]
    BadAddress { addr: String },

    /// IP address lookup failed in the geo database.
    #[error("lookup failed for {addr}")]
    LookupFailed {
        addr: String,
        #[source]
        source: maxminddb::MaxMindDBError,
    },

    /// The database returned a record with no usable region names.
    #[error("no region data for {addr}")]
    NoRegion { addr: String },

    /// The configured ban command line contains no program.
    #[error("ban command line is empty")]
    EmptyBanCommand,

    /// An external command could not be spawned.
    #[error("failed to run {program}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// An external command ran but exited unsuccessfully.
    #[error("{program} exited unsuccessfully (code {code:?})")]
    CommandExit { program: String, code: Option<i32> },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A regex compilation error.
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Convenience type alias for Results using the library error.
pub type Result<T> = std::result::Result<T, Error>;
