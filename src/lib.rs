//! Region-based IP banning from trailing web server logs.
//!
//! regionban tails the last N lines of a server log, extracts every IPv4
//! address, resolves each unique address to a free-text region string via an
//! offline MaxMind-format database, and invokes an external enforcement
//! command (fail2ban by default) for every address whose region string does
//! not contain the configured allow marker.
//!
//! Addresses that cannot be resolved are skipped, never banned (fail-open).
//! A single bad address never aborts processing of the rest.

pub mod command;
pub mod error;
pub mod executor;
pub mod extractor;
pub mod logging;
pub mod pipeline;
pub mod policy;
pub mod resolver;
pub mod tail;

pub use crate::error::Error;
pub use crate::pipeline::{RunConfig, RunSummary, Verdict};
