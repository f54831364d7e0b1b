use regex::Regex;
use rustc_hash::FxHashSet;

use crate::error::Result;

// Each octet constrained to 0-255 by the pattern itself; values like
// 999.1.1.1 never produce a match. IPv6 is out of scope.
const IPV4_PATTERN: &str = r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b";

/// A searcher for finding IPv4 addresses in log text.
///
/// Matching is greedy, non-overlapping, and left to right; every dotted-quad
/// on a line is returned verbatim.
#[derive(Clone, Debug)]
pub struct IpExtractor {
    pattern: Regex,
}

impl IpExtractor {
    /// Compile the dotted-quad pattern. Build once per process.
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(IPV4_PATTERN)?,
        })
    }

    /// Iterate over every dotted-quad match in a single line.
    ///
    /// Matches borrow only the haystack, so they may outlive the extractor.
    pub fn find_in_line<'e, 't>(&'e self, line: &'t str) -> impl Iterator<Item = &'t str> + 'e
    where
        't: 'e,
    {
        self.pattern.find_iter(line).map(|m| m.as_str())
    }

    /// Scan all lines and collect the unique addresses found.
    ///
    /// Downstream processing order over the set is unspecified.
    pub fn unique_addresses<I, S>(&self, lines: I) -> FxHashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut addresses = FxHashSet::default();
        for line in lines {
            for m in self.find_in_line(line.as_ref()) {
                if !addresses.contains(m) {
                    addresses.insert(m.to_string());
                }
            }
        }
        addresses
    }
}
