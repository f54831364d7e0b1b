use std::net::IpAddr;

use camino::Utf8Path;
use maxminddb::{geoip2, Mmap};

use crate::error::{Error, Result};

/// Default language tag for localized region names.
const DEFAULT_LANG: &str = "en";

/// Maps one address to a free-text region string.
///
/// The string is only ever subjected to substring matching by the policy
/// filter, so its exact shape is implementation defined.
pub trait RegionResolver {
    fn resolve(&self, addr: &str) -> Result<String>;
}

/// Resolver backed by a MaxMind-format City database.
///
/// The database is memory-mapped once when the resolver is constructed and
/// released when it is dropped; per-query state never outlives `resolve`.
pub struct GeoDbResolver {
    reader: maxminddb::Reader<Mmap>,
    lang: String,
}

impl GeoDbResolver {
    /// Open the database at `path`. `lang` selects the localized-names key
    /// used to build region strings ("en", "zh-CN", ...).
    pub fn open(path: &Utf8Path, lang: Option<String>) -> Result<Self> {
        let reader = maxminddb::Reader::open_mmap(path).map_err(|source| Error::DatabaseOpen {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self {
            reader,
            lang: lang.unwrap_or_else(|| DEFAULT_LANG.to_string()),
        })
    }
}

impl RegionResolver for GeoDbResolver {
    /// Join country, first subdivision, and city names with "," into a
    /// region string like "China,Guangdong,Guangzhou".
    fn resolve(&self, addr: &str) -> Result<String> {
        let ip: IpAddr = addr.parse().map_err(|_| Error::BadAddress {
            addr: addr.to_string(),
        })?;

        let record = self
            .reader
            .lookup::<geoip2::City>(ip)
            .map_err(|source| Error::LookupFailed {
                addr: addr.to_string(),
                source,
            })?;

        let lang = self.lang.as_str();
        let mut parts: Vec<&str> = Vec::with_capacity(3);

        if let Some(country) = record.country {
            if let Some(names) = country.names {
                if let Some(&name) = names.get(lang) {
                    parts.push(name);
                }
            }
        }

        if let Some(subdivisions) = record.subdivisions {
            if let Some(subdivision) = subdivisions.first() {
                if let Some(names) = &subdivision.names {
                    if let Some(&name) = names.get(lang) {
                        parts.push(name);
                    }
                }
            }
        }

        if let Some(city) = record.city {
            if let Some(names) = city.names {
                if let Some(&name) = names.get(lang) {
                    parts.push(name);
                }
            }
        }

        if parts.is_empty() {
            return Err(Error::NoRegion {
                addr: addr.to_string(),
            });
        }

        Ok(parts.join(","))
    }
}
