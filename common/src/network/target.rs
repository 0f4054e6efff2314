//! # Lookup Targets
//!
//! Turns raw input lines into the flat list of addresses that get queried.
//!
//! Inputs are either:
//! * A CIDR block (e.g., `192.168.1.0/24`), expanded into every address it covers.
//! * Anything else, passed through verbatim. The lookup endpoint decides whether
//!   it is meaningful.

use std::fmt;
use std::net::IpAddr;

use tracing::debug;

use crate::error::TargetError;
use crate::network::range;

/// One address to be queried. Duplicates are queried independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target(String);

impl Target {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<IpAddr> for Target {
    fn from(ip: IpAddr) -> Self {
        Self(ip.to_string())
    }
}

impl AsRef<str> for Target {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolves every input into targets, keeping input order.
///
/// CIDR blocks expand in ascending address order at the position they appear.
/// A single malformed CIDR block fails the whole batch: no targets are returned.
pub fn resolve<I, S>(inputs: I) -> Result<Vec<Target>, TargetError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut targets: Vec<Target> = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        match parse_cidr(input)? {
            Some((count, ips)) => {
                debug!("{input} expanded to {count} addresses");
                targets.extend(ips.map(Target::from));
            }
            None => targets.push(Target::new(input)),
        }
    }

    Ok(targets)
}

/// Parses CIDR notation like "192.168.1.0/24".
///
/// Returns `Ok(None)` for inputs that are not CIDR blocks at all, otherwise the
/// block size alongside its addresses.
fn parse_cidr(s: &str) -> Result<Option<(u128, Box<dyn Iterator<Item = IpAddr>>)>, TargetError> {
    let Some((ip_str, prefix_str)) = s.split_once('/') else {
        return Ok(None);
    };

    let ip = ip_str
        .parse::<IpAddr>()
        .map_err(|_| TargetError::InvalidAddress {
            input: s.to_string(),
        })?;

    let prefix = prefix_str
        .parse::<u8>()
        .map_err(|e| TargetError::InvalidPrefix {
            input: s.to_string(),
            reason: e.to_string(),
        })?;

    let expanded: (u128, Box<dyn Iterator<Item = IpAddr>>) = match ip {
        IpAddr::V4(ipv4_addr) => {
            let range = range::cidr_range(ipv4_addr, prefix, s)?;
            (u128::from(range.size()), Box::new(range.to_iter()))
        }
        IpAddr::V6(ipv6_addr) => {
            let range = range::cidr_range_v6(ipv6_addr, prefix, s)?;
            (range.size(), Box::new(range.to_iter()))
        }
    };

    Ok(Some(expanded))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
