use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use pnet::ipnetwork::{Ipv4Network, Ipv6Network};

use crate::error::TargetError;

/// Smallest IPv6 prefix that is still expanded (at most 65 536 addresses).
pub const MIN_IPV6_PREFIX: u8 = 112;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// Number of addresses covered, both ends included.
    pub fn size(&self) -> u64 {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        u64::from(end.saturating_sub(start)) + 1
    }

    pub fn to_iter(self) -> impl Iterator<Item = IpAddr> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(|ip| IpAddr::V4(Ipv4Addr::from(ip)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv6Range {
    pub start_addr: Ipv6Addr,
    pub end_addr: Ipv6Addr,
}

impl Ipv6Range {
    pub fn new(start_addr: Ipv6Addr, end_addr: Ipv6Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn size(&self) -> u128 {
        let start: u128 = self.start_addr.into();
        let end: u128 = self.end_addr.into();
        end.saturating_sub(start).saturating_add(1)
    }

    pub fn to_iter(self) -> impl Iterator<Item = IpAddr> {
        let start: u128 = self.start_addr.into();
        let end: u128 = self.end_addr.into();
        (start..=end).map(|ip| IpAddr::V6(Ipv6Addr::from(ip)))
    }
}

/// Every address covered by `ip/prefix`, network and broadcast included.
///
/// Host bits in `ip` are ignored: `10.0.0.5/30` covers `10.0.0.4..=10.0.0.7`.
pub fn cidr_range(ip: Ipv4Addr, prefix: u8, input: &str) -> Result<Ipv4Range, TargetError> {
    let network = Ipv4Network::new(ip, prefix).map_err(|e| TargetError::InvalidPrefix {
        input: input.to_string(),
        reason: e.to_string(),
    })?;

    Ok(Ipv4Range::new(network.network(), network.broadcast()))
}

pub fn cidr_range_v6(ip: Ipv6Addr, prefix: u8, input: &str) -> Result<Ipv6Range, TargetError> {
    let network = Ipv6Network::new(ip, prefix).map_err(|e| TargetError::InvalidPrefix {
        input: input.to_string(),
        reason: e.to_string(),
    })?;

    if prefix < MIN_IPV6_PREFIX {
        return Err(TargetError::TooLarge {
            input: input.to_string(),
            min_prefix: MIN_IPV6_PREFIX,
        });
    }

    let mask: u128 = network.mask().into();
    let start: u128 = u128::from(ip) & mask;
    let end: u128 = start | !mask;

    Ok(Ipv6Range::new(Ipv6Addr::from(start), Ipv6Addr::from(end)))
}
