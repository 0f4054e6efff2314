//! # Lookup Record
//!
//! The structured answer for one queried target.
//!
//! The wire names follow the lookup endpoint (`ip`, `ports`, `vulns`, ...), so the
//! same type deserializes responses and serializes the JSON export. Every field
//! defaults when absent or `null`: a body without an `ip` yields an empty record,
//! which is the canonical "no data" marker.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cpes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hostnames: Vec<String>,
    /// Empty when the lookup failed or returned nothing.
    #[serde(rename = "ip", default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(rename = "ports", default, deserialize_with = "null_as_empty")]
    pub open_ports: Vec<u16>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(rename = "vulns", default, deserialize_with = "null_as_empty")]
    pub vulnerabilities: Vec<String>,
}

impl LookupRecord {
    /// The record handed out for a failed lookup.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` when the record carries no data and must be kept out of every output.
    pub fn is_empty(&self) -> bool {
        self.address.is_empty()
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
