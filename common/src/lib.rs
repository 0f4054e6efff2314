//! Shared building blocks for `ipintel`.
//!
//! * [`config`]: the run configuration assembled by the CLI.
//! * [`record`]: the [`record::LookupRecord`] returned for every queried target.
//! * [`network`]: target parsing and CIDR expansion.
//! * [`error`]: typed errors raised while resolving targets.

pub mod config;
pub mod error;
pub mod network;
pub mod record;
