//! # ipintel core
//!
//! The concurrent fan-out pipeline:
//!
//! * **[`lookup`]**: the [`lookup::IntelSource`] seam and the HTTP client behind it.
//! * **[`dispatch`]**: one task per target, every result funneled through a single channel.
//! * **[`output`]**: the two consumers of that channel, streaming text and batch JSON.

pub mod dispatch;
pub mod lookup;
pub mod output;
