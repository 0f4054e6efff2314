//! The two consumers of an [`Aggregation`](crate::dispatch::Aggregation).
//!
//! Exactly one of them runs per invocation: [`stream_results`] renders records as
//! they arrive, [`export_json`] buffers them and writes a single array. Empty
//! records never reach either output.

mod json;
mod stream;

pub use json::{export_json, write_json};
pub use stream::{Category, Painter, PlainPainter, StreamFormatter, stream_results};

/// What a run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records taken off the channel, failed lookups included.
    pub received: usize,
    /// Records that carried data and were written out.
    pub reported: usize,
}
