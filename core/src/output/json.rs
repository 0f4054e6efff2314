use std::path::Path;

use anyhow::Context;
use ipintel_common::record::LookupRecord;
use tracing::debug;

use super::RunSummary;
use crate::dispatch::Aggregation;

/// Buffers every record, then writes the non-empty ones as one JSON array.
pub async fn export_json(aggregation: Aggregation, path: &Path) -> anyhow::Result<RunSummary> {
    let records = aggregation.collect().await?;
    let received = records.len();
    let reported = write_json(records, path).await?;

    Ok(RunSummary { received, reported })
}

/// Writes the records that carry data to `path` in a single write.
///
/// Returns how many were written. When none remain the file is not touched.
pub async fn write_json(records: Vec<LookupRecord>, path: &Path) -> anyhow::Result<usize> {
    let records: Vec<LookupRecord> = records.into_iter().filter(|r| !r.is_empty()).collect();

    if records.is_empty() {
        debug!("no records with data, {} not written", path.display());
        return Ok(0);
    }

    let bytes = serde_json::to_vec(&records).context("serializing lookup results")?;
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    Ok(records.len())
}
