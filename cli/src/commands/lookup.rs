use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tracing::{Instrument, info, info_span, warn};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::{format, print, progress};
use ipintel_common::config::{Config, OutputMode};
use ipintel_common::network::target::{self, Target};
use ipintel_core::dispatch::Dispatcher;
use ipintel_core::lookup::InternetDbClient;
use ipintel_core::output::{self, RunSummary, StreamFormatter};

pub async fn lookup(inputs: Vec<String>, cfg: &Config) -> anyhow::Result<()> {
    let mut sink = progress::ProgressWriter::new(io::stdout());
    run(inputs, cfg, &mut sink).await?;
    Ok(())
}

/// Resolves, dispatches and reports. Streamed results go to `sink`; JSON mode leaves it untouched.
pub async fn run<W: Write>(
    inputs: Vec<String>,
    cfg: &Config,
    sink: &mut W,
) -> anyhow::Result<RunSummary> {
    let targets: Vec<Target> = target::resolve(&inputs).context("resolving targets")?;

    if targets.is_empty() {
        warn!("No targets given, nothing to look up");
        return Ok(RunSummary::default());
    }

    let len: usize = targets.len();
    let unit: &str = if len == 1 { "target" } else { "targets" };
    info!("{len} {unit} resolved");

    let source = Arc::new(InternetDbClient::new(cfg)?);
    let mode: OutputMode = cfg.output_mode();

    let span = info_span!("lookup", indicatif.pb_show = true);
    span.pb_set_style(&progress::lookup_style());
    span.pb_set_length(len as u64);
    span.pb_set_message("Looking up");

    let progress_span = span.clone();
    let dispatcher = Dispatcher::from_config(source, cfg).on_record(move |_| progress_span.pb_inc(1));

    let start_time: Instant = Instant::now();
    let summary: RunSummary = async {
        let aggregation = dispatcher.dispatch(targets);
        match &mode {
            OutputMode::Stream => {
                let formatter = StreamFormatter::from_config(cfg, format::painter_for(cfg));
                output::stream_results(aggregation, &formatter, sink).await
            }
            OutputMode::Json(path) => output::export_json(aggregation, path).await,
        }
    }
    .instrument(span)
    .await?;

    match &mode {
        OutputMode::Stream => print::stream_summary(&summary, start_time.elapsed()),
        OutputMode::Json(path) => print::json_summary(&summary, path, start_time.elapsed()),
    }

    Ok(summary)
}
