use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

const CRATES: &[&str] = &["ipintel_cli", "ipintel_core", "ipintel_common"];

/// One glyph per level. Debug lines also name the module that emitted them, so a
/// failed lookup can be told apart from a resolver note under `--verbose`.
pub struct IntelFormatter;

type Paint = fn(ColoredString) -> ColoredString;

fn glyph(level: Level) -> (&'static str, Paint) {
    match level {
        Level::ERROR => ("[-]", |s| s.red().bold()),
        Level::WARN => ("[*]", |s| s.yellow().bold()),
        Level::INFO => ("[+]", |s| s.green().bold()),
        _ => ("[?]", |s| s.blue()),
    }
}

/// `ipintel_core::lookup` becomes `core::lookup`.
fn short_target(target: &str) -> &str {
    target.strip_prefix("ipintel_").unwrap_or(target)
}

impl<S, N> FormatEvent<S, N> for IntelFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let (symbol, paint) = glyph(*meta.level());
        write!(writer, "{} ", paint(symbol.into()))?;

        if *meta.level() >= Level::DEBUG {
            write!(writer, "{} ", short_target(meta.target()).dimmed())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Default filter: our crates at `info` (`debug` when verbose), everything else at `warn`.
///
/// `RUST_LOG` overrides it.
pub fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    let ours: Vec<String> = CRATES.iter().map(|name| format!("{name}={level}")).collect();
    format!("warn,{}", ours.join(","))
}

/// Log lines go to stderr through the progress bar layer so the two never interleave.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let indicatif_layer = IndicatifLayer::new();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(IntelFormatter)
        .with_writer(indicatif_layer.get_stderr_writer());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(indicatif_layer)
        .init();
}
