use std::io::{self, Write};

use indicatif::ProgressStyle;
use tracing_indicatif::suspend_tracing_indicatif;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

const TEMPLATE: &str = "{spinner:.blue} {msg} [{bar:32.green/bright_black}] {pos}/{len} ({elapsed})";

/// Style of the bar counting finished lookups.
pub fn lookup_style() -> ProgressStyle {
    ProgressStyle::with_template(TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICKS)
        .progress_chars("━╸ ")
}

/// Writes through to `inner` with every progress bar hidden for the duration.
pub struct ProgressWriter<W> {
    inner: W,
}

impl<W: Write> ProgressWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for ProgressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        suspend_tracing_indicatif(|| self.inner.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        suspend_tracing_indicatif(|| self.inner.flush())
    }
}
