use std::io::Write;

use anyhow::Context;
use ipintel_common::config::Config;
use ipintel_common::record::LookupRecord;

use super::RunSummary;
use crate::dispatch::Aggregation;

/// The colorable parts of a rendered record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ports,
    Cpes,
    Vulnerabilities,
    Hostnames,
    Tags,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Ports => "Ports",
            Category::Cpes => "CPEs",
            Category::Vulnerabilities => "Vulnerabilities",
            Category::Hostnames => "Hostnames",
            Category::Tags => "Tags",
        }
    }
}

/// Decorates a rendered value for its category, e.g. with ANSI colors.
pub trait Painter: Send + Sync {
    fn paint(&self, category: Category, text: &str) -> String;
}

/// Leaves every value untouched.
pub struct PlainPainter;

impl Painter for PlainPainter {
    fn paint(&self, _category: Category, text: &str) -> String {
        text.to_string()
    }
}

/// Renders one record as a text block.
///
/// The `Ports` line is always present. The other categories show up only when
/// they are not hidden and have at least one entry.
pub struct StreamFormatter {
    show_cpes: bool,
    show_vulns: bool,
    show_hostnames: bool,
    show_tags: bool,
    painter: Box<dyn Painter>,
}

impl StreamFormatter {
    pub fn new(painter: Box<dyn Painter>) -> Self {
        Self {
            show_cpes: true,
            show_vulns: true,
            show_hostnames: true,
            show_tags: true,
            painter,
        }
    }

    pub fn from_config(cfg: &Config, painter: Box<dyn Painter>) -> Self {
        Self {
            show_cpes: !cfg.hide_cpes,
            show_vulns: !cfg.hide_vulns,
            show_hostnames: !cfg.hide_hostnames,
            show_tags: !cfg.hide_tags,
            painter,
        }
    }

    /// `None` for empty records.
    pub fn render(&self, record: &LookupRecord) -> Option<String> {
        if record.is_empty() {
            return None;
        }

        let ports = record
            .open_ports
            .iter()
            .map(u16::to_string)
            .collect::<Vec<String>>()
            .join(", ");

        let mut block = format!("{}\n", record.address);
        block.push_str(&self.line(Category::Ports, &ports));

        let optional: [(Category, bool, &[String]); 4] = [
            (Category::Cpes, self.show_cpes, record.cpes.as_slice()),
            (
                Category::Vulnerabilities,
                self.show_vulns,
                record.vulnerabilities.as_slice(),
            ),
            (Category::Hostnames, self.show_hostnames, record.hostnames.as_slice()),
            (Category::Tags, self.show_tags, record.tags.as_slice()),
        ];

        for (category, shown, values) in optional {
            if shown && !values.is_empty() {
                block.push_str(&self.line(category, &values.join(", ")));
            }
        }

        block.push('\n');
        Some(block)
    }

    fn line(&self, category: Category, value: &str) -> String {
        format!(
            "{}: {}\n",
            category.label(),
            self.painter.paint(category, value)
        )
    }
}

/// Renders records in arrival order as they come off the channel.
pub async fn stream_results<W: Write>(
    mut aggregation: Aggregation,
    formatter: &StreamFormatter,
    sink: &mut W,
) -> anyhow::Result<RunSummary> {
    let mut summary = RunSummary::default();

    while let Some(record) = aggregation.next().await {
        summary.received += 1;
        let Some(block) = formatter.render(&record) else {
            continue;
        };
        sink.write_all(block.as_bytes())
            .and_then(|_| sink.flush())
            .context("writing lookup result")?;
        summary.reported += 1;
    }

    aggregation.finish().await?;
    Ok(summary)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
