use std::path::Path;
use std::time::Duration;

use colored::*;
use ipintel_core::output::RunSummary;
use tracing_indicatif::suspend_tracing_indicatif;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

/// Chrome goes to stderr so stdout carries nothing but results.
pub fn print(msg: &str) {
    suspend_tracing_indicatif(|| eprintln!("{msg}"));
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().color(colors::PRIMARY),
        "─".repeat(right)
    )
    .color(colors::SEPARATOR);

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR);
    print(&format!("{}", sep));
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{}{}", space, msg));
}

pub fn summary_line(summary: &RunSummary, total_time: Duration) -> String {
    let with_data: ColoredString = format!("{} with data", summary.reported).bold().green();
    let total: ColoredString = format!("{} targets", summary.received).bold();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64())
        .bold()
        .color(colors::ACCENT);

    format!("Lookup complete: {with_data} of {total} in {total_time}")
}

pub fn stream_summary(summary: &RunSummary, total_time: Duration) {
    fat_separator();
    centerln(&summary_line(summary, total_time));
}

pub fn json_summary(summary: &RunSummary, path: &Path, total_time: Duration) {
    header("json export");
    if summary.reported == 0 {
        print(&format!(
            "{} {}",
            "No target returned data,".yellow(),
            format!("{} was not written", path.display()).color(colors::TEXT_DEFAULT)
        ));
    } else {
        print(&format!(
            "Saved {} records to {}",
            summary.reported.to_string().green().bold(),
            path.display().to_string().color(colors::PRIMARY)
        ));
    }
    centerln(&summary_line(summary, total_time));
}
