use std::io::{self, BufRead};

use tracing::warn;

/// The positional target if one was given, otherwise every line of stdin.
pub fn collect_inputs(target: Option<String>) -> Vec<String> {
    match target {
        Some(target) => read_lines(target.as_bytes()),
        None => read_lines(io::stdin().lock()),
    }
}

/// Trimmed, non-blank lines until end of input.
///
/// A read error stops reading; the lines read so far are kept.
pub fn read_lines<R: BufRead>(reader: R) -> Vec<String> {
    let mut lines = Vec::new();

    for line in reader.lines() {
        match line {
            Ok(line) => {
                let line = line.trim();
                if !line.is_empty() {
                    lines.push(line.to_string());
                }
            }
            Err(e) => {
                warn!("failed to read input: {e}");
                break;
            }
        }
    }

    lines
}
