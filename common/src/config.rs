use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://internetdb.shodan.io";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Config {
    /// Hides the `CPEs` line in streamed output.
    pub hide_cpes: bool,
    /// Hides the `Hostnames` line in streamed output.
    pub hide_hostnames: bool,
    /// Hides the `Tags` line in streamed output.
    pub hide_tags: bool,
    /// Hides the `Vulnerabilities` line in streamed output.
    pub hide_vulns: bool,
    /// Forces plain text for every category.
    pub no_color: bool,
    /// Emits per-target failure diagnostics.
    ///
    /// Never changes what a lookup returns.
    pub verbose: bool,
    /// Destination of the JSON array. `None` or an empty path selects streaming mode.
    pub json_output: Option<PathBuf>,
    /// Base URL of the lookup endpoint; the address is appended as the last path segment.
    pub endpoint: String,
    /// Per-request timeout. Expiry counts as a transport failure for that target only.
    pub timeout: Duration,
    /// Upper bound on in-flight lookups. `None` spawns one task per target with no cap.
    pub concurrency: Option<usize>,
    /// Deliver results in input order instead of completion order.
    pub ordered: bool,
}

/// How the aggregated results leave the process. Chosen once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    Stream,
    Json(PathBuf),
}

impl Config {
    pub fn output_mode(&self) -> OutputMode {
        match &self.json_output {
            Some(path) if !path.as_os_str().is_empty() => OutputMode::Json(path.clone()),
            _ => OutputMode::Stream,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hide_cpes: false,
            hide_hostnames: false,
            hide_tags: false,
            hide_vulns: false,
            no_color: false,
            verbose: false,
            json_output: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            concurrency: None,
            ordered: false,
        }
    }
}
