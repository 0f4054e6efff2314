pub mod lookup;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use ipintel_common::config::{Config, DEFAULT_ENDPOINT};

#[derive(Parser)]
#[command(name = "ipintel")]
#[command(version)]
#[command(about = "Look up open ports, CPEs, vulnerabilities, hostnames and tags of IP addresses.")]
#[command(after_help = "Short flag aliases take two dashes: --nc, --nh, --nt, --nv, --nocolor.")]
pub struct CommandLine {
    /// Address or CIDR block to look up. Reads one target per line from stdin when omitted
    pub target: Option<String>,

    /// Hide CPEs
    #[arg(long = "no-cpes", visible_alias = "nc")]
    pub no_cpes: bool,

    /// Hide hostnames
    #[arg(long = "no-hostnames", visible_alias = "nh")]
    pub no_hostnames: bool,

    /// Hide tags
    #[arg(long = "no-tags", visible_alias = "nt")]
    pub no_tags: bool,

    /// Hide vulnerabilities
    #[arg(long = "no-vulns", visible_alias = "nv")]
    pub no_vulns: bool,

    /// Disable color in output
    #[arg(long = "no-color", visible_alias = "nocolor")]
    pub no_color: bool,

    /// Show why individual lookups failed
    #[arg(short, long)]
    pub verbose: bool,

    /// Save output to a JSON file instead of printing it
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Base URL of the lookup endpoint
    #[arg(long, env = "IPINTEL_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Maximum number of lookups in flight (unbounded by default)
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Print results in input order instead of as they arrive
    #[arg(long)]
    pub ordered: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            hide_cpes: self.no_cpes,
            hide_hostnames: self.no_hostnames,
            hide_tags: self.no_tags,
            hide_vulns: self.no_vulns,
            no_color: self.no_color,
            verbose: self.verbose,
            json_output: self.json.clone(),
            endpoint: self.endpoint.clone(),
            timeout: Duration::from_secs(self.timeout),
            concurrency: self.concurrency,
            ordered: self.ordered,
        }
    }
}
