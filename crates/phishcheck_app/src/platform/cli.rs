use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use super::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(
    name = "phishcheck",
    version,
    about = "Submit URLs to a phishing-analysis backend and show its verdicts"
)]
pub struct Cli {
    /// URLs to analyze, one submission each.
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Analysis endpoint that accepts the form POST.
    #[arg(long, env = "PHISHCHECK_ENDPOINT")]
    pub endpoint: Option<String>,

    /// RON config file. Defaults to ./phishcheck.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the final result page to this HTML file.
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Log debug detail (transport stages, request targets).
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Off,
    Terminal,
    File,
    Both,
}

impl LogTarget {
    pub fn destination(self) -> Option<LogDestination> {
        match self {
            LogTarget::Off => None,
            LogTarget::Terminal => Some(LogDestination::Terminal),
            LogTarget::File => Some(LogDestination::File),
            LogTarget::Both => Some(LogDestination::Both),
        }
    }
}
