use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "trunkcheck",
    version,
    about = "Trunk-based development and CI/CD readiness analysis for git repositories"
)]
pub struct Cli {
    /// Repository URL or local path
    pub repository: String,

    /// Output file path (default: analysis_report.html or analysis_report.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "html")]
    pub format: ReportFormat,

    /// List every branch and developer in the report
    #[arg(short, long)]
    pub detailed: bool,

    /// Include implementation suggestions
    #[arg(short, long)]
    pub suggestions: bool,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Html,
    Json,
}

impl ReportFormat {
    pub fn default_output(self) -> PathBuf {
        match self {
            Self::Html => PathBuf::from("analysis_report.html"),
            Self::Json => PathBuf::from("analysis_report.json"),
        }
    }
}
