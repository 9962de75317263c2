use clap::Parser;
use logsight_core::{Config, ErrorRateBasis, OutputFormat, UnparsedTimestampPolicy};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "logsight",
    about = "Classify errors, warnings and security events in log files and rebuild their timeline",
    version
)]
pub struct Cli {
    /// Log files to analyze
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Output format (console, json)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Configuration file (defaults to ./.logsight.toml or ~/.config/logsight/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Count every classified error line in the error rate, not only lines containing "error"
    #[arg(long)]
    pub unified_errors: bool,

    /// Put lines with unparseable timestamps on the timeline at the current time
    #[arg(long)]
    pub now_fallback: bool,

    /// Reject files larger than this many bytes
    #[arg(long, value_name = "BYTES")]
    pub max_size: Option<u64>,
}

impl Cli {
    /// Command-line flags take precedence over the configuration file.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.unified_errors {
            config.analysis.error_rate_basis = ErrorRateBasis::Classified;
        }
        if self.now_fallback {
            config.analysis.unparsed_timestamps = UnparsedTimestampPolicy::UseNow;
        }
        if let Some(max_size) = self.max_size {
            config.ingest.max_file_size_bytes = max_size;
        }
    }
}
