use crate::context::{DEFAULT_MIN_TOKENS, DEFAULT_TAIL_TOKENS};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const PROJECT_CONFIG_FILE: &str = ".logsight.toml";
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// What to do with a timestamp that was recognized in a line but does not
/// parse as a real date (e.g. month 13).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnparsedTimestampPolicy {
    /// Leave the line off the timeline.
    #[default]
    Skip,
    /// Place the line on the timeline at the current time, flagged as a fallback.
    UseNow,
}

/// Which predicate decides "is an error line" for `error_rate` and `top_errors`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorRateBasis {
    /// Literal `"error"` substring only.
    #[default]
    Keyword,
    /// The full error keyword set used for classified errors.
    Classified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub unparsed_timestamps: UnparsedTimestampPolicy,
    pub error_rate_basis: ErrorRateBasis,
    pub top_errors_limit: usize,
    pub context_min_tokens: usize,
    pub context_tail_tokens: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            unparsed_timestamps: UnparsedTimestampPolicy::default(),
            error_rate_basis: ErrorRateBasis::default(),
            top_errors_limit: 5,
            context_min_tokens: DEFAULT_MIN_TOKENS,
            context_tail_tokens: DEFAULT_TAIL_TOKENS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Files larger than this are rejected before analysis.
    pub max_file_size_bytes: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// How reports are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    #[serde(alias = "text")]
    Console,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::Config(format!("Invalid output format: {}", s))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Console => write!(f, "console"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub ingest: IngestConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load the first config file found, or defaults when there is none.
    pub fn load() -> Result<Self> {
        match Self::get_config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No config file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn get_config_path() -> Option<PathBuf> {
        // Check for project-level config first
        if let Ok(current_dir) = env::current_dir() {
            let project_config = current_dir.join(PROJECT_CONFIG_FILE);
            if project_config.exists() {
                return Some(project_config);
            }
        }

        // Check for user-level config
        if let Some(home_dir) = dirs::home_dir() {
            let user_config = home_dir.join(".config").join("logsight").join("config.toml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analysis.top_errors_limit, 5);
        assert_eq!(config.analysis.context_min_tokens, 10);
        assert_eq!(config.analysis.context_tail_tokens, 5);
        assert_eq!(config.analysis.unparsed_timestamps, UnparsedTimestampPolicy::Skip);
        assert_eq!(config.analysis.error_rate_basis, ErrorRateBasis::Keyword);
        assert_eq!(config.ingest.max_file_size_bytes, 100 * 1024 * 1024);
        assert_eq!(config.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [analysis]
            unparsed_timestamps = "use_now"
            error_rate_basis = "classified"
            "#,
        )
        .unwrap();

        assert_eq!(config.analysis.unparsed_timestamps, UnparsedTimestampPolicy::UseNow);
        assert_eq!(config.analysis.error_rate_basis, ErrorRateBasis::Classified);
        assert_eq!(config.analysis.top_errors_limit, 5);
        assert_eq!(config.ingest, IngestConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml("[analysis]\ntop_errors_limit = \"many\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(!err.is_ingestion());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ingest]\nmax_file_size_bytes = 1024\n[output]\nformat = \"json\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.ingest.max_file_size_bytes, 1024);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_output_format_fails_at_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nformat = \"jsno\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!(Config::from_toml("[output]\nformat = \"text\"").unwrap().output.format, OutputFormat::Console);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("console".parse::<OutputFormat>().unwrap(), OutputFormat::Console);

        let err = "pdf".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: Invalid output format: pdf");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
