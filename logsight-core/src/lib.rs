// LogSight Library - Core log analysis engine
//
// Turns the full text of a log file into a structured report: classified
// errors, warnings and security events, a chronological timeline, and
// aggregate statistics. Analysis is a pure function of its input and keeps
// no state between calls.

pub mod classifier;
pub mod config;
pub mod context;
pub mod error;
pub mod input;
pub mod model;
pub mod report;
pub mod stats;
pub mod timestamp;

pub use classifier::{EventKind, LineClassification, LineClassifier, SecurityEventType, Severity};
pub use config::{AnalysisConfig, Config, ErrorRateBasis, OutputFormat, UnparsedTimestampPolicy};
pub use context::extract_context;
pub use error::{Error, Result};
pub use input::{decode_log_bytes, LogInput};
#[cfg(feature = "ingest")]
pub use input::read_log_file;
pub use model::{
    AnalysisResult, AnalysisSummary, ClassifiedError, ClassifiedWarning, ErrorFrequency, FileInfo,
    SecurityEvent, Statistics, TimelineEntry,
};
pub use report::{analyze, ReportBuilder, NO_TIMESTAMPS_FOUND};
pub use stats::aggregate;
pub use timestamp::{extract_timestamp, parse_timestamp, parse_timestamp_or_now, ParsedTimestamp};

