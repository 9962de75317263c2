// Report data model
//
// Every finding is created once during the classification pass and is never
// mutated afterwards. The root `AnalysisResult` is handed to the caller and
// the engine keeps no reference to it.

use crate::classifier::{EventKind, SecurityEventType, Severity};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A line that matched the error keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedError {
    /// 1-based position in the original file
    pub line_number: usize,
    /// The original line, trimmed
    pub message: String,
    pub severity: Severity,
    /// Raw timestamp text as it appeared in the line
    pub timestamp: Option<String>,
    pub context: Option<String>,
}

/// A line that matched the warning keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedWarning {
    pub line_number: usize,
    pub message: String,
    pub timestamp: Option<String>,
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityEvent {
    pub line_number: usize,
    pub timestamp: Option<String>,
    pub event_type: SecurityEventType,
    pub description: String,
    pub severity: Severity,
}

/// A line with a recognized timestamp, placed on the reconstructed timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub instant: NaiveDateTime,
    pub event_text: String,
    pub event_kind: EventKind,
    pub line_number: usize,
    /// Set when `instant` is the analysis wall-clock time rather than a parsed value.
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorFrequency {
    /// Exact raw line text
    pub line: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_lines: usize,
    /// Percentage in `[0, 100]`
    pub error_rate: f64,
    /// Percentage in `[0, 100]`
    pub warning_rate: f64,
    /// Mean line length in characters, truncated
    pub average_line_length: usize,
    /// Seconds between the earliest and latest parsed timestamp
    pub time_span_seconds: i64,
    /// Most frequent error lines, descending by count
    pub top_errors: Vec<ErrorFrequency>,
}

impl Statistics {
    pub fn time_span(&self) -> Duration {
        Duration::seconds(self.time_span_seconds)
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            total_lines: 0,
            error_rate: 0.0,
            warning_rate: 0.0,
            average_line_length: 0,
            time_span_seconds: 0,
            top_errors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_lines: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub security_event_count: usize,
    pub critical_error_count: usize,
    pub key_findings: Vec<String>,
    pub time_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    /// Size in bytes as reported by the caller
    pub size: u64,
    pub analysis_date: DateTime<Utc>,
}

/// Complete analysis of one log file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub file: FileInfo,
    /// The untouched input, kept for side-by-side display
    pub raw_content: String,
    pub summary: AnalysisSummary,
    pub errors: Vec<ClassifiedError>,
    pub warnings: Vec<ClassifiedWarning>,
    pub security_events: Vec<SecurityEvent>,
    pub timeline: Vec<TimelineEntry>,
    pub statistics: Statistics,
}

impl AnalysisResult {
    /// Copy of this result with `analysis_date` reset to the Unix epoch.
    pub fn without_analysis_date(&self) -> AnalysisResult {
        let mut result = self.clone();
        result.file.analysis_date = DateTime::<Utc>::default();
        result
    }

    /// Compare two results while ignoring when each analysis ran.
    pub fn same_analysis(&self, other: &AnalysisResult) -> bool {
        self.without_analysis_date() == other.without_analysis_date()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
