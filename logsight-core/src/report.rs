use crate::classifier::{EventKind, LineClassifier, Severity};
use crate::config::{AnalysisConfig, UnparsedTimestampPolicy};
use crate::context::extract_context_with;
use crate::input::LogInput;
use crate::model::{
    AnalysisResult, AnalysisSummary, ClassifiedError, ClassifiedWarning, FileInfo, SecurityEvent,
    TimelineEntry,
};
use crate::stats::aggregate_extracted;
use crate::timestamp::{extract_timestamp, parse_timestamp, parse_timestamp_or_now};
use chrono::Utc;
use tracing::{debug, info};

/// Time range text used when a file contains no recognizable timestamp.
pub const NO_TIMESTAMPS_FOUND: &str = "No timestamps found";

/// Analyze a log with the default configuration.
pub fn analyze(file_name: &str, file_size: u64, content: &str) -> AnalysisResult {
    ReportBuilder::default().analyze(file_name, file_size, content)
}

/// Runs the classification, timeline and statistics passes over one log and
/// assembles the report. Holds no per-analysis state, so one builder can be
/// shared across threads and reused.
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    config: AnalysisConfig,
    classifier: LineClassifier,
}

impl ReportBuilder {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            classifier: LineClassifier::new(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(&self, file_name: &str, file_size: u64, content: &str) -> AnalysisResult {
        let analysis_date = Utc::now();
        let lines: Vec<&str> = content.lines().collect();
        let timestamps: Vec<Option<&str>> = lines.iter().map(|&line| extract_timestamp(line)).collect();
        debug!(
            "Analyzing {}: {} lines, {} with timestamps",
            file_name,
            lines.len(),
            timestamps.iter().flatten().count()
        );

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut security_events = Vec::new();
        let mut timeline = Vec::new();

        for (index, (&line, &timestamp)) in lines.iter().zip(&timestamps).enumerate() {
            let line_number = index + 1;
            let classification = self.classifier.classify(line);
            let message = line.trim();

            if let Some(severity) = classification.error {
                errors.push(ClassifiedError {
                    line_number,
                    message: message.to_string(),
                    severity,
                    timestamp: timestamp.map(str::to_string),
                    context: self.context(line),
                });
            }

            if classification.warning {
                warnings.push(ClassifiedWarning {
                    line_number,
                    message: message.to_string(),
                    timestamp: timestamp.map(str::to_string),
                    context: self.context(line),
                });
            }

            if let Some((event_type, severity)) = classification.security {
                security_events.push(SecurityEvent {
                    line_number,
                    timestamp: timestamp.map(str::to_string),
                    event_type,
                    description: message.to_string(),
                    severity,
                });
            }

            if let Some(raw) = timestamp {
                if let Some(entry) =
                    self.timeline_entry(raw, message, line_number, classification.timeline_kind)
                {
                    timeline.push(entry);
                }
            }
        }

        // Stable: entries sharing an instant keep file order
        timeline.sort_by(|a, b| a.instant.cmp(&b.instant));

        let statistics = aggregate_extracted(&lines, &timestamps, &self.config);
        let summary = AnalysisSummary {
            total_lines: lines.len(),
            error_count: errors.len(),
            warning_count: warnings.len(),
            security_event_count: security_events.len(),
            critical_error_count: errors
                .iter()
                .filter(|e| e.severity == Severity::Critical)
                .count(),
            key_findings: key_findings(&errors, &warnings, &security_events),
            time_range: time_range(&timestamps),
        };

        info!(
            "Analysis of {} complete: {} errors, {} warnings, {} security events, {} timeline entries",
            file_name,
            summary.error_count,
            summary.warning_count,
            summary.security_event_count,
            timeline.len()
        );

        AnalysisResult {
            file: FileInfo {
                name: file_name.to_string(),
                size: file_size,
                analysis_date,
            },
            raw_content: content.to_string(),
            summary,
            errors,
            warnings,
            security_events,
            timeline,
            statistics,
        }
    }

    /// Analyze a file produced by the ingestion step.
    pub fn analyze_input(&self, input: &LogInput) -> AnalysisResult {
        self.analyze(&input.file_name, input.file_size, &input.content)
    }

    fn context(&self, line: &str) -> Option<String> {
        extract_context_with(
            line,
            self.config.context_min_tokens,
            self.config.context_tail_tokens,
        )
    }

    fn timeline_entry(
        &self,
        raw: &str,
        message: &str,
        line_number: usize,
        event_kind: EventKind,
    ) -> Option<TimelineEntry> {
        let (instant, fallback) = match self.config.unparsed_timestamps {
            UnparsedTimestampPolicy::Skip => match parse_timestamp(raw) {
                Some(instant) => (instant, false),
                None => {
                    debug!("Skipping unparseable timestamp '{}' on line {}", raw, line_number);
                    return None;
                }
            },
            UnparsedTimestampPolicy::UseNow => {
                let parsed = parse_timestamp_or_now(raw);
                (parsed.instant(), parsed.is_fallback())
            }
        };

        Some(TimelineEntry {
            instant,
            event_text: message.to_string(),
            event_kind,
            line_number,
            fallback,
        })
    }
}

/// Human-readable headline findings, in a fixed order.
fn key_findings(
    errors: &[ClassifiedError],
    warnings: &[ClassifiedWarning],
    security_events: &[SecurityEvent],
) -> Vec<String> {
    let mut findings = Vec::new();

    if !errors.is_empty() {
        findings.push(format!("Found {} error(s)", errors.len()));
    }
    if !warnings.is_empty() {
        findings.push(format!("Found {} warning(s)", warnings.len()));
    }
    if !security_events.is_empty() {
        findings.push(format!("Detected {} security event(s)", security_events.len()));
    }
    if errors.iter().any(|e| e.severity == Severity::Critical) {
        findings.push("Critical errors require immediate attention".to_string());
    }

    findings
}

/// First and last timestamp text in file order, not chronological order.
fn time_range(timestamps: &[Option<&str>]) -> String {
    let mut found = timestamps.iter().flatten();
    match (found.next(), found.last()) {
        (Some(first), Some(last)) => format!("{} to {}", first, last),
        (Some(only), None) => only.to_string(),
        _ => NO_TIMESTAMPS_FOUND.to_string(),
    }
}
