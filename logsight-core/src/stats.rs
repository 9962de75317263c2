use crate::classifier::{contains_any, ERROR_KEYWORDS};
use crate::config::{AnalysisConfig, ErrorRateBasis, UnparsedTimestampPolicy};
use crate::model::{ErrorFrequency, Statistics};
use crate::timestamp::{extract_timestamp, parse_timestamp, parse_timestamp_or_now};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::debug;

/// Compute statistics over all lines with the default configuration.
pub fn aggregate(lines: &[&str]) -> Statistics {
    aggregate_with(lines, &AnalysisConfig::default())
}

pub fn aggregate_with(lines: &[&str], config: &AnalysisConfig) -> Statistics {
    let timestamps: Vec<Option<&str>> = lines.iter().map(|&line| extract_timestamp(line)).collect();
    aggregate_extracted(lines, &timestamps, config)
}

/// `timestamps[i]` must be the extracted timestamp of `lines[i]`.
pub(crate) fn aggregate_extracted(
    lines: &[&str],
    timestamps: &[Option<&str>],
    config: &AnalysisConfig,
) -> Statistics {
    let total_lines = lines.len();
    if total_lines == 0 {
        return Statistics::default();
    }

    let mut error_lines: Vec<&str> = Vec::new();
    let mut warning_count = 0usize;
    let mut total_length = 0usize;

    for &line in lines {
        let lowered = line.to_lowercase();
        if is_error_line(&lowered, config.error_rate_basis) {
            error_lines.push(line);
        }
        if lowered.contains("warning") {
            warning_count += 1;
        }
        total_length += line.chars().count();
    }

    let statistics = Statistics {
        total_lines,
        error_rate: percentage(error_lines.len(), total_lines),
        warning_rate: percentage(warning_count, total_lines),
        average_line_length: total_length / total_lines,
        time_span_seconds: time_span_seconds(timestamps, config.unparsed_timestamps),
        top_errors: top_errors(&error_lines, config.top_errors_limit),
    };

    debug!(
        "Aggregated {} lines: {} error lines, {} warning lines, span {}s",
        total_lines,
        error_lines.len(),
        warning_count,
        statistics.time_span_seconds
    );

    statistics
}

fn is_error_line(lowered: &str, basis: ErrorRateBasis) -> bool {
    match basis {
        ErrorRateBasis::Keyword => lowered.contains("error"),
        ErrorRateBasis::Classified => contains_any(lowered, ERROR_KEYWORDS),
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

fn time_span_seconds(timestamps: &[Option<&str>], policy: UnparsedTimestampPolicy) -> i64 {
    let instants: Vec<NaiveDateTime> = timestamps
        .iter()
        .flatten()
        .filter_map(|raw| match policy {
            UnparsedTimestampPolicy::Skip => parse_timestamp(raw),
            UnparsedTimestampPolicy::UseNow => Some(parse_timestamp_or_now(raw).instant()),
        })
        .collect();

    if instants.len() < 2 {
        return 0;
    }

    match (instants.iter().min(), instants.iter().max()) {
        (Some(earliest), Some(latest)) => (*latest - *earliest).num_seconds(),
        _ => 0,
    }
}

/// Group identical lines, most frequent first. Equal counts keep first-seen order.
fn top_errors(error_lines: &[&str], limit: usize) -> Vec<ErrorFrequency> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut frequencies: Vec<ErrorFrequency> = Vec::new();

    for &line in error_lines {
        match positions.get(line) {
            Some(&index) => frequencies[index].count += 1,
            None => {
                positions.insert(line, frequencies.len());
                frequencies.push(ErrorFrequency {
                    line: line.to_string(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so ties stay in insertion order
    frequencies.sort_by(|a, b| b.count.cmp(&a.count));
    frequencies.truncate(limit);
    frequencies
}
