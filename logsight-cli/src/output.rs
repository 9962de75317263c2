use anyhow::Result;
use logsight_core::{AnalysisResult, OutputFormat};
use std::fmt::Write;

/// Render one report per analyzed file. JSON output is a single document for
/// one file and an array for several.
pub fn render(results: &[AnalysisResult], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => match results {
            [single] => Ok(single.to_json_pretty()?),
            _ => Ok(serde_json::to_string_pretty(results)?),
        },
        OutputFormat::Console => {
            let mut out = String::new();
            for (index, result) in results.iter().enumerate() {
                if index > 0 {
                    out.push('\n');
                }
                write_console(&mut out, result)?;
            }
            Ok(out)
        }
    }
}

fn write_console(out: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    let summary = &result.summary;
    let stats = &result.statistics;

    writeln!(out, "=== {} ({} bytes) ===", result.file.name, result.file.size)?;
    writeln!(out, "Analyzed: {}", result.file.analysis_date.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(
        out,
        "Lines: {} | Errors: {} ({} critical) | Warnings: {} | Security events: {}",
        summary.total_lines,
        summary.error_count,
        summary.critical_error_count,
        summary.warning_count,
        summary.security_event_count
    )?;
    writeln!(out, "Time range: {}", summary.time_range)?;

    if !summary.key_findings.is_empty() {
        writeln!(out, "\nKey findings:")?;
        for finding in &summary.key_findings {
            writeln!(out, "  - {}", finding)?;
        }
    }

    writeln!(out, "\nStatistics:")?;
    writeln!(out, "  Error rate: {:.1}%", stats.error_rate)?;
    writeln!(out, "  Warning rate: {:.1}%", stats.warning_rate)?;
    writeln!(out, "  Average line length: {}", stats.average_line_length)?;
    writeln!(out, "  Time span: {}", format_span(stats.time_span_seconds))?;

    if !stats.top_errors.is_empty() {
        writeln!(out, "\nTop errors:")?;
        for frequency in &stats.top_errors {
            writeln!(out, "  {:>4}x  {}", frequency.count, frequency.line.trim())?;
        }
    }

    if !result.errors.is_empty() {
        writeln!(out, "\nErrors:")?;
        for error in &result.errors {
            writeln!(
                out,
                "  [{}] line {}: {}",
                error.severity, error.line_number, error.message
            )?;
        }
    }

    if !result.warnings.is_empty() {
        writeln!(out, "\nWarnings:")?;
        for warning in &result.warnings {
            writeln!(out, "  line {}: {}", warning.line_number, warning.message)?;
        }
    }

    if !result.security_events.is_empty() {
        writeln!(out, "\nSecurity events:")?;
        for event in &result.security_events {
            writeln!(
                out,
                "  [{}] {} line {}: {}",
                event.severity, event.event_type, event.line_number, event.description
            )?;
        }
    }

    if !result.timeline.is_empty() {
        writeln!(out, "\nTimeline:")?;
        for entry in &result.timeline {
            writeln!(
                out,
                "  {}  {:<8} {}{}",
                entry.instant.format("%Y-%m-%d %H:%M:%S"),
                entry.event_kind.to_string(),
                entry.event_text,
                if entry.fallback { " (time unknown)" } else { "" }
            )?;
        }
    }

    Ok(())
}

fn format_span(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{}h {:02}m {:02}s", hours, minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use logsight_core::analyze;

    #[test]
    fn test_console_sections() {
        let content = "2024-01-01 10:00:00 login failed\n2024-01-01 11:30:05 warning: slow\n";
        let result = analyze("auth.log", content.len() as u64, content);
        let text = render(&[result], OutputFormat::Console).unwrap();

        assert!(text.starts_with("=== auth.log (67 bytes) ==="));
        assert!(text.contains("Time range: 2024-01-01 10:00:00 to 2024-01-01 11:30:05"));
        assert!(text.contains("  - Found 1 error(s)"));
        assert!(text.contains("  Time span: 1h 30m 05s"));
        assert!(text.contains("[MEDIUM] line 1: 2024-01-01 10:00:00 login failed"));
        assert!(text.contains("[LOW] Authentication line 1:"));
        assert!(text.contains("line 2: 2024-01-01 11:30:05 warning: slow"));
        assert!(!text.contains("Top errors:"));
    }

    #[test]
    fn test_json_single_and_many() {
        let one = analyze("one.log", 0, "error");
        let two = analyze("two.log", 0, "warning");

        let single: serde_json::Value =
            serde_json::from_str(&render(&[one.clone()], OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(single["file"]["name"], "one.log");
        assert_eq!(single["errors"][0]["severity"], "Medium");

        let many: serde_json::Value =
            serde_json::from_str(&render(&[one, two], OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(many.as_array().unwrap().len(), 2);
        assert_eq!(many[1]["file"]["name"], "two.log");
    }

    #[test]
    fn test_format_span() {
        assert_eq!(format_span(0), "0h 00m 00s");
        assert_eq!(format_span(90061), "25h 01m 01s");
    }
}
