use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::High => write!(f, "HIGH"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::Low => write!(f, "LOW"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SecurityEventType {
    Authentication,
    Authorization,
    FileAccess,
    NetworkActivity,
    SystemChange,
    SuspiciousActivity,
}

impl fmt::Display for SecurityEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityEventType::Authentication => write!(f, "Authentication"),
            SecurityEventType::Authorization => write!(f, "Authorization"),
            SecurityEventType::FileAccess => write!(f, "File Access"),
            SecurityEventType::NetworkActivity => write!(f, "Network Activity"),
            SecurityEventType::SystemChange => write!(f, "System Change"),
            SecurityEventType::SuspiciousActivity => write!(f, "Suspicious Activity"),
        }
    }
}

/// Coarse display category used for timeline entries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EventKind {
    Error,
    Warning,
    Info,
    Security,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Error => write!(f, "ERROR"),
            EventKind::Warning => write!(f, "WARNING"),
            EventKind::Info => write!(f, "INFO"),
            EventKind::Security => write!(f, "SECURITY"),
        }
    }
}

/// One row of an ordered rule table: if the lower-cased line contains any of
/// `keywords`, the rule yields `outcome`.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T> {
    pub keywords: &'static [&'static str],
    pub outcome: T,
}

impl<T: Copy> KeywordRule<T> {
    const fn new(keywords: &'static [&'static str], outcome: T) -> Self {
        Self { keywords, outcome }
    }

    pub fn matches(&self, lowered: &str) -> bool {
        contains_any(lowered, self.keywords)
    }
}

/// First rule that matches wins; `fallback` when none do.
fn first_match<T: Copy>(rules: &[KeywordRule<T>], lowered: &str, fallback: T) -> T {
    rules
        .iter()
        .find(|rule| rule.matches(lowered))
        .map(|rule| rule.outcome)
        .unwrap_or(fallback)
}

pub(crate) fn contains_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| lowered.contains(keyword))
}

/// A line announcing a critical or fatal condition is an error even without the word "error".
pub const ERROR_KEYWORDS: &[&str] = &["error", "failed", "exception", "critical", "fatal"];
pub const WARNING_KEYWORDS: &[&str] = &["warning", "warn"];
pub const SECURITY_KEYWORDS: &[&str] = &[
    "authentication",
    "authorization",
    "login",
    "access denied",
    "permission",
    "unauthorized",
];

const ERROR_SEVERITY_RULES: &[KeywordRule<Severity>] = &[
    KeywordRule::new(&["critical", "fatal"], Severity::Critical),
    KeywordRule::new(&["severe", "major"], Severity::High),
    KeywordRule::new(&["minor", "info"], Severity::Low),
];

const SECURITY_TYPE_RULES: &[KeywordRule<SecurityEventType>] = &[
    KeywordRule::new(&["authentication", "login"], SecurityEventType::Authentication),
    KeywordRule::new(&["authorization", "permission"], SecurityEventType::Authorization),
    KeywordRule::new(&["file", "directory"], SecurityEventType::FileAccess),
    KeywordRule::new(&["network", "connection"], SecurityEventType::NetworkActivity),
    KeywordRule::new(&["system", "config"], SecurityEventType::SystemChange),
];

const SECURITY_SEVERITY_RULES: &[KeywordRule<Severity>] = &[
    KeywordRule::new(&["critical", "fatal"], Severity::Critical),
    KeywordRule::new(&["high", "severe"], Severity::High),
    KeywordRule::new(&["medium", "moderate"], Severity::Medium),
];

const TIMELINE_KIND_RULES: &[KeywordRule<EventKind>] = &[
    KeywordRule::new(&["error", "critical", "fatal"], EventKind::Error),
    KeywordRule::new(&["warning"], EventKind::Warning),
    KeywordRule::new(&["security", "auth"], EventKind::Security),
];

/// Every judgment the classifier makes about a single line.
///
/// Categories are independent: a line can be an error and a security event at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClassification {
    pub error: Option<Severity>,
    pub warning: bool,
    pub security: Option<(SecurityEventType, Severity)>,
    pub timeline_kind: EventKind,
}

/// Case-insensitive keyword classifier. Matching is plain substring search on
/// the lower-cased line, with no tokenization or word boundaries.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    error_keywords: &'static [&'static str],
    warning_keywords: &'static [&'static str],
    security_keywords: &'static [&'static str],
    error_severity_rules: &'static [KeywordRule<Severity>],
    security_type_rules: &'static [KeywordRule<SecurityEventType>],
    security_severity_rules: &'static [KeywordRule<Severity>],
    timeline_kind_rules: &'static [KeywordRule<EventKind>],
}

impl LineClassifier {
    pub fn new() -> Self {
        Self {
            error_keywords: ERROR_KEYWORDS,
            warning_keywords: WARNING_KEYWORDS,
            security_keywords: SECURITY_KEYWORDS,
            error_severity_rules: ERROR_SEVERITY_RULES,
            security_type_rules: SECURITY_TYPE_RULES,
            security_severity_rules: SECURITY_SEVERITY_RULES,
            timeline_kind_rules: TIMELINE_KIND_RULES,
        }
    }

    pub fn classify(&self, line: &str) -> LineClassification {
        let lowered = line.to_lowercase();

        let error = contains_any(&lowered, self.error_keywords)
            .then(|| self.error_severity(&lowered));
        let warning = contains_any(&lowered, self.warning_keywords);
        let security = contains_any(&lowered, self.security_keywords).then(|| {
            (
                self.security_event_type(&lowered),
                self.security_severity(&lowered),
            )
        });

        LineClassification {
            error,
            warning,
            security,
            timeline_kind: self.timeline_kind(&lowered),
        }
    }

    /// Whether a line counts as an error under the full keyword set.
    pub fn is_error(&self, line: &str) -> bool {
        contains_any(&line.to_lowercase(), self.error_keywords)
    }

    // The helpers below expect an already lower-cased line.

    fn error_severity(&self, lowered: &str) -> Severity {
        first_match(self.error_severity_rules, lowered, Severity::Medium)
    }

    fn security_event_type(&self, lowered: &str) -> SecurityEventType {
        first_match(
            self.security_type_rules,
            lowered,
            SecurityEventType::SuspiciousActivity,
        )
    }

    fn security_severity(&self, lowered: &str) -> Severity {
        first_match(self.security_severity_rules, lowered, Severity::Low)
    }

    fn timeline_kind(&self, lowered: &str) -> EventKind {
        first_match(self.timeline_kind_rules, lowered, EventKind::Info)
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}
