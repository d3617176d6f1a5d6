//! Intermediate Checkstyle report model produced by the parser.
//!
//! The model holds owned values only; nothing refers back to the XML tree.

/// Root of a parsed Checkstyle report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckstyleReport {
    /// Checkstyle tool version from the root `version` attribute, if declared.
    pub version: Option<String>,
    /// Files in document order. Empty when the report lists no files.
    pub file: Vec<CheckstyleFile>,
}

/// One `<file>` entry and its findings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckstyleFile {
    /// Path exactly as written in the report; may be empty.
    pub name: String,
    pub error: Vec<CheckstyleError>,
}

/// One `<error>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckstyleError {
    /// 1-based line; defaults to 1.
    pub line: u32,
    /// 1-based column, when the report carries a numeric one.
    pub column: Option<u32>,
    pub severity: Severity,
    pub message: String,
    /// Fully-qualified check name, e.g. `com.puppycrawl.tools.checkstyle.checks.FooCheck`.
    pub source: String,
}

impl Default for CheckstyleError {
    fn default() -> Self {
        Self {
            line: 1,
            column: None,
            severity: Severity::Warning,
            message: String::new(),
            source: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Checkstyle severity after normalization.
pub enum Severity {
    Error,
    Warning,
    Info,
    Ignore,
}

impl Severity {
    /// Normalize a raw severity attribute.
    ///
    /// Matching is case-insensitive and `warn` is accepted as a synonym of
    /// `warning`. Anything unrecognized, including a missing value, is a warning.
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Severity::Warning;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "error" => Severity::Error,
            "info" => Severity::Info,
            "ignore" => Severity::Ignore,
            _ => Severity::Warning,
        }
    }
}
