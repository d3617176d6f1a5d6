//! SARIF projector: maps a `CheckstyleReport` onto a SARIF 2.1.0 log.
//!
//! Projection is a single ordered pass over files and their errors. Rules are
//! deduplicated by derived identifier (last `.` segment of the check source)
//! and registered in first-seen order, which is the order `ruleIndex` points
//! into. The function is total over any report the parser can produce.

use crate::models::checkstyle::{CheckstyleError, CheckstyleReport, Severity};
use crate::models::sarif::{
    ArtifactLocation, Driver, Level, Location, Message, PhysicalLocation, Region,
    ReportingDescriptor, Run, SarifLog, SarifResult, Tool, SARIF_SCHEMA, SARIF_VERSION,
};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::{debug, trace};

pub const TOOL_NAME: &str = "Checkstyle";
pub const TOOL_INFORMATION_URI: &str = "https://checkstyle.org";
pub const UNKNOWN_RULE: &str = "UnknownRule";
const COLUMN_KIND: &str = "utf16CodeUnits";
const HELP_URI_PREFIX: &str = "https://checkstyle.org/checks/misc/";

static DRIVE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]:/").expect("bad drive pattern"));

/// Rules collected during one projection, in first-seen order.
#[derive(Default)]
struct RuleRegistry {
    positions: HashMap<String, usize>,
    rules: Vec<ReportingDescriptor>,
}

impl RuleRegistry {
    /// Return the index of `rule_id`, registering it on first sight.
    ///
    /// Later sources mapping to the same identifier never replace the first
    /// descriptor.
    fn index_of(&mut self, rule_id: &str, source: &str) -> usize {
        if let Some(idx) = self.positions.get(rule_id) {
            return *idx;
        }
        let idx = self.rules.len();
        trace!(rule = rule_id, index = idx, "registered rule");
        self.rules.push(ReportingDescriptor {
            id: rule_id.to_string(),
            help_uri: (!source.is_empty()).then(|| help_uri(rule_id)),
        });
        self.positions.insert(rule_id.to_string(), idx);
        idx
    }
}

/// Project a report into a SARIF log with a single run.
///
/// `tool_version` overrides the report's own version when given; when
/// neither is present the driver carries no version at all.
pub fn project(report: &CheckstyleReport, tool_version: Option<&str>) -> SarifLog {
    let mut registry = RuleRegistry::default();
    let mut results = Vec::new();

    for file in &report.file {
        let uri = artifact_uri(&file.name);
        for err in &file.error {
            let rule_id = rule_id(&err.source);
            let rule_index = registry.index_of(&rule_id, &err.source);
            results.push(to_result(err, rule_id, rule_index, &uri));
        }
    }

    debug!(
        results = results.len(),
        rules = registry.rules.len(),
        "projected sarif run"
    );

    let version = tool_version
        .map(str::to_string)
        .or_else(|| report.version.clone());
    SarifLog {
        version: SARIF_VERSION.to_string(),
        schema: SARIF_SCHEMA.to_string(),
        runs: vec![Run {
            tool: Tool {
                driver: Driver {
                    name: TOOL_NAME.to_string(),
                    version,
                    information_uri: TOOL_INFORMATION_URI.to_string(),
                    rules: registry.rules,
                },
            },
            results,
            column_kind: COLUMN_KIND.to_string(),
        }],
    }
}

fn to_result(err: &CheckstyleError, rule_id: String, rule_index: usize, uri: &str) -> SarifResult {
    SarifResult {
        rule_id,
        rule_index,
        level: level(err.severity),
        message: Message {
            text: err.message.clone(),
        },
        locations: vec![Location {
            physical_location: PhysicalLocation {
                artifact_location: ArtifactLocation {
                    uri: uri.to_string(),
                },
                region: Region {
                    start_line: err.line,
                    start_column: err.column.filter(|c| *c > 0),
                },
            },
        }],
    }
}

/// Map a Checkstyle severity onto a SARIF result level.
pub fn level(severity: Severity) -> Level {
    match severity {
        Severity::Error => Level::Error,
        Severity::Warning => Level::Warning,
        Severity::Info => Level::Note,
        Severity::Ignore => Level::None,
    }
}

/// Derive a rule identifier from a check source.
///
/// Takes the last non-empty `.` segment; an empty source is `UnknownRule`.
pub fn rule_id(source: &str) -> String {
    if source.is_empty() {
        return UNKNOWN_RULE.to_string();
    }
    source
        .rsplit('.')
        .find(|seg| !seg.is_empty())
        .unwrap_or(source)
        .to_string()
}

fn help_uri(rule_id: &str) -> String {
    format!("{}{}.html", HELP_URI_PREFIX, rule_id.to_lowercase())
}

/// Render a report file path as an artifact URI.
///
/// Backslashes become forward slashes. Drive-letter and `/`-rooted paths are
/// turned into `file://` URIs; relative paths pass through unchanged so a
/// consumer can resolve them against its own base.
pub fn artifact_uri(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    if DRIVE_PATH.is_match(&normalized) {
        format!("file:///{}", normalized)
    } else if normalized.starts_with('/') {
        format!("file://{}", normalized)
    } else {
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::checkstyle::CheckstyleFile;

    fn error(source: &str, severity: Severity) -> CheckstyleError {
        CheckstyleError {
            line: 3,
            column: Some(7),
            severity,
            message: format!("from {}", source),
            source: source.to_string(),
        }
    }

    fn report(files: Vec<CheckstyleFile>) -> CheckstyleReport {
        CheckstyleReport {
            version: Some("10.3.4".into()),
            file: files,
        }
    }

    #[test]
    fn test_rule_id_derivation() {
        assert_eq!(rule_id("com.example.TestCheck"), "TestCheck");
        assert_eq!(rule_id("NoDots"), "NoDots");
        assert_eq!(rule_id(""), "UnknownRule");
        assert_eq!(rule_id("a.b.Trailing."), "Trailing");
        assert_eq!(rule_id("..."), "...");
    }

    #[test]
    fn test_artifact_uri() {
        assert_eq!(artifact_uri("/a/b.java"), "file:///a/b.java");
        assert_eq!(
            artifact_uri(r"C:\Users\x\b.java"),
            "file:///C:/Users/x/b.java"
        );
        assert_eq!(artifact_uri("d:/work/b.java"), "file:///d:/work/b.java");
        assert_eq!(artifact_uri("src/b.java"), "src/b.java");
        assert_eq!(artifact_uri(r"src\main\B.java"), "src/main/B.java");
        assert_eq!(artifact_uri(""), "");
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(level(Severity::Error), Level::Error);
        assert_eq!(level(Severity::Warning), Level::Warning);
        assert_eq!(level(Severity::Info), Level::Note);
        assert_eq!(level(Severity::Ignore), Level::None);
    }

    #[test]
    fn test_rules_deduplicated_by_derived_id() {
        let rep = report(vec![
            CheckstyleFile {
                name: "A.java".into(),
                error: vec![
                    error("com.a.LineLength", Severity::Error),
                    error("com.a.Indentation", Severity::Warning),
                ],
            },
            CheckstyleFile {
                name: "B.java".into(),
                error: vec![error("org.other.LineLength", Severity::Info)],
            },
        ]);
        let log = project(&rep, None);
        let run = &log.runs[0];
        let ids: Vec<_> = run.tool.driver.rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["LineLength", "Indentation"]);
        let indices: Vec<_> = run.results.iter().map(|r| r.rule_index).collect();
        assert_eq!(indices, vec![0, 1, 0]);
        assert_eq!(
            run.tool.driver.rules[0].help_uri.as_deref(),
            Some("https://checkstyle.org/checks/misc/linelength.html")
        );
    }

    #[test]
    fn test_unknown_rule_has_no_help_uri() {
        let rep = report(vec![CheckstyleFile {
            name: "A.java".into(),
            error: vec![error("", Severity::Error)],
        }]);
        let log = project(&rep, None);
        let rule = &log.runs[0].tool.driver.rules[0];
        assert_eq!(rule.id, "UnknownRule");
        assert!(rule.help_uri.is_none());
        assert_eq!(log.runs[0].results[0].rule_id, "UnknownRule");
    }

    #[test]
    fn test_version_override_precedence() {
        let rep = report(vec![]);
        let log = project(&rep, Some("override"));
        assert_eq!(log.runs[0].tool.driver.version.as_deref(), Some("override"));
        let log = project(&rep, None);
        assert_eq!(log.runs[0].tool.driver.version.as_deref(), Some("10.3.4"));
        let log = project(&CheckstyleReport::default(), None);
        assert!(log.runs[0].tool.driver.version.is_none());
    }

    #[test]
    fn test_non_positive_column_not_emitted() {
        let mut err = error("x.Y", Severity::Error);
        err.column = Some(0);
        let rep = report(vec![CheckstyleFile {
            name: "/abs/A.java".into(),
            error: vec![err],
        }]);
        let log = project(&rep, None);
        let loc = &log.runs[0].results[0].locations[0].physical_location;
        assert_eq!(loc.region.start_column, None);
        assert_eq!(loc.region.start_line, 3);
        assert_eq!(loc.artifact_location.uri, "file:///abs/A.java");
    }

    #[test]
    fn test_empty_report_shape() {
        let log = project(&CheckstyleReport::default(), None);
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["version"], "2.1.0");
        assert_eq!(json["$schema"], SARIF_SCHEMA);
        let run = &json["runs"][0];
        assert_eq!(run["results"].as_array().map(Vec::len), Some(0));
        assert!(run["tool"]["driver"].get("rules").is_none());
        assert!(run["tool"]["driver"].get("version").is_none());
        assert_eq!(run["tool"]["driver"]["name"], "Checkstyle");
        assert_eq!(run["tool"]["driver"]["informationUri"], "https://checkstyle.org");
        assert_eq!(run["columnKind"], "utf16CodeUnits");
    }
}
