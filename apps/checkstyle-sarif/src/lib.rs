//! checkstyle-sarif core library.
//!
//! Converts Checkstyle XML reports into SARIF 2.1.0 logs. Conversion is a
//! pure `xml -> parse -> project -> serialize` pipeline with no shared state,
//! so independent conversions can run on any number of threads.
//!
//! High-level modules:
//! - `parser`: Checkstyle XML to the intermediate `CheckstyleReport`.
//! - `sarif`: `CheckstyleReport` to `SarifLog` (rules, levels, URIs).
//! - `models`: Intermediate report, SARIF output graph, batch outcome structs.
//! - `error`: `ParseError` and `ConvertError`.
//! - `batch`: Glob-driven multi-report conversion used by the binary.
//! - `config`: Discovery and effective configuration resolution.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `output`: Human/JSON printers for batch runs.
//! - `logging`: `tracing` subscriber setup for the binary.
//! - `utils`: Diagnostic prefixes and path display helpers.
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod parser;
pub mod sarif;
pub mod utils;

pub use error::{ConvertError, ParseError};
pub use models::{CheckstyleReport, SarifLog};

/// Options for `convert_with`.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Pretty-print with this many spaces per level; compact when `None`.
    pub indent: Option<usize>,
    /// Overrides the Checkstyle version recorded in the report.
    pub tool_version: Option<String>,
}

/// Convert Checkstyle XML into SARIF JSON text.
pub fn convert(xml: &str, indent: Option<usize>) -> Result<String, ConvertError> {
    convert_with(
        xml,
        &ConvertOptions {
            indent,
            tool_version: None,
        },
    )
}

/// Convert Checkstyle XML into SARIF JSON text using `options`.
pub fn convert_with(xml: &str, options: &ConvertOptions) -> Result<String, ConvertError> {
    let log = convert_to_log(xml, options.tool_version.as_deref())?;
    to_json(&log, options.indent)
}

/// Parse and project without serializing.
pub fn convert_to_log(xml: &str, tool_version: Option<&str>) -> Result<SarifLog, ConvertError> {
    let report = parser::parse(xml)?;
    Ok(sarif::project(&report, tool_version))
}

/// Serialize a SARIF log, compact or indented by `indent` spaces.
pub fn to_json(log: &SarifLog, indent: Option<usize>) -> Result<String, ConvertError> {
    let Some(width) = indent else {
        return Ok(serde_json::to_string(log)?);
    };
    let pad = " ".repeat(width);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(pad.as_bytes());
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(log, &mut ser)?;
    Ok(String::from_utf8(buf).expect("serde_json emits UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<checkstyle version="9.0"><file name="Foo.java"><error line="1" column="1" severity="error" message="Test error" source="com.example.TestCheck"/></file></checkstyle>"#;

    #[test]
    fn test_convert_compact_and_indented() {
        let compact = convert(SAMPLE, None).unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.starts_with(r#"{"version":"2.1.0","$schema":"#));

        let pretty = convert(SAMPLE, Some(4)).unwrap();
        assert!(pretty.contains("\n    \"version\": \"2.1.0\""));
        let a: serde_json::Value = serde_json::from_str(&compact).unwrap();
        let b: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_convert_with_tool_version_override() {
        let out = convert_with(
            SAMPLE,
            &ConvertOptions {
                indent: None,
                tool_version: Some("10.0.0".into()),
            },
        )
        .unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["runs"][0]["tool"]["driver"]["version"], "10.0.0");
    }

    #[test]
    fn test_convert_propagates_parse_errors() {
        let err = convert("   ", None).unwrap_err();
        assert!(matches!(err, ConvertError::Parse(ParseError::Empty)));
    }
}
