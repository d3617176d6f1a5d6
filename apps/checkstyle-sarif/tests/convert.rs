use checkstyle_sarif::{convert, convert_with, ConvertError, ConvertOptions, ParseError};
use serde_json::Value;

const SAMPLE: &str = include_str!("fixtures/checkstyle-result.xml");
const EMPTY: &str = include_str!("fixtures/empty-report.xml");

fn to_value(xml: &str) -> Value {
    serde_json::from_str(&convert(xml, Some(2)).unwrap()).unwrap()
}

#[test]
fn results_follow_file_then_error_order() {
    let v = to_value(SAMPLE);
    let results = v["runs"][0]["results"].as_array().unwrap();
    assert_eq!(results.len(), 6);
    let lines: Vec<_> = results
        .iter()
        .map(|r| r["locations"][0]["physicalLocation"]["region"]["startLine"].as_u64().unwrap())
        .collect();
    assert_eq!(lines, vec![17, 42, 3, 8, 9, 1]);
}

#[test]
fn levels_map_from_severities() {
    let v = to_value(SAMPLE);
    let levels: Vec<_> = v["runs"][0]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["level"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        levels,
        vec!["error", "warning", "note", "none", "warning", "warning"]
    );
}

#[test]
fn rules_are_deduplicated_and_indexed() {
    let v = to_value(SAMPLE);
    let run = &v["runs"][0];
    let rules = run["tool"]["driver"]["rules"].as_array().unwrap();
    let ids: Vec<_> = rules.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(
        ids,
        vec![
            "IndentationCheck",
            "LineLengthCheck",
            "MissingJavadocTypeCheck",
            "UnusedImportsCheck",
            "UnknownRule",
        ]
    );
    for result in run["results"].as_array().unwrap() {
        let idx = result["ruleIndex"].as_u64().unwrap() as usize;
        assert_eq!(rules[idx]["id"], result["ruleId"]);
    }
    assert_eq!(
        rules[1]["helpUri"],
        "https://checkstyle.org/checks/misc/linelengthcheck.html"
    );
    assert!(rules[4].get("helpUri").is_none());
}

#[test]
fn artifact_uris_are_normalized() {
    let v = to_value(SAMPLE);
    let uris: Vec<_> = v["runs"][0]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| {
            r["locations"][0]["physicalLocation"]["artifactLocation"]["uri"]
                .as_str()
                .unwrap()
                .to_string()
        })
        .collect();
    assert_eq!(uris[0], "file:///home/ci/project/src/main/java/com/acme/App.java");
    assert_eq!(uris[2], "file:///C:/build/project/src/main/java/com/acme/Util.java");
    assert_eq!(uris[5], "src/test/java/com/acme/UtilTest.java");
}

#[test]
fn start_column_only_when_positive() {
    let v = to_value(SAMPLE);
    let results = v["runs"][0]["results"].as_array().unwrap();
    let region = |i: usize| results[i]["locations"][0]["physicalLocation"]["region"].clone();
    assert_eq!(region(0)["startColumn"], 17);
    assert!(region(1).get("startColumn").is_none());
    assert!(region(4).get("startColumn").is_none());
}

#[test]
fn concrete_single_error_scenario() {
    let xml = r#"<checkstyle version="9.0"><file name="Foo.java"><error line="1" column="1" severity="error" message="Test error" source="com.example.TestCheck"/></file></checkstyle>"#;
    let v = to_value(xml);
    let run = &v["runs"][0];
    let result = &run["results"][0];
    assert_eq!(result["ruleId"], "TestCheck");
    assert_eq!(result["ruleIndex"], 0);
    assert_eq!(result["level"], "error");
    assert_eq!(result["message"]["text"], "Test error");
    assert_eq!(
        result["locations"][0]["physicalLocation"]["region"],
        serde_json::json!({"startLine": 1, "startColumn": 1})
    );
    assert_eq!(run["tool"]["driver"]["version"], "9.0");
}

#[test]
fn empty_report_has_no_rules_key() {
    let v = to_value(EMPTY);
    let run = &v["runs"][0];
    assert_eq!(run["results"], serde_json::json!([]));
    assert!(run["tool"]["driver"].get("rules").is_none());
    assert_eq!(run["tool"]["driver"]["version"], "8.41");
    assert_eq!(run["columnKind"], "utf16CodeUnits");
}

#[test]
fn top_level_shape() {
    let out = convert(EMPTY, None).unwrap();
    assert!(out.starts_with(
        r#"{"version":"2.1.0","$schema":"https://docs.oasis-open.org/sarif/sarif/v2.1.0/cos02/schemas/sarif-schema-2.1.0.json","runs":[{"tool":{"driver":{"name":"Checkstyle","version":"8.41","informationUri":"https://checkstyle.org"}},"results":[],"columnKind":"utf16CodeUnits"}]}"#
    ));
}

#[test]
fn conversion_is_deterministic() {
    let a = convert(SAMPLE, Some(2)).unwrap();
    let b = convert(SAMPLE, Some(2)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn tool_version_override_wins() {
    let out = convert_with(
        SAMPLE,
        &ConvertOptions {
            indent: None,
            tool_version: Some("override-1".into()),
        },
    )
    .unwrap();
    let v: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["runs"][0]["tool"]["driver"]["version"], "override-1");
}

#[test]
fn missing_version_is_omitted() {
    let v = to_value("<checkstyle><file name=\"a\"/></checkstyle>");
    assert!(v["runs"][0]["tool"]["driver"].get("version").is_none());
}

#[test]
fn input_errors_surface_with_cause() {
    assert!(matches!(
        convert("", None),
        Err(ConvertError::Parse(ParseError::Empty))
    ));
    assert!(matches!(
        convert("<report/>", None),
        Err(ConvertError::Parse(ParseError::MissingRoot))
    ));
    let err = convert("<checkstyle><file></checkstyle>", None).unwrap_err();
    let source = std::error::Error::source(&err).expect("parse error cause");
    assert!(std::error::Error::source(source).is_some());
}
