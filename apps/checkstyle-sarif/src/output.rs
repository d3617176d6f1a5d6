//! Output rendering for batch runs.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-report fields and a top-level summary.

use crate::models::BatchResult;
use crate::utils::{colors_enabled, display_path};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::path::Path;

fn use_colors(output: &str) -> bool {
    output != "json" && colors_enabled()
}

/// Print batch results in the requested format.
pub fn print_batch(res: &BatchResult, output: &str, base: &Path) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_batch_json(res)).unwrap_or_default()
        ),
        _ => {
            let color = use_colors(output);
            for it in &res.results {
                let input = display_path(Path::new(&it.input), base);
                match (&it.output, &it.error) {
                    (Some(out), None) => {
                        let out = display_path(Path::new(out), base);
                        let detail = format!("({} results, {} rules)", it.results, it.rules);
                        if color {
                            println!(
                                "{} {} -> {} {}",
                                "converted:".green().bold(),
                                input.bold(),
                                out,
                                detail.bright_black()
                            );
                        } else {
                            println!("converted: {} -> {} {}", input, out, detail);
                        }
                    }
                    (_, err) => {
                        let msg = err.as_deref().unwrap_or("unknown error");
                        if color {
                            println!("{} {} — {}", "failed:".red().bold(), input.bold(), msg);
                        } else {
                            println!("failed: {} — {}", input, msg);
                        }
                    }
                }
            }
            let summary = format!(
                "— Summary — converted={} failed={} results={}",
                res.summary.converted, res.summary.failed, res.summary.results
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Compose batch JSON object (pure) for testing/snapshot purposes.
pub fn compose_batch_json(res: &BatchResult) -> JsonVal {
    let items: Vec<_> = res
        .results
        .iter()
        .map(|it| {
            json!({
                "input": it.input,
                "output": it.output,
                "results": it.results,
                "rules": it.rules,
                "error": it.error,
            })
        })
        .collect();
    let summary = json!({
        "converted": res.summary.converted,
        "failed": res.summary.failed,
        "results": res.summary.results,
    });
    json!({"results": items, "summary": summary})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BatchItem, BatchSummary};

    #[test]
    fn test_compose_batch_json_shape() {
        let res = BatchResult {
            results: vec![
                BatchItem {
                    input: "a/checkstyle.xml".into(),
                    output: Some("a/checkstyle.sarif".into()),
                    results: 3,
                    rules: 2,
                    error: None,
                },
                BatchItem {
                    input: "b/checkstyle.xml".into(),
                    output: None,
                    results: 0,
                    rules: 0,
                    error: Some("empty input".into()),
                },
            ],
            summary: BatchSummary {
                converted: 1,
                failed: 1,
                results: 3,
            },
        };
        let out = compose_batch_json(&res);
        assert_eq!(out["summary"]["converted"], 1);
        assert_eq!(out["summary"]["failed"], 1);
        assert_eq!(out["results"][0]["output"], "a/checkstyle.sarif");
        assert!(out["results"][0]["error"].is_null());
        assert!(out["results"][1]["output"].is_null());
        assert_eq!(out["results"][1]["error"], "empty input");
        // preserve_order keeps insertion order of keys
        let keys: Vec<_> = out["results"][0]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["input", "output", "results", "rules", "error"]);
    }
}
