//! Batch conversion of many Checkstyle reports.
//!
//! Inputs are matched with glob patterns relative to the project root and
//! converted in parallel. Every report becomes its own SARIF log; nothing is
//! merged. Results come back sorted by input path.
//!
//! Output paths are assigned before the parallel step. An input whose target
//! is an input report, or a path already assigned to an earlier input, fails
//! instead of being written.

use crate::config::Effective;
use crate::models::{BatchItem, BatchResult, BatchSummary};
use crate::{convert_to_log, to_json};
use anyhow::Context;
use glob::glob;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Expand `patterns` against `root` into a sorted, de-duplicated file list.
pub fn collect_inputs(root: &Path, patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();
    for pat in patterns {
        let abs = if Path::new(pat).is_absolute() {
            PathBuf::from(pat)
        } else {
            root.join(pat)
        };
        let pattern = abs.to_string_lossy().to_string();
        let entries = glob(&pattern).with_context(|| format!("invalid glob pattern: {}", pat))?;
        for entry in entries {
            match entry {
                Ok(p) if p.is_file() => {
                    found.insert(p);
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "skipping unreadable path"),
            }
        }
    }
    Ok(found.into_iter().collect())
}

/// Output path for `input`: `<stem>.<extension>` in `out_dir`, or beside the input.
pub fn output_path(input: &Path, out_dir: Option<&Path>, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "checkstyle".to_string());
    let name = format!("{}.{}", stem, extension);
    match out_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

/// Convert every report matched by the effective patterns.
pub fn run_batch(eff: &Effective) -> anyhow::Result<BatchResult> {
    let inputs = collect_inputs(&eff.root, &eff.patterns)?;
    debug!(inputs = inputs.len(), "batch inputs collected");
    if let Some(dir) = eff.out_dir.as_ref() {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create output directory {}", dir.display()))?;
    }

    let targets = plan_targets(&inputs, eff);
    let items: Vec<BatchItem> = inputs
        .par_iter()
        .zip(targets.par_iter())
        .map(|(input, target)| convert_one(input, target, eff))
        .collect();

    let converted = items.iter().filter(|i| i.error.is_none()).count();
    let summary = BatchSummary {
        converted,
        failed: items.len() - converted,
        results: items.iter().map(|i| i.results).sum(),
    };
    Ok(BatchResult {
        results: items,
        summary,
    })
}

/// Assign output paths in input order, refusing overwrites of inputs and
/// targets claimed by an earlier input.
fn plan_targets(inputs: &[PathBuf], eff: &Effective) -> Vec<Result<PathBuf, String>> {
    let sources: HashSet<&Path> = inputs.iter().map(PathBuf::as_path).collect();
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    inputs
        .iter()
        .map(|input| {
            let target = output_path(input, eff.out_dir.as_deref(), &eff.extension);
            if sources.contains(target.as_path()) || same_file(input, &target) {
                return Err(format!(
                    "output {} would overwrite an input report",
                    target.display()
                ));
            }
            if let Some(first) = claimed.get(&target) {
                return Err(format!(
                    "output {} is already written for {}",
                    target.display(),
                    first.display()
                ));
            }
            claimed.insert(target.clone(), input.as_path());
            Ok(target)
        })
        .collect()
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn convert_one(input: &Path, target: &Result<PathBuf, String>, eff: &Effective) -> BatchItem {
    let mut item = BatchItem {
        input: input.to_string_lossy().to_string(),
        output: None,
        results: 0,
        rules: 0,
        error: None,
    };
    let target = match target {
        Ok(t) => t,
        Err(reason) => {
            warn!(input = %input.display(), reason = %reason, "skipping report");
            item.error = Some(reason.clone());
            return item;
        }
    };
    match write_one(input, target, eff) {
        Ok((results, rules)) => {
            item.output = Some(target.to_string_lossy().to_string());
            item.results = results;
            item.rules = rules;
        }
        Err(e) => item.error = Some(format!("{:#}", e)),
    }
    item
}

fn write_one(input: &Path, target: &Path, eff: &Effective) -> anyhow::Result<(usize, usize)> {
    let xml = fs::read_to_string(input)
        .with_context(|| format!("cannot read {}", input.display()))?;
    let log = convert_to_log(&xml, eff.tool_version.as_deref())?;
    let json = to_json(&log, eff.indent)?;
    fs::write(target, json).with_context(|| format!("cannot write {}", target.display()))?;
    let run = &log.runs[0];
    Ok((run.results.len(), run.tool.driver.rules.len()))
}
