//! Configuration discovery and effective settings resolution.
//!
//! checkstyle-sarif reads `checkstyle-sarif.toml|yaml|yml` from the project
//! root (or closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config.
//! Defaults:
//! - `indent`: unset (compact JSON); `--pretty` alone means 2
//! - `toolVersion`: unset (version from the report)
//! - `output`: `human`
//! - `batch.patterns`: empty
//! - `batch.outDir`: unset (write next to each input)
//! - `batch.extension`: `sarif`
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const CONFIG_TOML: &str = "checkstyle-sarif.toml";
const CONFIG_YAML: [&str; 2] = ["checkstyle-sarif.yaml", "checkstyle-sarif.yml"];
const DEFAULT_EXTENSION: &str = "sarif";
const PRETTY_INDENT: usize = 2;

#[derive(Debug, Default, Deserialize, Clone)]
/// Batch conversion section under `[batch]`.
pub struct BatchCfg {
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(rename = "outDir")]
    pub out_dir: Option<String>,
    pub extension: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `checkstyle-sarif.toml|yaml`.
pub struct ConverterConfig {
    pub indent: Option<usize>,
    #[serde(rename = "toolVersion")]
    pub tool_version: Option<String>,
    pub output: Option<String>,
    #[serde(default)]
    pub batch: Option<BatchCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub indent: Option<usize>,
    pub tool_version: Option<String>,
    pub output: String,
    pub patterns: Vec<String>,
    pub out_dir: Option<PathBuf>,
    pub extension: String,
}

/// Walk upward from `start` to detect the project root.
///
/// Stops when a config file or a `.git` directory is found.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join(CONFIG_TOML).exists() || CONFIG_YAML.iter().any(|y| cur.join(y).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `ConverterConfig` from `checkstyle-sarif.toml` or `.yaml|.yml`.
///
/// Unreadable or invalid files are logged and treated as absent.
pub fn load_config(root: &Path) -> Option<ConverterConfig> {
    let toml_path = root.join(CONFIG_TOML);
    if toml_path.exists() {
        let s = read_config(&toml_path)?;
        return match toml::from_str(&s) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                warn!(path = %toml_path.display(), error = %e, "ignoring invalid config");
                None
            }
        };
    }
    for yml in CONFIG_YAML {
        let p = root.join(yml);
        if p.exists() {
            let s = read_config(&p)?;
            return match serde_yaml::from_str(&s) {
                Ok(cfg) => Some(cfg),
                Err(e) => {
                    warn!(path = %p.display(), error = %e, "ignoring invalid config");
                    None
                }
            };
        }
    }
    None
}

fn read_config(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(s) => Some(s),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read config");
            None
        }
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_root: Option<&str>,
    cli_indent: Option<usize>,
    cli_pretty: bool,
    cli_tool_version: Option<&str>,
    cli_output: Option<&str>,
    cli_patterns: &[String],
    cli_out_dir: Option<&str>,
    cli_extension: Option<&str>,
) -> Effective {
    let start = PathBuf::from(cli_root.unwrap_or("."));
    let root = detect_root(&start);
    let cfg = load_config(&root).unwrap_or_default();
    let batch = cfg.batch.unwrap_or_default();

    let indent = cli_indent
        .or(cfg.indent)
        .or(cli_pretty.then_some(PRETTY_INDENT));

    let tool_version = cli_tool_version.map(|s| s.to_string()).or(cfg.tool_version);

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let patterns = if cli_patterns.is_empty() {
        batch.patterns
    } else {
        cli_patterns.to_vec()
    };

    // Config-relative directories resolve against the detected root
    let out_dir = cli_out_dir
        .map(PathBuf::from)
        .or_else(|| batch.out_dir.map(|d| root.join(d)));

    let extension = cli_extension
        .map(|s| s.to_string())
        .or(batch.extension)
        .map(|e| e.trim_start_matches('.').to_string())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    Effective {
        root,
        indent,
        tool_version,
        output,
        patterns,
        out_dir,
        extension,
    }
}
