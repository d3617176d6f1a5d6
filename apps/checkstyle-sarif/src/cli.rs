//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "checkstyle-sarif",
    version,
    about = "Convert Checkstyle XML reports to SARIF 2.1.0",
    long_about = "checkstyle-sarif converts Checkstyle XML reports into SARIF 2.1.0 JSON for code scanning dashboards and CI annotators.\n\nConfiguration precedence: CLI > checkstyle-sarif.toml > defaults.",
    after_help = "Examples:\n  checkstyle-sarif convert build/checkstyle-result.xml -o checkstyle.sarif\n  cat checkstyle.xml | checkstyle-sarif convert --pretty\n  checkstyle-sarif batch '**/checkstyle-result.xml' --out-dir sarif",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args, Clone)]
/// Options shared by conversion subcommands.
pub struct CommonOpts {
    #[arg(long, help = "Project root for config discovery (default: current dir)")]
    pub root: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Pretty-print SARIF (2 spaces unless --indent)")]
    pub pretty: bool,
    #[arg(long, help = "Pretty-print SARIF with N spaces per level")]
    pub indent: Option<usize>,
    #[arg(long, help = "Override the Checkstyle version recorded in the report")]
    pub tool_version: Option<String>,
    #[arg(short, long, action = clap::ArgAction::SetTrue, help = "Enable debug logging on stderr")]
    pub verbose: bool,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current checkstyle-sarif version.")]
    Version,
    /// Convert one report
    #[command(
        about = "Convert one report",
        long_about = "Read a Checkstyle XML report from INPUT (or stdin) and write SARIF to --output (or stdout).",
        after_help = "Examples:\n  checkstyle-sarif convert checkstyle.xml\n  checkstyle-sarif convert - -o out.sarif --indent 4"
    )]
    Convert {
        #[arg(help = "Checkstyle XML report; '-' or omitted reads stdin")]
        input: Option<String>,
        #[arg(short, long, help = "Write SARIF to this file instead of stdout")]
        output: Option<String>,
        #[command(flatten)]
        common: CommonOpts,
    },
    /// Convert many reports
    #[command(
        about = "Convert many reports",
        long_about = "Convert every report matched by glob patterns, each into its own SARIF file. Patterns default to [batch].patterns from config.",
        after_help = "Examples:\n  checkstyle-sarif batch '**/checkstyle-result.xml'\n  checkstyle-sarif batch 'a/*.xml' 'b/*.xml' --out-dir sarif --output json"
    )]
    Batch {
        #[arg(help = "Glob patterns relative to the project root")]
        patterns: Vec<String>,
        #[arg(long, help = "Directory for SARIF files (default: next to each input)")]
        out_dir: Option<String>,
        #[arg(long, help = "Extension for SARIF files (default: sarif)")]
        extension: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[command(flatten)]
        common: CommonOpts,
    },
}
