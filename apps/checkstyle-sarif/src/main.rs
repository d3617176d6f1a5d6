//! checkstyle-sarif CLI binary entry point.
//! Resolves config, delegates to the library, and maps failures to exit codes.

use anyhow::Context;
use checkstyle_sarif::cli::{Cli, Commands, CommonOpts};
use checkstyle_sarif::config::{self, Effective};
use checkstyle_sarif::utils::{error_prefix, note_prefix};
use checkstyle_sarif::{batch, logging, output, ConvertOptions};
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::process;

/// Conversion failed on the report itself.
const EXIT_CONVERT: i32 = 1;
/// Reading input, writing output, or config/pattern problems.
const EXIT_IO: i32 = 2;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Convert {
            input,
            output,
            common,
        } => {
            logging::init(common.verbose);
            let eff = resolve(&common, None, &[], None, None);
            process::exit(run_convert(input.as_deref(), output.as_deref(), &eff));
        }
        Commands::Batch {
            patterns,
            out_dir,
            extension,
            output: out_mode,
            common,
        } => {
            logging::init(common.verbose);
            let eff = resolve(
                &common,
                out_mode.as_deref(),
                &patterns,
                out_dir.as_deref(),
                extension.as_deref(),
            );
            if eff.patterns.is_empty() {
                eprintln!(
                    "{} no input patterns. Pass PATTERN... or set [batch].patterns in {}.",
                    error_prefix(),
                    config::CONFIG_TOML
                );
                process::exit(EXIT_IO);
            }
            let res = match batch::run_batch(&eff) {
                Ok(res) => res,
                Err(e) => {
                    eprintln!("{} {:#}", error_prefix(), e);
                    process::exit(EXIT_IO);
                }
            };
            if res.results.is_empty() && eff.output != "json" {
                eprintln!("{} no reports matched the given patterns.", note_prefix());
            }
            let cwd = std::env::current_dir().unwrap_or_else(|_| eff.root.clone());
            output::print_batch(&res, &eff.output, &cwd);
            if res.summary.failed > 0 {
                process::exit(EXIT_CONVERT);
            }
        }
    }
}

fn resolve(
    common: &CommonOpts,
    out_mode: Option<&str>,
    patterns: &[String],
    out_dir: Option<&str>,
    extension: Option<&str>,
) -> Effective {
    config::resolve_effective(
        common.root.as_deref(),
        common.indent,
        common.pretty,
        common.tool_version.as_deref(),
        out_mode,
        patterns,
        out_dir,
        extension,
    )
}

/// Convert a single report, returning the process exit code.
fn run_convert(input: Option<&str>, out: Option<&str>, eff: &Effective) -> i32 {
    let xml = match read_input(input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} {:#}", error_prefix(), e);
            return EXIT_IO;
        }
    };
    let options = ConvertOptions {
        indent: eff.indent,
        tool_version: eff.tool_version.clone(),
    };
    let sarif = match checkstyle_sarif::convert_with(&xml, &options) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} {:#}", error_prefix(), anyhow::Error::from(e));
            return EXIT_CONVERT;
        }
    };
    match write_output(out, &sarif) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {:#}", error_prefix(), e);
            EXIT_IO
        }
    }
}

fn read_input(input: Option<&str>) -> anyhow::Result<String> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read stdin")?;
            Ok(buf)
        }
        Some(path) => fs::read_to_string(path).with_context(|| format!("cannot read {}", path)),
    }
}

fn write_output(out: Option<&str>, sarif: &str) -> anyhow::Result<()> {
    match out {
        None | Some("-") => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", sarif).context("cannot write stdout")?;
            Ok(())
        }
        Some(path) => {
            fs::write(path, format!("{}\n", sarif))
                .with_context(|| format!("cannot write {}", path))?;
            tracing::debug!(path, "wrote sarif");
            Ok(())
        }
    }
}
