use std::path::PathBuf;

use clap::{ArgAction, Parser};

use memcmp_core::config::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_PATH, MemcmpConfig};
use memcmp_core::parse::ParseOptions;
use memcmp_core::report::ReportOptions;

#[derive(Debug, Clone, Parser, Default)]
#[command(
    name = "memcmp",
    version,
    about = "Compare size/nm memory statistics of build variants in a Markdown report"
)]
pub struct MemcmpCli {
    /// Directory holding one memstats log per build variant [default: build/memstats]
    pub input_dir: Option<PathBuf>,

    /// Markdown report path [default: build/memory_comparison.md]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write per-variant totals as JSON to this path.
    #[arg(long)]
    pub summary_json: Option<PathBuf>,

    /// Read settings from this TOML file instead of ./memcmp.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub title: Option<String>,

    /// Removed from file names to form the variant name [default: memstats_]
    #[arg(long)]
    pub display_prefix: Option<String>,

    /// Removed from file names to form the variant name [default: .log]
    #[arg(long)]
    pub display_suffix: Option<String>,

    /// Symbols with this name prefix are ignored [default: cov_]
    #[arg(long)]
    pub excluded_symbol_prefix: Option<String>,

    /// Exit successfully even when no file could be read or parsed.
    #[arg(long)]
    pub allow_empty: bool,

    /// More diagnostics (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    pub summary_json: Option<PathBuf>,
    pub parse: ParseOptions,
    pub report: ReportOptions,
    pub allow_empty: bool,
}

/// Command line beats config file beats built-in defaults.
pub fn derive_settings(cli: &MemcmpCli, cfg: &MemcmpConfig) -> RunSettings {
    let parse_defaults = ParseOptions::default();
    let report_defaults = ReportOptions::default();

    RunSettings {
        input_dir: cli
            .input_dir
            .clone()
            .or_else(|| cfg.input_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR)),
        output: cli
            .output
            .clone()
            .or_else(|| cfg.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
        summary_json: cli
            .summary_json
            .clone()
            .or_else(|| cfg.summary_json.clone()),
        parse: ParseOptions {
            excluded_symbol_prefix: pick(
                &cli.excluded_symbol_prefix,
                &cfg.excluded_symbol_prefix,
                parse_defaults.excluded_symbol_prefix,
            ),
        },
        report: ReportOptions {
            title: pick(&cli.title, &cfg.title, report_defaults.title),
            display_prefix: pick(
                &cli.display_prefix,
                &cfg.display_prefix,
                report_defaults.display_prefix,
            ),
            display_suffix: pick(
                &cli.display_suffix,
                &cfg.display_suffix,
                report_defaults.display_suffix,
            ),
        },
        allow_empty: cli.allow_empty || cfg.allow_empty.unwrap_or(false),
    }
}

fn pick(cli: &Option<String>, cfg: &Option<String>, default: String) -> String {
    cli.clone().or_else(|| cfg.clone()).unwrap_or(default)
}
