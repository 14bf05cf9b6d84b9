use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDateTime;
use tracing::{debug, error, info, warn};

use memcmp_core::collect::{CollectedFile, collect_files};
use memcmp_core::model::MemStats;
use memcmp_core::parse::{ParseOptions, parse_mem_stats};
use memcmp_core::report::{render_markdown, render_summary_json, write_report};

use crate::args::RunSettings;

pub const EXIT_OK: i32 = 0;
pub const EXIT_FATAL: i32 = 1;
pub const EXIT_NO_VALID_INPUT: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// At least one variant made it into the report (or empty input was allowed).
    ReportWritten,
    /// No file was read; nothing was written.
    NoInput,
    /// Files were read but none parsed; a report with empty tables was written.
    NothingParsed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub status: RunStatus,
    pub files_read: usize,
    pub files_parsed: usize,
    pub report_path: Option<PathBuf>,
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self.status {
            RunStatus::ReportWritten => EXIT_OK,
            RunStatus::NoInput | RunStatus::NothingParsed => EXIT_NO_VALID_INPUT,
        }
    }
}

/// Collects, parses and renders once. Only output failures are errors.
pub fn run(settings: &RunSettings, generated_at: NaiveDateTime) -> anyhow::Result<RunOutcome> {
    let input_dir = settings.input_dir.display();
    let collected = collect_files(&settings.input_dir);

    if collected.is_empty() {
        warn!("No files were read from {input_dir}");
        if !settings.allow_empty {
            return Ok(RunOutcome {
                status: RunStatus::NoInput,
                files_read: 0,
                files_parsed: 0,
                report_path: None,
            });
        }
    } else {
        info!(
            "Successfully read {} files from {input_dir}",
            collected.files.len()
        );
    }

    let stats = parse_collected(&collected.files, &settings.parse);

    let markdown = render_markdown(&stats, &settings.report, generated_at);
    write_report(&settings.output, &markdown)
        .with_context(|| format!("failed to write report {}", settings.output.display()))?;
    info!("Markdown report generated: {}", settings.output.display());

    if let Some(summary_path) = &settings.summary_json {
        let json = render_summary_json(&stats, &settings.report)?;
        write_report(summary_path, &json)
            .with_context(|| format!("failed to write summary {}", summary_path.display()))?;
        info!("JSON summary generated: {}", summary_path.display());
    }

    let status = if !stats.is_empty() || settings.allow_empty {
        RunStatus::ReportWritten
    } else {
        warn!("No memstats file could be parsed; report tables are empty");
        RunStatus::NothingParsed
    };

    Ok(RunOutcome {
        status,
        files_read: collected.files.len(),
        files_parsed: stats.len(),
        report_path: Some(settings.output.clone()),
    })
}

/// Files that fail to parse are logged and left out.
pub fn parse_collected(files: &[CollectedFile], options: &ParseOptions) -> Vec<(String, MemStats)> {
    let mut stats = Vec::with_capacity(files.len());
    for file in files {
        match parse_mem_stats(&file.content, options) {
            Ok(parsed) => {
                for issue in &parsed.issues {
                    warn!(
                        "{}: skipped symbol line {} ({}): {:?}",
                        file.name, issue.line_number, issue.error, issue.line
                    );
                }
                debug!(
                    "{}: {} symbols, total {}",
                    file.name,
                    parsed.stats.symbols.len(),
                    parsed.stats.size.total_decimal
                );
                info!("Processed {}", file.name);
                stats.push((file.name.clone(), parsed.stats));
            }
            Err(err) => error!("Error processing {}: {err}", file.name),
        }
    }
    stats
}
