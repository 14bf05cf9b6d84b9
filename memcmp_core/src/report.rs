use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::ReportError;
use crate::model::{MemStats, MemStatsSummary};

pub const DEFAULT_TITLE: &str = "Memory Usage Comparison";
pub const DEFAULT_DISPLAY_PREFIX: &str = "memstats_";
pub const DEFAULT_DISPLAY_SUFFIX: &str = ".log";
pub const MISSING_SYMBOL_CELL: &str = "-";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub title: String,
    pub display_prefix: String,
    pub display_suffix: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            display_prefix: DEFAULT_DISPLAY_PREFIX.to_string(),
            display_suffix: DEFAULT_DISPLAY_SUFFIX.to_string(),
        }
    }
}

/// One variant in report order.
#[derive(Debug, Clone)]
pub struct ReportRow<'a> {
    pub display_name: String,
    pub source_filename: &'a str,
    pub stats: &'a MemStats,
}

/// Removes every occurrence of the prefix, then of the suffix.
pub fn display_name(source_filename: &str, options: &ReportOptions) -> String {
    let mut name = source_filename.to_string();
    if !options.display_prefix.is_empty() {
        name = name.replace(&options.display_prefix, "");
    }
    if !options.display_suffix.is_empty() {
        name = name.replace(&options.display_suffix, "");
    }
    name
}

/// Rows sorted by total size, then display name; equal keys keep input order.
pub fn ordered_rows<'a>(
    stats: &'a [(String, MemStats)],
    options: &ReportOptions,
) -> Vec<ReportRow<'a>> {
    let mut rows = stats
        .iter()
        .map(|(source_filename, stats)| ReportRow {
            display_name: display_name(source_filename, options),
            source_filename: source_filename.as_str(),
            stats,
        })
        .collect::<Vec<_>>();
    rows.sort_by(|left, right| {
        left.stats
            .size
            .total_decimal
            .cmp(&right.stats.size.total_decimal)
            .then_with(|| left.display_name.cmp(&right.display_name))
    });
    rows
}

/// Union of symbol names over all variants, ascending.
pub fn symbol_columns<'a>(rows: &[ReportRow<'a>]) -> Vec<&'a str> {
    rows.iter()
        .flat_map(|row| {
            let stats: &'a MemStats = row.stats;
            stats.symbols.iter().map(|symbol| symbol.name.as_str())
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn render_markdown(
    stats: &[(String, MemStats)],
    options: &ReportOptions,
    generated_at: NaiveDateTime,
) -> String {
    let rows = ordered_rows(stats, options);
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", options.title));
    out.push_str(&format!(
        "Generated on {}\n\n",
        generated_at.format(TIMESTAMP_FORMAT)
    ));

    render_section_sizes_table(&mut out, &rows);
    out.push('\n');
    render_symbol_sizes_table(&mut out, &rows);

    out
}

fn render_section_sizes_table(out: &mut String, rows: &[ReportRow<'_>]) {
    out.push_str("## Memory Section Sizes (Ascending Order of Total Size)\n\n");
    out.push_str("| Configuration | Text | Data | BSS | Total |\n");
    out.push_str("|--------------|-----:|-----:|----:|------:|\n");
    for row in rows {
        let size = &row.stats.size;
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            row.display_name, size.text, size.data, size.bss, size.total_decimal
        ));
    }
}

fn render_symbol_sizes_table(out: &mut String, rows: &[ReportRow<'_>]) {
    let columns = symbol_columns(rows);

    out.push_str("## Symbol Sizes (Same Order as Above)\n\n");

    let mut header = String::from("| Configuration |");
    let mut separator = String::from("|--------------|");
    for name in &columns {
        header.push_str(&format!(" {name} |"));
        separator.push_str("-----:|");
    }
    out.push_str(&header);
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');

    for row in rows {
        // Later duplicates of a name overwrite earlier ones.
        let size_by_name = row
            .stats
            .symbols
            .iter()
            .map(|symbol| (symbol.name.as_str(), symbol.size))
            .collect::<HashMap<_, _>>();

        let mut line = format!("| {} |", row.display_name);
        for name in &columns {
            match size_by_name.get(name) {
                Some(size) => line.push_str(&format!(" {size} |")),
                None => line.push_str(&format!(" {MISSING_SYMBOL_CELL} |")),
            }
        }
        out.push_str(&line);
        out.push('\n');
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VariantSummary {
    pub display_name: String,
    pub source_filename: String,
    #[serde(flatten)]
    pub summary: MemStatsSummary,
    pub library_path: Option<String>,
    pub total_code_size: u64,
    pub total_data_size: u64,
    pub symbols: Vec<SymbolEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolEntry {
    pub name: String,
    pub size: u64,
    pub kind: char,
    pub description: &'static str,
}

/// Per-variant summaries in the same order as the Markdown tables.
pub fn variant_summaries(
    stats: &[(String, MemStats)],
    options: &ReportOptions,
) -> Vec<VariantSummary> {
    ordered_rows(stats, options)
        .into_iter()
        .map(|row| VariantSummary {
            source_filename: row.source_filename.to_string(),
            summary: row.stats.summary(),
            library_path: row.stats.size.library_path.clone(),
            total_code_size: row.stats.total_code_size(),
            total_data_size: row.stats.total_data_size(),
            symbols: row
                .stats
                .symbols
                .iter()
                .map(|symbol| SymbolEntry {
                    name: symbol.name.clone(),
                    size: symbol.size,
                    kind: symbol.kind.tag(),
                    description: symbol.kind.description(),
                })
                .collect(),
            display_name: row.display_name,
        })
        .collect()
}

pub fn render_summary_json(
    stats: &[(String, MemStats)],
    options: &ReportOptions,
) -> Result<String, ReportError> {
    let summaries = variant_summaries(stats, options);
    let mut json = serde_json::to_string_pretty(&summaries)?;
    json.push('\n');
    Ok(json)
}

/// Overwrites `path`, creating missing parent directories first.
pub fn write_report(path: &Path, contents: &str) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ReportError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, contents).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
