pub mod size_line;
pub mod symbol_line;

use std::borrow::Cow;

use crate::error::{ParseError, SymbolLineError};
use crate::model::{MemStats, SizeSummary, Symbol};

pub use size_line::parse_size_line;
pub use symbol_line::{is_object_header_line, parse_symbol_line};

pub const DEFAULT_EXCLUDED_SYMBOL_PREFIX: &str = "cov_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Symbols whose name starts with this prefix are dropped (coverage counters).
    pub excluded_symbol_prefix: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            excluded_symbol_prefix: DEFAULT_EXCLUDED_SYMBOL_PREFIX.to_string(),
        }
    }
}

/// A symbol line that looked like a symbol but could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIssue {
    /// 1-based, relative to the symbol listing block.
    pub line_number: usize,
    pub line: String,
    pub error: SymbolLineError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub stats: MemStats,
    pub issues: Vec<LineIssue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolBlock {
    pub symbols: Vec<Symbol>,
    pub issues: Vec<LineIssue>,
}

pub fn parse_mem_stats(content: &str, options: &ParseOptions) -> Result<ParsedFile, ParseError> {
    let normalized = normalize_newlines(content);
    let mut blocks = normalized.trim().split("\n\n");

    let size = parse_size_block(blocks.next().unwrap_or(""))?;
    let SymbolBlock { symbols, issues } = blocks
        .next()
        .map(|block| parse_symbol_block(block, options))
        .unwrap_or_default();

    Ok(ParsedFile {
        stats: MemStats { size, symbols },
        issues,
    })
}

/// First line is the `size` header and is ignored; the second is the data line.
pub fn parse_size_block(block: &str) -> Result<SizeSummary, ParseError> {
    let data_line = block
        .trim()
        .split('\n')
        .nth(1)
        .ok_or(ParseError::MissingSizeLine)?;
    parse_size_line(data_line)
}

pub fn parse_symbol_block(block: &str, options: &ParseOptions) -> SymbolBlock {
    let mut out = SymbolBlock::default();
    for (index, line) in block.trim().split('\n').enumerate() {
        if is_object_header_line(line) {
            continue;
        }
        match parse_symbol_line(line, options) {
            Ok(Some(symbol)) => out.symbols.push(symbol),
            Ok(None) => {}
            Err(error) => out.issues.push(LineIssue {
                line_number: index + 1,
                line: line.trim().to_string(),
                error,
            }),
        }
    }
    out
}

fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(content)
    }
}
