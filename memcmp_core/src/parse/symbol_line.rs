use crate::error::SymbolLineError;
use crate::model::{Symbol, SymbolKind};

use super::ParseOptions;

/// `foo.o:` style lines that `nm` prints before each archive member.
pub fn is_object_header_line(line: &str) -> bool {
    let Some((before_colon, _)) = line.split_once(':') else {
        return false;
    };
    before_colon.split_whitespace().count() == 1
}

/// Parses one `nm -S` line (`<address> <size> <kind> [name]`).
///
/// Returns `Ok(None)` for lines that are not sized text/data symbols, section
/// pseudo-symbols, and instrumentation symbols. Only an undecodable size on an
/// otherwise relevant line is an error.
pub fn parse_symbol_line(
    line: &str,
    options: &ParseOptions,
) -> Result<Option<Symbol>, SymbolLineError> {
    let fields = line.split_whitespace().collect::<Vec<_>>();
    if fields.len() < 3 {
        return Ok(None);
    }

    let Some((kind, size_field, name)) = classify_fields(&fields) else {
        return Ok(None);
    };

    if name.starts_with('.')
        || (!options.excluded_symbol_prefix.is_empty()
            && name.starts_with(options.excluded_symbol_prefix.as_str()))
    {
        return Ok(None);
    }

    let size = parse_hex_size(size_field)?;
    Ok(Some(Symbol {
        size,
        kind,
        name: name.to_string(),
    }))
}

fn classify_fields<'a>(fields: &[&'a str]) -> Option<(SymbolKind, &'a str, &'a str)> {
    if let Some(kind) = SymbolKind::from_field(fields[2]) {
        let name = fields.get(3).copied().unwrap_or("");
        return Some((kind, fields[1], name));
    }

    // Short `<kind> <size> <name>` layout.
    if fields.len() == 3 {
        let kind = SymbolKind::from_field(fields[0])?;
        return Some((kind, fields[1], fields[2]));
    }

    None
}

fn parse_hex_size(token: &str) -> Result<u64, SymbolLineError> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u64::from_str_radix(digits, 16).map_err(|_| SymbolLineError::InvalidHexSize {
        value: token.to_string(),
    })
}
