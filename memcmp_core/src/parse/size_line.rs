use crate::error::ParseError;
use crate::model::SizeSummary;

const LIBRARY_SEPARATOR: &str = " (ex ";

/// Parses a Berkeley-format `size` data line:
/// `text data bss dec hex filename [(ex library)]`.
pub fn parse_size_line(line: &str) -> Result<SizeSummary, ParseError> {
    let fields = line.split_whitespace().collect::<Vec<_>>();
    if fields.len() < 6 {
        return Err(ParseError::SizeFieldCount {
            found: fields.len(),
            line: line.trim().to_string(),
        });
    }

    let (filename, library_path) = split_filename_and_library(&fields[5..]);

    Ok(SizeSummary {
        text: parse_decimal_field("text", fields[0])?,
        data: parse_decimal_field("data", fields[1])?,
        bss: parse_decimal_field("bss", fields[2])?,
        total_decimal: parse_decimal_field("dec", fields[3])?,
        total_hex: fields[4].to_string(),
        filename,
        library_path,
    })
}

fn split_filename_and_library(name_fields: &[&str]) -> (String, Option<String>) {
    let joined = name_fields.join(" ");
    if !(joined.contains('(') && joined.contains(')')) {
        return (name_fields[0].to_string(), None);
    }

    match joined.split_once(LIBRARY_SEPARATOR) {
        Some((filename, library)) => (
            filename.to_string(),
            Some(library.trim_end_matches(')').to_string()),
        ),
        None => (joined, None),
    }
}

fn parse_decimal_field(field: &'static str, value: &str) -> Result<u64, ParseError> {
    value
        .parse::<u64>()
        .map_err(|_| ParseError::InvalidSizeNumber {
            field,
            value: value.to_string(),
        })
}
