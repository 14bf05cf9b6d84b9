use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid size command output format: expected a header line and a data line")]
    MissingSizeLine,

    #[error("size line has {found} fields, expected at least 6: {line:?}")]
    SizeFieldCount { found: usize, line: String },

    #[error("invalid {field} value {value:?} in size line")]
    InvalidSizeNumber { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolLineError {
    #[error("invalid hex size {value:?}")]
    InvalidHexSize { value: String },
}

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("directory '{}' does not exist or is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("error accessing directory {}: {source}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading file {name}: {source}")]
    ReadFile {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
}
