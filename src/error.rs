use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NsrdbError>;

#[derive(Debug, Error)]
pub enum NsrdbError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("bad glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// File name does not follow `{location_id}_{lat}_{long}_{year}.csv`.
    #[error("invalid filename format: {filename} (expected 4 '_'-separated tokens, got {tokens})")]
    InvalidFilename { filename: String, tokens: usize },

    #[error("{path}: missing column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path}: invalid year '{value}'")]
    InvalidYear { path: PathBuf, value: String },

    #[error("{path}:{line}: column '{column}' has non-numeric value '{value}'")]
    ParseCell {
        path:   PathBuf,
        line:   u64,
        column: String,
        value:  String,
    },

    #[error("{path}: expected a metadata header, a metadata row and a data header, found {lines} line(s)")]
    Truncated { path: PathBuf, lines: usize },

    #[error("No input files found in directory: {}", folder.display())]
    NoInputFiles { folder: PathBuf },
}
