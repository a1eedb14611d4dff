//! Error types for the accuracy evaluator.
//!
//! An evaluation run either completes and returns a report, or fails with
//! one of these errors and produces no report at all. Partial counters from
//! an aborted stream are never rendered.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for evaluation.
pub type EvalResult<T> = std::result::Result<T, EvalError>;

/// Which of the two input corpora an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusFile {
    Gold,
    System,
}

impl std::fmt::Display for CorpusFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CorpusFile::Gold => "gold file",
            CorpusFile::System => "system file",
        })
    }
}

/// Ways an evaluation run can fail.
#[derive(Error, Debug)]
pub enum EvalError {
    /// A file could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A read failed mid-stream.
    #[error("read failure in {file} at line {line}: {source}")]
    Io {
        file: CorpusFile,
        line: u64,
        source: std::io::Error,
    },

    /// The system file ended before the gold file.
    #[error("system file ended before gold file (gold line {line} has no counterpart)")]
    Alignment { line: u64 },

    /// A line does not have the configured column.
    #[error("{file} line {line}: column {index} is missing")]
    MissingColumn {
        file: CorpusFile,
        line: u64,
        index: usize,
    },

    /// Neither corpus contained a non-blank aligned line.
    #[error("no annotated lines in the input corpora")]
    EmptyCorpus,
}

impl EvalError {
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn io(file: CorpusFile, line: u64, source: std::io::Error) -> Self {
        Self::Io { file, line, source }
    }

    pub fn alignment(line: u64) -> Self {
        Self::Alignment { line }
    }

    pub fn missing_column(file: CorpusFile, line: u64, index: usize) -> Self {
        Self::MissingColumn { file, line, index }
    }

    /// True if the two corpora could not be aligned line-by-line.
    pub fn is_alignment(&self) -> bool {
        matches!(self, Self::Alignment { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_display_names_the_line() {
        let err = EvalError::alignment(42);
        assert!(err.to_string().contains("line 42"));
        assert!(err.is_alignment());
    }

    #[test]
    fn test_missing_column_display() {
        let err = EvalError::missing_column(CorpusFile::System, 7, 9);
        let msg = err.to_string();
        assert!(msg.contains("system file"));
        assert!(msg.contains("line 7"));
        assert!(msg.contains("column 9"));
    }

    #[test]
    fn test_eval_error_is_std_error() {
        let err = EvalError::EmptyCorpus;
        let _: &dyn std::error::Error = &err;
    }
}
