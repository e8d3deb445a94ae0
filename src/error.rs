//! Error types for the variant comparison pipeline.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while extracting, merging, or writing variants.
#[derive(Error, Debug)]
pub enum VcfCompareError {
    /// Failed to open, read, or write a file.
    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data line with fewer columns than a single-sample VCF carries.
    #[error("expected at least 10 tab-separated columns, got {found}")]
    MalformedRecord { found: usize },

    /// A FORMAT subfield that should be numeric but is not.
    #[error("invalid {field} value `{value}`")]
    NumericParse { field: &'static str, value: String },

    /// A line-level error decorated with the file and line it came from.
    #[error("{}:{}: {}", .path.display(), .line, .source)]
    Record {
        path: PathBuf,
        line: usize,
        #[source]
        source: Box<VcfCompareError>,
    },
}

impl VcfCompareError {
    /// Attach file and 1-based line context to an error bubbling out of a
    /// line parser.
    pub fn at(self, path: &Path, line: usize) -> Self {
        Self::Record {
            path: path.to_path_buf(),
            line,
            source: Box::new(self),
        }
    }
}

/// Result type alias for variant comparison operations.
pub type Result<T> = std::result::Result<T, VcfCompareError>;
