//! Error types for the benchmark driver.
//!
//! The tree engines themselves never return `Result` — duplicate inserts and
//! misses are legitimate outcomes, not errors, and internal invariant breaks
//! are fatal (panic), not recoverable. This enum exists purely for the
//! benchmark binary's I/O surface: opening the results directory and writing
//! CSV files.

#[cfg(feature = "std")]
use thiserror::Error;

/// Errors surfaced by the benchmark driver.
#[cfg(feature = "std")]
#[derive(Error, Debug)]
pub enum BenchError {
    /// The results directory could not be created.
    #[error("failed to create results directory {path}")]
    CreateResultsDir {
        /// The directory that could not be created.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A CSV file could not be opened for writing.
    #[error("failed to open {path} for writing")]
    OpenCsv {
        /// The file that could not be opened.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing a CSV row failed.
    #[error("failed to write to {path}")]
    WriteCsv {
        /// The file being written.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A specialized Result type for the benchmark driver.
#[cfg(feature = "std")]
pub type Result<T> = std::result::Result<T, BenchError>;
