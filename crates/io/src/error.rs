//! Error types for ombros-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the ombros-io crate.
///
/// Covers missing input files, I/O failures while reading, malformed
/// forecast headers, and CSV-level failures in the station list.
/// Malformed individual records are not errors: readers skip them
/// silently, mirroring the tolerant legacy extracts.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an I/O failure while reading a file.
    #[error("i/o error reading {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when a forecast extract has no INFO header line.
    #[error("missing INFO header line in {}", path.display())]
    MissingHeader {
        /// Path to the extract.
        path: PathBuf,
    },

    /// Returned when the INFO header cannot be interpreted.
    #[error("malformed INFO header in {}: {reason}", path.display())]
    MalformedHeader {
        /// Path to the extract.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// Wraps an error from the CSV reader.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// Path to the CSV file.
        path: PathBuf,
        /// Description of the underlying CSV failure.
        reason: String,
    },
}
