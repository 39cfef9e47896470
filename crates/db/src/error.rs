//! Error types for ombros-db.

use std::path::PathBuf;

/// Error type for all fallible operations in the ombros-db crate.
///
/// Persistence failures are deliberately not softened: losing
/// verification output silently would be worse than stopping, so
/// callers let these propagate.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Wraps an error originating from the SQLite library.
    #[error("sqlite error: {reason}")]
    Sqlite {
        /// Description of the underlying SQLite failure.
        reason: String,
    },

    /// Returned when an output directory cannot be created.
    #[error("failed to create directory {}: {reason}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error from the CSV writer.
    #[error("csv error writing {}: {reason}", path.display())]
    Csv {
        /// Path being written.
        path: PathBuf,
        /// Description of the underlying CSV failure.
        reason: String,
    },
}

impl From<rusqlite::Error> for DbError {
    fn from(e: rusqlite::Error) -> Self {
        DbError::Sqlite {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_sqlite() {
        let err = DbError::Sqlite {
            reason: "database is locked".to_string(),
        };
        assert_eq!(err.to_string(), "sqlite error: database is locked");
    }

    #[test]
    fn display_create_dir() {
        let err = DbError::CreateDir {
            path: PathBuf::from("/out/daily/2024"),
            reason: "permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to create directory /out/daily/2024: permission denied"
        );
    }

    #[test]
    fn from_rusqlite_error() {
        let err: DbError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, DbError::Sqlite { .. }));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<DbError>();
    }
}
