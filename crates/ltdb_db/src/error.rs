//! Error types for database access.

use ltdb_common::{format_idcode, DeviceLocator, ParseError};
use std::path::{Path, PathBuf};

/// Result alias used throughout this crate.
pub type DbResult<T> = Result<T, DbError>;

/// Coarse classification of a [`DbError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An unknown device, ID code or file path.
    NotFound,
    /// A required field is absent or malformed, or keys are misordered.
    Schema,
    /// A file exists but could not be read.
    Io,
}

/// Errors returned by database operations.
///
/// Every failure is fatal to the call that raised it; nothing is retried and
/// no partial result is returned.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// No device has the requested name.
    #[error("no device in database with name {name}")]
    DeviceNotFound {
        /// The requested device name.
        name: String,
    },

    /// No device has the requested ID code.
    #[error("no device in database with IDCODE {}", format_idcode(*.idcode))]
    IdcodeNotFound {
        /// The requested ID code.
        idcode: u32,
    },

    /// A locator names a family or device absent from `devices.json`.
    #[error("no entry for device {locator} in devices.json")]
    UnknownDevice {
        /// The unresolved locator.
        locator: DeviceLocator,
    },

    /// A database file does not exist.
    #[error("database file not found: {}", .path.display())]
    FileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A database file could not be read.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A database file is not valid JSON.
    #[error("failed to parse {}: {reason}", .path.display())]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// A document does not have the expected shape.
    #[error("schema error in {context}: {reason}")]
    Schema {
        /// Where the problem was found (file path or document location).
        context: String,
        /// Description of the problem.
        reason: String,
    },

    /// The family has no known globals schema.
    #[error("no globals decoder for family {family}")]
    UnsupportedFamily {
        /// The family name.
        family: String,
    },
}

impl DbError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DeviceNotFound { .. }
            | Self::IdcodeNotFound { .. }
            | Self::UnknownDevice { .. }
            | Self::FileNotFound { .. } => ErrorKind::NotFound,
            Self::Io { .. } => ErrorKind::Io,
            Self::Parse { .. } | Self::Schema { .. } | Self::UnsupportedFamily { .. } => {
                ErrorKind::Schema
            }
        }
    }

    pub(crate) fn schema(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Schema {
            context: context.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn from_parse(context: impl Into<String>, err: ParseError) -> Self {
        Self::schema(context, err.to_string())
    }

    /// Maps a read failure on `path`, treating a missing file as [`DbError::FileNotFound`].
    pub(crate) fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
