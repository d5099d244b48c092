//! Error types for artifact, fragment, and merge operations.

use hintc_config::{Charset, EncodeError};
use std::path::PathBuf;

/// Errors that abort an emit operation.
///
/// Misplaced directives are not errors at this level; they are reported as
/// diagnostics and processing continues. Everything here is fatal for the
/// operation it occurs in and is never retried.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// An I/O error occurred while reading or writing a file.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// `merge` was called without a fragments directory.
    #[error("input directory must not be null")]
    MergeInputMissing,

    /// The fragments directory given to `merge` does not exist or is not a directory.
    #[error("directory for incremental fragments '{path}' does not exist")]
    MergeInputNotDirectory {
        /// The path that was given.
        path: PathBuf,
    },

    /// `merge` was called without an output file.
    #[error("output file must not be null")]
    MergeOutputMissing,

    /// A line contains a character the output charset cannot represent.
    #[error("cannot encode {ch:?} in {charset}")]
    UnmappableCharacter {
        /// The output charset.
        charset: Charset,
        /// The offending character.
        ch: char,
    },

    /// The collaborator's input stream could not be understood.
    #[error("invalid processor input: {reason}")]
    Input {
        /// Description of the problem.
        reason: String,
    },
}

impl EmitError {
    /// Builds an [`EmitError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EmitError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<EncodeError> for EmitError {
    fn from(err: EncodeError) -> Self {
        EmitError::UnmappableCharacter {
            charset: err.charset,
            ch: err.ch,
        }
    }
}
