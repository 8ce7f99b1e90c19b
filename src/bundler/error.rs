//! Error types for manifest construction and installer generation.
//!
//! Provides contextual error chaining, filesystem-specific errors with the
//! offending path attached, and the packaging-specific variants raised by the
//! manifest engine (scope imbalance, missing required files).
//!
//! # Features
//!
//! - **Context trait**: Add context to errors and options
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//! - **bail! macro**: Early return with formatted error messages

use std::{
    fmt::Display,
    io,
    path::{self, PathBuf},
    process::ExitStatus,
};
use thiserror::Error as DeriveError;

/// Errors returned by the bundler.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "copying file")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// Child process could not be spawned.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command that failed to execute
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// Child process ran but exited unsuccessfully.
    #[error("command `{command}` exited with {status}")]
    ToolFailed {
        /// Full command line that was run
        command: String,
        /// Exit status reported by the process
        status: ExitStatus,
    },

    /// Enter/exit scope calls were not paired.
    #[error("scope imbalance: {0}")]
    ScopeImbalance(String),

    /// A pattern the caller marked as required matched nothing.
    #[error("required file(s) not found: {pattern} (searched in {})", root.display())]
    MissingRequired {
        /// The inclusion pattern
        pattern: String,
        /// Effective source prefix the pattern was resolved against
        root: PathBuf,
    },

    /// A source file handed to the recorder does not exist.
    #[error("source file does not exist: {}", .0.display())]
    MissingSource(PathBuf),

    /// A mapping points outside the destination root of its manifest.
    #[error("destination {} is outside the manifest root {}", dest.display(), root.display())]
    DestinationOutsideRoot {
        /// Offending destination
        dest: PathBuf,
        /// Destination root of the manifest
        root: PathBuf,
    },

    /// A template placeholder is missing or appears more than once.
    #[error("template placeholder `{placeholder}` must appear exactly once, found {count}")]
    UnresolvedPlaceholder {
        /// Placeholder name
        placeholder: String,
        /// Number of occurrences found
        count: usize,
    },

    /// Generic I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Error walking a directory tree.
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripError(#[from] path::StripPrefixError),

    /// Invalid glob pattern.
    #[error("{0}")]
    GlobPattern(#[from] glob::PatternError),

    /// Glob execution error (unreadable entry).
    #[error("{0}")]
    Glob(#[from] glob::GlobError),

    /// Regular expression error (wildcard renames).
    #[error("{0}")]
    RegexError(#[from] regex::Error),

    /// Handlebars template rendering error.
    #[error("{0}")]
    HandleBarsError(#[from] handlebars::RenderError),

    /// Handlebars template parsing error.
    #[error("{0}")]
    Template(#[from] handlebars::TemplateError),

    /// JSON serialization error.
    #[error("{0}")]
    JsonError(#[from] serde_json::error::Error),

    /// Configuration file could not be parsed.
    #[error("invalid configuration file: {0}")]
    ConfigError(#[from] toml::de::Error),

    /// Unsupported CPU architecture.
    #[error("unsupported architecture: {0}")]
    ArchError(String),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

/// Convenient type alias for Result.
/// Result type of every bundler operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Wraps the error with a description of the failed step.
/// Works with both `Result<T, E>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "copying file".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Macro for early return with error.
///
/// Converts the message into a [`Error::GenericError`] and returns immediately.
///
/// ```ignore
/// bail!("operation failed");
/// bail!("invalid value: {}", value);
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::error::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_context_keeps_path() {
        let err = std::fs::read("/definitely/not/here")
            .fs_context("reading file", "/definitely/not/here")
            .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("reading file /definitely/not/here"));
    }

    #[test]
    fn test_option_context() {
        let value: Option<u8> = None;
        let err = value.context("no value").unwrap_err();
        assert_eq!(err.to_string(), "no value");
    }

    #[test]
    fn test_missing_required_names_pattern() {
        let err = Error::MissingRequired {
            pattern: "gpu_table.txt".into(),
            root: PathBuf::from("/src/newview"),
        };
        let message = err.to_string();
        assert!(message.contains("gpu_table.txt"));
        assert!(message.contains("/src/newview"));
    }
}
