//! Top-level error types for the command line tool.
//!
//! Library failures arrive as [`crate::bundler::Error`] and are wrapped with
//! a suggestion of what to check next.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error;

        match self {
            BundlerError::Cli(_) => vec!["Run with --help to list the accepted flags".to_string()],
            BundlerError::Bundler(Error::MissingRequired { .. }) => vec![
                "Check that the build finished and --source-dir points at its output".to_string(),
                "Check --configuration matches the build (Release, Debug)".to_string(),
            ],
            BundlerError::Bundler(Error::ToolFailed { .. } | Error::CommandFailed { .. }) => {
                vec!["Re-run with RUST_LOG=debug to see the full tool invocation".to_string()]
            }
            BundlerError::Bundler(Error::UnresolvedPlaceholder { .. }) => {
                vec!["Check the NSIS template named in the configuration file".to_string()]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_file_suggests_checking_build() {
        let err = BundlerError::from(crate::bundler::Error::MissingRequired {
            pattern: "gpu_table.txt".into(),
            root: PathBuf::from("/build/indra/newview"),
        });
        assert!(err.to_string().contains("gpu_table.txt"));
        assert!(!err.recovery_suggestions().is_empty());
    }
}
