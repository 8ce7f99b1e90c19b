//! Declarative manifest engine and installer generator for viewer packaging.
//!
//! The library stages a build tree according to a platform layout and turns
//! the result into:
//! - Windows installers (.exe via NSIS)
//! - macOS disk images (.dmg)
//! - Linux tarballs (.tar.gz)
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
