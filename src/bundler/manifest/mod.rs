//! Declarative file manifest engine.
//!
//! - `scope` - nested source/destination prefixes and scoped exclusions
//! - `matcher` - glob resolution against the source tree
//! - `recorder` - copies resolved pairs and keeps the ordered mapping list
//! - `builder` - the DSL surface used by platform layouts

mod builder;
pub mod matcher;
mod recorder;
mod scope;

pub use builder::{Inclusion, ManifestBuilder};
pub use matcher::{Match, MatchResult, PathMatcher};
pub use recorder::{FileRecorder, Mapping, RecordMode};
pub use scope::{ScopeFrame, ScopeStack};

use crate::bundler::error::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Frozen result of a manifest run.
///
/// Mappings keep construction order, including repeated destinations.
#[derive(Clone, Debug, Serialize)]
pub struct Manifest {
    source_root: PathBuf,
    dest_root: PathBuf,
    mappings: Vec<Mapping>,
    created_paths: Vec<PathBuf>,
}

impl Manifest {
    pub(crate) fn new(
        source_root: PathBuf,
        dest_root: PathBuf,
        mappings: Vec<Mapping>,
        created_paths: Vec<PathBuf>,
    ) -> Self {
        Self {
            source_root,
            dest_root,
            mappings,
            created_paths,
        }
    }

    /// Source root the run started from.
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Destination root every mapping lives under.
    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    /// Mappings in construction order.
    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    /// Destinations written during the run, generated files included.
    pub fn created_paths(&self) -> &[PathBuf] {
        &self.created_paths
    }

    /// Destination of `mapping` relative to the destination root.
    pub fn relative_dest<'a>(&self, mapping: &'a Mapping) -> Result<&'a Path> {
        mapping
            .dest
            .strip_prefix(&self.dest_root)
            .map_err(|_| Error::DestinationOutsideRoot {
                dest: mapping.dest.clone(),
                root: self.dest_root.clone(),
            })
    }

    /// Pretty JSON listing of the manifest.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
