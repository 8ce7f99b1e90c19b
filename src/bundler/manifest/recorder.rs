//! File sink for resolved mappings.
//!
//! The recorder performs the physical copy for each resolved pair (or only
//! plans it in [`RecordMode::DeclareOnly`]) and keeps the ordered mapping list
//! that artifact generators consume.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    utils::fs,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Whether recording touches the filesystem.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RecordMode {
    /// Copy each source to its destination.
    #[default]
    Copy,
    /// Only plan: record the mapping without creating anything.
    DeclareOnly,
}

/// One resolved source/destination pair.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Mapping {
    /// Absolute source file.
    pub source: PathBuf,
    /// Absolute destination file.
    pub dest: PathBuf,
    /// True when the destination was written during this run.
    pub created: bool,
}

/// Ordered sink for mappings.
#[derive(Debug, Default)]
pub struct FileRecorder {
    mode: RecordMode,
    mappings: Vec<Mapping>,
    created_paths: Vec<PathBuf>,
}

impl FileRecorder {
    /// Creates an empty recorder.
    pub fn new(mode: RecordMode) -> Self {
        Self {
            mode,
            mappings: Vec::new(),
            created_paths: Vec::new(),
        }
    }

    /// Recording mode.
    pub fn mode(&self) -> RecordMode {
        self.mode
    }

    /// Copies `source` to `dest` (unless declare-only) and appends the mapping.
    ///
    /// A missing source is reported as [`Error::MissingSource`] so the caller
    /// can decide whether to skip it; failing to create the destination
    /// directory or write the file is fatal.
    pub fn record(&mut self, source: &Path, dest: &Path) -> Result<()> {
        if !source.exists() && !source.is_symlink() {
            return Err(Error::MissingSource(source.to_path_buf()));
        }

        let created = match self.mode {
            RecordMode::Copy => {
                if let Some(parent) = dest.parent() {
                    std::fs::create_dir_all(parent)
                        .fs_context("creating destination directory", parent)?;
                }
                fs::copy_file_sync(source, dest)?;
                self.created_paths.push(dest.to_path_buf());
                true
            }
            RecordMode::DeclareOnly => false,
        };

        log::debug!("{} -> {}", source.display(), dest.display());
        self.mappings.push(Mapping {
            source: source.to_path_buf(),
            dest: dest.to_path_buf(),
            created,
        });
        Ok(())
    }

    /// Notes a destination produced without a source (generated files).
    pub fn record_created(&mut self, path: &Path) {
        self.created_paths.push(path.to_path_buf());
    }

    /// Mapping list in recording order, duplicates included.
    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    /// Destinations written during this run.
    pub fn created_paths(&self) -> &[PathBuf] {
        &self.created_paths
    }

    pub(crate) fn into_parts(self) -> (Vec<Mapping>, Vec<PathBuf>) {
        (self.mappings, self.created_paths)
    }
}
