//! The manifest DSL.
//!
//! A [`ManifestBuilder`] owns the scope stack and the recorder for a single
//! packaging run. Layout code drives it with nested scopes and inclusion
//! patterns; [`ManifestBuilder::finish`] checks that every scope was closed
//! and freezes the result into a [`Manifest`].
//!
//! ```no_run
//! use kodegen_bundler_manifest::bundler::{ManifestBuilder, RecordMode};
//!
//! # fn example() -> kodegen_bundler_manifest::bundler::Result<()> {
//! let mut m = ManifestBuilder::new("indra/newview", "build/packaged", RecordMode::Copy);
//! m.exclude("*.svn*")?;
//! m.prefix("fonts", |m| {
//!     m.include("*.ttf")?;
//!     Ok(())
//! })?;
//! m.require("gpu_table.txt")?;
//! let manifest = m.finish()?;
//! println!("{} files", manifest.mappings().len());
//! # Ok(())
//! # }
//! ```

use super::{
    Manifest,
    matcher::{self, MatchResult, PathMatcher},
    recorder::{FileRecorder, Mapping, RecordMode},
    scope::{ScopeStack, normalize},
};
use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::{Path, PathBuf};

/// Outcome of an inclusion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Inclusion {
    /// This many files were recorded.
    Found(usize),
    /// Nothing matched (or every match was excluded).
    NotFound,
}

impl Inclusion {
    /// Number of files recorded.
    pub fn count(self) -> usize {
        match self {
            Inclusion::Found(count) => count,
            Inclusion::NotFound => 0,
        }
    }
}

/// Accumulates file mappings for one packaging run.
#[derive(Debug)]
pub struct ManifestBuilder {
    stack: ScopeStack,
    recorder: FileRecorder,
}

impl ManifestBuilder {
    /// Starts a run mapping `source_root` onto `dest_root`.
    pub fn new(
        source_root: impl AsRef<Path>,
        dest_root: impl AsRef<Path>,
        mode: RecordMode,
    ) -> Self {
        Self {
            stack: ScopeStack::new(source_root, dest_root),
            recorder: FileRecorder::new(mode),
        }
    }

    /// Enters a scope. Prefer [`scope`](Self::scope), which cannot be left open.
    pub fn enter_scope(&mut self, source_rel: impl AsRef<Path>, dest_rel: impl AsRef<Path>) {
        self.stack.push(source_rel, dest_rel);
    }

    /// Leaves the innermost scope, optionally checking which one it is.
    pub fn exit_scope(&mut self, expected: Option<&str>) -> Result<()> {
        self.stack.pop(expected.map(Path::new)).map(|_| ())
    }

    /// Runs `body` inside a `(source_rel, dest_rel)` scope.
    ///
    /// The scope is always exited, and the exit is checked against the scope
    /// that was entered, so a body that leaves an inner scope open surfaces as
    /// [`Error::ScopeImbalance`].
    pub fn scope<F>(&mut self, source_rel: &str, dest_rel: &str, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.enter_scope(source_rel, dest_rel);
        let result = body(self);
        let expected = if dest_rel.is_empty() { source_rel } else { dest_rel };
        let exited = self.exit_scope(Some(expected));
        result?;
        exited
    }

    /// Runs `body` inside a scope using the same component on both sides.
    pub fn prefix<F>(&mut self, rel: &str, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.scope(rel, rel, body)
    }

    /// Suppresses matching files for the rest of the current scope.
    ///
    /// Mappings already recorded are not affected.
    pub fn exclude(&mut self, pattern: &str) -> Result<()> {
        self.stack.exclude(pattern)
    }

    /// Includes every file `pattern` matches, keeping its relative path.
    pub fn include(&mut self, pattern: &str) -> Result<Inclusion> {
        self.include_inner(pattern, None)
    }

    /// Includes `pattern` under a different destination.
    ///
    /// A literal `dest` renames a single file (or re-roots a matched
    /// directory); a `dest` containing `*` receives what the source
    /// wildcards captured.
    pub fn include_as(&mut self, pattern: &str, dest: &str) -> Result<Inclusion> {
        self.include_inner(pattern, Some(dest))
    }

    /// Includes `pattern`; matching nothing aborts the run.
    pub fn require(&mut self, pattern: &str) -> Result<usize> {
        let inclusion = self.include(pattern)?;
        self.required(pattern, inclusion)
    }

    /// Renaming form of [`require`](Self::require).
    pub fn require_as(&mut self, pattern: &str, dest: &str) -> Result<usize> {
        let inclusion = self.include_as(pattern, dest)?;
        self.required(pattern, inclusion)
    }

    /// Includes `pattern`; matching nothing is logged and skipped.
    pub fn optional(&mut self, pattern: &str) -> Result<Inclusion> {
        let inclusion = self.include(pattern)?;
        self.skipped(pattern, inclusion);
        Ok(inclusion)
    }

    /// Renaming form of [`optional`](Self::optional).
    pub fn optional_as(&mut self, pattern: &str, dest: &str) -> Result<Inclusion> {
        let inclusion = self.include_as(pattern, dest)?;
        self.skipped(pattern, inclusion);
        Ok(inclusion)
    }

    /// Includes the first candidate that exists, under `dest`.
    ///
    /// Candidates are resolved against the current source prefix. Returns
    /// [`Inclusion::NotFound`] when none exists.
    pub fn include_first_existing(&mut self, candidates: &[&str], dest: &str) -> Result<Inclusion> {
        let resolved: Vec<PathBuf> = candidates.iter().map(|c| self.src_path_of(c)).collect();
        match matcher::first_existing(&resolved) {
            Some(found) => self.include_found(&found, dest),
            None => {
                log::warn!("Skipping {dest}: none of {candidates:?} exists");
                Ok(Inclusion::NotFound)
            }
        }
    }

    /// Writes generated `contents` to `dest_rel` under the destination prefix.
    ///
    /// Nothing is written in declare-only mode.
    pub fn put_in_file(&mut self, contents: &str, dest_rel: &str) -> Result<PathBuf> {
        let path = self.dst_path_of(dest_rel);
        if self.recorder.mode() == RecordMode::Copy {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .fs_context("creating destination directory", parent)?;
            }
            std::fs::write(&path, contents).fs_context("writing generated file", &path)?;
            self.recorder.record_created(&path);
        }
        Ok(path)
    }

    /// Absolute destination for `rel` under the current destination prefix.
    pub fn dst_path_of(&self, rel: &str) -> PathBuf {
        normalize(&self.stack.current_dest_prefix().join(rel))
    }

    /// Absolute source for `rel` under the current source prefix.
    pub fn src_path_of(&self, rel: &str) -> PathBuf {
        normalize(&self.stack.current_source_prefix().join(rel))
    }

    /// Effective source prefix.
    pub fn current_source_prefix(&self) -> PathBuf {
        self.stack.current_source_prefix()
    }

    /// Effective destination prefix.
    pub fn current_dest_prefix(&self) -> PathBuf {
        self.stack.current_dest_prefix()
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Mappings recorded so far.
    pub fn mappings(&self) -> &[Mapping] {
        self.recorder.mappings()
    }

    /// Recording mode of this run.
    pub fn mode(&self) -> RecordMode {
        self.recorder.mode()
    }

    /// Closes the run and freezes the mapping list.
    pub fn finish(self) -> Result<Manifest> {
        self.stack.ensure_balanced()?;
        let source_root = self.stack.source_root().to_path_buf();
        let dest_root = self.stack.dest_root().to_path_buf();
        let (mappings, created_paths) = self.recorder.into_parts();
        log::info!(
            "Manifest complete: {} mapping(s) into {}",
            mappings.len(),
            dest_root.display()
        );
        Ok(Manifest::new(source_root, dest_root, mappings, created_paths))
    }

    fn include_inner(&mut self, pattern: &str, dest: Option<&str>) -> Result<Inclusion> {
        let source_prefix = self.stack.current_source_prefix();
        let matches = match PathMatcher::new(&source_prefix, pattern)?.resolve()? {
            MatchResult::Found(matches) => matches,
            MatchResult::NotFound => return Ok(Inclusion::NotFound),
        };

        let dest_prefix = self.stack.current_dest_prefix();
        let dest_rel = dest.unwrap_or(pattern);
        let template = if dest_rel.is_empty() {
            matcher::path_text(&dest_prefix)
        } else {
            matcher::path_text(&dest_prefix.join(dest_rel))
        };

        if let Some(dest) = dest
            && !dest.contains('*')
            && !matcher::has_wildcards(&matcher::path_text(&dest_prefix))
            && matches.len() > 1
        {
            return Err(Error::GenericError(format!(
                "pattern {pattern:?} matched {} paths but destination {template:?} names a single path",
                matches.len()
            )));
        }

        let mut count = 0;
        for found in &matches {
            // without an override each match keeps the path it was found at
            let target = match dest {
                None => matcher::substitute_components(&template, &found.components)?,
                Some(_) => matcher::substitute_wildcards(&template, &found.captures)?,
            };
            let target = normalize(Path::new(&target));
            for file in &found.files {
                if self.stack.is_excluded(file) {
                    log::debug!("excluded {}", file.display());
                    continue;
                }
                let dest_file = if *file == found.path {
                    target.clone()
                } else {
                    target.join(file.strip_prefix(&found.path)?)
                };
                self.recorder.record(file, &dest_file)?;
                count += 1;
            }
        }

        Ok(if count == 0 {
            Inclusion::NotFound
        } else {
            Inclusion::Found(count)
        })
    }

    /// Records an already resolved source under `dest`, without globbing it.
    fn include_found(&mut self, found: &Path, dest: &str) -> Result<Inclusion> {
        if self.stack.is_excluded(found) {
            log::debug!("excluded {}", found.display());
            return Ok(Inclusion::NotFound);
        }
        let target = self.dst_path_of(dest);
        self.recorder.record(found, &target)?;
        Ok(Inclusion::Found(1))
    }

    fn required(&self, pattern: &str, inclusion: Inclusion) -> Result<usize> {
        match inclusion {
            Inclusion::Found(count) => Ok(count),
            Inclusion::NotFound => Err(Error::MissingRequired {
                pattern: pattern.to_string(),
                root: self.stack.current_source_prefix(),
            }),
        }
    }

    fn skipped(&self, pattern: &str, inclusion: Inclusion) {
        if inclusion == Inclusion::NotFound {
            log::warn!(
                "Skipping {pattern}: not found in {}",
                self.stack.current_source_prefix().display()
            );
        }
    }
}
