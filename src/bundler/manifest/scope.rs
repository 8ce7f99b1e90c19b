//! Nested source/destination prefix scopes.
//!
//! The stack always holds a root frame carrying the absolute source and
//! destination roots of the run. Every other frame stores the *relative*
//! components it was entered with; effective prefixes are recomputed from the
//! frames on each call, so there is no cached "current directory" that could
//! drift out of sync with the stack.

use crate::bundler::error::{Error, Result};
use glob::Pattern;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// One pushed prefix scope.
#[derive(Debug, Clone)]
pub struct ScopeFrame {
    source_rel: PathBuf,
    dest_rel: PathBuf,
    excludes: Vec<Exclusion>,
}

impl ScopeFrame {
    fn new(source_rel: impl Into<PathBuf>, dest_rel: impl Into<PathBuf>) -> Self {
        Self {
            source_rel: source_rel.into(),
            dest_rel: dest_rel.into(),
            excludes: Vec::new(),
        }
    }

    /// Source component this frame was entered with.
    pub fn source_rel(&self) -> &Path {
        &self.source_rel
    }

    /// Destination component this frame was entered with.
    pub fn dest_rel(&self) -> &Path {
        &self.dest_rel
    }
}

/// Exclusion glob registered on a frame.
#[derive(Debug, Clone)]
struct Exclusion {
    pattern: Pattern,
    /// Effective source prefix when the exclusion was declared.
    base: PathBuf,
    /// Pattern has no separator, so it is also tried against bare file names.
    name_only: bool,
}

impl Exclusion {
    fn matches(&self, path: &Path) -> bool {
        if self.pattern.matches_path(path) {
            return true;
        }
        if let Ok(rel) = path.strip_prefix(&self.base)
            && self.pattern.matches_path(rel)
        {
            return true;
        }
        self.name_only
            && path
                .file_name()
                .is_some_and(|name| self.pattern.matches(&name.to_string_lossy()))
    }
}

/// Ordered stack of active prefix scopes.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
}

impl ScopeStack {
    /// Creates a stack whose root frame maps `source_root` onto `dest_root`.
    pub fn new(source_root: impl AsRef<Path>, dest_root: impl AsRef<Path>) -> Self {
        Self {
            frames: vec![ScopeFrame::new(
                normalize(source_root.as_ref()),
                normalize(dest_root.as_ref()),
            )],
        }
    }

    /// Number of frames above the root.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Enters a scope. An empty component leaves that side unchanged; an
    /// absolute component replaces everything above it.
    pub fn push(&mut self, source_rel: impl AsRef<Path>, dest_rel: impl AsRef<Path>) {
        let frame = ScopeFrame::new(source_rel.as_ref(), dest_rel.as_ref());
        log::debug!(
            "enter scope src={:?} dst={:?} (depth {})",
            frame.source_rel,
            frame.dest_rel,
            self.frames.len()
        );
        self.frames.push(frame);
    }

    /// Leaves the innermost scope.
    ///
    /// When `expected` is given it must equal the component the frame was
    /// entered with, on either the source or the destination side.
    pub fn pop(&mut self, expected: Option<&Path>) -> Result<ScopeFrame> {
        if self.frames.len() <= 1 {
            return Err(Error::ScopeImbalance(match expected {
                Some(expected) => format!(
                    "exit of scope {:?} with no open scope",
                    expected.display().to_string()
                ),
                None => "exit with no open scope".to_string(),
            }));
        }

        if let Some(expected) = expected {
            let top = &self.frames[self.frames.len() - 1];
            if expected != top.dest_rel && expected != top.source_rel {
                return Err(Error::ScopeImbalance(format!(
                    "exit of scope {:?} but innermost scope is src={:?} dst={:?}",
                    expected.display().to_string(),
                    top.source_rel.display().to_string(),
                    top.dest_rel.display().to_string()
                )));
            }
        }

        let frame = self.frames.pop().ok_or_else(|| {
            Error::ScopeImbalance("exit with no open scope".to_string())
        })?;
        log::debug!("exit scope src={:?} dst={:?}", frame.source_rel, frame.dest_rel);
        Ok(frame)
    }

    /// Effective source prefix: every frame's source component joined in order.
    pub fn current_source_prefix(&self) -> PathBuf {
        normalize(&self.frames.iter().fold(PathBuf::new(), |acc, frame| {
            join_component(acc, &frame.source_rel)
        }))
    }

    /// Effective destination prefix: every frame's destination component joined in order.
    pub fn current_dest_prefix(&self) -> PathBuf {
        normalize(&self.frames.iter().fold(PathBuf::new(), |acc, frame| {
            join_component(acc, &frame.dest_rel)
        }))
    }

    /// Source root of the run.
    pub fn source_root(&self) -> &Path {
        &self.frames[0].source_rel
    }

    /// Destination root of the run.
    pub fn dest_root(&self) -> &Path {
        &self.frames[0].dest_rel
    }

    /// Registers an exclusion on the innermost scope.
    ///
    /// It stays active for nested scopes opened afterwards and is dropped
    /// together with the scope that declared it.
    pub fn exclude(&mut self, pattern: &str) -> Result<()> {
        let base = self.current_source_prefix();
        let exclusion = Exclusion {
            pattern: Pattern::new(pattern)?,
            base,
            name_only: !pattern.contains('/'),
        };
        let last = self.frames.len() - 1;
        self.frames[last].excludes.push(exclusion);
        Ok(())
    }

    /// True when any exclusion on the stack matches `path`.
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.frames
            .iter()
            .flat_map(|frame| frame.excludes.iter())
            .any(|exclusion| exclusion.matches(path))
    }

    /// Fails unless every entered scope has been exited.
    pub fn ensure_balanced(&self) -> Result<()> {
        if self.depth() == 0 {
            return Ok(());
        }
        let open: Vec<String> = self.frames[1..]
            .iter()
            .map(|frame| frame.source_rel.display().to_string())
            .collect();
        Err(Error::ScopeImbalance(format!(
            "{} scope(s) still open at teardown: {}",
            open.len(),
            open.join(" > ")
        )))
    }
}

fn join_component(acc: PathBuf, component: &Path) -> PathBuf {
    if component.as_os_str().is_empty() {
        acc
    } else {
        acc.join(component)
    }
}

/// Lexically resolves `.` and `..` without touching the filesystem.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    match path.absolutize() {
        Ok(resolved) => resolved.into_owned(),
        Err(_) => path.to_path_buf(),
    }
}
