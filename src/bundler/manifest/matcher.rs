//! Glob resolution against the source tree.
//!
//! Patterns use shell-style wildcards (`*`, `?`, `[...]`) and may span several
//! path components, e.g. `*/xui/*/*.xml`. A match naming a directory stands
//! for every regular file below it. Hidden entries are only matched by a
//! pattern component that itself starts with `.`.
//!
//! Each match remembers the path components its wildcard components matched,
//! which places it under the destination without renaming, and the text each
//! `*` captured, which fills a renaming template such as `lib/*.dll`.

use crate::bundler::error::{Error, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Outcome of resolving one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// At least one file matched.
    Found(Vec<Match>),
    /// Nothing matched. Callers decide whether that is fatal.
    NotFound,
}

impl MatchResult {
    /// Every matched file, flattened in match order.
    pub fn files(&self) -> Vec<&Path> {
        match self {
            MatchResult::Found(matches) => matches
                .iter()
                .flat_map(|m| m.files.iter().map(PathBuf::as_path))
                .collect(),
            MatchResult::NotFound => Vec::new(),
        }
    }

    /// True when the pattern matched nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MatchResult::NotFound)
    }
}

/// One path the glob matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The matched path itself (file or directory).
    pub path: PathBuf,
    /// Text captured by each `*` of the pattern, in order.
    pub captures: Vec<String>,
    /// Matched text of each pattern component holding a wildcard, in order.
    pub components: Vec<String>,
    /// Regular files represented by this match: the path itself for a file,
    /// every file below it (sorted walk order) for a directory.
    pub files: Vec<PathBuf>,
}

/// Compiled pattern rooted at an effective source prefix.
#[derive(Debug)]
pub struct PathMatcher {
    full_pattern: PathBuf,
    capture: Option<Regex>,
}

impl PathMatcher {
    /// Compiles `pattern` relative to `root`. An absolute pattern ignores `root`.
    pub fn new(root: &Path, pattern: &str) -> Result<Self> {
        let full_pattern = super::scope::normalize(&root.join(pattern));
        let text = path_text(&full_pattern);
        let capture = if has_wildcards(&text) {
            Some(glob_to_regex(&text)?)
        } else {
            None
        };
        Ok(Self {
            full_pattern,
            capture,
        })
    }

    /// Absolute pattern this matcher resolves.
    pub fn full_pattern(&self) -> &Path {
        &self.full_pattern
    }

    /// Resolves the pattern against the filesystem.
    pub fn resolve(&self) -> Result<MatchResult> {
        let mut matches = Vec::new();

        match &self.capture {
            None => {
                let path = &self.full_pattern;
                if path.exists() || path.is_symlink() {
                    matches.push(self.build_match(path.clone(), Vec::new(), Vec::new())?);
                }
            }
            Some(regex) => {
                let text = path_text(&self.full_pattern);
                let options = glob::MatchOptions {
                    require_literal_leading_dot: true,
                    ..glob::MatchOptions::new()
                };
                let mut paths = glob::glob_with(&text, options)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                paths.sort();
                paths.dedup();
                for path in paths {
                    let matched = path_text(&path);
                    let components = wildcard_components(&text, &matched);
                    let captures = regex
                        .captures(&matched)
                        .map(|caps| {
                            caps.iter()
                                .skip(1)
                                .map(|c| c.map(|c| c.as_str().to_string()).unwrap_or_default())
                                .collect()
                        })
                        .unwrap_or_default();
                    matches.push(self.build_match(path, captures, components)?);
                }
            }
        }

        matches.retain(|m| !m.files.is_empty());
        if matches.is_empty() {
            log::debug!("no match for {}", self.full_pattern.display());
            Ok(MatchResult::NotFound)
        } else {
            Ok(MatchResult::Found(matches))
        }
    }

    fn build_match(
        &self,
        path: PathBuf,
        captures: Vec<String>,
        components: Vec<String>,
    ) -> Result<Match> {
        let files = if path.is_dir() {
            let mut files = Vec::new();
            for entry in WalkDir::new(&path).sort_by_file_name() {
                let entry = entry?;
                if !entry.file_type().is_dir() {
                    files.push(entry.into_path());
                }
            }
            files
        } else {
            vec![path.clone()]
        };
        Ok(Match {
            path,
            captures,
            components,
            files,
        })
    }
}

/// Resolves `pattern` under `root` in one call.
pub fn resolve(root: &Path, pattern: &str) -> Result<MatchResult> {
    PathMatcher::new(root, pattern)?.resolve()
}

/// Returns the first candidate that exists on disk.
pub fn first_existing<P: AsRef<Path>>(candidates: &[P]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|c| c.as_ref())
        .find(|c| c.exists())
        .map(Path::to_path_buf)
}

/// True when `text` contains glob metacharacters.
pub fn has_wildcards(text: &str) -> bool {
    text.contains(['*', '?', '['])
}

/// Fills each `*` of `template` with the captured text, in order.
///
/// When the template has fewer wildcards than there are captures, the
/// trailing captures are used: scopes usually add their wildcards in front of
/// the pattern's own.
pub fn substitute_wildcards(template: &str, captures: &[String]) -> Result<String> {
    let stars = template.matches('*').count();
    if stars == 0 {
        return Ok(template.to_string());
    }
    if stars > captures.len() {
        return Err(Error::GenericError(format!(
            "destination {template:?} has {stars} wildcard(s) but the source pattern captured {}",
            captures.len()
        )));
    }

    let mut values = captures[captures.len() - stars..].iter();
    let mut out = String::with_capacity(template.len());
    for ch in template.chars() {
        if ch == '*' {
            if let Some(value) = values.next() {
                out.push_str(value);
            }
        } else {
            out.push(ch);
        }
    }
    Ok(out)
}

/// Replaces each wildcard component of `template` with a matched component.
///
/// Components are aligned from the end, the same way as
/// [`substitute_wildcards`] aligns captures.
pub fn substitute_components(template: &str, components: &[String]) -> Result<String> {
    let wild = template.split('/').filter(|c| has_wildcards(c)).count();
    if wild == 0 {
        return Ok(template.to_string());
    }
    if wild > components.len() {
        return Err(Error::GenericError(format!(
            "destination {template:?} has {wild} wildcard component(s) but the source matched {}",
            components.len()
        )));
    }

    let mut values = components[components.len() - wild..].iter();
    let parts: Vec<&str> = template
        .split('/')
        .map(|c| {
            if has_wildcards(c) {
                values.next().map_or(c, String::as_str)
            } else {
                c
            }
        })
        .collect();
    Ok(parts.join("/"))
}

/// Matched text of each wildcard component of `pattern`.
///
/// Glob components match one path component each, so both sides split into
/// the same number of components.
fn wildcard_components(pattern: &str, matched: &str) -> Vec<String> {
    pattern
        .split('/')
        .zip(matched.split('/'))
        .filter(|(p, _)| has_wildcards(p))
        .map(|(_, m)| m.to_string())
        .collect()
}

pub(crate) fn path_text(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Translates a glob into an anchored regex capturing each `*`.
fn glob_to_regex(glob: &str) -> Result<Regex> {
    let mut re = String::from("^");
    let mut chars = glob.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '*' => re.push_str("([^/]*)"),
            '?' => re.push_str("[^/]"),
            '[' => {
                re.push('[');
                if chars.peek() == Some(&'!') {
                    chars.next();
                    re.push('^');
                }
                for c in chars.by_ref() {
                    if c == ']' {
                        break;
                    }
                    if c == '\\' || c == '[' {
                        re.push('\\');
                    }
                    re.push(c);
                }
                re.push(']');
            }
            other => re.push_str(&regex::escape(&other.to_string())),
        }
    }
    re.push('$');
    Ok(Regex::new(&re)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    #[test]
    fn test_multi_component_glob_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "skins/default/xui/en/b.xml");
        touch(dir.path(), "skins/default/xui/en/a.xml");
        touch(dir.path(), "skins/default/textures/t.png");

        let result = resolve(&dir.path().join("skins"), "*/xui/*/*.xml").unwrap();
        let files = result.files();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("xui/en/a.xml"));
        assert!(files[1].ends_with("xui/en/b.xml"));
    }

    #[test]
    fn test_captures_follow_wildcards() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "skins/default/xui/en/a.xml");

        let result = resolve(dir.path(), "skins/*/xui/*/*.xml").unwrap();
        let MatchResult::Found(matches) = result else {
            panic!("expected a match");
        };
        assert_eq!(matches[0].captures, vec!["default", "en", "a"]);
    }

    #[test]
    fn test_missing_literal_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve(dir.path(), "gpu_table.txt").unwrap();
        assert!(result.is_not_found());
    }

    #[test]
    fn test_directory_expands_recursively() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "shaders/class1/a.glsl");
        touch(dir.path(), "shaders/class2/deep/b.glsl");
        touch(dir.path(), "shaders/root.txt");

        let result = resolve(dir.path(), "shaders").unwrap();
        let files: Vec<String> = result
            .files()
            .iter()
            .map(|f| path_text(f.strip_prefix(dir.path()).unwrap()))
            .collect();
        assert_eq!(
            files,
            vec!["shaders/class1/a.glsl", "shaders/class2/deep/b.glsl", "shaders/root.txt"]
        );
    }

    #[test]
    fn test_empty_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        assert!(resolve(dir.path(), "empty").unwrap().is_not_found());
    }

    #[test]
    fn test_substitute_wildcards() {
        let caps = vec!["libgstfoo".to_string()];
        assert_eq!(
            substitute_wildcards("lib/gstreamer-plugins/*.dll", &caps).unwrap(),
            "lib/gstreamer-plugins/libgstfoo.dll"
        );
        assert_eq!(substitute_wildcards("plain.txt", &caps).unwrap(), "plain.txt");
    }

    #[test]
    fn test_substitute_uses_trailing_captures() {
        let caps = vec!["default".to_string(), "logo".to_string()];
        assert_eq!(substitute_wildcards("html/*.png", &caps).unwrap(), "html/logo.png");
        assert!(substitute_wildcards("*/*/*.png", &caps).is_err());
    }

    #[test]
    fn test_components_follow_wildcard_components() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "skins/default/xui/en/a.xml");

        let MatchResult::Found(matches) = resolve(dir.path(), "skins/*/xui/?n/[ab].xml").unwrap()
        else {
            panic!("expected a match");
        };
        assert_eq!(matches[0].components, vec!["default", "en", "a.xml"]);
    }

    #[test]
    fn test_wildcards_skip_hidden_entries() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "textures/t.png");
        touch(dir.path(), "textures/.svn/entries");
        touch(dir.path(), "textures/.DS_Store");

        let result = resolve(dir.path(), "textures/*").unwrap();
        let files = result.files();
        assert_eq!(files, vec![dir.path().join("textures/t.png").as_path()]);

        let hidden = resolve(dir.path(), "textures/.*").unwrap();
        assert_eq!(hidden.files().len(), 2);
    }

    #[test]
    fn test_substitute_components() {
        let comps = vec!["default".to_string(), "lib1.so".to_string()];
        assert_eq!(
            substitute_components("/dst/skins/*/lib?.so", &comps).unwrap(),
            "/dst/skins/default/lib1.so"
        );
        assert_eq!(substitute_components("/dst/a[12].txt", &comps).unwrap(), "/dst/lib1.so");
        assert!(substitute_components("*/*/*", &comps).is_err());
    }

    #[test]
    fn test_first_existing() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "prebuilt/libllkdu.so");
        let found = first_existing(&[
            dir.path().join("build/libllkdu.so"),
            dir.path().join("prebuilt/libllkdu.so"),
        ]);
        assert_eq!(found, Some(dir.path().join("prebuilt/libllkdu.so")));
    }
}
