//! Install and uninstall directives derived from a manifest.
//!
//! NSIS installs a file into the current output directory, so the install
//! block walks the staged files deepest-first and emits `SetOutPath` only
//! when the target directory changes. The uninstall block deletes every file
//! and then removes every directory the files imply, ancestors included,
//! children before parents.

use super::utils::install_path;
use crate::bundler::{error::Result, manifest::Manifest};
use std::{
    collections::HashSet,
    fmt::Write,
    path::{Path, PathBuf},
};

/// One staged file and where it lands under `$INSTDIR`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InstalledFile {
    staged: PathBuf,
    relative: String,
}

impl InstalledFile {
    fn dir(&self) -> &str {
        self.relative.rsplit_once('/').map_or("", |(dir, _)| dir)
    }
}

/// Install/uninstall directive generator.
#[derive(Debug, Clone)]
pub struct NsisCommands {
    files: Vec<InstalledFile>,
}

impl NsisCommands {
    /// Collects the files of `manifest`, deepest first.
    ///
    /// A destination written twice is installed once. A destination outside
    /// the manifest root is a contract violation and fails.
    pub fn from_manifest(manifest: &Manifest) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for mapping in manifest.mappings() {
            let relative = manifest.relative_dest(mapping)?;
            if !denotes_file(&mapping.source, &mapping.dest, mapping.created) {
                continue;
            }
            let relative = relative_text(relative);
            if seen.insert(relative.clone()) {
                files.push(InstalledFile {
                    staged: mapping.dest.clone(),
                    relative,
                });
            }
        }

        sort_deepest_first(&mut files, |f| f.relative.as_str());
        log::debug!("{} file(s) in installer", files.len());
        Ok(Self { files })
    }

    /// Number of installed files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when nothing is installed.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// `SetOutPath`/`File` block for the install section.
    pub fn install_commands(&self) -> String {
        let mut out = String::new();
        let mut out_path: Option<&str> = None;
        for file in &self.files {
            let dir = file.dir();
            if out_path != Some(dir) {
                out_path = Some(dir);
                let _ = writeln!(out, "SetOutPath \"{}\"", install_path(dir));
            }
            let _ = writeln!(out, "File \"{}\"", file.staged.display());
        }
        out
    }

    /// `Delete`/`RMDir` block for the uninstall section.
    pub fn uninstall_commands(&self) -> String {
        let mut out = String::new();
        for file in &self.files {
            let _ = writeln!(out, "Delete \"{}\"", install_path(&file.relative));
        }
        for dir in self.removed_dirs() {
            let _ = writeln!(out, "RMDir \"{}\"", install_path(&dir));
        }
        out
    }

    /// Number of `SetOutPath` directives in the install block.
    pub fn directory_switch_count(&self) -> usize {
        let mut count = 0;
        let mut previous = None;
        for file in &self.files {
            if previous != Some(file.dir()) {
                previous = Some(file.dir());
                count += 1;
            }
        }
        count
    }

    /// Every directory implied by the installed files, deepest first.
    ///
    /// `$INSTDIR` itself is left to the uninstaller template.
    fn removed_dirs(&self) -> Vec<String> {
        let mut dirs: Vec<String> = self
            .files
            .iter()
            .flat_map(|f| path_ancestors(f.dir()))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        sort_deepest_first(&mut dirs, String::as_str);
        dirs
    }
}

/// `a/b/c` → `a/b/c`, `a/b`, `a`.
pub fn path_ancestors(dir: &str) -> Vec<String> {
    let mut ancestors = Vec::new();
    let mut current = dir;
    while !current.is_empty() {
        ancestors.push(current.to_string());
        current = current.rsplit_once('/').map_or("", |(parent, _)| parent);
    }
    ancestors
}

/// Orders by (depth, path) ascending, then reverses.
fn sort_deepest_first<T>(items: &mut [T], key: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| {
        let (a, b) = (key(a), key(b));
        a.matches('/')
            .count()
            .cmp(&b.matches('/').count())
            .then_with(|| a.cmp(b))
    });
    items.reverse();
}

/// A staged regular file, or a planned copy of one.
fn denotes_file(source: &Path, dest: &Path, created: bool) -> bool {
    if created || dest.exists() {
        dest.is_file()
    } else {
        source.is_file()
    }
}

fn relative_text(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::manifest::{ManifestBuilder, Mapping, RecordMode};
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    /// Manifest staging `files` (relative) under a fresh destination root.
    fn staged(files: &[&str]) -> (tempfile::TempDir, tempfile::TempDir, Manifest) {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        for f in files {
            touch(src.path(), f);
        }
        let mut m = ManifestBuilder::new(src.path(), dst.path(), RecordMode::Copy);
        for f in files {
            m.require(f).unwrap();
        }
        let manifest = m.finish().unwrap();
        (src, dst, manifest)
    }

    fn lines(text: &str, prefix: &str) -> Vec<String> {
        text.lines()
            .filter(|l| l.starts_with(prefix))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_skins_scenario_two_directory_switches() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        touch(src.path(), "skins/default/xui/en/a.xml");
        touch(src.path(), "skins/default/xui/en/b.xml");
        touch(src.path(), "skins/default/textures/t.png");

        let mut m = ManifestBuilder::new(src.path(), dst.path(), RecordMode::Copy);
        m.prefix("skins", |m| {
            m.require("*/xui/*/*.xml")?;
            m.require("*/textures/*.png")?;
            Ok(())
        })
        .unwrap();
        let commands = NsisCommands::from_manifest(&m.finish().unwrap()).unwrap();

        let install = commands.install_commands();
        assert_eq!(
            lines(&install, "SetOutPath"),
            vec![
                "SetOutPath \"$INSTDIR\\skins\\default\\xui\\en\"",
                "SetOutPath \"$INSTDIR\\skins\\default\\textures\"",
            ]
        );
        assert_eq!(commands.directory_switch_count(), 2);

        let install_lines: Vec<&str> = install.lines().collect();
        assert!(install_lines[1].ends_with("b.xml\""));
        assert!(install_lines[2].ends_with("a.xml\""));
        assert!(install_lines[4].ends_with("t.png\""));
    }

    #[test]
    fn test_every_file_follows_its_own_directory() {
        let (_src, _dst, manifest) = staged(&[
            "a.txt",
            "app_settings/settings.xml",
            "app_settings/shaders/class1/deferred/a.glsl",
            "app_settings/shaders/class1/b.glsl",
            "fonts/x.ttf",
            "llplugin/imageformats/qgif4.dll",
            "llplugin/media.dll",
        ]);
        let commands = NsisCommands::from_manifest(&manifest).unwrap();

        let mut current = None;
        let mut switches = 0;
        for line in commands.install_commands().lines() {
            if let Some(dir) = line.strip_prefix("SetOutPath ") {
                current = Some(dir.trim_matches('"').to_string());
                switches += 1;
            } else {
                let file = line.strip_prefix("File ").unwrap().trim_matches('"');
                let rel = Path::new(file).strip_prefix(manifest.dest_root()).unwrap();
                let parent = relative_text(rel.parent().unwrap());
                assert_eq!(current.as_deref(), Some(install_path(&parent).as_str()));
            }
        }
        assert_eq!(switches, commands.directory_switch_count());
        assert_eq!(switches, 7);
    }

    #[test]
    fn test_rmdir_children_before_parents() {
        let (_src, _dst, manifest) = staged(&[
            "app_settings/shaders/class1/deferred/a.glsl",
            "app_settings/windlight/skies/x.xml",
            "skins/default/xui/en/a.xml",
            "top.txt",
        ]);
        let uninstall = NsisCommands::from_manifest(&manifest)
            .unwrap()
            .uninstall_commands();
        let rmdirs: Vec<String> = lines(&uninstall, "RMDir")
            .iter()
            .map(|l| {
                l.trim_start_matches("RMDir \"$INSTDIR\\")
                    .trim_end_matches('"')
                    .replace('\\', "/")
            })
            .collect();

        // ancestors are expanded, each exactly once
        let unique: HashSet<_> = rmdirs.iter().collect();
        assert_eq!(unique.len(), rmdirs.len());
        for expected in ["app_settings", "app_settings/shaders", "skins/default/xui"] {
            assert!(rmdirs.iter().any(|d| d == expected), "missing {expected}");
        }

        for (i, dir) in rmdirs.iter().enumerate() {
            let prefix = format!("{dir}/");
            assert!(
                rmdirs[..i].iter().all(|earlier| !prefix.starts_with(&format!("{earlier}/"))),
                "{dir} removed after an ancestor"
            );
            assert!(
                rmdirs[i + 1..].iter().all(|later| !later.starts_with(&prefix)),
                "{dir} removed before a descendant"
            );
        }
        assert!(!uninstall.contains("RMDir \"$INSTDIR\"\n"));
        assert_eq!(lines(&uninstall, "Delete").len(), 4);
    }

    #[test]
    fn test_duplicate_destination_installed_once() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        touch(src.path(), "licenses-win32.txt");
        touch(src.path(), "licenses-extra.txt");

        let mut m = ManifestBuilder::new(src.path(), dst.path(), RecordMode::Copy);
        m.require_as("licenses-win32.txt", "licenses.txt").unwrap();
        m.require_as("licenses-extra.txt", "licenses.txt").unwrap();
        let manifest = m.finish().unwrap();
        assert_eq!(manifest.mappings().len(), 2);

        let commands = NsisCommands::from_manifest(&manifest).unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(lines(&commands.uninstall_commands(), "Delete").len(), 1);
    }

    #[test]
    fn test_destination_outside_root_fails() {
        let manifest = Manifest::new(
            PathBuf::from("/src"),
            PathBuf::from("/stage/packaged"),
            vec![Mapping {
                source: PathBuf::from("/src/a.txt"),
                dest: PathBuf::from("/elsewhere/a.txt"),
                created: false,
            }],
            Vec::new(),
        );
        assert!(matches!(
            NsisCommands::from_manifest(&manifest),
            Err(crate::bundler::Error::DestinationOutsideRoot { .. })
        ));
    }

    #[test]
    fn test_identical_runs_give_identical_blocks() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        for f in ["a/b/c.txt", "a/d.txt", "a/b/f.txt", "e.txt"] {
            touch(src.path(), f);
        }

        let run = || {
            let mut m = ManifestBuilder::new(src.path(), dst.path(), RecordMode::Copy);
            m.include("a").unwrap();
            m.include("*.txt").unwrap();
            let commands = NsisCommands::from_manifest(&m.finish().unwrap()).unwrap();
            (commands.install_commands(), commands.uninstall_commands())
        };
        let first = run();
        let second = run();
        assert_eq!(first, second);
        assert!(first.0.contains("SetOutPath \"$INSTDIR\\a\\b\""));
    }

    #[test]
    fn test_path_ancestors() {
        assert_eq!(path_ancestors("a/b/c"), vec!["a/b/c", "a/b", "a"]);
        assert!(path_ancestors("").is_empty());
    }
}
