//! File system utilities for bundling.
//!
//! Provides copy helpers with automatic directory creation, symlink
//! preservation for staged bundles, and the `.temp` → final rename used so a
//! failed run never leaves a finished-looking artifact behind.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Creates `path` and any missing parents.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Copies a regular file, creating the destination's parent directories.
///
/// Overwrites an existing destination.
pub fn copy_file_sync(from: &Path, to: &Path) -> Result<()> {
    if from.is_dir() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        std::fs::create_dir_all(dest_dir).fs_context("creating destination directory", dest_dir)?;
    }
    std::fs::copy(from, to).fs_context("copying file", from)?;
    Ok(())
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_file() {
        return Err(Error::GenericError(format!(
            "{from:?} does not exist or is not a file"
        )));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating destination directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", from)?;
    Ok(())
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Preserves symlinks on platforms that support them.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Err(Error::GenericError(format!(
            "{from:?} does not exist or is not a directory"
        )));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)?;
        }

        for entry in walkdir::WalkDir::new(&from).sort_by_file_name() {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_symlink() {
                let target = std::fs::read_link(entry.path())?;
                if entry.path().is_dir() {
                    symlink_dir(&target, &dest_path)?;
                } else {
                    symlink_file(&target, &dest_path)?;
                }
            } else if entry.file_type().is_dir() {
                std::fs::create_dir_all(dest_path)?;
            } else {
                std::fs::copy(entry.path(), dest_path)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

/// Path an artifact is built at before it is published.
pub fn temp_path_for(artifact: &Path) -> PathBuf {
    let mut name = artifact.as_os_str().to_owned();
    name.push(".temp");
    PathBuf::from(name)
}

/// Moves a completed `.temp` artifact to its final name.
pub async fn publish(temp: &Path, artifact: &Path) -> Result<()> {
    if fs::try_exists(artifact).await.unwrap_or(false) {
        fs::remove_file(artifact)
            .await
            .fs_context("removing previous artifact", artifact)?;
    }
    fs::rename(temp, artifact)
        .await
        .fs_context("publishing artifact", artifact)
}

/// Removes a leftover `.temp` artifact after a failure. Missing is fine.
pub async fn discard(temp: &Path) {
    if let Err(e) = fs::remove_file(temp).await
        && e.kind() != io::ErrorKind::NotFound
    {
        log::warn!("Could not remove {}: {}", temp.display(), e);
    }
}

/// Adds execute permission for everyone who can read the file.
#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path).fs_context("reading permissions", path)?;
    let mut permissions = metadata.permissions();
    let mode = permissions.mode();
    permissions.set_mode(mode | ((mode & 0o444) >> 2));
    std::fs::set_permissions(path, permissions).fs_context("setting permissions", path)
}

/// Execute bits do not exist on this platform.
#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_appends_suffix() {
        assert_eq!(
            temp_path_for(Path::new("/out/Viewer_1-2-3_Setup.exe")),
            PathBuf::from("/out/Viewer_1-2-3_Setup.exe.temp")
        );
    }

    #[tokio::test]
    async fn test_publish_replaces_previous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("pkg.tar.gz");
        let temp = temp_path_for(&artifact);
        std::fs::write(&artifact, "old").unwrap();
        std::fs::write(&temp, "new").unwrap();

        publish(&temp, &artifact).await.unwrap();

        assert_eq!(std::fs::read_to_string(&artifact).unwrap(), "new");
        assert!(!temp.exists());
    }

    #[tokio::test]
    async fn test_copy_dir_recreates_tree() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(src.path().join("Contents/MacOS")).unwrap();
        std::fs::write(src.path().join("Contents/MacOS/Viewer"), "bin").unwrap();

        let target = dst.path().join("Viewer.app");
        copy_dir(src.path(), &target).await.unwrap();

        assert!(target.join("Contents/MacOS/Viewer").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_make_executable_follows_read_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("install.sh");
        std::fs::write(&script, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o644)).unwrap();

        make_executable(&script).unwrap();

        let mode = std::fs::metadata(&script).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755);
    }
}
