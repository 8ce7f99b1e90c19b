//! Linux tarball packer.
//!
//! Archives the staged tree under a single versioned top-level directory.
//! Owners, timestamps and permission bits are normalised so the archive does
//! not depend on who built it or when.

use crate::bundler::{
    error::{Context, Error, ErrorExt, Result},
    settings::Settings,
    utils::fs,
};
use flate2::{Compression, write::GzEncoder};
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};
use tar::HeaderMode;
use walkdir::WalkDir;

/// Bundle the staged tree as `<root name>.tar.gz`.
///
/// # Returns
///
/// Vector containing the path to the generated tarball.
pub async fn bundle_project(settings: &Settings) -> Result<Vec<PathBuf>> {
    let root_name = settings.tarball_root_name();
    log::info!("Creating tarball {root_name}");

    let output_dir = settings.artifact_dir();
    fs::create_dir_all(output_dir).await?;

    let tarball_path = output_dir.join(format!("{root_name}.tar.gz"));
    let temp_path = fs::temp_path_for(&tarball_path);

    let packed = tar_and_gzip_dir(
        settings.dest_root().to_path_buf(),
        root_name,
        temp_path.clone(),
        Compression::new(settings.tarball().compression_level.min(9)),
    )
    .await
    .context("packing tarball");
    if packed.is_err() {
        fs::discard(&temp_path).await;
    }
    packed?;
    fs::publish(&temp_path, &tarball_path).await?;

    log::info!("✓ Created tarball: {}", tarball_path.display());

    Ok(vec![tarball_path])
}

/// Permission bits stored in the archive.
///
/// Directories are `0755`; files give group and other the owner's read and
/// execute bits, never write.
pub fn normalize_mode(mode: u32, is_dir: bool) -> u32 {
    if is_dir {
        return 0o755;
    }
    let owner = (mode >> 6) & 0o7;
    let shared = owner & 0o5;
    (owner << 6) | (shared << 3) | shared
}

#[cfg(unix)]
fn source_mode(metadata: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode()
}

#[cfg(not(unix))]
fn source_mode(metadata: &std::fs::Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

/// Create a gzip tarball of `src_dir` at `dest_path`, rooted at `root_name`.
async fn tar_and_gzip_dir(
    src_dir: PathBuf,
    root_name: String,
    dest_path: PathBuf,
    compression: Compression,
) -> Result<()> {
    let tar_gz = tokio::fs::File::create(&dest_path)
        .await
        .fs_context("creating tar.gz file", &dest_path)?;
    let std_file = tar_gz.into_std().await;

    tokio::task::spawn_blocking(move || {
        let enc = GzEncoder::new(std_file, compression);
        let mut tar = tar::Builder::new(enc);
        tar.follow_symlinks(false);

        for entry in WalkDir::new(&src_dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            let rel_path = path.strip_prefix(&src_dir)?;
            let archive_path = Path::new(&root_name).join(rel_path);

            let metadata = std::fs::symlink_metadata(path).fs_context("reading metadata", path)?;
            let mut header = tar::Header::new_gnu();
            header.set_metadata_in_mode(&metadata, HeaderMode::Deterministic);
            header.set_mode(normalize_mode(source_mode(&metadata), metadata.is_dir()));

            if entry.file_type().is_symlink() {
                let target = std::fs::read_link(path).fs_context("reading symlink", path)?;
                header.set_size(0);
                tar.append_link(&mut header, &archive_path, &target)?;
            } else if entry.file_type().is_dir() {
                tar.append_data(&mut header, &archive_path, &mut io::empty())?;
            } else {
                let mut file = std::fs::File::open(path).fs_context("opening file", path)?;
                tar.append_data(&mut header, &archive_path, &mut file)?;
            }
        }

        let enc = tar.into_inner()?;
        let mut finished = enc.finish()?;
        finished.flush()?;
        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Join error: {}", e)))?
}
