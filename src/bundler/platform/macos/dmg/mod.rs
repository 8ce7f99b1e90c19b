//! macOS DMG disk image creator.
//!
//! Creates drag-to-install DMG files using the native hdiutil tool.
//!
//! - `creation` - staging directory contents and the hdiutil call

mod creation;

pub use creation::{app_bundle_name, create_dmg, stage_contents, volume_name};

use crate::bundler::{
    error::{Context, Error, Result},
    settings::Settings,
    utils::fs,
};
use std::path::PathBuf;

/// Bundle the staged application as a DMG disk image.
///
/// # Process
/// 1. Create temporary staging directory
/// 2. Copy the staged .app and configured assets into it
/// 3. Create Applications symlink for drag-to-install
/// 4. Generate `<name>.dmg.temp` using hdiutil with UDZO compression
/// 5. Rename to the final name
///
/// # Returns
/// Vector containing path to created DMG file.
pub async fn bundle_project(settings: &Settings) -> Result<Vec<PathBuf>> {
    log::info!("Creating DMG for {}", settings.product_name());

    let output_dir = settings.artifact_dir();
    fs::create_dir_all(output_dir).await?;

    let dmg_path = output_dir.join(settings.dmg_name());
    let temp_path = fs::temp_path_for(&dmg_path);

    let temp_dir = tempfile::tempdir().map_err(|e| {
        Error::GenericError(format!(
            "Failed to create temporary directory for DMG contents: {}",
            e
        ))
    })?;
    stage_contents(settings, temp_dir.path()).await?;

    let created = create_dmg(settings, temp_dir.path(), &temp_path)
        .await
        .context("creating disk image");
    if created.is_err() {
        fs::discard(&temp_path).await;
    }
    created?;
    fs::publish(&temp_path, &dmg_path).await?;

    log::info!("✓ Created DMG: {}", dmg_path.display());

    Ok(vec![dmg_path])
}
