//! DMG staging and hdiutil invocation.
//!
//! The staging directory holds the application bundle, an `Applications`
//! symlink for drag-to-install, and the optional Finder dressing.

use crate::bundler::{
    error::{Context, Error, ErrorExt, Result},
    settings::Settings,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Name of the application bundle inside the image: `Second Life.app`.
pub fn app_bundle_name(settings: &Settings) -> String {
    format!("{}.app", settings.product_name())
}

/// Mounted volume name: configured, or product name and version.
pub fn volume_name(settings: &Settings) -> String {
    settings.dmg().volume_name.clone().unwrap_or_else(|| {
        format!(
            "{} {}",
            settings.product_name(),
            settings.package().version_dots()
        )
    })
}

/// Fills `staging` with the disk image contents.
///
/// Returns the path of the staged application bundle.
pub async fn stage_contents(settings: &Settings, staging: &Path) -> Result<PathBuf> {
    let staged_app = staging.join(app_bundle_name(settings));

    log::debug!("Copying .app to staging: {}", staged_app.display());
    fs::copy_dir(settings.dest_root(), &staged_app)
        .await
        .with_context(|| {
            format!(
                "copying .app bundle to staging directory: {}",
                staged_app.display()
            )
        })?;

    #[cfg(unix)]
    {
        let applications_link = staging.join("Applications");
        std::os::unix::fs::symlink("/Applications", &applications_link)
            .fs_context("creating Applications symlink", &applications_link)?;
    }

    let dmg = settings.dmg();
    if let Some(background) = &dmg.background {
        let name = background
            .file_name()
            .context("DMG background path has no file name")?;
        stage_asset(background, &staging.join(".background").join(name)).await?;
    }
    if let Some(ds_store) = &dmg.ds_store {
        stage_asset(ds_store, &staging.join(".DS_Store")).await?;
    }
    if let Some(volume_icon) = &dmg.volume_icon {
        stage_asset(volume_icon, &staging.join(".VolumeIcon.icns")).await?;
    }

    Ok(staged_app)
}

/// Copies a configured asset; a missing one is an error.
async fn stage_asset(asset: &Path, dest: &Path) -> Result<()> {
    if !asset.is_file() {
        return Err(Error::MissingSource(asset.to_path_buf()));
    }
    fs::copy_file(asset, dest).await
}

/// Runs `hdiutil create` over `staging`, writing a compressed image to `dmg_path`.
pub async fn create_dmg(settings: &Settings, staging: &Path, dmg_path: &Path) -> Result<()> {
    let volname = volume_name(settings);
    log::info!("Creating DMG volume {volname:?}...");

    let mut command = tokio::process::Command::new("hdiutil");
    command
        .args(["create", "-volname", &volname, "-srcfolder"])
        .arg(staging)
        .args(["-ov", "-format", "UDZO"])
        .arg(dmg_path);

    let output = command.output().await.map_err(|e| Error::CommandFailed {
        command: "hdiutil".to_string(),
        error: e,
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::error!("hdiutil failed: {}", stderr.trim());
        return Err(Error::ToolFailed {
            command: format!("hdiutil create -volname {volname:?} {}", dmg_path.display()),
            status: output.status,
        });
    }

    // hdiutil appends `.dmg` to output names without that extension
    let mut appended = dmg_path.as_os_str().to_owned();
    appended.push(".dmg");
    let appended = PathBuf::from(appended);
    if !dmg_path.exists() && appended.is_file() {
        tokio::fs::rename(&appended, dmg_path)
            .await
            .fs_context("renaming disk image", &appended)?;
    }

    Ok(())
}
