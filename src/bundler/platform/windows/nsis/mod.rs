//! Windows NSIS installer creation.
//!
//! # Module Organization
//!
//! - `commands` - install/uninstall directives derived from the manifest
//! - `template` - built-in NSI script template
//! - `script` - NSI script generation from the template
//! - `toolset` - makensis lookup
//! - `build` - makensis execution
//! - `utils` - path and encoding helpers

mod build;
mod commands;
mod script;
mod template;
mod toolset;
mod utils;

pub use commands::{NsisCommands, path_ancestors};
pub use script::{check_placeholders, grid_vars, render_nsi_script, version_vars};
pub use template::NSI_TEMPLATE;

use crate::bundler::{
    error::{Context, Result},
    manifest::Manifest,
    settings::Settings,
    utils::fs,
};
use std::path::PathBuf;

/// Bundle the staged tree as an NSIS installer.
///
/// # Process
///
/// 1. Derive install/uninstall directives from the manifest
/// 2. Render the installer script into the staging root
/// 3. Compile it with makensis into `<installer>.temp`
/// 4. Rename the finished installer into place
///
/// # Returns
///
/// Vector containing the path to the generated installer .exe file
pub async fn bundle_project(settings: &Settings, manifest: &Manifest) -> Result<Vec<PathBuf>> {
    log::info!("Building NSIS installer for {}", settings.product_name());

    let commands = NsisCommands::from_manifest(manifest)?;
    log::debug!(
        "{} file(s) in {} output directories",
        commands.len(),
        commands.directory_switch_count()
    );

    let output_dir = settings.artifact_dir();
    fs::create_dir_all(output_dir).await?;

    let installer_path = output_dir.join(settings.nsis_installer_name());
    let temp_path = fs::temp_path_for(&installer_path);

    let nsi_path = script::generate_nsi_script(settings, &commands, &temp_path).await?;
    let makensis = toolset::find_makensis(settings)?;

    let compiled = build::run_makensis(&makensis, &nsi_path)
        .await
        .context("compiling NSIS installer");
    if compiled.is_err() {
        fs::discard(&temp_path).await;
    }
    compiled?;
    fs::publish(&temp_path, &installer_path).await?;

    log::info!("✓ Created NSIS installer: {}", installer_path.display());

    Ok(vec![installer_path])
}
