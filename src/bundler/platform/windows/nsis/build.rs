//! NSIS installer build execution.
//!
//! Compiles the generated script into the installer executable.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::Path;

/// Run makensis on `nsi_path`.
///
/// The script's `OutFile` decides where the installer lands; a non-zero
/// exit is [`Error::ToolFailed`].
pub async fn run_makensis(makensis: &Path, nsi_path: &Path) -> Result<()> {
    log::info!("Running makensis on {}", nsi_path.display());

    if let Some(parent) = nsi_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating installer script directory", parent)?;
    }

    let status = tokio::process::Command::new(makensis)
        .args(["-V3", "-INPUTCHARSET", "UTF8"])
        .arg(nsi_path)
        .status()
        .await
        .map_err(|e| Error::CommandFailed {
            command: makensis.display().to_string(),
            error: e,
        })?;

    if !status.success() {
        return Err(Error::ToolFailed {
            command: format!("{} {}", makensis.display(), nsi_path.display()),
            status,
        });
    }

    Ok(())
}
