//! NSIS compiler lookup.
//!
//! Uses the configured `makensis`, then the Unicode NSIS install under the
//! Windows program directories, then `PATH`.

use crate::bundler::{
    error::{Error, Result},
    settings::Settings,
};
use std::path::PathBuf;

/// Program-directory variables checked for `NSIS\Unicode\makensis.exe`.
const PROGRAM_DIR_VARS: &[&str] = &["ProgramFiles", "ProgramFiles(x86)"];

/// Locate the makensis executable.
pub fn find_makensis(settings: &Settings) -> Result<PathBuf> {
    if let Some(configured) = &settings.nsis().makensis {
        if configured.is_file() {
            return Ok(configured.clone());
        }
        return Err(Error::GenericError(format!(
            "configured makensis {} does not exist",
            configured.display()
        )));
    }

    for var in PROGRAM_DIR_VARS {
        if let Some(dir) = std::env::var_os(var) {
            let candidate = PathBuf::from(dir).join("NSIS").join("Unicode").join("makensis.exe");
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    which::which("makensis").map_err(|_| {
        Error::GenericError(
            "makensis not found. Please install NSIS (e.g., apt-get install nsis)".into(),
        )
    })
}
