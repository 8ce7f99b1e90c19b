//! Windows platform-specific settings.

use std::path::PathBuf;

/// NSIS installer configuration.
///
/// # Configuration
///
/// ```toml
/// [nsis]
/// template = "installers/windows/installer_template.nsi"
/// makensis = "/usr/bin/makensis"
/// ```
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct NsisSettings {
    /// Handlebars NSIS template.
    ///
    /// Must reference `version_vars`, `source`, `grid_vars`, `install_files`
    /// and `delete_files` exactly once each.
    ///
    /// Default: None (built-in template)
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// Explicit makensis executable.
    ///
    /// Default: None (looked up on `PATH`)
    #[serde(default)]
    pub makensis: Option<PathBuf>,
}
