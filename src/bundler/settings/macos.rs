//! macOS platform-specific settings.

use std::path::PathBuf;

/// macOS DMG disk image configuration.
///
/// Every configured asset must exist; a missing one fails the run rather
/// than producing an unstyled image.
///
/// # Configuration
///
/// ```toml
/// [dmg]
/// background = "installers/darwin/background.jpg"
/// ds_store = "installers/darwin/release-dmg/_DS_Store"
/// volume_icon = "installers/darwin/release-dmg/_VolumeIcon.icns"
/// ```
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct DmgSettings {
    /// Window background, staged as `.background/<file name>`.
    ///
    /// Default: None (plain background)
    #[serde(default)]
    pub background: Option<PathBuf>,

    /// Finder layout, staged as `.DS_Store`.
    ///
    /// Default: None
    #[serde(default)]
    pub ds_store: Option<PathBuf>,

    /// Volume icon, staged as `.VolumeIcon.icns`.
    ///
    /// Default: None
    #[serde(default)]
    pub volume_icon: Option<PathBuf>,

    /// Mounted volume name.
    ///
    /// Default: None (product name and version)
    #[serde(default)]
    pub volume_name: Option<String>,
}
