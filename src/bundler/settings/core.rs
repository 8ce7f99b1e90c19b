//! Core Settings struct and implementations.

use super::{BuildSettings, ChannelSettings, DmgSettings, NsisSettings, PackageSettings, TarballSettings};
use crate::bundler::layout::Layout;
use std::path::{Path, PathBuf};

/// Helper URI handed to viewers pointed at a non-default grid.
const HELPER_URI_FORMAT: &str = "http://preview-{grid}.secondlife.com/helpers/";

/// Main settings for a packaging run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Besides the
/// raw configuration it derives the channel/grid names, launch flags and
/// installer names the layouts and generators share.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_manifest::bundler::{Layout, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_manifest::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .source_root("indra/newview")
///     .dest_root("build/newview/packaged")
///     .layout(Layout::Windows)
///     .version("2.1.0.13828")
///     .channel("Second Life Beta Viewer")
///     .build()?;
/// assert_eq!(settings.channel_oneword(), "BetaViewer");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    package: PackageSettings,
    channel: ChannelSettings,
    build: BuildSettings,
    layout: Layout,
    source_root: PathBuf,
    dest_root: PathBuf,
    artifact_dir: PathBuf,
    nsis: NsisSettings,
    dmg: DmgSettings,
    tarball: TarballSettings,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the package metadata.
    pub fn package(&self) -> &PackageSettings {
        &self.package
    }

    /// Returns the channel configuration.
    pub fn channel(&self) -> &ChannelSettings {
        &self.channel
    }

    /// Returns the build configuration.
    pub fn build(&self) -> &BuildSettings {
        &self.build
    }

    /// Platform layout driving manifest construction.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Root the layout's source patterns are resolved against.
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Staging directory mappings are copied into.
    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    /// Directory receiving the finished installer.
    pub fn artifact_dir(&self) -> &Path {
        &self.artifact_dir
    }

    /// Returns the NSIS settings.
    pub fn nsis(&self) -> &NsisSettings {
        &self.nsis
    }

    /// Returns the DMG settings.
    pub fn dmg(&self) -> &DmgSettings {
        &self.dmg
    }

    /// Returns the tarball settings.
    pub fn tarball(&self) -> &TarballSettings {
        &self.tarball
    }

    /// Channel name without the product name: `Beta Viewer`.
    pub fn channel_unique(&self) -> String {
        self.channel
            .channel
            .replace(self.product_name(), "")
            .trim()
            .to_string()
    }

    /// [`channel_unique`](Self::channel_unique) without whitespace: `BetaViewer`.
    pub fn channel_oneword(&self) -> String {
        self.channel_unique().split_whitespace().collect()
    }

    /// Lowercase [`channel_oneword`](Self::channel_oneword): `betaviewer`.
    pub fn channel_lowerword(&self) -> String {
        self.channel_oneword().to_lowercase()
    }

    /// Command-line flags pointing the viewer at its channel and grid.
    ///
    /// Empty for a release viewer on the default grid.
    pub fn flags_list(&self) -> String {
        let channel = &self.channel;

        let grid_flags = if channel.is_default_grid() {
            String::new()
        } else {
            format!(
                "--grid {} --helperuri {}",
                channel.grid,
                HELPER_URI_FORMAT.replace("{grid}", &channel.grid)
            )
        };

        let channel_flags = match channel.login_channel.as_deref() {
            Some(login) if login != channel.channel => format!("--channel \"{login}\""),
            _ if !channel.is_default_channel() => format!("--channel \"{}\"", channel.channel),
            _ => String::new(),
        };

        let setting_flags = if channel.is_default_channel() && channel.is_default_grid() {
            String::new()
        } else if channel.is_default_grid() {
            format!("--settings settings_{}.xml", self.channel_lowerword())
        } else {
            format!(
                "--settings settings_{}_{}.xml",
                channel.grid,
                self.channel_lowerword()
            )
        };

        [channel_flags, grid_flags, setting_flags]
            .join(" ")
            .trim()
            .to_string()
    }

    /// Name of the installed Windows executable.
    pub fn final_exe(&self) -> String {
        let channel = &self.channel;
        if channel.is_default_channel() {
            if channel.is_default_grid() {
                format!("{}.exe", self.package.product_oneword())
            } else {
                format!("{}Preview.exe", self.package.product_oneword())
            }
        } else {
            format!("{}.exe", channel.channel.split_whitespace().collect::<String>())
        }
    }

    /// Common stem of generated installer names.
    ///
    /// `Second_Life_2-1-0-13828`, with `_(AGNI)` for a non-default grid or
    /// `_BetaViewer` for a non-release channel.
    pub fn installer_stem(&self) -> String {
        let base = format!(
            "{}_{}",
            self.package.product_underscored(),
            self.package.version_dashes()
        );
        let channel = &self.channel;
        if !channel.is_default_channel() {
            format!("{base}_{}", self.channel_oneword())
        } else if !channel.is_default_grid() {
            format!("{base}_({})", channel.grid.to_uppercase())
        } else {
            base
        }
    }

    /// File name of the NSIS installer.
    pub fn nsis_installer_name(&self) -> String {
        self.package
            .installer_name
            .clone()
            .unwrap_or_else(|| format!("{}_Setup.exe", self.installer_stem()))
    }

    /// File name of the disk image.
    pub fn dmg_name(&self) -> String {
        self.package
            .installer_name
            .clone()
            .unwrap_or_else(|| format!("{}.dmg", self.installer_stem()))
    }

    /// Top-level directory of the Linux tarball.
    pub fn tarball_root_name(&self) -> String {
        self.package.installer_name.clone().unwrap_or_else(|| {
            format!(
                "{}-{}-{}",
                self.package.product_oneword(),
                self.package.version_dots(),
                self.build.arch.linux_suffix()
            )
        })
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        package: PackageSettings,
        channel: ChannelSettings,
        build: BuildSettings,
        layout: Layout,
        source_root: PathBuf,
        dest_root: PathBuf,
        artifact_dir: PathBuf,
        nsis: NsisSettings,
        dmg: DmgSettings,
        tarball: TarballSettings,
    ) -> Self {
        Self {
            package,
            channel,
            build,
            layout,
            source_root,
            dest_root,
            artifact_dir,
            nsis,
            dmg,
            tarball,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::bundler::{Layout, SettingsBuilder};

    fn settings(channel: &str, grid: &str, login: Option<&str>) -> super::Settings {
        let mut builder = SettingsBuilder::new()
            .source_root("/src")
            .dest_root("/stage/packaged")
            .layout(Layout::Windows)
            .version("2.1.0.13828")
            .channel(channel)
            .grid(grid);
        if let Some(login) = login {
            builder = builder.login_channel(login);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_release_viewer_has_no_flags() {
        let s = settings("Second Life Release", "", None);
        assert_eq!(s.flags_list(), "");
        assert_eq!(s.final_exe(), "SecondLife.exe");
        assert_eq!(s.nsis_installer_name(), "Second_Life_2-1-0-13828_Setup.exe");
    }

    #[test]
    fn test_beta_grid_flags() {
        let s = settings("Second Life Release", "agni", None);
        assert_eq!(
            s.flags_list(),
            "--grid agni --helperuri http://preview-agni.secondlife.com/helpers/ \
             --settings settings_agni_release.xml"
        );
        assert_eq!(s.final_exe(), "SecondLifePreview.exe");
        assert_eq!(s.nsis_installer_name(), "Second_Life_2-1-0-13828_(AGNI)_Setup.exe");
    }

    #[test]
    fn test_channel_names() {
        let s = settings("Second Life Beta Viewer", "", None);
        assert_eq!(s.channel_unique(), "Beta Viewer");
        assert_eq!(s.channel_oneword(), "BetaViewer");
        assert_eq!(s.channel_lowerword(), "betaviewer");
        assert_eq!(s.final_exe(), "SecondLifeBetaViewer.exe");
        assert_eq!(
            s.flags_list(),
            "--channel \"Second Life Beta Viewer\"  --settings settings_betaviewer.xml"
        );
        assert_eq!(s.nsis_installer_name(), "Second_Life_2-1-0-13828_BetaViewer_Setup.exe");
    }

    #[test]
    fn test_login_channel_overrides_channel_flag() {
        let s = settings("Second Life Release", "", Some("Second Life Test A"));
        assert_eq!(s.flags_list(), "--channel \"Second Life Test A\"");
    }

    #[test]
    fn test_installer_name_override() {
        let s = SettingsBuilder::new()
            .source_root("/src")
            .dest_root("/stage/packaged")
            .layout(Layout::LinuxX86_64)
            .version("1.2.3.4")
            .installer_name("custom")
            .build()
            .unwrap();
        assert_eq!(s.nsis_installer_name(), "custom");
        assert_eq!(s.tarball_root_name(), "custom");
    }
}
