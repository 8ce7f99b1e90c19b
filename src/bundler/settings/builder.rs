//! Builder for constructing Settings.

use super::{
    Action, Arch, BuildSettings, ChannelSettings, DmgSettings, NsisSettings, PackageSettings,
    Settings, TarballSettings, package::split_version,
};
use crate::bundler::{error::Context, layout::Layout};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Values set later win, so a configuration file can be applied first and
/// command-line flags layered on top.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_manifest::bundler::{Action, Layout, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_manifest::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .source_root("indra/newview")
///     .dest_root("build/newview/packaged")
///     .layout(Layout::LinuxX86_64)
///     .actions(vec![Action::Copy, Action::Package])
///     .version("2.1.0.13828")
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`Settings`] - The built settings struct
#[derive(Default)]
pub struct SettingsBuilder {
    source_root: Option<PathBuf>,
    dest_root: Option<PathBuf>,
    artifact_dir: Option<PathBuf>,
    layout: Option<Layout>,
    product_name: Option<String>,
    version: Option<Vec<String>>,
    installer_name: Option<String>,
    channel: Option<String>,
    login_channel: Option<String>,
    grid: Option<String>,
    configuration: Option<String>,
    arch: Option<Arch>,
    actions: Option<Vec<Action>>,
    nsis: NsisSettings,
    dmg: DmgSettings,
    tarball: TarballSettings,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the source root.
    ///
    /// # Required
    pub fn source_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the staging directory.
    ///
    /// # Required
    pub fn dest_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dest_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets where installers are written.
    ///
    /// Default: parent of the staging directory
    pub fn artifact_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.artifact_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the platform layout.
    ///
    /// Default: layout of the host platform
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Sets the product name.
    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    /// Sets the version from a dotted string.
    ///
    /// # Required
    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(split_version(version));
        self
    }

    /// Sets the version from its components.
    pub fn version_components(mut self, components: Vec<String>) -> Self {
        self.version = Some(components);
        self
    }

    /// Overrides the generated installer name.
    pub fn installer_name(mut self, name: impl Into<String>) -> Self {
        self.installer_name = Some(name.into());
        self
    }

    /// Sets the channel.
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Sets the login-only channel.
    pub fn login_channel(mut self, channel: impl Into<String>) -> Self {
        self.login_channel = Some(channel.into());
        self
    }

    /// Sets the grid. Empty selects the default grid.
    pub fn grid(mut self, grid: impl Into<String>) -> Self {
        self.grid = Some(grid.into());
        self
    }

    /// Sets the build configuration name.
    pub fn configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    /// Sets the target architecture.
    pub fn arch(mut self, arch: Arch) -> Self {
        self.arch = Some(arch);
        self
    }

    /// Sets the requested actions.
    pub fn actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Sets the NSIS settings.
    pub fn nsis_settings(mut self, settings: NsisSettings) -> Self {
        self.nsis = settings;
        self
    }

    /// Sets the DMG settings.
    pub fn dmg_settings(mut self, settings: DmgSettings) -> Self {
        self.dmg = settings;
        self
    }

    /// Sets the tarball settings.
    pub fn tarball_settings(mut self, settings: TarballSettings) -> Self {
        self.tarball = settings;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `source_root`, `dest_root` or `version` is
    /// missing, or if the layout cannot be derived from the host.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let source_root = self.source_root.context("source_root is required")?;
        let dest_root = self.dest_root.context("dest_root is required")?;
        let version = self
            .version
            .filter(|v| !v.is_empty())
            .context("version is required")?;

        let artifact_dir = match self.artifact_dir {
            Some(dir) => dir,
            None => dest_root
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .context("artifact_dir is required when dest_root has no parent")?,
        };

        let mut build = BuildSettings::default();
        if let Some(configuration) = self.configuration {
            build.configuration = configuration;
        }
        if let Some(actions) = self.actions {
            build.actions = actions;
        }

        let layout = match self.layout {
            Some(layout) => layout,
            None => Layout::host(self.arch.unwrap_or(build.arch))?,
        };
        build.arch = self.arch.unwrap_or_else(|| layout.default_arch());

        let mut package = PackageSettings {
            version,
            installer_name: self.installer_name,
            ..Default::default()
        };
        if let Some(name) = self.product_name {
            package.product_name = name;
        }

        let mut channel = ChannelSettings::default();
        if let Some(name) = self.channel {
            channel.channel = name;
        }
        if let Some(grid) = self.grid {
            channel.grid = grid;
        }
        channel.login_channel = self.login_channel;

        Ok(Settings::new(
            package,
            channel,
            build,
            layout,
            source_root,
            dest_root,
            artifact_dir,
            self.nsis,
            self.dmg,
            self.tarball,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::Error;

    #[test]
    fn test_missing_version_is_rejected() {
        let err = SettingsBuilder::new()
            .source_root("/src")
            .dest_root("/stage/packaged")
            .layout(Layout::Windows)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::GenericError(ref m) if m.contains("version")));
    }

    #[test]
    fn test_artifact_dir_defaults_to_parent() {
        let settings = SettingsBuilder::new()
            .source_root("/src")
            .dest_root("/stage/packaged")
            .layout(Layout::LinuxI686)
            .version("1.0.0.1")
            .build()
            .unwrap();
        assert_eq!(settings.artifact_dir(), Path::new("/stage"));
        assert_eq!(settings.build().arch, Arch::I686);
    }

    #[test]
    fn test_later_values_win() {
        let settings = SettingsBuilder::new()
            .source_root("/src")
            .dest_root("/stage/packaged")
            .layout(Layout::Windows)
            .version("1.0.0.1")
            .grid("aditi")
            .grid("agni")
            .build()
            .unwrap();
        assert_eq!(settings.channel().grid, "agni");
    }
}
