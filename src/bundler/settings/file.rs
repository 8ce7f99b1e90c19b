//! Optional TOML configuration file.
//!
//! Every key is optional; the file only seeds a [`SettingsBuilder`] that
//! command-line flags then override. Relative paths are resolved against the
//! directory containing the file.
//!
//! ```toml
//! source = "indra/newview"
//! dest = "build/newview/packaged"
//! layout = "windows"
//!
//! [package]
//! product_name = "Second Life"
//! version = "2.1.0.13828"
//!
//! [channel]
//! channel = "Second Life Beta Viewer"
//! grid = "agni"
//!
//! [build]
//! configuration = "Release"
//! actions = ["copy", "package"]
//! ```

use super::{
    Action, Arch, DmgSettings, NsisSettings, SettingsBuilder, TarballSettings,
};
use crate::bundler::{
    error::{ErrorExt, Result},
    layout::Layout,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Parsed configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Source root.
    #[serde(default)]
    pub source: Option<PathBuf>,
    /// Staging directory.
    #[serde(default)]
    pub dest: Option<PathBuf>,
    /// Installer output directory.
    #[serde(default)]
    pub artifacts: Option<PathBuf>,
    /// Platform layout name.
    #[serde(default)]
    pub layout: Option<String>,
    /// `[package]` table.
    #[serde(default)]
    pub package: PackageSection,
    /// `[channel]` table.
    #[serde(default)]
    pub channel: ChannelSection,
    /// `[build]` table.
    #[serde(default)]
    pub build: BuildSection,
    /// `[nsis]` table.
    #[serde(default)]
    pub nsis: NsisSettings,
    /// `[dmg]` table.
    #[serde(default)]
    pub dmg: DmgSettings,
    /// `[tarball]` table.
    #[serde(default)]
    pub tarball: Option<TarballSettings>,
}

/// `[package]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    /// Product name.
    pub product_name: Option<String>,
    /// Dotted version.
    pub version: Option<String>,
    /// Installer name override.
    pub installer_name: Option<String>,
}

/// `[channel]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelSection {
    /// Channel name.
    pub channel: Option<String>,
    /// Login-only channel.
    pub login_channel: Option<String>,
    /// Grid name.
    pub grid: Option<String>,
}

/// `[build]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    /// Build configuration name.
    pub configuration: Option<String>,
    /// Target architecture.
    pub arch: Option<Arch>,
    /// Requested actions.
    pub actions: Option<Vec<Action>>,
}

impl ConfigFile {
    /// Reads and parses `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).fs_context("reading configuration file", path)?;
        let mut config: ConfigFile = toml::from_str(&text)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Seeds a builder with every value present in the file.
    pub fn into_builder(self) -> Result<SettingsBuilder> {
        let mut builder = SettingsBuilder::new()
            .nsis_settings(self.nsis)
            .dmg_settings(self.dmg);

        if let Some(tarball) = self.tarball {
            builder = builder.tarball_settings(tarball);
        }
        if let Some(source) = self.source {
            builder = builder.source_root(source);
        }
        if let Some(dest) = self.dest {
            builder = builder.dest_root(dest);
        }
        if let Some(artifacts) = self.artifacts {
            builder = builder.artifact_dir(artifacts);
        }
        if let Some(layout) = self.layout {
            builder = builder.layout(layout.parse::<Layout>()?);
        }

        let package = self.package;
        if let Some(name) = package.product_name {
            builder = builder.product_name(name);
        }
        if let Some(version) = package.version {
            builder = builder.version(&version);
        }
        if let Some(name) = package.installer_name {
            builder = builder.installer_name(name);
        }

        let channel = self.channel;
        if let Some(name) = channel.channel {
            builder = builder.channel(name);
        }
        if let Some(name) = channel.login_channel {
            builder = builder.login_channel(name);
        }
        if let Some(grid) = channel.grid {
            builder = builder.grid(grid);
        }

        let build = self.build;
        if let Some(configuration) = build.configuration {
            builder = builder.configuration(configuration);
        }
        if let Some(arch) = build.arch {
            builder = builder.arch(arch);
        }
        if let Some(actions) = build.actions {
            builder = builder.actions(actions);
        }

        Ok(builder)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut Option<PathBuf>| {
            if let Some(path) = p
                && path.is_relative()
            {
                *path = base.join(&*path);
            }
        };
        resolve(&mut self.source);
        resolve(&mut self.dest);
        resolve(&mut self.artifacts);
        resolve(&mut self.nsis.template);
        resolve(&mut self.dmg.background);
        resolve(&mut self.dmg.ds_store);
        resolve(&mut self.dmg.volume_icon);
    }
}
