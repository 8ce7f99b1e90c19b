//! Command line argument parsing and validation.
//!
//! Flags are layered over an optional configuration file: anything given on
//! the command line wins.

use crate::bundler::{Action, Arch, ConfigFile, Layout, SettingsBuilder};
use clap::Parser;
use std::path::PathBuf;

/// Stage a viewer build and package it as a platform installer
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_manifest",
    about = "Stage a viewer build and package it as a platform installer",
    long_about = "Copies the files a platform layout declares from the build tree into a
staging directory, then optionally packages the staged tree as an NSIS
installer (windows), a disk image (darwin) or a tarball (linux).

Usage:
  kodegen_bundler_manifest --source-dir indra/newview --dest-dir build/packaged --version 2.1.0.13828
  kodegen_bundler_manifest --config bundle.toml --actions copy,package
  kodegen_bundler_manifest --config bundle.toml --list

Exit code 0 = every requested action completed."
)]
pub struct Args {
    /// Source tree the layout paths are relative to
    #[arg(long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Staging directory that receives the package tree
    #[arg(long, value_name = "DIR")]
    pub dest_dir: Option<PathBuf>,

    /// Directory for generated installers (default: parent of --dest-dir)
    #[arg(long, value_name = "DIR")]
    pub artifact_dir: Option<PathBuf>,

    /// Platform layout: windows, darwin, linux-i686, linux-x86_64
    #[arg(long, value_name = "LAYOUT")]
    pub layout: Option<String>,

    /// Target architecture: i686, x86_64, universal
    #[arg(long, value_name = "ARCH")]
    pub arch: Option<String>,

    /// Build configuration whose outputs are staged (e.g. Release, Debug)
    #[arg(long, value_name = "NAME")]
    pub configuration: Option<String>,

    /// Actions to perform: copy, package
    #[arg(long, value_name = "ACTION", value_delimiter = ',')]
    pub actions: Vec<String>,

    /// Viewer version as dotted components
    #[arg(long, value_name = "A.B.C.D")]
    pub version: Option<String>,

    /// Release channel name
    #[arg(long, value_name = "NAME")]
    pub channel: Option<String>,

    /// Channel reported at login, when it differs from --channel
    #[arg(long, value_name = "NAME")]
    pub login_channel: Option<String>,

    /// Grid the viewer connects to (empty for the default grid)
    #[arg(long, value_name = "GRID")]
    pub grid: Option<String>,

    /// Override the generated installer file name
    #[arg(long, value_name = "FILE")]
    pub installer_name: Option<String>,

    /// Product name used in installer and bundle names
    #[arg(long, value_name = "NAME")]
    pub product_name: Option<String>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the resolved file mapping list as JSON without copying
    #[arg(long)]
    pub list: bool,

    /// Resolve every declared file without copying or packaging
    #[arg(long)]
    pub dry_run: bool,

    /// Show per-step detail
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.config.is_none() {
            if self.source_dir.is_none() {
                return Err("--source-dir is required without --config".to_string());
            }
            if self.dest_dir.is_none() {
                return Err("--dest-dir is required without --config".to_string());
            }
            if self.version.is_none() {
                return Err("--version is required without --config".to_string());
            }
        }

        if let Some(version) = &self.version
            && version.split('.').any(str::is_empty)
        {
            return Err(format!("Invalid version: {version:?}"));
        }

        if let Some(layout) = &self.layout {
            layout.parse::<Layout>().map_err(|e| e.to_string())?;
        }
        if let Some(arch) = &self.arch {
            arch.parse::<Arch>().map_err(|e| e.to_string())?;
        }
        for action in &self.actions {
            action.parse::<Action>().map_err(|e| e.to_string())?;
        }

        if (self.dry_run || self.list) && self.actions.iter().any(|a| a == "package") {
            return Err("--dry-run and --list cannot be combined with the package action".into());
        }

        Ok(())
    }

    /// True when nothing should be written.
    pub fn declare_only(&self) -> bool {
        self.dry_run || self.list
    }

    /// Builder seeded from the configuration file, then the flags.
    pub fn settings_builder(&self) -> crate::bundler::Result<SettingsBuilder> {
        let mut builder = match &self.config {
            Some(path) => ConfigFile::load(path)?.into_builder()?,
            None => SettingsBuilder::new(),
        };

        if let Some(dir) = &self.source_dir {
            builder = builder.source_root(dir);
        }
        if let Some(dir) = &self.dest_dir {
            builder = builder.dest_root(dir);
        }
        if let Some(dir) = &self.artifact_dir {
            builder = builder.artifact_dir(dir);
        }
        if let Some(layout) = &self.layout {
            builder = builder.layout(layout.parse()?);
        }
        if let Some(arch) = &self.arch {
            builder = builder.arch(arch.parse()?);
        }
        if let Some(configuration) = &self.configuration {
            builder = builder.configuration(configuration.clone());
        }
        if !self.actions.is_empty() {
            let actions = self
                .actions
                .iter()
                .map(|a| a.parse())
                .collect::<crate::bundler::Result<Vec<Action>>>()?;
            builder = builder.actions(actions);
        }
        if let Some(version) = &self.version {
            builder = builder.version(version);
        }
        if let Some(channel) = &self.channel {
            builder = builder.channel(channel.clone());
        }
        if let Some(channel) = &self.login_channel {
            builder = builder.login_channel(channel.clone());
        }
        if let Some(grid) = &self.grid {
            builder = builder.grid(grid.clone());
        }
        if let Some(name) = &self.installer_name {
            builder = builder.installer_name(name.clone());
        }
        if let Some(name) = &self.product_name {
            builder = builder.product_name(name.clone());
        }

        Ok(builder)
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        // --list output is data; status lines would corrupt it
        let output = super::OutputManager::new(args.verbose, args.quiet || args.list);
        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("kodegen_bundler_manifest").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_required_without_config() {
        let args = parse(&["--source-dir", "src", "--dest-dir", "out/packaged"]);
        assert!(args.validate().unwrap_err().contains("--version"));
    }

    #[test]
    fn test_actions_split_on_commas() {
        let args = parse(&[
            "--source-dir",
            "src",
            "--dest-dir",
            "out/packaged",
            "--version",
            "1.2.3.4",
            "--actions",
            "copy,package",
        ]);
        args.validate().unwrap();
        assert_eq!(args.actions, vec!["copy", "package"]);
    }

    #[test]
    fn test_dry_run_cannot_package() {
        let args = parse(&[
            "--config",
            "bundle.toml",
            "--dry-run",
            "--actions",
            "package",
        ]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_unknown_layout_rejected() {
        let args = parse(&["--config", "bundle.toml", "--layout", "beos"]);
        assert!(args.validate().unwrap_err().contains("beos"));
    }

    #[test]
    fn test_flags_build_settings() {
        let args = parse(&[
            "--source-dir",
            "/build/indra/newview",
            "--dest-dir",
            "/build/packaged",
            "--layout",
            "linux-i686",
            "--version",
            "2.1.0.13828",
            "--grid",
            "agni",
        ]);
        let settings = args.settings_builder().unwrap().build().unwrap();
        assert_eq!(settings.layout(), Layout::LinuxI686);
        assert_eq!(settings.build().arch, Arch::I686);
        assert_eq!(settings.channel().grid, "agni");
        assert_eq!(settings.artifact_dir(), std::path::Path::new("/build"));
    }
}
