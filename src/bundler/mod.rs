//! Declarative manifest engine and installer generator for viewer packaging.
//!
//! A [`Layout`] declares, through a [`ManifestBuilder`], which files of a
//! build tree go where in the staged package. The frozen [`Manifest`] then
//! drives an installer generator: NSIS script for Windows, disk image for
//! macOS, tarball for Linux.
//!
//! # Supported Formats
//!
//! | Layout | Format | External tool |
//! |--------|--------|---------------|
//! | Windows | .exe (NSIS) | makensis |
//! | Darwin | .dmg | hdiutil |
//! | Linux | .tar.gz | none |
//!
//! # Declaring files
//!
//! ```no_run
//! use kodegen_bundler_manifest::bundler::{ManifestBuilder, RecordMode, Result};
//!
//! # fn example() -> Result<()> {
//! let mut m = ManifestBuilder::new("indra/newview", "build/packaged", RecordMode::Copy);
//! m.prefix("skins", |m| {
//!     m.require("paths.xml")?;
//!     m.optional("*/xui/*/*.xml")?;
//!     Ok(())
//! })?;
//! m.require_as("licenses-linux.txt", "licenses.txt")?;
//! let manifest = m.finish()?;
//! println!("{} files staged", manifest.mappings().len());
//! # Ok(())
//! # }
//! ```
//!
//! # Running a layout
//!
//! ```no_run
//! use kodegen_bundler_manifest::bundler::{Action, Bundler, Layout, SettingsBuilder};
//!
//! # async fn example() -> kodegen_bundler_manifest::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .source_root("indra/newview")
//!     .dest_root("build/packaged")
//!     .layout(Layout::LinuxX86_64)
//!     .version("2.1.0.13828")
//!     .actions(vec![Action::Copy, Action::Package])
//!     .build()?;
//!
//! let outcome = Bundler::new(settings).bundle().await?;
//! for artifact in outcome.artifacts {
//!     println!("{} -> {:?}", artifact.package_type, artifact.paths);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod builder;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod platform;
pub mod settings;
pub mod utils;

// Public re-exports
pub use builder::{BundleOutcome, Bundler};
pub use error::{Error, Result};
pub use layout::Layout;
pub use manifest::{Inclusion, Manifest, ManifestBuilder, Mapping, RecordMode};
pub use platform::PackageType;
pub use settings::{
    Action, Arch, BuildSettings, ChannelSettings, ConfigFile, DmgSettings, NsisSettings,
    PackageSettings, RELEASE_CHANNEL, Settings, SettingsBuilder, TarballSettings,
};

/// A bundled artifact result containing metadata about a created installer.
///
/// # Fields
///
/// - `package_type`: The format of the created package (nsis, dmg, tarball)
/// - `paths`: All files created as part of this bundle
/// - `size`: Total size of the artifact files in bytes
/// - `checksum`: SHA-256 checksum of the main artifact
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// The package type that was created.
    pub package_type: PackageType,

    /// Paths to all files created as part of this bundle.
    pub paths: Vec<std::path::PathBuf>,

    /// Total size of the artifact files in bytes.
    pub size: u64,

    /// SHA-256 checksum of the main artifact for integrity verification.
    pub checksum: String,
}
