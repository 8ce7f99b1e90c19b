//! Installer generators.
//!
//! Each generator consumes a frozen [`Manifest`](crate::bundler::Manifest)
//! or the staged tree it describes and produces one distributable artifact.
//!
//! | Layout | Package Type | Module |
//! |--------|--------------|--------|
//! | Windows | .exe (NSIS) | [`windows`] |
//! | Darwin | .dmg | [`macos`] |
//! | Linux | .tar.gz | [`linux`] |
//!
//! Script and archive generation is plain file work and runs on any host;
//! only the external compilers (`makensis`, `hdiutil`) are host-specific.

pub mod linux;
pub mod macos;
pub mod windows;

use std::fmt;

/// Installer formats produced by the bundler.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PackageType {
    /// NSIS installer (.exe).
    Nsis,

    /// macOS disk image (.dmg) holding the application bundle.
    Dmg,

    /// Gzip-compressed tarball of the staged tree.
    Tarball,
}

impl PackageType {
    /// Lowercase identifier used in CLI output.
    pub fn short_name(&self) -> &'static str {
        match self {
            PackageType::Nsis => "nsis",
            PackageType::Dmg => "dmg",
            PackageType::Tarball => "tarball",
        }
    }

    /// File extension of the produced artifact.
    pub fn extension(&self) -> &'static str {
        match self {
            PackageType::Nsis => "exe",
            PackageType::Dmg => "dmg",
            PackageType::Tarball => "tar.gz",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
