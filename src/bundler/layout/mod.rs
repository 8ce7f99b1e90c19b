//! Platform layouts.
//!
//! A [`Layout`] declares which files of a viewer build go where in the
//! staged package. Each variant drives a [`ManifestBuilder`] through nested
//! scopes; the shared resource block lives in `common`.

mod common;
mod darwin;
#[cfg(test)]
pub(crate) mod fixtures;
mod linux;
mod windows;

use crate::bundler::{
    error::{Error, Result},
    manifest::ManifestBuilder,
    platform::PackageType,
    settings::{Arch, Settings},
};
use std::{fmt, str::FromStr};

/// Closed set of platform layouts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Layout {
    /// Windows directory tree, packaged as an NSIS installer.
    Windows,
    /// macOS application bundle, packaged as a disk image.
    Darwin,
    /// 32-bit Linux tree, packaged as a tarball.
    LinuxI686,
    /// 64-bit Linux tree, packaged as a tarball.
    LinuxX86_64,
}

impl Layout {
    /// Layout matching the host operating system.
    pub fn host(arch: Arch) -> Result<Self> {
        if cfg!(target_os = "windows") {
            Ok(Layout::Windows)
        } else if cfg!(target_os = "macos") {
            Ok(Layout::Darwin)
        } else if cfg!(target_os = "linux") {
            Ok(match arch {
                Arch::I686 => Layout::LinuxI686,
                Arch::X86_64 | Arch::Universal => Layout::LinuxX86_64,
            })
        } else {
            Err(Error::GenericError(format!(
                "no layout for host platform {}",
                std::env::consts::OS
            )))
        }
    }

    /// Architecture a layout packages unless one is configured.
    pub fn default_arch(self) -> Arch {
        match self {
            Layout::Windows | Layout::LinuxI686 => Arch::I686,
            Layout::Darwin => Arch::Universal,
            Layout::LinuxX86_64 => Arch::X86_64,
        }
    }

    /// Installer format produced for this layout.
    pub fn package_type(self) -> PackageType {
        match self {
            Layout::Windows => PackageType::Nsis,
            Layout::Darwin => PackageType::Dmg,
            Layout::LinuxI686 | Layout::LinuxX86_64 => PackageType::Tarball,
        }
    }

    /// Declares every file of the package on `m`.
    pub fn construct(self, m: &mut ManifestBuilder, settings: &Settings) -> Result<()> {
        log::info!("Constructing {self} manifest");
        match self {
            Layout::Windows => windows::construct(m, settings),
            Layout::Darwin => darwin::construct(m, settings),
            Layout::LinuxI686 => {
                linux::construct(m, settings)?;
                linux::construct_i686(m)
            }
            Layout::LinuxX86_64 => {
                linux::construct(m, settings)?;
                linux::construct_x86_64(m)
            }
        }
    }

    /// Staged scripts that must be executable, relative to the staging root.
    pub fn executable_scripts(self) -> &'static [&'static str] {
        match self {
            Layout::Windows => &[],
            Layout::Darwin => darwin::EXECUTABLE_SCRIPTS,
            Layout::LinuxI686 | Layout::LinuxX86_64 => linux::EXECUTABLE_SCRIPTS,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Layout::Windows => "windows",
            Layout::Darwin => "darwin",
            Layout::LinuxI686 => "linux-i686",
            Layout::LinuxX86_64 => "linux-x86_64",
        })
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win32" => Ok(Layout::Windows),
            "darwin" | "macos" | "mac" => Ok(Layout::Darwin),
            "linux-i686" | "linux32" => Ok(Layout::LinuxI686),
            "linux-x86_64" | "linux64" | "linux" => Ok(Layout::LinuxX86_64),
            other => Err(Error::GenericError(format!(
                "unknown layout {other:?} (expected windows, darwin, linux-i686 or linux-x86_64)"
            ))),
        }
    }
}
