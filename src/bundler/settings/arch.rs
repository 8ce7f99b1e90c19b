//! CPU architecture types and utilities.

use crate::bundler::error::{Error, Result};
use std::{fmt, str::FromStr};

/// CPU architecture of the packaged viewer.
///
/// Selects the Linux library set and the tarball name suffix. The
/// Windows and macOS layouts package a single architecture.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_manifest::bundler::Arch;
///
/// let arch: Arch = "x86_64".parse()?;
/// assert_eq!(arch.linux_suffix(), "Linux64");
/// # Ok::<(), kodegen_bundler_manifest::bundler::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    /// 32-bit Intel (`i686`)
    #[serde(alias = "x86")]
    I686,
    /// 64-bit Intel/AMD (`x86_64`)
    #[default]
    #[serde(alias = "amd64")]
    X86_64,
    /// macOS universal binary
    Universal,
}

impl Arch {
    /// Architecture of the machine running the bundler.
    pub fn host() -> Self {
        match std::env::consts::ARCH {
            "x86" => Arch::I686,
            _ if cfg!(target_os = "macos") => Arch::Universal,
            _ => Arch::X86_64,
        }
    }

    /// Platform suffix used in Linux tarball names.
    pub fn linux_suffix(self) -> &'static str {
        match self {
            Arch::I686 => "Linux32",
            Arch::X86_64 | Arch::Universal => "Linux64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Arch::I686 => "i686",
            Arch::X86_64 => "x86_64",
            Arch::Universal => "universal",
        };
        f.write_str(name)
    }
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "i686" | "i386" | "x86" => Ok(Arch::I686),
            "x86_64" | "amd64" | "x64" => Ok(Arch::X86_64),
            "universal" => Ok(Arch::Universal),
            other => Err(Error::ArchError(other.to_string())),
        }
    }
}
