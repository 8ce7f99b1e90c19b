//! Build configuration and requested actions.

use super::Arch;
use crate::bundler::error::{Error, Result};
use std::{fmt, str::FromStr};

/// What a run is asked to do.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Stage files into the destination tree.
    Copy,
    /// Stage files and produce the installer artifact.
    Package,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Copy => "copy",
            Action::Package => "package",
        })
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "copy" => Ok(Action::Copy),
            "package" => Ok(Action::Package),
            other => Err(Error::GenericError(format!(
                "unknown action {other:?} (expected copy or package)"
            ))),
        }
    }
}

/// Build configuration the staged files come from.
#[derive(Clone, Debug)]
pub struct BuildSettings {
    /// Configuration directory name, e.g. `Release` or `Debug`.
    pub configuration: String,
    /// Target architecture.
    pub arch: Arch,
    /// Requested actions.
    pub actions: Vec<Action>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            configuration: "Release".to_string(),
            arch: Arch::host(),
            actions: vec![Action::Copy],
        }
    }
}

impl BuildSettings {
    /// Some files are only staged when building an installer.
    pub fn is_packaging(&self) -> bool {
        self.actions.contains(&Action::Package)
    }

    /// Debug builds pick the debug variants of runtime libraries.
    pub fn is_debug(&self) -> bool {
        self.configuration.eq_ignore_ascii_case("debug")
    }
}
