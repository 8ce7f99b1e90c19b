//! Configuration structures for packaging runs.
//!
//! This module provides the configuration types for a packaging run:
//! package metadata, channel and grid, build configuration, per-platform
//! installer settings, the optional TOML configuration file, and the builder
//! that combines them.

mod arch;
mod build;
mod builder;
mod channel;
mod core;
mod file;
mod linux;
mod macos;
mod package;
mod windows;

// Re-export all public types
pub use arch::Arch;
pub use build::{Action, BuildSettings};
pub use builder::SettingsBuilder;
pub use channel::{ChannelSettings, RELEASE_CHANNEL};
pub use core::Settings;
pub use file::ConfigFile;
pub use linux::TarballSettings;
pub use macos::DmgSettings;
pub use package::{DEFAULT_PRODUCT_NAME, PackageSettings, split_version};
pub use windows::NsisSettings;
