//! Linux platform-specific settings.

/// Linux tarball configuration.
///
/// # Configuration
///
/// ```toml
/// [tarball]
/// compression_level = 9
/// ```
#[derive(Clone, Debug, serde::Deserialize)]
pub struct TarballSettings {
    /// Gzip level, 0-9.
    ///
    /// Default: 9
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,
}

fn default_compression_level() -> u32 {
    9
}

impl Default for TarballSettings {
    fn default() -> Self {
        Self {
            compression_level: default_compression_level(),
        }
    }
}
