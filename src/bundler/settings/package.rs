//! Package metadata and configuration.

/// Product name used when none is configured.
pub const DEFAULT_PRODUCT_NAME: &str = "Second Life";

/// Package metadata.
///
/// The version arrives already split into its dotted components; nothing
/// here parses or validates version numbers.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_manifest::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     product_name: "Second Life".into(),
///     version: vec!["2".into(), "1".into(), "0".into(), "13828".into()],
///     installer_name: None,
/// };
/// assert_eq!(settings.version_dashes(), "2-1-0-13828");
/// ```
#[derive(Debug, Clone)]
pub struct PackageSettings {
    /// Product name shown in installer captions and shortcuts.
    pub product_name: String,

    /// Version components, most significant first.
    pub version: Vec<String>,

    /// Overrides the generated installer file name.
    ///
    /// Default: None (derived from product, version, channel and grid)
    pub installer_name: Option<String>,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            version: Vec::new(),
            installer_name: None,
        }
    }
}

impl PackageSettings {
    /// `2.1.0.13828`
    pub fn version_dots(&self) -> String {
        self.version.join(".")
    }

    /// Every component but the last: `2.1.0`
    pub fn version_short(&self) -> String {
        let keep = self.version.len().saturating_sub(1);
        self.version[..keep].join(".")
    }

    /// `2-1-0-13828`
    pub fn version_dashes(&self) -> String {
        self.version.join("-")
    }

    /// Product name with whitespace removed: `SecondLife`.
    pub fn product_oneword(&self) -> String {
        self.product_name.split_whitespace().collect()
    }

    /// Product name with whitespace replaced by underscores: `Second_Life`.
    pub fn product_underscored(&self) -> String {
        self.product_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// Splits a dotted version string into components.
pub fn split_version(version: &str) -> Vec<String> {
    version
        .split('.')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(version: &str) -> PackageSettings {
        PackageSettings {
            version: split_version(version),
            ..Default::default()
        }
    }

    #[test]
    fn test_version_forms() {
        let p = package("2.1.0.13828");
        assert_eq!(p.version_dots(), "2.1.0.13828");
        assert_eq!(p.version_short(), "2.1.0");
        assert_eq!(p.version_dashes(), "2-1-0-13828");
    }

    #[test]
    fn test_version_short_of_empty() {
        assert_eq!(package("").version_short(), "");
    }

    #[test]
    fn test_product_name_forms() {
        let p = package("1.0");
        assert_eq!(p.product_oneword(), "SecondLife");
        assert_eq!(p.product_underscored(), "Second_Life");
    }
}
