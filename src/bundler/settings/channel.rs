//! Release channel and target grid.

/// Channel reported by release builds.
pub const RELEASE_CHANNEL: &str = "Second Life Release";

/// Release channel and login grid the package is built for.
///
/// An empty `grid` means the default (production) grid. The derived names
/// (`channel_oneword`, launch flags, installer names) live on
/// [`Settings`](super::Settings) because they also need the product name.
#[derive(Clone, Debug)]
pub struct ChannelSettings {
    /// Channel name, e.g. `Second Life Release` or `Second Life Beta Viewer`.
    pub channel: String,

    /// Channel reported at login only, for A/B testing.
    ///
    /// Kept distinct from `channel` even when equal: launch flags only carry
    /// it when it differs.
    pub login_channel: Option<String>,

    /// Target grid name; empty selects the default grid.
    pub grid: String,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            channel: RELEASE_CHANNEL.to_string(),
            login_channel: None,
            grid: String::new(),
        }
    }
}

impl ChannelSettings {
    /// True for the release channel.
    pub fn is_default_channel(&self) -> bool {
        self.channel == RELEASE_CHANNEL
    }

    /// True when no grid was requested.
    pub fn is_default_grid(&self) -> bool {
        self.grid.is_empty()
    }
}
