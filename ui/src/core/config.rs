//! Static dashboard configuration: service address, theme tokens and panel toggles.

use serde::{Deserialize, Serialize};

/// Hosted clean-room API.
pub const DEFAULT_BASE_URL: &str = "https://audience-cleanroom.onrender.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Root CSS class selecting the token set in `main.css`.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Dark => "theme-dark",
            Self::Light => "theme-light",
        }
    }
}

/// Chart colors. Everything else is styled through the theme stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub dataset_a: String,
    pub dataset_b: String,
    pub overlap: String,
    pub trend: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            dataset_a: "#3b82f6".into(),
            dataset_b: "#10b981".into(),
            overlap: "#f59e0b".into(),
            trend: "#60a5fa".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Offer the bar/trend chart toggle.
    pub chart_panel: bool,
    /// Offer the "What does this mean?" toggle.
    pub info_panel: bool,
    /// Warn that the hosted backend may need time to wake up.
    pub wake_notice: bool,
    /// Link to the raw `/segment` endpoint.
    pub api_link: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            chart_panel: true,
            info_panel: true,
            wake_notice: true,
            api_link: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub base_url: String,
    pub theme: Theme,
    pub palette: Palette,
    pub features: FeatureFlags,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            theme: Theme::default(),
            palette: Palette::default(),
            features: FeatureFlags::default(),
        }
    }
}

impl DashboardConfig {
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Absolute URL of a service endpoint such as `/segment`.
    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
