//! Configuration types for Sheetcut rendering and optimization.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as the CLI's TOML configuration file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining style and optimizer settings.
//! - [`StyleConfig`] - Visual styling of the rendered diagram.
//! - [`OptimizerConfig`] - Where the remote optimizer lives.
//!
//! # Example
//!
//! ```
//! # use sheetcut::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert_eq!(config.optimizer().url(), "http://localhost:8081/furniture/cut");
//! ```

use serde::Deserialize;

use sheetcut_core::color::Color;

/// Optimizer endpoint used when none is configured.
pub const DEFAULT_OPTIMIZER_URL: &str = "http://localhost:8081/furniture/cut";

const DEFAULT_STROKE_COLOR: &str = "#37474f";
const DEFAULT_STROKE_WIDTH: f32 = 1.0;

/// Top-level configuration combining style and optimizer settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Optimizer configuration section.
    #[serde(default)]
    optimizer: OptimizerConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(style: StyleConfig, optimizer: OptimizerConfig) -> Self {
        Self { style, optimizer }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the optimizer configuration.
    pub fn optimizer(&self) -> &OptimizerConfig {
        &self.optimizer
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Colors are kept as strings and parsed on access, so a bad value is
/// reported when rendering rather than when the file is read.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Fill of the sheet rectangle, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Outline color of the sheet and the parts.
    #[serde(default)]
    stroke_color: Option<String>,

    /// Outline width in sheet units.
    #[serde(default)]
    stroke_width: Option<f32>,

    /// Whether each part is labelled with its id.
    #[serde(default)]
    show_labels: Option<bool>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// Without a background the sheet is left transparent.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the outline color.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn stroke_color(&self) -> Result<Color, String> {
        Color::new(self.stroke_color.as_deref().unwrap_or(DEFAULT_STROKE_COLOR))
            .map_err(|err| format!("Invalid stroke color in config: {err}"))
    }

    /// Returns the outline width.
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH)
    }

    /// Returns whether parts are labelled with their id.
    pub fn show_labels(&self) -> bool {
        self.show_labels.unwrap_or(true)
    }
}

/// Remote optimizer configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OptimizerConfig {
    /// Endpoint receiving the cut request.
    #[serde(default)]
    url: Option<String>,
}

impl OptimizerConfig {
    /// Creates a configuration pointing at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    /// Returns the optimizer endpoint.
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_OPTIMIZER_URL)
    }
}
