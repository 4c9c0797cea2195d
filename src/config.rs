//! Configuration for accessibility checking.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Minimum font size (in pixels) considered readable.
pub const DEFAULT_MIN_FONT_SIZE: u32 = 16;

/// Width and height of a page in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageDimensions {
    /// Page width in pixels
    pub width: f64,
    /// Page height in pixels
    pub height: f64,
}

impl Default for PageDimensions {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

/// Checker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerConfig {
    /// Text smaller than this (in pixels) is reported by the text size checker.
    pub min_font_size: u32,

    /// Color assumed for text runs that carry no color mark.
    pub default_text_color: String,

    /// Font weight assumed for text runs that carry no weight mark.
    pub default_font_weight: String,

    /// Page size used when the host does not supply one for a page.
    pub default_page_dimensions: PageDimensions,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckerConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            min_font_size: DEFAULT_MIN_FONT_SIZE,
            default_text_color: "#000000".to_string(),
            default_font_weight: "normal".to_string(),
            default_page_dimensions: PageDimensions::default(),
        }
    }

    /// Set the minimum readable font size.
    pub fn with_min_font_size(mut self, size: u32) -> Self {
        self.min_font_size = size;
        self
    }

    /// Set the fallback text color.
    pub fn with_default_text_color(mut self, color: impl Into<String>) -> Self {
        self.default_text_color = color.into();
        self
    }

    /// Set the fallback font weight.
    pub fn with_default_font_weight(mut self, weight: impl Into<String>) -> Self {
        self.default_font_weight = weight.into();
        self
    }

    /// Set the fallback page size.
    pub fn with_default_page_dimensions(mut self, dimensions: PageDimensions) -> Self {
        self.default_page_dimensions = dimensions;
        self
    }

    /// Parse configuration from JSON. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
