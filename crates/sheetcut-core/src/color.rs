//! Color handling for Sheetcut layouts
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Part fills are specified as hex strings, so the
//! wrapper can also report itself back in `#rrggbb` form.

use std::str::FromStr;

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use sheetcut_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the color as a lowercase `#rrggbb` string in sRGB.
    ///
    /// The alpha component is dropped; use [`Color::alpha`] to read it.
    ///
    /// # Examples
    ///
    /// ```
    /// use sheetcut_core::color::Color;
    ///
    /// let door = Color::new("#90CAF9").unwrap();
    /// assert_eq!(door.to_hex(), "#90caf9");
    ///
    /// let black = Color::new("black").unwrap();
    /// assert_eq!(black.to_hex(), "#000000");
    /// ```
    pub fn to_hex(self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }

    /// Returns the alpha component, between 0.0 (transparent) and 1.0 (opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_hex())
    }
}
