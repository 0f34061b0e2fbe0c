//! Stroke definitions for sheet and part outlines.
//!
//! [`StrokeDefinition`] bundles color, width and dash style. The
//! [`apply_stroke!`](crate::apply_stroke!) macro writes all of them onto an
//! SVG element in one step.
//!
//! ```
//! use sheetcut_core::color::Color;
//! use sheetcut_core::draw::StrokeDefinition;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::solid(Color::new("#37474f").unwrap(), 1.0);
//! let rect = svg_element::Rectangle::new()
//!     .set("x", 0)
//!     .set("y", 0);
//!
//! let rect = sheetcut_core::apply_stroke!(rect, &stroke);
//! ```
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#000000"`, `0.5` |
//! | `width` | `stroke-width` | `2.0` |
//! | `style` | `stroke-dasharray` | `"5,5"` |

use crate::color::Color;

/// Dash pattern of a stroke.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashed line with equal dash and gap lengths (5px dash, 5px gap)
    Dashed,
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
        }
    }
}

/// A stroke definition for rendering outlines.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color and width.
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Creates a dashed stroke with the given color and width.
    pub fn dashed(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Dashed,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets color, opacity and width, plus the dash pattern for non-solid styles.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_hex())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(stroke.style(), StrokeStyle::Solid);
    }

    #[test]
    fn test_stroke_constructors() {
        let color = Color::new("red").unwrap();

        let solid = StrokeDefinition::solid(color, 2.0);
        assert_eq!(solid.width(), 2.0);
        assert_eq!(solid.style(), StrokeStyle::Solid);

        let dashed = StrokeDefinition::dashed(color, 1.5);
        assert_eq!(dashed.style(), StrokeStyle::Dashed);
    }

    #[test]
    fn test_stroke_style_dasharray() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(), None);
        assert_eq!(StrokeStyle::Dashed.to_svg_value(), Some("5,5"));
    }

    #[test]
    fn test_apply_stroke_sets_attributes() {
        use svg::node::element as svg_element;

        let stroke = StrokeDefinition::dashed(Color::new("#37474f").unwrap(), 2.0);
        let rect = crate::apply_stroke!(svg_element::Rectangle::new(), &stroke);
        let rendered = rect.to_string();

        assert!(rendered.contains(r##"stroke="#37474f""##));
        assert!(rendered.contains(r#"stroke-width="2""#));
        assert!(rendered.contains(r#"stroke-dasharray="5,5""#));
    }
}
