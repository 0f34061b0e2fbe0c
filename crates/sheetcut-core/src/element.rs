//! Sheet and element definitions.
//!
//! An [`ElementSpec`] is a piece the user wants cut out of a [`Sheet`]. Both
//! are user-owned and editable; the optimizer only ever sees a snapshot of
//! them (see `sheetcut::optimizer::CutRequest`).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point, Size};

/// Identifier of an [`ElementSpec`].
///
/// Ids are assigned by the owner of the element list and are never reused
/// after an element is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(u64);

impl ElementId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for ElementId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Furniture category of an element.
///
/// The category only affects presentation (fill color and icon); the
/// optimizer never receives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Door,
    Leg,
    Shelf,
    Panel,
    Accessory,
}

impl Category {
    /// All categories, in presentation order.
    pub const ALL: [Category; 5] = [
        Self::Door,
        Self::Leg,
        Self::Shelf,
        Self::Panel,
        Self::Accessory,
    ];

    /// Returns the lowercase name used in job files and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Door => "door",
            Self::Leg => "leg",
            Self::Shelf => "shelf",
            Self::Panel => "panel",
            Self::Accessory => "accessory",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "invalid category `{s}`, valid values: door, leg, shelf, panel, accessory"
                )
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects one of the two dimensions of a sheet or element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

/// A user-defined piece to be cut from the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    id: ElementId,
    width: f32,
    height: f32,
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
}

impl ElementSpec {
    pub fn new(id: ElementId, width: f32, height: f32) -> Self {
        Self {
            id,
            width,
            height,
            category: None,
        }
    }

    /// Returns this element with the given category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the category, or `None` when it was never set.
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn dimension(&self, dimension: Dimension) -> f32 {
        match dimension {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }

    pub fn set_dimension(&mut self, dimension: Dimension, value: f32) {
        match dimension {
            Dimension::Width => self.width = value,
            Dimension::Height => self.height = value,
        }
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
    }
}

/// The rectangular stock material being cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    width: f32,
    height: f32,
}

impl Sheet {
    /// Default sheet width in sheet units.
    pub const DEFAULT_WIDTH: f32 = 2000.0;
    /// Default sheet height in sheet units.
    pub const DEFAULT_HEIGHT: f32 = 1000.0;

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the sheet area, anchored at the origin.
    pub fn bounds(&self) -> Bounds {
        Point::default().to_bounds(self.size())
    }

    /// Returns true if `bounds` lies entirely on the sheet.
    ///
    /// ```
    /// # use sheetcut_core::element::Sheet;
    /// # use sheetcut_core::geometry::{Point, Size};
    /// let sheet = Sheet::new(2000.0, 1000.0);
    /// assert!(sheet.fits(Point::new(1800.0, 0.0).to_bounds(Size::new(200.0, 100.0))));
    /// assert!(!sheet.fits(Point::new(1900.0, 0.0).to_bounds(Size::new(200.0, 100.0))));
    /// ```
    pub fn fits(&self, bounds: Bounds) -> bool {
        self.bounds().contains(&bounds)
    }

    /// Returns the size used as the diagram coordinate space.
    ///
    /// A dimension that is not a positive number is replaced by 1 so the
    /// diagram always has a usable `viewBox`.
    ///
    /// ```
    /// # use sheetcut_core::element::Sheet;
    /// # use sheetcut_core::geometry::Size;
    /// assert_eq!(Sheet::new(0.0, 1500.0).display_size(), Size::new(1.0, 1500.0));
    /// ```
    pub fn display_size(&self) -> Size {
        fn or_one(value: f32) -> f32 {
            if value.is_finite() && value > 0.0 { value } else { 1.0 }
        }

        Size::new(or_one(self.width), or_one(self.height))
    }

    pub fn dimension(&self, dimension: Dimension) -> f32 {
        match dimension {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }

    pub fn set_dimension(&mut self, dimension: Dimension, value: f32) {
        match dimension {
            Dimension::Width => self.width = value,
            Dimension::Height => self.height = value,
        }
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()), Ok(category));
        }

        let err = Category::from_str("drawer").unwrap_err();
        assert!(err.contains("invalid category `drawer`"));
    }

    #[test]
    fn test_element_spec_deserialize_accepts_type_alias() {
        #[derive(Deserialize)]
        struct Wrapper {
            element: ElementSpec,
        }

        let wrapper: Wrapper = toml::from_str(
            r#"
            [element]
            id = 3
            width = 200
            height = 100.5
            type = "shelf"
            "#,
        )
        .unwrap();

        assert_eq!(wrapper.element.id(), ElementId::new(3));
        assert_eq!(wrapper.element.size(), Size::new(200.0, 100.5));
        assert_eq!(wrapper.element.category(), Some(Category::Shelf));
    }

    #[test]
    fn test_element_spec_category_defaults_to_unset() {
        #[derive(Deserialize)]
        struct Wrapper {
            element: ElementSpec,
        }

        let wrapper: Wrapper = toml::from_str("[element]\nid = 1\nwidth = 10\nheight = 20\n").unwrap();
        assert_eq!(wrapper.element.category(), None);
    }

    #[test]
    fn test_element_spec_dimensions() {
        let mut element = ElementSpec::new(ElementId::new(1), 100.0, 50.0);
        element.set_dimension(Dimension::Width, 101.0);
        element.set_category(Some(Category::Leg));

        assert_eq!(element.dimension(Dimension::Width), 101.0);
        assert_eq!(element.dimension(Dimension::Height), 50.0);
        assert_eq!(element.category(), Some(Category::Leg));
    }

    #[test]
    fn test_sheet_defaults_and_display_size() {
        let sheet = Sheet::default();
        assert_eq!(sheet.size(), Size::new(2000.0, 1000.0));
        assert_eq!(sheet.display_size(), sheet.size());

        let broken = Sheet::new(-5.0, f32::NAN);
        assert_eq!(broken.display_size(), Size::new(1.0, 1.0));
    }

    #[test]
    fn test_sheet_fits_bounds() {
        let sheet = Sheet::new(2000.0, 1000.0);

        assert!(sheet.fits(sheet.bounds()));
        assert!(sheet.fits(Point::new(10.0, 20.0).to_bounds(Size::new(200.0, 100.0))));
        assert!(!sheet.fits(Point::new(-1.0, 0.0).to_bounds(Size::new(10.0, 10.0))));
        assert!(!sheet.fits(Point::new(0.0, 950.0).to_bounds(Size::new(10.0, 100.0))));
    }
}
