//! Category display styles.
//!
//! Every [`Category`] maps to a [`CategoryStyle`] holding its fill color and
//! icon name. The table is total: categories without an entry, and elements
//! with no category at all, share [`DEFAULT_STYLE`]. `panel` has no entry of
//! its own.

use crate::{color::Color, element::Category};

/// Fill color and icon name for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    fill: &'static str,
    icon: &'static str,
}

impl CategoryStyle {
    const fn new(fill: &'static str, icon: &'static str) -> Self {
        Self { fill, icon }
    }

    /// Returns the fill as a `#rrggbb` string.
    pub fn fill_hex(&self) -> &'static str {
        self.fill
    }

    /// Returns the fill as a [`Color`].
    pub fn fill(&self) -> Color {
        Color::new(self.fill).expect("palette entries are valid hex colors")
    }

    /// Returns the Material icon name for the category.
    pub fn icon(&self) -> &'static str {
        self.icon
    }
}

/// Style for `panel` and for elements without a category.
pub const DEFAULT_STYLE: CategoryStyle = CategoryStyle::new("#b0bec5", "crop_square");

static CATEGORY_STYLES: [(Category, CategoryStyle); 4] = [
    (Category::Door, CategoryStyle::new("#90caf9", "door_front")),
    (Category::Leg, CategoryStyle::new("#a5d6a7", "construction")),
    (Category::Shelf, CategoryStyle::new("#ffe082", "auto_awesome_mosaic")),
    (Category::Accessory, CategoryStyle::new("#ce93d8", "extension")),
];

/// Looks up the style for an optional category.
///
/// # Examples
///
/// ```
/// use sheetcut_core::{element::Category, palette};
///
/// assert_eq!(palette::style_for(Some(Category::Door)).fill_hex(), "#90caf9");
/// assert_eq!(palette::style_for(Some(Category::Panel)).fill_hex(), "#b0bec5");
/// assert_eq!(palette::style_for(None).icon(), "crop_square");
/// ```
pub fn style_for(category: Option<Category>) -> &'static CategoryStyle {
    category
        .and_then(|category| {
            CATEGORY_STYLES
                .iter()
                .find(|(entry, _)| *entry == category)
                .map(|(_, style)| style)
        })
        .unwrap_or(&DEFAULT_STYLE)
}
