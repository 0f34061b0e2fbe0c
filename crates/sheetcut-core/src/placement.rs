//! Optimizer placements and the drawable parts derived from them.

use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    element::ElementId,
    geometry::{Bounds, Point, Size},
    palette,
};

/// The optimizer's chosen position for an element on the sheet.
///
/// `id` refers back to an [`ElementSpec`](crate::element::ElementSpec). It
/// may be missing, or stale when the element was removed after the
/// optimizer ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<ElementId>,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Placement {
    pub fn new(id: impl Into<Option<ElementId>>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
        }
    }

    pub fn id(&self) -> Option<ElementId> {
        self.id
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn bounds(&self) -> Bounds {
        self.position().to_bounds(self.size())
    }
}

/// A placement enriched with its display color and icon.
///
/// Parts are a pure view: they are recomputed from the current placements
/// and elements whenever they are needed and have no storage of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    id: u64,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    color: Color,
    icon: &'static str,
}

impl Part {
    /// Creates a part with the icon of uncategorized elements.
    pub fn new(id: u64, x: f32, y: f32, width: f32, height: f32, color: Color) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            color,
            icon: palette::DEFAULT_STYLE.icon(),
        }
    }

    pub fn with_icon(mut self, icon: &'static str) -> Self {
        self.icon = icon;
        self
    }

    /// Returns the display id: the element id of the placement, or its
    /// zero-based index when the placement carried no id.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the Material icon name of the part's category.
    pub fn icon(&self) -> &'static str {
        self.icon
    }

    pub fn bounds(&self) -> Bounds {
        Point::new(self.x, self.y).to_bounds(Size::new(self.width, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_deserialize_without_id() {
        #[derive(Deserialize)]
        struct Wrapper {
            placements: Vec<Placement>,
        }

        let wrapper: Wrapper = toml::from_str(
            r#"
            [[placements]]
            id = 1
            x = 0
            y = 0
            width = 500
            height = 300

            [[placements]]
            x = 500
            y = 0
            width = 400
            height = 200
            "#,
        )
        .unwrap();

        assert_eq!(wrapper.placements.len(), 2);
        assert_eq!(wrapper.placements[0].id(), Some(ElementId::new(1)));
        assert_eq!(wrapper.placements[1].id(), None);
        assert_eq!(wrapper.placements[1].position(), Point::new(500.0, 0.0));
    }

    #[test]
    fn test_part_bounds() {
        let part = Part::new(1, 10.0, 20.0, 200.0, 100.0, Color::default());
        let bounds = part.bounds();
        assert_eq!(bounds.center(), Point::new(110.0, 70.0));
        assert_eq!(bounds.to_size(), Size::new(200.0, 100.0));
    }

    #[test]
    fn test_part_icon() {
        let part = Part::new(1, 0.0, 0.0, 1.0, 1.0, Color::default());
        assert_eq!(part.icon(), "crop_square");
        assert_eq!(part.with_icon("door_front").icon(), "door_front");
    }
}
