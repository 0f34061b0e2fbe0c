//! SVG rendering of cutting layouts.
//!
//! [`SvgRenderer`] turns a [`Diagram`] (sheet + parts) into a
//! [`LiveSurface`]: an SVG document whose `viewBox` is the sheet size, the
//! way the layout is displayed before export. The document carries no
//! `width`/`height` of its own; the raster pipeline stamps those on its
//! snapshot.

use log::debug;
use svg::{self, node::Text as SvgText, node::element as svg_element};

use sheetcut_core::{
    apply_stroke,
    color::Color,
    draw::StrokeDefinition,
    element::Sheet,
    geometry::Size,
    placement::Part,
};

use super::{Error, raster::DrawableSurface};
use crate::{SheetcutError, config::StyleConfig};

/// A sheet together with the parts placed on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    sheet: Sheet,
    parts: Vec<Part>,
}

impl Diagram {
    pub fn new(sheet: Sheet, parts: Vec<Part>) -> Self {
        Self { sheet, parts }
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }
}

/// A rendered diagram, ready to be displayed or exported.
///
/// `view_box` is the declared coordinate space of the document and
/// `client_size` the pixel size it was laid out at, when known.
#[derive(Debug, Clone)]
pub struct LiveSurface {
    document: svg::Document,
    view_box: Option<Size>,
    client_size: Option<Size>,
}

impl LiveSurface {
    pub fn new(document: svg::Document, view_box: Option<Size>) -> Self {
        Self {
            document,
            view_box,
            client_size: None,
        }
    }

    /// Records the pixel size the surface is displayed at.
    pub fn with_client_size(mut self, client_size: Size) -> Self {
        self.client_size = Some(client_size);
        self
    }

    pub fn document(&self) -> &svg::Document {
        &self.document
    }
}

impl DrawableSurface for LiveSurface {
    fn view_box(&self) -> Option<Size> {
        self.view_box
    }

    fn client_size(&self) -> Option<Size> {
        self.client_size
    }

    fn snapshot(&self) -> Result<svg::Document, Error> {
        Ok(self.document.clone())
    }
}

/// Renders diagrams to SVG using a [`StyleConfig`].
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    background: Option<Color>,
    stroke: StrokeDefinition,
    show_labels: bool,
}

impl SvgRenderer {
    /// Creates a renderer from the style configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SheetcutError::Config`] if a configured color is invalid.
    pub fn from_style(style: &StyleConfig) -> Result<Self, SheetcutError> {
        let background = style.background_color().map_err(SheetcutError::Config)?;
        let stroke_color = style.stroke_color().map_err(SheetcutError::Config)?;

        Ok(Self {
            background,
            stroke: StrokeDefinition::solid(stroke_color, style.stroke_width()),
            show_labels: style.show_labels(),
        })
    }

    /// Renders the diagram into a live surface.
    pub fn render(&self, diagram: &Diagram) -> LiveSurface {
        let size = diagram.sheet().display_size();
        debug!(
            width = size.width(),
            height = size.height(),
            parts = diagram.parts().len();
            "Rendering cut diagram"
        );

        let doc = svg::Document::new().set(
            "viewBox",
            format!("0 0 {} {}", size.width(), size.height()),
        );

        let mut parts_group = svg_element::Group::new().set("class", "parts");
        for part in diagram.parts() {
            parts_group = parts_group.add(self.render_part(part));
        }

        let doc = doc.add(self.render_sheet(size)).add(parts_group);
        LiveSurface::new(doc, Some(size))
    }

    fn render_sheet(&self, size: Size) -> svg_element::Rectangle {
        let sheet = svg_element::Rectangle::new()
            .set("class", "sheet")
            .set("x", 0)
            .set("y", 0)
            .set("width", size.width())
            .set("height", size.height());

        let sheet = match &self.background {
            Some(color) => sheet.set("fill", color).set("fill-opacity", color.alpha()),
            None => sheet.set("fill", "none"),
        };

        let outline = StrokeDefinition::dashed(self.stroke.color(), self.stroke.width());
        apply_stroke!(sheet, &outline)
    }

    fn render_part(&self, part: &Part) -> svg_element::Group {
        let color = part.color();
        let rect = svg_element::Rectangle::new()
            .set("x", part.x())
            .set("y", part.y())
            .set("width", part.width())
            .set("height", part.height())
            .set("fill", &color)
            .set("fill-opacity", color.alpha());
        let rect = apply_stroke!(rect, &self.stroke);

        let group = svg_element::Group::new()
            .set("class", "part")
            .set("data-id", part.id())
            .set("data-icon", part.icon())
            .add(rect);

        if !self.show_labels {
            return group;
        }

        let center = part.bounds().center();
        // Keep labels inside small parts.
        let font_size = (part.width().min(part.height()) * 0.4).clamp(1.0, 48.0);
        let label = svg_element::Text::new("")
            .set("x", center.x())
            .set("y", center.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", "sans-serif")
            .set("font-size", font_size)
            .set("fill", "#263238")
            .add(SvgText::new(part.id().to_string()));

        group.add(label)
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            background: None,
            stroke: StrokeDefinition::solid(Color::default(), 1.0),
            show_labels: true,
        }
    }
}
