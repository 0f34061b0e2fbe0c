//! Sheetcut - Rendering and export of sheet cutting layouts.
//!
//! Projects the placements returned by a cutting optimizer onto colored
//! parts, renders them as an SVG diagram of the sheet, and exports that
//! diagram as a PNG file.

pub mod config;
pub mod export;
pub mod layout;
pub mod optimizer;
pub mod session;

mod error;

pub use sheetcut_core::{color, element, geometry, palette, placement};

pub use error::SheetcutError;

use log::{debug, info};
use tokio::task::JoinHandle;

use config::AppConfig;
use export::{
    raster::{ExportOutcome, RasterExporter, RasterHost},
    svg::{Diagram, LiveSurface, SvgRenderer},
};

/// Builder for rendering and exporting cutting layouts.
///
/// # Examples
///
/// ```rust,no_run
/// use sheetcut::{LayoutBuilder, config::AppConfig, session::CutSession};
///
/// let mut session = CutSession::new();
/// session.add_element();
///
/// let builder = LayoutBuilder::new(AppConfig::default());
/// let svg = builder
///     .render_svg(&session.diagram())
///     .expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Render a diagram into a live surface.
    ///
    /// # Errors
    ///
    /// Returns [`SheetcutError::Config`] if the style configuration holds an
    /// invalid color.
    pub fn render(&self, diagram: &Diagram) -> Result<LiveSurface, SheetcutError> {
        let renderer = SvgRenderer::from_style(self.config.style())?;
        let surface = renderer.render(diagram);
        debug!(parts = diagram.parts().len(); "Diagram rendered");
        Ok(surface)
    }

    /// Render a diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`SheetcutError::Config`] for invalid style colors.
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, SheetcutError> {
        let surface = self.render(diagram)?;
        info!("SVG rendered successfully");
        Ok(surface.document().to_string())
    }

    /// Render a diagram and start exporting it as a PNG through `exporter`.
    ///
    /// Nothing is rendered or exported when `placements` is empty. See
    /// [`RasterExporter::export`].
    ///
    /// # Errors
    ///
    /// Returns an error for invalid style colors and for the fatal export
    /// failures of [`RasterExporter::export`].
    pub fn export_png<H: RasterHost>(
        &self,
        diagram: &Diagram,
        placements: &[placement::Placement],
        exporter: &RasterExporter<H>,
    ) -> Result<Option<JoinHandle<ExportOutcome>>, SheetcutError> {
        if placements.is_empty() {
            debug!("Nothing to export, no placements");
            return Ok(None);
        }
        let surface = self.render(diagram)?;
        exporter.export(placements, Some(&surface))
    }
}
