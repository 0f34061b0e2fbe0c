//! PNG export of a live diagram surface.
//!
//! [`RasterExporter::export`] checks its guards and prepares the source
//! image synchronously, then spawns the rest of the work on the current
//! tokio runtime and returns immediately:
//!
//! ```text
//! snapshot → annotate → serialize → object URL      (caller's task)
//!     ↓ spawn
//! decode → rasterize → revoke source → encode → save (spawned task)
//! ```
//!
//! Only failures before the spawn are returned as errors. Failures on the
//! spawned task are logged and reported by the [`ExportOutcome`] of the
//! returned handle; every object URL acquired on the way is revoked on all
//! paths.

mod host;
pub mod native;

pub use host::{Blob, ObjectUrl, RasterHost};

use std::sync::Arc;

use log::{debug, info, trace, warn};
use tokio::{runtime::Handle, task::JoinHandle};

use sheetcut_core::{geometry::Size, placement::Placement};

use super::Error;
use crate::SheetcutError;

/// Name of the saved PNG file.
pub const EXPORT_FILE_NAME: &str = "cut-layout.png";

/// Export width used when the surface declares no usable width.
pub const FALLBACK_WIDTH: f32 = 1000.0;

/// Export height used when the surface declares no usable height.
pub const FALLBACK_HEIGHT: f32 = 500.0;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const SVG_MEDIA_TYPE: &str = "image/svg+xml;charset=utf-8";
pub const PNG_MEDIA_TYPE: &str = "image/png";

/// A rendered vector surface the exporter can snapshot.
pub trait DrawableSurface {
    /// The declared coordinate space (`viewBox`) size.
    fn view_box(&self) -> Option<Size>;

    /// The size the surface is laid out at, in pixels.
    fn client_size(&self) -> Option<Size>;

    /// Returns an independent copy of the current document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Snapshot`] if the document cannot be copied.
    fn snapshot(&self) -> Result<svg::Document, Error>;
}

/// How a spawned export finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The PNG was handed to the host for saving.
    Saved,
    /// The serialized document could not be decoded as an image.
    DecodeFailed,
    /// No raster surface could be allocated.
    NoDrawingContext,
    /// Encoding the raster surface produced no data.
    EncodeFailed,
    /// The host could not save the encoded PNG.
    SaveFailed,
}

/// Resolves the export size of `surface`.
///
/// Each axis is resolved independently: the declared `viewBox` value when it
/// is positive, else the client size when positive, else the fallback.
pub fn resolve_geometry<S: DrawableSurface + ?Sized>(surface: &S) -> Size {
    let view_box = surface.view_box();
    let client = surface.client_size();

    let width = pick_dimension(
        view_box.map(Size::width),
        client.map(Size::width),
        FALLBACK_WIDTH,
    );
    let height = pick_dimension(
        view_box.map(Size::height),
        client.map(Size::height),
        FALLBACK_HEIGHT,
    );

    Size::new(width, height)
}

fn pick_dimension(declared: Option<f32>, client: Option<f32>, fallback: f32) -> f32 {
    [declared, client]
        .into_iter()
        .flatten()
        .find(|value| value.is_finite() && *value > 0.0)
        .unwrap_or(fallback)
}

/// Turns live surfaces into saved PNG files through a [`RasterHost`].
#[derive(Debug)]
pub struct RasterExporter<H: RasterHost> {
    host: Arc<H>,
}

impl<H: RasterHost> RasterExporter<H> {
    pub fn new(host: H) -> Self {
        Self {
            host: Arc::new(host),
        }
    }

    /// Creates an exporter sharing an existing host.
    pub fn with_shared_host(host: Arc<H>) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    /// Starts exporting `surface` as a PNG.
    ///
    /// Returns `Ok(None)` without doing anything when `placements` is empty
    /// or `surface` is `None`. Otherwise the source image is prepared before
    /// returning and the remaining stages run on a spawned task whose handle
    /// is returned. The handle may be dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if no tokio runtime is running, or if the surface
    /// cannot be snapshotted or serialized.
    pub fn export<S: DrawableSurface + ?Sized>(
        &self,
        placements: &[Placement],
        surface: Option<&S>,
    ) -> Result<Option<JoinHandle<ExportOutcome>>, SheetcutError> {
        if placements.is_empty() {
            debug!("Nothing to export, no placements");
            return Ok(None);
        }
        let Some(surface) = surface else {
            debug!("Nothing to export, no drawable surface");
            return Ok(None);
        };

        let runtime = Handle::try_current().map_err(|err| Error::Runtime(err.to_string()))?;

        let geometry = resolve_geometry(surface);
        debug!(
            width = geometry.width(),
            height = geometry.height(),
            placements = placements.len();
            "Starting raster export"
        );

        let snapshot = surface
            .snapshot()?
            .set("xmlns", SVG_NAMESPACE)
            .set("width", geometry.width())
            .set("height", geometry.height());

        let mut markup = Vec::new();
        svg::write(&mut markup, &snapshot).map_err(Error::Io)?;
        trace!(bytes = markup.len(); "Serialized export snapshot");

        let source = ObjectUrl::create(&self.host, Blob::new(SVG_MEDIA_TYPE, markup));
        let host = Arc::clone(&self.host);

        Ok(Some(runtime.spawn(rasterize(host, source, geometry))))
    }
}

async fn rasterize<H: RasterHost>(
    host: Arc<H>,
    source: ObjectUrl<H>,
    geometry: Size,
) -> ExportOutcome {
    let Some(image) = host.decode_image(source.url()).await else {
        warn!(url = source.url(); "Failed to decode export snapshot");
        return ExportOutcome::DecodeFailed;
    };
    trace!(url = source.url(); "Decoded export snapshot");

    let (width, height) = geometry.to_pixels();
    let Some(mut surface) = host.create_surface(width, height) else {
        warn!(width, height; "No drawing context available for export");
        return ExportOutcome::NoDrawingContext;
    };

    host.draw_image(&mut surface, &image, geometry);
    source.revoke();
    drop(image);

    let Some(png) = host.encode_png(surface).await else {
        warn!(width, height; "PNG encoding produced no data");
        return ExportOutcome::EncodeFailed;
    };

    let download = ObjectUrl::create(&host, png);
    let saved = host.save(download.url(), EXPORT_FILE_NAME);
    download.revoke();
    if let Err(err) = saved {
        warn!(file = EXPORT_FILE_NAME, err:%; "Failed to save exported PNG");
        return ExportOutcome::SaveFailed;
    }

    info!(file = EXPORT_FILE_NAME, width, height; "Exported cut layout");
    ExportOutcome::Saved
}
