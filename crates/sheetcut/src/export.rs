//! Export functionality for cutting layouts.
//!
//! # Pipeline Position
//!
//! ```text
//! Placements + Elements
//!     ↓ layout::project
//! Parts
//!     ↓ svg::SvgRenderer (this module)
//! Live Surface
//!     ↓ raster::RasterExporter (this module)
//! Downloaded PNG
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] — renders a [`svg::Diagram`] into a [`svg::LiveSurface`]
//! - [`raster`] — converts a live surface into a saved PNG file
//!
//! # Error Handling
//!
//! Export operations return [`Error`] for failures that happen before any
//! asynchronous work starts. [`Error`] converts into
//! [`SheetcutError::Export`] at the crate boundary. Failures once the raster
//! pipeline is running are reported as an
//! [`ExportOutcome`](raster::ExportOutcome) and logged instead.
//!
//! [`SheetcutError::Export`]: crate::SheetcutError::Export

pub mod raster;
pub mod svg;

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// The live surface could not be cloned.
    Snapshot(String),
    /// No async runtime is available to run the raster pipeline on.
    Runtime(String),
    /// An I/O error encountered while serializing or writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Snapshot(msg) => write!(f, "Snapshot error: {msg}"),
            Self::Runtime(msg) => write!(f, "Runtime error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Snapshot(_) | Self::Runtime(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
