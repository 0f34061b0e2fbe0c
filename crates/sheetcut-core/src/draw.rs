//! Visual definitions shared by the SVG renderer.

mod stroke;

pub use stroke::{StrokeDefinition, StrokeStyle};
