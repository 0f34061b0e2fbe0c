//! Sheetcut Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Sheetcut
//! library and command line tool. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Elements**: Sheet and element definitions ([`element`] module)
//! - **Placements**: Optimizer placements and drawable parts ([`placement`] module)
//! - **Palette**: Category display styles ([`palette`] module)
//! - **Draw**: Stroke definitions for SVG output ([`draw`] module)

pub mod color;
pub mod draw;
pub mod element;
pub mod geometry;
pub mod palette;
pub mod placement;
