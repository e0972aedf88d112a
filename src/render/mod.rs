//! Rendering sinks for a [`crate::dashboard::Dashboard`].
//!
//! - [`html`]: full page with inline SVG, the primary output
//! - [`plot`]: chart images via plotters (`.svg` or bitmap)

pub mod html;
pub mod plot;

pub use html::render_page;
pub use plot::save_charts;
