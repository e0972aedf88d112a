//! Pure chart geometry: everything here turns prepared data into drawing primitives and
//! never performs I/O.
//!
//! - [`series`]: XP-over-time line chart
//! - [`pie`]: two-sector audit pie
//! - [`bars`]: per-project bar layout
//! - [`path`]: shared primitives and SVG path data

pub mod bars;
pub mod path;
pub mod pie;
pub mod series;

pub use bars::{Bar, BarInput, BarSeriesLayout, BarWidth};
pub use path::{PathCommand, Point, Segment};
pub use pie::{PieSlicer, PieTotals, Sector, SectorKind};
pub use series::{
    AxisLines, Marker, ProjectedPath, ProjectionConfig, SeriesProjector, XPlacement, YPlacement,
};

use crate::error::{GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};

/// Fixed drawing bounds with uniform padding on every side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl PlotArea {
    /// Requires `2 * padding < width` and `2 * padding < height`.
    pub fn new(width: f64, height: f64, padding: f64) -> GeometryResult<Self> {
        let valid = [width, height, padding].iter().all(|v| v.is_finite())
            && padding >= 0.0
            && padding * 2.0 < width
            && padding * 2.0 < height;
        if !valid {
            return Err(GeometryError::InvalidPlotArea {
                width,
                height,
                padding,
            });
        }
        Ok(Self {
            width,
            height,
            padding,
        })
    }
}
