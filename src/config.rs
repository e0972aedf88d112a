//! Dashboard settings: endpoint, chart dimensions and record filtering.

use crate::geometry::{
    BarSeriesLayout, PieSlicer, PlotArea, Point, ProjectionConfig, SeriesProjector,
};
use anyhow::{Context, Result};
use regex::Regex;

pub const DEFAULT_ENDPOINT: &str = "https://01.kood.tech/api/graphql-engine/v1/graphql";

/// Paths matching this are left out of the XP charts (piscine exercises).
pub const DEFAULT_EXCLUDE: &str = "piscine-(go|js)";

pub const LINE_WIDTH: f64 = 400.0;
pub const LINE_HEIGHT: f64 = 200.0;
pub const LINE_PADDING: f64 = 20.0;
pub const PIE_SIZE: f64 = 200.0;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub endpoint: String,
    pub line_area: PlotArea,
    pub projection: ProjectionConfig,
    /// Side length of the square pie canvas; the pie fills it.
    pub pie_size: f64,
    pub bars: BarSeriesLayout,
    pub exclude: Regex,
}

impl DashboardConfig {
    /// Defaults with a custom exclusion pattern.
    pub fn with_exclude(pattern: &str) -> Result<Self> {
        let exclude =
            Regex::new(pattern).with_context(|| format!("invalid exclude pattern {pattern:?}"))?;
        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            line_area: PlotArea {
                width: LINE_WIDTH,
                height: LINE_HEIGHT,
                padding: LINE_PADDING,
            },
            projection: ProjectionConfig::default(),
            pie_size: PIE_SIZE,
            bars: BarSeriesLayout::default(),
            exclude,
        })
    }

    pub fn projector(&self) -> SeriesProjector {
        SeriesProjector::with_config(self.line_area, self.projection)
    }

    pub fn slicer(&self) -> PieSlicer {
        let half = self.pie_size / 2.0;
        PieSlicer::new(Point::new(half, half), half)
    }

    /// Whether records under `path` are charted.
    pub fn includes(&self, path: &str) -> bool {
        !self.exclude.is_match(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pattern_skips_piscines() {
        let cfg = DashboardConfig::with_exclude(DEFAULT_EXCLUDE).unwrap();
        assert!(!cfg.includes("/johvi/div-01/piscine-js/quest-01"));
        assert!(!cfg.includes("/johvi/piscine-go/go-reloaded"));
        assert!(cfg.includes("/johvi/div-01/graphql"));
        assert_eq!(cfg.slicer().center, Point::new(100.0, 100.0));
        assert_eq!(cfg.slicer().radius, 100.0);
    }

    #[test]
    fn bad_pattern_is_an_error() {
        assert!(DashboardConfig::with_exclude("piscine-(").is_err());
    }
}
