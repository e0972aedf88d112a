//! Time-series projection: samples → scaled points, a smoothed curve, markers and axes.
//!
//! X maps `[min(t), max(t)]` onto `[padding, width - padding]`; Y maps
//! `[min(amount), max(amount)]` onto `[height - padding, padding]` so larger amounts draw
//! higher. A flat axis (zero range) collapses onto the start of its screen range instead of
//! dividing by zero.

use crate::error::{GeometryError, GeometryResult};
use crate::geometry::path::{PathCommand, Point, Segment};
use crate::geometry::PlotArea;
use crate::models::Series;
use serde::{Deserialize, Serialize};

/// Horizontal placement of samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum XPlacement {
    /// Sort by timestamp, then scale timestamps linearly.
    #[default]
    Time,
    /// Sort by timestamp, then space points evenly by rank.
    Index,
}

/// Vertical placement of samples.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum YPlacement {
    /// Scale amounts linearly (larger is higher).
    #[default]
    Scaled,
    /// Draw every point at the given screen y.
    Fixed(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectionConfig {
    pub x: XPlacement,
    pub y: YPlacement,
}

/// A projected point with its hover label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub amount: f64,
}

impl Marker {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLines {
    pub x_axis: Segment,
    pub y_axis: Segment,
}

/// Renderable description of the line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPath {
    pub commands: Vec<PathCommand>,
    pub markers: Vec<Marker>,
    pub axes: AxisLines,
}

impl ProjectedPath {
    /// The curve as an SVG `d` attribute value.
    pub fn svg_path(&self) -> String {
        crate::geometry::path::to_svg_path(&self.commands)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesProjector {
    area: PlotArea,
    config: ProjectionConfig,
}

impl SeriesProjector {
    pub fn new(area: PlotArea) -> Self {
        Self::with_config(area, ProjectionConfig::default())
    }

    pub fn with_config(area: PlotArea, config: ProjectionConfig) -> Self {
        Self { area, config }
    }

    pub fn area(&self) -> PlotArea {
        self.area
    }

    pub fn project(&self, series: &Series) -> GeometryResult<ProjectedPath> {
        if series.is_empty() {
            return Err(GeometryError::EmptySeries);
        }
        if let Some(bad) = series
            .samples()
            .iter()
            .find(|s| !s.amount.is_finite() || s.amount < 0.0)
        {
            return Err(GeometryError::InvalidQuantity {
                name: "sample amount",
                value: bad.amount,
            });
        }

        // Stable: samples sharing a timestamp keep their input order.
        let mut samples: Vec<_> = series.samples().iter().collect();
        samples.sort_by_key(|s| s.timestamp);

        let a = self.area;
        let (left, right) = (a.padding, a.width - a.padding);
        let (bottom, top) = (a.height - a.padding, a.padding);

        let xs: Vec<f64> = match self.config.x {
            XPlacement::Time => {
                let times: Vec<f64> = samples
                    .iter()
                    .map(|s| s.timestamp.timestamp_millis() as f64)
                    .collect();
                scale_all(&times, left, right)
            }
            XPlacement::Index => {
                let ranks: Vec<f64> = (0..samples.len()).map(|i| i as f64).collect();
                scale_all(&ranks, left, right)
            }
        };
        let ys: Vec<f64> = match self.config.y {
            YPlacement::Scaled => {
                let amounts: Vec<f64> = samples.iter().map(|s| s.amount).collect();
                scale_all(&amounts, bottom, top)
            }
            YPlacement::Fixed(y) => vec![y; samples.len()],
        };

        let markers: Vec<Marker> = samples
            .iter()
            .zip(xs.iter().zip(ys.iter()))
            .map(|(s, (&x, &y))| Marker {
                x,
                y,
                label: s.label.clone(),
                amount: s.amount,
            })
            .collect();

        Ok(ProjectedPath {
            commands: smooth_curve(&markers),
            markers,
            axes: AxisLines {
                x_axis: Segment {
                    from: Point::new(left, bottom),
                    to: Point::new(right, bottom),
                },
                y_axis: Segment {
                    from: Point::new(left, top),
                    to: Point::new(left, bottom),
                },
            },
        })
    }
}

/// Linearly map `values` from their own `[min, max]` onto `[from, to]`.
/// A zero range maps everything to `from`.
fn scale_all(values: &[f64], from: f64, to: f64) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    values
        .iter()
        .map(|&v| {
            if range > 0.0 {
                from + (v - min) / range * (to - from)
            } else {
                from
            }
        })
        .collect()
}

/// Move to the first point, then one cubic per consecutive pair with both control points on
/// the horizontal midpoint, each holding its own endpoint's y (flat tangents at every node).
fn smooth_curve(markers: &[Marker]) -> Vec<PathCommand> {
    let Some(first) = markers.first() else {
        return Vec::new();
    };
    let mut cmds = Vec::with_capacity(markers.len());
    cmds.push(PathCommand::MoveTo(first.point()));
    for pair in markers.windows(2) {
        let (prev, cur) = (pair[0].point(), pair[1].point());
        let mid_x = prev.x + (cur.x - prev.x) / 2.0;
        cmds.push(PathCommand::CubicTo {
            c1: Point::new(mid_x, prev.y),
            c2: Point::new(mid_x, cur.y),
            to: cur,
        });
    }
    cmds
}
