//! Two-sector pie geometry for the audit ratio (received vs. given).
//!
//! Angles are in degrees with 0° pointing up and growing clockwise. The first sector starts
//! at 0°, the second starts where the first ends, so together they tile the circle.

use crate::error::{GeometryError, GeometryResult};
use crate::geometry::path::{PathCommand, Point};
use serde::{Deserialize, Serialize};

/// Two complementary shares of one whole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieTotals {
    pub received: f64,
    pub given: f64,
}

impl PieTotals {
    pub fn new(received: f64, given: f64) -> GeometryResult<Self> {
        for (name, value) in [("received total", received), ("given total", given)] {
            if !value.is_finite() || value < 0.0 {
                return Err(GeometryError::InvalidQuantity { name, value });
            }
        }
        Ok(Self { received, given })
    }
}

/// Which share a sector represents; decides its fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectorKind {
    Received,
    Given,
}

impl SectorKind {
    pub fn fill(self) -> &'static str {
        match self {
            SectorKind::Received => "#4caf50",
            SectorKind::Given => "#800080",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub kind: SectorKind,
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    /// Sweep in degrees, `0..=360`.
    pub angle: f64,
    pub large_arc: bool,
    pub start: Point,
    pub end: Point,
    pub commands: Vec<PathCommand>,
}

impl Sector {
    pub fn svg_path(&self) -> String {
        crate::geometry::path::to_svg_path(&self.commands)
    }

    pub fn fill(&self) -> &'static str {
        self.kind.fill()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlicer {
    pub center: Point,
    pub radius: f64,
}

impl PieSlicer {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Slice `totals` into `[received, given]` sectors.
    pub fn slice(&self, totals: PieTotals) -> GeometryResult<[Sector; 2]> {
        let (mut received, mut given) = (totals.received, totals.given);
        if !(received + given).is_finite() {
            // Both totals are finite, so halving them brings the sum back in range.
            received /= 2.0;
            given /= 2.0;
        }
        let sum = received + given;
        if sum <= 0.0 {
            return Err(GeometryError::ZeroTotal);
        }
        let angle_a = 360.0 * (received / sum);
        // Remainder, not an independent ratio: the two sweeps add up to exactly 360.
        let angle_b = 360.0 - angle_a;
        Ok([
            self.sector(SectorKind::Received, 0.0, angle_a),
            self.sector(SectorKind::Given, angle_a, angle_b),
        ])
    }

    fn sector(&self, kind: SectorKind, start_angle: f64, angle: f64) -> Sector {
        let (c, r) = (self.center, self.radius);
        let start = point_on_circle(c, r, start_angle);
        let end = point_on_circle(c, r, start_angle + angle);
        let large_arc = angle > 180.0;

        let mut commands = vec![PathCommand::MoveTo(c), PathCommand::LineTo(start)];
        if angle >= 360.0 {
            // Start and end coincide; a single arc would collapse, so go via the opposite point.
            let opposite = point_on_circle(c, r, start_angle + 180.0);
            for to in [opposite, start] {
                commands.push(PathCommand::ArcTo {
                    radius: r,
                    large_arc: false,
                    sweep: true,
                    to,
                });
            }
        } else {
            commands.push(PathCommand::ArcTo {
                radius: r,
                large_arc,
                sweep: true,
                to: end,
            });
        }
        commands.push(PathCommand::Close);

        Sector {
            kind,
            center: c,
            radius: r,
            start_angle,
            angle,
            large_arc,
            start,
            end,
            commands,
        }
    }
}

/// Point at `degrees` on the circle, 0° = up, clockwise on screen.
pub fn point_on_circle(center: Point, radius: f64, degrees: f64) -> Point {
    let rad = (degrees - 90.0).to_radians();
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}
