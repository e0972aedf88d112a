//! Drawing primitives shared by the chart geometry: points, segments and SVG path data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in screen coordinates (origin top-left, y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A straight segment, used for axis lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// One command of a vector path, mirroring the SVG path-data grammar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic Bézier with two control points and an end point.
    CubicTo { c1: Point, c2: Point, to: Point },
    /// Circular arc (rx == ry == radius, no axis rotation).
    ArcTo {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PathCommand::MoveTo(p) => write!(f, "M {} {}", p.x, p.y),
            PathCommand::LineTo(p) => write!(f, "L {} {}", p.x, p.y),
            PathCommand::CubicTo { c1, c2, to } => write!(
                f,
                "C {} {}, {} {}, {} {}",
                c1.x, c1.y, c2.x, c2.y, to.x, to.y
            ),
            PathCommand::ArcTo {
                radius,
                large_arc,
                sweep,
                to,
            } => write!(
                f,
                "A {r} {r} 0 {} {} {} {}",
                u8::from(large_arc),
                u8::from(sweep),
                to.x,
                to.y,
                r = radius
            ),
            PathCommand::Close => f.write_str("Z"),
        }
    }
}

/// Join commands into a single SVG `d` attribute value.
pub fn to_svg_path(commands: &[PathCommand]) -> String {
    commands
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Point on a cubic Bézier at parameter `t` in `[0, 1]`.
pub fn cubic_point(p0: Point, c1: Point, c2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    Point::new(
        a * p0.x + b * c1.x + c * c2.x + d * p3.x,
        a * p0.y + b * c1.y + c * c2.y + d * p3.y,
    )
}
