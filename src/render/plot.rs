//! Chart images through plotters: pie, line chart and bars side by side, as **SVG** or **PNG**.
//!
//! Plotters has no Bézier or arc primitive, so curves are flattened to polylines and sectors
//! to polygons before drawing. The images carry geometry only; labels live in the HTML page.

use crate::dashboard::Dashboard;
use crate::geometry::path::{PathCommand, Point, cubic_point};
use crate::geometry::pie::point_on_circle;
use crate::geometry::{Bar, ProjectedPath, Sector, SectorKind};
use anyhow::{Result, anyhow, bail};
use log::info;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;

/// Segments per cubic when flattening the XP curve.
const CURVE_STEPS: usize = 16;
/// Maximum degrees per polygon edge when flattening a sector arc.
const ARC_STEP_DEG: f64 = 2.0;

const LINE_BLUE: RGBColor = RGBColor(0, 0, 255);
const BAR_BLUE: RGBColor = RGBColor(74, 144, 217);

/// Write the three charts to `out_path` (`.svg` → SVG, anything else → bitmap).
pub fn save_charts<P: AsRef<Path>>(d: &Dashboard, out_path: P, width: u32, height: u32) -> Result<()> {
    if width < 30 || height < 30 {
        bail!("chart image too small: {width}x{height}");
    }
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_dashboard(root, d)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_dashboard(root, d)?;
    }
    info!("wrote charts to {}", out_path.display());
    Ok(())
}

/// Helper that draws to any Plotters backend.
fn draw_dashboard<DB>(root: DrawingArea<DB, Shift>, d: &Dashboard) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let panels = root.margin(10, 10, 10, 10).split_evenly((1, 3));

    if let Some(sectors) = &d.audit_pie {
        let size = d.config.pie_size;
        let fit = Fit::new(&panels[0], size, size);
        draw_pie(&panels[0], &fit, sectors)?;
    }
    if let Some(chart) = &d.xp_chart {
        let area = d.config.line_area;
        let fit = Fit::new(&panels[1], area.width, area.height);
        draw_line_chart(&panels[1], &fit, chart)?;
    }
    draw_bars(&panels[2], &d.bars)?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Uniform scale + centering of a `width`×`height` geometry box into a panel.
struct Fit {
    scale: f64,
    dx: f64,
    dy: f64,
}

impl Fit {
    fn new<DB: DrawingBackend>(panel: &DrawingArea<DB, Shift>, width: f64, height: f64) -> Self {
        let (pw, ph) = panel.dim_in_pixel();
        let (pw, ph) = (pw as f64, ph as f64);
        let scale = (pw / width).min(ph / height);
        Self {
            scale,
            dx: (pw - width * scale) / 2.0,
            dy: (ph - height * scale) / 2.0,
        }
    }

    fn px(&self, p: Point) -> (i32, i32) {
        (
            (self.dx + p.x * self.scale).round() as i32,
            (self.dy + p.y * self.scale).round() as i32,
        )
    }
}

fn sector_color(kind: SectorKind) -> RGBColor {
    match kind {
        SectorKind::Received => RGBColor(0x4c, 0xaf, 0x50),
        SectorKind::Given => RGBColor(0x80, 0x00, 0x80),
    }
}

fn draw_pie<DB: DrawingBackend>(
    panel: &DrawingArea<DB, Shift>,
    fit: &Fit,
    sectors: &[Sector; 2],
) -> Result<()> {
    for s in sectors.iter().filter(|s| s.angle > 0.0) {
        let steps = (s.angle / ARC_STEP_DEG).ceil().max(1.0) as usize;
        let mut pts = Vec::with_capacity(steps + 2);
        pts.push(fit.px(s.center));
        for i in 0..=steps {
            let deg = s.start_angle + s.angle * i as f64 / steps as f64;
            pts.push(fit.px(point_on_circle(s.center, s.radius, deg)));
        }
        panel
            .draw(&Polygon::new(pts, sector_color(s.kind).filled()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

/// Flatten move/cubic commands into one polyline.
fn flatten_curve(commands: &[PathCommand]) -> Vec<Point> {
    let mut pts: Vec<Point> = Vec::new();
    for cmd in commands {
        match *cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => pts.push(p),
            PathCommand::CubicTo { c1, c2, to } => {
                let from = pts.last().copied().unwrap_or(c1);
                for i in 1..=CURVE_STEPS {
                    let t = i as f64 / CURVE_STEPS as f64;
                    pts.push(cubic_point(from, c1, c2, to, t));
                }
            }
            PathCommand::ArcTo { to, .. } => pts.push(to),
            PathCommand::Close => {}
        }
    }
    pts
}

fn draw_line_chart<DB: DrawingBackend>(
    panel: &DrawingArea<DB, Shift>,
    fit: &Fit,
    chart: &ProjectedPath,
) -> Result<()> {
    for axis in [chart.axes.x_axis, chart.axes.y_axis] {
        panel
            .draw(&PathElement::new(
                vec![fit.px(axis.from), fit.px(axis.to)],
                BLACK.stroke_width(1),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    let line: Vec<(i32, i32)> = flatten_curve(&chart.commands)
        .into_iter()
        .map(|p| fit.px(p))
        .collect();
    panel
        .draw(&PathElement::new(line, LINE_BLUE.stroke_width(2)))
        .map_err(|e| anyhow!("{:?}", e))?;

    let radius = (5.0 * fit.scale).round().max(2.0) as i32;
    for m in &chart.markers {
        panel
            .draw(&Circle::new(fit.px(m.point()), radius, LINE_BLUE.filled()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

fn draw_bars<DB: DrawingBackend>(panel: &DrawingArea<DB, Shift>, bars: &[Bar]) -> Result<()> {
    let (pw, ph) = panel.dim_in_pixel();
    let (pw, ph) = (pw as f64, ph as f64);
    let mut x: f64 = 0.0;
    for bar in bars {
        let w = (pw * bar.width.percent / 100.0 - bar.width.minus_px).max(1.0);
        let h = ph * bar.height_percent / 100.0;
        let top_left = (x.round() as i32, (ph - h).round() as i32);
        let bottom_right = ((x + w).round() as i32, ph.round() as i32);
        panel
            .draw(&Rectangle::new([top_left, bottom_right], BAR_BLUE.filled()))
            .map_err(|e| anyhow!("{:?}", e))?;
        x += pw * bar.width.percent / 100.0;
    }
    Ok(())
}
