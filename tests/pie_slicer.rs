use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use xp_dashboard::GeometryError;
use xp_dashboard::geometry::{PathCommand, PieSlicer, PieTotals, Point, SectorKind};

fn slicer() -> PieSlicer {
    PieSlicer::new(Point::new(100.0, 100.0), 100.0)
}

fn arcs(cmds: &[PathCommand]) -> Vec<bool> {
    cmds.iter()
        .filter_map(|c| match c {
            PathCommand::ArcTo { large_arc, .. } => Some(*large_arc),
            _ => None,
        })
        .collect()
}

#[test]
fn quarter_and_three_quarters() {
    let [a, b] = slicer().slice(PieTotals::new(25.0, 75.0).unwrap()).unwrap();
    assert_eq!(a.angle, 90.0);
    assert_eq!(b.angle, 270.0);
    assert!(!a.large_arc);
    assert!(b.large_arc);
    assert_eq!(b.start_angle, a.angle);
    assert_eq!(a.kind, SectorKind::Received);
    assert_eq!(b.kind, SectorKind::Given);
    assert_eq!(a.fill(), "#4caf50");
    assert_eq!(b.fill(), "#800080");

    // Received starts at the top and ends at 3 o'clock.
    assert_abs_diff_eq!(a.start.x, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(a.start.y, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(a.end.x, 200.0, epsilon = 1e-9);
    assert_abs_diff_eq!(a.end.y, 100.0, epsilon = 1e-9);
    // The second sector picks up where the first stops.
    assert_eq!(b.start, a.end);

    let d = a.svg_path();
    assert!(d.starts_with("M 100 100 L "));
    assert!(d.contains(" A 100 100 0 0 1 "));
    assert!(d.ends_with(" Z"));
    assert!(b.svg_path().contains(" A 100 100 0 1 1 "));
}

#[test]
fn even_split_is_not_a_large_arc() {
    let [a, b] = slicer().slice(PieTotals::new(50.0, 50.0).unwrap()).unwrap();
    assert_eq!(a.angle, 180.0);
    assert_eq!(b.angle, 180.0);
    assert!(!a.large_arc);
    assert!(!b.large_arc);
    assert_eq!(arcs(&a.commands), vec![false]);
}

#[test]
fn nothing_received() {
    let [a, b] = slicer().slice(PieTotals::new(0.0, 10.0).unwrap()).unwrap();
    assert_eq!(a.angle, 0.0);
    assert_eq!(b.angle, 360.0);
    // Zero-area wedge: arc starts and ends on the same point.
    assert_eq!(a.start, a.end);
    assert!(a.svg_path().ends_with('Z'));
    // Full circle is drawn as two half arcs so the path is not degenerate.
    assert_eq!(arcs(&b.commands).len(), 2);
    assert!(b.large_arc);
    assert!(b.svg_path().chars().all(|c| !c.is_ascii_alphabetic() || "MLAZ".contains(c)));
}

#[test]
fn nothing_given() {
    let [a, b] = slicer().slice(PieTotals::new(10.0, 0.0).unwrap()).unwrap();
    assert_eq!(a.angle, 360.0);
    assert_eq!(b.angle, 0.0);
    assert_eq!(b.start_angle, 360.0);
    assert_eq!(arcs(&a.commands).len(), 2);
}

#[test]
fn zero_total_fails() {
    assert_eq!(
        slicer().slice(PieTotals::new(0.0, 0.0).unwrap()),
        Err(GeometryError::ZeroTotal)
    );
}

#[test]
fn huge_totals_still_split_evenly() {
    let [a, b] = slicer().slice(PieTotals::new(1e308, 1e308).unwrap()).unwrap();
    assert_eq!(a.angle, 180.0);
    assert_eq!(b.angle, 180.0);
    let [c, d] = slicer()
        .slice(PieTotals::new(f64::MAX, f64::MAX / 3.0).unwrap())
        .unwrap();
    assert_abs_diff_eq!(c.angle, 270.0, epsilon = 1e-9);
    assert_eq!(c.angle + d.angle, 360.0);
}

proptest! {
    #[test]
    fn sweeps_add_up_to_a_full_turn(received in 0.0f64..1e12, given in 1e-6f64..1e12) {
        let [a, b] = slicer().slice(PieTotals::new(received, given).unwrap()).unwrap();
        prop_assert_eq!(a.angle + b.angle, 360.0);
        prop_assert_eq!(b.start_angle, a.angle);
        prop_assert_eq!(a.large_arc, a.angle > 180.0);
        prop_assert_eq!(b.large_arc, b.angle > 180.0);
    }

    #[test]
    fn nothing_received_is_always_a_full_given_circle(given in 1e-9f64..1e15) {
        let [a, b] = slicer().slice(PieTotals::new(0.0, given).unwrap()).unwrap();
        prop_assert_eq!(a.angle, 0.0);
        prop_assert_eq!(b.angle, 360.0);
    }
}
