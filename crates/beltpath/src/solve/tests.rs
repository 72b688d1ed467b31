use super::*;
use crate::pulley::Direction::{self, Ccw, Cw};
use nalgebra::vector;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

const EPS: f64 = 1e-9;

fn p(r: f64, x: f64, y: f64, d: Direction) -> Pulley {
    Pulley::new(r, x, y, d).unwrap()
}

fn solve_default(pulleys: &[Pulley], closed: bool) -> Result<BeltGeometry> {
    solve(pulleys, closed, &SolverCfg::default())
}

/// Pulleys on a ring of radius 100, far enough apart for any tangent kind.
fn ring_layout(rng: &mut StdRng) -> Vec<Pulley> {
    let n = rng.gen_range(3..=8usize);
    (0..n)
        .map(|i| {
            let th = TAU * i as f64 / n as f64 + rng.gen_range(-0.1..0.1);
            let r = rng.gen_range(1.0..5.0);
            let d = if rng.gen_bool(0.5) { Cw } else { Ccw };
            p(r, 100.0 * th.cos(), 100.0 * th.sin(), d)
        })
        .collect()
}

fn assert_consistent(pulleys: &[Pulley], g: &BeltGeometry) {
    for s in &g.segments {
        let a = &pulleys[s.from];
        let b = &pulleys[s.to];
        assert!(((s.start - a.center()).norm() - a.radius()).abs() < EPS);
        assert!(((s.end - b.center()).norm() - b.radius()).abs() < EPS);
        assert!(((s.end - s.start).norm() - s.length).abs() < 1e-7);
        // span is perpendicular to both contact radii
        assert!((s.start - a.center()).dot(&s.unit()).abs() < 1e-7);
        assert!((s.end - b.center()).dot(&s.unit()).abs() < 1e-7);
    }
    for a in &g.arcs {
        assert!((0.0..TAU).contains(&a.wrap_angle));
        assert!((a.arc_length - a.radius * a.wrap_angle).abs() < EPS);
    }
    let m = g.path.len();
    let links = if g.closed { m } else { m - 1 };
    for k in 0..links {
        let cur = &g.path[k];
        let next = &g.path[(k + 1) % m];
        assert!(
            (cur.end_point() - next.start_point()).norm() < 1e-7,
            "gap between path elements {k} and {}",
            (k + 1) % m
        );
    }
    for (k, e) in g.path.iter().enumerate() {
        assert_eq!(e.color_index, k);
    }
    assert!(g.total_length.is_finite() && g.total_length > 0.0);
    assert!((g.total_length - g.tangent_length() - g.wrap_length()).abs() < 1e-7);
}

#[test]
fn sign_table_is_pinned() {
    assert_eq!(contact_side(TangentKind::Open, EndpointRole::From), 1.0);
    assert_eq!(contact_side(TangentKind::Open, EndpointRole::To), 1.0);
    assert_eq!(contact_side(TangentKind::Crossed, EndpointRole::From), 1.0);
    assert_eq!(contact_side(TangentKind::Crossed, EndpointRole::To), -1.0);
    assert_eq!(TangentKind::between(Cw, Cw), TangentKind::Open);
    assert_eq!(TangentKind::between(Ccw, Cw), TangentKind::Crossed);
}

#[test]
fn contact_points_for_each_sign_case() {
    let cfg = SolverCfg::default();
    // Open, clockwise: belt rides over the top going left to right.
    let s = solve_tangent(0, &p(10.0, 0.0, 0.0, Cw), 1, &p(10.0, 100.0, 0.0, Cw), &cfg).unwrap();
    assert!((s.start - vector![0.0, 10.0]).norm() < EPS);
    assert!((s.end - vector![100.0, 10.0]).norm() < EPS);
    // Open, counter-clockwise: underneath.
    let s = solve_tangent(0, &p(10.0, 0.0, 0.0, Ccw), 1, &p(10.0, 100.0, 0.0, Ccw), &cfg).unwrap();
    assert!((s.start - vector![0.0, -10.0]).norm() < EPS);
    assert!((s.end - vector![100.0, -10.0]).norm() < EPS);
    // Crossed, CW → CCW: leaves the top of A, lands on the bottom of B.
    let s = solve_tangent(0, &p(10.0, 0.0, 0.0, Cw), 1, &p(10.0, 100.0, 0.0, Ccw), &cfg).unwrap();
    assert_eq!(s.tangent_kind, TangentKind::Crossed);
    assert!(s.start.y > 0.0 && s.end.y < 0.0);
    assert!((s.start.y + s.end.y).abs() < EPS);
    // Crossed, CCW → CW: mirror image.
    let s = solve_tangent(0, &p(10.0, 0.0, 0.0, Ccw), 1, &p(10.0, 100.0, 0.0, Cw), &cfg).unwrap();
    assert!(s.start.y < 0.0 && s.end.y > 0.0);
    assert!((s.length - (100.0f64 * 100.0 - 400.0).sqrt()).abs() < EPS);
}

#[test]
fn symmetric_open_belt() {
    let ps = [p(10.0, 0.0, 0.0, Cw), p(10.0, 100.0, 0.0, Cw)];
    let g = solve_default(&ps, true).unwrap();
    assert_eq!(g.segments.len(), 2);
    for s in &g.segments {
        assert_eq!(s.tangent_kind, TangentKind::Open);
        assert!((s.length - 100.0).abs() < EPS);
    }
    for a in &g.arcs {
        assert!((a.wrap_angle - PI).abs() < EPS);
    }
    assert!((g.total_length - (200.0 + 20.0 * PI)).abs() < EPS);
    assert_consistent(&ps, &g);
}

#[test]
fn crossed_belt() {
    let ps = [p(10.0, 0.0, 0.0, Cw), p(10.0, 100.0, 0.0, Ccw)];
    let g = solve_default(&ps, true).unwrap();
    let tangent = (100.0f64 * 100.0 - 20.0 * 20.0).sqrt();
    let beta = (20.0f64 / 100.0).asin();
    for s in &g.segments {
        assert_eq!(s.tangent_kind, TangentKind::Crossed);
        assert!((s.length - tangent).abs() < EPS);
    }
    for a in &g.arcs {
        assert!((a.wrap_angle - (PI + 2.0 * beta)).abs() < EPS);
    }
    let expected = 2.0 * tangent + 20.0 * (PI + 2.0 * beta);
    assert!((g.total_length - expected).abs() < EPS);
    assert!(g.total_length > 100.0);
    assert_consistent(&ps, &g);
}

#[test]
fn unequal_open_belt_matches_closed_form() {
    let (r1, r2, d) = (10.0f64, 20.0f64, 100.0f64);
    let beta = ((r2 - r1) / d).asin();
    let expected = 2.0 * (d * d - (r2 - r1).powi(2)).sqrt() + PI * (r1 + r2) + 2.0 * (r2 - r1) * beta;
    for dir in [Cw, Ccw] {
        let ps = [p(r1, 0.0, 0.0, dir), p(r2, d, 0.0, dir)];
        let g = solve_default(&ps, true).unwrap();
        assert!((g.total_length - expected).abs() < EPS);
        // larger pulley carries the larger wrap
        assert!((g.arcs[0].wrap_angle - (PI - 2.0 * beta)).abs() < EPS);
        assert!((g.arcs[1].wrap_angle - (PI + 2.0 * beta)).abs() < EPS);
        assert_consistent(&ps, &g);
    }
}

#[test]
fn crossed_touching_pulleys_are_infeasible() {
    let ps = [p(10.0, 0.0, 0.0, Cw), p(10.0, 20.0, 0.0, Ccw)];
    assert!(matches!(
        solve_default(&ps, true),
        Err(BeltError::GeometryInfeasible { from: 0, to: 1, .. })
    ));
}

#[test]
fn coincident_centres_are_infeasible() {
    let ps = [p(10.0, 5.0, 5.0, Cw), p(10.0, 5.0, 5.0, Cw)];
    assert!(matches!(
        solve_default(&ps, false),
        Err(BeltError::GeometryInfeasible { .. })
    ));
    let ps = [p(10.0, 5.0, 5.0, Cw), p(4.0, 5.0, 5.0, Cw)];
    assert!(solve_default(&ps, false).is_err());
}

#[test]
fn open_tangent_allows_overlap_unless_clearance_requested() {
    let ps = [p(10.0, 0.0, 0.0, Cw), p(10.0, 5.0, 0.0, Cw)];
    assert!(solve_default(&ps, true).is_ok());
    let ps = [p(10.0, 0.0, 0.0, Cw), p(10.0, 20.1, 0.0, Cw)];
    assert!(solve_default(&ps, true).is_ok());
    assert!(matches!(
        solve(&ps, true, &SolverCfg::with_clearance()),
        Err(BeltError::GeometryInfeasible { .. })
    ));
}

#[test]
fn fewer_than_two_pulleys_is_invalid() {
    let ps = [p(1.0, 0.0, 0.0, Cw)];
    assert!(matches!(
        solve_default(&ps, false),
        Err(BeltError::InvalidParameter { .. })
    ));
    assert!(solve_default(&[], true).is_err());
}

#[test]
fn open_chain_ends_have_zero_wrap() {
    let ps = [
        p(10.0, 0.0, 0.0, Cw),
        p(5.0, 60.0, 40.0, Ccw),
        p(8.0, 120.0, 0.0, Cw),
    ];
    let g = solve_default(&ps, false).unwrap();
    assert_eq!(g.segments.len(), 2);
    assert_eq!(g.arcs.len(), 3);
    assert_eq!(g.path.len(), 5);
    assert_eq!(g.arcs[0].wrap_angle, 0.0);
    assert_eq!(g.arcs[2].wrap_angle, 0.0);
    assert!(g.arcs[1].wrap_angle > 0.0);
    assert!(g.incoming(0).is_none() && g.outgoing(2).is_none());
    assert_eq!(g.incoming(1).map(|s| s.from), Some(0));
    assert!(matches!(g.path[0].geometry, PathGeometry::Arc(_)));
    assert!(matches!(g.path[4].geometry, PathGeometry::Arc(_)));
    assert_consistent(&ps, &g);
}

#[test]
fn collinear_idler_is_straight_through() {
    let ps = [
        p(10.0, 0.0, 0.0, Cw),
        p(10.0, 50.0, 0.0, Cw),
        p(10.0, 100.0, 0.0, Cw),
    ];
    let g = solve_default(&ps, false).unwrap();
    assert_eq!(g.arcs[1].wrap_angle, 0.0);
    assert!((g.total_length - 100.0).abs() < EPS);
}

#[test]
fn random_layouts_are_consistent() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let ps = ring_layout(&mut rng);
        let closed = rng.gen_bool(0.5);
        let g = solve_default(&ps, closed).unwrap();
        assert_consistent(&ps, &g);
    }
}

#[test]
fn arc_polyline_covers_wrap() {
    let ps = [p(10.0, 0.0, 0.0, Cw), p(10.0, 100.0, 0.0, Cw)];
    let g = solve_default(&ps, true).unwrap();
    let arc = &g.arcs[1];
    let pts = arc.polyline(crate::cfg::CIRCLE_RESOLUTION);
    assert!(pts.len() >= 26 && pts.len() <= 27);
    assert!((pts[0] - vector![100.0, 10.0]).norm() < EPS);
    assert!((pts[pts.len() - 1] - vector![100.0, -10.0]).norm() < EPS);
    // clockwise around the far side
    assert!((arc.point_at(0.5) - vector![110.0, 0.0]).norm() < EPS);
    assert!((g.arcs[0].start_angle - 3.0 * FRAC_PI_2).abs() < EPS);
}

#[test]
fn hue_follows_path_order() {
    assert_eq!(hue_for(0, 4), 0.0);
    assert_eq!(hue_for(2, 4), 0.5);
    assert_eq!(hue_for(5, 4), 0.25);
    assert_eq!(hue_for(3, 0), 0.0);
}

#[test]
fn path_serializes_with_kind_tags() {
    let ps = [p(10.0, 0.0, 0.0, Cw), p(10.0, 100.0, 0.0, Ccw)];
    let g = solve_default(&ps, true).unwrap();
    let json = serde_json::to_value(&g.path).unwrap();
    assert_eq!(json[0]["geometry"]["kind"], "ARC");
    assert_eq!(json[1]["geometry"]["kind"], "SEGMENT");
    assert_eq!(json[1]["geometry"]["tangent_kind"], "Crossed");
    assert_eq!(json[1]["color_index"], 1);
    let back: Vec<PathElement> = serde_json::from_value(json).unwrap();
    assert_eq!(back, g.path);
}

#[test]
fn path_round_trips_through_json_text() {
    let ps = [
        p(10.0, 0.0, 0.0, Cw),
        p(5.0, 60.0, 40.0, Ccw),
        p(8.0, 120.0, 0.0, Cw),
    ];
    let g = solve_default(&ps, true).unwrap();
    let text = serde_json::to_string(&g.path[1]).unwrap();
    assert_eq!(text.matches("\"kind\"").count(), 1);
    let one: PathElement = serde_json::from_str(&text).unwrap();
    assert_eq!(one, g.path[1]);
    let all = serde_json::to_string(&g).unwrap();
    let back: BeltGeometry = serde_json::from_str(&all).unwrap();
    assert_eq!(back, g);
}

#[test]
fn internally_tangent_open_pair_is_infeasible() {
    // d == |r_b − r_a| with d > 0: the small pulley touches the inside of the large one
    let ps = [p(10.0, 0.0, 0.0, Cw), p(4.0, 6.0, 0.0, Cw)];
    assert!(matches!(
        solve_default(&ps, false),
        Err(BeltError::GeometryInfeasible { from: 0, to: 1, .. })
    ));
}

#[test]
fn narrow_gap_above_boundary_is_feasible() {
    let ps = [p(1.0, 0.0, 0.0, Cw), p(3.0, 2.0 + 5e-10, 0.0, Cw)];
    let g = solve_default(&ps, false).unwrap();
    assert!(g.total_length > 0.0 && g.total_length.is_finite());
}

#[test]
fn tiny_scale_layout_scales_length() {
    let base = [p(10.0, 0.0, 0.0, Cw), p(10.0, 100.0, 0.0, Ccw)];
    let full = solve_default(&base, true).unwrap().total_length;
    for k in [1e-6, 1e-9, 1e-11, 1e-14] {
        let scaled: Vec<Pulley> = base.iter().map(|q| q.scaled(k).unwrap()).collect();
        let len = solve_default(&scaled, true).unwrap().total_length;
        assert!((len - k * full).abs() <= 1e-9 * k * full, "k = {k:e}");
    }
    // touching crossed pair stays infeasible at any scale
    let touching = [p(10.0, 0.0, 0.0, Cw), p(10.0, 20.0, 0.0, Ccw)];
    for k in [1e-11, 1.0, 1e6] {
        let scaled: Vec<Pulley> = touching.iter().map(|q| q.scaled(k).unwrap()).collect();
        assert!(solve_default(&scaled, true).is_err());
    }
}

proptest! {
    #[test]
    fn length_is_homogeneous(seed in any::<u64>(), k in 0.1f64..10.0) {
        let mut rng = StdRng::seed_from_u64(seed);
        let ps = ring_layout(&mut rng);
        let scaled: Vec<Pulley> = ps.iter().map(|q| q.scaled(k).unwrap()).collect();
        let base = solve_default(&ps, true).unwrap().total_length;
        let big = solve_default(&scaled, true).unwrap().total_length;
        prop_assert!((big - k * base).abs() <= 1e-9 * big.max(1.0));
    }
}
