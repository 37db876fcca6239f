mod corner;
mod cross;
mod detect;
mod gaps;
mod geometry;
mod record;
mod tee;

pub use detect::{detect, Junction, Tolerances};
pub use geometry::{build as build_geometry, FinishOffsets, WallGeometry};
pub use record::{EndpointTrims, Gap, Side, TrimMap, TrimRecord, WallEnd};

use slotmap::SlotMap;

use crate::error::{ModelError, Result};
use crate::model::{Wall, WallId, WallTypeRegistry};

/// Computes the trim map for the current wall set.
///
/// The whole map is recomputed from scratch on every call; there is no
/// incremental state. Walls with degenerate (zero-length) geometry are
/// skipped and get no record.
///
/// # Errors
///
/// Returns an error if a wall references an unknown wall type. Malformed
/// geometry never errors — affected walls degrade to "untrimmed".
pub fn resolve(
    walls: &SlotMap<WallId, Wall>,
    types: &WallTypeRegistry,
    tol: &Tolerances,
) -> Result<TrimMap> {
    let ordered: Vec<(WallId, &Wall)> = walls.iter().collect();
    resolve_ordered(&ordered, types, tol)
}

/// Order-explicit variant of [`resolve`].
///
/// The result does not depend on the order of `walls` (up to
/// floating-point rounding); this entry point exists so that property can
/// be exercised directly.
///
/// # Errors
///
/// Same as [`resolve`].
pub fn resolve_ordered(
    walls: &[(WallId, &Wall)],
    types: &WallTypeRegistry,
    tol: &Tolerances,
) -> Result<TrimMap> {
    // Arena of geometries and a parallel arena of trim records, addressed
    // by integer index in the O(n²) loops below.
    let mut geoms = Vec::with_capacity(walls.len());
    for (id, wall) in walls {
        let config = types
            .get(wall.wall_type)
            .ok_or(ModelError::UnknownWallType)?;
        if let Some(g) = geometry::build(*id, *wall, config) {
            geoms.push(g);
        }
    }

    let junctions = detect::detect(&geoms, tol);
    let mut trims = vec![TrimRecord::default(); geoms.len()];

    for junction in &junctions {
        match *junction {
            Junction::Corner {
                a,
                b,
                end_a,
                end_b,
                point,
            } => corner::resolve(&geoms, &mut trims, a, b, end_a, end_b, point, tol),
            Junction::Tee {
                host,
                incoming,
                incoming_end,
                host_t,
            } => tee::resolve(&geoms, &mut trims, host, incoming, incoming_end, host_t),
            Junction::Cross { a, b, t_a, t_b } => {
                cross::resolve(&geoms, &mut trims, a, b, t_a, t_b);
            }
        }
    }

    gaps::sort_all(&mut trims);

    let mut map = TrimMap::new();
    for (g, t) in geoms.iter().zip(trims) {
        map.insert(g.id, t);
    }
    Ok(map)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::model::{
        LayerFunction, WallClass, WallLayer, WallTypeConfig, WallTypeId,
    };

    struct Fixture {
        walls: SlotMap<WallId, Wall>,
        types: WallTypeRegistry,
        exterior: WallTypeId,
        interior: WallTypeId,
    }

    // `RUST_LOG=walljoint=trace cargo test` shows per-junction decisions.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    impl Fixture {
        fn new() -> Self {
            init_tracing();
            let mut types = WallTypeRegistry::new();
            // 16-unit exterior assembly: siding 2, sheathing 2, studs 10,
            // drywall 2 (absolute units).
            let exterior = types
                .add(WallTypeConfig {
                    name: "exterior".to_owned(),
                    class: WallClass::Exterior,
                    thickness: 16.0,
                    layers: vec![
                        WallLayer::new("siding", LayerFunction::Siding, 1.0),
                        WallLayer::new("sheathing", LayerFunction::Sheathing, 1.0),
                        WallLayer::new("studs", LayerFunction::StudCavity, 5.0),
                        WallLayer::new("drywall", LayerFunction::Drywall, 1.0),
                    ],
                })
                .unwrap();
            // 10-unit interior assembly: drywall 2 each side, studs 6.
            let interior = types
                .add(WallTypeConfig {
                    name: "interior".to_owned(),
                    class: WallClass::Interior,
                    thickness: 10.0,
                    layers: vec![
                        WallLayer::new("drywall", LayerFunction::Drywall, 1.0),
                        WallLayer::new("studs", LayerFunction::StudCavity, 3.0),
                        WallLayer::new("drywall", LayerFunction::Drywall, 1.0),
                    ],
                })
                .unwrap();
            Self {
                walls: SlotMap::with_key(),
                types,
                exterior,
                interior,
            }
        }

        fn add(&mut self, sx: f64, sy: f64, ex: f64, ey: f64, t: WallTypeId) -> WallId {
            self.walls
                .insert(Wall::new(Point2::new(sx, sy), Point2::new(ex, ey), t))
        }

        fn resolve(&self) -> TrimMap {
            resolve(&self.walls, &self.types, &Tolerances::default()).unwrap()
        }
    }

    fn assert_point(p: Option<Point2>, x: f64, y: f64) {
        let p = p.unwrap();
        assert!(
            (p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9,
            "expected ({x}, {y}), got ({}, {})",
            p.x,
            p.y
        );
    }

    // ── Scenario A: exterior right-angle corner ──

    #[test]
    fn exterior_corner_miters_both_edge_pairs() {
        let mut fx = Fixture::new();
        let ext = fx.exterior;
        let a = fx.add(0.0, 0.0, 200.0, 0.0, ext);
        let b = fx.add(200.0, 0.0, 200.0, 150.0, ext);
        let map = fx.resolve();

        // Wall A runs +x (left edge y=+8), wall B runs +y (left edge
        // x=192). Inner corner (192, 8), outer corner (208, -8).
        assert_point(map[a].edge.end_left, 192.0, 8.0);
        assert_point(map[a].edge.end_right, 208.0, -8.0);
        assert_point(map[b].edge.start_left, 192.0, 8.0);
        assert_point(map[b].edge.start_right, 208.0, -8.0);

        // Finish lines mitered independently: drywall boundary at ±6.
        assert_point(map[a].finish.end_left, 194.0, 6.0);
        assert_point(map[b].finish.start_left, 194.0, 6.0);
        assert_point(map[a].finish.end_right, 206.0, -6.0);

        // A corner produces no cap suppression or gaps.
        assert!(!map[a].end_has_t);
        assert!(map[a].left_edge_gaps.is_empty());
    }

    #[test]
    fn corner_pairing_is_orientation_invariant() {
        // Same corner, second wall reversed: trim points must be the
        // same geometric corners, stored under the swapped sides.
        let mut fx = Fixture::new();
        let ext = fx.exterior;
        let a = fx.add(0.0, 0.0, 200.0, 0.0, ext);
        let b = fx.add(200.0, 150.0, 200.0, 0.0, ext);
        let map = fx.resolve();

        assert_point(map[a].edge.end_left, 192.0, 8.0);
        assert_point(map[a].edge.end_right, 208.0, -8.0);
        // B now runs -y, so its left edge is at x=208.
        assert_point(map[b].edge.end_left, 208.0, -8.0);
        assert_point(map[b].edge.end_right, 192.0, 8.0);
    }

    #[test]
    fn interior_corner_miters_both_edge_pairs() {
        let mut fx = Fixture::new();
        let int = fx.interior;
        let a = fx.add(0.0, 0.0, 100.0, 0.0, int);
        let b = fx.add(100.0, 0.0, 100.0, 80.0, int);
        let map = fx.resolve();

        assert_point(map[a].edge.end_left, 95.0, 5.0);
        assert_point(map[a].edge.end_right, 105.0, -5.0);
        assert_point(map[b].edge.start_left, 95.0, 5.0);
        assert_point(map[b].edge.start_right, 105.0, -5.0);
    }

    #[test]
    fn mixed_corner_keeps_siding_unbroken() {
        let mut fx = Fixture::new();
        let (ext, int) = (fx.exterior, fx.interior);
        // Exterior along x, drywall face on +y; interior going up from
        // the shared endpoint.
        let e = fx.add(0.0, 0.0, 200.0, 0.0, ext);
        let i = fx.add(200.0, 0.0, 200.0, 150.0, int);
        let map = fx.resolve();

        // Siding-side edge (right, y=-8) stays untrimmed.
        assert!(map[e].edge.end_right.is_none());
        // Drywall-side edge mitered against the interior wall's matching
        // edge (x = 200 - 5 = 195).
        assert_point(map[e].edge.end_left, 195.0, 8.0);
        // Interior wall butts against the drywall line y=8 on both sides.
        assert_point(map[i].edge.start_left, 195.0, 8.0);
        assert_point(map[i].edge.start_right, 205.0, 8.0);
    }

    #[test]
    fn collinear_corner_degrades_to_untrimmed() {
        // Two collinear walls chained end-to-start: every edge pair is
        // parallel, so no miter exists and nothing is trimmed.
        let mut fx = Fixture::new();
        let int = fx.interior;
        let a = fx.add(0.0, 0.0, 100.0, 0.0, int);
        let b = fx.add(100.0, 0.0, 250.0, 0.0, int);
        let map = fx.resolve();

        assert_eq!(map[a].edge, EndpointTrims::default());
        assert_eq!(map[b].edge, EndpointTrims::default());
    }

    #[test]
    fn distant_miter_is_discarded_by_guard() {
        // Wall B doubles back at 2° off wall A's reverse direction: the
        // offset-line intersections land hundreds of units out and must
        // be rejected, leaving both walls untrimmed.
        let mut fx = Fixture::new();
        let int = fx.interior;
        let a = fx.add(0.0, 0.0, 100.0, 0.0, int);
        let ang = 178.0_f64.to_radians();
        let b = fx.add(100.0, 0.0, 100.0 + 100.0 * ang.cos(), 100.0 * ang.sin(), int);
        let map = fx.resolve();

        // Guard distance is 8 × 5 = 40; the miters sit at roughly
        // 5 / sin(1°) ≈ 286 units from the corner.
        assert_eq!(map[a].edge, EndpointTrims::default());
        assert_eq!(map[b].edge, EndpointTrims::default());
    }

    // ── Scenario B: interior tee into an exterior host ──

    #[test]
    fn tee_into_exterior_host_cuts_drywall_face_only() {
        let mut fx = Fixture::new();
        let (ext, int) = (fx.exterior, fx.interior);
        // Host drywall on +y; incoming starts at the host midpoint.
        let h = fx.add(0.0, 0.0, 300.0, 0.0, ext);
        let i = fx.add(150.0, 0.0, 150.0, 100.0, int);
        let map = fx.resolve();

        // Exactly one gap in the host's drywall-side (left) edge and
        // finish line; siding side untouched.
        assert_eq!(map[h].left_edge_gaps.len(), 1);
        assert_eq!(map[h].left_finish_gaps.len(), 1);
        assert!(map[h].right_edge_gaps.is_empty());
        assert!(map[h].right_finish_gaps.is_empty());

        let gap = &map[h].left_edge_gaps[0];
        assert!((gap.t0 - 145.0).abs() < 1e-9, "t0={}", gap.t0);
        assert!((gap.t1 - 155.0).abs() < 1e-9, "t1={}", gap.t1);

        // Incoming trimmed to the drywall edge (y=8), perpendicular cut.
        assert_point(map[i].edge.start_left, 145.0, 8.0);
        assert_point(map[i].edge.start_right, 155.0, 8.0);
        // Incoming finish lines trimmed to the drywall finish line (y=6).
        assert_point(map[i].finish.start_left, 147.0, 6.0);
        assert_point(map[i].finish.start_right, 153.0, 6.0);

        assert!(map[i].start_has_t);
        assert!(!map[i].end_has_t);
        assert!(!map[h].start_has_t && !map[h].end_has_t);
    }

    #[test]
    fn tee_into_exterior_host_from_siding_side_still_cuts_drywall_face() {
        let mut fx = Fixture::new();
        let (ext, int) = (fx.exterior, fx.interior);
        // Incoming approaches from below (-y): the geometric near edge is
        // the siding face, but the cut must land on the drywall face.
        let h = fx.add(0.0, 0.0, 300.0, 0.0, ext);
        let i = fx.add(150.0, 0.0, 150.0, -100.0, int);
        let map = fx.resolve();

        assert_eq!(map[h].left_edge_gaps.len(), 1);
        assert!(map[h].right_edge_gaps.is_empty());
        assert!(map[h].right_finish_gaps.is_empty());
        // Trimming to the far-side drywall edge would lengthen the
        // incoming wall, so its edge trims are rejected.
        assert!(map[i].edge.start_left.is_none());
        assert!(map[i].start_has_t);
    }

    #[test]
    fn tee_into_interior_host_cuts_near_edge_and_both_finish_lines() {
        let mut fx = Fixture::new();
        let int = fx.interior;
        // Host along x; incoming from above, so its body is on the left
        // (+y) side of the host.
        let h = fx.add(0.0, 0.0, 300.0, 0.0, int);
        let i = fx.add(150.0, 5.0, 150.0, 100.0, int);
        let map = fx.resolve();

        // Near (left) edge gets the gap; far edge stays whole.
        assert_eq!(map[h].left_edge_gaps.len(), 1);
        assert!(map[h].right_edge_gaps.is_empty());

        // Both finish lines gapped, connector on the near line.
        assert_eq!(map[h].left_finish_gaps.len(), 1);
        assert_eq!(map[h].right_finish_gaps.len(), 1);
        assert_eq!(map[h].finish_connectors.len(), 1);
        let (ca, cb) = map[h].finish_connectors[0];
        assert!((ca.y - 3.0).abs() < 1e-9 && (cb.y - 3.0).abs() < 1e-9);
        // Connector spans the incoming wall's two finish lines (6 apart).
        assert!(((ca.x - cb.x).abs() - 6.0).abs() < 1e-9);

        // The near-line opening covers the incoming wall's full edge
        // footprint, strictly wider than the connector, so the drywall
        // returns into the junction stay open.
        let near_gap = &map[h].left_finish_gaps[0];
        assert!((near_gap.t0 - 145.0).abs() < 1e-9, "t0={}", near_gap.t0);
        assert!((near_gap.t1 - 155.0).abs() < 1e-9, "t1={}", near_gap.t1);
        assert!(ca.x.min(cb.x) > near_gap.t0 && ca.x.max(cb.x) < near_gap.t1);
        // Far-line gap only where the finish lines pass through.
        let far_gap = &map[h].right_finish_gaps[0];
        assert!((far_gap.t0 - 147.0).abs() < 1e-9, "t0={}", far_gap.t0);
        assert!((far_gap.t1 - 153.0).abs() < 1e-9, "t1={}", far_gap.t1);

        // Incoming finish lines run through to the far (-y) finish line.
        assert_point(map[i].finish.start_left, 147.0, -3.0);
        assert_point(map[i].finish.start_right, 153.0, -3.0);
        assert!(map[i].start_has_t);
    }

    #[test]
    fn tee_trim_applies_only_when_it_shortens() {
        let mut fx = Fixture::new();
        let int = fx.interior;
        let h = fx.add(0.0, 0.0, 300.0, 0.0, int);
        // Incoming overshoots slightly past the host centerline: trimming
        // back to the near edge (y=5) shortens it and is applied. (The
        // lengthening case is covered by the siding-side tee test above.)
        let i = fx.add(150.0, -2.0, 150.0, 100.0, int);
        let map = fx.resolve();
        assert_point(map[i].edge.start_left, 145.0, 5.0);
        assert_point(map[i].edge.start_right, 155.0, 5.0);
        assert!(map[i].start_has_t);
        assert_eq!(map[h].left_edge_gaps.len(), 1);
    }

    // ── Scenario C: interior walls crossing mid-span ──

    #[test]
    fn mid_span_crossing_perforates_both_walls() {
        let mut fx = Fixture::new();
        let int = fx.interior;
        let m = fx.add(0.0, 50.0, 200.0, 50.0, int);
        let n = fx.add(100.0, 0.0, 100.0, 100.0, int);
        let map = fx.resolve();

        for id in [m, n] {
            assert_eq!(map[id].left_finish_gaps.len(), 1, "wall {id:?}");
            assert_eq!(map[id].right_finish_gaps.len(), 1, "wall {id:?}");
            assert_eq!(map[id].left_edge_gaps.len(), 1, "wall {id:?}");
            assert_eq!(map[id].right_edge_gaps.len(), 1, "wall {id:?}");
            // No endpoint trims, no cap suppression.
            assert_eq!(map[id].edge, EndpointTrims::default());
            assert!(!map[id].start_has_t && !map[id].end_has_t);
        }

        // M's left edge (y=55) is opened over N's footprint x ∈ [95, 105].
        let gap = &map[m].left_edge_gaps[0];
        assert!((gap.t0 - 95.0).abs() < 1e-9, "t0={}", gap.t0);
        assert!((gap.t1 - 105.0).abs() < 1e-9, "t1={}", gap.t1);
        // Finish gaps are narrower: N's finish lines sit at x ∈ [97, 103].
        let fgap = &map[m].left_finish_gaps[0];
        assert!((fgap.t0 - 97.0).abs() < 1e-9, "t0={}", fgap.t0);
        assert!((fgap.t1 - 103.0).abs() < 1e-9, "t1={}", fgap.t1);
    }

    // ── Whole-map properties ──

    #[test]
    fn gap_lists_are_sorted_left_to_right() {
        let mut fx = Fixture::new();
        let int = fx.interior;
        // Three incoming walls teeing into one host, added out of order.
        let h = fx.add(0.0, 0.0, 400.0, 0.0, int);
        fx.add(300.0, 5.0, 300.0, 100.0, int);
        fx.add(100.0, 5.0, 100.0, 100.0, int);
        fx.add(200.0, 5.0, 200.0, 100.0, int);
        let map = fx.resolve();

        let gaps = &map[h].left_edge_gaps;
        assert_eq!(gaps.len(), 3);
        assert!(gaps[0].t0 < gaps[1].t0 && gaps[1].t0 < gaps[2].t0);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let mut fx = Fixture::new();
        let (ext, int) = (fx.exterior, fx.interior);
        fx.add(0.0, 0.0, 200.0, 0.0, ext);
        fx.add(200.0, 0.0, 200.0, 150.0, ext);
        fx.add(100.0, 0.0, 100.0, 120.0, int);
        fx.add(0.0, 60.0, 200.0, 60.0, int);

        let first = fx.resolve();
        let second = fx.resolve();
        assert_eq!(first.len(), second.len());
        for (id, record) in &first {
            assert_eq!(record, &second[id], "wall {id:?}");
        }
    }

    #[test]
    fn result_is_input_order_independent() {
        let mut fx = Fixture::new();
        let (ext, int) = (fx.exterior, fx.interior);
        fx.add(0.0, 0.0, 200.0, 0.0, ext);
        fx.add(200.0, 0.0, 200.0, 150.0, ext);
        fx.add(100.0, 0.0, 100.0, 120.0, int);
        fx.add(0.0, 60.0, 200.0, 60.0, int);

        let ordered: Vec<(WallId, &Wall)> = fx.walls.iter().collect();
        let mut reversed = ordered.clone();
        reversed.reverse();

        let a = resolve_ordered(&ordered, &fx.types, &Tolerances::default()).unwrap();
        let b = resolve_ordered(&reversed, &fx.types, &Tolerances::default()).unwrap();

        assert_eq!(a.len(), b.len());
        for (id, ra) in &a {
            let rb = &b[id];
            assert_eq!(ra.start_has_t, rb.start_has_t);
            assert_eq!(ra.end_has_t, rb.end_has_t);
            for (pa, pb) in [
                (ra.edge.end_left, rb.edge.end_left),
                (ra.edge.end_right, rb.edge.end_right),
                (ra.edge.start_left, rb.edge.start_left),
                (ra.edge.start_right, rb.edge.start_right),
            ] {
                match (pa, pb) {
                    (None, None) => {}
                    (Some(pa), Some(pb)) => {
                        assert!((pa - pb).norm() < 1e-6, "{pa} vs {pb}");
                    }
                    _ => panic!("trim presence differs for wall {id:?}"),
                }
            }
            assert_eq!(ra.left_edge_gaps.len(), rb.left_edge_gaps.len());
            assert_eq!(ra.right_edge_gaps.len(), rb.right_edge_gaps.len());
            for (ga, gb) in ra.left_edge_gaps.iter().zip(&rb.left_edge_gaps) {
                assert!((ga.t0 - gb.t0).abs() < 1e-6);
                assert!((ga.t1 - gb.t1).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn zero_length_wall_is_skipped() {
        let mut fx = Fixture::new();
        let int = fx.interior;
        let z = fx.add(50.0, 50.0, 50.0, 50.0, int);
        let w = fx.add(0.0, 0.0, 100.0, 0.0, int);
        let map = fx.resolve();
        assert!(!map.contains_key(z));
        assert!(map.contains_key(w));
    }

    #[test]
    fn unknown_wall_type_is_an_error() {
        let fx = Fixture::new();
        let mut walls: SlotMap<WallId, Wall> = SlotMap::with_key();
        walls.insert(Wall::new(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            WallTypeId::default(),
        ));
        let result = resolve(&walls, &fx.types, &Tolerances::default());
        assert!(result.is_err());
    }
}
