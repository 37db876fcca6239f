use crate::math::intersect_2d::line_line_point_2d;
use crate::resolve::geometry::WallGeometry;
use crate::resolve::record::{Side, TrimRecord};
use crate::resolve::tee::push_gap;

/// Resolves a mid-span crossing: each wall hosts once and is perforated
/// where the other passes through.
///
/// The crossing wall's edge lines bound the gaps cut in the host's edge
/// lines; its finish lines bound the gaps in the host's finish lines. No
/// endpoint trims are produced.
pub fn resolve(
    geoms: &[WallGeometry],
    trims: &mut [TrimRecord],
    a: usize,
    b: usize,
    t_a: f64,
    t_b: f64,
) {
    perforate(geoms, trims, a, b);
    perforate(geoms, trims, b, a);
    tracing::debug!(a, b, t_a, t_b, "cross resolved");
}

fn perforate(geoms: &[WallGeometry], trims: &mut [TrimRecord], host: usize, other: usize) {
    let gh = &geoms[host];
    let go = &geoms[other];

    for side in Side::BOTH {
        // Edge gap: host edge line clipped by the other wall's two edges.
        let offset = gh.edge_offset(side);
        let base = gh.start + gh.perp * offset;
        let hit_l = line_line_point_2d(&base, &gh.dir, &go.edge_base(Side::Left), &go.dir);
        let hit_r = line_line_point_2d(&base, &gh.dir, &go.edge_base(Side::Right), &go.dir);
        if let (Some(l), Some(r)) = (hit_l, hit_r) {
            push_gap(trims[host].edge_gaps_mut(side), gh, offset, &l, &r);
        }

        // Finish gap: same construction on the finish-offset lines.
        let (Some(offset), Some(base)) = (gh.finish_offset(side), gh.finish_base(side)) else {
            continue;
        };
        let (Some(ol), Some(or)) = (go.finish_base(Side::Left), go.finish_base(Side::Right))
        else {
            continue;
        };
        let hit_l = line_line_point_2d(&base, &gh.dir, &ol, &go.dir);
        let hit_r = line_line_point_2d(&base, &gh.dir, &or, &go.dir);
        if let (Some(l), Some(r)) = (hit_l, hit_r) {
            push_gap(trims[host].finish_gaps_mut(side), gh, offset, &l, &r);
        }
    }
}
