use crate::math::distance_2d::param_along;
use crate::math::intersect_2d::{line_line_point_2d, point_at};
use crate::math::{Point2, Vector2};
use crate::model::WallClass;
use crate::resolve::geometry::WallGeometry;
use crate::resolve::record::{Gap, Side, TrimRecord, WallEnd};

/// Resolves a T-junction: `incoming`'s `incoming_end` terminates against
/// `host`'s body at normalized host parameter `host_t`.
///
/// The cut is perpendicular to the incoming wall: its centerline is
/// intersected with the host's target edge and the crossing point offset
/// by ± the incoming half-thickness along the incoming perpendicular.
/// An exterior host always takes the cut on its drywall face; the siding
/// face is never broken.
pub fn resolve(
    geoms: &[WallGeometry],
    trims: &mut [TrimRecord],
    host: usize,
    incoming: usize,
    incoming_end: WallEnd,
    host_t: f64,
) {
    let gh = &geoms[host];
    let gi = &geoms[incoming];

    let near = near_side(gh, gi, incoming_end, host_t);
    let target = match gh.class {
        WallClass::Exterior => gh.drywall_side().unwrap_or(near),
        WallClass::Interior => near,
    };

    // Center cut: incoming centerline against the host's target edge.
    let target_base = gh.edge_base(target);
    let Some(center) = line_line_point_2d(&gi.start, &gi.dir, &target_base, &gh.dir) else {
        tracing::trace!(host, incoming, "tee centerline parallel to host edge");
        return;
    };

    let trim_left = center + gi.perp * gi.half;
    let trim_right = center - gi.perp * gi.half;

    // Trim the incoming wall only if it actually shortens it.
    for (side, p) in [(Side::Left, trim_left), (Side::Right, trim_right)] {
        let t = gi.param_of(&p);
        if t > 0.0 && t < gi.len {
            trims[incoming].edge.set(incoming_end, side, p);
        } else {
            tracing::trace!(incoming, ?side, t, "tee trim rejected (would not shorten)");
        }
    }
    trims[incoming].set_has_t(incoming_end);

    // Gap in the host's target edge over the incoming wall's footprint.
    push_gap(
        trims[host].edge_gaps_mut(target),
        gh,
        gh.edge_offset(target),
        &trim_left,
        &trim_right,
    );

    resolve_finish(
        geoms,
        trims,
        host,
        incoming,
        incoming_end,
        near,
        &trim_left,
        &trim_right,
    );
    tracing::debug!(host, incoming, ?near, ?target, "tee resolved");
}

/// Which host side the incoming wall's body lies on: the host edge nearer
/// to the incoming wall's far endpoint at the junction's longitudinal
/// position.
fn near_side(gh: &WallGeometry, gi: &WallGeometry, incoming_end: WallEnd, host_t: f64) -> Side {
    let far = gi.endpoint(incoming_end.opposite());
    let along = host_t * gh.len;
    let left = gh.point_on_offset_line(gh.edge_offset(Side::Left), along);
    let right = gh.point_on_offset_line(gh.edge_offset(Side::Right), along);
    if (far - left).norm() <= (far - right).norm() {
        Side::Left
    } else {
        Side::Right
    }
}

/// Finish-line handling.
///
/// Exterior host: incoming finish lines stop at the host's single drywall
/// finish line; one gap is cut there. Interior host: incoming finish
/// lines run through to the host's *far* finish line, the far line is
/// gapped where they pass, and the near line is opened over the incoming
/// wall's full edge footprint with a connector spanning only the cavity
/// between its finish lines, leaving the drywall returns open.
#[allow(clippy::too_many_arguments)]
fn resolve_finish(
    geoms: &[WallGeometry],
    trims: &mut [TrimRecord],
    host: usize,
    incoming: usize,
    incoming_end: WallEnd,
    near: Side,
    trim_left: &Point2,
    trim_right: &Point2,
) {
    let gh = &geoms[host];
    let gi = &geoms[incoming];
    if gi.finish.is_none() || gh.finish.is_none() {
        return;
    }

    match gh.class {
        WallClass::Exterior => {
            let Some(dry) = gh.drywall_side() else { return };
            let Some(line) = gh.finish_base(dry) else { return };
            let hits =
                trim_incoming_finish(gi, trims, incoming, incoming_end, &line, &gh.dir);
            if let (Some(a), Some(b)) = hits {
                if let Some(offset) = gh.finish_offset(dry) {
                    push_gap(trims[host].finish_gaps_mut(dry), gh, offset, &a, &b);
                }
            }
        }
        WallClass::Interior => {
            let far = near.opposite();
            let (Some(near_line), Some(far_line)) = (gh.finish_base(near), gh.finish_base(far))
            else {
                return;
            };

            // Incoming finish lines run through to the far finish line.
            let hits =
                trim_incoming_finish(gi, trims, incoming, incoming_end, &far_line, &gh.dir);
            if let (Some(a), Some(b)) = hits {
                if let Some(offset) = gh.finish_offset(far) {
                    push_gap(trims[host].finish_gaps_mut(far), gh, offset, &a, &b);
                }
            }

            // Near finish line: opened over the incoming wall's full
            // footprint; the connector closes only the cavity width.
            if let Some(offset) = gh.finish_offset(near) {
                push_gap(
                    trims[host].finish_gaps_mut(near),
                    gh,
                    offset,
                    trim_left,
                    trim_right,
                );
            }
            let near_a = finish_hit(gi, Side::Left, &near_line, &gh.dir);
            let near_b = finish_hit(gi, Side::Right, &near_line, &gh.dir);
            if let (Some(a), Some(b)) = (near_a, near_b) {
                trims[host].finish_connectors.push((a, b));
            }
        }
    }
}

/// Trims the incoming wall's two finish lines to a host line and returns
/// the two intersection points.
///
/// Unlike the main-edge trim, finish trims may lengthen the incoming
/// wall: at an interior host the finish lines run through the stud
/// cavity to the far finish line.
fn trim_incoming_finish(
    gi: &WallGeometry,
    trims: &mut [TrimRecord],
    incoming: usize,
    incoming_end: WallEnd,
    host_base: &Point2,
    host_dir: &Vector2,
) -> (Option<Point2>, Option<Point2>) {
    let mut hits = (None, None);
    for side in Side::BOTH {
        let Some(p) = finish_hit(gi, side, host_base, host_dir) else {
            continue;
        };
        trims[incoming].finish.set(incoming_end, side, p);
        match side {
            Side::Left => hits.0 = Some(p),
            Side::Right => hits.1 = Some(p),
        }
    }
    hits
}

/// Intersection of one of `gi`'s finish lines with a host line.
fn finish_hit(
    gi: &WallGeometry,
    side: Side,
    host_base: &Point2,
    host_dir: &Vector2,
) -> Option<Point2> {
    let base = gi.finish_base(side)?;
    line_line_point_2d(&base, &gi.dir, host_base, host_dir)
}

/// Records a gap in one of the host's line lists, parametrized along that
/// line from its own start, clamped to the host span.
pub(crate) fn push_gap(
    gaps: &mut Vec<Gap>,
    gh: &WallGeometry,
    offset: f64,
    a: &Point2,
    b: &Point2,
) {
    let base = gh.start + gh.perp * offset;
    let ta = param_along(a, &base, &gh.dir);
    let tb = param_along(b, &base, &gh.dir);
    let (mut t0, mut t1) = if ta <= tb { (ta, tb) } else { (tb, ta) };
    t0 = t0.clamp(0.0, gh.len);
    t1 = t1.clamp(0.0, gh.len);
    if t1 - t0 < crate::math::TOLERANCE {
        return;
    }
    gaps.push(Gap {
        start: point_at(&base, &gh.dir, t0),
        end: point_at(&base, &gh.dir, t1),
        t0,
        t1,
    });
}
