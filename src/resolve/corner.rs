use crate::math::intersect_2d::line_line_point_2d;
use crate::math::{cross_2d, Point2};
use crate::model::WallClass;
use crate::resolve::detect::Tolerances;
use crate::resolve::geometry::WallGeometry;
use crate::resolve::record::{Side, TrimRecord, WallEnd};

/// Resolves an L-corner between walls `a` and `b` whose `end_a`/`end_b`
/// endpoints coincide at `point`.
///
/// Same-class corners miter both matching edge pairs; mixed corners keep
/// the exterior wall's siding edge unbroken and butt the interior wall
/// against the exterior drywall face. Finish lines are mitered with the
/// same pairing on the finish-offset lines.
#[allow(clippy::too_many_arguments)]
pub fn resolve(
    geoms: &[WallGeometry],
    trims: &mut [TrimRecord],
    a: usize,
    b: usize,
    end_a: WallEnd,
    end_b: WallEnd,
    point: Point2,
    tol: &Tolerances,
) {
    let ga = &geoms[a];
    let gb = &geoms[b];

    // Direction of each wall pointing away from the shared corner.
    let away_a = if end_a == WallEnd::Start { ga.dir } else { -ga.dir };
    let away_b = if end_b == WallEnd::Start { gb.dir } else { -gb.dir };
    let turn = cross_2d(&away_a, &away_b);
    tracing::trace!(a, b, turn, "corner turn direction");

    let guard = tol.miter_guard_factor * ga.half.max(gb.half);

    if ga.class == gb.class {
        same_class(geoms, trims, a, b, end_a, end_b, &point, guard);
    } else {
        // Exterior wall first; roles are otherwise symmetric.
        let (e, end_e, i, end_i) = if ga.class == WallClass::Exterior {
            (a, end_a, b, end_b)
        } else {
            (b, end_b, a, end_a)
        };
        mixed_class(geoms, trims, e, end_e, i, end_i, &point, guard);
    }
}

/// Maps a shared-corner "chain side" to a wall's own side.
///
/// Treating the corner as a head-to-tail chain (first wall ends at the
/// corner, second starts there), a wall entering through its `start` takes
/// the opposite side. This is what makes matching pairs line up for all
/// four endpoint combinations.
fn chain_side(end: WallEnd, natural_end: WallEnd, s: Side) -> Side {
    if end == natural_end {
        s
    } else {
        s.opposite()
    }
}

/// Both walls the same class: miter the two matching edge pairs, then the
/// matching finish pairs.
#[allow(clippy::too_many_arguments)]
fn same_class(
    geoms: &[WallGeometry],
    trims: &mut [TrimRecord],
    a: usize,
    b: usize,
    end_a: WallEnd,
    end_b: WallEnd,
    point: &Point2,
    guard: f64,
) {
    let ga = &geoms[a];
    let gb = &geoms[b];

    for s in Side::BOTH {
        let sa = chain_side(end_a, WallEnd::End, s);
        let sb = chain_side(end_b, WallEnd::Start, s);

        if let Some(p) = miter_point(
            &ga.edge_base(sa),
            ga,
            &gb.edge_base(sb),
            gb,
            point,
            guard,
        ) {
            trims[a].edge.set(end_a, sa, p);
            trims[b].edge.set(end_b, sb, p);
        }

        if let (Some(fa), Some(fb)) = (ga.finish_base(sa), gb.finish_base(sb)) {
            if let Some(p) = miter_point(&fa, ga, &fb, gb, point, guard) {
                trims[a].finish.set(end_a, sa, p);
                trims[b].finish.set(end_b, sb, p);
            }
        }
    }
}

/// One exterior, one interior: the exterior drywall edge miters against
/// the interior wall's matching edge; the siding edge continues straight;
/// the interior wall's both edges terminate on the exterior drywall line.
#[allow(clippy::too_many_arguments)]
fn mixed_class(
    geoms: &[WallGeometry],
    trims: &mut [TrimRecord],
    e: usize,
    end_e: WallEnd,
    i: usize,
    end_i: WallEnd,
    point: &Point2,
    guard: f64,
) {
    let ge = &geoms[e];
    let gi = &geoms[i];

    let Some(dry) = ge.drywall_side() else {
        return;
    };

    // The interior side that continues the drywall edge around the corner.
    let chain = chain_side(end_e, WallEnd::End, dry);
    let match_i = chain_side(end_i, WallEnd::Start, chain);

    if let Some(p) = miter_point(
        &ge.edge_base(dry),
        ge,
        &gi.edge_base(match_i),
        gi,
        point,
        guard,
    ) {
        trims[e].edge.set(end_e, dry, p);
    }

    // Interior wall butts against the exterior drywall edge line on both
    // sides, not against its own natural matching edges.
    for si in Side::BOTH {
        if let Some(p) = miter_point(
            &gi.edge_base(si),
            gi,
            &ge.edge_base(dry),
            ge,
            point,
            guard,
        ) {
            trims[i].edge.set(end_i, si, p);
        }
    }

    // Finish lines mirror the edge rule on the finish-offset lines.
    let (Some(fe), Some(_)) = (ge.finish_base(dry), gi.finish) else {
        return;
    };
    if let Some(fi) = gi.finish_base(match_i) {
        if let Some(p) = miter_point(&fe, ge, &fi, gi, point, guard) {
            trims[e].finish.set(end_e, dry, p);
        }
    }
    for si in Side::BOTH {
        if let Some(fi) = gi.finish_base(si) {
            if let Some(p) = miter_point(&fi, gi, &fe, ge, point, guard) {
                trims[i].finish.set(end_i, si, p);
            }
        }
    }
}

/// Intersection of two offset lines, rejected when parallel or farther
/// than the distance guard from the corner.
fn miter_point(
    base_a: &Point2,
    ga: &WallGeometry,
    base_b: &Point2,
    gb: &WallGeometry,
    corner: &Point2,
    guard: f64,
) -> Option<Point2> {
    let p = line_line_point_2d(base_a, &ga.dir, base_b, &gb.dir)?;
    if (p - corner).norm() > guard {
        tracing::trace!(x = p.x, y = p.y, guard, "miter point beyond distance guard");
        return None;
    }
    Some(p)
}
