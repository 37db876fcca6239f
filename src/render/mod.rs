//! Consumer-side helpers that turn a [`TrimRecord`] into drawable
//! linework. No drawing happens here; output is points and sub-segments
//! for an external canvas layer.

use crate::math::intersect_2d::point_at;
use crate::math::Point2;
use crate::resolve::{Gap, Side, TrimRecord, WallEnd, WallGeometry};

/// The wall's fill polygon: the four corner points with trim overrides
/// applied, in draw order (start-left, end-left, end-right, start-right).
#[must_use]
pub fn fill_corners(geom: &WallGeometry, trim: &TrimRecord) -> [Point2; 4] {
    let corner = |end: WallEnd, side: Side| {
        trim.edge
            .get(end, side)
            .unwrap_or_else(|| geom.corner(end, side))
    };
    [
        corner(WallEnd::Start, Side::Left),
        corner(WallEnd::End, Side::Left),
        corner(WallEnd::End, Side::Right),
        corner(WallEnd::Start, Side::Right),
    ]
}

/// Stroked sub-segments of one main edge, skipping its sorted gaps.
#[must_use]
pub fn edge_strokes(geom: &WallGeometry, trim: &TrimRecord, side: Side) -> Vec<(Point2, Point2)> {
    let offset = geom.edge_offset(side);
    let t_start = trim
        .edge
        .get(WallEnd::Start, side)
        .map_or(0.0, |p| geom.param_of(&p));
    let t_end = trim
        .edge
        .get(WallEnd::End, side)
        .map_or(geom.len, |p| geom.param_of(&p));
    strokes(geom, offset, t_start, t_end, trim.edge_gaps(side))
}

/// Stroked sub-segments of one finish line, or `None` if the wall has no
/// finish lines.
#[must_use]
pub fn finish_strokes(
    geom: &WallGeometry,
    trim: &TrimRecord,
    side: Side,
) -> Option<Vec<(Point2, Point2)>> {
    let offset = geom.finish_offset(side)?;
    let t_start = trim
        .finish
        .get(WallEnd::Start, side)
        .map_or(0.0, |p| geom.param_of(&p));
    let t_end = trim
        .finish
        .get(WallEnd::End, side)
        .map_or(geom.len, |p| geom.param_of(&p));
    Some(strokes(geom, offset, t_start, t_end, trim.finish_gaps(side)))
}

/// Perpendicular end caps, drawn only at ends with neither a trim
/// override nor a T-junction flag.
#[must_use]
pub fn end_caps(geom: &WallGeometry, trim: &TrimRecord) -> Vec<(Point2, Point2)> {
    let mut caps = Vec::new();
    for end in WallEnd::BOTH {
        let overridden = Side::BOTH
            .iter()
            .any(|&s| trim.edge.get(end, s).is_some());
        if overridden || trim.has_t(end) {
            continue;
        }
        caps.push((geom.corner(end, Side::Left), geom.corner(end, Side::Right)));
    }
    caps
}

/// Walks a sorted gap list, emitting draw intervals between `t_start` and
/// `t_end` along the offset line.
fn strokes(
    geom: &WallGeometry,
    offset: f64,
    t_start: f64,
    t_end: f64,
    gaps: &[Gap],
) -> Vec<(Point2, Point2)> {
    let base = geom.start + geom.perp * offset;
    let mut out = Vec::new();
    let mut cursor = t_start.min(t_end);
    let stop = t_start.max(t_end);

    for gap in gaps {
        if gap.t1 <= cursor {
            continue;
        }
        if gap.t0 >= stop {
            break;
        }
        if gap.t0 > cursor {
            out.push((point_at(&base, &geom.dir, cursor), point_at(&base, &geom.dir, gap.t0)));
        }
        cursor = cursor.max(gap.t1);
    }
    if cursor < stop {
        out.push((point_at(&base, &geom.dir, cursor), point_at(&base, &geom.dir, stop)));
    }
    out
}
