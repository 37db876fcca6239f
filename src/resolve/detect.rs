use crate::math::distance_2d::project_on_segment;
use crate::math::intersect_2d::line_line_intersect_2d;
use crate::math::Point2;
use crate::resolve::geometry::WallGeometry;
use crate::resolve::record::WallEnd;

/// Empirically tuned tolerance constants for junction detection and trim
/// resolution.
///
/// These have no closed-form derivation; the defaults are validated
/// against the corner/tee/cross scenarios in the `resolve` test suite.
#[derive(Debug, Clone)]
pub struct Tolerances {
    /// Minimum endpoint-merge distance for corner detection (drawing units).
    pub corner_floor: f64,
    /// Margin added to the larger half-thickness for corner detection.
    pub corner_margin: f64,
    /// Fraction of the host span excluded near each end for T-junctions.
    /// The boundary value itself does not classify.
    pub tee_exclusion: f64,
    /// Minimum perpendicular-distance tolerance for T-junction detection.
    pub tee_distance_floor: f64,
    /// Fraction of either span excluded near each end for crossings.
    pub cross_exclusion: f64,
    /// Miter points farther than this factor times the larger
    /// half-thickness from the corner are discarded.
    pub miter_guard_factor: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            corner_floor: 40.0,
            corner_margin: 10.0,
            tee_exclusion: 0.02,
            tee_distance_floor: 40.0,
            cross_exclusion: 0.05,
            miter_guard_factor: 8.0,
        }
    }
}

/// A detected pairwise wall relationship, addressed by arena index.
#[derive(Debug, Clone, Copy)]
pub enum Junction {
    /// Two endpoints coincide within tolerance.
    Corner {
        a: usize,
        b: usize,
        end_a: WallEnd,
        end_b: WallEnd,
        /// Midpoint of the two (possibly non-identical) endpoints.
        point: Point2,
    },
    /// `incoming`'s endpoint terminates against `host`'s body.
    Tee {
        host: usize,
        incoming: usize,
        incoming_end: WallEnd,
        /// Normalized projection parameter on the host span.
        host_t: f64,
    },
    /// The two bodies cross strictly mid-span on both walls.
    Cross {
        a: usize,
        b: usize,
        /// Normalized crossing parameters.
        t_a: f64,
        t_b: f64,
    },
}

/// Pairwise-compares all walls and classifies their relationships.
///
/// A pair may yield several junctions (one per matching endpoint
/// combination); each is resolved independently.
#[must_use]
pub fn detect(geoms: &[WallGeometry], tol: &Tolerances) -> Vec<Junction> {
    let mut junctions = Vec::new();

    for i in 0..geoms.len() {
        for j in (i + 1)..geoms.len() {
            detect_pair(geoms, i, j, tol, &mut junctions);
        }
    }

    junctions
}

fn detect_pair(
    geoms: &[WallGeometry],
    i: usize,
    j: usize,
    tol: &Tolerances,
    out: &mut Vec<Junction>,
) {
    let a = &geoms[i];
    let b = &geoms[j];

    // L-corner: any of the four endpoint combinations within tolerance.
    let corner_tol = (a.half.max(b.half) + tol.corner_margin).max(tol.corner_floor);
    for end_a in WallEnd::BOTH {
        for end_b in WallEnd::BOTH {
            let pa = a.endpoint(end_a);
            let pb = b.endpoint(end_b);
            if (pa - pb).norm() <= corner_tol {
                let point = nalgebra::center(&pa, &pb);
                tracing::debug!(
                    a = i,
                    b = j,
                    ?end_a,
                    ?end_b,
                    x = point.x,
                    y = point.y,
                    "corner junction"
                );
                out.push(Junction::Corner {
                    a: i,
                    b: j,
                    end_a,
                    end_b,
                    point,
                });
            }
        }
    }

    // T-junction: either wall's endpoint against the other's body.
    let tee_tol = (a.half + b.half).max(tol.tee_distance_floor);
    for (host, incoming) in [(i, j), (j, i)] {
        for incoming_end in WallEnd::BOTH {
            let h = &geoms[host];
            let p = geoms[incoming].endpoint(incoming_end);
            let (t, dist) = project_on_segment(&p, &h.start, &h.end);
            if t > tol.tee_exclusion && t < 1.0 - tol.tee_exclusion && dist <= tee_tol {
                tracing::debug!(host, incoming, ?incoming_end, host_t = t, "tee junction");
                out.push(Junction::Tee {
                    host,
                    incoming,
                    incoming_end,
                    host_t: t,
                });
            }
        }
    }

    // Cross: infinite centerlines intersect strictly inside both spans.
    if let Some((ta, tb)) = line_line_intersect_2d(&a.start, &a.dir, &b.start, &b.dir) {
        let t_a = ta / a.len;
        let t_b = tb / b.len;
        let lo = tol.cross_exclusion;
        let hi = 1.0 - tol.cross_exclusion;
        if t_a > lo && t_a < hi && t_b > lo && t_b < hi {
            tracing::debug!(a = i, b = j, t_a, t_b, "cross junction");
            out.push(Junction::Cross { a: i, b: j, t_a, t_b });
        }
    }
}
