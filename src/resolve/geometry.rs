use crate::math::distance_2d::param_along;
use crate::math::intersect_2d::point_at;
use crate::math::{perp_left, Point2, Vector2, TOLERANCE};
use crate::model::{LayerFunction, Wall, WallClass, WallId, WallTypeConfig};
use crate::resolve::record::{Side, WallEnd};

/// Signed finish-line offsets from the centerline, along `perp`.
///
/// The left finish line sits at `+left` × perp, the right at `+right`
/// (so `right` is negative). Exterior walls are asymmetric: the siding
/// boundary on the outside, the drywall boundary on the inside. Interior
/// walls are symmetric drywall boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinishOffsets {
    pub left: f64,
    pub right: f64,
}

/// Derived local frame of a wall, one per wall per computation.
///
/// Pure function of `(Wall, WallTypeConfig)`; never persisted.
#[derive(Debug, Clone)]
pub struct WallGeometry {
    pub id: WallId,
    pub start: Point2,
    pub end: Point2,
    /// Unit direction start → end.
    pub dir: Vector2,
    /// Unit left normal of `dir`.
    pub perp: Vector2,
    pub len: f64,
    pub half: f64,
    pub class: WallClass,
    pub start_left: Point2,
    pub start_right: Point2,
    pub end_left: Point2,
    pub end_right: Point2,
    /// `None` when the layer stack has no locatable finish layers.
    pub finish: Option<FinishOffsets>,
    /// Side carrying the siding face; `Some` only for exterior walls.
    pub siding_side: Option<Side>,
}

/// Builds the local frame for one wall, or `None` for a zero-length wall.
#[must_use]
pub fn build(id: WallId, wall: &Wall, config: &WallTypeConfig) -> Option<WallGeometry> {
    let chord = wall.end - wall.start;
    let len = chord.norm();
    if len < TOLERANCE {
        tracing::trace!(?id, "skipping zero-length wall");
        return None;
    }

    let dir = chord / len;
    let perp = perp_left(&dir);
    let thickness = wall.thickness.unwrap_or(config.thickness);
    let half = thickness / 2.0;

    let mut finish = finish_offsets(config, thickness, half);
    let mut siding_side = match config.class {
        WallClass::Exterior => Some(Side::Right),
        WallClass::Interior => None,
    };

    // Flip mirrors the layer stack across the centerline.
    if wall.flipped {
        if let Some(f) = finish {
            finish = Some(FinishOffsets {
                left: -f.right,
                right: -f.left,
            });
        }
        siding_side = siding_side.map(Side::opposite);
    }

    Some(WallGeometry {
        id,
        start: wall.start,
        end: wall.end,
        dir,
        perp,
        len,
        half,
        class: config.class,
        start_left: wall.start + perp * half,
        start_right: wall.start - perp * half,
        end_left: wall.end + perp * half,
        end_right: wall.end - perp * half,
        finish,
        siding_side,
    })
}

/// Walks the layer stack to locate the finish-line offsets.
///
/// `layers[0]` is the right-side (−perp) face of an unflipped wall.
/// Exterior: right offset at the inner boundary of the leading siding
/// layers, left offset at the outer boundary of the trailing drywall.
/// Interior: drywall boundaries from both faces.
fn finish_offsets(config: &WallTypeConfig, thickness: f64, half: f64) -> Option<FinishOffsets> {
    let abs = config.layer_thicknesses(thickness);

    let leading = |function: LayerFunction| -> f64 {
        config
            .layers
            .iter()
            .zip(&abs)
            .take_while(|(l, _)| l.function == function)
            .map(|(_, t)| t)
            .sum()
    };
    let trailing = |function: LayerFunction| -> f64 {
        config
            .layers
            .iter()
            .zip(&abs)
            .rev()
            .take_while(|(l, _)| l.function == function)
            .map(|(_, t)| t)
            .sum()
    };

    let (right_depth, left_depth) = match config.class {
        WallClass::Exterior => (leading(LayerFunction::Siding), trailing(LayerFunction::Drywall)),
        WallClass::Interior => (leading(LayerFunction::Drywall), trailing(LayerFunction::Drywall)),
    };

    if right_depth <= 0.0 || left_depth <= 0.0 {
        return None;
    }

    Some(FinishOffsets {
        left: half - left_depth,
        right: -half + right_depth,
    })
}

impl WallGeometry {
    #[must_use]
    pub fn endpoint(&self, end: WallEnd) -> Point2 {
        match end {
            WallEnd::Start => self.start,
            WallEnd::End => self.end,
        }
    }

    /// Signed offset of the given main edge from the centerline.
    #[must_use]
    pub fn edge_offset(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.half,
            Side::Right => -self.half,
        }
    }

    /// Start point of the given edge line (the line's own origin for gap
    /// parametrization).
    #[must_use]
    pub fn edge_base(&self, side: Side) -> Point2 {
        self.start + self.perp * self.edge_offset(side)
    }

    /// Natural (untrimmed) corner point.
    #[must_use]
    pub fn corner(&self, end: WallEnd, side: Side) -> Point2 {
        match (end, side) {
            (WallEnd::Start, Side::Left) => self.start_left,
            (WallEnd::Start, Side::Right) => self.start_right,
            (WallEnd::End, Side::Left) => self.end_left,
            (WallEnd::End, Side::Right) => self.end_right,
        }
    }

    /// Signed offset of the given finish line, if the wall has one.
    #[must_use]
    pub fn finish_offset(&self, side: Side) -> Option<f64> {
        self.finish.map(|f| match side {
            Side::Left => f.left,
            Side::Right => f.right,
        })
    }

    /// Start point of the given finish line.
    #[must_use]
    pub fn finish_base(&self, side: Side) -> Option<Point2> {
        self.finish_offset(side)
            .map(|offset| self.start + self.perp * offset)
    }

    /// Side opposite the siding face — the drywall face of an exterior wall.
    #[must_use]
    pub fn drywall_side(&self) -> Option<Side> {
        self.siding_side.map(Side::opposite)
    }

    /// Parameter of `p` along this wall's direction, measured from `start`.
    ///
    /// Edge and finish lines share this parametrization since they are all
    /// parallel to the centerline.
    #[must_use]
    pub fn param_of(&self, p: &Point2) -> f64 {
        param_along(p, &self.start, &self.dir)
    }

    /// Point on the line parallel to the centerline at `offset`, at
    /// parameter `t` from that line's start.
    #[must_use]
    pub fn point_on_offset_line(&self, offset: f64, t: f64) -> Point2 {
        let base = self.start + self.perp * offset;
        point_at(&base, &self.dir, t)
    }
}
