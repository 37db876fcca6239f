use slotmap::SecondaryMap;

use crate::math::Point2;
use crate::model::WallId;

/// Side of a wall relative to its direction vector (`Left` = +perp).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides, in left-right order.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// One of a wall's two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallEnd {
    Start,
    End,
}

impl WallEnd {
    /// Both ends, in start-end order.
    pub const BOTH: [Self; 2] = [Self::Start, Self::End];

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// An interval removed from a wall's edge or finish line where another
/// wall enters.
///
/// `t0`/`t1` are signed distances along the owning line from that line's
/// start point, with `t0 <= t1`; `start`/`end` are the corresponding
/// points on the line.
#[derive(Debug, Clone, PartialEq)]
pub struct Gap {
    pub start: Point2,
    pub end: Point2,
    pub t0: f64,
    pub t1: f64,
}

/// Trim override points for the four endpoint/side combinations of one
/// line family (main edges or finish lines).
///
/// `None` means "untrimmed" — the consumer falls back to the natural
/// corner point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointTrims {
    pub start_left: Option<Point2>,
    pub start_right: Option<Point2>,
    pub end_left: Option<Point2>,
    pub end_right: Option<Point2>,
}

impl EndpointTrims {
    #[must_use]
    pub fn get(&self, end: WallEnd, side: Side) -> Option<Point2> {
        match (end, side) {
            (WallEnd::Start, Side::Left) => self.start_left,
            (WallEnd::Start, Side::Right) => self.start_right,
            (WallEnd::End, Side::Left) => self.end_left,
            (WallEnd::End, Side::Right) => self.end_right,
        }
    }

    pub fn set(&mut self, end: WallEnd, side: Side, point: Point2) {
        let slot = match (end, side) {
            (WallEnd::Start, Side::Left) => &mut self.start_left,
            (WallEnd::Start, Side::Right) => &mut self.start_right,
            (WallEnd::End, Side::Left) => &mut self.end_left,
            (WallEnd::End, Side::Right) => &mut self.end_right,
        };
        *slot = Some(point);
    }
}

/// Per-wall accumulator of junction resolution results.
///
/// Rebuilt from scratch on every engine invocation; gap lists are sorted
/// by `t0` before the record is handed out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrimRecord {
    /// Main-edge trim overrides.
    pub edge: EndpointTrims,
    /// Finish-line trim overrides.
    pub finish: EndpointTrims,
    pub left_edge_gaps: Vec<Gap>,
    pub right_edge_gaps: Vec<Gap>,
    pub left_finish_gaps: Vec<Gap>,
    pub right_finish_gaps: Vec<Gap>,
    /// Suppresses the start end cap (a T-junction lands there).
    pub start_has_t: bool,
    /// Suppresses the end end cap.
    pub end_has_t: bool,
    /// Short segments closing interior-T finish-line openings on this wall.
    pub finish_connectors: Vec<(Point2, Point2)>,
}

impl TrimRecord {
    #[must_use]
    pub fn edge_gaps(&self, side: Side) -> &[Gap] {
        match side {
            Side::Left => &self.left_edge_gaps,
            Side::Right => &self.right_edge_gaps,
        }
    }

    pub fn edge_gaps_mut(&mut self, side: Side) -> &mut Vec<Gap> {
        match side {
            Side::Left => &mut self.left_edge_gaps,
            Side::Right => &mut self.right_edge_gaps,
        }
    }

    #[must_use]
    pub fn finish_gaps(&self, side: Side) -> &[Gap] {
        match side {
            Side::Left => &self.left_finish_gaps,
            Side::Right => &self.right_finish_gaps,
        }
    }

    pub fn finish_gaps_mut(&mut self, side: Side) -> &mut Vec<Gap> {
        match side {
            Side::Left => &mut self.left_finish_gaps,
            Side::Right => &mut self.right_finish_gaps,
        }
    }

    #[must_use]
    pub fn has_t(&self, end: WallEnd) -> bool {
        match end {
            WallEnd::Start => self.start_has_t,
            WallEnd::End => self.end_has_t,
        }
    }

    pub fn set_has_t(&mut self, end: WallEnd) {
        match end {
            WallEnd::Start => self.start_has_t = true,
            WallEnd::End => self.end_has_t = true,
        }
    }
}

/// Output of one engine invocation: per-wall trim records, keyed by the
/// external wall ID. Walls with degenerate geometry have no entry.
pub type TrimMap = SecondaryMap<WallId, TrimRecord>;
