use crate::math::Point2;
use crate::model::wall_type::WallTypeId;

slotmap::new_key_type! {
    /// Unique identifier for a wall in the floor-plan store.
    pub struct WallId;
}

/// A wall segment as stored by the floor-plan model.
///
/// Walls are owned and mutated externally; the junction engine reads them
/// and derives ephemeral geometry per computation.
#[derive(Debug, Clone)]
pub struct Wall {
    /// Centerline start point.
    pub start: Point2,
    /// Centerline end point.
    pub end: Point2,
    /// Wall-type configuration this wall is built from.
    pub wall_type: WallTypeId,
    /// Mirrors the layer stack across the centerline.
    pub flipped: bool,
    /// Overrides the wall type's total thickness when set.
    pub thickness: Option<f64>,
}

impl Wall {
    /// Creates an unflipped wall with no thickness override.
    #[must_use]
    pub fn new(start: Point2, end: Point2, wall_type: WallTypeId) -> Self {
        Self {
            start,
            end,
            wall_type,
            flipped: false,
            thickness: None,
        }
    }
}
