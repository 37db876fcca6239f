pub mod wall;
pub mod wall_type;

pub use wall::{Wall, WallId};
pub use wall_type::{
    LayerFunction, LayerPattern, StudSpec, WallClass, WallLayer, WallTypeConfig, WallTypeId,
    WallTypeRegistry,
};
