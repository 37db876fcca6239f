pub mod error;
pub mod math;
pub mod model;
pub mod render;
pub mod resolve;

pub use error::{Result, WalljointError};
