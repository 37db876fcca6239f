use thiserror::Error;

/// Top-level error type for the walljoint engine.
#[derive(Debug, Error)]
pub enum WalljointError {
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Errors in the wall / wall-type data model.
///
/// Malformed *geometry* never errors — it degrades to "untrimmed"
/// (zero-length walls are skipped, unstable miters are discarded).
/// These variants cover model-integrity failures only.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("wall references an unknown wall type")]
    UnknownWallType,

    #[error("wall type {name:?} has an empty layer stack")]
    EmptyLayerStack { name: String },

    #[error("wall type {name:?} has non-positive thickness {thickness}")]
    NonPositiveThickness { name: String, thickness: f64 },
}

/// Convenience type alias for results using [`WalljointError`].
pub type Result<T> = std::result::Result<T, WalljointError>;
