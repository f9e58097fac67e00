use thiserror::Error;

/// Errors surfaced while building or driving a flow field.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The host supplied no paths at all.
    #[error("no source paths available")]
    NoPaths,

    /// A path reported a length that cannot be sampled.
    #[error("path {index} is invalid: {reason}")]
    InvalidPath {
        /// Registration index of the offending path.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A configuration value is out of its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A slice write addressed a track the buffer has no room for.
    #[error("track slice {track} out of range (buffer holds {tracks} tracks)")]
    SliceOutOfRange {
        /// Requested track index.
        track: usize,
        /// Number of track slices the buffer was built with.
        tracks: usize,
    },

    /// A slice write supplied the wrong number of particles.
    #[error("slice write needs {expected} particles, got {got}")]
    SliceLength {
        /// The buffer's window size.
        expected: usize,
        /// Particles supplied.
        got: usize,
    },

    /// SVG path data could not be parsed.
    #[error("path data for '{id}' is malformed: {message}")]
    PathData {
        /// Identifier of the path element.
        id: String,
        /// Parser message.
        message: String,
    },

    /// A JSON document or config failed to deserialize.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, FlowError>;
