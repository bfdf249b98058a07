//! Error types for scene construction

use thiserror::Error;

/// Errors that can occur while building a scene
///
/// Only conditions that prevent a consistent scene from existing are errors.
/// Recoverable situations (unknown drone target, unreachable room, degenerate
/// cell fan) are logged and the scene is still produced.
#[derive(Debug, Clone, Error)]
pub enum SceneError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Scene description is unusable (bad window, duplicate names, non-finite positions)
    #[error("invalid scene: {0}")]
    InvalidScene(String),
    /// The triangulation backend rejected the server positions
    #[error("triangulation failed: {0}")]
    TriangulationFailed(String),
    /// Requested server ID does not exist
    #[error("server not found: {0}")]
    ServerNotFound(usize),
}

/// Result type alias for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;
