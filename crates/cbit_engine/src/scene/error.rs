//! Scene errors

use std::path::PathBuf;

use thiserror::Error;

use crate::ecs::EcsError;

/// Errors raised while loading, saving or switching scenes
#[derive(Debug, Error)]
pub enum SceneError {
    /// Reading or writing a scene file failed
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The text is not valid JSON or does not match the scene schema
    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON with the wrong top-level shape
    #[error("Malformed scene document: {0}")]
    Malformed(String),

    /// An empty path was given
    #[error("Scene file path is empty")]
    EmptyPath,

    /// A scene file name has no usable stem
    #[error("Cannot derive a scene name from '{0}'")]
    InvalidFileName(String),

    /// No scene is registered under the name
    #[error("Scene '{0}' not found")]
    NotFound(String),

    /// A scene with that name is already registered
    #[error("Scene '{0}' already exists")]
    AlreadyExists(String),

    /// Entity bookkeeping failed while rebuilding a world
    #[error("Entity error: {0}")]
    Ecs(#[from] EcsError),

    /// Several scenes failed in one bulk operation
    #[error("{} scene operation(s) failed", .0.len())]
    Batch(Vec<(String, SceneError)>),
}

impl SceneError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
