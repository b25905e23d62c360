/// Convenience result type used across the scene graph.
pub type SceneResult<T> = Result<T, SceneError>;

/// Top-level error taxonomy used by scene, layout and surface APIs.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Text layout was attempted without the state it needs (e.g. no font on the surface).
    #[error("layout error: {0}")]
    Layout(String),

    /// A dynamic text producer failed while resolving its run.
    #[error("text producer failed: {0}")]
    Producer(#[source] anyhow::Error),

    /// Drawing surface failures (raster setup, font loading, image export).
    #[error("surface error: {0}")]
    Surface(String),

    /// Invalid configuration values.
    #[error("config error: {0}")]
    Config(String),

    /// Data provider failures (IO, malformed payloads, dangling references).
    #[error("data error: {0}")]
    Data(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`SceneError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`SceneError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`SceneError::Data`] value.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
