/// Convenience result type used across rotomask.
pub type RotoResult<T> = Result<T, RotoError>;

/// Top-level error taxonomy used by the public render entry points.
#[derive(thiserror::Error, Debug)]
pub enum RotoError {
    /// Malformed model data: bad keyframes, missing control points, bad component counts.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while sampling or rendering a shape.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// The raster surface or its drawing context could not be allocated.
    #[error("surface error: {0}")]
    Surface(String),

    /// Errors when serializing or deserializing render jobs.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RotoError {
    /// Build a [`RotoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RotoError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`RotoError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`RotoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for RotoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
