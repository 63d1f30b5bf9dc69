/// Convenience result type used across gridfit.
pub type GridfitResult<T> = Result<T, GridfitError>;

/// Top-level error taxonomy used by layout APIs.
///
/// Every variant except [`GridfitError::Internal`] is raised at the API boundary, before the
/// packer tree or any result buffer is touched.
#[derive(thiserror::Error, Debug)]
pub enum GridfitError {
    /// Negative, NaN or infinite sizes, or a non-positive container width.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// An item is wider than the container and the oversize policy rejects it.
    #[error(
        "oversized item: item {index} is {width}px wide but the container is {container_width}px"
    )]
    OversizedItem {
        /// Position of the offending item in the input list.
        index: usize,
        /// Measured item width.
        width: f64,
        /// Container width the item was packed against.
        container_width: f64,
    },

    /// A layout name that does not match any [`crate::LayoutKind`].
    #[error("unknown layout: {0}")]
    UnknownLayout(String),

    /// Invalid user-provided grid document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// A packer invariant was broken. Always a defect.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapped lower-level errors (I/O with context, ...).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GridfitError {
    /// Build [`GridfitError::InvalidDimension`] from any string-like message.
    pub fn invalid_dimension(msg: impl Into<String>) -> Self {
        Self::InvalidDimension(msg.into())
    }

    /// Build [`GridfitError::UnknownLayout`] from any string-like name.
    pub fn unknown_layout(name: impl Into<String>) -> Self {
        Self::UnknownLayout(name.into())
    }

    /// Build [`GridfitError::Validation`] from any string-like message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build [`GridfitError::Serde`] from any string-like message.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build [`GridfitError::Internal`] from any string-like message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
