use crate::model::figure::KindTag;

/// Convenience result type used across figura.
pub type FiguraResult<T> = Result<T, FiguraError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum FiguraError {
    /// Merge of two figures of different kinds without the replace-kind bit.
    #[error("kind mismatch: cannot merge {over:?} over {root:?} without replace_kind")]
    KindMismatch {
        /// Kind of the root figure.
        root: KindTag,
        /// Kind of the override figure.
        over: KindTag,
    },

    /// A record is structurally incomplete (construction bug).
    #[error("structure error: {0}")]
    Structure(String),

    /// Invalid parameters handed to an operator.
    #[error("validation error: {0}")]
    Validation(String),

    /// Runtime rendering invariant violated.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped error from an external collaborator.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FiguraError {
    /// Build a [`FiguraError::Structure`] value.
    pub fn structure(msg: impl Into<String>) -> Self {
        Self::Structure(msg.into())
    }

    /// Build a [`FiguraError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FiguraError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
