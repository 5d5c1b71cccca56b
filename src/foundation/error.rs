use std::fmt;

/// Convenience result type used across mdslides.
pub type SlidesResult<T> = Result<T, SlidesError>;

/// Kind of entity an id refers to, used in [`SlidesError::NotFound`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    /// An image asset record.
    Asset,
    /// A section (slide) record.
    Section,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset => f.write_str("asset"),
            Self::Section => f.write_str("section"),
        }
    }
}

/// Top-level error taxonomy used by the document model, renderer and persistence layer.
#[derive(thiserror::Error, Debug)]
pub enum SlidesError {
    /// An operation referenced a section or asset id that is not live.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Store the id was looked up in.
        kind: EntityKind,
        /// Raw id value.
        id: u64,
    },

    /// Animation list index outside the current bounds.
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Current list length.
        len: usize,
    },

    /// Animation directive with a `type` the compositor does not know.
    #[error("unknown animation type \"{0}\"")]
    UnknownAnimationType(String),

    /// Rejected operation that would break a cross-store invariant.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Invalid user-provided numeric or structural input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing, deserializing or migrating snapshots.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Image payload could not be turned into asset content.
    #[error("ingest error: {0}")]
    Ingest(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlidesError {
    /// Build a [`SlidesError::NotFound`] for an asset id.
    pub fn asset_not_found(id: impl Into<u64>) -> Self {
        Self::NotFound {
            kind: EntityKind::Asset,
            id: id.into(),
        }
    }

    /// Build a [`SlidesError::NotFound`] for a section id.
    pub fn section_not_found(id: impl Into<u64>) -> Self {
        Self::NotFound {
            kind: EntityKind::Section,
            id: id.into(),
        }
    }

    /// Build a [`SlidesError::IndexOutOfRange`] value.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Build a [`SlidesError::InvariantViolation`] value.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Build a [`SlidesError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlidesError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`SlidesError::Ingest`] value.
    pub fn ingest(msg: impl Into<String>) -> Self {
        Self::Ingest(msg.into())
    }

    /// `true` for [`SlidesError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for SlidesError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
