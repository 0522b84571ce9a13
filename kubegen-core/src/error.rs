use thiserror::Error;

use crate::types::ResourceKind;

pub type Result<T, E = GenerateError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// None of the request's resource slots is populated.
    #[error("No valid Kubernetes object provided")]
    NoResource,

    /// More than one slot is populated and the caller asked for exclusivity.
    #[error("request populates more than one resource kind: {}", kind_list(.kinds))]
    AmbiguousRequest { kinds: Vec<ResourceKind> },

    /// The payload does not have the shape its declared type requires.
    #[error("invalid data for {kind}: {message}")]
    DataShape { kind: ResourceKind, message: String },

    /// An enumerated field holds a value outside the recognized set.
    #[error("unsupported {field} '{value}'")]
    UnsupportedType { field: &'static str, value: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),
}

impl GenerateError {
    /// Errors caused by what the caller sent rather than by generation itself.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GenerateError::NoResource | GenerateError::AmbiguousRequest { .. }
        )
    }

    pub(crate) fn data_shape(kind: ResourceKind, message: impl Into<String>) -> Self {
        GenerateError::DataShape {
            kind,
            message: message.into(),
        }
    }
}

fn kind_list(kinds: &[ResourceKind]) -> String {
    kinds
        .iter()
        .map(|k| k.key())
        .collect::<Vec<_>>()
        .join(", ")
}
