//! Error types for relation declarations
//!
//! Validation failures are detected before any model is touched. Failures
//! raised by the ORM collaborator are carried through untranslated.

use thiserror::Error;

/// Result type alias for declaration operations
pub type RelaxResult<T, E> = Result<T, RelaxError<E>>;

/// Error types for declaring a relation.
///
/// `E` is the error type of the ORM collaborator (see
/// [`AssociationModel::Error`](crate::model::AssociationModel::Error)).
#[derive(Debug, Error)]
pub enum RelaxError<E> {
    /// A required field is missing, or a many-to-many request has no through model
    #[error("Invalid relation request: {0}")]
    InvalidRequest(String),

    /// The relation tag is outside the closed set of relation kinds
    #[error("Unknown relation type: {0}")]
    UnknownRelationKind(String),

    /// A manifest entry names a model the caller did not provide
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// Failure raised by the ORM's registration call, propagated verbatim
    #[error(transparent)]
    Collaborator(E),
}

impl<E> RelaxError<E> {
    /// Create an invalid request error
    pub fn invalid_request<T: ToString>(msg: T) -> Self {
        Self::InvalidRequest(msg.to_string())
    }

    /// Returns true if the error was detected before any registration call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_) | Self::UnknownRelationKind(_) | Self::UnknownModel(_)
        )
    }

    /// Get the collaborator's own error, if that is what failed
    pub fn collaborator(&self) -> Option<&E> {
        match self {
            Self::Collaborator(err) => Some(err),
            _ => None,
        }
    }

    /// Take the collaborator's own error, if that is what failed
    pub fn into_collaborator(self) -> Option<E> {
        match self {
            Self::Collaborator(err) => Some(err),
            _ => None,
        }
    }
}

impl<E> From<ParseRelationKindError> for RelaxError<E> {
    fn from(err: ParseRelationKindError) -> Self {
        Self::UnknownRelationKind(err.0)
    }
}

/// Raised when a relation tag does not name a known relation kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown relation type: {0}")]
pub struct ParseRelationKindError(pub String);

/// Error types for the in-memory ORM adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// The owning model already has an association under this name
    #[error("Association '{name}' is already defined on model '{model}'")]
    DuplicateAssociation { model: String, name: String },

    /// Neither a declared nor a pluralized name is available for the model
    #[error("Model has no resolvable name")]
    UnnamedModel,
}
