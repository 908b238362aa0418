// ABOUTME: Service-layer error taxonomy
// ABOUTME: Authorization, not-found, validation, state-transition, conflict and persistence failures

use thiserror::Error;

use scrumline_board::BoardError;
use scrumline_core::{Actor, ValidationError};
use scrumline_storage::StorageError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unauthorized: {0}")]
    Authorization(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Validation errors: {0:?}")]
    Validation(Vec<ValidationError>),
    #[error("{0}")]
    StateTransition(String),
    #[error("{0}")]
    Board(#[from] BoardError),
    #[error("{0} already exists")]
    Conflict(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Translates a storage error into the domain taxonomy, naming the entity
/// that was being looked up.
pub(crate) fn entity_lookup(err: StorageError, entity: &'static str) -> DomainError {
    match err {
        StorageError::NotFound => DomainError::NotFound(entity),
        other => DomainError::Storage(other),
    }
}

/// Rejects access to a resource owned by another organization.
pub(crate) fn ensure_org_access(actor: &Actor, organization_id: &str) -> DomainResult<()> {
    if actor.organization_id == organization_id {
        Ok(())
    } else {
        Err(DomainError::Authorization(
            "Resource belongs to another organization".to_string(),
        ))
    }
}

/// Fails with a validation error unless `errors` is empty.
pub(crate) fn ensure_valid(errors: Vec<ValidationError>) -> DomainResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}
