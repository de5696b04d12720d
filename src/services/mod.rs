//! Business operations invoked by the route handlers.

use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod leads;
pub mod main;
pub mod orders;
pub mod sync;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("form error: {0}")]
    Form(#[from] FormError),

    /// The record to update is not part of the last loaded collection.
    #[error("record not found")]
    NotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
