//! Service error types

use errors::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("No scale defined: {0}")]
    ScaleUndefined(String),

    #[error("Invalid calibration: {0}")]
    InvalidCalibration(String),

    #[error("Invalid parent category: {0}")]
    InvalidParent(String),

    #[error("Category in use: {0}")]
    CategoryInUse(String),

    #[error("Category has children: {0}")]
    CategoryHasChildren(String),

    #[error("Invalid material: {0}")]
    InvalidMaterial(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Duplicate RFQ number: {0}")]
    DuplicateRfqNumber(String),

    #[error("Invalid status transition: {0}")]
    InvalidStatusTransition(String),

    #[error("Scope violation: {0}")]
    ScopeViolation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::ScaleUndefined(msg) => AppError::failed_precondition(msg),
            ServiceError::InvalidCalibration(msg) => AppError::validation(msg),
            ServiceError::InvalidParent(msg) => AppError::validation(msg),
            ServiceError::CategoryInUse(msg) => AppError::conflict(msg),
            ServiceError::CategoryHasChildren(msg) => AppError::conflict(msg),
            ServiceError::InvalidMaterial(msg) => AppError::validation(msg),
            ServiceError::InvalidQuantity(msg) => AppError::validation(msg),
            ServiceError::DuplicateRfqNumber(msg) => AppError::conflict(msg),
            ServiceError::InvalidStatusTransition(msg) => AppError::conflict(msg),
            ServiceError::ScopeViolation(msg) => AppError::forbidden(msg),
            ServiceError::NotFound(msg) => AppError::not_found(msg),
            ServiceError::Validation(msg) => AppError::validation(msg),
            ServiceError::Storage(e) => AppError::database(e.to_string()),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
