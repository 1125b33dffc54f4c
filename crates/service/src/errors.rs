use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A request argument is missing or has the wrong type. `message` is the
    /// argument's help text.
    #[error("invalid argument {field}: {message}")]
    Argument { field: &'static str, message: String },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} does not exist", entity)) }

    pub fn conflict(entity: &str) -> Self { Self::Conflict(format!("{} already exists", entity)) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            ModelError::Conflict(entity) => ServiceError::conflict(&entity),
            ModelError::NotFound(entity) => ServiceError::not_found(&entity),
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}
