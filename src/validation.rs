use crate::error::AppError;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::{self, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A JSON body whose parse failure is handed to the route instead of the
/// framework, so malformed input maps to 400 after the API key check.
pub type JsonBody<'r, T> = Result<Json<T>, json::Error<'r>>;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ValidationResponse {
    pub status: String,
    pub errors: HashMap<String, Vec<String>>,
}

impl ValidationResponse {
    pub fn new(errors: HashMap<String, Vec<String>>) -> Self {
        Self {
            status: "error".to_string(),
            errors,
        }
    }

    pub fn with_error(field: &str, message: &str) -> Self {
        let mut errors = HashMap::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        Self::new(errors)
    }
}

pub trait ToValidationResponse {
    fn to_validation_response(self) -> Custom<Json<ValidationResponse>>;
}

impl ToValidationResponse for Status {
    #[instrument]
    fn to_validation_response(self) -> Custom<Json<ValidationResponse>> {
        let (field, message) = match self.code {
            401 => ("authentication", "Authentication required"),
            404 => ("route", "No such route"),
            400 => ("request", "Bad request"),
            422 => ("request", "Request could not be processed"),
            500 => ("server", "Internal server error"),
            _ => ("error", "An error occurred"),
        };

        Custom(self, Json(ValidationResponse::with_error(field, message)))
    }
}

pub trait JsonValidateExt<T> {
    /// Unwraps the parsed body, rejecting malformed JSON.
    fn parsed(self) -> Result<T, AppError>;

    /// Unwraps the parsed body and runs its field validators.
    fn validated(self) -> Result<T, AppError>
    where
        T: Validate;
}

impl<T> JsonValidateExt<T> for JsonBody<'_, T> {
    fn parsed(self) -> Result<T, AppError> {
        match self {
            Ok(body) => Ok(body.into_inner()),
            Err(err) => Err(AppError::Validation(format!(
                "Malformed request body: {}",
                err
            ))),
        }
    }

    fn validated(self) -> Result<T, AppError>
    where
        T: Validate,
    {
        let body = self.parsed()?;
        body.validate()?;
        Ok(body)
    }
}

pub fn validate_identifier(value: &str) -> Result<(), ValidationError> {
    match Uuid::parse_str(value) {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("identifier")
            .with_message("must be a valid identifier".into())),
    }
}

/// Checks an identifier taken from the request path.
pub fn require_identifier(field: &str, value: &str) -> Result<(), AppError> {
    validate_identifier(value)
        .map_err(|_| AppError::Validation(format!("{}: must be a valid identifier", field)))
}
