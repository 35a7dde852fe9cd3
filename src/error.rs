use opentelemetry_semantic_conventions::{attribute::OTEL_STATUS_CODE, trace::ERROR_TYPE};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use thiserror::Error;
use tracing::{Span, error, warn};

use crate::validation::ValidationResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The row addressed by the request does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A row referenced from the request body does not exist.
    #[error("Missing reference: {0}")]
    MissingReference(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn log_and_record(&self, ctx: &str) {
        let current_span = Span::current();
        let is_valid_span = !current_span.is_none();

        let message = self.to_string();
        let error_kind = match self {
            AppError::Database(err) => {
                error!(error = %message, context = %ctx, db_error = %err, "Database error");
                "database_error"
            }
            AppError::Authentication(msg) => {
                warn!(message = %msg, context = %ctx, "Authentication error");
                "authentication_error"
            }
            AppError::Validation(msg) => {
                warn!(message = %msg, context = %ctx, "Validation error");
                "validation_error"
            }
            AppError::NotFound(msg) => {
                warn!(message = %msg, context = %ctx, "Not found error");
                "not_found_error"
            }
            AppError::MissingReference(msg) => {
                warn!(message = %msg, context = %ctx, "Missing reference error");
                "missing_reference_error"
            }
            AppError::Conflict(msg) => {
                warn!(message = %msg, context = %ctx, "Conflict error");
                "conflict_error"
            }
            AppError::Internal(msg) => {
                error!(message = %msg, context = %ctx, "Internal server error");
                "internal_error"
            }
        };

        if is_valid_span {
            current_span.record("error", tracing::field::display(true));
            current_span.record(ERROR_TYPE, tracing::field::display(error_kind));
            current_span.record("error.message", tracing::field::display(&message));

            if let AppError::Database(_) | AppError::Internal(_) = self {
                current_span.record(OTEL_STATUS_CODE, tracing::field::display("ERROR"));
            }
        }
    }

    pub fn status_code(&self) -> Status {
        match self {
            AppError::Database(_) => Status::InternalServerError,
            AppError::Authentication(_) => Status::Unauthorized,
            AppError::Validation(_) => Status::BadRequest,
            AppError::NotFound(_) => Status::RangeNotSatisfiable,
            AppError::MissingReference(_) => Status::ExpectationFailed,
            AppError::Conflict(_) => Status::Conflict,
            AppError::Internal(_) => Status::InternalServerError,
        }
    }

    /// Field name and client-facing message for the JSON error body.
    /// Store and internal failures are not echoed to the caller.
    fn client_message(&self) -> (&'static str, String) {
        match self {
            AppError::Database(_) | AppError::Internal(_) => {
                ("server", "Internal server error".to_string())
            }
            AppError::Authentication(msg) => ("authentication", msg.clone()),
            AppError::Validation(msg) => ("request", msg.clone()),
            AppError::NotFound(msg) => ("resource", msg.clone()),
            AppError::MissingReference(msg) => ("reference", msg.clone()),
            AppError::Conflict(msg) => ("resource", msg.clone()),
        }
    }

    pub fn to_response_with_log(&self, context: &str) -> Custom<Json<ValidationResponse>> {
        self.log_and_record(context);
        let (field, message) = self.client_message();

        Custom(
            self.status_code(),
            Json(ValidationResponse::with_error(field, &message)),
        )
    }
}

impl<'r> rocket::response::Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        self.to_response_with_log(&format!("Request to {} {}", req.method(), req.uri()))
            .respond_to(req)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_error) = &error {
            if db_error.is_unique_violation() {
                return AppError::Conflict(db_error.message().to_string());
            }
        }

        AppError::Database(error)
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        AppError::Internal(format!("Migration error: {}", error))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let messages: Vec<String> = field_errors
                    .iter()
                    .map(|error| {
                        error
                            .message
                            .clone()
                            .unwrap_or_else(|| "invalid value".into())
                            .to_string()
                    })
                    .collect();
                format!("{}: {}", field, messages.join(", "))
            })
            .collect();
        fields.sort();

        AppError::Validation(fields.join("; "))
    }
}
