use rocket::Request;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};

use crate::config::AppConfig;
use crate::error::AppError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Request guard for mutating routes: the `x-api-key` header must equal the
/// configured shared secret. Rocket evaluates it before the body is
/// validated, so a bad key always yields 401.
#[derive(Debug)]
pub struct ApiKey;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ApiKey {
    type Error = AppError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth_span = tracing::info_span!("api_key_guard");
        let _guard = auth_span.enter();

        let config = match request.rocket().state::<AppConfig>() {
            Some(config) => config,
            _ => {
                tracing::error!("Application config not found in managed state");
                return Outcome::Error((
                    Status::InternalServerError,
                    AppError::Internal("missing application config".to_string()),
                ));
            }
        };

        match request.headers().get_one(API_KEY_HEADER) {
            Some(key) if !key.is_empty() && key == config.api_key => Outcome::Success(ApiKey),
            Some(_) => {
                tracing::warn!(uri = %request.uri(), "Rejected request with invalid API key");
                Outcome::Error((
                    Status::Unauthorized,
                    AppError::Authentication("Invalid API key".to_string()),
                ))
            }
            None => {
                tracing::warn!(uri = %request.uri(), "Rejected request without API key");
                Outcome::Error((
                    Status::Unauthorized,
                    AppError::Authentication("Missing API key".to_string()),
                ))
            }
        }
    }
}
