use rocket::Request;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;

use crate::validation::{ToValidationResponse, ValidationResponse};

#[catch(401)]
pub fn unauthorized_api(req: &Request) -> Custom<Json<ValidationResponse>> {
    tracing::warn!(uri = %req.uri(), "Unauthorized access attempt");
    Status::Unauthorized.to_validation_response()
}

#[catch(default)]
pub fn default_catcher(status: Status, _req: &Request) -> Custom<Json<ValidationResponse>> {
    status.to_validation_response()
}
