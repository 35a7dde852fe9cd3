use rocket::State;
use rocket::http::Status;
use rocket::response::status::{Accepted, Created};
use rocket::serde::json::Json;
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use validator::Validate;

use super::{require_reference, require_target};
use crate::auth::ApiKey;
use crate::db::{delete, insert, list, list_by, new_identifier, replace};
use crate::error::AppError;
use crate::models::{Set, Workout};
use crate::validation::{JsonBody, JsonValidateExt, require_identifier, validate_identifier};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_identifier"))]
    pub workout_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub order: i64,
}

impl SetRequest {
    fn into_set(self, set_id: String) -> Set {
        Set {
            set_id,
            workout_id: self.workout_id,
            name: self.name,
            order: self.order,
        }
    }
}

#[get("/set")]
pub async fn get_sets(db: &State<Pool<Sqlite>>) -> Result<Json<Vec<Set>>, AppError> {
    Ok(Json(list::<Set>(db).await?))
}

#[get("/set/<workout_id>")]
pub async fn get_workout_sets(
    workout_id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Set>>, AppError> {
    require_identifier("workoutId", workout_id)?;
    Ok(Json(list_by::<Set>(db, "workout_id", workout_id).await?))
}

#[post("/set", data = "<set>")]
pub async fn create_set(
    _key: ApiKey,
    set: JsonBody<'_, SetRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Created<Json<Set>>, AppError> {
    let set = set.validated()?.into_set(new_identifier());
    require_reference::<Workout>(db, "workoutId", &set.workout_id).await?;

    insert(db, &set).await?;

    Ok(Created::new(format!("/set/{}", set.set_id)).body(Json(set)))
}

#[put("/set/<id>", data = "<set>")]
pub async fn update_set(
    _key: ApiKey,
    id: &str,
    set: JsonBody<'_, SetRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Accepted<Json<Set>>, AppError> {
    let request = set.validated()?;
    require_identifier("id", id)?;
    require_target::<Set>(db, id).await?;
    require_reference::<Workout>(db, "workoutId", &request.workout_id).await?;

    let set = request.into_set(id.to_string());
    replace(db, &set).await?;

    Ok(Accepted(Json(set)))
}

#[delete("/set/<id>")]
pub async fn delete_set(
    _key: ApiKey,
    id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Status, AppError> {
    require_identifier("id", id)?;
    delete::<Set>(db, id).await?;

    Ok(Status::Ok)
}
