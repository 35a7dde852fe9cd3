use rocket::State;
use rocket::http::Status;
use rocket::response::status::{Accepted, Created};
use rocket::serde::json::Json;
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use validator::Validate;

use super::{require_reference, require_target};
use crate::auth::ApiKey;
use crate::db::{delete, get, insert, list, new_identifier, replace};
use crate::error::AppError;
use crate::models::{Muscle, MuscleCategory};
use crate::validation::{JsonBody, JsonValidateExt, require_identifier, validate_identifier};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MuscleRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_identifier"))]
    pub muscle_category_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}

#[get("/muscle")]
pub async fn get_muscles(db: &State<Pool<Sqlite>>) -> Result<Json<Vec<Muscle>>, AppError> {
    Ok(Json(list::<Muscle>(db).await?))
}

#[get("/muscle/<id>")]
pub async fn get_muscle(id: &str, db: &State<Pool<Sqlite>>) -> Result<Json<Muscle>, AppError> {
    require_identifier("id", id)?;
    Ok(Json(get::<Muscle>(db, id).await?))
}

#[post("/muscle", data = "<muscle>")]
pub async fn create_muscle(
    _key: ApiKey,
    muscle: JsonBody<'_, MuscleRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Created<Json<Muscle>>, AppError> {
    let request = muscle.validated()?;
    require_reference::<MuscleCategory>(db, "muscleCategoryId", &request.muscle_category_id)
        .await?;

    let muscle = Muscle {
        muscle_id: new_identifier(),
        muscle_category_id: request.muscle_category_id,
        name: request.name,
    };
    insert(db, &muscle).await?;

    Ok(Created::new(format!("/muscle/{}", muscle.muscle_id)).body(Json(muscle)))
}

#[put("/muscle/<id>", data = "<muscle>")]
pub async fn update_muscle(
    _key: ApiKey,
    id: &str,
    muscle: JsonBody<'_, MuscleRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Accepted<Json<Muscle>>, AppError> {
    let request = muscle.validated()?;
    require_identifier("id", id)?;
    require_target::<Muscle>(db, id).await?;
    require_reference::<MuscleCategory>(db, "muscleCategoryId", &request.muscle_category_id)
        .await?;

    let muscle = Muscle {
        muscle_id: id.to_string(),
        muscle_category_id: request.muscle_category_id,
        name: request.name,
    };
    replace(db, &muscle).await?;

    Ok(Accepted(Json(muscle)))
}

#[delete("/muscle/<id>")]
pub async fn delete_muscle(
    _key: ApiKey,
    id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Status, AppError> {
    require_identifier("id", id)?;
    delete::<Muscle>(db, id).await?;

    Ok(Status::Ok)
}
