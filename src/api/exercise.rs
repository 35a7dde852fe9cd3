use rocket::State;
use rocket::http::Status;
use rocket::response::status::{Accepted, Created};
use rocket::serde::json::Json;
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use validator::Validate;

use super::require_target;
use crate::auth::ApiKey;
use crate::db::{delete, get, insert, list, new_identifier, replace};
use crate::error::AppError;
use crate::models::Exercise;
use crate::validation::{JsonBody, JsonValidateExt, require_identifier};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl ExerciseRequest {
    fn into_exercise(self, exercise_id: String) -> Exercise {
        Exercise {
            exercise_id,
            name: self.name,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

#[get("/exercise")]
pub async fn get_exercises(db: &State<Pool<Sqlite>>) -> Result<Json<Vec<Exercise>>, AppError> {
    Ok(Json(list::<Exercise>(db).await?))
}

#[get("/exercise/<id>")]
pub async fn get_exercise(
    id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Exercise>, AppError> {
    require_identifier("id", id)?;
    Ok(Json(get::<Exercise>(db, id).await?))
}

#[post("/exercise", data = "<exercise>")]
pub async fn create_exercise(
    _key: ApiKey,
    exercise: JsonBody<'_, ExerciseRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Created<Json<Exercise>>, AppError> {
    let exercise = exercise.validated()?.into_exercise(new_identifier());

    insert(db, &exercise).await?;

    Ok(Created::new(format!("/exercise/{}", exercise.exercise_id)).body(Json(exercise)))
}

#[put("/exercise/<id>", data = "<exercise>")]
pub async fn update_exercise(
    _key: ApiKey,
    id: &str,
    exercise: JsonBody<'_, ExerciseRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Accepted<Json<Exercise>>, AppError> {
    let request = exercise.validated()?;
    require_identifier("id", id)?;
    require_target::<Exercise>(db, id).await?;

    let exercise = request.into_exercise(id.to_string());
    replace(db, &exercise).await?;

    Ok(Accepted(Json(exercise)))
}

/// Set placements and muscle links that point at the exercise are left as is.
#[delete("/exercise/<id>")]
pub async fn delete_exercise(
    _key: ApiKey,
    id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Status, AppError> {
    require_identifier("id", id)?;
    delete::<Exercise>(db, id).await?;

    Ok(Status::Ok)
}
