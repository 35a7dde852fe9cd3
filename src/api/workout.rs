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
use crate::models::{Plan, Workout};
use crate::validation::{JsonBody, JsonValidateExt, require_identifier, validate_identifier};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_identifier"))]
    pub plan_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
}

impl WorkoutRequest {
    fn into_workout(self, workout_id: String) -> Workout {
        Workout {
            workout_id,
            plan_id: self.plan_id,
            name: self.name,
            description: self.description,
        }
    }
}

#[get("/workout")]
pub async fn get_workouts(db: &State<Pool<Sqlite>>) -> Result<Json<Vec<Workout>>, AppError> {
    Ok(Json(list::<Workout>(db).await?))
}

#[get("/workout/<plan_id>")]
pub async fn get_plan_workouts(
    plan_id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Workout>>, AppError> {
    require_identifier("planId", plan_id)?;
    Ok(Json(list_by::<Workout>(db, "plan_id", plan_id).await?))
}

#[post("/workout", data = "<workout>")]
pub async fn create_workout(
    _key: ApiKey,
    workout: JsonBody<'_, WorkoutRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Created<Json<Workout>>, AppError> {
    let workout = workout.validated()?.into_workout(new_identifier());
    require_reference::<Plan>(db, "planId", &workout.plan_id).await?;

    insert(db, &workout).await?;

    Ok(Created::new(format!("/workout/{}", workout.workout_id)).body(Json(workout)))
}

#[put("/workout/<id>", data = "<workout>")]
pub async fn update_workout(
    _key: ApiKey,
    id: &str,
    workout: JsonBody<'_, WorkoutRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Accepted<Json<Workout>>, AppError> {
    let request = workout.validated()?;
    require_identifier("id", id)?;
    require_target::<Workout>(db, id).await?;
    require_reference::<Plan>(db, "planId", &request.plan_id).await?;

    let workout = request.into_workout(id.to_string());
    replace(db, &workout).await?;

    Ok(Accepted(Json(workout)))
}

#[delete("/workout/<id>")]
pub async fn delete_workout(
    _key: ApiKey,
    id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Status, AppError> {
    require_identifier("id", id)?;
    delete::<Workout>(db, id).await?;

    Ok(Status::Ok)
}
