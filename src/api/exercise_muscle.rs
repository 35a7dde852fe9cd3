use rocket::State;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use tracing::info;
use validator::Validate;

use super::require_reference;
use crate::auth::ApiKey;
use crate::db::{list_by, new_identifier, replace_children};
use crate::error::AppError;
use crate::models::{Exercise, ExerciseMuscle, Muscle};
use crate::validation::{JsonBody, JsonValidateExt, require_identifier, validate_identifier};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseMuscleRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_identifier"))]
    pub exercise_id: String,
    #[serde(default)]
    #[validate(custom(function = "validate_identifier"))]
    pub muscle_id: String,
}

#[get("/exercise-muscles/<muscle_id>")]
pub async fn get_muscle_exercises(
    muscle_id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<ExerciseMuscle>>, AppError> {
    require_identifier("muscleId", muscle_id)?;
    Ok(Json(list_by::<ExerciseMuscle>(db, "muscle_id", muscle_id).await?))
}

/// Replaces the muscle links of every exercise named in the batch. Nothing is
/// written unless every row passes validation.
#[post("/exercise-muscles", data = "<links>")]
pub async fn replace_exercise_muscles(
    _key: ApiKey,
    links: JsonBody<'_, Vec<ExerciseMuscleRequest>>,
    db: &State<Pool<Sqlite>>,
) -> Result<Created<Json<Vec<ExerciseMuscle>>>, AppError> {
    let requests = links.parsed()?;
    for request in &requests {
        request.validate()?;
    }

    let mut exercise_ids: Vec<String> = Vec::new();
    for request in &requests {
        if !exercise_ids.contains(&request.exercise_id) {
            exercise_ids.push(request.exercise_id.clone());
        }
    }

    for exercise_id in &exercise_ids {
        require_reference::<Exercise>(db, "exerciseId", exercise_id).await?;
    }
    for request in &requests {
        require_reference::<Muscle>(db, "muscleId", &request.muscle_id).await?;
    }

    let rows: Vec<ExerciseMuscle> = requests
        .into_iter()
        .map(|request| ExerciseMuscle {
            id: new_identifier(),
            exercise_id: request.exercise_id,
            muscle_id: request.muscle_id,
        })
        .collect();

    let removed = replace_children(db, "exercise_id", &exercise_ids, &rows).await?;
    info!(
        removed,
        inserted = rows.len(),
        "Muscle links replaced for {} exercises",
        exercise_ids.len()
    );

    Ok(Created::new("/exercise-muscles").body(Json(rows)))
}
