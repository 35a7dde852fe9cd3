use rocket::State;
use rocket::http::Status;
use rocket::response::status::{Accepted, Created};
use rocket::serde::json::Json;
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use tracing::info;
use validator::Validate;

use super::{require_reference, require_target};
use crate::auth::ApiKey;
use crate::db::{
    delete, find, get_set_exercise_details, insert, new_identifier, replace, replace_children,
};
use crate::error::AppError;
use crate::models::{Exercise, Set, SetExercise, SetExerciseDetail};
use crate::validation::{JsonBody, JsonValidateExt, require_identifier, validate_identifier};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetExerciseRequest {
    /// Optional on the single-row routes, where the path names the set.
    #[validate(custom(function = "validate_identifier"))]
    pub set_id: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_identifier"))]
    pub exercise_id: String,
    #[serde(default)]
    pub order: i64,
    pub duration: Option<String>,
    pub unit: Option<String>,
    #[serde(default)]
    pub count: i64,
}

impl SetExerciseRequest {
    fn into_set_exercise(self, id: String, set_id: String) -> SetExercise {
        SetExercise {
            id,
            set_id,
            exercise_id: self.exercise_id,
            order: self.order,
            duration: self.duration,
            unit: self.unit,
            count: self.count,
        }
    }
}

/// The set a row belongs to: the path value, which a body `setId` may repeat
/// but not contradict.
fn resolve_set_id(path_set_id: &str, body_set_id: Option<&str>) -> Result<String, AppError> {
    match body_set_id {
        Some(body_set_id) if body_set_id != path_set_id => Err(AppError::Validation(format!(
            "setId: body value {} does not match path value {}",
            body_set_id, path_set_id
        ))),
        _ => Ok(path_set_id.to_string()),
    }
}

async fn require_exercise(pool: &Pool<Sqlite>, exercise_id: &str) -> Result<Exercise, AppError> {
    find::<Exercise>(pool, exercise_id).await?.ok_or_else(|| {
        AppError::MissingReference(format!("exerciseId {} does not exist", exercise_id))
    })
}

#[get("/set-exercises/<set_id>")]
pub async fn get_set_exercises(
    set_id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<SetExerciseDetail>>, AppError> {
    require_identifier("setId", set_id)?;
    Ok(Json(get_set_exercise_details(db, set_id).await?))
}

#[post("/set-exercises/<set_id>", data = "<set_exercise>")]
pub async fn create_set_exercise(
    _key: ApiKey,
    set_id: &str,
    set_exercise: JsonBody<'_, SetExerciseRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Created<Json<SetExerciseDetail>>, AppError> {
    let request = set_exercise.validated()?;
    require_identifier("setId", set_id)?;
    let set_id = resolve_set_id(set_id, request.set_id.as_deref())?;
    require_reference::<Set>(db, "setId", &set_id).await?;
    let exercise = require_exercise(db, &request.exercise_id).await?;

    let set_exercise = request.into_set_exercise(new_identifier(), set_id);
    insert(db, &set_exercise).await?;

    let location = format!(
        "/set-exercises/{}/{}",
        set_exercise.set_id, set_exercise.id
    );
    Ok(Created::new(location).body(Json(SetExerciseDetail::new(set_exercise, exercise))))
}

#[put("/set-exercises/<set_id>/<id>", data = "<set_exercise>")]
pub async fn update_set_exercise(
    _key: ApiKey,
    set_id: &str,
    id: &str,
    set_exercise: JsonBody<'_, SetExerciseRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Accepted<Json<SetExerciseDetail>>, AppError> {
    let request = set_exercise.validated()?;
    require_identifier("setId", set_id)?;
    require_identifier("id", id)?;
    let set_id = resolve_set_id(set_id, request.set_id.as_deref())?;
    require_target::<SetExercise>(db, id).await?;
    require_reference::<Set>(db, "setId", &set_id).await?;
    let exercise = require_exercise(db, &request.exercise_id).await?;

    let set_exercise = request.into_set_exercise(id.to_string(), set_id);
    replace(db, &set_exercise).await?;

    Ok(Accepted(Json(SetExerciseDetail::new(set_exercise, exercise))))
}

#[delete("/set-exercises/<set_id>/<id>")]
pub async fn delete_set_exercise(
    _key: ApiKey,
    set_id: &str,
    id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Status, AppError> {
    require_identifier("setId", set_id)?;
    require_identifier("id", id)?;

    match find::<SetExercise>(db, id).await? {
        Some(row) if row.set_id == set_id => {}
        _ => {
            return Err(AppError::NotFound(format!(
                "set exercise {} not found in set {}",
                id, set_id
            )));
        }
    }
    delete::<SetExercise>(db, id).await?;

    Ok(Status::Ok)
}

/// Replaces every exercise of each set named in the batch. Nothing is written
/// unless every row passes validation.
#[post("/set-exercises", data = "<set_exercises>")]
pub async fn replace_set_exercises(
    _key: ApiKey,
    set_exercises: JsonBody<'_, Vec<SetExerciseRequest>>,
    db: &State<Pool<Sqlite>>,
) -> Result<Created<Json<Vec<SetExercise>>>, AppError> {
    let requests = set_exercises.parsed()?;

    let mut set_ids: Vec<String> = Vec::new();
    for request in &requests {
        request.validate()?;
        match &request.set_id {
            Some(set_id) => {
                if !set_ids.contains(set_id) {
                    set_ids.push(set_id.clone());
                }
            }
            None => return Err(AppError::Validation("setId: is required".to_string())),
        }
    }

    for set_id in &set_ids {
        require_reference::<Set>(db, "setId", set_id).await?;
    }
    for request in &requests {
        require_exercise(db, &request.exercise_id).await?;
    }

    let rows: Vec<SetExercise> = requests
        .into_iter()
        .map(|mut request| {
            let set_id = request.set_id.take().unwrap_or_default();
            request.into_set_exercise(new_identifier(), set_id)
        })
        .collect();

    let removed = replace_children(db, "set_id", &set_ids, &rows).await?;
    info!(
        removed,
        inserted = rows.len(),
        "Set exercises replaced for {} sets",
        set_ids.len()
    );

    Ok(Created::new("/set-exercises").body(Json(rows)))
}
