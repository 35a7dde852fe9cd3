use rocket::State;
use rocket::http::Status;
use rocket::response::status::{Accepted, Created};
use rocket::serde::json::Json;
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use validator::Validate;

use super::require_target;
use crate::auth::ApiKey;
use crate::db::{delete, get, insert, list, muscle_category_name_taken, new_identifier, replace};
use crate::error::AppError;
use crate::models::MuscleCategory;
use crate::validation::{JsonBody, JsonValidateExt, require_identifier};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MuscleCategoryRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}

async fn require_unique_name(
    pool: &Pool<Sqlite>,
    name: &str,
    exclude_id: Option<&str>,
) -> Result<(), AppError> {
    if muscle_category_name_taken(pool, name, exclude_id).await? {
        return Err(AppError::Conflict(format!(
            "muscle category {} already exists",
            name
        )));
    }

    Ok(())
}

#[get("/muscle-category")]
pub async fn get_muscle_categories(
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<MuscleCategory>>, AppError> {
    Ok(Json(list::<MuscleCategory>(db).await?))
}

#[get("/muscle-category/<id>")]
pub async fn get_muscle_category(
    id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MuscleCategory>, AppError> {
    require_identifier("id", id)?;
    Ok(Json(get::<MuscleCategory>(db, id).await?))
}

#[post("/muscle-category", data = "<category>")]
pub async fn create_muscle_category(
    _key: ApiKey,
    category: JsonBody<'_, MuscleCategoryRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Created<Json<MuscleCategory>>, AppError> {
    let request = category.validated()?;
    require_unique_name(db, &request.name, None).await?;

    let category = MuscleCategory {
        muscle_category_id: new_identifier(),
        name: request.name,
    };
    insert(db, &category).await?;

    Ok(Created::new(format!(
        "/muscle-category/{}",
        category.muscle_category_id
    ))
    .body(Json(category)))
}

#[put("/muscle-category/<id>", data = "<category>")]
pub async fn update_muscle_category(
    _key: ApiKey,
    id: &str,
    category: JsonBody<'_, MuscleCategoryRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Accepted<Json<MuscleCategory>>, AppError> {
    let request = category.validated()?;
    require_identifier("id", id)?;
    require_target::<MuscleCategory>(db, id).await?;
    require_unique_name(db, &request.name, Some(id)).await?;

    let category = MuscleCategory {
        muscle_category_id: id.to_string(),
        name: request.name,
    };
    replace(db, &category).await?;

    Ok(Accepted(Json(category)))
}

#[delete("/muscle-category/<id>")]
pub async fn delete_muscle_category(
    _key: ApiKey,
    id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Status, AppError> {
    require_identifier("id", id)?;
    delete::<MuscleCategory>(db, id).await?;

    Ok(Status::Ok)
}
