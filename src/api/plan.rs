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
use crate::models::Plan;
use crate::validation::{JsonBody, JsonValidateExt, require_identifier};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
}

impl PlanRequest {
    fn into_plan(self, plan_id: String) -> Plan {
        Plan {
            plan_id,
            name: self.name,
            description: self.description,
        }
    }
}

#[get("/plan")]
pub async fn get_plans(db: &State<Pool<Sqlite>>) -> Result<Json<Vec<Plan>>, AppError> {
    Ok(Json(list::<Plan>(db).await?))
}

#[get("/plan/<id>")]
pub async fn get_plan(id: &str, db: &State<Pool<Sqlite>>) -> Result<Json<Plan>, AppError> {
    require_identifier("id", id)?;
    Ok(Json(get::<Plan>(db, id).await?))
}

#[post("/plan", data = "<plan>")]
pub async fn create_plan(
    _key: ApiKey,
    plan: JsonBody<'_, PlanRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Created<Json<Plan>>, AppError> {
    let plan = plan.validated()?.into_plan(new_identifier());

    insert(db, &plan).await?;

    Ok(Created::new(format!("/plan/{}", plan.plan_id)).body(Json(plan)))
}

#[put("/plan/<id>", data = "<plan>")]
pub async fn update_plan(
    _key: ApiKey,
    id: &str,
    plan: JsonBody<'_, PlanRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Accepted<Json<Plan>>, AppError> {
    let request = plan.validated()?;
    require_identifier("id", id)?;
    require_target::<Plan>(db, id).await?;

    let plan = request.into_plan(id.to_string());
    replace(db, &plan).await?;

    Ok(Accepted(Json(plan)))
}

/// Removes the plan only; its workouts stay in place.
#[delete("/plan/<id>")]
pub async fn delete_plan(
    _key: ApiKey,
    id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Status, AppError> {
    require_identifier("id", id)?;
    delete::<Plan>(db, id).await?;

    Ok(Status::Ok)
}
