use rocket::State;
use rocket::serde::json::Json;
use sqlx::{Pool, Sqlite};

use crate::error::AppError;
use crate::models::PlanTree;
use crate::sink::load_plan_tree;
use crate::validation::require_identifier;

#[get("/sink/<plan_id>")]
pub async fn get_sink(
    plan_id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<PlanTree>, AppError> {
    require_identifier("planId", plan_id)?;
    Ok(Json(load_plan_tree(db, plan_id).await?))
}
