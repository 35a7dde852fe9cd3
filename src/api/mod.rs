use rocket::Route;
use sqlx::{Pool, Sqlite};

use crate::db::{Entity, exists};
use crate::error::AppError;

pub mod exercise;
pub mod exercise_muscle;
pub mod muscle;
pub mod muscle_category;
pub mod plan;
pub mod set;
pub mod set_exercise;
pub mod sink;
pub mod workout;

pub fn routes() -> Vec<Route> {
    routes![
        health,
        sink::get_sink,
        plan::get_plans,
        plan::get_plan,
        plan::create_plan,
        plan::update_plan,
        plan::delete_plan,
        workout::get_workouts,
        workout::get_plan_workouts,
        workout::create_workout,
        workout::update_workout,
        workout::delete_workout,
        set::get_sets,
        set::get_workout_sets,
        set::create_set,
        set::update_set,
        set::delete_set,
        set_exercise::get_set_exercises,
        set_exercise::create_set_exercise,
        set_exercise::update_set_exercise,
        set_exercise::delete_set_exercise,
        set_exercise::replace_set_exercises,
        exercise::get_exercises,
        exercise::get_exercise,
        exercise::create_exercise,
        exercise::update_exercise,
        exercise::delete_exercise,
        exercise_muscle::get_muscle_exercises,
        exercise_muscle::replace_exercise_muscles,
        muscle::get_muscles,
        muscle::get_muscle,
        muscle::create_muscle,
        muscle::update_muscle,
        muscle::delete_muscle,
        muscle_category::get_muscle_categories,
        muscle_category::get_muscle_category,
        muscle_category::create_muscle_category,
        muscle_category::update_muscle_category,
        muscle_category::delete_muscle_category,
    ]
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}

/// Fails with 416 when the row addressed by the request is absent.
pub(crate) async fn require_target<E: Entity>(
    pool: &Pool<Sqlite>,
    id: &str,
) -> Result<(), AppError> {
    if exists::<E>(pool, id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!(
            "{} with id {} not found",
            E::TABLE,
            id
        )))
    }
}

/// Fails with 417 when a row referenced from the body is absent.
pub(crate) async fn require_reference<E: Entity>(
    pool: &Pool<Sqlite>,
    field: &str,
    id: &str,
) -> Result<(), AppError> {
    if exists::<E>(pool, id).await? {
        Ok(())
    } else {
        Err(AppError::MissingReference(format!(
            "{} {} does not exist",
            field, id
        )))
    }
}
