use serde::{Deserialize, Serialize};

use crate::db::{Entity, SqliteQuery};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub plan_id: String,
    pub name: String,
    pub description: Option<String>,
}

impl Entity for Plan {
    const TABLE: &'static str = "plans";
    const KEY: &'static str = "plan_id";
    const COLUMNS: &'static [&'static str] = &["name", "description"];

    fn id(&self) -> &str {
        &self.plan_id
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(&self.name).bind(&self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub workout_id: String,
    pub plan_id: String,
    pub name: String,
    pub description: Option<String>,
}

impl Entity for Workout {
    const TABLE: &'static str = "workouts";
    const KEY: &'static str = "workout_id";
    const COLUMNS: &'static [&'static str] = &["plan_id", "name", "description"];

    fn id(&self) -> &str {
        &self.workout_id
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(&self.plan_id)
            .bind(&self.name)
            .bind(&self.description)
    }
}

/// An ordered group of exercises inside a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Set {
    pub set_id: String,
    pub workout_id: String,
    pub name: String,
    #[sqlx(rename = "sort_order")]
    pub order: i64,
}

impl Entity for Set {
    const TABLE: &'static str = "sets";
    const KEY: &'static str = "set_id";
    const COLUMNS: &'static [&'static str] = &["workout_id", "name", "sort_order"];
    const ORDER_BY: &'static str = "sort_order, rowid";

    fn id(&self) -> &str {
        &self.set_id
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(&self.workout_id)
            .bind(&self.name)
            .bind(self.order)
    }
}

/// Places one exercise in one set, with how it is performed there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SetExercise {
    pub id: String,
    pub set_id: String,
    pub exercise_id: String,
    #[sqlx(rename = "sort_order")]
    pub order: i64,
    pub duration: Option<String>,
    pub unit: Option<String>,
    pub count: i64,
}

impl Entity for SetExercise {
    const TABLE: &'static str = "set_exercises";
    const KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "set_id",
        "exercise_id",
        "sort_order",
        "duration",
        "unit",
        "count",
    ];
    const ORDER_BY: &'static str = "sort_order, rowid";

    fn id(&self) -> &str {
        &self.id
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(&self.set_id)
            .bind(&self.exercise_id)
            .bind(self.order)
            .bind(&self.duration)
            .bind(&self.unit)
            .bind(self.count)
    }
}

/// A set exercise joined with the exercise it refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SetExerciseDetail {
    pub id: String,
    pub set_id: String,
    pub exercise_id: String,
    #[sqlx(rename = "sort_order")]
    pub order: i64,
    pub duration: Option<String>,
    pub unit: Option<String>,
    pub count: i64,
    pub exercise_name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl SetExerciseDetail {
    pub fn new(set_exercise: SetExercise, exercise: Exercise) -> Self {
        Self {
            id: set_exercise.id,
            set_id: set_exercise.set_id,
            exercise_id: set_exercise.exercise_id,
            order: set_exercise.order,
            duration: set_exercise.duration,
            unit: set_exercise.unit,
            count: set_exercise.count,
            exercise_name: exercise.name,
            description: exercise.description,
            image_url: exercise.image_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub exercise_id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl Entity for Exercise {
    const TABLE: &'static str = "exercises";
    const KEY: &'static str = "exercise_id";
    const COLUMNS: &'static [&'static str] = &["name", "description", "image_url"];
    const ORDER_BY: &'static str = "name, rowid";

    fn id(&self) -> &str {
        &self.exercise_id
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(&self.name)
            .bind(&self.description)
            .bind(&self.image_url)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseMuscle {
    pub id: String,
    pub exercise_id: String,
    pub muscle_id: String,
}

impl Entity for ExerciseMuscle {
    const TABLE: &'static str = "exercise_muscles";
    const KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["exercise_id", "muscle_id"];

    fn id(&self) -> &str {
        &self.id
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(&self.exercise_id).bind(&self.muscle_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Muscle {
    pub muscle_id: String,
    pub muscle_category_id: String,
    pub name: String,
}

impl Entity for Muscle {
    const TABLE: &'static str = "muscles";
    const KEY: &'static str = "muscle_id";
    const COLUMNS: &'static [&'static str] = &["muscle_category_id", "name"];

    fn id(&self) -> &str {
        &self.muscle_id
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(&self.muscle_category_id).bind(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MuscleCategory {
    pub muscle_category_id: String,
    pub name: String,
}

impl Entity for MuscleCategory {
    const TABLE: &'static str = "muscle_categories";
    const KEY: &'static str = "muscle_category_id";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn id(&self) -> &str {
        &self.muscle_category_id
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(&self.name)
    }
}

// Sink tree. Each level owns its children; empty levels serialize as [].

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTree {
    pub plan_id: String,
    pub name: String,
    pub workouts: Vec<WorkoutTree>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTree {
    pub workout_id: String,
    pub name: String,
    pub sets: Vec<SetTree>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTree {
    pub set_id: String,
    pub name: String,
    pub exercises: Vec<ExerciseTree>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseTree {
    pub exercise_id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub muscles: Vec<Muscle>,
}

/// One exercise placed in one set, as fetched for the sink.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SinkExerciseRow {
    pub set_id: String,
    pub sort_order: i64,
    pub exercise_id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// One muscle targeted by one exercise, as fetched for the sink.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SinkMuscleRow {
    pub muscle_id: String,
    pub muscle_category_id: String,
    pub exercise_id: String,
    pub name: String,
}

impl From<SinkMuscleRow> for Muscle {
    fn from(row: SinkMuscleRow) -> Self {
        Self {
            muscle_id: row.muscle_id,
            muscle_category_id: row.muscle_category_id,
            name: row.name,
        }
    }
}
