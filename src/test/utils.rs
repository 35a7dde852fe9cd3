use std::collections::HashMap;
use std::sync::Once;

use rocket::http::{ContentType, Header};
use rocket::local::asynchronous::{Client, LocalRequest};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use tracing_subscriber::EnvFilter;

use crate::auth::API_KEY_HEADER;
use crate::config::AppConfig;
use crate::db::{insert, new_identifier};
use crate::error::AppError;
use crate::init_rocket;
use crate::models::{
    Exercise, ExerciseMuscle, Muscle, MuscleCategory, Plan, Set, SetExercise, Workout,
};

static INIT: Once = Once::new();

pub const TEST_API_KEY: &str = "test-api-key";

pub fn init_test_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_test_writer()
            .try_init();
    });
}

/// A migrated in-memory database. One connection that never expires, since
/// every connection to `sqlite::memory:` opens its own empty database.
pub async fn test_pool() -> Result<Pool<Sqlite>, AppError> {
    init_test_tracing();

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

pub fn test_config() -> AppConfig {
    AppConfig {
        api_key: TEST_API_KEY.to_string(),
        database_url: "sqlite::memory:".to_string(),
    }
}

pub async fn setup_test_client(pool: &Pool<Sqlite>) -> Client {
    let figment = rocket::Config::figment().merge(("log_level", "off"));

    Client::tracked(init_rocket(figment, pool.clone(), test_config()))
        .await
        .expect("valid rocket instance")
}

/// Adds the test API key and a JSON content type.
pub fn authorized(request: LocalRequest<'_>) -> LocalRequest<'_> {
    request
        .header(Header::new(API_KEY_HEADER, TEST_API_KEY))
        .header(ContentType::JSON)
}

pub fn unknown_id() -> String {
    new_identifier()
}

/// Seeds a database by name; `TestDb::id` maps names back to keys. Set
/// exercises are named `"<set>/<exercise>"`.
#[derive(Default)]
pub struct TestDbBuilder {
    plans: Vec<String>,
    workouts: Vec<(String, String)>,
    sets: Vec<(String, String, i64)>,
    exercises: Vec<String>,
    set_exercises: Vec<(String, String, i64)>,
    categories: Vec<String>,
    muscles: Vec<(String, String)>,
    exercise_muscles: Vec<(String, String)>,
}

impl TestDbBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan(mut self, name: &str) -> Self {
        self.plans.push(name.to_string());
        self
    }

    pub fn workout(mut self, name: &str, plan: &str) -> Self {
        self.workouts.push((name.to_string(), plan.to_string()));
        self
    }

    pub fn set(mut self, name: &str, workout: &str, order: i64) -> Self {
        self.sets
            .push((name.to_string(), workout.to_string(), order));
        self
    }

    pub fn exercise(mut self, name: &str) -> Self {
        self.exercises.push(name.to_string());
        self
    }

    pub fn set_exercise(mut self, set: &str, exercise: &str, order: i64) -> Self {
        self.set_exercises
            .push((set.to_string(), exercise.to_string(), order));
        self
    }

    pub fn muscle_category(mut self, name: &str) -> Self {
        self.categories.push(name.to_string());
        self
    }

    pub fn muscle(mut self, name: &str, category: &str) -> Self {
        self.muscles.push((name.to_string(), category.to_string()));
        self
    }

    pub fn exercise_muscle(mut self, exercise: &str, muscle: &str) -> Self {
        self.exercise_muscles
            .push((exercise.to_string(), muscle.to_string()));
        self
    }

    pub async fn build(self) -> Result<TestDb, AppError> {
        let pool = test_pool().await?;
        let mut ids: HashMap<String, String> = HashMap::new();

        for name in &self.plans {
            let plan = Plan {
                plan_id: new_identifier(),
                name: name.clone(),
                description: Some(format!("{} description", name)),
            };
            insert(&pool, &plan).await?;
            ids.insert(name.clone(), plan.plan_id);
        }

        for (name, plan) in &self.workouts {
            let workout = Workout {
                workout_id: new_identifier(),
                plan_id: lookup(&ids, plan)?,
                name: name.clone(),
                description: None,
            };
            insert(&pool, &workout).await?;
            ids.insert(name.clone(), workout.workout_id);
        }

        for (name, workout, order) in &self.sets {
            let set = Set {
                set_id: new_identifier(),
                workout_id: lookup(&ids, workout)?,
                name: name.clone(),
                order: *order,
            };
            insert(&pool, &set).await?;
            ids.insert(name.clone(), set.set_id);
        }

        for name in &self.exercises {
            let exercise = Exercise {
                exercise_id: new_identifier(),
                name: name.clone(),
                description: Some(format!("How to {}", name)),
                image_url: None,
            };
            insert(&pool, &exercise).await?;
            ids.insert(name.clone(), exercise.exercise_id);
        }

        for (set, exercise, order) in &self.set_exercises {
            let row = SetExercise {
                id: new_identifier(),
                set_id: lookup(&ids, set)?,
                exercise_id: lookup(&ids, exercise)?,
                order: *order,
                duration: None,
                unit: Some("reps".to_string()),
                count: 10,
            };
            insert(&pool, &row).await?;
            ids.insert(format!("{}/{}", set, exercise), row.id);
        }

        for name in &self.categories {
            let category = MuscleCategory {
                muscle_category_id: new_identifier(),
                name: name.clone(),
            };
            insert(&pool, &category).await?;
            ids.insert(name.clone(), category.muscle_category_id);
        }

        for (name, category) in &self.muscles {
            let muscle = Muscle {
                muscle_id: new_identifier(),
                muscle_category_id: lookup(&ids, category)?,
                name: name.clone(),
            };
            insert(&pool, &muscle).await?;
            ids.insert(name.clone(), muscle.muscle_id);
        }

        for (exercise, muscle) in &self.exercise_muscles {
            let link = ExerciseMuscle {
                id: new_identifier(),
                exercise_id: lookup(&ids, exercise)?,
                muscle_id: lookup(&ids, muscle)?,
            };
            insert(&pool, &link).await?;
        }

        Ok(TestDb { pool, ids })
    }
}

fn lookup(ids: &HashMap<String, String>, name: &str) -> Result<String, AppError> {
    ids.get(name)
        .cloned()
        .ok_or_else(|| AppError::Internal(format!("test fixture {} was not seeded", name)))
}

pub struct TestDb {
    pub pool: Pool<Sqlite>,
    pub ids: HashMap<String, String>,
}

impl TestDb {
    pub fn id(&self, name: &str) -> String {
        match self.ids.get(name) {
            Some(id) => id.clone(),
            None => panic!("no fixture named {}", name),
        }
    }
}

/// Two workouts, each with one set holding two exercises, plus muscles.
pub async fn create_standard_test_db() -> TestDb {
    TestDbBuilder::new()
        .plan("Strength")
        .workout("Lower", "Strength")
        .workout("Upper", "Strength")
        .set("Lower main", "Lower", 1)
        .set("Upper main", "Upper", 1)
        .exercise("Squat")
        .exercise("Lunge")
        .exercise("Press")
        .exercise("Row")
        .set_exercise("Lower main", "Lunge", 2)
        .set_exercise("Lower main", "Squat", 1)
        .set_exercise("Upper main", "Row", 5)
        .set_exercise("Upper main", "Press", 3)
        .muscle_category("Legs")
        .muscle_category("Back")
        .muscle("Quads", "Legs")
        .muscle("Glutes", "Legs")
        .muscle("Lats", "Back")
        .exercise_muscle("Squat", "Quads")
        .exercise_muscle("Squat", "Glutes")
        .exercise_muscle("Lunge", "Glutes")
        .exercise_muscle("Row", "Lats")
        .build()
        .await
        .expect("Failed to build standard test database")
}
