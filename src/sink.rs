//! Builds the nested plan tree served by `/sink/<plan_id>`.
//!
//! Loading issues one query per level and no per-child queries. Assembly
//! groups each level by parent key once, so every row is visited a constant
//! number of times.

use std::collections::{BTreeSet, HashMap};

use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};

use crate::db::{get, get_exercises_for_sets, get_muscles_for_exercises, list_by, list_in};
use crate::error::AppError;
use crate::models::{
    ExerciseTree, Muscle, Plan, PlanTree, Set, SetTree, SinkExerciseRow, SinkMuscleRow, Workout,
    WorkoutTree,
};

#[instrument(skip(pool))]
pub async fn load_plan_tree(pool: &Pool<Sqlite>, plan_id: &str) -> Result<PlanTree, AppError> {
    let plan = get::<Plan>(pool, plan_id).await?;

    let workouts = list_by::<Workout>(pool, "plan_id", plan_id).await?;
    let workout_ids: Vec<String> = workouts.iter().map(|w| w.workout_id.clone()).collect();

    let sets = list_in::<Set>(pool, "workout_id", &workout_ids).await?;
    let set_ids: Vec<String> = sets.iter().map(|s| s.set_id.clone()).collect();

    let exercises = get_exercises_for_sets(pool, &set_ids).await?;
    let exercise_ids: Vec<String> = exercises
        .iter()
        .map(|e| e.exercise_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let muscles = get_muscles_for_exercises(pool, &exercise_ids).await?;

    info!(
        workouts = workouts.len(),
        sets = sets.len(),
        exercises = exercises.len(),
        muscles = muscles.len(),
        "Assembling plan tree"
    );

    Ok(assemble_plan_tree(plan, workouts, sets, exercises, muscles))
}

/// Nests the flat rows under `plan`. Workouts keep their given order; sets
/// and exercises are stably sorted by their order value; muscles keep
/// their given order. Rows whose parent is not present are dropped.
pub fn assemble_plan_tree(
    plan: Plan,
    workouts: Vec<Workout>,
    sets: Vec<Set>,
    exercises: Vec<SinkExerciseRow>,
    muscles: Vec<SinkMuscleRow>,
) -> PlanTree {
    let mut muscles_by_exercise: HashMap<String, Vec<Muscle>> = HashMap::new();
    for row in muscles {
        muscles_by_exercise
            .entry(row.exercise_id.clone())
            .or_default()
            .push(Muscle::from(row));
    }

    let mut exercises_by_set: HashMap<String, Vec<SinkExerciseRow>> = HashMap::new();
    for row in exercises {
        exercises_by_set
            .entry(row.set_id.clone())
            .or_default()
            .push(row);
    }

    let mut sets_by_workout: HashMap<String, Vec<Set>> = HashMap::new();
    for set in sets {
        sets_by_workout
            .entry(set.workout_id.clone())
            .or_default()
            .push(set);
    }

    let workouts = workouts
        .into_iter()
        .map(|workout| {
            let mut sets = sets_by_workout
                .remove(&workout.workout_id)
                .unwrap_or_default();
            sets.sort_by_key(|set| set.order);

            WorkoutTree {
                workout_id: workout.workout_id,
                name: workout.name,
                sets: sets
                    .into_iter()
                    .map(|set| {
                        let mut rows = exercises_by_set.remove(&set.set_id).unwrap_or_default();
                        rows.sort_by_key(|row| row.sort_order);

                        SetTree {
                            set_id: set.set_id,
                            name: set.name,
                            exercises: rows
                                .into_iter()
                                .map(|row| ExerciseTree {
                                    muscles: muscles_by_exercise
                                        .get(&row.exercise_id)
                                        .cloned()
                                        .unwrap_or_default(),
                                    exercise_id: row.exercise_id,
                                    name: row.name,
                                    description: row.description,
                                    image_url: row.image_url,
                                })
                                .collect(),
                        }
                    })
                    .collect(),
            }
        })
        .collect();

    PlanTree {
        plan_id: plan.plan_id,
        name: plan.name,
        workouts,
    }
}
