use rocket::http::Status;
use serde_json::json;

use crate::models::{ExerciseMuscle, SetExercise, SetExerciseDetail};
use crate::test::utils::{authorized, create_standard_test_db, setup_test_client, unknown_id};

#[rocket::async_test]
async fn test_exercise_muscle_replace_is_all_or_nothing() {
    let test_db = create_standard_test_db().await;
    let client = setup_test_client(&test_db.pool).await;
    let squat = test_db.id("Squat");
    let row = test_db.id("Row");

    let response = authorized(client.post("/exercise-muscles"))
        .body(
            json!([
                { "exerciseId": squat, "muscleId": test_db.id("Lats") },
                { "exerciseId": row, "muscleId": unknown_id() }
            ])
            .to_string(),
        )
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::ExpectationFailed);

    let response = authorized(client.post("/exercise-muscles"))
        .body(
            json!([
                { "exerciseId": squat, "muscleId": test_db.id("Lats") },
                { "exerciseId": row, "muscleId": "not-an-id" }
            ])
            .to_string(),
        )
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);

    let quads: Vec<ExerciseMuscle> = client
        .get(format!("/exercise-muscles/{}", test_db.id("Quads")))
        .dispatch()
        .await
        .into_json()
        .await
        .unwrap();
    assert_eq!(quads.len(), 1);
    assert_eq!(quads[0].exercise_id, squat);

    let lats: Vec<ExerciseMuscle> = client
        .get(format!("/exercise-muscles/{}", test_db.id("Lats")))
        .dispatch()
        .await
        .into_json()
        .await
        .unwrap();
    assert_eq!(lats.len(), 1);
    assert_eq!(lats[0].exercise_id, row);
}

#[rocket::async_test]
async fn test_exercise_muscle_replace_swaps_listed_exercises() {
    let test_db = create_standard_test_db().await;
    let client = setup_test_client(&test_db.pool).await;
    let squat = test_db.id("Squat");

    let response = authorized(client.post("/exercise-muscles"))
        .body(json!([{ "exerciseId": squat, "muscleId": test_db.id("Lats") }]).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Created);
    let inserted: Vec<ExerciseMuscle> = response.into_json().await.unwrap();
    assert_eq!(inserted.len(), 1);

    let quads: Vec<ExerciseMuscle> = client
        .get(format!("/exercise-muscles/{}", test_db.id("Quads")))
        .dispatch()
        .await
        .into_json()
        .await
        .unwrap();
    assert!(quads.is_empty());

    // Lunge was not in the batch, so its Glutes link survives.
    let glutes: Vec<ExerciseMuscle> = client
        .get(format!("/exercise-muscles/{}", test_db.id("Glutes")))
        .dispatch()
        .await
        .into_json()
        .await
        .unwrap();
    assert_eq!(glutes.len(), 1);
    assert_eq!(glutes[0].exercise_id, test_db.id("Lunge"));

    let lats: Vec<ExerciseMuscle> = client
        .get(format!("/exercise-muscles/{}", test_db.id("Lats")))
        .dispatch()
        .await
        .into_json()
        .await
        .unwrap();
    assert_eq!(lats.len(), 2);
}

#[rocket::async_test]
async fn test_set_exercise_replace_is_all_or_nothing() {
    let test_db = create_standard_test_db().await;
    let client = setup_test_client(&test_db.pool).await;
    let lower = test_db.id("Lower main");

    let response = authorized(client.post("/set-exercises"))
        .body(
            json!([
                { "setId": lower, "exerciseId": test_db.id("Row"), "order": 1 },
                { "setId": lower, "exerciseId": unknown_id(), "order": 2 }
            ])
            .to_string(),
        )
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::ExpectationFailed);

    let response = authorized(client.post("/set-exercises"))
        .body(json!([{ "exerciseId": test_db.id("Row"), "order": 1 }]).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);

    let details: Vec<SetExerciseDetail> = client
        .get(format!("/set-exercises/{}", lower))
        .dispatch()
        .await
        .into_json()
        .await
        .unwrap();
    let names: Vec<&str> = details.iter().map(|d| d.exercise_name.as_str()).collect();
    assert_eq!(names, vec!["Squat", "Lunge"]);
}

#[rocket::async_test]
async fn test_set_exercise_replace_swaps_listed_sets() {
    let test_db = create_standard_test_db().await;
    let client = setup_test_client(&test_db.pool).await;
    let lower = test_db.id("Lower main");

    let response = authorized(client.post("/set-exercises"))
        .body(
            json!([
                { "setId": lower, "exerciseId": test_db.id("Press"), "order": 2, "count": 5 },
                { "setId": lower, "exerciseId": test_db.id("Row"), "order": 1, "count": 12 }
            ])
            .to_string(),
        )
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Created);
    let inserted: Vec<SetExercise> = response.into_json().await.unwrap();
    assert!(inserted.iter().all(|row| row.set_id == lower));

    let details: Vec<SetExerciseDetail> = client
        .get(format!("/set-exercises/{}", lower))
        .dispatch()
        .await
        .into_json()
        .await
        .unwrap();
    let names: Vec<&str> = details.iter().map(|d| d.exercise_name.as_str()).collect();
    assert_eq!(names, vec!["Row", "Press"]);

    let upper: Vec<SetExerciseDetail> = client
        .get(format!("/set-exercises/{}", test_db.id("Upper main")))
        .dispatch()
        .await
        .into_json()
        .await
        .unwrap();
    assert_eq!(upper.len(), 2);
}
