use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Pool, QueryBuilder, Sqlite};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{SetExerciseDetail, SinkExerciseRow, SinkMuscleRow};

pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A row type stored in its own table under a server-assigned string key.
///
/// `COLUMNS` lists every non-key column, and `bind_columns` must bind values
/// in exactly that order. Table and column names are compile-time constants,
/// so formatting them into SQL never carries request input.
pub trait Entity: for<'r> FromRow<'r, SqliteRow> + Send + Sync + Unpin {
    const TABLE: &'static str;
    const KEY: &'static str;
    const COLUMNS: &'static [&'static str];
    const ORDER_BY: &'static str = "rowid";

    fn id(&self) -> &str;

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

pub fn new_identifier() -> String {
    Uuid::new_v4().to_string()
}

fn insert_statement<E: Entity>() -> String {
    format!(
        "INSERT INTO {} ({}, {}) VALUES ({})",
        E::TABLE,
        E::KEY,
        E::COLUMNS.join(", "),
        vec!["?"; E::COLUMNS.len() + 1].join(", ")
    )
}

fn push_in_list(builder: &mut QueryBuilder<'_, Sqlite>, values: &[String]) {
    let mut separated = builder.separated(", ");
    for value in values {
        separated.push_bind(value.clone());
    }
    separated.push_unseparated(")");
}

#[instrument(skip(pool), fields(table = E::TABLE))]
pub async fn list<E: Entity>(pool: &Pool<Sqlite>) -> Result<Vec<E>, AppError> {
    info!("Listing rows");
    let sql = format!("SELECT * FROM {} ORDER BY {}", E::TABLE, E::ORDER_BY);
    let rows = sqlx::query_as::<_, E>(&sql).fetch_all(pool).await?;

    Ok(rows)
}

#[instrument(skip(pool), fields(table = E::TABLE))]
pub async fn list_by<E: Entity>(
    pool: &Pool<Sqlite>,
    column: &'static str,
    value: &str,
) -> Result<Vec<E>, AppError> {
    info!("Listing rows by parent");
    let sql = format!(
        "SELECT * FROM {} WHERE {} = ? ORDER BY {}",
        E::TABLE,
        column,
        E::ORDER_BY
    );
    let rows = sqlx::query_as::<_, E>(&sql)
        .bind(value)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

#[instrument(skip(pool, values), fields(table = E::TABLE, count = values.len()))]
pub async fn list_in<E: Entity>(
    pool: &Pool<Sqlite>,
    column: &'static str,
    values: &[String],
) -> Result<Vec<E>, AppError> {
    info!("Listing rows by parent set");
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Sqlite>::new(format!(
        "SELECT * FROM {} WHERE {} IN (",
        E::TABLE,
        column
    ));
    push_in_list(&mut builder, values);
    builder.push(format!(" ORDER BY {}", E::ORDER_BY));

    let rows = builder.build_query_as::<E>().fetch_all(pool).await?;

    Ok(rows)
}

#[instrument(skip(pool), fields(table = E::TABLE))]
pub async fn exists<E: Entity>(pool: &Pool<Sqlite>, id: &str) -> Result<bool, AppError> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?)",
        E::TABLE,
        E::KEY
    );
    let found = sqlx::query_scalar::<_, bool>(&sql)
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(found)
}

#[instrument(skip(pool), fields(table = E::TABLE))]
pub async fn find<E: Entity>(pool: &Pool<Sqlite>, id: &str) -> Result<Option<E>, AppError> {
    info!("Fetching row by key");
    let sql = format!("SELECT * FROM {} WHERE {} = ?", E::TABLE, E::KEY);
    let row = sqlx::query_as::<_, E>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn get<E: Entity>(pool: &Pool<Sqlite>, id: &str) -> Result<E, AppError> {
    match find::<E>(pool, id).await? {
        Some(row) => Ok(row),
        _ => Err(AppError::NotFound(format!(
            "{} with id {} not found in database",
            E::TABLE,
            id
        ))),
    }
}

#[instrument(skip(pool, entity), fields(table = E::TABLE, id = entity.id()))]
pub async fn insert<E: Entity>(pool: &Pool<Sqlite>, entity: &E) -> Result<(), AppError> {
    info!("Inserting row");
    let sql = insert_statement::<E>();
    entity
        .bind_columns(sqlx::query(&sql).bind(entity.id()))
        .execute(pool)
        .await?;

    Ok(())
}

/// Overwrites every non-key column of the row with the entity's key.
#[instrument(skip(pool, entity), fields(table = E::TABLE, id = entity.id()))]
pub async fn replace<E: Entity>(pool: &Pool<Sqlite>, entity: &E) -> Result<(), AppError> {
    info!("Replacing row");
    let assignments = E::COLUMNS
        .iter()
        .map(|column| format!("{} = ?", column))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        E::TABLE,
        assignments,
        E::KEY
    );

    let result = entity
        .bind_columns(sqlx::query(&sql))
        .bind(entity.id())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "{} with id {} not found in database",
            E::TABLE,
            entity.id()
        )));
    }

    Ok(())
}

#[instrument(skip(pool), fields(table = E::TABLE))]
pub async fn delete<E: Entity>(pool: &Pool<Sqlite>, id: &str) -> Result<(), AppError> {
    info!("Deleting row");
    let sql = format!("DELETE FROM {} WHERE {} = ?", E::TABLE, E::KEY);
    let result = sqlx::query(&sql).bind(id).execute(pool).await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "{} with id {} not found in database",
            E::TABLE,
            id
        )));
    }

    Ok(())
}

/// Deletes every row whose `parent_column` is in `parent_ids`, then inserts
/// `rows`, in one transaction. Callers validate `rows` beforehand.
#[instrument(skip(pool, parent_ids, rows), fields(table = E::TABLE, parents = parent_ids.len(), rows = rows.len()))]
pub async fn replace_children<E: Entity>(
    pool: &Pool<Sqlite>,
    parent_column: &'static str,
    parent_ids: &[String],
    rows: &[E],
) -> Result<u64, AppError> {
    info!("Replacing child rows");
    let mut tx = pool.begin().await?;

    let mut removed = 0;
    if !parent_ids.is_empty() {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "DELETE FROM {} WHERE {} IN (",
            E::TABLE,
            parent_column
        ));
        push_in_list(&mut builder, parent_ids);
        removed = builder.build().execute(&mut *tx).await?.rows_affected();
    }

    let sql = insert_statement::<E>();
    for row in rows {
        row.bind_columns(sqlx::query(&sql).bind(row.id()))
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    info!(removed, inserted = rows.len(), "Child rows replaced");

    Ok(removed)
}

#[instrument(skip(pool))]
pub async fn muscle_category_name_taken(
    pool: &Pool<Sqlite>,
    name: &str,
    exclude_id: Option<&str>,
) -> Result<bool, AppError> {
    let taken = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(
             SELECT 1 FROM muscle_categories
             WHERE name = ? AND muscle_category_id != ?
         )",
    )
    .bind(name)
    .bind(exclude_id.unwrap_or_default())
    .fetch_one(pool)
    .await?;

    Ok(taken)
}

#[instrument(skip(pool))]
pub async fn get_set_exercise_details(
    pool: &Pool<Sqlite>,
    set_id: &str,
) -> Result<Vec<SetExerciseDetail>, AppError> {
    info!("Getting set exercises");
    let rows = sqlx::query_as::<_, SetExerciseDetail>(
        "SELECT se.id, se.set_id, se.exercise_id, se.sort_order, se.duration, se.unit, se.count,
                e.name AS exercise_name, e.description, e.image_url
         FROM set_exercises se
         JOIN sets s ON s.set_id = se.set_id
         JOIN exercises e ON e.exercise_id = se.exercise_id
         WHERE se.set_id = ?
         ORDER BY se.sort_order, se.rowid",
    )
    .bind(set_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Exercises placed in any of `set_ids`, one row per placement.
#[instrument(skip(pool, set_ids), fields(sets = set_ids.len()))]
pub async fn get_exercises_for_sets(
    pool: &Pool<Sqlite>,
    set_ids: &[String],
) -> Result<Vec<SinkExerciseRow>, AppError> {
    info!("Getting exercises for sets");
    if set_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Sqlite>::new(
        "SELECT se.set_id, se.sort_order, e.exercise_id, e.name, e.description, e.image_url
         FROM exercises e
         JOIN set_exercises se ON se.exercise_id = e.exercise_id
         WHERE se.set_id IN (",
    );
    push_in_list(&mut builder, set_ids);
    builder.push(" ORDER BY se.sort_order, se.rowid");

    let rows = builder
        .build_query_as::<SinkExerciseRow>()
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Muscles targeted by any of `exercise_ids`, one row per pairing.
#[instrument(skip(pool, exercise_ids), fields(exercises = exercise_ids.len()))]
pub async fn get_muscles_for_exercises(
    pool: &Pool<Sqlite>,
    exercise_ids: &[String],
) -> Result<Vec<SinkMuscleRow>, AppError> {
    info!("Getting muscles for exercises");
    if exercise_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Sqlite>::new(
        "SELECT m.muscle_id, m.muscle_category_id, em.exercise_id, m.name
         FROM muscles m
         JOIN exercise_muscles em ON em.muscle_id = m.muscle_id
         WHERE em.exercise_id IN (",
    );
    push_in_list(&mut builder, exercise_ids);
    builder.push(" ORDER BY em.rowid");

    let rows = builder
        .build_query_as::<SinkMuscleRow>()
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
