#[macro_use]
extern crate rocket;

mod api;
mod auth;
mod config;
mod db;
mod env;
mod error;
mod models;
mod sink;
mod telemetry;
mod validation;
#[cfg(test)]
mod test;

use auth::{default_catcher, unauthorized_api};
use config::AppConfig;
use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::{Build, Rocket};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use telemetry::{TelemetryFairing, init_tracing, shutdown_telemetry};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Anyhow(anyhow::Error),
    #[error("{0}")]
    Figment(rocket::figment::Error),
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("Server error: {0}")]
    Rocket(#[from] rocket::Error),
}

impl From<anyhow::Error> for Error {
    fn from(value: anyhow::Error) -> Self {
        Error::Anyhow(value)
    }
}

impl From<rocket::figment::Error> for Error {
    fn from(value: rocket::figment::Error) -> Self {
        Error::Figment(value)
    }
}

#[rocket::main]
async fn main() -> Result<(), Error> {
    let env_files = env::load_environment()?;
    init_tracing()?;
    env::log_environment(&env_files);

    let figment = AppConfig::figment();
    let config = AppConfig::from_figment(&figment)?;

    let pool = SqlitePoolOptions::new()
        .connect(&config.database_url)
        .await?;

    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations completed successfully");

    let _rocket = init_rocket(figment, pool, config).launch().await?;

    Ok(())
}

pub fn init_rocket(figment: Figment, pool: SqlitePool, config: AppConfig) -> Rocket<Build> {
    info!("Starting workout planner");

    rocket::custom(figment)
        .manage(pool)
        .manage(config)
        .mount("/", api::routes())
        .register("/", catchers![unauthorized_api, default_catcher])
        .attach(TelemetryFairing)
        .attach(AdHoc::on_shutdown("Telemetry shutdown", |_| {
            Box::pin(async {
                shutdown_telemetry();
            })
        }))
}
