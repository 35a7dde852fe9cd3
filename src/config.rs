use rocket::figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://workout-planner.db?mode=rwc";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Shared secret expected in the `x-api-key` header of mutating calls.
    pub api_key: String,
    pub database_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Rocket's own configuration plus `API_KEY` / `DATABASE_URL` from the
    /// environment. Later providers win.
    pub fn figment() -> Figment {
        rocket::Config::figment()
            .join(Serialized::defaults(AppConfig::default()))
            .merge(Env::raw().only(&["api_key", "database_url"]))
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, rocket::figment::Error> {
        let config: AppConfig = figment.extract()?;

        if config.api_key.trim().is_empty() {
            return Err(rocket::figment::Error::from(
                "api_key must be configured and non-empty".to_string(),
            ));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_reads_environment() {
        temp_env::with_vars(
            [
                ("API_KEY", Some("secret")),
                ("DATABASE_URL", Some("sqlite::memory:")),
            ],
            || {
                let config =
                    AppConfig::from_figment(&AppConfig::figment()).expect("config should load");
                assert_eq!(config.api_key, "secret");
                assert_eq!(config.database_url, "sqlite::memory:");
            },
        );
    }

    #[test]
    #[serial]
    fn test_database_url_has_default() {
        temp_env::with_vars(
            [("API_KEY", Some("secret")), ("DATABASE_URL", None::<&str>)],
            || {
                let config =
                    AppConfig::from_figment(&AppConfig::figment()).expect("config should load");
                assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
            },
        );
    }

    #[test]
    #[serial]
    fn test_empty_api_key_is_rejected() {
        temp_env::with_vars([("API_KEY", Some("  "))], || {
            assert!(AppConfig::from_figment(&AppConfig::figment()).is_err());
        });
    }
}
