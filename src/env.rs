use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

/// What happened to one environment file during startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFile {
    Loaded(&'static str),
    Skipped(&'static str),
}

/// Loads the env files for the active profile. Runs before the tracing
/// subscriber exists, so the outcome is returned for `log_environment`.
pub fn load_environment() -> anyhow::Result<Vec<EnvFile>> {
    let is_production =
        dotenvy::var("ROCKET_PROFILE").unwrap_or("development".to_string()) == "production";

    let env_files = if is_production {
        ["config/common.env", "config/prod.env", ".secrets.env"]
    } else {
        ["config/common.env", "config/dev.env", ".secrets.env"]
    };

    env_files.into_iter().map(load_env_file).collect()
}

pub fn log_environment(files: &[EnvFile]) {
    for file in files {
        match file {
            EnvFile::Loaded(path) => info!("Loaded environment from: {}", path),
            EnvFile::Skipped(path) => warn!("Environment file {} not found, skipping", path),
        }
    }
}

fn load_env_file(path: &'static str) -> anyhow::Result<EnvFile> {
    if !Path::new(path).exists() {
        return Ok(EnvFile::Skipped(path));
    }

    dotenvy::from_filename_override(path)
        .with_context(|| format!("failed to load environment file {}", path))?;
    Ok(EnvFile::Loaded(path))
}
