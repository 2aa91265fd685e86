use std::path::Path;

use config::{Config, ConfigError};
use once_cell::sync::Lazy;
use rocket::serde::Deserialize;

#[derive(Deserialize, Clone)]
#[serde(crate = "rocket::serde")]
pub struct DbConfig {
    pub location: String,
}

/// where uploaded files and user directories are stored on the disk
#[derive(Deserialize, Clone)]
#[serde(crate = "rocket::serde")]
pub struct FilesConfig {
    pub directory: String,
}

#[derive(Deserialize, Clone)]
#[serde(crate = "rocket::serde")]
pub struct LoggingConfig {
    /// one of `off`, `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
    /// if present, log lines are also appended to this file
    pub file: Option<String>,
}

/// config properties for the whole of this application
#[derive(Deserialize, Clone)]
#[serde(crate = "rocket::serde")]
pub struct DriveConfig {
    pub database: DbConfig,
    pub files: FilesConfig,
    pub logging: LoggingConfig,
}

/// Parses the config file located at ./Drive.toml, if it exists.
/// If the file exists but can't be parsed, the application will panic
pub fn parse_config() -> DriveConfig {
    match parse_config_file("./Drive.toml") {
        Ok(config) => config,
        // basically everything else is unrecoverable, though
        Err(e) => panic!("Failed to parse config file. Exception is {e}"),
    }
}

/// reads the toml file at `path` over the default config. Keys missing from the file keep their default value
fn parse_config_file(path: &str) -> Result<DriveConfig, ConfigError> {
    if !Path::new(path).is_file() {
        log::warn!("No config file found. Continuing startup...");
    }
    let defaults = &*DRIVE_CONFIG_DEFAULT;
    Config::builder()
        .set_default("database.location", defaults.database.location.as_str())?
        .set_default("files.directory", defaults.files.directory.as_str())?
        .set_default("logging.level", defaults.logging.level.as_str())?
        .add_source(config::File::with_name(path).required(false))
        .build()?
        .try_deserialize()
}

/// global variable for config, that way it doesn't need to be repeatedly parsed
pub static DRIVE_CONFIG: Lazy<DriveConfig> = Lazy::new(parse_config);
static DRIVE_CONFIG_DEFAULT: Lazy<DriveConfig> = Lazy::new(|| DriveConfig {
    database: DbConfig {
        location: "./drive.sqlite".to_string(),
    },
    files: FilesConfig {
        directory: "./files".to_string(),
    },
    logging: LoggingConfig {
        level: "info".to_string(),
        file: None,
    },
});
