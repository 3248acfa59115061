use std::path::Path;

use anyhow::Result;
use chrono_tz::Tz;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::constants::{DEFAULT_CALENDAR_NAME, DEFAULT_PRODID, DEFAULT_TIMEZONE};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub calendar: CalendarConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// PRODID written into every generated VCALENDAR.
    pub prodid: String,
    /// Remote calendar name used by provider uploads.
    pub name: String,
    /// IANA zone attached to provider payload date-times.
    pub timezone: String,
}

impl CalendarConfig {
    /// ## Summary
    /// Resolves the configured IANA zone name.
    ///
    /// ## Errors
    /// Returns `CoreError::UnknownTimeZone` if the name is not in the tz database.
    pub fn tz(&self) -> CoreResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_err| CoreError::UnknownTimeZone(self.timezone.clone()))
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            prodid: DEFAULT_PRODID.to_string(),
            name: DEFAULT_CALENDAR_NAME.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    builder
        .set_default("calendar.prodid", DEFAULT_PRODID)?
        .set_default("calendar.name", DEFAULT_CALENDAR_NAME)?
        .set_default("calendar.timezone", DEFAULT_TIMEZONE)?
        .set_default("logging.level", "info")
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, environment variables and an optional TOML file.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = with_defaults(Config::builder())?;

        builder = match file {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name("config.toml").required(false)),
        };

        Ok(builder
            .add_source(
                config::Environment::with_prefix("COURSECAL")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            calendar: CalendarConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

/// ## Summary
/// Loads configuration from environment variables, `.env` file and an optional TOML file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config(file: Option<&Path>) -> Result<Settings> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    Settings::load(file)
}
