use crate::cli::Args;
use crate::database::Database;
use crate::date_provider::{
    DateProvider, FixedDateProvider, OverrideDateProvider, SystemDateProvider,
};
use crate::error::Result;
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use std::sync::Arc;

pub const DEFAULT_DB_PATH: &str = "lang_portal.db";

/// Database configuration
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    /// Whether to use in-memory database
    pub is_test_mode: bool,
    /// Custom database file path (ignored if in test mode)
    pub custom_path: Option<String>,
    /// Calendar day to report as today, keeping the wall-clock time of day
    pub override_date: Option<NaiveDate>,
    /// Frozen clock; takes precedence over `override_date`
    pub fixed_time: Option<DateTime<Utc>>,
}

impl DatabaseConfig {
    pub fn builder() -> DatabaseConfigBuilder {
        DatabaseConfigBuilder::default()
    }

    /// Gets the effective database path
    pub fn get_path(&self) -> &str {
        if self.is_test_mode {
            ":memory:"
        } else {
            self.custom_path.as_deref().unwrap_or(DEFAULT_DB_PATH)
        }
    }

    fn date_provider(&self) -> Arc<dyn DateProvider> {
        match (self.fixed_time, self.override_date) {
            (Some(instant), _) => Arc::new(FixedDateProvider::new(instant)),
            (None, Some(date)) => Arc::new(OverrideDateProvider::new(date)),
            (None, None) => Arc::new(SystemDateProvider),
        }
    }
}

#[derive(Debug, Default)]
pub struct DatabaseConfigBuilder {
    config: DatabaseConfig,
}

impl DatabaseConfigBuilder {
    pub fn test_mode(mut self) -> Self {
        self.config.is_test_mode = true;
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.config.custom_path = Some(path.into());
        self
    }

    pub fn override_date(mut self, date: NaiveDate) -> Self {
        self.config.override_date = Some(date);
        self
    }

    pub fn fixed_time(mut self, instant: DateTime<Utc>) -> Self {
        self.config.fixed_time = Some(instant);
        self
    }

    /// Freezes the clock at noon UTC of the given day. An impossible date leaves the clock untouched.
    pub fn date_ymd(self, year: i32, month: u32, day: u32) -> Self {
        match NaiveDate::from_ymd_opt(year, month, day).and_then(|d| d.and_hms_opt(12, 0, 0)) {
            Some(noon) => self.fixed_time(noon.and_utc()),
            None => self,
        }
    }

    pub fn build(self) -> DatabaseConfig {
        self.config
    }
}

/// Factory for creating Database instances
pub struct DatabaseFactory;

impl DatabaseFactory {
    /// Creates a database with the specified configuration
    pub fn create(config: DatabaseConfig) -> Result<Database> {
        let path = config.get_path();
        info!("Opening database at {}", path);
        Database::with_date_provider(path, config.date_provider())
    }

    /// Builds the configuration from parsed command line arguments
    pub fn config_from_args(args: &Args) -> std::result::Result<DatabaseConfig, String> {
        Ok(DatabaseConfig {
            is_test_mode: args.test,
            custom_path: args
                .db_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            override_date: args.validate_override_date()?,
            fixed_time: None,
        })
    }
}
