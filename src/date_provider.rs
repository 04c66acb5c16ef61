use chrono::{DateTime, NaiveDate, Timelike, Utc};

/// Trait for providing the current date/time to the database
/// This allows for flexible date handling (system time, overrides, etc.)
pub trait DateProvider: Send + Sync {
    /// Get the current date/time
    fn get_current_time(&self) -> DateTime<Utc>;

    /// Calendar day (UTC) of the current time
    fn today(&self) -> NaiveDate {
        self.get_current_time().date_naive()
    }
}

/// Default date provider that uses the system's current date/time
pub struct SystemDateProvider;

impl DateProvider for SystemDateProvider {
    fn get_current_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Date provider that uses an overridden date instead of system time
/// Preserves the current hours/minutes/seconds from system time
pub struct OverrideDateProvider {
    override_date: NaiveDate,
}

impl OverrideDateProvider {
    pub fn new(override_date: NaiveDate) -> Self {
        Self { override_date }
    }
}

impl DateProvider for OverrideDateProvider {
    fn get_current_time(&self) -> DateTime<Utc> {
        let now = Utc::now();
        let naive_datetime = self
            .override_date
            .and_hms_opt(now.hour(), now.minute(), now.second())
            .unwrap_or_else(|| self.override_date.and_time(chrono::NaiveTime::MIN));
        DateTime::from_naive_utc_and_offset(naive_datetime, Utc)
    }
}

/// Always reports the same instant
pub struct FixedDateProvider {
    instant: DateTime<Utc>,
}

impl FixedDateProvider {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl DateProvider for FixedDateProvider {
    fn get_current_time(&self) -> DateTime<Utc> {
        self.instant
    }
}
