/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date without time of day. Page creation and publication dates
/// are compared at day granularity.
pub type Date = chrono::NaiveDate;
