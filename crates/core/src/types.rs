/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Day-granular dates: registration dates, survey creation dates, and the
/// stats `last_update` column are all calendar days, not instants.
pub type Date = chrono::NaiveDate;
