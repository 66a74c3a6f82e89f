/// All primary keys are UUIDs generated by the application at insert time.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Free-form, string-keyed JSON object (job state, extracted entry data).
pub type StateMap = serde_json::Map<String, serde_json::Value>;
