use rusqlite::ErrorCode;
use thiserror::Error;

/// Failures surfaced by the store and everything built on top of it.
///
/// Missing rows are not errors: lookups return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Foreign key, uniqueness or trigger check rejected a write
    #[error("constraint violation: {0}")]
    Constraint(String),
    /// Connection, statement or transaction failure
    #[error("storage error: {0}")]
    Storage(#[source] rusqlite::Error),
    /// The embedded schema could not be applied
    #[error("migration error: {0}")]
    Migration(String),
}

impl StoreError {
    /// Message safe to hand to a client; never includes SQL or engine details.
    pub fn public_message(&self) -> &'static str {
        match self {
            StoreError::Constraint(_) => "the request conflicts with existing data",
            StoreError::Storage(_) | StoreError::Migration(_) => "internal storage failure",
        }
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, StoreError::Constraint(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &err {
            if failure.code == ErrorCode::ConstraintViolation {
                return StoreError::Constraint(
                    message.clone().unwrap_or_else(|| failure.to_string()),
                );
            }
        }
        StoreError::Storage(err)
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_constraint_failure_is_classified() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY); INSERT INTO t VALUES (1);")
            .unwrap();
        let err: StoreError = conn
            .execute("INSERT INTO t VALUES (1)", [])
            .unwrap_err()
            .into();
        assert!(err.is_constraint_violation());
    }

    #[test]
    fn test_other_failures_are_storage_errors() {
        let conn = Connection::open_in_memory().unwrap();
        let err: StoreError = conn
            .execute("SELECT * FROM missing_table", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, StoreError::Storage(_)));
    }

    #[test]
    fn test_public_message_hides_query_text() {
        let conn = Connection::open_in_memory().unwrap();
        let err: StoreError = conn
            .execute("SELECT * FROM missing_table", [])
            .unwrap_err()
            .into();
        assert!(err.to_string().contains("missing_table"));
        assert!(!err.public_message().contains("missing_table"));
    }

    #[test]
    fn test_storage_error_keeps_its_source() {
        use std::error::Error;

        let conn = Connection::open_in_memory().unwrap();
        let err: StoreError = conn
            .execute("SELECT * FROM missing_table", [])
            .unwrap_err()
            .into();
        let source = err.source().expect("storage errors expose the rusqlite error");
        assert!(source.to_string().contains("missing_table"));
    }
}
