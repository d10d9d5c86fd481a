//! Error type shared by the store and the procedures built on top of it.

use rusqlite::ErrorCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required identifier was not supplied.
    #[error("{0}")]
    MissingInput(&'static str),

    /// The input was supplied but has the wrong shape (bad UUID, null for a
    /// non-nullable column, ...).
    #[error("{0}")]
    InvalidInput(String),

    /// The addressed row does not exist.
    #[error("{0}")]
    NotFound(&'static str),

    /// The store rejected the write (foreign key, uniqueness, NOT NULL).
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Any other failure reported by the store.
    #[error("database error: {0}")]
    Store(rusqlite::Error),

    /// The database file or its directory could not be prepared.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, msg)
                if e.code == ErrorCode::ConstraintViolation =>
            {
                let detail = msg.clone().unwrap_or_else(|| e.to_string());
                Error::ConstraintViolation(detail)
            }
            _ => Error::Store(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_failures_are_classified() {
        let sqlite = rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY);
        let err: Error = rusqlite::Error::SqliteFailure(
            sqlite,
            Some("FOREIGN KEY constraint failed".into()),
        )
        .into();

        match err {
            Error::ConstraintViolation(msg) => assert_eq!(msg, "FOREIGN KEY constraint failed"),
            other => panic!("expected constraint violation, got {other:?}"),
        }
    }

    #[test]
    fn other_failures_stay_store_errors() {
        let err: Error = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, Error::Store(_)));
    }

    #[test]
    fn messages_match_the_wire_text() {
        assert_eq!(
            Error::MissingInput("Id is not provided").to_string(),
            "Id is not provided"
        );
        assert_eq!(
            Error::NotFound("Student not found").to_string(),
            "Student not found"
        );
    }
}
