use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[source] sqlx::Error),

    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Unique constraint violated on {0}")]
    UniqueViolation(String),

    #[error("Invalid field name: {0}")]
    InvalidField(String),

    #[error("Write to {0} returned no row")]
    MissingRow(&'static str),
}

const UNIQUE_VIOLATION_CODE: &str = "23505";

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.code().as_deref() == Some(UNIQUE_VIOLATION_CODE)
        {
            return Self::UniqueViolation(db_err.constraint().unwrap_or("unknown").to_owned());
        }
        Self::Sqlx(err)
    }
}
