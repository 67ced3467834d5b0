use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    BadRequest,
    NotFound,
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct OrderdeskError {
    pub code: ErrorCode,
    pub message: String,
}

impl OrderdeskError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Generic client error. Detail is logged at the rejection site, never
    /// surfaced to the caller.
    pub fn bad_request() -> Self {
        Self::new(ErrorCode::BadRequest, "Invalid request data")
    }

    pub fn not_found(entity: &str, id: i64) -> Self {
        Self::new(ErrorCode::NotFound, format!("{entity} not found: {id}"))
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }
}

impl From<rusqlite::Error> for OrderdeskError {
    fn from(e: rusqlite::Error) -> Self {
        Self::database(e.to_string())
    }
}
