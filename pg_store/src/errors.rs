use thiserror::Error;

/// Result of every public data-access operation
pub type Outcome<T> = Result<T, StoreError>;

/// Closed outcome taxonomy returned to callers.
///
/// `code` is a stable identifier picked by the call site for log correlation;
/// it carries no meaning beyond being unique per call site.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Bad request [{code}]: {message}")]
    BadRequest { code: u32, message: String },

    #[error("Not found [{code}]: {message}")]
    NotFound { code: u32, message: String },

    #[error("Conflict [{code}]: {message}")]
    Conflict { code: u32, message: String },

    #[error("Unauthorized [{code}]: {message}")]
    Unauthorized { code: u32, message: String },

    #[error("Internal error [{code}]: {message}")]
    Internal { code: u32, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Conflict,
    Unauthorized,
    Internal,
}

impl StoreError {
    pub fn bad_request(code: u32, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(code: u32, message: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
        }
    }

    pub fn conflict(code: u32, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(code: u32, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code,
            message: message.into(),
        }
    }

    pub fn internal(code: u32, message: impl Into<String>) -> Self {
        Self::Internal {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            Self::BadRequest { code, .. }
            | Self::NotFound { code, .. }
            | Self::Conflict { code, .. }
            | Self::Unauthorized { code, .. }
            | Self::Internal { code, .. } => *code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. }
            | Self::NotFound { message, .. }
            | Self::Conflict { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest { .. } => ErrorKind::BadRequest,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}

/// Raw failure reported by the database engine or the pool
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{detail}")]
pub struct DbFailure {
    /// SQLSTATE when the engine reported one
    pub code: Option<String>,
    pub detail: String,
}

impl DbFailure {
    pub fn new(code: Option<String>, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        self.code.as_deref() == Some(crate::outcome::UNIQUE_VIOLATION)
    }
}

impl From<sqlx::Error> for DbFailure {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                let detail = db_err
                    .try_downcast_ref::<sqlx::postgres::PgDatabaseError>()
                    .and_then(|pg_err| pg_err.detail())
                    .map(str::to_string)
                    .unwrap_or_else(|| db_err.message().to_string());
                Self::new(db_err.code().map(|c| c.into_owned()), detail)
            }
            other => Self::new(None, other.to_string()),
        }
    }
}

impl From<type_mapping::DecodeError> for DbFailure {
    fn from(err: type_mapping::DecodeError) -> Self {
        Self::new(None, err.to_string())
    }
}

/// Request shape errors, detected before any I/O
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Please specify at least one column")]
    NoColumns,

    #[error("Number of values does not match number of columns (row {row}: expected {expected}, got {found})")]
    WidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Please specify at least one row")]
    NoRows,

    #[error("Please specify at least one value")]
    EmptyValues,

    #[error("Please specify at least one condition")]
    EmptyConditions,

    #[error("Conflict key '{0}' is missing from the values")]
    MissingConflictKey(String),

    #[error("Please specify at least one conflict column")]
    NoConflictTarget,
}
