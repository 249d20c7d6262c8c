use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("notebook not found: {0}")]
    NotFound(String),
    #[error("invalid notebook json: {0}")]
    InvalidJson(String),
    #[error("io error: {0}")]
    Io(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidJson(_) => "INVALID_JSON",
            Self::Io(_) => "IO_ERROR",
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        if value.is_io() {
            Self::Io(value.to_string())
        } else {
            Self::InvalidJson(value.to_string())
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
