use thiserror::Error;

/// Shown when the identity service fails without a usable error message.
pub const GENERIC_REMOTE_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("You must be logged in to manage members")]
    NotLoggedIn,

    #[error("No active organization selected")]
    NoActiveOrganization,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    PlanRequired(String),

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Remote(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug)]
pub enum ErrorCode {
    NotLoggedIn,
    NoActiveOrganization,
    InvalidInput,
    PlanRequired,
    NotFound,
    RemoteError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotLoggedIn => "NOT_LOGGED_IN",
            ErrorCode::NoActiveOrganization => "NO_ACTIVE_ORGANIZATION",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::PlanRequired => "PLAN_REQUIRED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::RemoteError => "REMOTE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
