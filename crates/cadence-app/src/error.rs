use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    RuleError(#[from] cadence_rule::error::RuleError),

    #[error(transparent)]
    CoreError(#[from] cadence_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
