use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Invalid schedule: {reason}")]
    InvalidSchedule { reason: String },
}

impl CoreError {
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        CoreError::InvalidSchedule {
            reason: reason.into(),
        }
    }
}
