use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

use vesting_core::error::CoreError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("Setup phase is closed")]
    SetupClosed {},

    #[error("Setup phase was already closed")]
    AlreadyClosed {},

    #[error("No vesting schedule registered for {address}")]
    UnknownBeneficiary { address: String },

    #[error("Token payout failed: {reason}")]
    TransferFailed { reason: String },

    #[error("Got {beneficiaries} beneficiaries but {schedules} schedules")]
    LengthMismatch { beneficiaries: usize, schedules: usize },

    #[error("Deposit of {deposited} does not match total allocation of {expected}")]
    DepositMismatch { deposited: String, expected: String },

    #[error("Only the vested token can be deposited")]
    InvalidTokenDeposit {},
}
