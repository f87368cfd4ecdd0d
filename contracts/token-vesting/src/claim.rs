use cosmwasm_std::{Addr, Storage, Uint128};

use vesting_core::balance::BalanceMover;
use vesting_core::math::{claimable_now, vested_total};
use vesting_core::vesting::{BeneficiaryAccount, PayoutMode};

use crate::error::ContractError;
use crate::state::{BENEFICIARIES, CONFIG, STATE};

pub fn load_account(
    storage: &dyn Storage,
    beneficiary: &Addr,
) -> Result<BeneficiaryAccount, ContractError> {
    BENEFICIARIES
        .may_load(storage, beneficiary)?
        .ok_or_else(|| ContractError::UnknownBeneficiary {
            address: beneficiary.to_string(),
        })
}

/// Total amount vested for `beneficiary` at `timestamp`
pub fn vested_amount(
    storage: &dyn Storage,
    beneficiary: &Addr,
    timestamp: u64,
) -> Result<Uint128, ContractError> {
    let config = CONFIG.load(storage)?;
    let account = load_account(storage, beneficiary)?;
    Ok(vested_total(&account.schedule, &config.timing, timestamp)?)
}

/// Amount a claim for `beneficiary` would pay out at `timestamp`
pub fn tokens_to_claim(
    storage: &dyn Storage,
    beneficiary: &Addr,
    timestamp: u64,
) -> Result<Uint128, ContractError> {
    let config = CONFIG.load(storage)?;
    let account = load_account(storage, beneficiary)?;
    Ok(claimable_now(&account, &config.timing, timestamp)?)
}

/// Pay out everything `beneficiary` can claim at `timestamp` and return the amount paid.
///
/// Nothing claimable is a valid outcome: zero is returned and neither storage nor the mover is
/// touched. If the mover rejects the payout, the account and contract state are restored and
/// `TransferFailed` is returned.
pub fn claim_for<M: BalanceMover + ?Sized>(
    storage: &mut dyn Storage,
    mover: &mut M,
    beneficiary: &Addr,
    timestamp: u64,
) -> Result<Uint128, ContractError> {
    let config = CONFIG.load(storage)?;
    let account_before = load_account(storage, beneficiary)?;

    let claimable = claimable_now(&account_before, &config.timing, timestamp)?;
    if claimable.is_zero() {
        return Ok(Uint128::zero());
    }

    let state_before = STATE.load(storage)?;

    let mut account = account_before.clone();
    account.claimed = account.claimed.checked_add(claimable)?;
    let mut state = state_before.clone();
    state.total_claimed = state.total_claimed.checked_add(claimable)?;
    state.total_paid = state.total_paid.checked_add(claimable)?;

    BENEFICIARIES.save(storage, beneficiary, &account)?;
    STATE.save(storage, &state)?;

    let payout = match config.payout {
        PayoutMode::Transfer => mover.transfer(beneficiary, claimable),
        PayoutMode::Mint => mover.mint(beneficiary, claimable),
    };

    if let Err(err) = payout {
        BENEFICIARIES.save(storage, beneficiary, &account_before)?;
        STATE.save(storage, &state_before)?;
        return Err(ContractError::TransferFailed {
            reason: err.to_string(),
        });
    }

    Ok(claimable)
}
