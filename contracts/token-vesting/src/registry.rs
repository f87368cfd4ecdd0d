use cosmwasm_std::{Addr, StdResult, Storage, Uint128};

use vesting_core::vesting::{BeneficiaryAccount, State, VestingPeriod, VestingSchedule};

use crate::error::ContractError;
use crate::state::{BENEFICIARIES, STATE};

/// A batch of beneficiaries whose schedules have all passed validation
#[derive(Clone, Debug, PartialEq)]
pub struct Batch {
    pub entries: Vec<(Addr, VestingSchedule)>,
    /// Sum of the full amounts of every schedule in the batch
    pub total: Uint128,
}

/// Validate every schedule of a batch. Nothing is written to storage.
///
/// A beneficiary listed more than once keeps only its last schedule, and `total` only counts
/// the schedules that will actually be stored.
pub fn prepare(entries: Vec<(Addr, Vec<VestingPeriod>)>) -> Result<Batch, ContractError> {
    let mut validated: Vec<(Addr, VestingSchedule)> = Vec::with_capacity(entries.len());

    for (beneficiary, periods) in entries {
        let schedule = VestingSchedule::new(periods)?;
        match validated.iter_mut().find(|(address, _)| *address == beneficiary) {
            Some(entry) => entry.1 = schedule,
            None => validated.push((beneficiary, schedule)),
        }
    }

    let total = validated
        .iter()
        .try_fold(Uint128::zero(), |total, (_, schedule)| -> StdResult<_> {
            Ok(total.checked_add(schedule.total_amount()?)?)
        })?;

    Ok(Batch {
        entries: validated,
        total,
    })
}

pub fn ensure_setup_open(storage: &dyn Storage) -> Result<State, ContractError> {
    let state = STATE.load(storage)?;
    if state.setup_closed {
        return Err(ContractError::SetupClosed {});
    }
    Ok(state)
}

/// Write a validated batch. A beneficiary that is already registered gets its schedule replaced
/// and its claimed amount reset to zero. The new totals are computed for the whole batch before
/// anything is written.
pub fn register(storage: &mut dyn Storage, batch: Batch) -> Result<State, ContractError> {
    let mut state = ensure_setup_open(storage)?;

    for (beneficiary, schedule) in &batch.entries {
        match BENEFICIARIES.may_load(storage, beneficiary)? {
            Some(previous) => {
                state.total_allocated = state
                    .total_allocated
                    .checked_sub(previous.schedule.total_amount()?)?;
                state.total_claimed = state.total_claimed.checked_sub(previous.claimed)?;
            }
            None => {
                state.beneficiary_count += 1;
            }
        }

        state.total_allocated = state.total_allocated.checked_add(schedule.total_amount()?)?;
    }

    for (beneficiary, schedule) in batch.entries {
        BENEFICIARIES.save(storage, &beneficiary, &BeneficiaryAccount::new(schedule))?;
    }

    STATE.save(storage, &state)?;
    Ok(state)
}

/// Validate and register `(beneficiary, periods)` pairs. Either every entry is written or none is.
pub fn add_beneficiaries(
    storage: &mut dyn Storage,
    entries: Vec<(Addr, Vec<VestingPeriod>)>,
) -> Result<State, ContractError> {
    ensure_setup_open(storage)?;
    let batch = prepare(entries)?;
    register(storage, batch)
}

/// Close the setup phase for good. Closing twice is an error.
pub fn end_setup(storage: &mut dyn Storage) -> Result<State, ContractError> {
    let mut state = STATE.load(storage)?;
    if state.setup_closed {
        return Err(ContractError::AlreadyClosed {});
    }
    state.setup_closed = true;
    STATE.save(storage, &state)?;
    Ok(state)
}
