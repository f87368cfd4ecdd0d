#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    from_binary, to_binary, Addr, Api, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdResult, Uint128,
};
use cw2::set_contract_version;
use cw20::Cw20ReceiveMsg;
use cw_storage_plus::Bound;

use vesting_core::error::CoreError;
use vesting_core::math::{claimable_now, vested_total};
use vesting_core::vesting::msg::{
    BeneficiariesResponse, BeneficiaryResponse, ConfigResponse, ExecuteMsg, FundingResponse,
    InstantiateMsg, QueryMsg, ReceiveMsg, StateResponse,
};
use vesting_core::vesting::{BeneficiaryAccount, Config, PayoutMode, VestingPeriod};

use crate::claim;
use crate::cw20_mover::Cw20Mover;
use crate::error::ContractError;
use crate::registry;
use crate::state::{BENEFICIARIES, CONFIG, STATE};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:token-vesting";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

//----------------------------------------------------------------------------------------
// Entry Points
//----------------------------------------------------------------------------------------

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = msg.check(deps.api, &info.sender, env.block.time.seconds())?;
    CONFIG.save(deps.storage, &config)?;
    STATE.save(deps.storage, &Default::default())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", &config.owner)
        .add_attribute("token", &config.token)
        .add_attribute("start_time", config.timing.start_time.to_string())
        .add_attribute(
            "locking_period_days",
            config.timing.locking_period_days.to_string(),
        ))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Receive(cw20_msg) => execute_receive_cw20(deps, info, cw20_msg),
        ExecuteMsg::AddBeneficiaries {
            beneficiaries,
            schedules,
        } => execute_add_beneficiaries(deps, info, beneficiaries, schedules),
        ExecuteMsg::EndSetup {} => execute_end_setup(deps, info),
        ExecuteMsg::ClaimFor { beneficiary } => {
            let beneficiary = deps.api.addr_validate(&beneficiary)?;
            execute_claim(deps, env, beneficiary)
        }
        ExecuteMsg::Claim {} => execute_claim(deps, env, info.sender),
    }
}

fn execute_receive_cw20(
    deps: DepsMut,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let creator = deps.api.addr_validate(&cw20_msg.sender)?;
    match from_binary(&cw20_msg.msg)? {
        ReceiveMsg::AddBeneficiaries {
            beneficiaries,
            schedules,
        } => execute_fund_beneficiaries(
            deps,
            info.sender,
            creator,
            cw20_msg.amount,
            beneficiaries,
            schedules,
        ),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let now = env.block.time.seconds();
    match msg {
        QueryMsg::Config {} => Ok(to_binary(&query_config(deps)?)?),
        QueryMsg::State {} => Ok(to_binary(&query_state(deps)?)?),
        QueryMsg::Beneficiary { address } => {
            Ok(to_binary(&query_beneficiary(deps, now, address)?)?)
        }
        QueryMsg::TokensToClaim { address } => {
            let address = deps.api.addr_validate(&address)?;
            Ok(to_binary(&claim::tokens_to_claim(deps.storage, &address, now)?)?)
        }
        QueryMsg::VestedAmount { address, timestamp } => {
            let address = deps.api.addr_validate(&address)?;
            let timestamp = timestamp.unwrap_or(now);
            Ok(to_binary(&claim::vested_amount(deps.storage, &address, timestamp)?)?)
        }
        QueryMsg::Beneficiaries { start_after, limit } => Ok(to_binary(
            &query_beneficiaries(deps, now, start_after, limit)?,
        )?),
        QueryMsg::Funding {} => Ok(to_binary(&query_funding(deps, env)?)?),
    }
}

//----------------------------------------------------------------------------------------
// Execute Points
//----------------------------------------------------------------------------------------

fn execute_add_beneficiaries(
    deps: DepsMut,
    info: MessageInfo,
    beneficiaries: Vec<String>,
    schedules: Vec<Vec<VestingPeriod>>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    let entries = pair_schedules(deps.api, beneficiaries, schedules)?;
    let count = entries.len();
    let state = registry::add_beneficiaries(deps.storage, entries)?;

    Ok(Response::new()
        .add_attribute("action", "add_beneficiaries")
        .add_attribute("count", count.to_string())
        .add_attribute("total_allocated", state.total_allocated))
}

/// Register a batch paid for by a CW20 `Send` of exactly the batch's total amount
fn execute_fund_beneficiaries(
    deps: DepsMut,
    deposit_token: Addr,
    creator: Addr,
    deposit_amount: Uint128,
    beneficiaries: Vec<String>,
    schedules: Vec<Vec<VestingPeriod>>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if deposit_token != config.token {
        return Err(ContractError::InvalidTokenDeposit {});
    }

    assert_owner(&config, &creator)?;
    registry::ensure_setup_open(deps.storage)?;

    let entries = pair_schedules(deps.api, beneficiaries, schedules)?;
    let batch = registry::prepare(entries)?;
    let count = batch.entries.len();

    if batch.total != deposit_amount {
        return Err(ContractError::DepositMismatch {
            deposited: deposit_amount.to_string(),
            expected: batch.total.to_string(),
        });
    }

    let state = registry::register(deps.storage, batch)?;

    Ok(Response::new()
        .add_attribute("action", "add_beneficiaries")
        .add_attribute("count", count.to_string())
        .add_attribute("deposit", deposit_amount)
        .add_attribute("total_allocated", state.total_allocated))
}

fn execute_end_setup(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    let state = registry::end_setup(deps.storage)?;

    Ok(Response::new()
        .add_attribute("action", "end_setup")
        .add_attribute("beneficiary_count", state.beneficiary_count.to_string())
        .add_attribute("total_allocated", state.total_allocated))
}

fn execute_claim(deps: DepsMut, env: Env, beneficiary: Addr) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut mover = Cw20Mover::new(deps.querier, config.token, env.contract.address);

    let claimed = claim::claim_for(
        deps.storage,
        &mut mover,
        &beneficiary,
        env.block.time.seconds(),
    )?;
    let state = STATE.load(deps.storage)?;

    Ok(Response::new()
        .add_messages(mover.into_messages())
        .add_attribute("action", "claim")
        .add_attribute("beneficiary", &beneficiary)
        .add_attribute("claimed", claimed)
        .add_attribute("total_claimed", state.total_claimed))
}

//----------------------------------------------------------------------------------------
// Query Functions
//----------------------------------------------------------------------------------------

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    CONFIG.load(deps.storage)
}

fn query_state(deps: Deps) -> StdResult<StateResponse> {
    STATE.load(deps.storage)
}

fn query_beneficiary(
    deps: Deps,
    now: u64,
    address: String,
) -> Result<BeneficiaryResponse, ContractError> {
    let address = deps.api.addr_validate(&address)?;
    let config = CONFIG.load(deps.storage)?;
    let account = claim::load_account(deps.storage, &address)?;
    Ok(beneficiary_response(&config, now, address, account)?)
}

fn query_beneficiaries(
    deps: Deps,
    now: u64,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<BeneficiariesResponse> {
    let config = CONFIG.load(deps.storage)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = match start_after {
        Some(address) => {
            let address = deps.api.addr_validate(&address)?;
            Some(Bound::Exclusive(address.as_bytes().to_vec()))
        }
        None => None,
    };

    let beneficiaries = BENEFICIARIES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (address_bytes, account) = item?;
            let address = Addr::unchecked(String::from_utf8(address_bytes)?);
            beneficiary_response(&config, now, address, account)
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(BeneficiariesResponse { beneficiaries })
}

fn query_funding(deps: Deps, env: Env) -> StdResult<FundingResponse> {
    let config = CONFIG.load(deps.storage)?;
    let state = STATE.load(deps.storage)?;

    let mover = Cw20Mover::new(deps.querier, config.token, env.contract.address);
    let balance = mover.holder_balance()?;
    let outstanding = state.outstanding()?;
    let shortfall = match config.payout {
        PayoutMode::Transfer => outstanding.saturating_sub(balance),
        PayoutMode::Mint => Uint128::zero(),
    };

    Ok(FundingResponse {
        balance,
        outstanding,
        shortfall,
    })
}

//----------------------------------------------------------------------------------------
// Helper Functions
//----------------------------------------------------------------------------------------

fn assert_owner(config: &Config<Addr>, sender: &Addr) -> Result<(), ContractError> {
    if sender != &config.owner {
        return Err(CoreError::Unauthorized {}.into());
    }
    Ok(())
}

/// Zip beneficiary addresses with their schedules, validating every address
fn pair_schedules(
    api: &dyn Api,
    beneficiaries: Vec<String>,
    schedules: Vec<Vec<VestingPeriod>>,
) -> Result<Vec<(Addr, Vec<VestingPeriod>)>, ContractError> {
    if beneficiaries.len() != schedules.len() {
        return Err(ContractError::LengthMismatch {
            beneficiaries: beneficiaries.len(),
            schedules: schedules.len(),
        });
    }

    beneficiaries
        .iter()
        .zip(schedules.into_iter())
        .map(|(address, periods)| Ok((api.addr_validate(address)?, periods)))
        .collect()
}

fn beneficiary_response(
    config: &Config<Addr>,
    now: u64,
    address: Addr,
    account: BeneficiaryAccount,
) -> StdResult<BeneficiaryResponse> {
    Ok(BeneficiaryResponse {
        address,
        total_amount: account.schedule.total_amount()?,
        vested: vested_total(&account.schedule, &config.timing, now)?,
        claimed: account.claimed,
        claimable: claimable_now(&account, &config.timing, now)?,
        schedule: account.schedule,
    })
}

//----------------------------------------------------------------------------------------
// Tests
//----------------------------------------------------------------------------------------
