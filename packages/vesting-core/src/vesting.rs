use cosmwasm_std::{Addr, Api, StdResult, Uint128};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const SECONDS_PER_DAY: u64 = 86_400;

/// A contiguous span of `duration_days` days during which `tokens_per_day` tokens unlock for
/// every full day elapsed. A zero rate models a lock embedded inside the schedule.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, JsonSchema)]
pub struct VestingPeriod {
    /// Amount unlocked per full elapsed day, in the token's smallest unit
    pub tokens_per_day: Uint128,
    /// Length of the period in days, never zero in a stored schedule
    pub duration_days: u64,
}

impl VestingPeriod {
    pub fn total_amount(&self) -> StdResult<Uint128> {
        Ok(self
            .tokens_per_day
            .checked_mul(Uint128::from(self.duration_days))?)
    }
}

/// Where an elapsed-day count falls inside a schedule
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodPosition {
    /// Index of the period the day belongs to
    pub index: usize,
    /// Number of full days already spent inside that period
    pub day_in_period: u64,
}

/// Ordered vesting periods of a single beneficiary. Periods are consumed front to back as
/// time passes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct VestingSchedule {
    periods: Vec<VestingPeriod>,
}

impl VestingSchedule {
    /// Build a schedule, rejecting empty period lists, zero-length periods and totals that do
    /// not fit in a `Uint128`
    pub fn new(periods: Vec<VestingPeriod>) -> Result<Self, CoreError> {
        if periods.is_empty() {
            return Err(CoreError::invalid_schedule("schedule has no periods"));
        }

        if let Some(index) = periods.iter().position(|period| period.duration_days == 0) {
            return Err(CoreError::invalid_schedule(format!(
                "period {} has a duration of zero days",
                index
            )));
        }

        let mut duration_days = 0u64;
        for period in &periods {
            duration_days = duration_days
                .checked_add(period.duration_days)
                .ok_or_else(|| CoreError::invalid_schedule("total duration overflows"))?;
        }

        let schedule = VestingSchedule { periods };
        schedule
            .total_amount()
            .map_err(|_| CoreError::invalid_schedule("total amount overflows"))?;

        Ok(schedule)
    }

    pub fn periods(&self) -> &[VestingPeriod] {
        &self.periods
    }

    /// Sum of `tokens_per_day * duration_days` over all periods
    pub fn total_amount(&self) -> StdResult<Uint128> {
        self.periods
            .iter()
            .try_fold(Uint128::zero(), |total, period| -> StdResult<_> {
                Ok(total.checked_add(period.total_amount()?)?)
            })
    }

    pub fn total_duration_days(&self) -> u64 {
        self.periods
            .iter()
            .fold(0u64, |total, period| total.saturating_add(period.duration_days))
    }

    /// Find the period containing the given day (counted from the first day of the first period).
    /// Returns `None` once the day lies beyond the end of the schedule.
    pub fn locate(&self, day: u64) -> Option<PeriodPosition> {
        let mut period_start = 0u64;
        for (index, period) in self.periods.iter().enumerate() {
            let period_end = period_start.saturating_add(period.duration_days);
            if day < period_end {
                return Some(PeriodPosition {
                    index,
                    day_in_period: day - period_start,
                });
            }
            period_start = period_end;
        }
        None
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct BeneficiaryAccount {
    pub schedule: VestingSchedule,
    /// Amount already paid out to the beneficiary
    pub claimed: Uint128,
}

impl BeneficiaryAccount {
    pub fn new(schedule: VestingSchedule) -> Self {
        BeneficiaryAccount {
            schedule,
            claimed: Uint128::zero(),
        }
    }
}

/// Timing parameters shared by every beneficiary
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, JsonSchema)]
pub struct GlobalConfig {
    /// Token generation event, in seconds. Nothing unlocks before it
    pub start_time: u64,
    /// Days after the TGE during which nothing unlocks. Does not consume schedule duration
    pub locking_period_days: u64,
}

impl GlobalConfig {
    /// First second at which any token can unlock
    pub fn vesting_start(&self) -> u64 {
        self.start_time
            .saturating_add(self.locking_period_days.saturating_mul(SECONDS_PER_DAY))
    }
}

/// How claimed tokens reach the beneficiary
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PayoutMode {
    /// Transfer from the balance pre-funded to the vesting contract
    Transfer,
    /// Mint new tokens; the vesting contract must be a minter of the token
    Mint,
}

impl Default for PayoutMode {
    fn default() -> Self {
        PayoutMode::Transfer
    }
}

// T = String (unchecked) or Addr (checked)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Config<T> {
    /// Account allowed to register beneficiaries and close the setup phase
    pub owner: T,
    /// Address of the CW20 token being vested
    pub token: T,
    pub payout: PayoutMode,
    pub timing: GlobalConfig,
}

impl Config<String> {
    pub fn check(&self, api: &dyn Api) -> StdResult<Config<Addr>> {
        Ok(Config {
            owner: api.addr_validate(&self.owner)?,
            token: api.addr_validate(&self.token)?,
            payout: self.payout,
            timing: self.timing,
        })
    }
}

impl From<Config<Addr>> for Config<String> {
    fn from(config: Config<Addr>) -> Self {
        Config {
            owner: config.owner.to_string(),
            token: config.token.to_string(),
            payout: config.payout,
            timing: config.timing,
        }
    }
}

/// Contract-wide bookkeeping
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
pub struct State {
    /// Once true, no beneficiary can be added or replaced
    pub setup_closed: bool,
    /// Number of registered beneficiaries
    pub beneficiary_count: u64,
    /// Sum of the full schedule amounts of all registered beneficiaries
    pub total_allocated: Uint128,
    /// Sum of `claimed` over all registered beneficiaries
    pub total_claimed: Uint128,
    /// Cumulative amount ever paid out, including payouts to since-replaced schedules
    pub total_paid: Uint128,
}

impl State {
    /// Tokens still owed to the registered beneficiaries
    pub fn outstanding(&self) -> StdResult<Uint128> {
        Ok(self.total_allocated.checked_sub(self.total_claimed)?)
    }
}

pub mod msg {
    use cosmwasm_std::{Addr, Api, StdResult, Uint128};
    use cw20::Cw20ReceiveMsg;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    use super::{Config, GlobalConfig, PayoutMode, State, VestingPeriod, VestingSchedule};

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
    pub struct InstantiateMsg {
        /// Defaults to the instantiator if not provided
        pub owner: Option<String>,
        pub token: String,
        /// Token generation event in seconds. Zero means the instantiation block time
        pub start_time: u64,
        pub locking_period_days: u64,
        /// Defaults to `PayoutMode::Transfer`
        pub payout: Option<PayoutMode>,
    }

    impl InstantiateMsg {
        pub fn check(
            self,
            api: &dyn Api,
            instantiator: &Addr,
            block_time: u64,
        ) -> StdResult<Config<Addr>> {
            let start_time = if self.start_time == 0 {
                block_time
            } else {
                self.start_time
            };
            let unchecked = Config {
                owner: self.owner.unwrap_or_else(|| instantiator.to_string()),
                token: self.token,
                payout: self.payout.unwrap_or_default(),
                timing: GlobalConfig {
                    start_time,
                    locking_period_days: self.locking_period_days,
                },
            };
            unchecked.check(api)
        }
    }

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
    #[serde(rename_all = "snake_case")]
    pub enum ExecuteMsg {
        /// Implementation of cw20 receive msg, used to fund and register a batch in one step
        Receive(Cw20ReceiveMsg),
        /// Register or replace beneficiaries. `schedules[i]` belongs to `beneficiaries[i]`.
        /// Only callable by the owner while the setup phase is open
        AddBeneficiaries {
            beneficiaries: Vec<String>,
            schedules: Vec<Vec<VestingPeriod>>,
        },
        /// Permanently close the setup phase
        EndSetup {},
        /// Pay out everything currently claimable to `beneficiary`. Callable by anyone
        ClaimFor { beneficiary: String },
        /// Same as `ClaimFor` with the sender as beneficiary
        Claim {},
    }

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
    #[serde(rename_all = "snake_case")]
    pub enum ReceiveMsg {
        /// Register beneficiaries; the amount sent must equal the batch's total allocation
        AddBeneficiaries {
            beneficiaries: Vec<String>,
            schedules: Vec<Vec<VestingPeriod>>,
        },
    }

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
    #[serde(rename_all = "snake_case")]
    pub enum QueryMsg {
        // Config of this contract
        Config {},
        // Setup flag and global totals
        State {},
        // Schedule and claim status of one beneficiary
        Beneficiary { address: String },
        // Amount a claim would pay out right now
        TokensToClaim { address: String },
        // Total vested for a beneficiary at `timestamp`, or now if omitted
        VestedAmount {
            address: String,
            timestamp: Option<u64>,
        },
        // Paginated list of beneficiaries, ordered by address
        Beneficiaries {
            start_after: Option<String>,
            limit: Option<u32>,
        },
        // Token balance held by the contract against what it still owes
        Funding {},
    }

    pub type ConfigResponse = Config<Addr>;

    pub type StateResponse = State;

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
    pub struct BeneficiaryResponse {
        pub address: Addr,
        pub schedule: VestingSchedule,
        /// Full amount of the schedule
        pub total_amount: Uint128,
        /// Amount vested at query time
        pub vested: Uint128,
        pub claimed: Uint128,
        /// `vested - claimed`
        pub claimable: Uint128,
    }

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
    pub struct BeneficiariesResponse {
        pub beneficiaries: Vec<BeneficiaryResponse>,
    }

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
    pub struct FundingResponse {
        /// Token balance held by the contract
        pub balance: Uint128,
        /// Amount still owed to registered beneficiaries
        pub outstanding: Uint128,
        /// How much the balance falls short of `outstanding`. Always zero when paying out by minting
        pub shortfall: Uint128,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(tokens_per_day: u128, duration_days: u64) -> VestingPeriod {
        VestingPeriod {
            tokens_per_day: Uint128::new(tokens_per_day),
            duration_days,
        }
    }

    #[test]
    fn test_schedule_validation() {
        let err = VestingSchedule::new(vec![]).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidSchedule {
                reason: "schedule has no periods".to_string()
            }
        );

        let err = VestingSchedule::new(vec![period(1, 10), period(5, 0)]).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidSchedule {
                reason: "period 1 has a duration of zero days".to_string()
            }
        );

        let err = VestingSchedule::new(vec![period(u128::MAX, 2)]).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidSchedule {
                reason: "total amount overflows".to_string()
            }
        );

        let err = VestingSchedule::new(vec![period(0, u64::MAX), period(0, 1)]).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidSchedule {
                reason: "total duration overflows".to_string()
            }
        );

        // zero-rate periods are a valid way to express an embedded lock
        let schedule = VestingSchedule::new(vec![period(0, 10), period(3, 10)]).unwrap();
        assert_eq!(schedule.periods().len(), 2);
    }

    #[test]
    fn test_schedule_totals() {
        let schedule = VestingSchedule::new(vec![period(1, 1), period(0, 7), period(1, 1)]).unwrap();
        assert_eq!(schedule.total_amount().unwrap(), Uint128::new(2));
        assert_eq!(schedule.total_duration_days(), 9);

        let schedule = VestingSchedule::new(vec![period(250, 30), period(100, 60)]).unwrap();
        assert_eq!(schedule.total_amount().unwrap(), Uint128::new(13_500));
        assert_eq!(schedule.total_duration_days(), 90);
    }

    #[test]
    fn test_locate() {
        let schedule = VestingSchedule::new(vec![period(1, 1), period(0, 7), period(1, 1)]).unwrap();

        assert_eq!(
            schedule.locate(0),
            Some(PeriodPosition {
                index: 0,
                day_in_period: 0
            })
        );
        assert_eq!(
            schedule.locate(1),
            Some(PeriodPosition {
                index: 1,
                day_in_period: 0
            })
        );
        assert_eq!(
            schedule.locate(7),
            Some(PeriodPosition {
                index: 1,
                day_in_period: 6
            })
        );
        assert_eq!(
            schedule.locate(8),
            Some(PeriodPosition {
                index: 2,
                day_in_period: 0
            })
        );
        assert_eq!(schedule.locate(9), None);
        assert_eq!(schedule.locate(u64::MAX), None);
    }

    #[test]
    fn test_vesting_start() {
        let timing = GlobalConfig {
            start_time: 1_000,
            locking_period_days: 10,
        };
        assert_eq!(timing.vesting_start(), 1_000 + 10 * SECONDS_PER_DAY);

        let timing = GlobalConfig {
            start_time: u64::MAX - 5,
            locking_period_days: 1,
        };
        assert_eq!(timing.vesting_start(), u64::MAX);
    }

    #[test]
    fn test_state_outstanding() {
        let state = State {
            total_allocated: Uint128::new(1_000),
            total_claimed: Uint128::new(400),
            ..Default::default()
        };
        assert_eq!(state.outstanding().unwrap(), Uint128::new(600));
    }
}
