use cosmwasm_std::{StdResult, Uint128};

use crate::vesting::{BeneficiaryAccount, GlobalConfig, VestingSchedule, SECONDS_PER_DAY};

/// Full days elapsed since the token generation event, `None` before it
pub fn elapsed_days(timing: &GlobalConfig, timestamp: u64) -> Option<u64> {
    timestamp
        .checked_sub(timing.start_time)
        .map(|seconds| seconds / SECONDS_PER_DAY)
}

/// Full days that count towards vesting: elapsed days minus the locking period
pub fn effective_days(timing: &GlobalConfig, timestamp: u64) -> u64 {
    elapsed_days(timing, timestamp)
        .map(|days| days.saturating_sub(timing.locking_period_days))
        .unwrap_or(0)
}

/// Total amount unlocked by `schedule` at `timestamp`.
///
/// Periods are consumed in order: each one contributes `tokens_per_day` for every effective day
/// spent inside it, and the remaining days carry over to the next period. Partial days never
/// unlock anything, and the result is capped at the schedule's full amount once every period
/// has been consumed.
pub fn vested_total(
    schedule: &VestingSchedule,
    timing: &GlobalConfig,
    timestamp: u64,
) -> StdResult<Uint128> {
    let days = effective_days(timing, timestamp);

    let (vested, _) = schedule.periods().iter().try_fold(
        (Uint128::zero(), days),
        |(vested, remaining_days), period| -> StdResult<_> {
            if remaining_days == 0 {
                return Ok((vested, 0));
            }
            let days_in_period = remaining_days.min(period.duration_days);
            let unlocked = period
                .tokens_per_day
                .checked_mul(Uint128::from(days_in_period))?;
            Ok((
                vested.checked_add(unlocked)?,
                remaining_days - days_in_period,
            ))
        },
    )?;

    Ok(vested)
}

/// Amount that can be paid out to `account` at `timestamp`: vested minus already claimed
pub fn claimable_now(
    account: &BeneficiaryAccount,
    timing: &GlobalConfig,
    timestamp: u64,
) -> StdResult<Uint128> {
    let vested = vested_total(&account.schedule, timing, timestamp)?;
    Ok(vested.checked_sub(account.claimed)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vesting::VestingPeriod;

    // 1 token with 18 decimals
    const TOKEN: u128 = 1_000_000_000_000_000_000;
    const DAY: u64 = SECONDS_PER_DAY;

    fn schedule(periods: &[(u128, u64)]) -> VestingSchedule {
        VestingSchedule::new(
            periods
                .iter()
                .map(|(tokens_per_day, duration_days)| VestingPeriod {
                    tokens_per_day: Uint128::new(*tokens_per_day),
                    duration_days: *duration_days,
                })
                .collect(),
        )
        .unwrap()
    }

    fn timing(start_time: u64, locking_period_days: u64) -> GlobalConfig {
        GlobalConfig {
            start_time,
            locking_period_days,
        }
    }

    #[test]
    fn test_elapsed_and_effective_days() {
        let t = timing(1_000, 3);

        assert_eq!(elapsed_days(&t, 999), None);
        assert_eq!(elapsed_days(&t, 1_000), Some(0));
        assert_eq!(elapsed_days(&t, 1_000 + DAY - 1), Some(0));
        assert_eq!(elapsed_days(&t, 1_000 + DAY), Some(1));

        assert_eq!(effective_days(&t, 0), 0);
        assert_eq!(effective_days(&t, 1_000 + 3 * DAY), 0);
        assert_eq!(effective_days(&t, 1_000 + 4 * DAY), 1);
        assert_eq!(effective_days(&t, 1_000 + 10 * DAY + 100), 7);
    }

    #[test]
    fn test_embedded_zero_rate_period() {
        let s = schedule(&[(TOKEN, 1), (0, 7), (TOKEN, 1)]);
        let t = timing(0, 0);

        assert_eq!(vested_total(&s, &t, 0).unwrap(), Uint128::zero());
        assert_eq!(vested_total(&s, &t, DAY).unwrap(), Uint128::new(TOKEN));
        // nothing new unlocks while inside the zero-rate span
        assert_eq!(vested_total(&s, &t, 8 * DAY).unwrap(), Uint128::new(TOKEN));
        assert_eq!(vested_total(&s, &t, 9 * DAY).unwrap(), Uint128::new(2 * TOKEN));
        assert_eq!(vested_total(&s, &t, 100 * DAY).unwrap(), Uint128::new(2 * TOKEN));
    }

    #[test]
    fn test_leading_zero_rate_period() {
        let s = schedule(&[(0, 10), (TOKEN, 10)]);
        let t = timing(0, 0);

        assert_eq!(vested_total(&s, &t, 9 * DAY).unwrap(), Uint128::zero());
        assert_eq!(vested_total(&s, &t, 10 * DAY).unwrap(), Uint128::zero());
        assert_eq!(vested_total(&s, &t, 11 * DAY).unwrap(), Uint128::new(TOKEN));
        assert_eq!(vested_total(&s, &t, 29 * DAY).unwrap(), Uint128::new(10 * TOKEN));
    }

    #[test]
    fn test_single_period() {
        let s = schedule(&[(TOKEN, 10)]);
        let t = timing(0, 0);

        assert_eq!(vested_total(&s, &t, DAY).unwrap(), Uint128::new(TOKEN));
        assert_eq!(vested_total(&s, &t, 10 * DAY).unwrap(), Uint128::new(10 * TOKEN));
        assert_eq!(vested_total(&s, &t, 30 * DAY).unwrap(), Uint128::new(10 * TOKEN));
    }

    #[test]
    fn test_partial_days_do_not_unlock() {
        let s = schedule(&[(TOKEN, 10)]);
        let t = timing(0, 0);

        assert_eq!(vested_total(&s, &t, DAY - 1).unwrap(), Uint128::zero());
        assert_eq!(vested_total(&s, &t, 2 * DAY - 1).unwrap(), Uint128::new(TOKEN));
    }

    #[test]
    fn test_locking_period() {
        let s = schedule(&[(TOKEN, 10)]);
        let t = timing(0, 10);

        for day in 0..=10 {
            assert_eq!(vested_total(&s, &t, day * DAY).unwrap(), Uint128::zero());
        }
        assert_eq!(vested_total(&s, &t, 11 * DAY).unwrap(), Uint128::new(TOKEN));
        assert_eq!(vested_total(&s, &t, 20 * DAY).unwrap(), Uint128::new(10 * TOKEN));
        assert_eq!(vested_total(&s, &t, 21 * DAY).unwrap(), Uint128::new(10 * TOKEN));
    }

    #[test]
    fn test_token_generation_event() {
        let now = 1_635_724_800; // 2021-11-01
        let s = schedule(&[(TOKEN, 1), (0, 10)]);
        let t = timing(now + DAY, 0);

        assert_eq!(vested_total(&s, &t, now).unwrap(), Uint128::zero());
        assert_eq!(vested_total(&s, &t, now + DAY).unwrap(), Uint128::zero());
        assert_eq!(vested_total(&s, &t, now + 2 * DAY).unwrap(), Uint128::new(TOKEN));
    }

    #[test]
    fn test_monotonic_and_capped() {
        let s = schedule(&[(7, 3), (0, 2), (11, 5), (0, 1), (2, 4)]);
        let t = timing(5_000, 2);
        let total = s.total_amount().unwrap();

        let mut previous = Uint128::zero();
        let mut timestamp = 0;
        while timestamp < 5_000 + 30 * DAY {
            let vested = vested_total(&s, &t, timestamp).unwrap();
            assert!(vested >= previous);
            assert!(vested <= total);
            previous = vested;
            timestamp += DAY / 4;
        }
        assert_eq!(previous, total);
    }

    #[test]
    fn test_claimable_now() {
        let s = schedule(&[(TOKEN, 10)]);
        let t = timing(0, 0);

        let mut account = BeneficiaryAccount::new(s);
        assert_eq!(claimable_now(&account, &t, 4 * DAY).unwrap(), Uint128::new(4 * TOKEN));

        account.claimed = Uint128::new(3 * TOKEN);
        assert_eq!(claimable_now(&account, &t, 4 * DAY).unwrap(), Uint128::new(TOKEN));

        account.claimed = Uint128::new(4 * TOKEN);
        assert_eq!(claimable_now(&account, &t, 4 * DAY).unwrap(), Uint128::zero());

        // an account claimed past its vested amount is a broken invariant: surface it
        account.claimed = Uint128::new(5 * TOKEN);
        assert!(claimable_now(&account, &t, 4 * DAY).is_err());
    }
}
