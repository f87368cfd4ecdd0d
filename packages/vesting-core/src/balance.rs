use cosmwasm_std::{Addr, StdResult, Uint128};

/// Moves fungible token balances on behalf of the vesting contract.
///
/// Implementations decide how a payout reaches the recipient (an immediate ledger update, a
/// queued CW20 message, ...). Any `Err` returned from `mint` or `transfer` means no tokens were
/// moved and the caller must treat the payout as not having happened.
pub trait BalanceMover {
    /// Create `amount` new tokens owned by `recipient`
    fn mint(&mut self, recipient: &Addr, amount: Uint128) -> StdResult<()>;

    /// Send `amount` tokens held by the vesting contract to `recipient`
    fn transfer(&mut self, recipient: &Addr, amount: Uint128) -> StdResult<()>;

    /// Current token balance of `account`
    fn balance_of(&self, account: &Addr) -> StdResult<Uint128>;
}
