use std::collections::HashMap;

use cosmwasm_std::{Addr, StdError, StdResult, Uint128};

use crate::balance::BalanceMover;

/// In-memory token ledger. Transfers are paid from `holder`'s balance and fail when it runs dry;
/// setting `frozen` makes every mint and transfer fail.
#[derive(Clone, Debug)]
pub struct MockBalanceMover {
    pub holder: Addr,
    pub balances: HashMap<Addr, Uint128>,
    pub total_minted: Uint128,
    pub frozen: bool,
}

impl MockBalanceMover {
    pub fn new(holder: &Addr, funded: Uint128) -> Self {
        let mut balances = HashMap::new();
        balances.insert(holder.clone(), funded);
        MockBalanceMover {
            holder: holder.clone(),
            balances,
            total_minted: Uint128::zero(),
            frozen: false,
        }
    }

    fn credit(&mut self, account: &Addr, amount: Uint128) -> StdResult<()> {
        let balance = self.balances.entry(account.clone()).or_default();
        *balance = balance.checked_add(amount)?;
        Ok(())
    }
}

impl BalanceMover for MockBalanceMover {
    fn mint(&mut self, recipient: &Addr, amount: Uint128) -> StdResult<()> {
        if self.frozen {
            return Err(StdError::generic_err("[mock]: token is frozen"));
        }
        self.credit(recipient, amount)?;
        self.total_minted = self.total_minted.checked_add(amount)?;
        Ok(())
    }

    fn transfer(&mut self, recipient: &Addr, amount: Uint128) -> StdResult<()> {
        if self.frozen {
            return Err(StdError::generic_err("[mock]: token is frozen"));
        }
        let available = self.balance_of(&self.holder)?;
        let remaining = available.checked_sub(amount).map_err(|_| {
            StdError::generic_err(format!(
                "insufficient balance: available {}, requested {}",
                available, amount
            ))
        })?;
        self.balances.insert(self.holder.clone(), remaining);
        self.credit(recipient, amount)
    }

    fn balance_of(&self, account: &Addr) -> StdResult<Uint128> {
        Ok(self.balances.get(account).copied().unwrap_or_default())
    }
}
