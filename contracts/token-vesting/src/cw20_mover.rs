use cosmwasm_std::{
    to_binary, Addr, CosmosMsg, QuerierWrapper, StdError, StdResult, Uint128, WasmMsg,
};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};

use vesting_core::balance::BalanceMover;

/// Moves CW20 tokens out of the vesting contract.
///
/// Payouts are queued as CW20 execute messages and only take effect once attached to the
/// contract's `Response`. `transfer` checks the contract's balance, minus what was already queued
/// during the same execution, so an underfunded payout is rejected before any state is committed.
pub struct Cw20Mover<'a> {
    querier: QuerierWrapper<'a>,
    token: Addr,
    holder: Addr,
    queued_outflow: Uint128,
    messages: Vec<CosmosMsg>,
}

impl<'a> Cw20Mover<'a> {
    pub fn new(querier: QuerierWrapper<'a>, token: Addr, holder: Addr) -> Self {
        Cw20Mover {
            querier,
            token,
            holder,
            queued_outflow: Uint128::zero(),
            messages: vec![],
        }
    }

    pub fn holder_balance(&self) -> StdResult<Uint128> {
        self.balance_of(&self.holder)
    }

    pub fn into_messages(self) -> Vec<CosmosMsg> {
        self.messages
    }

    fn queue(&mut self, msg: &Cw20ExecuteMsg) -> StdResult<()> {
        self.messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: self.token.to_string(),
            msg: to_binary(msg)?,
            funds: vec![],
        }));
        Ok(())
    }
}

impl<'a> BalanceMover for Cw20Mover<'a> {
    fn mint(&mut self, recipient: &Addr, amount: Uint128) -> StdResult<()> {
        self.queue(&Cw20ExecuteMsg::Mint {
            recipient: recipient.to_string(),
            amount,
        })
    }

    fn transfer(&mut self, recipient: &Addr, amount: Uint128) -> StdResult<()> {
        let available = self.holder_balance()?.saturating_sub(self.queued_outflow);
        if available < amount {
            return Err(StdError::generic_err(format!(
                "insufficient balance: available {}, requested {}",
                available, amount
            )));
        }

        self.queue(&Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        })?;
        self.queued_outflow = self.queued_outflow.checked_add(amount)?;
        Ok(())
    }

    fn balance_of(&self, account: &Addr) -> StdResult<Uint128> {
        let res: BalanceResponse = self.querier.query_wasm_smart(
            self.token.clone(),
            &Cw20QueryMsg::Balance {
                address: account.to_string(),
            },
        )?;
        Ok(res.balance)
    }
}
