use std::collections::HashMap;

use cosmwasm_std::{to_binary, Addr, Binary, QuerierResult, SystemError, SystemResult, Uint128};
use cw20::{BalanceResponse, Cw20QueryMsg};

#[derive(Clone, Debug, Default)]
pub struct Cw20Querier {
    /// maps cw20 contract address to user balances
    pub balances: HashMap<Addr, HashMap<Addr, Uint128>>,
}

impl Cw20Querier {
    pub fn handle_query(&self, contract_addr: &Addr, query: Cw20QueryMsg) -> QuerierResult {
        match query {
            Cw20QueryMsg::Balance { address } => {
                let contract_balances = match self.balances.get(contract_addr) {
                    Some(balances) => balances,
                    None => {
                        return SystemResult::Err(SystemError::InvalidRequest {
                            error: format!(
                                "no balances available for cw20 contract {}",
                                contract_addr
                            ),
                            request: Binary::default(),
                        })
                    }
                };

                // accounts that never received the token hold nothing
                let balance = contract_balances
                    .get(&Addr::unchecked(address))
                    .copied()
                    .unwrap_or_else(Uint128::zero);

                SystemResult::Ok(to_binary(&BalanceResponse { balance }).into())
            }

            other_query => panic!("[mock]: Unsupported cw20 query: {:?}", other_query),
        }
    }
}
