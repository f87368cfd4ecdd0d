use cosmwasm_std::testing::MockQuerier;
use cosmwasm_std::{
    from_binary, from_slice, Addr, Empty, Querier, QuerierResult, QueryRequest, SystemError,
    SystemResult, Uint128, WasmQuery,
};
use cw20::Cw20QueryMsg;

use super::cw20_querier::Cw20Querier;

pub struct VestingMockQuerier {
    base: MockQuerier<Empty>,
    cw20_querier: Cw20Querier,
}

impl Querier for VestingMockQuerier {
    fn raw_query(&self, bin_request: &[u8]) -> QuerierResult {
        let request: QueryRequest<Empty> = match from_slice(bin_request) {
            Ok(v) => v,
            Err(e) => {
                return SystemResult::Err(SystemError::InvalidRequest {
                    error: format!("Parsing query request: {}", e),
                    request: bin_request.into(),
                })
            }
        };
        self.handle_query(&request)
    }
}

impl VestingMockQuerier {
    pub fn new(base: MockQuerier<Empty>) -> Self {
        VestingMockQuerier {
            base,
            cw20_querier: Cw20Querier::default(),
        }
    }

    /// Set mock querier balances for a cw20 token as a list of tuples
    pub fn set_cw20_balances(&mut self, cw20_address: &Addr, balances: &[(&Addr, Uint128)]) {
        self.cw20_querier.balances.insert(
            cw20_address.clone(),
            balances
                .iter()
                .map(|(account, balance)| ((*account).clone(), *balance))
                .collect(),
        );
    }

    pub fn handle_query(&self, request: &QueryRequest<Empty>) -> QuerierResult {
        match request {
            QueryRequest::Wasm(WasmQuery::Smart { contract_addr, msg }) => {
                let contract_addr = Addr::unchecked(contract_addr);
                match from_binary::<Cw20QueryMsg>(msg) {
                    Ok(cw20_query) => self.cw20_querier.handle_query(&contract_addr, cw20_query),
                    Err(_) => panic!("[mock]: Unsupported wasm query to {}", contract_addr),
                }
            }

            _ => self.base.handle_query(request),
        }
    }
}
