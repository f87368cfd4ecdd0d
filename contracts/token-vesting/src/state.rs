use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

use vesting_core::vesting::{BeneficiaryAccount, Config, State};

pub const CONFIG: Item<Config<Addr>> = Item::new("config");
pub const STATE: Item<State> = Item::new("state");
pub const BENEFICIARIES: Map<&Addr, BeneficiaryAccount> = Map::new("beneficiaries");
