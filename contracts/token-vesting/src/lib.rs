pub mod claim;
pub mod contract;
pub mod cw20_mover;
pub mod error;
pub mod registry;
pub mod state;
