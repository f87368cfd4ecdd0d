pub mod balance;
pub mod error;
pub mod math;
pub mod vesting;

#[cfg(not(target_arch = "wasm32"))]
pub mod testing;
