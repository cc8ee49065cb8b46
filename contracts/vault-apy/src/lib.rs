//! # Vault APY Contract
//!
//! Computes the annualized yield of theta vaults from their historical
//! price-per-share.
//!
//! ## Overview
//!
//! Periods are weekly windows that open every Friday at 10:00 UTC. Starting
//! from the most recent one, the engine:
//! 1. Picks the first sample of the period and the first sample of the next period
//! 2. Skips the period when the price did not grow (options were exercised) and
//!    retries one week earlier
//! 3. Compounds the weekly return over 52 weeks
//!
//! Only the still open period is adjusted for management and performance fees
//! and credited with the yield of the wrapped underlying asset. Older periods
//! already reflect what was charged on chain.
//!
//! ## Authorization
//!
//! - **Owner**: manages vault fee schedules, oracle addresses and APY overrides
//! - **Updater**: feeds price history and toggles the loading flag
//!

pub mod apy;
pub mod contract;
pub mod error;
pub mod execute;
pub mod external_types;
pub mod msg;
pub mod query;
pub mod state;
pub mod vaults;

#[cfg(test)]
mod testing;
